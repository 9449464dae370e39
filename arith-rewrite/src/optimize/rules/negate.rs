use arith_parser::ast::{Expr, UnaryOp};
use crate::step_collector::StepCollector;
use super::{do_unary, Step};

/// `-(-a) = a`
pub fn double_negation(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_unary(expr, UnaryOp::Neg, |operand| match operand {
        Expr::Unary(UnaryOp::Neg, inner) => Some((**inner).clone()),
        _ => None,
    })?;
    step_collector.push(Step::DoubleNegation);
    Some(opt)
}

/// `-(-2) = 2`
pub fn fold(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_unary(expr, UnaryOp::Neg, |operand| {
        operand.as_number()
            .filter(|value| *value < 0.0)
            .map(|value| Expr::number(-value))
    })?;
    step_collector.push(Step::FoldConstant);
    Some(opt)
}

/// Applies all negation rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    double_negation(expr, step_collector)
        .or_else(|| fold(expr, step_collector))
}
