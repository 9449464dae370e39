use arith_parser::ast::{BinOp, Expr};
use crate::step_collector::StepCollector;
use super::{do_binary, fold_numbers, Step};

/// `5-2 = 3`
pub fn fold(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, BinOp::Sub, |lhs, rhs| fold_numbers(lhs, rhs, |a, b| a - b))?;
    step_collector.push(Step::FoldConstant);
    Some(opt)
}

/// `a-0 = a`
pub fn subtract_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, BinOp::Sub, |lhs, rhs| rhs.is_zero().then(|| lhs.clone()))?;
    step_collector.push(Step::SubtractZero);
    Some(opt)
}

/// Applies all subtraction rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    fold(expr, step_collector)
        .or_else(|| subtract_zero(expr, step_collector))
}
