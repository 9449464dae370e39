use arith_parser::ast::{BinOp, Expr};
use crate::step_collector::StepCollector;
use super::{do_binary, fold_numbers, Step};

/// `a/1 = a`
pub fn divide_one(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, BinOp::Div, |lhs, rhs| rhs.is_one().then(|| lhs.clone()))?;
    step_collector.push(Step::DivideOne);
    Some(opt)
}

/// `0/a = 0`, unless `a` is zero
pub fn divide_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, BinOp::Div, |lhs, rhs| {
        (lhs.is_zero() && !rhs.is_zero()).then(|| Expr::number(0.0))
    })?;
    step_collector.push(Step::DivideZero);
    Some(opt)
}

/// `6/4 = 1.5`, unless dividing by zero
pub fn fold(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, BinOp::Div, |lhs, rhs| {
        if rhs.is_zero() {
            None
        } else {
            fold_numbers(lhs, rhs, |a, b| a / b)
        }
    })?;
    step_collector.push(Step::FoldConstant);
    Some(opt)
}

/// Applies all division rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    divide_one(expr, step_collector)
        .or_else(|| divide_zero(expr, step_collector))
        .or_else(|| fold(expr, step_collector))
}
