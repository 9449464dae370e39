use arith_parser::ast::{BinOp, Expr};
use crate::step_collector::StepCollector;
use super::{do_binary, fold_numbers, Step};

/// `0*a = 0`
/// `a*0 = 0`
pub fn multiply_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, BinOp::Mul, |lhs, rhs| {
        (lhs.is_zero() || rhs.is_zero()).then(|| Expr::number(0.0))
    })?;
    step_collector.push(Step::MultiplyZero);
    Some(opt)
}

/// `1*a = a`
/// `a*1 = a`
pub fn multiply_one(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, BinOp::Mul, |lhs, rhs| {
        if rhs.is_one() {
            Some(lhs.clone())
        } else if lhs.is_one() {
            Some(rhs.clone())
        } else {
            None
        }
    })?;
    step_collector.push(Step::MultiplyOne);
    Some(opt)
}

/// `2*3 = 6`
pub fn fold(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, BinOp::Mul, |lhs, rhs| fold_numbers(lhs, rhs, |a, b| a * b))?;
    step_collector.push(Step::FoldConstant);
    Some(opt)
}

/// Applies all multiplication rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    multiply_zero(expr, step_collector)
        .or_else(|| multiply_one(expr, step_collector))
        .or_else(|| fold(expr, step_collector))
}
