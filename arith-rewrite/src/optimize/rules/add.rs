//! Optimization rules for expressions involving addition, including collecting the numbers of a
//! whole chain of terms.

use arith_parser::ast::{balance, BinOp, Expr};
use crate::{step_collector::StepCollector, terms::signed_terms};
use super::{do_binary, fold_numbers, Step};

/// `0+a = a`
/// `a+0 = a`
pub fn add_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, BinOp::Add, |lhs, rhs| {
        if rhs.is_zero() {
            Some(lhs.clone())
        } else if lhs.is_zero() {
            Some(rhs.clone())
        } else {
            None
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::AddZero);
    Some(opt)
}

/// `2+3 = 5`
pub fn fold(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, BinOp::Add, |lhs, rhs| fold_numbers(lhs, rhs, |a, b| a + b))?;
    step_collector.push(Step::FoldConstant);
    Some(opt)
}

/// Sums up every number in a chain of additions and subtractions into a single term at the end of
/// the chain, and rebuilds the chain as a balanced tree.
///
/// `1+a-3+b = a+b-2`
/// `a+2-2 = a`
pub fn combine_constants(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, BinOp::Add, |_, _| {
        let mut sum = 0.0;
        let mut terms = Vec::new();
        for term in signed_terms(expr) {
            match term.expr.as_number() {
                Some(value) if term.negative => sum -= value,
                Some(value) => sum += value,
                None => terms.push(term.into_expr()),
            }
        }

        if !sum.is_finite() {
            return None;
        }
        if sum > 0.0 {
            terms.push(Expr::number(sum));
        } else if sum < 0.0 {
            terms.push(Expr::neg(Expr::number(-sum)));
        }

        let combined = balance(BinOp::Add, terms).unwrap_or_else(|| Expr::number(0.0));
        (combined != *expr).then_some(combined)
    })?;

    step_collector.push(Step::CombineConstants);
    Some(opt)
}

/// Applies all addition rules.
///
/// All addition rules will reduce the complexity of the expression.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    add_zero(expr, step_collector)
        .or_else(|| fold(expr, step_collector))
        .or_else(|| combine_constants(expr, step_collector))
}
