//! Implementation of the optimization rules.
//!
//! Each rule in this module is a function that takes the expression to optimize as an argument,
//! and returns `Some(expr)` with the optimized expression if the rule applies, or `None` if the
//! rule does not apply. Rules only look at the node they are given; the children of the node are
//! expected to be optimized already.

pub mod add;
pub mod divide;
pub mod multiply;
pub mod negate;
pub mod subtract;

use arith_parser::ast::{BinOp, Expr, UnaryOp};
use crate::step_collector::StepCollector;
use super::step::Step;

/// If the expression is a binary operation with the given operator, calls the given
/// transformation function with its operands.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_binary(
    expr: &Expr,
    op: BinOp,
    f: impl Fn(&Expr, &Expr) -> Option<Expr>,
) -> Option<Expr> {
    match expr {
        Expr::Binary(expr_op, lhs, rhs) if *expr_op == op => f(lhs, rhs),
        _ => None,
    }
}

/// If the expression is a unary operation with the given operator, calls the given
/// transformation function with its operand.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_unary(
    expr: &Expr,
    op: UnaryOp,
    f: impl Fn(&Expr) -> Option<Expr>,
) -> Option<Expr> {
    match expr {
        Expr::Unary(expr_op, operand) if *expr_op == op => f(operand),
        _ => None,
    }
}

/// Applies the given operation to two numeric literals.
///
/// Returns [`None`] if either operand is not a number, or if the result is not finite.
pub(crate) fn fold_numbers(lhs: &Expr, rhs: &Expr, f: impl Fn(f64, f64) -> f64) -> Option<Expr> {
    let value = f(lhs.as_number()?, rhs.as_number()?);
    value.is_finite().then(|| Expr::number(value))
}

/// Applies all rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    add::all(expr, step_collector)
        .or_else(|| subtract::all(expr, step_collector))
        .or_else(|| multiply::all(expr, step_collector))
        .or_else(|| divide::all(expr, step_collector))
        .or_else(|| negate::all(expr, step_collector))
}
