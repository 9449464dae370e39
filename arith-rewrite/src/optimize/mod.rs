//! Algebraic optimization of expressions.
//!
//! This module provides the [`optimize`] function, which removes operations that do not change
//! the value of an expression (such as `a+0` or `a*1`) and computes the operations between
//! numbers. It works bottom-up, applying the [rules] to each node after its children, and repeats
//! whole passes over the tree until one of them changes nothing.

pub mod rules;
pub mod step;

use arith_parser::ast::Expr;
use crate::step_collector::StepCollector;
use log::{debug, trace, warn};
use step::Step;

/// The maximum number of passes over the tree.
pub const MAX_PASSES: usize = 100;

/// Optimizes the children of the expression, then the expression itself.
fn optimize_node(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Expr {
    let expr = match expr {
        Expr::Literal(_) => expr.clone(),
        Expr::Unary(op, operand) => Expr::Unary(*op, Box::new(optimize_node(operand, step_collector))),
        Expr::Call(name, arg) => Expr::call(name.clone(), optimize_node(arg, step_collector)),
        Expr::Binary(op, lhs, rhs) => Expr::binary(
            *op,
            optimize_node(lhs, step_collector),
            optimize_node(rhs, step_collector),
        ),
    };

    match rules::all(&expr, step_collector) {
        Some(optimized) => {
            trace!("rewrote {} into {}", expr, optimized);
            optimized
        },
        None => expr,
    }
}

/// Base implementation of the optimizer.
fn inner_optimize(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Expr {
    let mut expr = expr.clone();
    for pass in 1..=MAX_PASSES {
        let next = optimize_node(&expr, step_collector);
        if next == expr {
            debug!("optimizer reached a fixpoint after {} pass(es)", pass);
            return next;
        }
        expr = next;
    }

    warn!("optimizer stopped after {} passes without reaching a fixpoint", MAX_PASSES);
    expr
}

/// Optimizes the given expression.
///
/// The result is a fixpoint: optimizing it again returns it unchanged.
pub fn optimize(expr: &Expr) -> Expr {
    inner_optimize(expr, &mut ())
}

/// Optimizes the given expression. The steps taken by the optimizer will also be collected and
/// returned, in the order they were applied.
pub fn optimize_with_steps(expr: &Expr) -> (Expr, Vec<Step>) {
    let mut steps = Vec::new();
    let expr = inner_optimize(expr, &mut steps);
    (expr, steps)
}

#[cfg(test)]
mod tests {
    use arith_parser::{parse_source, parse_source_with, Limits, Shape};
    use pretty_assertions::assert_eq;
    use super::*;

    fn optimized(input: &str) -> String {
        optimize(&parse_source(input).unwrap()).to_string()
    }

    fn optimized_chain(input: &str) -> String {
        let expr = parse_source_with(input, Shape::Chain, Limits::default()).unwrap();
        optimize(&expr).to_string()
    }

    #[test]
    fn identity_elements() {
        assert_eq!(optimized("a+b+0"), "a+b");
        assert_eq!(optimized("a+1*b"), "a+b");
        assert_eq!(optimized("a+b/1"), "a+b");
        assert_eq!(optimized("a+b+c*0"), "a+b");
        assert_eq!(optimized("0/a+b"), "b");
        assert_eq!(optimized("x-0"), "x");
    }

    #[test]
    fn constants() {
        assert_eq!(optimized("2*3+a"), "a+6");
        assert_eq!(optimized("1+a+2"), "a+3");
        assert_eq!(optimized("a-1-2"), "a-3");
        assert_eq!(optimized("a+2-2"), "a");
        assert_eq!(optimized("6/4*x"), "1.5*x");
        assert_eq!(optimized("a+1+2+3+4*2-4/10"), "a+13.6");
    }

    #[test]
    fn negative_constants_keep_folding() {
        assert_eq!(optimized("(1-3)*3+a"), "a-6");
        assert_eq!(optimized("(1-3)/2+a"), "a-1");
        assert_eq!(optimized("a+2*(1-3)"), "a-4");
        assert_eq!(optimized("a*(2-3)"), "a*(-1)");
        assert_eq!(optimized("-2*3+a"), "a-6");
        assert_eq!(optimized("(2-5)*(1-4)"), "9");
        assert_eq!(optimized_chain("-(2-5)*a"), "3*a");
        assert_eq!(optimized_chain("(1-3)*3+a"), "a-6");
    }

    #[test]
    fn whole_expression_folds() {
        assert_eq!(optimized("2*(3+4)"), "14");
        assert_eq!(optimized("1-1"), "0");
        assert_eq!(optimized("f(2+3)*1"), "f(5)");
    }

    #[test]
    fn division_by_zero_is_kept() {
        assert_eq!(optimized("a/(2-2)"), "a/0");
        assert_eq!(optimized("1/(2-2)"), "1/0");
    }

    #[test]
    fn chain_subtraction() {
        assert_eq!(optimized_chain("a-0"), "a");
        assert_eq!(optimized_chain("5-2-a"), "3-a");
        assert_eq!(optimized_chain("a-1-2"), "a-1-2");
    }

    #[test]
    fn double_negation() {
        let expr = Expr::neg(Expr::neg(Expr::literal("a")));
        let (result, steps) = optimize_with_steps(&expr);
        assert_eq!(result, Expr::literal("a"));
        assert_eq!(steps, vec![Step::DoubleNegation]);
    }

    #[test]
    fn steps() {
        let (result, steps) = optimize_with_steps(&parse_source("a*1+0").unwrap());
        assert_eq!(result, Expr::literal("a"));
        assert_eq!(steps, vec![Step::MultiplyOne, Step::AddZero]);
    }

    #[test]
    fn idempotent() {
        for input in [
            "a+b+0",
            "1+a-3+b",
            "(a+1)*(b-2)+3*4",
            "f(x*1+0)/(2-1)",
            "-(a+2)-3",
            "a-b-c+1-1",
            "0.1+0.2+x",
            "(1-3)*3+a",
            "a*(2-3)-(4-9)/x",
        ] {
            let once = optimize(&parse_source(input).unwrap());
            let twice = optimize(&once);
            assert_eq!(twice, once, "{}", input);
        }
    }
}
