//! Canonical forms of an expression under the commutative law.
//!
//! Subtractions and divisions are first turned into additions of negations and multiplications
//! by reciprocals, so that every chain of `+` or `*` can be reordered freely. The operands of
//! each chain are then sorted and the chain is rebuilt as a balanced tree.

use arith_parser::ast::{balance, BinOp, Expr};
use log::trace;
use std::cmp::Ordering;

/// How the operands of a commutative chain are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanonicalOrder {
    /// Larger subtrees first, ties broken by printed text.
    SizeDescending,

    /// By printed text.
    Lexical,
}

impl CanonicalOrder {
    fn compare(self, a: &Keyed, b: &Keyed) -> Ordering {
        match self {
            CanonicalOrder::SizeDescending => b.size.cmp(&a.size).then_with(|| a.text.cmp(&b.text)),
            CanonicalOrder::Lexical => a.text.cmp(&b.text),
        }
    }
}

/// An operand of a chain, along with the keys it is sorted by.
struct Keyed {
    size: usize,
    text: String,
    expr: Expr,
}

impl From<Expr> for Keyed {
    fn from(expr: Expr) -> Self {
        Self {
            size: expr.node_count(),
            text: expr.to_string(),
            expr,
        }
    }
}

/// Rewrites `a-b` as `a+(-b)` and `a/b` as `a*(1/b)`, everywhere in the tree.
fn normalize(expr: &Expr) -> Expr {
    match expr {
        Expr::Literal(_) => expr.clone(),
        Expr::Unary(op, operand) => Expr::Unary(*op, Box::new(normalize(operand))),
        Expr::Call(name, arg) => Expr::call(name.clone(), normalize(arg)),
        Expr::Binary(BinOp::Sub, lhs, rhs) => Expr::binary(BinOp::Add, normalize(lhs), Expr::neg(normalize(rhs))),
        Expr::Binary(BinOp::Div, lhs, rhs) => Expr::binary(BinOp::Mul, normalize(lhs), Expr::recip(normalize(rhs))),
        Expr::Binary(op, lhs, rhs) => Expr::binary(*op, normalize(lhs), normalize(rhs)),
    }
}

/// Collects the operands of the chain of `op` rooted at `expr`.
fn collect_operands<'a>(expr: &'a Expr, op: BinOp, operands: &mut Vec<&'a Expr>) {
    match expr {
        Expr::Binary(expr_op, lhs, rhs) if *expr_op == op => {
            collect_operands(lhs, op, operands);
            collect_operands(rhs, op, operands);
        },
        _ => operands.push(expr),
    }
}

/// Sorts the operands of every commutative chain of a normalized tree, innermost chains first.
fn reorder(expr: &Expr, order: CanonicalOrder) -> Expr {
    match expr {
        Expr::Literal(_) => expr.clone(),
        Expr::Unary(op, operand) => Expr::Unary(*op, Box::new(reorder(operand, order))),
        Expr::Call(name, arg) => Expr::call(name.clone(), reorder(arg, order)),
        Expr::Binary(op, lhs, rhs) if op.is_commutative() => {
            let mut operands = Vec::new();
            collect_operands(expr, *op, &mut operands);

            let mut keyed = operands.into_iter()
                .map(|operand| Keyed::from(reorder(operand, order)))
                .collect::<Vec<_>>();
            keyed.sort_by(|a, b| order.compare(a, b));

            balance(*op, keyed.into_iter().map(|keyed| keyed.expr))
                .unwrap_or_else(|| Expr::binary(*op, reorder(lhs, order), reorder(rhs, order)))
        },
        Expr::Binary(op, lhs, rhs) => Expr::binary(*op, reorder(lhs, order), reorder(rhs, order)),
    }
}

/// Returns the canonical tree of the expression for the given ordering of operands.
pub fn canonicalize(expr: &Expr, order: CanonicalOrder) -> Expr {
    let canonical = reorder(&normalize(expr), order);
    trace!("{:?} canonical form of {} is {}", order, expr, canonical);
    canonical
}

/// Returns the printed canonical forms of the expression: first with operands sorted by
/// [size](CanonicalOrder::SizeDescending), then [by text](CanonicalOrder::Lexical) if that is
/// different.
pub fn canonical_forms(expr: &Expr) -> Vec<String> {
    let mut forms = Vec::with_capacity(2);
    for order in [CanonicalOrder::SizeDescending, CanonicalOrder::Lexical] {
        let form = canonicalize(expr, order).to_string();
        if !forms.contains(&form) {
            forms.push(form);
        }
    }
    forms
}

#[cfg(test)]
mod tests {
    use arith_parser::parse_source;
    use pretty_assertions::assert_eq;
    use super::*;

    fn forms(input: &str) -> Vec<String> {
        canonical_forms(&parse_source(input).unwrap())
    }

    #[test]
    fn already_sorted() {
        assert_eq!(forms("a+b+c+d"), vec!["a+b+c+d"]);
    }

    #[test]
    fn two_orders() {
        assert_eq!(forms("c*d+a"), vec!["c*d+a", "a+c*d"]);
    }

    #[test]
    fn subtraction_becomes_negation() {
        assert_eq!(forms("b-a"), vec!["-a+b"]);
    }

    #[test]
    fn inner_chains_are_sorted() {
        assert_eq!(forms("(b+a)*(d+c)"), vec!["(a+b)*(c+d)"]);
    }

    #[test]
    fn sorting_crosses_balanced_subtrees() {
        assert_eq!(forms("d+c+b+a"), vec!["a+b+c+d"]);
    }

    #[test]
    fn balanced_result() {
        let expr = parse_source("h+g+f+e+d+c+b+a").unwrap();
        for order in [CanonicalOrder::SizeDescending, CanonicalOrder::Lexical] {
            let canonical = canonicalize(&expr, order);
            assert_eq!(canonical.height(), 3);
            assert_eq!(canonical.to_string(), "a+b+c+d+e+f+g+h");
        }

        let expr = parse_source("a*b*c*d*e").unwrap();
        assert_eq!(expr.height(), 4);
        assert_eq!(canonicalize(&expr, CanonicalOrder::Lexical).height(), 3);
    }

    #[test]
    fn one_or_two_forms() {
        for input in ["a", "x*y-z/w", "f(b+a)*c-1", "2*x+y*z*w-(a+b)/c"] {
            let Ok(expr) = parse_source(input) else { continue };
            let forms = canonical_forms(&expr);
            assert!((1..=2).contains(&forms.len()), "{}: {:?}", input, forms);
        }
    }
}
