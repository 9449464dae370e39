//! Expansion of brackets by the distributive law.

use arith_parser::ast::{BinOp, Expr, UnaryOp};
use crate::terms::{build_sum, is_sum, signed_terms, Term};
use log::{debug, trace, warn};

/// The maximum number of passes over the tree.
pub const MAX_PASSES: usize = 100;

/// Distributes the operation at the root of the expression over the sums it is applied to, if
/// there are any. The children of the expression are expected to be expanded already.
///
/// - `(a+b)*(c-d) = a*c-a*d+b*c-b*d`
/// - `(a+b)/c = a/c+b/c`
/// - `a-(b-c) = a-b+c`
fn distribute(expr: &Expr) -> Option<Expr> {
    let Expr::Binary(op, lhs, rhs) = expr else {
        return None;
    };

    let terms = match op {
        BinOp::Mul if is_sum(lhs) || is_sum(rhs) => {
            let rhs_terms = signed_terms(rhs);
            signed_terms(lhs)
                .into_iter()
                .flat_map(|left| {
                    rhs_terms.iter().map(move |right| Term {
                        negative: left.negative != right.negative,
                        expr: Expr::binary(BinOp::Mul, left.expr.clone(), right.expr.clone()),
                    })
                })
                .collect::<Vec<_>>()
        },
        BinOp::Div if is_sum(lhs) => signed_terms(lhs)
            .into_iter()
            .map(|term| Term {
                negative: term.negative,
                expr: Expr::binary(BinOp::Div, term.expr, (**rhs).clone()),
            })
            .collect(),
        BinOp::Sub if is_sum(rhs) => signed_terms(expr),
        BinOp::Add if matches!(&**rhs, Expr::Unary(UnaryOp::Neg, inner) if is_sum(inner)) => signed_terms(expr),
        _ => return None,
    };

    let mut terms = terms.into_iter();
    let first = terms.next().map(|term| {
        if term.negative {
            negate_leading_factor(term.expr)
        } else {
            term.expr
        }
    });
    Some(build_sum(first.into_iter().chain(terms.map(Term::into_expr))))
}

/// Negates a product by negating its leftmost factor, so that `-(a*c)` reads `-a*c`.
fn negate_leading_factor(expr: Expr) -> Expr {
    match expr {
        Expr::Binary(op @ (BinOp::Mul | BinOp::Div), lhs, rhs) => {
            Expr::Binary(op, Box::new(negate_leading_factor(*lhs)), rhs)
        },
        Expr::Unary(UnaryOp::Neg, operand) => *operand,
        factor => Expr::neg(factor),
    }
}

/// Expands the children of the expression, then the expression itself.
fn expand_node(expr: &Expr) -> Expr {
    let expr = match expr {
        Expr::Literal(_) => return expr.clone(),
        Expr::Unary(op, operand) => Expr::Unary(*op, Box::new(expand_node(operand))),
        Expr::Call(name, arg) => Expr::call(name.clone(), expand_node(arg)),
        Expr::Binary(op, lhs, rhs) => Expr::binary(*op, expand_node(lhs), expand_node(rhs)),
    };
    distribute(&expr).unwrap_or(expr)
}

/// Removes every bracket around a sum that is multiplied, divided or subtracted, by distributing
/// the operation over the terms of the sum.
///
/// Passes over the tree are repeated until one of them does not change the printed expression.
pub fn expand(expr: &Expr) -> Expr {
    let mut expr = expr.clone();
    let mut text = expr.to_string();
    for pass in 1..=MAX_PASSES {
        let next = expand_node(&expr);
        let next_text = next.to_string();
        if next_text == text {
            debug!("expansion settled after {} pass(es)", pass);
            return expr;
        }
        trace!("expanded {} into {}", text, next_text);
        expr = next;
        text = next_text;
    }

    warn!("expansion stopped after {} passes", MAX_PASSES);
    expr
}

#[cfg(test)]
mod tests {
    use arith_parser::parse_source;
    use pretty_assertions::assert_eq;
    use super::*;

    fn expanded(input: &str) -> String {
        expand(&parse_source(input).unwrap()).to_string()
    }

    #[test]
    fn multiply_sums() {
        assert_eq!(expanded("(a+b)*(c-d)"), "a*c-a*d+b*c-b*d");
        assert_eq!(expanded("x*(y+z)"), "x*y+x*z");
    }

    #[test]
    fn divide_sum() {
        assert_eq!(expanded("(a+b)/c"), "a/c+b/c");
        assert_eq!(expanded("c/(a+b)"), "c/(a+b)");
    }

    #[test]
    fn subtract_sum() {
        assert_eq!(expanded("a-(b-c)"), "a-b+c");
        assert_eq!(expanded("a-(b+c)*d"), "a-b*d-c*d");
    }

    #[test]
    fn negated_sum() {
        assert_eq!(expanded("-(a+b)*c"), "-a*c-b*c");
        assert_eq!(expanded("-(a+b)/c*d"), "-a/c*d-b/c*d");
        assert_eq!(expanded("(-a-b)*(-c)"), "a*c+b*c");
        assert_eq!(expanded("-(a-b)*(c*d)"), "-a*c*d+b*c*d");
    }

    #[test]
    fn nested_and_function_arguments() {
        assert_eq!(expanded("2*(x+f(y*(1+z)))"), "2*x+2*f(y*1+y*z)");
        assert_eq!(expanded("(a+b)*(c+d)*e"), "a*c*e+a*d*e+b*c*e+b*d*e");
    }

    #[test]
    fn nothing_to_expand() {
        assert_eq!(expanded("a*b+c"), "a*b+c");
        assert_eq!(expanded("f(a)/g(b)"), "f(a)/g(b)");
    }
}
