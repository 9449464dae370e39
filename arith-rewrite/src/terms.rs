//! Helpers to take chains of operations apart and put them back together.

use arith_parser::ast::{BinOp, Expr, UnaryOp};

/// A term of a chain of additions and subtractions, with its sign.
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    /// Whether the term is subtracted.
    pub negative: bool,

    /// The term, without its sign.
    pub expr: Expr,
}

impl Term {
    /// Converts the term back into an expression, negating it if needed.
    pub fn into_expr(self) -> Expr {
        if self.negative {
            Expr::neg(self.expr)
        } else {
            self.expr
        }
    }
}

/// Returns true if the expression is a chain of additions and subtractions, possibly negated.
pub fn is_sum(expr: &Expr) -> bool {
    match expr {
        Expr::Binary(BinOp::Add | BinOp::Sub, ..) => true,
        Expr::Unary(UnaryOp::Neg, operand) => is_sum(operand),
        _ => false,
    }
}

/// Flattens the chain of additions and subtractions rooted at `expr` into its terms, from left to
/// right. Negations anywhere along the chain are folded into the signs of the terms.
///
/// `a-(b-c)` gives `+a`, `-b`, `+c`.
pub fn signed_terms(expr: &Expr) -> Vec<Term> {
    fn helper(expr: &Expr, negative: bool, terms: &mut Vec<Term>) {
        match expr {
            Expr::Binary(BinOp::Add, lhs, rhs) => {
                helper(lhs, negative, terms);
                helper(rhs, negative, terms);
            },
            Expr::Binary(BinOp::Sub, lhs, rhs) => {
                helper(lhs, negative, terms);
                helper(rhs, !negative, terms);
            },
            Expr::Unary(UnaryOp::Neg, operand) => helper(operand, !negative, terms),
            _ => terms.push(Term { negative, expr: expr.clone() }),
        }
    }

    let mut terms = Vec::new();
    helper(expr, false, &mut terms);
    terms
}

/// Flattens the chain of additions and subtractions rooted at `expr` into its terms, from left to
/// right. Subtracted terms are wrapped in a negation, and negations already in the tree are kept
/// as part of their term.
///
/// `a-(b+c)+(-d)` gives `a`, `-b`, `-c`, `-d`.
pub fn chain_terms(expr: &Expr) -> Vec<Expr> {
    fn helper(expr: &Expr, negative: bool, terms: &mut Vec<Expr>) {
        match expr {
            Expr::Binary(BinOp::Add, lhs, rhs) => {
                helper(lhs, negative, terms);
                helper(rhs, negative, terms);
            },
            Expr::Binary(BinOp::Sub, lhs, rhs) => {
                helper(lhs, negative, terms);
                helper(rhs, !negative, terms);
            },
            _ if negative => terms.push(Expr::neg(expr.clone())),
            _ => terms.push(expr.clone()),
        }
    }

    let mut terms = Vec::new();
    helper(expr, false, &mut terms);
    terms
}

/// Flattens the chain of multiplications and divisions rooted at `expr` into its factors, from
/// left to right. Divisors are wrapped in a reciprocal.
///
/// `a/(b*c)*d` gives `a`, `1/b`, `1/c`, `d`.
pub fn chain_factors(expr: &Expr) -> Vec<Expr> {
    fn helper(expr: &Expr, reciprocal: bool, factors: &mut Vec<Expr>) {
        match expr {
            Expr::Binary(BinOp::Mul, lhs, rhs) => {
                helper(lhs, reciprocal, factors);
                helper(rhs, reciprocal, factors);
            },
            Expr::Binary(BinOp::Div, lhs, rhs) => {
                helper(lhs, reciprocal, factors);
                helper(rhs, !reciprocal, factors);
            },
            _ if reciprocal => factors.push(Expr::recip(expr.clone())),
            _ => factors.push(expr.clone()),
        }
    }

    let mut factors = Vec::new();
    helper(expr, false, &mut factors);
    factors
}

/// Joins the terms into a chain nested from left to right. Negated terms after the first one are
/// subtracted. No terms gives `0`.
pub fn build_sum(terms: impl IntoIterator<Item = Expr>) -> Expr {
    let mut terms = terms.into_iter();
    let Some(first) = terms.next() else {
        return Expr::literal("0");
    };
    terms.fold(first, |sum, term| match term {
        Expr::Unary(UnaryOp::Neg, operand) => Expr::Binary(BinOp::Sub, Box::new(sum), operand),
        term => Expr::binary(BinOp::Add, sum, term),
    })
}

/// Joins the factors into a chain nested from left to right. Reciprocals after the first factor
/// become divisions. No factors gives `1`.
pub fn build_product(factors: impl IntoIterator<Item = Expr>) -> Expr {
    let mut factors = factors.into_iter();
    let Some(first) = factors.next() else {
        return Expr::literal("1");
    };
    factors.fold(first, |product, factor| match factor {
        Expr::Unary(UnaryOp::Recip, operand) => Expr::Binary(BinOp::Div, Box::new(product), operand),
        factor => Expr::binary(BinOp::Mul, product, factor),
    })
}
