//! Printing expressions back to text.

use std::fmt::{Display, Formatter, Result};
use super::{expr::Expr, op::{BinOp, Precedence, UnaryOp}};

/// How the printer decides where brackets go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    /// Only where precedence requires them, e.g. `a+b+c`.
    Minimal,

    /// Also around every operand with the same precedence as its parent, so the grouping of a
    /// chain of operations stays visible, e.g. `(a+b)+c`.
    Explicit,
}

/// A wrapper type that implements [`Display`] for an [`Expr`] with [`Grouping::Explicit`].
///
/// This is created by [`Expr::grouped`].
pub struct Grouped<'a>(&'a Expr);

impl Display for Grouped<'_> {
    fn fmt(&self, f: &mut Formatter) -> Result {
        fmt_expr(f, self.0, Grouping::Explicit)
    }
}

impl Expr {
    /// Wraps the expression in a [`Grouped`], which prints every bracket that makes the grouping
    /// of its operations explicit.
    pub fn grouped(&self) -> Grouped<'_> {
        Grouped(self)
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter) -> Result {
        fmt_expr(f, self, Grouping::Minimal)
    }
}

/// Which side of its parent an operand is on.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Side {
    Left,
    Right,
}

fn fmt_expr(f: &mut Formatter, expr: &Expr, grouping: Grouping) -> Result {
    match expr {
        Expr::Literal(text) => f.write_str(text),
        Expr::Call(name, arg) => {
            write!(f, "{}(", name)?;
            fmt_expr(f, arg, grouping)?;
            f.write_str(")")
        },
        Expr::Unary(UnaryOp::Neg, operand) => {
            f.write_str("-")?;
            fmt_operand(f, operand, Precedence::Neg, None, Side::Right, grouping)
        },
        Expr::Unary(UnaryOp::Recip, operand) => {
            f.write_str("1/")?;
            fmt_operand(f, operand, Precedence::Factor, Some(BinOp::Div), Side::Right, grouping)
        },
        Expr::Binary(op, lhs, rhs) => {
            let (op, rhs) = displayed_rhs(*op, rhs);
            fmt_operand(f, lhs, op.precedence(), Some(op), Side::Left, grouping)?;
            write!(f, "{}", op)?;
            fmt_operand(f, rhs, op.precedence(), Some(op), Side::Right, grouping)
        },
    }
}

/// Adding a negation prints as a subtraction, and multiplying by a reciprocal prints as a
/// division.
fn displayed_rhs(op: BinOp, rhs: &Expr) -> (BinOp, &Expr) {
    match (op, rhs) {
        (BinOp::Add, Expr::Unary(UnaryOp::Neg, inner)) => (BinOp::Sub, &**inner),
        (BinOp::Mul, Expr::Unary(UnaryOp::Recip, inner)) => (BinOp::Div, &**inner),
        _ => (op, rhs),
    }
}

/// Prints an operand of an operation with the given precedence, wrapping it in brackets if
/// needed.
fn fmt_operand(
    f: &mut Formatter,
    operand: &Expr,
    parent: Precedence,
    op: Option<BinOp>,
    side: Side,
    grouping: Grouping,
) -> Result {
    if needs_brackets(operand, parent, op, side, grouping) {
        f.write_str("(")?;
        fmt_expr(f, operand, grouping)?;
        f.write_str(")")
    } else {
        fmt_expr(f, operand, grouping)
    }
}

fn needs_brackets(
    operand: &Expr,
    parent: Precedence,
    op: Option<BinOp>,
    side: Side,
    grouping: Grouping,
) -> bool {
    // `a--b` and `a*-b` do not parse
    if side == Side::Right && starts_with_minus(operand, grouping) {
        return true;
    }

    let precedence = operand.precedence();
    match grouping {
        Grouping::Minimal => {
            precedence < parent
                || (precedence == parent
                    && side == Side::Right
                    && op.map_or(false, |op| !op.is_commutative()))
        },
        Grouping::Explicit => precedence <= parent,
    }
}

/// Returns true if the printed expression begins with a `-`.
fn starts_with_minus(expr: &Expr, grouping: Grouping) -> bool {
    match expr {
        Expr::Literal(text) => text.starts_with('-'),
        Expr::Unary(UnaryOp::Neg, _) => true,
        Expr::Binary(op, lhs, rhs) => {
            let (op, _) = displayed_rhs(*op, rhs);
            !needs_brackets(lhs, op.precedence(), Some(op), Side::Left, grouping)
                && starts_with_minus(lhs, grouping)
        },
        Expr::Unary(UnaryOp::Recip, _) | Expr::Call(..) => false,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn var(name: &str) -> Expr {
        Expr::literal(name)
    }

    fn bin(op: BinOp, lhs: Expr, rhs: Expr) -> Expr {
        Expr::binary(op, lhs, rhs)
    }

    #[test]
    fn minimal_chains() {
        let left = bin(BinOp::Add, bin(BinOp::Add, var("a"), var("b")), var("c"));
        let right = bin(BinOp::Add, var("a"), bin(BinOp::Add, var("b"), var("c")));
        assert_eq!(left.to_string(), "a+b+c");
        assert_eq!(right.to_string(), "a+b+c");
        assert_eq!(left.grouped().to_string(), "(a+b)+c");
        assert_eq!(right.grouped().to_string(), "a+(b+c)");
    }

    #[test]
    fn non_commutative_right_operand() {
        let sub = bin(BinOp::Sub, var("a"), bin(BinOp::Sub, var("b"), var("c")));
        let div = bin(BinOp::Div, var("a"), bin(BinOp::Mul, var("b"), var("c")));
        assert_eq!(sub.to_string(), "a-(b-c)");
        assert_eq!(div.to_string(), "a/(b*c)");
    }

    #[test]
    fn precedence_brackets() {
        let expr = bin(BinOp::Mul, var("a"), bin(BinOp::Add, var("b"), var("c")));
        assert_eq!(expr.to_string(), "a*(b+c)");
        assert_eq!(expr.grouped().to_string(), "a*(b+c)");

        let expr = bin(BinOp::Add, bin(BinOp::Mul, var("a"), var("b")), bin(BinOp::Mul, var("a"), var("c")));
        assert_eq!(expr.to_string(), "a*b+a*c");
        assert_eq!(expr.grouped().to_string(), "a*b+a*c");
    }

    #[test]
    fn negation_and_reciprocal() {
        let expr = bin(BinOp::Add, var("a"), Expr::neg(var("b")));
        assert_eq!(expr.to_string(), "a-b");

        let expr = bin(BinOp::Mul, var("a"), Expr::recip(var("b")));
        assert_eq!(expr.to_string(), "a/b");

        let expr = bin(BinOp::Add, Expr::neg(var("a")), var("b"));
        assert_eq!(expr.to_string(), "-a+b");

        let expr = Expr::neg(bin(BinOp::Add, var("a"), var("b")));
        assert_eq!(expr.to_string(), "-(a+b)");

        let expr = bin(BinOp::Mul, var("a"), Expr::neg(var("b")));
        assert_eq!(expr.to_string(), "a*(-b)");

        let expr = bin(BinOp::Add, var("a"), var("-3"));
        assert_eq!(expr.to_string(), "a+(-3)");

        assert_eq!(Expr::recip(bin(BinOp::Mul, var("a"), var("b"))).to_string(), "1/(a*b)");
        assert_eq!(Expr::neg(Expr::neg(var("a"))).to_string(), "-(-a)");

        let expr = bin(BinOp::Add, var("a"), bin(BinOp::Add, Expr::neg(var("b")), var("c")));
        assert_eq!(expr.to_string(), "a+(-b+c)");

        let expr = bin(BinOp::Add, var("a"), bin(BinOp::Mul, bin(BinOp::Add, Expr::neg(var("b")), var("c")), var("d")));
        assert_eq!(expr.to_string(), "a+(-b+c)*d");
    }

    #[test]
    fn function_calls() {
        let expr = bin(
            BinOp::Mul,
            Expr::call("sin", bin(BinOp::Add, var("x"), var("1"))),
            var("2"),
        );
        assert_eq!(expr.to_string(), "sin(x+1)*2");
    }
}
