use super::{iter::ExprIter, op::{BinOp, Precedence, UnaryOp}};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An expression tree.
///
/// Every node owns its children, so rewriting one tree never affects another.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A number or a variable name, kept exactly as written.
    Literal(String),

    /// A unary operation.
    Unary(UnaryOp, Box<Expr>),

    /// A call to a function with a single argument, such as `sin(x)`.
    Call(String, Box<Expr>),

    /// A binary operation.
    Binary(BinOp, Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Creates a literal with the given text.
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    /// Creates a numeric literal with the given value.
    pub fn number(value: f64) -> Self {
        Self::Literal(format_number(value))
    }

    /// Creates the negation of the given expression.
    pub fn neg(operand: Expr) -> Self {
        Self::Unary(UnaryOp::Neg, Box::new(operand))
    }

    /// Creates the reciprocal of the given expression.
    pub fn recip(operand: Expr) -> Self {
        Self::Unary(UnaryOp::Recip, Box::new(operand))
    }

    /// Creates a binary operation.
    pub fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Self {
        Self::Binary(op, Box::new(lhs), Box::new(rhs))
    }

    /// Creates a function call.
    pub fn call(name: impl Into<String>, arg: Expr) -> Self {
        Self::Call(name.into(), Box::new(arg))
    }

    /// Returns the value of this expression if it is a numeric literal, or the negation of one.
    ///
    /// Only literals that start with a digit (after an optional `-`) count, so names like `inf`
    /// or `nan` stay variables.
    pub fn as_number(&self) -> Option<f64> {
        let text = match self {
            Expr::Literal(text) => text,
            Expr::Unary(UnaryOp::Neg, operand) if matches!(**operand, Expr::Literal(_)) => {
                return operand.as_number().map(|value| -value);
            },
            _ => return None,
        };
        let unsigned = text.strip_prefix('-').unwrap_or(text);
        if !unsigned.starts_with(|c: char| c.is_ascii_digit()) {
            return None;
        }
        text.parse::<f64>().ok().filter(|value| value.is_finite())
    }

    /// Returns true if this expression is a numeric literal, or the negation of one.
    pub fn is_number(&self) -> bool {
        self.as_number().is_some()
    }

    /// Returns true if this expression is a numeric literal equal to zero.
    pub fn is_zero(&self) -> bool {
        self.as_number() == Some(0.0)
    }

    /// Returns true if this expression is a numeric literal equal to one.
    pub fn is_one(&self) -> bool {
        self.as_number() == Some(1.0)
    }

    /// Returns true if this expression is a literal with exactly the given text.
    pub fn is_literal(&self, text: &str) -> bool {
        matches!(self, Expr::Literal(literal) if literal == text)
    }

    /// Returns the precedence of this expression.
    pub fn precedence(&self) -> Precedence {
        match self {
            Expr::Literal(text) if text.starts_with('-') => Precedence::Neg,
            Expr::Literal(_) | Expr::Call(..) => Precedence::Primary,
            Expr::Unary(op, _) => op.precedence(),
            Expr::Binary(op, ..) => op.precedence(),
        }
    }

    /// The length of the longest path from this node to a leaf. A leaf has height 0.
    pub fn height(&self) -> usize {
        match self {
            Expr::Literal(_) => 0,
            Expr::Unary(_, operand) | Expr::Call(_, operand) => 1 + operand.height(),
            Expr::Binary(_, lhs, rhs) => 1 + lhs.height().max(rhs.height()),
        }
    }

    /// The number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        self.post_order_iter().count()
    }

    /// The largest number of nodes found on a single level of the tree.
    pub fn max_width(&self) -> usize {
        let mut level = vec![self];
        let mut width = 0;
        while !level.is_empty() {
            width = width.max(level.len());
            level = level
                .into_iter()
                .flat_map(|expr| expr.children())
                .collect();
        }
        width
    }

    /// The direct children of this node, from left to right.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Expr::Literal(_) => Vec::new(),
            Expr::Unary(_, operand) | Expr::Call(_, operand) => vec![&**operand],
            Expr::Binary(_, lhs, rhs) => vec![&**lhs, &**rhs],
        }
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter<'_> {
        ExprIter::new(self)
    }
}

/// Formats a number the way numeric literals are written: whole numbers without a fractional
/// part, and no negative zero.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
