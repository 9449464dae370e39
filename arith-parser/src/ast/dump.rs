use std::fmt::{Display, Formatter, Result};
use super::{expr::Expr, op::UnaryOp};

/// A wrapper type that implements [`Display`] by printing the tree of an [`Expr`] one node per
/// line, indented by depth.
///
/// ```text
/// Root: Operation +
///   Left: Operand a
///   Right: Operand b
/// ```
pub struct TreeDump<'a>(pub &'a Expr);

impl Display for TreeDump<'_> {
    fn fmt(&self, f: &mut Formatter) -> Result {
        dump(f, self.0, "Root", 0)
    }
}

fn dump(f: &mut Formatter, expr: &Expr, role: &str, depth: usize) -> Result {
    write!(f, "{:indent$}{}: ", "", role, indent = depth * 2)?;
    match expr {
        Expr::Literal(text) => writeln!(f, "Operand {}", text),
        Expr::Unary(op, operand) => {
            let name = match op {
                UnaryOp::Neg => "Negation",
                UnaryOp::Recip => "Reciprocal",
            };
            writeln!(f, "{}", name)?;
            dump(f, operand, "Operand", depth + 1)
        },
        Expr::Call(name, arg) => {
            writeln!(f, "Function {}", name)?;
            dump(f, arg, "Argument", depth + 1)
        },
        Expr::Binary(op, lhs, rhs) => {
            writeln!(f, "Operation {}", op)?;
            dump(f, lhs, "Left", depth + 1)?;
            dump(f, rhs, "Right", depth + 1)
        },
    }
}
