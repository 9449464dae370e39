use super::expr::Expr;

/// An iterator that iteratively traverses the tree of expressions in left-to-right post-order
/// (i.e. depth-first).
///
/// This iterator is created by [`Expr::post_order_iter`].
pub struct ExprIter<'a> {
    stack: Vec<&'a Expr>,
    last_visited: Option<&'a Expr>,
}

impl<'a> ExprIter<'a> {
    /// Creates a new iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn new(expr: &'a Expr) -> Self {
        Self {
            stack: vec![expr],
            last_visited: None,
        }
    }

    /// Pops the current expression in the stack and marks it as the last visited expression.
    fn visit(&mut self) -> Option<&'a Expr> {
        self.last_visited = Some(self.stack.pop()?);
        self.last_visited
    }

    /// Returns true if the given expression matches the last visited expression.
    fn is_last_visited(&self, expr: &'a Expr) -> bool {
        self.last_visited.map_or(false, |last_visited| std::ptr::eq(last_visited, expr))
    }
}

impl<'a> Iterator for ExprIter<'a> {
    type Item = &'a Expr;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let expr = *self.stack.last()?;
            match expr {
                Expr::Literal(_) => return self.visit(),
                Expr::Unary(_, operand) | Expr::Call(_, operand) => {
                    if self.is_last_visited(operand) {
                        return self.visit();
                    }
                    self.stack.push(operand);
                },
                Expr::Binary(_, lhs, rhs) => {
                    if self.is_last_visited(rhs) {
                        return self.visit();
                    }
                    self.stack.push(rhs);
                    self.stack.push(lhs);
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::ast::op::BinOp;
    use super::*;

    #[test]
    fn post_order() {
        // f(a)-b*c
        let expr = Expr::binary(
            BinOp::Sub,
            Expr::call("f", Expr::literal("a")),
            Expr::binary(BinOp::Mul, Expr::literal("b"), Expr::literal("c")),
        );
        let visited = expr.post_order_iter()
            .map(|expr| match expr {
                Expr::Literal(text) => text.clone(),
                Expr::Call(name, _) => format!("{}()", name),
                Expr::Unary(..) => "neg".to_string(),
                Expr::Binary(op, ..) => op.to_string(),
            })
            .collect::<Vec<_>>();
        assert_eq!(visited, vec!["a", "f()", "b", "c", "*", "-"]);
    }
}
