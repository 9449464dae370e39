use std::collections::VecDeque;
use super::{expr::Expr, op::BinOp};

/// Combines the operands with the given operator into a tree of minimal height.
///
/// Neighboring operands are paired up from left to right, round after round, until a single tree
/// remains. An operand left without a partner is carried over to the next round as is. With `n`
/// operands the resulting tree has height `ceil(log2(n))`.
///
/// Returns [`None`] if there are no operands.
pub fn balance(op: BinOp, operands: impl IntoIterator<Item = Expr>) -> Option<Expr> {
    let mut queue = operands.into_iter().collect::<VecDeque<_>>();
    while queue.len() > 1 {
        let mut next = VecDeque::with_capacity(queue.len() / 2 + 1);
        while queue.len() >= 2 {
            if let (Some(lhs), Some(rhs)) = (queue.pop_front(), queue.pop_front()) {
                next.push_back(Expr::binary(op, lhs, rhs));
            }
        }
        next.extend(queue.pop_front());
        queue = next;
    }
    queue.pop_front()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn vars(count: usize) -> Vec<Expr> {
        (0..count)
            .map(|i| Expr::literal(((b'a' + i as u8) as char).to_string()))
            .collect()
    }

    #[test]
    fn logarithmic_height() {
        for (count, height) in [(1, 0), (2, 1), (3, 2), (4, 2), (5, 3), (8, 3), (9, 4), (16, 4)] {
            let tree = balance(BinOp::Add, vars(count)).unwrap();
            assert_eq!(tree.height(), height, "{} operands", count);
        }
    }

    #[test]
    fn leftover_operand_moves_up() {
        let tree = balance(BinOp::Mul, vars(5)).unwrap();
        assert_eq!(tree.grouped().to_string(), "((a*b)*(c*d))*e");
    }

    #[test]
    fn no_operands() {
        assert_eq!(balance(BinOp::Add, Vec::new()), None);
    }
}
