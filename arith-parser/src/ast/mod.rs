//! The expression tree shared by the parser and every rewriting engine.

pub mod balance;
pub mod dump;
pub mod expr;
pub mod fmt;
pub mod iter;
pub mod op;

pub use balance::balance;
pub use dump::TreeDump;
pub use expr::{format_number, Expr};
pub use fmt::{Grouped, Grouping};
pub use op::{BinOp, Precedence, UnaryOp};
