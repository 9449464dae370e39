//! Rewriting engines for arithmetic expression trees built by [`arith_parser`].
//!
//! - [`optimize`] removes operations that do not change the value of the expression and computes
//!   the operations between numbers.
//! - [`equivalents`] lists the forms of the expression that are equal to it by regrouping and
//!   factoring.
//! - [`canonical_forms`] reorders the operands of sums and products into a canonical order.
//! - [`expand`] multiplies out brackets.
//!
//! Every engine takes the tree by reference and builds a new one.

pub mod associative;
pub mod commutative;
pub mod error;
pub mod expand;
pub mod optimize;
pub mod step_collector;
pub mod terms;

pub use associative::{equivalents, equivalents_with, parenthesizations, EnumerationLimits};
pub use commutative::{canonical_forms, canonicalize, CanonicalOrder};
pub use expand::expand;
pub use optimize::{optimize, optimize_with_steps, step::Step};
