use arith_attrs::ErrorKind;

/// A chain of operations was too long to enumerate its groupings.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("a chain of {} operands is too long to enumerate", len),
    help = format!("at most {} operands can be regrouped", limit),
)]
pub struct ChainTooLong {
    /// The number of operands in the chain.
    pub len: usize,

    /// The maximum number of operands.
    pub limit: usize,
}

/// Enumerating the equivalent forms of an expression produced too many intermediate variants.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the expression has more than {} equivalent forms", limit),
    help = "try a shorter expression",
)]
pub struct TooManyVariants {
    /// The maximum number of variants.
    pub limit: usize,
}
