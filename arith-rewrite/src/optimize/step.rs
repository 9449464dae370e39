#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Possible optimization steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Step {
    /// `0+a = a`
    /// `a+0 = a`
    AddZero,

    /// `a-0 = a`
    SubtractZero,

    /// `0*a = 0`
    /// `a*0 = 0`
    MultiplyZero,

    /// `1*a = a`
    /// `a*1 = a`
    MultiplyOne,

    /// `a/1 = a`
    DivideOne,

    /// `0/a = 0`
    DivideZero,

    /// `2*3 = 6`
    FoldConstant,

    /// `1+a-3+b = a+b-2`
    CombineConstants,

    /// `-(-a) = a`
    DoubleNegation,
}
