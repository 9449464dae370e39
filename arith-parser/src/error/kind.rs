use ariadne::Fmt;
use arith_attrs::ErrorKind;
use arith_error::EXPR;
use crate::tokenizer::TokenKind;

/// The input contained no characters, or only blank ones.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "empty input",
    labels = ["there is nothing to analyze here"],
    help = format!("try an expression such as {}", "a+b*c".fg(EXPR)),
)]
pub struct EmptyInput;

/// A token was found in a place where the grammar does not allow it.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("{:?} is unexpected", found),
    labels = ["this token cannot appear here"],
)]
pub struct UnexpectedToken {
    /// The token that was found.
    pub found: TokenKind,
}

/// A different token was required to complete a construct.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("{:?} is unexpected", found),
    labels = [format!("expected {}", format!("{:?}", expected).fg(EXPR))],
)]
pub struct ExpectedToken {
    /// The token that was required.
    pub expected: TokenKind,

    /// The token that was found.
    pub found: TokenKind,
}

/// The literal `0` was used as a divisor.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "divide by zero",
    labels = ["this divisor is zero"],
)]
pub struct DivideByLiteralZero;

/// The expression ended with a token that cannot end an expression.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot finish with {:?}", found),
    labels = [format!("you might need to add another {} here", "operand".fg(EXPR))],
)]
pub struct CannotFinishWith {
    /// The kind of the last token.
    pub found: TokenKind,
}

/// Some brackets were opened but never closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed brackets",
    labels = [format!("expected {} more `)` by here", count)],
)]
pub struct UnclosedBrackets {
    /// How many brackets are still open.
    pub count: usize,
}

/// There was nothing to build a tree from.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "empty expression",
    labels = ["expected an expression here"],
)]
pub struct EmptyExpression;

/// The expression is a single operand, without any operator to build a tree from.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "the expression is a single operand",
    labels = ["there is no operator in this expression"],
    help = format!("combine it with another operand, as in {}", "a+b".fg(EXPR)),
)]
pub struct DegenerateExpression;

/// The function call has no argument.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing function argument",
    labels = ["add an expression inside these brackets"],
)]
pub struct EmptyArgument;

/// Brackets or unary operators were nested deeper than the parser allows.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expression is nested too deeply",
    labels = [format!("this goes past {} levels of nesting", limit)],
)]
pub struct NestingTooDeep {
    /// The maximum nesting depth.
    pub limit: usize,
}

/// The tokens ran out in the middle of an expression.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of expression",
    labels = [format!("you might need to add another {} here", "expression".fg(EXPR))],
)]
pub struct UnexpectedEnd;
