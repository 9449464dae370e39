use logos::Logos;
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The runs of characters recognized by the scanner. These are assembled into [`Token`]s by the
/// tokenizer, which decides how neighboring runs combine.
#[derive(Logos, Clone, Copy, Debug, PartialEq)]
pub enum RawKind {
    #[regex(r"[0-9]+")]
    Digits,

    #[regex(r"[a-zA-Z]+")]
    Letters,

    #[token(".")]
    Dot,

    #[token("+")]
    Add,

    #[token("-")]
    Sub,

    #[token("*")]
    Mul,

    #[token("/")]
    Div,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[regex(r".", priority = 0)]
    Symbol,
}

/// The different kinds of tokens that can be produced by the tokenizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TokenKind {
    Integer,
    Decimal,
    Identifier,
    FunctionName,
    Add,
    Sub,
    Mul,
    Div,
    OpenParen,
    CloseParen,
    FuncOpenParen,
    FuncCloseParen,
    Error,
}

impl TokenKind {
    /// Returns true if the token is one of the four arithmetic operators.
    pub fn is_operator(self) -> bool {
        matches!(self, TokenKind::Add | TokenKind::Sub | TokenKind::Mul | TokenKind::Div)
    }

    /// Returns true if the token opens a bracket.
    pub fn is_opening(self) -> bool {
        matches!(self, TokenKind::OpenParen | TokenKind::FuncOpenParen)
    }

    /// Returns true if the token closes a bracket.
    pub fn is_closing(self) -> bool {
        matches!(self, TokenKind::CloseParen | TokenKind::FuncCloseParen)
    }
}

/// A token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Token<'source> {
    /// The region of the source code that this token originated from, in bytes.
    pub span: Range<usize>,

    /// The same region, in characters.
    pub chars: Range<usize>,

    /// The kind of token.
    pub kind: TokenKind,

    /// The raw lexeme that was parsed into this token.
    pub lexeme: &'source str,
}

impl Token<'_> {
    /// The index of the first character of the token.
    pub fn start_pos(&self) -> usize {
        self.chars.start
    }

    /// The index of the last character of the token (inclusive).
    pub fn end_pos(&self) -> usize {
        self.chars.end.saturating_sub(1).max(self.chars.start)
    }

    /// The span of the last character of the token, in bytes.
    pub fn last_char_span(&self) -> Range<usize> {
        let len = self.lexeme.chars().next_back().map_or(0, char::len_utf8);
        self.span.end - len..self.span.end
    }
}

/// Formats the token as `Kind('lexeme') [start; end]`.
impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}('{}') [{}; {}]", self.kind, self.lexeme, self.start_pos(), self.end_pos())
    }
}
