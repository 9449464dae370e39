pub mod token;

use crate::error::{kind::EmptyInput, Error};
use log::trace;
use logos::Logos;
use std::ops::Range;
pub use token::{RawKind, Token, TokenKind};

/// The kind of bracket that is currently open.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Bracket {
    Plain,
    Function,
}

/// Folds the raw runs of the scanner into [`Token`]s.
#[derive(Debug)]
struct Assembler<'source> {
    source: &'source str,
    tokens: Vec<Token<'source>>,

    /// The operand token that is still being extended, if any.
    pending: Option<(TokenKind, Range<usize>)>,

    /// The kinds of the brackets opened so far and not yet closed.
    brackets: Vec<Bracket>,

    /// The number of characters covered by the tokens emitted so far.
    chars: usize,
}

impl<'source> Assembler<'source> {
    fn new(source: &'source str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            pending: None,
            brackets: Vec::new(),
            chars: 0,
        }
    }

    fn pending_kind(&self) -> Option<TokenKind> {
        self.pending.as_ref().map(|(kind, _)| *kind)
    }

    /// Emits a token. Tokens are emitted in order, each one starting where the previous ended.
    fn push(&mut self, kind: TokenKind, span: Range<usize>) {
        let lexeme = &self.source[span.clone()];
        let start = self.chars;
        self.chars += lexeme.chars().count();
        self.tokens.push(Token { span, chars: start..self.chars, kind, lexeme });
    }

    /// Emits the pending operand token, if there is one.
    fn flush(&mut self) {
        if let Some((kind, span)) = self.pending.take() {
            self.push(kind, span);
        }
    }

    /// Extends the pending operand token up to `end`, possibly changing its kind.
    fn extend(&mut self, kind: TokenKind, end: usize) {
        if let Some((pending_kind, span)) = &mut self.pending {
            *pending_kind = kind;
            span.end = end;
        }
    }

    /// Emits a one-character error token for the first character of `span`, then starts a new
    /// operand of the given kind from the rest of it.
    fn reject_first(&mut self, span: Range<usize>, rest: TokenKind) {
        self.flush();
        self.push(TokenKind::Error, span.start..span.start + 1);
        if span.start + 1 < span.end {
            self.pending = Some((rest, span.start + 1..span.end));
        }
    }

    /// Emits one error token for each character in `span`.
    fn reject_all(&mut self, span: Range<usize>) {
        self.flush();
        let start = span.start;
        for (offset, c) in self.source[span].char_indices() {
            let at = start + offset;
            self.push(TokenKind::Error, at..at + c.len_utf8());
        }
    }

    fn feed(&mut self, raw: RawKind, span: Range<usize>) {
        trace!("raw {:?} at {:?}", raw, span);
        match raw {
            RawKind::Digits => match self.pending_kind() {
                None => self.pending = Some((TokenKind::Integer, span)),
                Some(kind @ (TokenKind::Integer | TokenKind::Decimal)) => self.extend(kind, span.end),
                Some(_) => self.reject_first(span, TokenKind::Integer),
            },
            RawKind::Letters => match self.pending_kind() {
                None => self.pending = Some((TokenKind::Identifier, span)),
                Some(TokenKind::Identifier) => self.extend(TokenKind::Identifier, span.end),
                Some(_) => self.reject_first(span, TokenKind::Identifier),
            },
            RawKind::Dot => match self.pending_kind() {
                Some(TokenKind::Integer) => self.extend(TokenKind::Decimal, span.end),
                _ => self.reject_all(span),
            },
            RawKind::Add => self.operator(TokenKind::Add, span),
            RawKind::Sub => self.operator(TokenKind::Sub, span),
            RawKind::Mul => self.operator(TokenKind::Mul, span),
            RawKind::Div => self.operator(TokenKind::Div, span),
            RawKind::OpenParen => {
                if self.pending_kind() == Some(TokenKind::Identifier) {
                    self.extend(TokenKind::FunctionName, span.start);
                    self.flush();
                    self.brackets.push(Bracket::Function);
                    self.push(TokenKind::FuncOpenParen, span);
                } else {
                    self.flush();
                    self.brackets.push(Bracket::Plain);
                    self.push(TokenKind::OpenParen, span);
                }
            },
            RawKind::CloseParen => {
                self.flush();
                let kind = match self.brackets.pop() {
                    Some(Bracket::Function) => TokenKind::FuncCloseParen,
                    _ => TokenKind::CloseParen,
                };
                self.push(kind, span);
            },
            RawKind::Symbol => self.reject_all(span),
        }
    }

    fn operator(&mut self, kind: TokenKind, span: Range<usize>) {
        self.flush();
        self.push(kind, span);
    }

    fn finish(mut self) -> Vec<Token<'source>> {
        self.flush();
        self.tokens
    }
}

/// Splits the input into tokens.
///
/// Every character of the input ends up in exactly one token. Characters that cannot start or
/// continue a token are emitted as one-character [`TokenKind::Error`] tokens instead of aborting,
/// so that the validator can report all of them at once.
///
/// Returns an [`EmptyInput`] error if the input is empty or blank.
pub fn tokenize(input: &str) -> Result<Vec<Token<'_>>, Error> {
    if input.trim().is_empty() {
        return Err(Error::new(vec![0..input.len()], EmptyInput));
    }

    let mut assembler = Assembler::new(input);
    let mut lexer = RawKind::lexer(input);
    while let Some(raw) = lexer.next() {
        assembler.feed(raw.unwrap_or(RawKind::Symbol), lexer.span());
    }

    Ok(assembler.finish())
}
