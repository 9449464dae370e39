//! Checks a token sequence against the [grammar table](crate::grammar), collecting every problem
//! instead of stopping at the first one.

use crate::{
    error::{kind, Error},
    grammar::{self, GrammarCategory},
    tokenizer::{Token, TokenKind},
};
use log::debug;

/// The outcome of validating a token sequence.
#[derive(Debug, Default)]
pub struct Validation {
    /// The problems found, in the order they were found.
    pub errors: Vec<Error>,
}

impl Validation {
    /// Returns true if no problems were found.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validates the tokens in order.
///
/// A token that breaks the grammar is reported and retagged as [`TokenKind::Error`] in place, so
/// the tokens after it are checked against a neutral predecessor and a single mistake is not
/// reported more than once.
pub fn validate(tokens: &mut [Token]) -> Validation {
    let mut validation = Validation::default();
    let Some(last_index) = tokens.len().checked_sub(1) else {
        validation.errors.push(Error::new(vec![0..0], kind::EmptyInput));
        return validation;
    };

    let mut brackets = Vec::new();
    let mut previous = GrammarCategory::Start;
    for token in tokens.iter_mut() {
        check_token(token, previous, &mut brackets, &mut validation.errors);
        previous = GrammarCategory::from(token.kind);
    }

    let last = &tokens[last_index];
    let at_end = last.last_char_span();
    if !grammar::can_finish(GrammarCategory::from(last.kind)) {
        validation.errors.push(Error::new(vec![at_end.clone()], kind::CannotFinishWith { found: last.kind }));
    }
    if !brackets.is_empty() {
        validation.errors.push(Error::new(vec![at_end], kind::UnclosedBrackets { count: brackets.len() }));
    }

    debug!("validated {} token(s), {} error(s)", tokens.len(), validation.errors.len());
    validation
}

/// Checks a single token against its predecessor and the stack of open brackets.
fn check_token(
    token: &mut Token,
    previous: GrammarCategory,
    brackets: &mut Vec<GrammarCategory>,
    errors: &mut Vec<Error>,
) {
    let category = GrammarCategory::from(token.kind);
    let balanced = match category {
        GrammarCategory::OpenBracket | GrammarCategory::FunctionOpenBracket => {
            brackets.push(category);
            true
        },
        GrammarCategory::CloseBracket => brackets.pop() == Some(GrammarCategory::OpenBracket),
        GrammarCategory::FunctionCloseBracket => brackets.pop() == Some(GrammarCategory::FunctionOpenBracket),
        _ => true,
    };
    if !balanced {
        reject(token, errors);
        return;
    }

    if token.kind == TokenKind::Integer
        && token.lexeme == "0"
        && previous == GrammarCategory::OperationDiv
    {
        errors.push(Error::new(vec![token.span.clone()], kind::DivideByLiteralZero));
    }

    if !grammar::allows(previous, category) {
        reject(token, errors);
    }
}

/// Reports the token as unexpected, and retags it as an error token.
fn reject(token: &mut Token, errors: &mut Vec<Error>) {
    errors.push(Error::new(vec![token.span.clone()], kind::UnexpectedToken { found: token.kind }));
    token.kind = TokenKind::Error;
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::tokenizer::tokenize;
    use super::*;

    /// Validates the input, returning the message and span of each error.
    fn errors_of(input: &str) -> Vec<(String, std::ops::Range<usize>)> {
        let mut tokens = tokenize(input).unwrap();
        validate(&mut tokens)
            .errors
            .into_iter()
            .map(|err| (err.message(), err.span().unwrap()))
            .collect()
    }

    #[test]
    fn valid_expressions() {
        for input in [
            "a+b*c",
            "-a+(b-c)/d",
            "round(12.41-(f(22*2)-21))",
            "((a))",
            "+5",
            "pi()+e",
            "a/(0+1)",
            "x/0.0",
        ] {
            assert_eq!(errors_of(input), vec![], "{}", input);
        }
    }

    #[test]
    fn leading_close_bracket() {
        assert_eq!(
            errors_of(")+5*3"),
            vec![("CloseParen is unexpected".to_string(), 0..1)],
        );
    }

    #[test]
    fn operator_after_operator() {
        assert_eq!(
            errors_of("a+*b"),
            vec![("Mul is unexpected".to_string(), 2..3)],
        );
    }

    #[test]
    fn divide_by_literal_zero() {
        assert_eq!(
            errors_of("a/0"),
            vec![("divide by zero".to_string(), 2..3)],
        );
    }

    #[test]
    fn cannot_finish_with_operator() {
        assert_eq!(
            errors_of("a+b*"),
            vec![("cannot finish with Mul".to_string(), 3..4)],
        );
    }

    #[test]
    fn unclosed_brackets() {
        assert_eq!(
            errors_of("((5+3)"),
            vec![("unclosed brackets".to_string(), 5..6)],
        );
    }

    #[test]
    fn extra_close_brackets() {
        assert_eq!(
            errors_of("5+3))"),
            vec![
                ("CloseParen is unexpected".to_string(), 3..4),
                ("CloseParen is unexpected".to_string(), 4..5),
            ],
        );
    }

    #[test]
    fn lexical_errors_are_neutral() {
        // the bad character is reported once, by its own token
        assert_eq!(
            errors_of("a$b"),
            vec![("Error is unexpected".to_string(), 1..2)],
        )
    }

    #[test]
    fn retagged_tokens() {
        let mut tokens = tokenize("a+*b").unwrap();
        validate(&mut tokens);
        let kinds = tokens.iter().map(|token| token.kind).collect::<Vec<_>>();
        assert_eq!(kinds, vec![TokenKind::Identifier, TokenKind::Add, TokenKind::Error, TokenKind::Identifier]);
    }

    #[test]
    fn no_tokens() {
        let validation = validate(&mut []);
        assert!(!validation.is_valid());
        assert!(validation.errors[0].kind_is::<kind::EmptyInput>());
    }
}
