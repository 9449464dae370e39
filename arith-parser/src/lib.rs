//! Front end for arithmetic expressions over numbers, variables and one-argument functions.
//!
//! Text goes through three stages:
//!
//! 1. [`tokenize`] splits it into [`Token`]s. Characters that do not belong anywhere become
//!    error tokens instead of stopping the tokenizer.
//! 2. [`validate`] checks the tokens against the [grammar table](grammar), collecting every
//!    problem it finds.
//! 3. [`parse`] builds an [`Expr`] tree from valid tokens.
//!
//! ```
//! use arith_parser::{parse, tokenize, validate};
//!
//! let mut tokens = tokenize("a+b+c+d").unwrap();
//! assert!(validate(&mut tokens).is_valid());
//!
//! let expr = parse(&tokens).unwrap();
//! assert_eq!(expr.grouped().to_string(), "(a+b)+(c+d)");
//! ```

pub mod ast;
pub mod error;
pub mod grammar;
pub mod parser;
pub mod tokenizer;
pub mod validator;

pub use ast::Expr;
pub use error::Error;
pub use parser::{parse, parse_chain, Limits, Parser, Shape};
pub use tokenizer::{tokenize, Token, TokenKind};
pub use validator::{validate, Validation};

/// Tokenizes, validates and parses the source into a tree of the given shape, returning every
/// error found by the first stage that fails.
pub fn parse_source_with(source: &str, shape: Shape, limits: Limits) -> Result<Expr, Vec<Error>> {
    let mut tokens = tokenize(source).map_err(|err| vec![err])?;
    let validation = validate(&mut tokens);
    if !validation.is_valid() {
        return Err(validation.errors);
    }

    Parser::new(&tokens)
        .with_shape(shape)
        .with_limits(limits)
        .parse_full()
        .map_err(|err| vec![err])
}

/// Tokenizes, validates and parses the source into a balanced tree.
pub fn parse_source(source: &str) -> Result<Expr, Vec<Error>> {
    parse_source_with(source, Shape::Balanced, Limits::default())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn full_pipeline() {
        let expr = parse_source("a*(b+c)-2").unwrap();
        assert_eq!(expr.to_string(), "a*(b+c)-2");
    }

    #[test]
    fn reports_all_validation_errors() {
        let errors = parse_source("5+3))").unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn reports_lexical_errors() {
        let errors = parse_source("").unwrap_err();
        assert!(errors[0].kind_is::<error::kind::EmptyInput>());
    }

    #[test]
    fn printed_tree_parses_back() {
        for input in ["a-(b-c)", "a/(b*c)", "-(-a)+b", "f(x*y)/2-z", "a*(-b)+c"] {
            let expr = parse_source_with(input, Shape::Chain, Limits::default()).unwrap();
            let reparsed = parse_source_with(&expr.to_string(), Shape::Chain, Limits::default()).unwrap();
            assert_eq!(reparsed, expr, "{}", input);
        }
    }
}
