//! Builds [`Expr`] trees from validated tokens.

use arith_error::ErrorKind;
use crate::{
    ast::{balance, BinOp, Expr},
    error::{kind, Error},
    tokenizer::{Token, TokenKind},
};
use log::debug;
use std::ops::Range;

/// Limits applied while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// How deeply brackets, function calls and unary operators may nest, and the greatest height
    /// of the resulting tree. Each operand of a chain nested from left to right, such as
    /// `a*b*c`, adds one level.
    pub max_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self { max_depth: 256 }
    }
}

impl Limits {
    /// Sets the maximum nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// The shape of the trees built for chains of `+` and `-`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Subtractions become additions of negations, and the terms are combined into a tree of
    /// minimal height.
    Balanced,

    /// Operations are nested from left to right, as they are usually evaluated.
    Chain,
}

/// A parsed expression along with its height, so that the height of the tree can be bounded while
/// it is built.
#[derive(Debug)]
struct Subtree {
    expr: Expr,
    height: usize,
}

impl Subtree {
    fn leaf(expr: Expr) -> Self {
        Self { expr, height: 0 }
    }
}

/// A recursive descent parser over a slice of tokens.
#[derive(Debug, Clone)]
pub struct Parser<'a, 'source> {
    /// The tokens that this parser is currently parsing.
    tokens: &'a [Token<'source>],

    /// The index of the **next** token to be parsed.
    cursor: usize,

    /// How many brackets and unary operators enclose the current position.
    depth: usize,

    shape: Shape,
    limits: Limits,
}

impl<'a, 'source> Parser<'a, 'source> {
    /// Create a new parser for the given tokens, building balanced trees.
    pub fn new(tokens: &'a [Token<'source>]) -> Self {
        Self {
            tokens,
            cursor: 0,
            depth: 0,
            shape: Shape::Balanced,
            limits: Limits::default(),
        }
    }

    /// Sets the shape of the trees to build.
    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    /// Sets the limits to apply while parsing.
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the current token, or the end of the source code if the cursor is at
    /// the end of the stream.
    pub fn span(&self) -> Range<usize> {
        self.tokens
            .get(self.cursor)
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns the current token. The cursor is not moved. Returns [`None`] if the cursor is at
    /// the end of the stream.
    pub fn current_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor)
    }

    /// Returns the next token to be parsed, then advances the cursor.
    ///
    /// Returns an [`kind::UnexpectedEnd`] error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        let token = self.current_token()
            .cloned()
            .ok_or_else(|| self.error(kind::UnexpectedEnd))?;
        self.cursor += 1;
        Ok(token)
    }

    /// Consumes the next token, requiring it to be of the given kind.
    fn expect(&mut self, expected: TokenKind) -> Result<Token<'source>, Error> {
        let token = self.next_token()?;
        if token.kind == expected {
            Ok(token)
        } else {
            Err(Error::new(vec![token.span], kind::ExpectedToken { expected, found: token.kind }))
        }
    }

    /// Consumes the current token if it is one of the given operators.
    fn next_operator(&mut self, ops: &[BinOp]) -> Option<BinOp> {
        let op = self.current_token()
            .and_then(|token| BinOp::from_token(token.kind))
            .filter(|op| ops.contains(op))?;
        self.cursor += 1;
        Some(op)
    }

    /// Runs the given parsing function one nesting level deeper.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, Error>) -> Result<T, Error> {
        if self.depth >= self.limits.max_depth {
            return Err(self.error(kind::NestingTooDeep { limit: self.limits.max_depth }));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Fails with [`kind::NestingTooDeep`] if the tree would be taller than the limit.
    fn check_height(&self, height: usize) -> Result<(), Error> {
        if height > self.limits.max_depth {
            return Err(self.error(kind::NestingTooDeep { limit: self.limits.max_depth }));
        }
        Ok(())
    }

    /// Puts the subtree under a new unary node built by `f`.
    fn wrap(&self, subtree: Subtree, f: impl FnOnce(Expr) -> Expr) -> Result<Subtree, Error> {
        let height = subtree.height + 1;
        self.check_height(height)?;
        Ok(Subtree { expr: f(subtree.expr), height })
    }

    /// Joins two subtrees with a binary operator.
    fn join(&self, op: BinOp, lhs: Subtree, rhs: Subtree) -> Result<Subtree, Error> {
        let height = 1 + lhs.height.max(rhs.height);
        self.check_height(height)?;
        Ok(Subtree { expr: Expr::binary(op, lhs.expr, rhs.expr), height })
    }

    /// Parses the whole token stream into an expression.
    ///
    /// With [`Shape::Balanced`], an expression that is a single operand without any operator
    /// outside brackets is rejected with [`kind::DegenerateExpression`].
    pub fn parse_full(&mut self) -> Result<Expr, Error> {
        if self.tokens.is_empty() {
            return Err(Error::new(vec![0..0], kind::EmptyExpression));
        }

        let Subtree { expr, height } = self.parse_sum()?;
        if let Some(token) = self.current_token() {
            return Err(Error::new(vec![token.span.clone()], kind::UnexpectedToken { found: token.kind }));
        }

        if self.shape == Shape::Balanced && !has_top_level_operator(self.tokens) {
            let span = self.tokens[0].span.start..self.eof_span().end;
            return Err(Error::new(vec![span], kind::DegenerateExpression));
        }

        debug!("parsed {} token(s) into a tree of height {}", self.tokens.len(), height);
        Ok(expr)
    }

    /// `sum := product (('+' | '-') product)*`
    fn parse_sum(&mut self) -> Result<Subtree, Error> {
        let first = self.parse_product()?;
        match self.shape {
            Shape::Chain => {
                let mut lhs = first;
                while let Some(op) = self.next_operator(&[BinOp::Add, BinOp::Sub]) {
                    let rhs = self.parse_product()?;
                    lhs = self.join(op, lhs, rhs)?;
                }
                Ok(lhs)
            },
            Shape::Balanced => {
                let mut terms = vec![first];
                while let Some(op) = self.next_operator(&[BinOp::Add, BinOp::Sub]) {
                    let term = self.parse_product()?;
                    terms.push(match op {
                        BinOp::Sub => self.wrap(term, Expr::neg)?,
                        _ => term,
                    });
                }

                // every term is within the limit, so the balanced tree is shallow enough to walk
                let expr = balance(BinOp::Add, terms.into_iter().map(|term| term.expr))
                    .ok_or_else(|| self.error(kind::EmptyExpression))?;
                let height = expr.height();
                self.check_height(height)?;
                Ok(Subtree { expr, height })
            },
        }
    }

    /// `product := factor (('*' | '/') factor)*`
    fn parse_product(&mut self) -> Result<Subtree, Error> {
        let mut lhs = self.parse_factor()?;
        while let Some(op) = self.next_operator(&[BinOp::Mul, BinOp::Div]) {
            let rhs = self.parse_factor()?;
            lhs = self.join(op, lhs, rhs)?;
        }
        Ok(lhs)
    }

    /// `factor := ('-' | '+') factor | '(' sum ')' | NAME '(' sum ')' | operand`
    fn parse_factor(&mut self) -> Result<Subtree, Error> {
        let token = self.next_token()?;
        match token.kind {
            TokenKind::Sub => {
                let operand = self.nested(Self::parse_factor)?;
                self.wrap(operand, Expr::neg)
            },
            TokenKind::Add => self.nested(Self::parse_factor),
            TokenKind::OpenParen => {
                let expr = self.nested(Self::parse_sum)?;
                self.expect(TokenKind::CloseParen)?;
                Ok(expr)
            },
            TokenKind::FunctionName => {
                let open = self.expect(TokenKind::FuncOpenParen)?;
                if self.current_token().map(|token| token.kind) == Some(TokenKind::FuncCloseParen) {
                    return Err(Error::new(vec![open.span.start..self.span().end], kind::EmptyArgument));
                }
                let arg = self.nested(Self::parse_sum)?;
                self.expect(TokenKind::FuncCloseParen)?;
                self.wrap(arg, |arg| Expr::call(token.lexeme, arg))
            },
            TokenKind::Integer | TokenKind::Decimal | TokenKind::Identifier => Ok(Subtree::leaf(Expr::literal(token.lexeme))),
            found => Err(Error::new(vec![token.span], kind::UnexpectedToken { found })),
        }
    }
}

/// Returns true if an operator appears outside of every bracket.
fn has_top_level_operator(tokens: &[Token]) -> bool {
    let mut depth = 0usize;
    tokens.iter().any(|token| {
        if token.kind.is_opening() {
            depth += 1;
        } else if token.kind.is_closing() {
            depth = depth.saturating_sub(1);
        }
        depth == 0 && token.kind.is_operator()
    })
}

/// Parses validated tokens into a balanced tree.
///
/// Chains of `+` and `-` become balanced trees of additions (see [`Shape::Balanced`]), while
/// chains of `*` and `/` are nested from left to right.
pub fn parse(tokens: &[Token]) -> Result<Expr, Error> {
    Parser::new(tokens).parse_full()
}

/// Parses validated tokens into ordinary left-to-right trees (see [`Shape::Chain`]).
pub fn parse_chain(tokens: &[Token]) -> Result<Expr, Error> {
    Parser::new(tokens).with_shape(Shape::Chain).parse_full()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::{tokenizer::tokenize, validator::validate};
    use super::*;

    fn parse_with(input: &str, shape: Shape, limits: Limits) -> Result<Expr, Error> {
        let mut tokens = tokenize(input).unwrap();
        assert!(validate(&mut tokens).is_valid(), "{} is invalid", input);
        Parser::new(&tokens).with_shape(shape).with_limits(limits).parse_full()
    }

    fn balanced(input: &str) -> Expr {
        parse_with(input, Shape::Balanced, Limits::default()).unwrap()
    }

    fn chain(input: &str) -> Expr {
        parse_with(input, Shape::Chain, Limits::default()).unwrap()
    }

    #[test]
    fn balanced_sum() {
        let expr = balanced("a+b+c+d");
        assert_eq!(expr.grouped().to_string(), "(a+b)+(c+d)");
        assert_eq!(expr.height(), 2);
    }

    #[test]
    fn balanced_sum_height() {
        let names = ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k"];
        for n in 2..=names.len() {
            let input = names[..n].join("+");
            let expected = (n as f64).log2().ceil() as usize;
            assert_eq!(balanced(&input).height(), expected, "{}", input);
        }
    }

    #[test]
    fn subtraction_becomes_negation() {
        let expr = balanced("a-b+c");
        assert_eq!(
            expr,
            Expr::binary(
                BinOp::Add,
                Expr::binary(BinOp::Add, Expr::literal("a"), Expr::neg(Expr::literal("b"))),
                Expr::literal("c"),
            ),
        );
        assert_eq!(expr.to_string(), "a-b+c");
    }

    #[test]
    fn products_nest_left() {
        let expr = balanced("a*b/c*d");
        assert_eq!(expr.grouped().to_string(), "((a*b)/c)*d");
        assert_eq!(expr.height(), 3);
    }

    #[test]
    fn precedence() {
        assert_eq!(balanced("a+b*c").to_string(), "a+b*c");
        assert_eq!(balanced("(a+b)*c").to_string(), "(a+b)*c");
        assert_eq!(balanced("-a*b").to_string(), "-a*b");
        assert_eq!(balanced("-(a+b)").to_string(), "-(a+b)");
    }

    #[test]
    fn function_calls() {
        let expr = balanced("round(12.41-(f(22*2)-21))");
        assert_eq!(expr.to_string(), "round(12.41-(f(22*2)-21))");
        assert!(matches!(expr, Expr::Call(ref name, _) if name == "round"));
    }

    #[test]
    fn chain_keeps_subtraction() {
        let expr = chain("a-b-c");
        assert_eq!(
            expr,
            Expr::binary(
                BinOp::Sub,
                Expr::binary(BinOp::Sub, Expr::literal("a"), Expr::literal("b")),
                Expr::literal("c"),
            ),
        );
        assert_eq!(expr.to_string(), "a-b-c");
    }

    #[test]
    fn chain_allows_single_operand() {
        assert_eq!(chain("(a)"), Expr::literal("a"));
    }

    #[test]
    fn degenerate_expression() {
        for input in ["a", "(a)", "((a+b))", "f(a+b)"] {
            let err = parse_with(input, Shape::Balanced, Limits::default()).unwrap_err();
            assert!(err.kind_is::<kind::DegenerateExpression>(), "{}", input);
        }
        assert_eq!(balanced("-a"), Expr::neg(Expr::literal("a")));
        assert_eq!(balanced("(a)+b").to_string(), "a+b");
    }

    #[test]
    fn empty_function_argument() {
        let err = parse_with("pi()+e", Shape::Balanced, Limits::default()).unwrap_err();
        assert!(err.kind_is::<kind::EmptyArgument>());
        assert_eq!(err.span(), Some(2..4));
    }

    #[test]
    fn nesting_limit() {
        let input = format!("{}a{}+b", "(".repeat(10), ")".repeat(10));
        let limits = Limits::default().with_max_depth(5);
        let err = parse_with(&input, Shape::Balanced, limits).unwrap_err();
        assert!(err.kind_is::<kind::NestingTooDeep>());
        assert!(parse_with(&input, Shape::Balanced, Limits::default()).is_ok());
    }

    #[test]
    fn tree_height_limit() {
        let product = vec!["a"; 50_000].join("*") + "+b";
        let err = parse_with(&product, Shape::Balanced, Limits::default()).unwrap_err();
        assert!(err.kind_is::<kind::NestingTooDeep>());

        let difference = vec!["a"; 50_000].join("-");
        let err = parse_with(&difference, Shape::Chain, Limits::default()).unwrap_err();
        assert!(err.kind_is::<kind::NestingTooDeep>());

        // balancing keeps a long sum shallow
        assert_eq!(parse_with(&difference, Shape::Balanced, Limits::default()).unwrap().height(), 17);

        let product = vec!["a"; 200].join("*");
        assert_eq!(parse_with(&product, Shape::Balanced, Limits::default()).unwrap().height(), 199);

        let limits = Limits::default().with_max_depth(3);
        assert!(parse_with("a*b*c*d", Shape::Balanced, limits).is_ok());
        assert!(parse_with("a*b*c*d*e", Shape::Balanced, limits).is_err());
        assert!(parse_with("-(-(-(-a)))", Shape::Balanced, limits).is_err());
    }

    #[test]
    fn unvalidated_input_is_an_error() {
        for input in ["a+", "a+*b", "(a+b", "a b"] {
            let tokens = tokenize(input).unwrap();
            assert!(parse(&tokens).is_err(), "{}", input);
        }
        assert!(parse(&[]).unwrap_err().kind_is::<kind::EmptyExpression>());
    }
}
