//! The table of which token may follow which, used by the [validator](crate::validator).

use crate::tokenizer::TokenKind;
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

/// The grammatical role of a token. The validator only looks at the category of each token, and
/// the category of the token before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrammarCategory {
    /// The position before the first token.
    Start,
    OpenBracket,
    CloseBracket,
    Function,
    FunctionOpenBracket,
    FunctionCloseBracket,
    Operand,
    OperationAdd,
    OperationSub,
    OperationMul,
    OperationDiv,
    Error,
    /// The position after the last token.
    Finish,
}

impl GrammarCategory {
    /// Every category, in declaration order.
    pub const ALL: [GrammarCategory; 13] = [
        GrammarCategory::Start,
        GrammarCategory::OpenBracket,
        GrammarCategory::CloseBracket,
        GrammarCategory::Function,
        GrammarCategory::FunctionOpenBracket,
        GrammarCategory::FunctionCloseBracket,
        GrammarCategory::Operand,
        GrammarCategory::OperationAdd,
        GrammarCategory::OperationSub,
        GrammarCategory::OperationMul,
        GrammarCategory::OperationDiv,
        GrammarCategory::Error,
        GrammarCategory::Finish,
    ];
}

impl From<TokenKind> for GrammarCategory {
    fn from(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Integer | TokenKind::Decimal | TokenKind::Identifier => GrammarCategory::Operand,
            TokenKind::FunctionName => GrammarCategory::Function,
            TokenKind::Add => GrammarCategory::OperationAdd,
            TokenKind::Sub => GrammarCategory::OperationSub,
            TokenKind::Mul => GrammarCategory::OperationMul,
            TokenKind::Div => GrammarCategory::OperationDiv,
            TokenKind::OpenParen => GrammarCategory::OpenBracket,
            TokenKind::CloseParen => GrammarCategory::CloseBracket,
            TokenKind::FuncOpenParen => GrammarCategory::FunctionOpenBracket,
            TokenKind::FuncCloseParen => GrammarCategory::FunctionCloseBracket,
            TokenKind::Error => GrammarCategory::Error,
        }
    }
}

static TRANSITIONS: Lazy<HashMap<GrammarCategory, HashSet<GrammarCategory>>> = Lazy::new(|| {
    use GrammarCategory::*;

    let opening = [OpenBracket, Operand, Function, OperationAdd, OperationSub];
    let after_operator = [Operand, Function, OpenBracket];
    let after_operand = [
        OperationAdd,
        OperationSub,
        OperationMul,
        OperationDiv,
        CloseBracket,
        FunctionCloseBracket,
        Finish,
    ];
    let after_error = GrammarCategory::ALL
        .into_iter()
        .filter(|category| *category != Error);

    let mut table: HashMap<GrammarCategory, HashSet<GrammarCategory>> = HashMap::new();
    for from in [Start, OpenBracket] {
        table.insert(from, opening.into_iter().collect());
    }
    for from in [OperationAdd, OperationSub, OperationMul, OperationDiv] {
        table.insert(from, after_operator.into_iter().collect());
    }
    for from in [Operand, CloseBracket, FunctionCloseBracket] {
        table.insert(from, after_operand.into_iter().collect());
    }
    table.insert(Function, HashSet::from([FunctionOpenBracket]));
    table.insert(
        FunctionOpenBracket,
        HashSet::from([Function, Operand, OpenBracket, FunctionCloseBracket]),
    );
    table.insert(Error, after_error.collect());
    table.insert(Finish, HashSet::new());
    table
});

/// Returns true if a token of category `next` may directly follow one of category `previous`.
pub fn allows(previous: GrammarCategory, next: GrammarCategory) -> bool {
    TRANSITIONS
        .get(&previous)
        .map_or(false, |allowed| allowed.contains(&next))
}

/// Returns true if an expression may end with a token of the given category.
pub fn can_finish(last: GrammarCategory) -> bool {
    allows(last, GrammarCategory::Finish)
}

#[cfg(test)]
mod tests {
    use super::*;
    use GrammarCategory::*;

    #[test]
    fn every_category_has_an_entry() {
        for category in GrammarCategory::ALL {
            assert!(TRANSITIONS.contains_key(&category), "{:?}", category);
        }
    }

    #[test]
    fn operators_need_operands() {
        assert!(allows(OperationMul, Operand));
        assert!(allows(OperationDiv, OpenBracket));
        assert!(!allows(OperationAdd, OperationSub));
        assert!(!allows(OperationMul, CloseBracket));
    }

    #[test]
    fn unary_operators_at_start() {
        assert!(allows(Start, OperationSub));
        assert!(allows(OpenBracket, OperationAdd));
        assert!(!allows(Start, OperationMul));
        assert!(!allows(FunctionOpenBracket, OperationSub));
    }

    #[test]
    fn error_absorbs_anything_but_errors() {
        for category in GrammarCategory::ALL {
            assert_eq!(allows(Error, category), category != Error);
        }
    }

    #[test]
    fn finishing_categories() {
        let finishing = GrammarCategory::ALL
            .into_iter()
            .filter(|category| can_finish(*category))
            .collect::<HashSet<_>>();
        assert_eq!(
            finishing,
            HashSet::from([CloseBracket, FunctionCloseBracket, Operand, Error]),
        );
        assert!(!allows(Finish, Start));
    }
}
