use super::lexer::TokenKind;
use crate::common::BinaryOperator;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// The table the parser reads; built on first use and never mutated.
pub(crate) static SYMBOLS: Lazy<SymbolTable> = Lazy::new(SymbolTable::new);

/// Binding strength of an operator; higher binds tighter.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub(crate) struct Precedence(pub u8);

impl Precedence {
    /// Binds nothing; also the binding power of `)` and the end marker.
    pub const MIN: Self = Self(0);
    pub const REPEAT: Self = Self(5);
    pub const SUM: Self = Self(10);
    pub const PRODUCT: Self = Self(15);
    pub const BONUS: Self = Self(20);
    pub const DICE: Self = Self(30);

    /// Operand strength of unary minus and of `d` without a count.
    pub const UNARY: Self = Self(Self::DICE.0 - 1);
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum Associativity {
    Left,
    Right,
}

/// What a symbol does at the start of a subexpression.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum Prefix {
    Constant,
    Group,
    Negative,
    /// `d6` reads as `1d6`.
    ImplicitDice,
}

/// What a symbol does between two subexpressions.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) struct Infix {
    pub op: BinaryOperator,
    pub assoc: Associativity,
}

impl Infix {
    /// The binding power the right operand is parsed with.
    pub fn rbp(&self, lbp: Precedence) -> Precedence {
        match self.assoc {
            Associativity::Left => lbp,
            Associativity::Right => Precedence(lbp.0 - 1),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) struct Symbol {
    pub kind: TokenKind,
    pub prefix: Option<Prefix>,
    pub lbp: Precedence,
    pub infix: Option<Infix>,
}

#[derive(Debug)]
pub(crate) struct SymbolTable {
    symbols: HashMap<TokenKind, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        use Associativity::*;
        use BinaryOperator as Op;
        use TokenKind::*;

        let mut table = Self {
            symbols: HashMap::new(),
        };

        table.primary(Constant, Prefix::Constant);
        table.primary(LeftParen, Prefix::Group);
        table.terminator(RightParen);
        table.terminator(End);

        table.operator(Dice, Some(Prefix::ImplicitDice), Precedence::DICE, Op::Dice, Right);
        table.operator(ExplodeAbove, None, Precedence::DICE, Op::ExplodeAbove, Right);
        table.operator(ExplodeUnder, None, Precedence::DICE, Op::ExplodeUnder, Right);
        table.operator(KeepHigh, None, Precedence::DICE, Op::KeepHigh, Right);
        table.operator(KeepLow, None, Precedence::DICE, Op::KeepLow, Right);
        table.operator(AgainAbove, None, Precedence::DICE, Op::AgainAbove, Right);
        table.operator(AgainUnder, None, Precedence::DICE, Op::AgainUnder, Right);
        table.operator(ThresholdHigh, None, Precedence::DICE, Op::ThresholdHigh, Right);
        table.operator(ThresholdLow, None, Precedence::DICE, Op::ThresholdLow, Right);

        table.operator(BonusPlus, None, Precedence::BONUS, Op::BonusAdd, Left);
        table.operator(BonusMinus, Some(Prefix::Negative), Precedence::BONUS, Op::BonusSubtract, Left);
        table.operator(BonusStar, None, Precedence::BONUS, Op::BonusMultiply, Left);
        table.operator(BonusSlash, None, Precedence::BONUS, Op::BonusDivide, Left);

        table.operator(Star, None, Precedence::PRODUCT, Op::Multiply, Left);
        table.operator(Slash, None, Precedence::PRODUCT, Op::Divide, Left);

        table.operator(Plus, None, Precedence::SUM, Op::Add, Left);
        table.operator(Minus, None, Precedence::SUM, Op::Subtract, Left);

        table.operator(Repeat, None, Precedence::REPEAT, Op::Repeat, Left);

        table
    }

    fn insert(&mut self, symbol: Symbol) {
        self.symbols.insert(symbol.kind, symbol);
    }

    fn primary(&mut self, kind: TokenKind, prefix: Prefix) {
        self.insert(Symbol {
            kind,
            prefix: Some(prefix),
            lbp: Precedence::MIN,
            infix: None,
        });
    }

    fn terminator(&mut self, kind: TokenKind) {
        self.insert(Symbol {
            kind,
            prefix: None,
            lbp: Precedence::MIN,
            infix: None,
        });
    }

    fn operator(
        &mut self,
        kind: TokenKind,
        prefix: Option<Prefix>,
        lbp: Precedence,
        op: BinaryOperator,
        assoc: Associativity,
    ) {
        self.insert(Symbol {
            kind,
            prefix,
            lbp,
            infix: Some(Infix { op, assoc }),
        });
    }

    pub fn get(&self, kind: TokenKind) -> &Symbol {
        // The lexer turns unmatched input into an error before parsing, so
        // every kind the parser sees is registered.
        self.symbols
            .get(&kind)
            .unwrap_or_else(|| unreachable!("no symbol registered for {}", kind))
    }
}
