//! Dice notation compiler and lazy roller.
//!
//! An expression such as `4K5d6+1` is lexed, parsed into an [`ast::Node`]
//! tree and compiled into a [`Die`]. Rolling a die builds a pool of lazy
//! slots and forces them with a random source held by a [`RollContext`].
//!
//! ```
//! let die = dicebag::parse_expression("3d6 + 2").unwrap();
//! let total = dicebag::roll(&die).unwrap();
//! assert!((5..=20).contains(&total));
//! ```

pub mod common;
mod compile;
mod error;
pub mod parse;
pub mod roll;

pub use common::Int;
pub use compile::{compile, Compiler};
pub use error::{Error, Result};
pub use parse::{ast, lex, ParseError, ParseErrorKind, Token, TokenKind};
pub use roll::{Die, RollContext, RollError, Roller, SequenceRoller, DEFAULT_MAX_ROLLS};

/// Lexes, parses and compiles `s` into a ready-to-roll die.
pub fn parse_expression(s: &str) -> Result<Die, ParseError> {
    parse_ast(s).map(|node| compile(&node))
}

/// Same as [`parse_expression`].
pub fn parse(s: &str) -> Result<Die, ParseError> {
    parse_expression(s)
}

/// Lexes and parses `s` without compiling it.
pub fn parse_ast(s: &str) -> Result<ast::Node, ParseError> {
    parse::parse(s)
}

/// Rolls `die` once with the thread-local generator and returns its total.
pub fn roll(die: &Die) -> Result<Int, RollError> {
    RollContext::default().roll(die)
}

/// Rolls `die` once with the thread-local generator and returns every slot.
pub fn pool(die: &Die) -> Result<Vec<Int>, RollError> {
    RollContext::default().pool(die)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roll_in_range() {
        let die = parse_expression("2d6 + 1d4").unwrap();
        for _ in 0..200 {
            assert!((3..=16).contains(&roll(&die).unwrap()));
            let slots = pool(&die).unwrap();
            assert_eq!(slots.len(), 3);
        }
    }

    #[test]
    fn test_errors_convert() {
        let err: Error = parse_expression("2 d 4").unwrap_err().into();
        assert!(matches!(err, Error::Parse(ref e) if e.is_lex_error()));

        let die = parse_expression("1 / 0").unwrap();
        let err: Error = roll(&die).unwrap_err().into();
        assert_eq!(err, Error::Roll(RollError::DivideByZero));
        assert_eq!(err.to_string(), "cannot divide by zero");
    }

    #[test]
    fn test_parse_alias() {
        assert_eq!(parse("3K4d6"), parse_expression("3K4d6"));
    }
}
