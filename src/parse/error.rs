use super::lexer::TokenKind;
use crate::common::NonEmpty;
use std::fmt;
use std::ops::Range;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("{} at position {} ({slice:?}): {kind}", .kind.category(), .span.start)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Range<usize>,
    pub slice: String,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, span: Range<usize>, slice: impl ToString) -> Self {
        Self {
            kind,
            span,
            slice: slice.to_string(),
        }
    }

    /// The input contained a character sequence that is not a token.
    pub fn is_lex_error(&self) -> bool {
        matches!(self.kind, ParseErrorKind::Unrecognized)
    }

    /// The input lexed cleanly but the tokens do not form an expression.
    pub fn is_syntax_error(&self) -> bool {
        !self.is_lex_error()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    Unrecognized,
    ExpectedOperand {
        found: TokenKind,
    },
    UnexpectedToken {
        found: TokenKind,
        expected: NonEmpty<TokenKind>,
    },
}

impl ParseErrorKind {
    fn category(&self) -> &'static str {
        match self {
            Self::Unrecognized => "lex error",
            _ => "syntax error",
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unrecognized => f.write_str("unrecognized input"),
            Self::ExpectedOperand { found } => {
                write!(f, "expected an operand, found {}", found)
            }
            Self::UnexpectedToken { found, expected } => {
                write!(f, "unexpected token: found {}, expected ", found)?;
                fmt_expected(expected, f)
            }
        }
    }
}

fn fmt_expected(expected: &[TokenKind], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match expected {
        [] => Ok(()),
        [a] => f.write_str(a.as_str()),
        [a, b] => write!(f, "{} or {}", a, b),
        [init @ .., last] => {
            for exp in init {
                write!(f, "{}, ", exp)?;
            }
            write!(f, "or {}", last)
        }
    }
}
