use super::error::{ParseError, ParseErrorKind};
use crate::common::Int;
use logos::{Logos, Span};
use std::fmt;

/// Lexical categories of the dice grammar.
///
/// Whitespace is never skipped: the spaced arithmetic operators carry their
/// surrounding spaces, which is what tells `2d6 + 1` (addition) apart from
/// `2d6+1` (a bonus on every die).
#[derive(Logos, Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TokenKind {
    #[regex(r"[0-9]+")]
    Constant,

    #[token("d")]
    Dice,

    #[token(" + ")]
    Plus,
    #[token(" - ")]
    Minus,
    #[token(" * ")]
    Star,
    #[token(" / ")]
    Slash,

    #[token("+")]
    BonusPlus,
    #[token("-")]
    BonusMinus,
    #[token("*")]
    BonusStar,
    #[token("/")]
    BonusSlash,

    #[token("E")]
    ExplodeAbove,
    #[token("e")]
    ExplodeUnder,
    #[token("K")]
    KeepHigh,
    #[token("k")]
    KeepLow,
    #[token("A")]
    AgainAbove,
    #[token("a")]
    AgainUnder,
    #[token("T")]
    ThresholdHigh,
    #[token("t")]
    ThresholdLow,

    #[token(" x ")]
    Repeat,

    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,

    // Never produced by the scanner; appended by the parser.
    End,

    #[error]
    Error,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        use TokenKind::*;

        match self {
            Constant => "<constant>",
            Dice => "'d'",
            Plus => "' + '",
            Minus => "' - '",
            Star => "' * '",
            Slash => "' / '",
            BonusPlus => "'+'",
            BonusMinus => "'-'",
            BonusStar => "'*'",
            BonusSlash => "'/'",
            ExplodeAbove => "'E'",
            ExplodeUnder => "'e'",
            KeepHigh => "'K'",
            KeepLow => "'k'",
            AgainAbove => "'A'",
            AgainUnder => "'a'",
            ThresholdHigh => "'T'",
            ThresholdLow => "'t'",
            Repeat => "' x '",
            LeftParen => "'('",
            RightParen => "')'",
            End => "<end of input>",
            Error => "<error>",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Only set for [`TokenKind::Constant`].
    pub value: Option<Int>,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, value: Option<Int>, span: Span) -> Self {
        Self { kind, value, span }
    }

    pub(crate) fn end(at: usize) -> Self {
        Self::new(TokenKind::End, None, at..at)
    }
}

/// Splits `s` into tokens, left to right.
///
/// Fails on the first character sequence no token matches, including a
/// numeric literal too large to represent.
pub fn lex(s: &str) -> Result<Vec<Token>, ParseError> {
    let mut lexer = TokenKind::lexer(s);
    let mut tokens = Vec::new();

    while let Some(kind) = lexer.next() {
        let value = match kind {
            TokenKind::Error => return Err(unrecognized(&lexer)),
            TokenKind::Constant => Some(
                lexer
                    .slice()
                    .parse::<Int>()
                    .map_err(|_| unrecognized(&lexer))?,
            ),
            _ => None,
        };
        tokens.push(Token::new(kind, value, lexer.span()));
    }

    Ok(tokens)
}

fn unrecognized(lexer: &logos::Lexer<'_, TokenKind>) -> ParseError {
    ParseError::new(ParseErrorKind::Unrecognized, lexer.span(), lexer.slice())
}
