pub mod ast;
mod error;
mod lexer;
mod parser;
mod symbol;
pub mod visit;

pub use error::{ParseError, ParseErrorKind};
pub use lexer::{lex, Token, TokenKind};

/// Lexes and parses `s` into an expression tree.
pub fn parse(s: &str) -> Result<ast::Node, ParseError> {
    let tokens = lex(s)?;
    parser::Parser::new(s, tokens, &symbol::SYMBOLS).parse()
}
