use super::ast::Node;
use super::error::{ParseError, ParseErrorKind};
use super::lexer::{Token, TokenKind};
use super::symbol::{Precedence, Prefix, SymbolTable};
use crate::common::{vec1, BinaryOperator};

type PResult<T = Node> = Result<T, ParseError>;

/// Operator-precedence parser over an already lexed token sequence.
pub(crate) struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    position: usize,
    symbols: &'a SymbolTable,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, mut tokens: Vec<Token>, symbols: &'a SymbolTable) -> Self {
        tokens.push(Token::end(source.len()));
        Self {
            source,
            tokens,
            position: 0,
            symbols,
        }
    }

    /// Parses one expression and requires the end marker right after it.
    pub fn parse(mut self) -> PResult {
        let node = self.expression(Precedence::MIN)?;
        self.consume(TokenKind::End)?;
        Ok(node)
    }

    fn peek(&self) -> &Token {
        // The end marker is never stepped over, so it is always the last read.
        &self.tokens[self.position.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        self.position += 1;
        token
    }

    fn consume(&mut self, expected: TokenKind) -> PResult<()> {
        if self.peek().kind == expected {
            self.advance();
            Ok(())
        } else {
            let found = self.peek().clone();
            Err(self.error(
                ParseErrorKind::UnexpectedToken {
                    found: found.kind,
                    expected: vec1![expected],
                },
                &found,
            ))
        }
    }

    fn error(&self, kind: ParseErrorKind, at: &Token) -> ParseError {
        let slice = self.source.get(at.span.clone()).unwrap_or_default();
        ParseError::new(kind, at.span.clone(), slice)
    }

    fn expected_operand(&self, found: &Token) -> ParseError {
        self.error(ParseErrorKind::ExpectedOperand { found: found.kind }, found)
    }

    fn expression(&mut self, rbp: Precedence) -> PResult {
        let token = self.advance();
        let mut left = self.prefix(&token)?;

        while rbp < self.symbols.get(self.peek().kind).lbp {
            let token = self.advance();
            left = self.infix(left, &token)?;
        }

        Ok(left)
    }

    fn prefix(&mut self, token: &Token) -> PResult {
        match self.symbols.get(token.kind).prefix {
            Some(Prefix::Constant) => token
                .value
                .map(Node::new_constant)
                .ok_or_else(|| self.expected_operand(token)),
            Some(Prefix::Group) => {
                let inner = self.expression(Precedence::MIN)?;
                self.consume(TokenKind::RightParen)?;
                Ok(inner)
            }
            Some(Prefix::Negative) => {
                let operand = self.expression(Precedence::UNARY)?;
                Ok(Node::new_negative(operand))
            }
            Some(Prefix::ImplicitDice) => {
                let sides = self.expression(Precedence::UNARY)?;
                Ok(Node::new_binary(
                    BinaryOperator::Dice,
                    Node::new_constant(1),
                    sides,
                ))
            }
            None => Err(self.expected_operand(token)),
        }
    }

    fn infix(&mut self, left: Node, token: &Token) -> PResult {
        let symbol = *self.symbols.get(token.kind);
        let rule = symbol.infix.ok_or_else(|| self.expected_operand(token))?;
        let right = self.expression(rule.rbp(symbol.lbp))?;
        Ok(Node::new_binary(rule.op, left, right))
    }
}
