use log::debug;

use crate::{
    analyzer::SymbolTable,
    error::{Expected, SyntaxError},
    lexer::{Position, Token, TokenKind},
};

use super::{BinOpKind, Node};

/// Recursive descent over
///
/// expr   = term (("+" | "-") term)*
/// term   = factor (("*" | "/") factor)*
/// factor = num | ident | "(" expr ")"
///
/// There is no unary minus: `-1` is a syntax error.
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    index: usize,
    symbol_table: SymbolTable,
    depth: usize,
    max_depth: Option<usize>,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(Token::is_eof) {
            let pos = tokens
                .last()
                .map(|t| Position::new(t.pos.line, t.pos.column + t.text.chars().count()))
                .unwrap_or(Position::new(1, 1));
            tokens.push(Token::new(TokenKind::Eof, "", pos));
        }

        Self {
            tokens,
            index: 0,
            symbol_table: SymbolTable::new(),
            depth: 0,
            max_depth: None,
        }
    }

    /// Caps parenthesis nesting. `None` leaves it unbounded.
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn parse(&mut self) -> Result<Node, SyntaxError> {
        let node = self.parse_expr()?;

        let t = self.peek();
        if !t.is_eof() {
            return Err(SyntaxError::TrailingInput {
                found: t.kind,
                text: t.text.clone(),
                pos: t.pos,
            });
        }

        debug!(
            "parsed {} tokens, {} identifiers",
            self.index,
            self.symbol_table.len()
        );
        Ok(node)
    }

    pub fn symbol_table(&self) -> &SymbolTable {
        &self.symbol_table
    }

    pub fn into_symbol_table(self) -> SymbolTable {
        self.symbol_table
    }

    /// Number of tokens consumed so far, EOF excluded.
    pub fn consumed(&self) -> usize {
        self.index
    }

    fn peek(&self) -> &Token {
        // Eof is never consumed, so index stays in bounds.
        &self.tokens[self.index]
    }

    fn bump(&mut self) -> Token {
        let t = self.tokens[self.index].clone();
        self.index += 1;
        t
    }

    fn consume(&mut self, kind: TokenKind) -> Option<Token> {
        if self.peek().kind != kind {
            return None;
        }
        Some(self.bump())
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, SyntaxError> {
        match self.consume(kind) {
            Some(t) => Ok(t),
            None => Err(self.unexpected(Expected::Token(kind))),
        }
    }

    fn unexpected(&self, expected: Expected) -> SyntaxError {
        let t = self.peek();
        SyntaxError::UnexpectedToken {
            expected,
            found: t.kind,
            text: t.text.clone(),
            pos: t.pos,
        }
    }

    /// expr = term (("+" | "-") term)*
    fn parse_expr(&mut self) -> Result<Node, SyntaxError> {
        let mut node = self.parse_term()?;

        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => BinOpKind::Add,
                TokenKind::Minus => BinOpKind::Sub,
                _ => return Ok(node),
            };
            let pos = self.bump().pos;
            let right = self.parse_term()?;
            node = Node::new_binop(op, node, right, pos);
        }
    }

    /// term = factor (("*" | "/") factor)*
    fn parse_term(&mut self) -> Result<Node, SyntaxError> {
        let mut node = self.parse_factor()?;

        loop {
            let op = match self.peek().kind {
                TokenKind::Times => BinOpKind::Mul,
                TokenKind::Div => BinOpKind::Div,
                _ => return Ok(node),
            };
            let pos = self.bump().pos;
            let right = self.parse_factor()?;
            node = Node::new_binop(op, node, right, pos);
        }
    }

    /// factor = num | ident | "(" expr ")"
    fn parse_factor(&mut self) -> Result<Node, SyntaxError> {
        if let Some(t) = self.consume(TokenKind::Number) {
            let value: f64 = t.text.parse().map_err(|_| SyntaxError::InvalidNumber {
                text: t.text.clone(),
                pos: t.pos,
            })?;
            return Ok(Node::new_number(value, t.pos));
        }

        if let Some(t) = self.consume(TokenKind::Ident) {
            self.symbol_table.touch(&t.text, t.pos);
            return Ok(Node::new_ident(t.text, t.pos));
        }

        if let Some(t) = self.consume(TokenKind::LeftParen) {
            self.enter_group(t.pos)?;
            let node = self.parse_expr()?;
            self.expect(TokenKind::RightParen)?;
            self.depth -= 1;
            return Ok(node);
        }

        Err(self.unexpected(Expected::Operand))
    }

    fn enter_group(&mut self, pos: Position) -> Result<(), SyntaxError> {
        self.depth += 1;
        match self.max_depth {
            Some(limit) if self.depth > limit => Err(SyntaxError::NestingTooDeep { limit, pos }),
            _ => Ok(()),
        }
    }
}
