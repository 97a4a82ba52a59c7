use log::debug;

use crate::error::LexError;

use super::{token::ONE_SYMBOL_TOKENS, Position, Token, TokenKind};

#[derive(Debug)]
pub struct Lexer {
    tokens: Vec<Token>,
    index: usize,
    line: usize,
    line_start: usize,
}

impl Lexer {
    fn new() -> Self {
        Self {
            tokens: vec![],
            index: 0,
            line: 1,
            line_start: 0,
        }
    }

    fn position(&self) -> Position {
        Position::new(self.line, self.index - self.line_start + 1)
    }

    fn new_token(&mut self, kind: TokenKind, s: &str) {
        let pos = self.position();
        self.tokens.push(Token::new(kind, s, pos));
        self.index += s.chars().count();
    }

    /// number = digit+ ("." digit+)?
    fn parse_number(&mut self, chars: &[char]) {
        let mut len = chars.iter().take_while(|c| c.is_ascii_digit()).count();
        let has_fraction = chars.get(len) == Some(&'.')
            && chars.get(len + 1).is_some_and(|c| c.is_ascii_digit());
        if has_fraction {
            len += 1;
            len += chars[len..]
                .iter()
                .take_while(|c| c.is_ascii_digit())
                .count();
        }

        let s: String = chars[..len].iter().collect();
        self.new_token(TokenKind::Number, &s);
    }

    fn parse_identifier(&mut self, chars: &[char]) {
        let s: String = chars
            .iter()
            .take_while(|&&c| c.is_ascii_alphanumeric() || c == '_')
            .collect();

        self.new_token(TokenKind::Ident, &s);
    }

    fn _tokenize(&mut self, s: &str) -> Result<(), LexError> {
        let chars: Vec<_> = s.chars().collect();

        while self.index < chars.len() {
            let c = chars[self.index];

            if c == ' ' || c == '\t' {
                self.index += 1;
            } else if c == '\n' {
                self.index += 1;
                self.line += 1;
                self.line_start = self.index;
            } else if c.is_ascii_digit() {
                self.parse_number(&chars[self.index..]);
            } else if c.is_ascii_alphabetic() || c == '_' {
                self.parse_identifier(&chars[self.index..]);
            } else if let Some(kind) = ONE_SYMBOL_TOKENS.get(&c) {
                self.new_token(*kind, &c.to_string());
            } else {
                return Err(LexError {
                    character: c,
                    pos: self.position(),
                });
            }
        }

        // EOF takes the column just past the last character.
        let pos = self.position();
        self.tokens.push(Token::new(TokenKind::Eof, "", pos));
        Ok(())
    }

    pub fn tokenize(s: &str) -> Result<Vec<Token>, LexError> {
        let mut lexer = Lexer::new();
        lexer._tokenize(s)?;
        debug!("tokenized {} tokens", lexer.tokens.len());

        Ok(lexer.tokens)
    }
}
