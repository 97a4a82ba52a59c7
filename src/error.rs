//! Errors reported to the caller of the pipeline.
//!
//! Both kinds are terminal: once one is returned no artifact is produced.

use std::fmt;

use thiserror::Error;

use crate::lexer::{Position, TokenKind};

pub type CompileResult<T> = Result<T, CompileError>;

#[derive(Clone, Debug, PartialEq, Error)]
#[error("unexpected character '{character}' at {pos}")]
pub struct LexError {
    pub character: char,
    pub pos: Position,
}

/// What the parser was looking for when it gave up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Expected {
    Token(TokenKind),
    /// Start of a factor: a number, an identifier or `(`.
    Operand,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Token(kind) => write!(f, "{kind}"),
            Expected::Operand => write!(
                f,
                "{} or {} or {}",
                TokenKind::Number,
                TokenKind::Ident,
                TokenKind::LeftParen
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum SyntaxError {
    #[error("expected {expected}, found {found} at {pos}")]
    UnexpectedToken {
        expected: Expected,
        found: TokenKind,
        text: String,
        pos: Position,
    },

    #[error("trailing input starting with {found} '{text}' at {pos}")]
    TrailingInput {
        found: TokenKind,
        text: String,
        pos: Position,
    },

    #[error("parentheses nested deeper than {limit} at {pos}")]
    NestingTooDeep { limit: usize, pos: Position },

    #[error("invalid number literal '{text}' at {pos}")]
    InvalidNumber { text: String, pos: Position },
}

impl SyntaxError {
    pub fn pos(&self) -> Position {
        match self {
            SyntaxError::UnexpectedToken { pos, .. }
            | SyntaxError::TrailingInput { pos, .. }
            | SyntaxError::NestingTooDeep { pos, .. }
            | SyntaxError::InvalidNumber { pos, .. } => *pos,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum CompileError {
    #[error("lexical error: {0}")]
    Lex(#[from] LexError),

    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
}
