//! Compiles one arithmetic expression into an AST outline, a symbol table
//! and three-address code.
//!
//! - `lexer` turns the text into tokens terminated by `Eof`.
//! - `parser` builds the AST and fills the symbol table as identifiers go by.
//! - `analyzer` holds the symbol table.
//! - `codegen` linearizes the AST into three-address code.

pub mod analyzer;
pub mod codegen;
pub mod error;
pub mod lexer;
pub mod parser;

use analyzer::SymbolTable;
use codegen::{Codegen, Tac};
use lexer::Lexer;
use parser::{Node, Parser};

pub use error::{CompileError, CompileResult, Expected, LexError, SyntaxError};

#[derive(Clone, Debug, Default)]
pub struct CompileOptions {
    /// Parenthesis nesting limit, unbounded when `None`.
    pub max_depth: Option<usize>,
}

/// Everything one compilation produces.
#[derive(Clone, Debug)]
pub struct Artifacts {
    pub ast: Node,
    pub symbol_table: SymbolTable,
    pub tac: Tac,
}

impl Artifacts {
    pub fn ast_text(&self) -> String {
        self.ast.to_string()
    }

    pub fn symbol_table_text(&self) -> String {
        self.symbol_table.to_string()
    }

    pub fn tac_text(&self) -> String {
        self.tac.to_string()
    }
}

pub fn parse(user_input: &str, options: &CompileOptions) -> CompileResult<(Node, SymbolTable)> {
    let tokens = Lexer::tokenize(user_input)?;

    let mut parser = Parser::new(tokens).with_max_depth(options.max_depth);
    let ast = parser.parse()?;

    Ok((ast, parser.into_symbol_table()))
}

pub fn compile_with(user_input: &str, options: &CompileOptions) -> CompileResult<Artifacts> {
    let (ast, symbol_table) = parse(user_input, options)?;
    let tac = Codegen::new().generate(&ast);

    Ok(Artifacts {
        ast,
        symbol_table,
        tac,
    })
}

pub fn compile(user_input: &str) -> CompileResult<Artifacts> {
    compile_with(user_input, &CompileOptions::default())
}
