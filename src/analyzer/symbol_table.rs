use std::{collections::HashMap, fmt};

use crate::lexer::Position;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SymbolType {
    Num,
}

impl fmt::Display for SymbolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolType::Num => f.write_str("num"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub ty: SymbolType,
    /// Nothing in the grammar assigns to a name, so this stays `None` after parsing.
    pub value: Option<f64>,
    pub occurrences: Vec<Position>,
}

impl Symbol {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ty: SymbolType::Num,
            value: None,
            occurrences: vec![],
        }
    }
}

/// Identifiers in the order they were first seen.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    index: HashMap<String, usize>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&mut self, name: &str) -> &mut Symbol {
        let i = match self.index.get(name) {
            Some(&i) => i,
            None => {
                self.symbols.push(Symbol::new(name));
                let i = self.symbols.len() - 1;
                self.index.insert(name.to_string(), i);
                i
            }
        };
        &mut self.symbols[i]
    }

    /// Records one occurrence of `name`, creating the entry on first sight.
    pub fn touch(&mut self, name: &str, pos: Position) {
        self.entry(name).occurrences.push(pos);
    }

    pub fn set_value(&mut self, name: &str, value: f64) {
        self.entry(name).value = Some(value);
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.index.get(name).map(|&i| &self.symbols[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl<'a> IntoIterator for &'a SymbolTable {
    type Item = &'a Symbol;
    type IntoIter = std::slice::Iter<'a, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.symbols.iter()
    }
}

impl fmt::Display for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("(no identifiers)");
        }

        for (i, sym) in self.symbols.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{:<10} tipo={} valor=", sym.name, sym.ty)?;
            match sym.value {
                Some(v) => write!(f, "{v}")?,
                None => f.write_str("None")?,
            }
        }
        Ok(())
    }
}
