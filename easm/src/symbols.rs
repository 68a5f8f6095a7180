use std::collections::HashMap;

use crate::error::ErrorKind;

/// Case-sensitive symbol table holding label addresses and `.EQU`
/// constants. Values are kept wider than a byte so that pass 1 can track
/// locations past the end of memory; emission masks to 8 bits.
#[derive(Debug, Default)]
pub struct SymbolTable {
    values: HashMap<String, i32>,
}

impl SymbolTable {
    pub fn new() -> SymbolTable {
        SymbolTable::default()
    }

    /// Binds a symbol. Rebinding is an error, for labels and constants
    /// alike.
    pub fn define(&mut self, name: &str, value: i32) -> Result<(), ErrorKind> {
        if self.values.contains_key(name) {
            return Err(ErrorKind::DuplicateSymbol(name.to_owned()));
        }
        self.values.insert(name.to_owned(), value);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<i32> {
        self.values.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}
