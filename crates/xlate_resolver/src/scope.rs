//! Lexical scope management for identifier resolution.

use rustc_hash::FxHashMap;
use xlate_ast::{ParamId, VariableId};
use xlate_core::Name;

/// A name declared inside a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalSymbol {
    Param(ParamId),
    Variable(VariableId),
}

/// A chain of block scopes. The innermost scope is last.
#[derive(Debug, Default)]
pub struct ScopeChain {
    scopes: Vec<FxHashMap<Name, LocalSymbol>>,
}

impl ScopeChain {
    pub fn new() -> Self {
        Self {
            scopes: vec![FxHashMap::default()],
        }
    }

    pub fn push(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    pub fn pop(&mut self) {
        self.scopes.pop();
    }

    /// Declare `name` in the innermost scope, shadowing outer declarations.
    pub fn declare(&mut self, name: Name, symbol: LocalSymbol) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name, symbol);
        }
    }

    /// Look `name` up from the innermost scope outwards.
    pub fn lookup(&self, name: Name) -> Option<LocalSymbol> {
        self.scopes.iter().rev().find_map(|s| s.get(&name).copied())
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }
}
