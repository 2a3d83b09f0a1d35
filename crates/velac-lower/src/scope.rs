//! Lexical scope stack (spec §3.3).
//!
//! A binding pairs a storage slot with its declared type. Lookup walks the
//! stack innermost-first; shadowing across scopes is allowed, but
//! re-declaring a name within the same scope is an error the caller
//! reports.

use std::collections::HashMap;

use inkwell::values::PointerValue;
use velac_util::Symbol;

use crate::types::SurfaceType;

#[derive(Debug, Clone)]
pub struct Binding<'ctx> {
    pub slot: PointerValue<'ctx>,
    pub ty: SurfaceType,
}

pub struct ScopeStack<'ctx> {
    scopes: Vec<HashMap<Symbol, Binding<'ctx>>>,
}

impl<'ctx> ScopeStack<'ctx> {
    pub fn new() -> Self {
        Self { scopes: Vec::new() }
    }

    pub fn push(&mut self) {
        self.scopes.push(HashMap::new());
    }

    pub fn pop(&mut self) {
        self.scopes.pop();
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// `true` if `name` is already bound in the innermost scope.
    pub fn declared_in_current_scope(&self, name: Symbol) -> bool {
        self.scopes.last().is_some_and(|scope| scope.contains_key(&name))
    }

    pub fn bind(&mut self, name: Symbol, binding: Binding<'ctx>) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name, binding);
        }
    }

    pub fn lookup(&self, name: Symbol) -> Option<&Binding<'ctx>> {
        self.scopes.iter().rev().find_map(|scope| scope.get(&name))
    }
}

impl<'ctx> Default for ScopeStack<'ctx> {
    fn default() -> Self {
        Self::new()
    }
}
