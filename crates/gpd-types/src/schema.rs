//! # Schema — Immutable Type Graph
//!
//! What [`crate::SchemaBuilder::build`] hands back. A `Schema` owns its arena
//! and symbol table and offers read-only operations only, so it can be
//! shared freely once built (`&Schema` is `Send + Sync`).

use gpd_core::{GpdError, Representation, SymbolError, Value, ValueError};

use crate::aggregate::Member;
use crate::arena::TypeArena;
use crate::compare::Comparator;
use crate::datatype::Datatype;
use crate::reference::{TypeId, TypeRef};
use crate::symbol::SymbolTable;
use crate::validate;

#[derive(Debug, Clone)]
pub struct Schema {
    arena: TypeArena,
    symbols: SymbolTable,
}

impl Schema {
    pub(crate) fn new(arena: TypeArena, symbols: SymbolTable) -> Self {
        Self { arena, symbols }
    }

    /// # Errors
    ///
    /// Returns `NameNotFound` for an unknown name.
    pub fn lookup(&self, name: &str) -> Result<TypeRef, SymbolError> {
        self.symbols.lookup(name)
    }

    pub fn get(&self, ty: impl Into<TypeId>) -> Option<&Datatype> {
        self.arena.get(ty.into())
    }

    pub fn arena(&self) -> &TypeArena {
        &self.arena
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Defined names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.symbols.names()
    }

    /// Validate `raw` against `ty` and return its canonical value.
    ///
    /// # Errors
    ///
    /// Returns the single [`ValueError`] of the first failing check.
    pub fn to_value(&self, ty: impl Into<TypeId>, raw: &Value) -> Result<Value, ValueError> {
        let id = ty.into();
        validate::to_value(&self.arena, id, raw).inspect_err(|e| {
            tracing::trace!(datatype = %self.arena.label(id), error = %e, "value rejected");
        })
    }

    /// [`Schema::to_value`] against a type looked up by name.
    ///
    /// # Errors
    ///
    /// `NameNotFound` for an unknown name, otherwise the value error.
    pub fn to_value_named(&self, name: &str, raw: &Value) -> Result<Value, GpdError> {
        let ty = self.lookup(name)?;
        Ok(self.to_value(&ty, raw)?)
    }

    /// Structural equality, ignoring names and comments.
    pub fn equals(&self, a: impl Into<TypeId>, b: impl Into<TypeId>) -> bool {
        Comparator::new(&self.arena).equals(a.into(), b.into())
    }

    /// True iff every value `a` accepts, `b` accepts too. Never true for a
    /// type and itself.
    pub fn is_restriction_of(&self, a: impl Into<TypeId>, b: impl Into<TypeId>) -> bool {
        Comparator::new(&self.arena).is_restriction_of(a.into(), b.into())
    }

    pub fn representation(&self, ty: impl Into<TypeId>) -> Representation {
        self.arena.representation(ty.into())
    }

    pub fn is_ordered(&self, ty: impl Into<TypeId>) -> bool {
        self.arena.is_ordered(ty.into())
    }

    pub fn is_numeric(&self, ty: impl Into<TypeId>) -> bool {
        self.arena.is_numeric(ty.into())
    }

    /// Flattened members of an aggregate, own members first.
    pub fn members(&self, ty: impl Into<TypeId>) -> Vec<&Member> {
        self.arena.members(ty.into())
    }
}
