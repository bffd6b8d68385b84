//! # Schema Builder — Two-Phase Type Graph Assembly
//!
//! The only mutable view of a type graph. A loader or a test:
//!
//! 1. `declare`s every name it will define, getting back a reference that
//!    can be embedded in other types straight away;
//! 2. `define`s each name (or `add`s anonymous types) in any order;
//! 3. calls `build()` to freeze the graph into an immutable [`Schema`].
//!
//! ## Deferred checks
//!
//! Some invariants depend on types that may not be defined yet when their
//! dependent is added:
//!
//! - a derivation target must be a class or interface;
//! - a pattern is only legal on a sequence of characters;
//! - a set's base must fit the storage width, and an enumerated base may
//!   still grow through [`SchemaBuilder::extend_enumerated`].
//!
//! Each is checked as early as the graph allows and again by `build()`,
//! so a stale pass is never trusted.

use gpd_core::{ConstructionError, Enumeration, GpdError, Length, SymbolError, Value};

use crate::aggregate::Aggregate;
use crate::arena::TypeArena;
use crate::datatype::{Datatype, TypeKind};
use crate::range::RangeType;
use crate::reference::{TypeId, TypeRef};
use crate::schema::Schema;
use crate::sequence::{element_count, Sequence, SequenceShape};
use crate::set::{SetType, DEFAULT_SET_WIDTH};
use crate::symbol::SymbolTable;
use crate::validate;

#[derive(Debug, Default)]
pub struct SchemaBuilder {
    arena: TypeArena,
    symbols: SymbolTable,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Symbols ─────────────────────────────────────────────────────

    /// Declare `name` and return a reference to it.
    ///
    /// Declaring a name that is already declared or defined returns the
    /// existing reference, so every reference to a name reaches one slot.
    pub fn declare(&mut self, name: &str) -> TypeRef {
        if let Some(id) = self.symbols.get(name) {
            return TypeRef::named(name, id);
        }
        let id = self.arena.reserve(name);
        self.symbols.bind(name, id);
        tracing::debug!(name, %id, "declared datatype");
        TypeRef::named(name, id)
    }

    /// # Errors
    ///
    /// Returns `NameNotFound` if `name` was never declared or defined.
    pub fn lookup(&self, name: &str) -> Result<TypeRef, SymbolError> {
        self.symbols.lookup(name)
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.symbols
            .get(name)
            .is_some_and(|id| self.arena.is_defined(id))
    }

    pub fn get(&self, id: TypeId) -> Option<&Datatype> {
        self.arena.get(id)
    }

    /// Bind `name` to `datatype`.
    ///
    /// # Errors
    ///
    /// - `DuplicateDefinition` if `name` is already bound to a datatype.
    /// - A construction error if the datatype violates an invariant that can
    ///   already be checked against the graph.
    pub fn define(
        &mut self,
        name: &str,
        datatype: impl Into<Datatype>,
    ) -> Result<TypeRef, GpdError> {
        let existing = self.symbols.get(name);
        if existing.is_some_and(|id| self.arena.is_defined(id)) {
            return Err(SymbolError::DuplicateDefinition {
                name: name.to_string(),
            }
            .into());
        }
        let mut datatype = self.finalize(datatype.into())?;
        datatype.set_name(name);
        let category = datatype.category();
        let id = match existing {
            Some(id) => id,
            None => {
                let id = self.arena.reserve(name);
                self.symbols.bind(name, id);
                id
            }
        };
        if !self.arena.fill(id, datatype) {
            return Err(SymbolError::DuplicateDefinition {
                name: name.to_string(),
            }
            .into());
        }
        tracing::debug!(name, %id, %category, "defined datatype");
        Ok(TypeRef::named(name, id))
    }

    /// Add an anonymous datatype and return a reference embedding it.
    ///
    /// # Errors
    ///
    /// Returns a construction error as for [`SchemaBuilder::define`].
    pub fn add(&mut self, datatype: impl Into<Datatype>) -> Result<TypeRef, ConstructionError> {
        let datatype = self.finalize(datatype.into())?;
        Ok(TypeRef::anonymous(self.arena.insert(datatype)))
    }

    // ─── Graph-dependent constructors ────────────────────────────────

    /// A range `[low, high]` over an ordered `base`.
    ///
    /// The bounds are validated by the base itself and stored in both
    /// canonical and comparable form.
    ///
    /// # Errors
    ///
    /// `Unresolved`, `NotOrdered`, `IncompatibleBound`, `OutsideBase` or
    /// `InvertedBounds`.
    pub fn range(
        &self,
        base: &TypeRef,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> Result<RangeType, ConstructionError> {
        RangeType::construct(&self.arena, base.clone(), &low.into(), &high.into())
    }

    /// A set over `base` with the default storage width.
    ///
    /// # Errors
    ///
    /// `Unresolved`, `NotOrdered` or `RangeTooLarge`.
    pub fn set(&self, base: &TypeRef) -> Result<SetType, ConstructionError> {
        self.set_with_width(base, DEFAULT_SET_WIDTH)
    }

    /// # Errors
    ///
    /// As [`SchemaBuilder::set`], plus `NonPositive` for a zero width.
    pub fn set_with_width(&self, base: &TypeRef, width: u32) -> Result<SetType, ConstructionError> {
        SetType::construct(&self.arena, base.clone(), width)
    }

    /// Append values to a defined enumerated datatype.
    ///
    /// Every range and set is re-validated against the grown value space.
    /// If any of them no longer holds, the extension is rolled back and the
    /// error returned.
    ///
    /// # Errors
    ///
    /// `NotExtensible` if `target` is not a defined enumerated type,
    /// `DuplicateLiteral` for a repeated value, or the first failing
    /// re-validation (typically `RangeTooLarge`).
    pub fn extend_enumerated<S: Into<String>>(
        &mut self,
        target: &TypeRef,
        values: impl IntoIterator<Item = S>,
    ) -> Result<(), ConstructionError> {
        let id = target.id();
        let Some(current) = self.arena.get(id) else {
            return Err(ConstructionError::NotExtensible {
                name: self.arena.label(id),
            });
        };
        let TypeKind::Enumerated(enumerated) = current.kind() else {
            return Err(ConstructionError::NotExtensible {
                name: current.label(),
            });
        };
        let mut grown = current.clone();
        *grown.kind_mut() = TypeKind::Enumerated(enumerated.extended(values)?);

        let Some(previous) = self.arena.replace(id, grown) else {
            return Err(ConstructionError::NotExtensible {
                name: self.arena.label(id),
            });
        };
        if let Err(e) = self.verify_dependents() {
            tracing::warn!(
                datatype = %self.arena.label(id),
                error = %e,
                "enumerated extension rolled back"
            );
            self.arena.replace(id, previous);
            return Err(e);
        }
        tracing::debug!(datatype = %self.arena.label(id), "extended enumerated datatype");
        Ok(())
    }

    // ─── Build ───────────────────────────────────────────────────────

    /// Freeze the graph.
    ///
    /// # Errors
    ///
    /// - `Undefined` listing every declared name that was never defined.
    /// - The first deferred construction check that fails.
    pub fn build(self) -> Result<Schema, GpdError> {
        let undefined: Vec<String> = self
            .symbols
            .iter()
            .filter(|(_, id)| !self.arena.is_defined(*id))
            .map(|(name, _)| name.to_string())
            .collect();
        if !undefined.is_empty() {
            return Err(SymbolError::Undefined { names: undefined }.into());
        }
        self.verify_dependents()?;
        for (_, datatype) in self.arena.iter() {
            match datatype.kind() {
                TypeKind::Aggregate(agg) => self.check_derivation(agg, true)?,
                TypeKind::Sequence(seq) => self.check_pattern(seq, true)?,
                _ => {}
            }
        }
        tracing::debug!(
            types = self.arena.len(),
            names = self.symbols.len(),
            "schema built"
        );
        Ok(Schema::new(self.arena, self.symbols))
    }

    // ─── Internal checks ─────────────────────────────────────────────

    fn finalize(&self, mut datatype: Datatype) -> Result<Datatype, ConstructionError> {
        match datatype.kind_mut() {
            TypeKind::Sequence(seq) => {
                self.check_pattern(seq, false)?;
                if seq.choices().is_some() {
                    self.canonicalize_choices(seq)?;
                }
            }
            TypeKind::Aggregate(agg) => self.check_derivation(agg, false)?,
            _ => {}
        }
        Ok(datatype)
    }

    /// Re-check every range and set against the current graph.
    fn verify_dependents(&self) -> Result<(), ConstructionError> {
        for (_, datatype) in self.arena.iter() {
            match datatype.kind() {
                TypeKind::Range(range) => range.recheck(&self.arena)?,
                TypeKind::Set(set) => set.check_width(&self.arena)?,
                _ => {}
            }
        }
        Ok(())
    }

    /// With `strict`, an undefined target is an error rather than deferred.
    fn check_derivation(&self, agg: &Aggregate, strict: bool) -> Result<(), ConstructionError> {
        for target in agg.derives_from() {
            let Some(datatype) = self.arena.get(target.id()) else {
                if strict {
                    return Err(ConstructionError::Unresolved {
                        name: target.to_string(),
                    });
                }
                continue;
            };
            let admitted = match datatype.kind() {
                TypeKind::Aggregate(parent) => agg.kind().may_derive_from(parent.kind()),
                _ => false,
            };
            if !admitted {
                return Err(ConstructionError::InvalidDerivation {
                    target: target.to_string(),
                    reason: format!("a {} cannot derive from {}", agg.kind(), datatype.label()),
                });
            }
        }
        Ok(())
    }

    fn check_pattern(&self, seq: &Sequence, strict: bool) -> Result<(), ConstructionError> {
        let Some(pattern) = seq.pattern() else {
            return Ok(());
        };
        let element = seq.element().id();
        if !self.arena.is_defined(element) {
            if strict {
                return Err(ConstructionError::Unresolved {
                    name: self.arena.label(element),
                });
            }
            return Ok(());
        }
        if self.arena.sequence_shape(element) == SequenceShape::Text {
            Ok(())
        } else {
            Err(ConstructionError::InvalidPattern {
                pattern: pattern.source().to_string(),
                reason: format!(
                    "element type {} is not a character type",
                    self.arena.label(element)
                ),
            })
        }
    }

    /// Validate each choice against the sequence without its choice list,
    /// store the canonical forms, and narrow the length facet to the
    /// shortest and longest choice.
    fn canonicalize_choices(&self, seq: &mut Sequence) -> Result<(), ConstructionError> {
        let Some(choices) = seq.choices() else {
            return Ok(());
        };
        let element = seq.element().id();
        if !self.arena.is_defined(element) {
            return Err(ConstructionError::Unresolved {
                name: self.arena.label(element),
            });
        }
        let mut open = Sequence::new(seq.element().clone(), seq.length());
        if let Some(pattern) = seq.pattern() {
            open = open.with_pattern(pattern.clone());
        }
        let mut canonical = Vec::with_capacity(choices.len());
        for choice in choices.choices() {
            let value = validate::sequence_to_value(&self.arena, &open, choice).map_err(|e| {
                ConstructionError::InvalidChoice {
                    choice: choice.to_string(),
                    reason: e.to_string(),
                }
            })?;
            canonical.push(value);
        }
        let counts: Vec<u64> = canonical.iter().filter_map(element_count).collect();
        if let (Some(min), Some(max)) = (counts.iter().min(), counts.iter().max()) {
            seq.set_length(Length::new(*min, Some(*max))?);
        }
        seq.set_choices(Enumeration::new(canonical)?);
        Ok(())
    }
}
