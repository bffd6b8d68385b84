//! # Range
//!
//! A sub-interval `[low, high]` of an ordered base type. The bounds are kept
//! twice: as canonical values of the base (what a user wrote, normalized) and
//! in comparable form (what validation and restriction compare against).

use gpd_core::{BoundedRange, Comparable, ConstructionError, Value, ValueErrorKind};

use crate::arena::TypeArena;
use crate::reference::TypeRef;
use crate::validate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeType {
    base: TypeRef,
    low: Value,
    high: Value,
    bounds: BoundedRange<Comparable>,
}

impl RangeType {
    /// # Errors
    ///
    /// - `Unresolved` if the base is declared but not defined.
    /// - `NotOrdered` if the base's value space is not ordered.
    /// - `IncompatibleBound` if a bound has the wrong host shape for the base.
    /// - `OutsideBase` if a bound is rejected by the base's own facets.
    /// - `InvertedBounds` if `low > high`.
    pub(crate) fn construct(
        arena: &TypeArena,
        base: TypeRef,
        low: &Value,
        high: &Value,
    ) -> Result<Self, ConstructionError> {
        let base_id = base.id();
        if arena.root(base_id).is_none() {
            return Err(ConstructionError::Unresolved {
                name: arena.label(base_id),
            });
        }
        if !arena.is_ordered(base_id) {
            return Err(ConstructionError::NotOrdered {
                base: arena.label(base_id),
            });
        }
        let (low, low_cmp) = canonical_bound(arena, &base, low)?;
        let (high, high_cmp) = canonical_bound(arena, &base, high)?;
        let bounds = BoundedRange::new(low_cmp, high_cmp)?;
        Ok(Self {
            base,
            low,
            high,
            bounds,
        })
    }

    /// Re-derive the bounds against the current state of the base.
    pub(crate) fn recheck(&self, arena: &TypeArena) -> Result<(), ConstructionError> {
        Self::construct(arena, self.base.clone(), &self.low, &self.high).map(|_| ())
    }

    pub fn base(&self) -> &TypeRef {
        &self.base
    }

    /// Lower bound as a canonical value of the base.
    pub fn low(&self) -> &Value {
        &self.low
    }

    /// Upper bound as a canonical value of the base.
    pub fn high(&self) -> &Value {
        &self.high
    }

    /// Bounds in comparable form.
    pub fn bounds(&self) -> &BoundedRange<Comparable> {
        &self.bounds
    }
}

fn canonical_bound(
    arena: &TypeArena,
    base: &TypeRef,
    raw: &Value,
) -> Result<(Value, Comparable), ConstructionError> {
    let canonical = validate::to_value(arena, base.id(), raw).map_err(|e| {
        if e.kind == ValueErrorKind::DataTypeMismatch {
            ConstructionError::IncompatibleBound {
                bound: raw.to_string(),
                expected: arena.representation(base.id()),
            }
        } else {
            ConstructionError::OutsideBase {
                bound: raw.to_string(),
                reason: e.to_string(),
            }
        }
    })?;
    let comparable =
        arena
            .comparable(base.id(), &canonical)
            .ok_or_else(|| ConstructionError::IncompatibleBound {
                bound: raw.to_string(),
                expected: arena.representation(base.id()),
            })?;
    Ok((canonical, comparable))
}
