//! # Set
//!
//! A set of values drawn from an ordered, discrete base type, stored as a
//! bitset of fixed width. Construction succeeds only if the base's whole
//! value range fits the storage positions `0..width`.
//!
//! The width check depends on the base, and a named enumerated base can
//! still grow while a schema is being built. The builder therefore re-runs
//! [`SetType::check_width`] whenever a base is extended and once more when
//! the schema is frozen.

use gpd_core::{Comparable, ConstructionError};

use crate::arena::TypeArena;
use crate::reference::TypeRef;

/// Storage positions of a set unless configured otherwise (0..=255).
pub const DEFAULT_SET_WIDTH: u32 = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetType {
    base: TypeRef,
    width: u32,
}

impl SetType {
    /// # Errors
    ///
    /// - `NonPositive` for a zero width.
    /// - `Unresolved` if the base is declared but not defined.
    /// - `NotOrdered` if the base's value space is not ordered.
    /// - `RangeTooLarge` if the base's values do not fit `0..width`.
    pub(crate) fn construct(
        arena: &TypeArena,
        base: TypeRef,
        width: u32,
    ) -> Result<Self, ConstructionError> {
        if width == 0 {
            return Err(ConstructionError::NonPositive {
                what: "set width",
                value: width.to_string(),
            });
        }
        let set = Self { base, width };
        set.check_width(arena)?;
        Ok(set)
    }

    /// Verify the base's current value range fits the storage width.
    pub(crate) fn check_width(&self, arena: &TypeArena) -> Result<(), ConstructionError> {
        let base_id = self.base.id();
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
        let Some((low, high)) = arena.value_bounds(base_id) else {
            return Err(ConstructionError::NotOrdered {
                base: arena.label(base_id),
            });
        };
        let fits = matches!((&low, &high), (Comparable::Integer(_), Comparable::Integer(_)))
            && low >= Comparable::from(0)
            && high < Comparable::from(i64::from(self.width));
        if fits {
            Ok(())
        } else {
            Err(ConstructionError::RangeTooLarge {
                low: low.to_string(),
                high: high.to_string(),
                width: self.width,
            })
        }
    }

    pub fn base(&self) -> &TypeRef {
        &self.base
    }

    pub fn width(&self) -> u32 {
        self.width
    }
}
