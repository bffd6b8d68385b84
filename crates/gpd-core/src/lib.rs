//! # gpd-core — Foundational Types for the Datatype Engine
//!
//! This crate is the leaf of the gpd workspace. It defines the vocabulary
//! every other crate speaks: the host value model that raw input arrives in
//! and canonical output leaves in, the error taxonomy, the facet values that
//! constrain a datatype, and the character repertoires used by character and
//! string types.
//!
//! ## Key Design Principles
//!
//! 1. **Facets are data, not subclasses.** `BoundedRange`, `Length`,
//!    `Pattern`, `Enumeration` and `Repertoire` are plain values with
//!    validated constructors. A "short" is an integral type whose range
//!    happens to be `-32768..=32767`, not a distinct type.
//!
//! 2. **One error per failure.** A rejected value reports exactly one
//!    [`ValueErrorKind`] plus the [`Facet`] it violated, never a generic
//!    failure.
//!
//! 3. **Arbitrary precision bounds.** Integral bounds are `BigInt` and real
//!    bounds are `BigDecimal`, so presets beyond 64 bits are expressible.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `gpd-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod bound;
pub mod error;
pub mod facet;
pub mod repertoire;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use bigdecimal::num_bigint::BigInt;
pub use bigdecimal::BigDecimal;
pub use bound::Comparable;
pub use error::{
    ConstructionError, Facet, GpdError, PathSegment, SymbolError, ValueError, ValueErrorKind,
    ValuePath,
};
pub use facet::{BoundedRange, Enumeration, Length, Pattern};
pub use repertoire::Repertoire;
pub use value::{Representation, Value};
