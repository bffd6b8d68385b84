//! # gpd-schema — Schema Documents and the Dataset Façade
//!
//! Turns YAML or JSON schema documents into a frozen [`Schema`] and offers a
//! column view over it for row-oriented callers.
//!
//! ## Loading (`loader`)
//!
//! - [`build`] takes a parsed [`SchemaDocument`]; [`load_path`] reads one
//!   from disk first.
//! - Facet names are resolved through the static [`FACET_TABLE`]. An
//!   unknown name, or one not legal for the entry's category, is a load
//!   error rather than being ignored.
//! - Entries may reference each other in any order; see [`loader`] for the
//!   pass structure.
//!
//! ## Dataset (`dataset`)
//!
//! - [`RowSchema`] lists named columns, each with a datatype.
//! - [`RowSchema::validate_row`] validates every cell and reports all
//!   failures in a [`RowReport`].
//!
//! ## Crate Policy
//!
//! - Depends only on `gpd-core` and `gpd-types` internally.
//! - The loader never hands out a partially built schema.
//!
//! [`Schema`]: gpd_types::Schema

pub mod dataset;
pub mod document;
pub mod error;
pub mod facets;
pub mod loader;

pub use dataset::{Column, RowReport, RowSchema};
pub use document::{EntryCategory, MemberEntry, SchemaDocument, TypeEntry, TypeSpec};
pub use error::LoadError;
pub use facets::{FacetRule, FacetSet, FACET_TABLE};
pub use loader::{build, load_path};
