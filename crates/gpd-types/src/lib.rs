//! # gpd-types — Datatype Graph, Validation and Comparison
//!
//! Datatypes are stored in a [`TypeArena`] and addressed by [`TypeId`]
//! handles. Wherever one type points at another it holds a [`TypeRef`],
//! either named through the [`SymbolTable`] or anonymous. Cyclic graphs are
//! ordinary data.
//!
//! ## Lifecycle
//!
//! ```text
//! SchemaBuilder ──declare/define/add──▶ build() ──▶ Schema (read-only)
//!                                                    ├── to_value
//!                                                    ├── equals
//!                                                    └── is_restriction_of
//! ```
//!
//! ## Categories
//!
//! | Category | Ordered | Canonical value |
//! |---|---|---|
//! | Boolean | no | `Boolean` |
//! | Integral | yes | `Integer` |
//! | Real | yes | `Decimal`, rounded to the precision |
//! | Character | yes | `Character` |
//! | Enumerated | yes | `Symbol` |
//! | Sequence | no | `Text`, `Octets` or `List` by element type |
//! | Aggregate | no | `Record`, or `List` of records for a table |
//! | Range | as base | as base |
//! | Set | no | sorted, deduplicated `List` |
//!
//! ## Crate Policy
//!
//! - Validation and comparison never mutate the graph.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod aggregate;
pub mod arena;
pub mod builder;
mod compare;
pub mod datatype;
pub mod primitive;
pub mod range;
pub mod reference;
pub mod schema;
pub mod sequence;
pub mod set;
pub mod symbol;
mod validate;

pub use aggregate::{Aggregate, AggregateKind, Member};
pub use arena::TypeArena;
pub use builder::SchemaBuilder;
pub use datatype::{Category, Datatype, TypeKind};
pub use primitive::{Character, Enumerated, Integral, Real};
pub use range::RangeType;
pub use reference::{TypeId, TypeRef};
pub use schema::Schema;
pub use sequence::{Sequence, SequenceShape};
pub use set::{SetType, DEFAULT_SET_WIDTH};
pub use symbol::SymbolTable;
