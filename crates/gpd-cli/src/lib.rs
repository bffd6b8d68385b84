//! # gpd-cli — General Purpose Datatypes Command-Line Interface
//!
//! Loads a schema document and answers questions about it from the shell.
//!
//! ## Subcommands
//!
//! - `check` — load a document and report whether it builds
//! - `types` — list declared names with their categories
//! - `validate` — convert raw JSON values through a named datatype
//! - `compare` — structural equality and restriction between two types
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handlers.
//! - Handlers write to a caller-supplied sink and delegate to `gpd-schema`
//!   and `gpd-types`; no datatype logic lives here.
//! - A handler returns `Ok(false)` when the command ran but its subject
//!   failed (a rejected value), so `main` can exit non-zero.

use std::path::Path;

use anyhow::Context;
use gpd_types::Schema;

pub mod check;
pub mod compare;
pub mod types;
pub mod validate;

/// Load a schema document, attaching the path to any error.
///
/// # Errors
///
/// Any load error from [`gpd_schema::load_path`].
pub fn load_schema(path: &Path) -> anyhow::Result<Schema> {
    gpd_schema::load_path(path).with_context(|| format!("loading schema {}", path.display()))
}

#[cfg(test)]
pub(crate) fn sample_schema() -> Schema {
    let doc = gpd_schema::SchemaDocument::from_yaml_str(
        r#"
types:
  - { name: Digit, category: integral, facets: { minInclusive: 0, maxInclusive: 9 } }
  - { name: Small, category: range, base: Digit, comment: "0 to 3", facets: { minInclusive: 0, maxInclusive: 3 } }
  - { name: Code, category: sequence, element: ascii, facets: { length: 2, pattern: "[A-Z]+" } }
"#,
    )
    .unwrap();
    gpd_schema::build(&doc).unwrap()
}
