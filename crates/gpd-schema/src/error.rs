//! # Loader Errors
//!
//! Every failure carries the entry it arose in, so a user can find the
//! offending line of a schema document without a debugger.

use gpd_core::{ConstructionError, GpdError, SymbolError};
use thiserror::Error;

/// Error while reading or building a schema document.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The document file could not be read.
    #[error("document load error for '{path}': {reason}")]
    DocumentLoad {
        /// Path to the document.
        path: String,
        /// Reason the document could not be read.
        reason: String,
    },

    /// The document is not valid YAML/JSON or does not match the document
    /// model.
    #[error("failed to parse {format} schema document: {reason}")]
    Parse {
        /// `YAML` or `JSON`.
        format: &'static str,
        /// Parser diagnostic.
        reason: String,
    },

    /// A required field is absent for the entry's category.
    #[error("{entry}: missing required field '{field}'")]
    MissingField {
        /// The entry name or position.
        entry: String,
        /// The absent field.
        field: &'static str,
    },

    /// A facet name is not in the facet table.
    #[error("{entry}: unknown facet '{facet}'")]
    UnknownFacet {
        /// The entry name or position.
        entry: String,
        /// The unrecognized facet name.
        facet: String,
    },

    /// A facet exists but is not legal for the entry's category.
    #[error("{entry}: facet '{facet}' is not legal for category {category}")]
    IllegalFacet {
        /// The entry name or position.
        entry: String,
        /// The facet name.
        facet: String,
        /// The entry's category.
        category: String,
    },

    /// A facet value has the wrong shape.
    #[error("{entry}: invalid value for facet '{facet}': {reason}")]
    InvalidFacetValue {
        /// The entry name or position.
        entry: String,
        /// The facet name.
        facet: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// The datatype described by an entry could not be constructed.
    #[error("{entry}: {source}")]
    Construction {
        /// The entry name or position.
        entry: String,
        /// The underlying construction error.
        #[source]
        source: ConstructionError,
    },

    /// Entries whose dependencies never became defined.
    #[error("entries could not be resolved: {}", names.join(", "))]
    Unresolvable {
        /// The stuck entries, in document order.
        names: Vec<String>,
    },

    /// Symbol table failure.
    #[error(transparent)]
    Symbol(#[from] SymbolError),

    /// Failure reported by the type graph at build time.
    #[error(transparent)]
    Gpd(#[from] GpdError),
}

impl LoadError {
    pub(crate) fn construction(entry: &str, source: ConstructionError) -> Self {
        Self::Construction {
            entry: entry.to_string(),
            source,
        }
    }

    /// Attribute a builder error to `entry`.
    pub(crate) fn from_gpd(entry: &str, error: GpdError) -> Self {
        match error {
            GpdError::Construction(source) => Self::construction(entry, source),
            GpdError::Symbol(source) => Self::Symbol(source),
            other => Self::Gpd(other),
        }
    }

    /// True if the failure is a dependency that is declared but not yet
    /// defined, i.e. the entry may succeed on a later pass.
    pub(crate) fn is_unresolved(&self) -> bool {
        matches!(
            self,
            Self::Construction {
                source: ConstructionError::Unresolved { .. },
                ..
            }
        )
    }
}
