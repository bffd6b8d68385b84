//! # Schema Document Model
//!
//! The serde model of a schema document. YAML and JSON share it:
//!
//! ```yaml
//! types:
//!   - name: Month
//!     category: range
//!     base: integer
//!     facets: { minInclusive: 1, maxInclusive: 12 }
//!   - name: Person
//!     category: record
//!     members:
//!       - { name: name, type: { category: sequence, element: latin1 } }
//!       - { name: born, type: Month }
//! ```
//!
//! Wherever a type is referenced (`element`, `base`, member `type`) either a
//! name or an inline anonymous entry may be given.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDocument {
    #[serde(default)]
    pub types: Vec<TypeEntry>,
}

/// Category keyword of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryCategory {
    Boolean,
    Integral,
    Real,
    Character,
    Enumerated,
    Sequence,
    Record,
    Table,
    Class,
    Interface,
    Range,
    Set,
}

impl fmt::Display for EntryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Boolean => "boolean",
            Self::Integral => "integral",
            Self::Real => "real",
            Self::Character => "character",
            Self::Enumerated => "enumerated",
            Self::Sequence => "sequence",
            Self::Record => "record",
            Self::Table => "table",
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Range => "range",
            Self::Set => "set",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TypeEntry {
    /// Required at top level, absent for inline entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub category: EntryCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub facets: BTreeMap<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<TypeSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<TypeSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<MemberEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub derives_from: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
    #[serde(default)]
    pub packed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

/// A type reference in a document: a name, or an inline entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeSpec {
    Name(String),
    Inline(Box<TypeEntry>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemberEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub type_spec: TypeSpec,
}

impl SchemaDocument {
    /// # Errors
    ///
    /// Returns `Parse` if the text is not a valid document.
    pub fn from_yaml_str(text: &str) -> Result<Self, LoadError> {
        serde_yaml::from_str(text).map_err(|e| LoadError::Parse {
            format: "YAML",
            reason: e.to_string(),
        })
    }

    /// # Errors
    ///
    /// Returns `Parse` if the text is not a valid document.
    pub fn from_json_str(text: &str) -> Result<Self, LoadError> {
        serde_json::from_str(text).map_err(|e| LoadError::Parse {
            format: "JSON",
            reason: e.to_string(),
        })
    }

    /// Read a document, choosing the parser by extension (`.json` is JSON,
    /// anything else YAML).
    ///
    /// # Errors
    ///
    /// `DocumentLoad` if the file cannot be read, `Parse` if it is malformed.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let text = std::fs::read_to_string(path).map_err(|e| LoadError::DocumentLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_yaml_str(&text)
        }
    }
}
