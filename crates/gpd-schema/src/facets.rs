//! # Facet Configuration Table
//!
//! The legal facet names of a document entry, per category, each with the
//! setter that records it. Resolved statically: a facet name that is not in
//! [`FACET_TABLE`] is an `UnknownFacet`, one listed for other categories only
//! is an `IllegalFacet`.
//!
//! | Facet | Categories |
//! |---|---|
//! | `minInclusive`, `maxInclusive` | integral, real, range |
//! | `minLength`, `maxLength`, `length` | sequence |
//! | `pattern` | sequence |
//! | `repertoire` | character |
//! | `precision` | real |
//! | `enumeration` | integral, real, sequence |

use std::collections::BTreeMap;

use gpd_core::{Pattern, Repertoire, Value};

use crate::document::EntryCategory;
use crate::error::LoadError;

/// Facet values collected from one entry.
#[derive(Debug, Clone, Default)]
pub struct FacetSet {
    pub min_inclusive: Option<Value>,
    pub max_inclusive: Option<Value>,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub pattern: Option<Pattern>,
    pub repertoire: Option<Repertoire>,
    pub precision: Option<u32>,
    pub enumeration: Option<Vec<Value>>,
}

type Setter = fn(&mut FacetSet, &serde_json::Value) -> Result<(), String>;

pub struct FacetRule {
    pub name: &'static str,
    pub categories: &'static [EntryCategory],
    pub apply: Setter,
}

const ORDERED: &[EntryCategory] = &[
    EntryCategory::Integral,
    EntryCategory::Real,
    EntryCategory::Range,
];
const SEQUENCE: &[EntryCategory] = &[EntryCategory::Sequence];
const CHOICES: &[EntryCategory] = &[
    EntryCategory::Integral,
    EntryCategory::Real,
    EntryCategory::Sequence,
];

pub static FACET_TABLE: &[FacetRule] = &[
    FacetRule {
        name: "minInclusive",
        categories: ORDERED,
        apply: |set, v| {
            set.min_inclusive = Some(scalar(v)?);
            Ok(())
        },
    },
    FacetRule {
        name: "maxInclusive",
        categories: ORDERED,
        apply: |set, v| {
            set.max_inclusive = Some(scalar(v)?);
            Ok(())
        },
    },
    FacetRule {
        name: "minLength",
        categories: SEQUENCE,
        apply: |set, v| {
            set.min_length = Some(count(v)?);
            Ok(())
        },
    },
    FacetRule {
        name: "maxLength",
        categories: SEQUENCE,
        apply: |set, v| {
            set.max_length = Some(count(v)?);
            Ok(())
        },
    },
    FacetRule {
        name: "length",
        categories: SEQUENCE,
        apply: |set, v| {
            let n = count(v)?;
            set.min_length = Some(n);
            set.max_length = Some(n);
            Ok(())
        },
    },
    FacetRule {
        name: "pattern",
        categories: SEQUENCE,
        apply: |set, v| {
            let source = v.as_str().ok_or("expected a string")?;
            set.pattern = Some(Pattern::new(source).map_err(|e| e.to_string())?);
            Ok(())
        },
    },
    FacetRule {
        name: "repertoire",
        categories: &[EntryCategory::Character],
        apply: |set, v| {
            let name = v.as_str().ok_or("expected a repertoire name")?;
            let repertoire =
                Repertoire::by_name(name).ok_or_else(|| format!("unknown repertoire '{name}'"))?;
            set.repertoire = Some(repertoire);
            Ok(())
        },
    },
    FacetRule {
        name: "precision",
        categories: &[EntryCategory::Real],
        apply: |set, v| {
            let bits = v
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or("expected a number of bits")?;
            set.precision = Some(bits);
            Ok(())
        },
    },
    FacetRule {
        name: "enumeration",
        categories: CHOICES,
        apply: |set, v| {
            let items = v.as_array().ok_or("expected a list of literals")?;
            set.enumeration = Some(items.iter().map(Value::from_json).collect());
            Ok(())
        },
    },
];

fn scalar(v: &serde_json::Value) -> Result<Value, String> {
    match v {
        serde_json::Value::Array(_) | serde_json::Value::Object(_) | serde_json::Value::Null => {
            Err("expected a scalar bound".to_string())
        }
        other => Ok(Value::from_json(other)),
    }
}

fn count(v: &serde_json::Value) -> Result<u64, String> {
    v.as_u64()
        .ok_or_else(|| "expected a non-negative integer".to_string())
}

pub fn rule(name: &str) -> Option<&'static FacetRule> {
    FACET_TABLE.iter().find(|r| r.name == name)
}

impl FacetSet {
    /// Apply every facet of an entry through the table.
    ///
    /// # Errors
    ///
    /// `UnknownFacet`, `IllegalFacet` or `InvalidFacetValue`.
    pub fn collect(
        entry: &str,
        category: EntryCategory,
        facets: &BTreeMap<String, serde_json::Value>,
    ) -> Result<Self, LoadError> {
        let mut set = Self::default();
        for (name, value) in facets {
            let Some(rule) = rule(name) else {
                return Err(LoadError::UnknownFacet {
                    entry: entry.to_string(),
                    facet: name.clone(),
                });
            };
            if !rule.categories.contains(&category) {
                return Err(LoadError::IllegalFacet {
                    entry: entry.to_string(),
                    facet: name.clone(),
                    category: category.to_string(),
                });
            }
            (rule.apply)(&mut set, value).map_err(|reason| LoadError::InvalidFacetValue {
                entry: entry.to_string(),
                facet: name.clone(),
                reason,
            })?;
        }
        Ok(set)
    }
}
