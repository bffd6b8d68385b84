//! # Document Loader
//!
//! `build(document) -> Schema`: the one-shot batch that turns a schema
//! document into a frozen type graph.
//!
//! ## Algorithm
//!
//! 1. Declare every top-level name, so entries may reference each other in
//!    any order and recursively.
//! 2. Define each entry. An entry that needs a dependency's *value space*
//!    (a range or set base, the element of a sequence with choices) waits
//!    while the dependency is only declared, and is retried on the next
//!    pass before anything of it is added to the graph. Passes repeat until
//!    every entry is defined or a pass makes no progress.
//! 3. `SchemaBuilder::build()` rejects dangling names and re-runs the
//!    deferred checks.
//!
//! A referenced name that the document does not declare may be a preset:
//! `boolean`, `octet`, `short`, `unsignedShort`, `integer`, `unsignedInt`,
//! `long`, `single`, `double`, and the character repertoires `ascii`,
//! `latin1`, `ucs2`, `unicode`.

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use gpd_core::{BigDecimal, BigInt, ConstructionError, Length, Repertoire, SymbolError, Value};
use gpd_types::{
    Aggregate, AggregateKind, Character, Datatype, Enumerated, Integral, Member, Real, Schema,
    SchemaBuilder, Sequence, TypeRef, DEFAULT_SET_WIDTH,
};

use crate::document::{EntryCategory, SchemaDocument, TypeEntry, TypeSpec};
use crate::error::LoadError;
use crate::facets::FacetSet;

/// Build a frozen schema from a document.
///
/// # Errors
///
/// Any [`LoadError`]; the first failing entry stops the load.
pub fn build(document: &SchemaDocument) -> Result<Schema, LoadError> {
    let mut loader = Loader::default();

    let mut pending: Vec<(&str, &TypeEntry)> = Vec::with_capacity(document.types.len());
    for (index, entry) in document.types.iter().enumerate() {
        let Some(name) = entry.name.as_deref() else {
            return Err(LoadError::MissingField {
                entry: format!("types[{index}]"),
                field: "name",
            });
        };
        if loader.builder.lookup(name).is_ok() {
            return Err(SymbolError::DuplicateDefinition {
                name: name.to_string(),
            }
            .into());
        }
        loader.builder.declare(name);
        pending.push((name, entry));
    }
    tracing::debug!(entries = pending.len(), "declared document names");

    let mut pass = 1;
    while !pending.is_empty() {
        let before = pending.len();
        let mut deferred = Vec::new();
        for (name, entry) in pending {
            if let Some(dependency) = loader.waiting_on(entry) {
                tracing::debug!(name, dependency, pass, "entry deferred");
                deferred.push((name, entry));
                continue;
            }
            match loader.define_entry(name, entry) {
                Ok(()) => {}
                Err(e) if e.is_unresolved() => {
                    tracing::debug!(name, pass, error = %e, "entry deferred");
                    deferred.push((name, entry));
                }
                Err(e) => return Err(e),
            }
        }
        if deferred.len() == before {
            return Err(LoadError::Unresolvable {
                names: deferred.iter().map(|(name, _)| name.to_string()).collect(),
            });
        }
        pending = deferred;
        pass += 1;
    }

    let schema = loader.builder.build()?;
    tracing::debug!(passes = pass - 1, "schema document loaded");
    Ok(schema)
}

/// Read and build a document from a file.
///
/// # Errors
///
/// As [`SchemaDocument::from_path`] and [`build`].
pub fn load_path(path: &Path) -> Result<Schema, LoadError> {
    let document = SchemaDocument::from_path(path)?;
    tracing::debug!(path = %path.display(), types = document.types.len(), "parsed schema document");
    build(&document)
}

/// Builder state for one document. Each preset is added once and shared by
/// every entry that names it.
#[derive(Debug, Default)]
struct Loader {
    builder: SchemaBuilder,
    presets: HashMap<String, TypeRef>,
}

impl Loader {
    /// The first declared name whose value space `entry` needs before it can
    /// be defined, while that name is still undefined. Inline entries are
    /// searched too.
    fn waiting_on<'e>(&self, entry: &'e TypeEntry) -> Option<&'e str> {
        let needs_value_space = match entry.category {
            EntryCategory::Range | EntryCategory::Set => entry.base.as_ref(),
            EntryCategory::Sequence if entry.facets.contains_key("enumeration") => {
                entry.element.as_ref()
            }
            _ => None,
        };
        if let Some(TypeSpec::Name(name)) = needs_value_space {
            if self.builder.lookup(name).is_ok() && !self.builder.is_defined(name) {
                return Some(name);
            }
        }
        entry
            .element
            .iter()
            .chain(entry.base.iter())
            .chain(entry.members.iter().map(|m| &m.type_spec))
            .find_map(|spec| match spec {
                TypeSpec::Inline(inline) => self.waiting_on(inline),
                TypeSpec::Name(_) => None,
            })
    }

    fn define_entry(&mut self, name: &str, entry: &TypeEntry) -> Result<(), LoadError> {
        let datatype = self.to_datatype(name, entry)?;
        self.builder
            .define(name, datatype)
            .map_err(|e| LoadError::from_gpd(name, e))?;
        Ok(())
    }

    fn resolve(&mut self, context: &str, spec: &TypeSpec) -> Result<TypeRef, LoadError> {
        match spec {
            TypeSpec::Name(name) => {
                if let Ok(found) = self.builder.lookup(name) {
                    return Ok(found);
                }
                if let Some(found) = self.presets.get(name) {
                    return Ok(found.clone());
                }
                let Some(datatype) = preset(name) else {
                    return Err(SymbolError::NameNotFound { name: name.clone() }.into());
                };
                let added = self
                    .builder
                    .add(datatype)
                    .map_err(|e| LoadError::construction(context, e))?;
                self.presets.insert(name.clone(), added.clone());
                Ok(added)
            }
            TypeSpec::Inline(entry) => {
                let label = format!("{context} (inline {})", entry.category);
                let datatype = self.to_datatype(&label, entry)?;
                self.builder
                    .add(datatype)
                    .map_err(|e| LoadError::construction(&label, e))
            }
        }
    }

    fn to_datatype(&mut self, label: &str, entry: &TypeEntry) -> Result<Datatype, LoadError> {
        let facets = FacetSet::collect(label, entry.category, &entry.facets)?;
        let invalid = |e: ConstructionError| LoadError::construction(label, e);

        let datatype: Datatype = match entry.category {
            EntryCategory::Boolean => Datatype::boolean(),
            EntryCategory::Integral => integral(label, &facets)?.into(),
            EntryCategory::Real => real(label, &facets)?.into(),
            EntryCategory::Character => {
                let repertoire = facets.repertoire.clone().unwrap_or_else(Repertoire::unicode);
                Character::new(repertoire).into()
            }
            EntryCategory::Enumerated => Enumerated::new(entry.values.iter().cloned())
                .map_err(invalid)?
                .into(),
            EntryCategory::Sequence => {
                let spec = required(label, "element", entry.element.as_ref())?;
                let element = self.resolve(label, spec)?;
                let length = Length::new(facets.min_length.unwrap_or(0), facets.max_length)
                    .map_err(invalid)?;
                let mut seq = Sequence::new(element, length);
                if let Some(pattern) = facets.pattern {
                    seq = seq.with_pattern(pattern);
                }
                if let Some(choices) = facets.enumeration {
                    seq = seq.with_choices(choices).map_err(invalid)?;
                }
                seq.into()
            }
            EntryCategory::Record
            | EntryCategory::Table
            | EntryCategory::Class
            | EntryCategory::Interface => {
                let mut members = Vec::with_capacity(entry.members.len());
                for member in &entry.members {
                    let context = format!("{label}.{}", member.name);
                    let type_ref = self.resolve(&context, &member.type_spec)?;
                    members.push(Member::new(member.name.clone(), type_ref));
                }
                let mut derives = Vec::with_capacity(entry.derives_from.len());
                for target in &entry.derives_from {
                    derives.push(self.builder.lookup(target)?);
                }
                Aggregate::derivable(aggregate_kind(entry.category), members, derives)
                    .map_err(invalid)?
                    .packed(entry.packed)
                    .into()
            }
            EntryCategory::Range => {
                let spec = required(label, "base", entry.base.as_ref())?;
                let base = self.resolve(label, spec)?;
                let low = required(label, "minInclusive", facets.min_inclusive.as_ref())?;
                let high = required(label, "maxInclusive", facets.max_inclusive.as_ref())?;
                self.builder
                    .range(&base, low.clone(), high.clone())
                    .map_err(invalid)?
                    .into()
            }
            EntryCategory::Set => {
                let spec = required(label, "base", entry.base.as_ref())?;
                let base = self.resolve(label, spec)?;
                let width = entry.width.unwrap_or(DEFAULT_SET_WIDTH);
                self.builder
                    .set_with_width(&base, width)
                    .map_err(invalid)?
                    .into()
            }
        };
        Ok(match &entry.comment {
            Some(comment) => datatype.with_comment(comment.clone()),
            None => datatype,
        })
    }
}

fn preset(name: &str) -> Option<Datatype> {
    let datatype = match name {
        "boolean" => Datatype::boolean(),
        "octet" => Integral::octet().into(),
        "short" => Integral::short().into(),
        "unsignedShort" => Integral::unsigned_short().into(),
        "integer" => Integral::integer().into(),
        "unsignedInt" => Integral::unsigned_int().into(),
        "long" => Integral::long().into(),
        "single" => Real::single().into(),
        "double" => Real::double().into(),
        "ascii" => Character::ascii().into(),
        "latin1" => Character::latin1().into(),
        "ucs2" => Character::ucs2().into(),
        "unicode" => Character::unicode().into(),
        _ => return None,
    };
    Some(datatype)
}

fn required<'e, T>(
    entry: &str,
    field: &'static str,
    value: Option<&'e T>,
) -> Result<&'e T, LoadError> {
    value.ok_or_else(|| LoadError::MissingField {
        entry: entry.to_string(),
        field,
    })
}

fn aggregate_kind(category: EntryCategory) -> AggregateKind {
    match category {
        EntryCategory::Table => AggregateKind::Table,
        EntryCategory::Class => AggregateKind::Class,
        EntryCategory::Interface => AggregateKind::Interface,
        _ => AggregateKind::Record,
    }
}

// ─── Numeric facets ──────────────────────────────────────────────────

fn facet_error(label: &str, facet: &str, reason: String) -> LoadError {
    LoadError::InvalidFacetValue {
        entry: label.to_string(),
        facet: facet.to_string(),
        reason,
    }
}

fn integer_of(label: &str, facet: &str, value: &Value) -> Result<BigInt, LoadError> {
    match value {
        Value::Integer(i) => Ok(i.clone()),
        Value::Text(s) => BigInt::from_str(s.trim())
            .map_err(|_| facet_error(label, facet, format!("{s:?} is not an integer"))),
        other => Err(facet_error(label, facet, format!("{other} is not an integer"))),
    }
}

fn decimal_of(label: &str, facet: &str, value: &Value) -> Result<BigDecimal, LoadError> {
    match value {
        Value::Decimal(d) => Ok(d.clone()),
        Value::Integer(i) => Ok(BigDecimal::from(i.clone())),
        Value::Text(s) => BigDecimal::from_str(s.trim())
            .map_err(|_| facet_error(label, facet, format!("{s:?} is not a decimal number"))),
        other => Err(facet_error(label, facet, format!("{other} is not a decimal number"))),
    }
}

/// Bounds default to the 64-bit signed range.
fn integral(label: &str, facets: &FacetSet) -> Result<Integral, LoadError> {
    let long = Integral::long();
    let min = match &facets.min_inclusive {
        Some(v) => integer_of(label, "minInclusive", v)?,
        None => long.min().clone(),
    };
    let max = match &facets.max_inclusive {
        Some(v) => integer_of(label, "maxInclusive", v)?,
        None => long.max().clone(),
    };
    let mut t = Integral::new(min, max).map_err(|e| LoadError::construction(label, e))?;
    if let Some(choices) = &facets.enumeration {
        let choices = choices
            .iter()
            .map(|v| integer_of(label, "enumeration", v))
            .collect::<Result<Vec<_>, _>>()?;
        t = t
            .with_choices(choices)
            .map_err(|e| LoadError::construction(label, e))?;
    }
    Ok(t)
}

/// Precision and bounds default to those of `double`.
fn real(label: &str, facets: &FacetSet) -> Result<Real, LoadError> {
    let double = Real::double();
    let precision = facets.precision.unwrap_or(double.precision_bits());
    let min = match &facets.min_inclusive {
        Some(v) => decimal_of(label, "minInclusive", v)?,
        None => double.range().min_inclusive().clone(),
    };
    let max = match &facets.max_inclusive {
        Some(v) => decimal_of(label, "maxInclusive", v)?,
        None => double.range().max_inclusive().clone(),
    };
    let mut t = Real::new(precision, min, max).map_err(|e| LoadError::construction(label, e))?;
    if let Some(choices) = &facets.enumeration {
        let choices = choices
            .iter()
            .map(|v| decimal_of(label, "enumeration", v))
            .collect::<Result<Vec<_>, _>>()?;
        t = t
            .with_choices(choices)
            .map_err(|e| LoadError::construction(label, e))?;
    }
    Ok(t)
}
