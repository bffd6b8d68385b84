//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types used throughout gpd. All errors use `thiserror`
//! for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Construction errors are fatal to the constructor call that raised them;
//!   no half-built datatype escapes.
//! - Symbol errors carry the offending qualified name.
//! - Value errors are always recovered into a result: one kind, the violated
//!   facet, and the path to the offending element inside the value.

use std::fmt;

use thiserror::Error;

use crate::value::Representation;

/// Top-level error type for gpd.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GpdError {
    /// A datatype could not be constructed.
    #[error("construction error: {0}")]
    Construction(#[from] ConstructionError),

    /// Symbol table declare/define/lookup failed.
    #[error("symbol error: {0}")]
    Symbol(#[from] SymbolError),

    /// A value was rejected by a datatype.
    #[error("value error: {0}")]
    Value(#[from] ValueError),
}

/// Invalid facet combination detected while a datatype is being defined.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    /// A lower bound exceeds its upper bound.
    #[error("{facet}: minimum {min} exceeds maximum {max}")]
    InvertedBounds {
        /// The facet whose bounds are inverted.
        facet: Facet,
        /// The lower bound as given.
        min: String,
        /// The upper bound as given.
        max: String,
    },

    /// A precision, width or similar size parameter is zero or negative.
    #[error("{what} must be positive, got {value}")]
    NonPositive {
        /// The parameter name.
        what: &'static str,
        /// The rejected value.
        value: String,
    },

    /// A range or set base does not have an ordered value space.
    #[error("base type {base} is not ordered")]
    NotOrdered {
        /// Name or category of the base type.
        base: String,
    },

    /// A bound value does not fit the base type's native representation.
    #[error("bound {bound} is not compatible with base representation {expected}")]
    IncompatibleBound {
        /// The rejected bound, rendered.
        bound: String,
        /// The representation the base type accepts.
        expected: Representation,
    },

    /// A bound value is valid for the base representation but rejected by
    /// the base type's own facets.
    #[error("bound {bound} lies outside the base type: {reason}")]
    OutsideBase {
        /// The rejected bound, rendered.
        bound: String,
        /// The base type's diagnostic.
        reason: String,
    },

    /// A set base has more values than the set's storage width can hold.
    #[error("base value range {low}..{high} does not fit set storage width {width}")]
    RangeTooLarge {
        /// Lowest comparable value of the base.
        low: String,
        /// Highest comparable value of the base.
        high: String,
        /// Number of storage positions available.
        width: u32,
    },

    /// Two members of one aggregate share a name.
    #[error("duplicate member name '{name}'")]
    DuplicateMember {
        /// The repeated member name.
        name: String,
    },

    /// Two literals of one enumeration are equal.
    #[error("duplicate literal {literal}")]
    DuplicateLiteral {
        /// The repeated literal, rendered.
        literal: String,
    },

    /// An enumeration or choice list has no entries.
    #[error("enumeration must contain at least one literal")]
    EmptyEnumeration,

    /// A pattern facet is not a valid regular expression.
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The pattern source.
        pattern: String,
        /// Compiler diagnostic.
        reason: String,
    },

    /// A literal choice is not itself a valid value of the type.
    #[error("choice {choice} is not a valid value: {reason}")]
    InvalidChoice {
        /// The rejected choice, rendered.
        choice: String,
        /// Why the choice was rejected.
        reason: String,
    },

    /// A derivation target is not a class or interface, or the deriving
    /// aggregate kind does not admit derivation.
    #[error("invalid derivation from {target}: {reason}")]
    InvalidDerivation {
        /// The derivation target.
        target: String,
        /// Why the derivation was rejected.
        reason: String,
    },

    /// A referenced type is declared but not yet defined.
    #[error("type '{name}' is declared but not defined")]
    Unresolved {
        /// The unresolved name.
        name: String,
    },

    /// Values can only be appended to an enumerated datatype.
    #[error("type '{name}' is not an enumerated type and cannot be extended")]
    NotExtensible {
        /// The target of the extension.
        name: String,
    },

    /// A codepoint range lies outside the Unicode scalar space.
    #[error("invalid codepoint range {low:#x}..={high:#x}")]
    InvalidCodepoints {
        /// Range start.
        low: u32,
        /// Range end.
        high: u32,
    },
}

/// Error in the name-to-type symbol table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SymbolError {
    /// Lookup of a name that was never declared.
    #[error("name '{name}' not found")]
    NameNotFound {
        /// The requested name.
        name: String,
    },

    /// A name was bound to a type twice.
    #[error("name '{name}' is already defined")]
    DuplicateDefinition {
        /// The name bound twice.
        name: String,
    },

    /// Names declared but never defined when the table was frozen.
    #[error("declared but never defined: {}", names.join(", "))]
    Undefined {
        /// The dangling names, in declaration order.
        names: Vec<String>,
    },
}

// ─── Value Errors ────────────────────────────────────────────────────

/// Classification of a rejected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueErrorKind {
    /// The raw value's host shape does not match the type's representation.
    DataTypeMismatch,
    /// A sequence has too few or too many elements.
    BoundsRange,
    /// An ordered value lies outside the type's inclusive bounds.
    NumericOutOfRange,
    /// A string does not match the type's pattern.
    PatternMismatch,
    /// A character lies outside the type's repertoire.
    CharacterNotInRepertoire,
    /// The value is not one of the type's closed list of choices.
    NoMatchingChoice,
}

impl fmt::Display for ValueErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::DataTypeMismatch => "DataTypeMismatch",
            Self::BoundsRange => "BoundsRange",
            Self::NumericOutOfRange => "NumericOutOfRange",
            Self::PatternMismatch => "PatternMismatch",
            Self::CharacterNotInRepertoire => "CharacterNotInRepertoire",
            Self::NoMatchingChoice => "NoMatchingChoice",
        };
        f.write_str(s)
    }
}

/// The facet a failed check belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet {
    /// Host shape of the value.
    Representation,
    /// Inclusive lower bound of an ordered type.
    MinInclusive,
    /// Inclusive upper bound of an ordered type.
    MaxInclusive,
    /// Minimum element count of a sequence.
    MinLength,
    /// Maximum element count of a sequence.
    MaxLength,
    /// Regular expression over a string.
    Pattern,
    /// Permitted character codepoints.
    Repertoire,
    /// Closed list of permitted literals.
    Enumeration,
    /// Member structure of an aggregate.
    Members,
    /// Significant digits of a real type.
    Precision,
    /// Storage width of a set.
    Width,
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Representation => "representation",
            Self::MinInclusive => "minInclusive",
            Self::MaxInclusive => "maxInclusive",
            Self::MinLength => "minLength",
            Self::MaxLength => "maxLength",
            Self::Pattern => "pattern",
            Self::Repertoire => "repertoire",
            Self::Enumeration => "enumeration",
            Self::Members => "members",
            Self::Precision => "precision",
            Self::Width => "width",
        };
        f.write_str(s)
    }
}

/// One step from a value to a nested element or member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Position inside a sequence, set or positional aggregate.
    Index(usize),
    /// Named aggregate member.
    Member(String),
}

/// Location of the offending element inside a validated value.
///
/// Renders as `$` for the value itself, `$[2]` for the third element,
/// `$.name` for a member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValuePath(Vec<PathSegment>);

impl ValuePath {
    /// The path of the value itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns the segments from the outermost value inwards.
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Returns true if the path denotes the value itself.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    fn prepend(&mut self, segment: PathSegment) {
        self.0.insert(0, segment);
    }
}

impl fmt::Display for ValuePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.0 {
            match segment {
                PathSegment::Index(i) => write!(f, "[{i}]")?,
                PathSegment::Member(name) => write!(f, ".{name}")?,
            }
        }
        Ok(())
    }
}

/// A value rejected by a datatype.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} on {facet} at {path}: {message}")]
pub struct ValueError {
    /// What went wrong.
    pub kind: ValueErrorKind,
    /// Which facet was violated.
    pub facet: Facet,
    /// Where inside the value.
    pub path: ValuePath,
    /// Expected vs actual, human readable.
    pub message: String,
}

impl ValueError {
    /// Create an error located at the value itself.
    pub fn new(kind: ValueErrorKind, facet: Facet, message: impl Into<String>) -> Self {
        Self {
            kind,
            facet,
            path: ValuePath::root(),
            message: message.into(),
        }
    }

    /// Shorthand for a representation mismatch.
    pub fn mismatch(expected: Representation, actual: Representation) -> Self {
        Self::new(
            ValueErrorKind::DataTypeMismatch,
            Facet::Representation,
            format!("expected {expected}, got {actual}"),
        )
    }

    /// Re-locate this error one element deeper, at position `index`.
    pub fn at_index(mut self, index: usize) -> Self {
        self.path.prepend(PathSegment::Index(index));
        self
    }

    /// Re-locate this error one member deeper, at member `name`.
    pub fn at_member(mut self, name: impl Into<String>) -> Self {
        self.path.prepend(PathSegment::Member(name.into()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_error_display_root() {
        let e = ValueError::new(
            ValueErrorKind::NumericOutOfRange,
            Facet::MaxInclusive,
            "256 > 255",
        );
        assert_eq!(e.to_string(), "NumericOutOfRange on maxInclusive at $: 256 > 255");
    }

    #[test]
    fn test_value_error_nested_path() {
        let e = ValueError::new(
            ValueErrorKind::CharacterNotInRepertoire,
            Facet::Repertoire,
            "U+0100",
        )
        .at_index(3)
        .at_member("name");
        assert_eq!(e.path.to_string(), "$.name[3]");
        assert_eq!(
            e.path.segments(),
            &[PathSegment::Member("name".into()), PathSegment::Index(3)]
        );
    }

    #[test]
    fn test_symbol_error_undefined_lists_names() {
        let e = SymbolError::Undefined {
            names: vec!["A".into(), "B".into()],
        };
        assert_eq!(e.to_string(), "declared but never defined: A, B");
    }

    #[test]
    fn test_gpd_error_from_construction() {
        let e: GpdError = ConstructionError::EmptyEnumeration.into();
        assert!(matches!(e, GpdError::Construction(_)));
    }
}
