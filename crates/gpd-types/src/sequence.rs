//! # Sequence
//!
//! A homogeneous ordered collection: character strings, octet strings,
//! integer arrays. Every element is validated by the element type; the
//! element count is constrained by a [`Length`] facet. A sequence with
//! `minLength == maxLength` is the fixed-length case.
//!
//! Strings may also carry a [`Pattern`] and any sequence may carry a closed
//! list of literal choices. When choices are given, the length facet is
//! narrowed to the shortest and longest choice.

use gpd_core::{ConstructionError, Enumeration, Length, Pattern, Value};

use crate::reference::TypeRef;

/// Host shape of a sequence's canonical value, decided by its element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceShape {
    /// Elements are characters: canonical value is `Text`.
    Text,
    /// Elements are integers within 0..=255: canonical value is `Octets`.
    Octets,
    /// Anything else: canonical value is `List`.
    List,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    element: TypeRef,
    length: Length,
    pattern: Option<Pattern>,
    choices: Option<Enumeration<Value>>,
}

impl Sequence {
    pub fn new(element: TypeRef, length: Length) -> Self {
        Self {
            element,
            length,
            pattern: None,
            choices: None,
        }
    }

    /// Any number of elements.
    pub fn unbounded(element: TypeRef) -> Self {
        Self::new(element, Length::unbounded())
    }

    /// Constrain string content with a regular expression.
    ///
    /// Only sequences of characters may carry a pattern; the check happens
    /// when the sequence is added to a schema.
    pub fn with_pattern(mut self, pattern: Pattern) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Restrict the sequence to a closed list of literal values.
    ///
    /// Literals are canonicalized against the element type when the sequence
    /// is added to a schema.
    ///
    /// # Errors
    ///
    /// Returns `EmptyEnumeration` or `DuplicateLiteral`.
    pub fn with_choices(mut self, choices: Vec<Value>) -> Result<Self, ConstructionError> {
        self.choices = Some(Enumeration::new(choices)?);
        Ok(self)
    }

    pub fn element(&self) -> &TypeRef {
        &self.element
    }

    pub fn length(&self) -> Length {
        self.length
    }

    pub fn pattern(&self) -> Option<&Pattern> {
        self.pattern.as_ref()
    }

    pub fn choices(&self) -> Option<&Enumeration<Value>> {
        self.choices.as_ref()
    }

    pub(crate) fn set_length(&mut self, length: Length) {
        self.length = length;
    }

    pub(crate) fn set_choices(&mut self, choices: Enumeration<Value>) {
        self.choices = Some(choices);
    }
}

/// Element count of a canonical or raw sequence value, if it has one.
pub(crate) fn element_count(value: &Value) -> Option<u64> {
    let n = match value {
        Value::Text(s) => s.chars().count(),
        Value::Octets(bytes) => bytes.len(),
        Value::List(items) => items.len(),
        _ => return None,
    };
    u64::try_from(n).ok()
}
