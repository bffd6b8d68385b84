//! # Datatype Descriptors
//!
//! A [`Datatype`] is a name, an optional comment and a [`TypeKind`]. The kind
//! fixes the category, and with it whether the value space is ordered or
//! numeric. Ranges inherit both flags from their base, so those are answered
//! by the arena (see [`crate::TypeArena::is_ordered`]).

use std::fmt;

use crate::aggregate::Aggregate;
use crate::primitive::{Character, Enumerated, Integral, Real};
use crate::range::RangeType;
use crate::sequence::Sequence;
use crate::set::SetType;

/// Concrete category of a datatype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Boolean,
    Integral,
    Real,
    Character,
    Enumerated,
    Sequence,
    Aggregate,
    Range,
    Set,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Boolean => "boolean",
            Self::Integral => "integral",
            Self::Real => "real",
            Self::Character => "character",
            Self::Enumerated => "enumerated",
            Self::Sequence => "sequence",
            Self::Aggregate => "aggregate",
            Self::Range => "range",
            Self::Set => "set",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    Boolean,
    Integral(Integral),
    Real(Real),
    Character(Character),
    Enumerated(Enumerated),
    Sequence(Sequence),
    Aggregate(Aggregate),
    Range(RangeType),
    Set(SetType),
}

impl TypeKind {
    pub fn category(&self) -> Category {
        match self {
            Self::Boolean => Category::Boolean,
            Self::Integral(_) => Category::Integral,
            Self::Real(_) => Category::Real,
            Self::Character(_) => Category::Character,
            Self::Enumerated(_) => Category::Enumerated,
            Self::Sequence(_) => Category::Sequence,
            Self::Aggregate(_) => Category::Aggregate,
            Self::Range(_) => Category::Range,
            Self::Set(_) => Category::Set,
        }
    }
}

/// A datatype descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Datatype {
    name: Option<String>,
    comment: Option<String>,
    kind: TypeKind,
}

impl Datatype {
    pub fn new(kind: TypeKind) -> Self {
        Self {
            name: None,
            comment: None,
            kind,
        }
    }

    pub fn boolean() -> Self {
        Self::new(TypeKind::Boolean)
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    pub fn category(&self) -> Category {
        self.kind.category()
    }

    pub(crate) fn kind_mut(&mut self) -> &mut TypeKind {
        &mut self.kind
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Label for diagnostics: the name, or the category for anonymous types.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("anonymous {}", self.category()),
        }
    }
}

impl From<TypeKind> for Datatype {
    fn from(kind: TypeKind) -> Self {
        Self::new(kind)
    }
}

impl From<Integral> for Datatype {
    fn from(t: Integral) -> Self {
        Self::new(TypeKind::Integral(t))
    }
}

impl From<Real> for Datatype {
    fn from(t: Real) -> Self {
        Self::new(TypeKind::Real(t))
    }
}

impl From<Character> for Datatype {
    fn from(t: Character) -> Self {
        Self::new(TypeKind::Character(t))
    }
}

impl From<Enumerated> for Datatype {
    fn from(t: Enumerated) -> Self {
        Self::new(TypeKind::Enumerated(t))
    }
}

impl From<Sequence> for Datatype {
    fn from(t: Sequence) -> Self {
        Self::new(TypeKind::Sequence(t))
    }
}

impl From<Aggregate> for Datatype {
    fn from(t: Aggregate) -> Self {
        Self::new(TypeKind::Aggregate(t))
    }
}

impl From<RangeType> for Datatype {
    fn from(t: RangeType) -> Self {
        Self::new(TypeKind::Range(t))
    }
}

impl From<SetType> for Datatype {
    fn from(t: SetType) -> Self {
        Self::new(TypeKind::Set(t))
    }
}
