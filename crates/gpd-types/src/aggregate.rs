//! # Aggregates
//!
//! Heterogeneous composites of uniquely named members, addressable by
//! position or by name. Name lookup tries an exact match first and falls
//! back to a case-insensitive one.
//!
//! | Kind | Derivable | Value |
//! |---|---|---|
//! | `Record` | no | one record |
//! | `Table` | no | list of rows, each a record |
//! | `Class` | from classes and interfaces | one record |
//! | `Interface` | from interfaces | one record |
//!
//! A derivable aggregate's members are its own members followed by those it
//! inherits through its "derives-from" references; an inherited member hidden
//! by an own member of the same name is not repeated.

use std::fmt;

use gpd_core::ConstructionError;

use crate::reference::TypeRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateKind {
    Record,
    Table,
    Class,
    Interface,
}

impl AggregateKind {
    /// Whether aggregates of this kind may derive from others.
    pub fn is_derivable(&self) -> bool {
        matches!(self, Self::Class | Self::Interface)
    }

    /// Whether an aggregate of this kind may derive from one of `target`.
    pub fn may_derive_from(&self, target: AggregateKind) -> bool {
        match self {
            Self::Class => matches!(target, Self::Class | Self::Interface),
            Self::Interface => target == Self::Interface,
            Self::Record | Self::Table => false,
        }
    }
}

impl fmt::Display for AggregateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Record => "record",
            Self::Table => "table",
            Self::Class => "class",
            Self::Interface => "interface",
        };
        f.write_str(s)
    }
}

/// A named member of an aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub name: String,
    pub type_ref: TypeRef,
}

impl Member {
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregate {
    kind: AggregateKind,
    members: Vec<Member>,
    packed: bool,
    derives_from: Vec<TypeRef>,
}

impl Aggregate {
    /// A non-derived aggregate.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateMember` if two members share a name.
    pub fn new(kind: AggregateKind, members: Vec<Member>) -> Result<Self, ConstructionError> {
        Self::derivable(kind, members, Vec::new())
    }

    pub fn record(members: Vec<Member>) -> Result<Self, ConstructionError> {
        Self::new(AggregateKind::Record, members)
    }

    pub fn table(columns: Vec<Member>) -> Result<Self, ConstructionError> {
        Self::new(AggregateKind::Table, columns)
    }

    /// An aggregate that inherits the members of `derives_from`.
    ///
    /// Whether each target is a class or interface is checked when the
    /// aggregate is added to a schema, since targets may be declared later.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateMember` for repeated names and `InvalidDerivation`
    /// if `kind` does not admit derivation.
    pub fn derivable(
        kind: AggregateKind,
        members: Vec<Member>,
        derives_from: Vec<TypeRef>,
    ) -> Result<Self, ConstructionError> {
        for (i, member) in members.iter().enumerate() {
            if members[..i].iter().any(|m| m.name == member.name) {
                return Err(ConstructionError::DuplicateMember {
                    name: member.name.clone(),
                });
            }
        }
        if !derives_from.is_empty() && !kind.is_derivable() {
            return Err(ConstructionError::InvalidDerivation {
                target: derives_from[0].to_string(),
                reason: format!("a {kind} cannot derive from other types"),
            });
        }
        Ok(Self {
            kind,
            members,
            packed: false,
            derives_from,
        })
    }

    /// Mark the aggregate as packed storage.
    pub fn packed(mut self, packed: bool) -> Self {
        self.packed = packed;
        self
    }

    pub fn kind(&self) -> AggregateKind {
        self.kind
    }

    /// Own members, in declaration order.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn is_packed(&self) -> bool {
        self.packed
    }

    pub fn derives_from(&self) -> &[TypeRef] {
        &self.derives_from
    }

    pub fn member_at(&self, index: usize) -> Option<&Member> {
        self.members.get(index)
    }

    /// Own member by name: exact match preferred, then case-insensitive.
    pub fn find_member(&self, name: &str) -> Option<&Member> {
        find_by_name(&self.members, name).map(|i| &self.members[i])
    }
}

/// Position of `name` in `members`: exact match preferred, then
/// case-insensitive.
pub fn find_by_name(members: &[Member], name: &str) -> Option<usize> {
    members
        .iter()
        .position(|m| m.name == name)
        .or_else(|| members.iter().position(|m| m.name.eq_ignore_ascii_case(name)))
}
