//! # Type Handles and References
//!
//! Datatypes live in an arena and are addressed by [`TypeId`] handles.
//! A [`TypeRef`] is the indirection cell one type uses to point at another:
//! either by qualified name through the symbol table, or anonymously.
//!
//! Because references are handles rather than pointers, cyclic graphs
//! (a record whose member refers back to the record) are ordinary data,
//! and declaring a name before defining it is just reserving a handle.

use std::fmt;

/// A lightweight handle to a datatype in a [`crate::TypeArena`].
///
/// Handles are only meaningful for the arena that issued them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct TypeId(u32);

impl TypeId {
    #[inline]
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Reference from one datatype to another.
///
/// A `Named` reference resolved through the symbol table always carries the
/// handle reserved for that name, so two references to the same name always
/// reach the same datatype.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// Reference by qualified name.
    Named {
        /// The qualified name as written.
        name: String,
        /// The handle the name resolves to.
        target: TypeId,
    },
    /// Embedded, unnamed datatype.
    Anonymous(TypeId),
}

impl TypeRef {
    pub fn named(name: impl Into<String>, target: TypeId) -> Self {
        Self::Named {
            name: name.into(),
            target,
        }
    }

    pub fn anonymous(target: TypeId) -> Self {
        Self::Anonymous(target)
    }

    /// The handle this reference resolves to.
    pub fn id(&self) -> TypeId {
        match self {
            Self::Named { target, .. } => *target,
            Self::Anonymous(target) => *target,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named { name, .. } => Some(name),
            Self::Anonymous(_) => None,
        }
    }
}

impl From<&TypeRef> for TypeId {
    fn from(r: &TypeRef) -> Self {
        r.id()
    }
}

impl From<TypeRef> for TypeId {
    fn from(r: TypeRef) -> Self {
        r.id()
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named { name, .. } => f.write_str(name),
            Self::Anonymous(id) => write!(f, "anonymous {id}"),
        }
    }
}
