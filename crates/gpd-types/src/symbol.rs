//! # Symbol Table
//!
//! Unique-key map from qualified name to the handle reserved for it.
//! Entries keep declaration order, which is the order names are listed and
//! reported in.
//!
//! The table never holds a datatype itself. Whether a name is defined is a
//! property of its arena slot; see [`crate::SchemaBuilder::define`].

use indexmap::IndexMap;

use gpd_core::SymbolError;

use crate::reference::{TypeId, TypeRef};

#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    entries: IndexMap<String, TypeId>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn bind(&mut self, name: &str, id: TypeId) {
        self.entries.insert(name.to_string(), id);
    }

    pub fn get(&self, name: &str) -> Option<TypeId> {
        self.entries.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Resolve `name` to a named reference.
    ///
    /// # Errors
    ///
    /// Returns `NameNotFound` if the name was never declared.
    pub fn lookup(&self, name: &str) -> Result<TypeRef, SymbolError> {
        self.get(name)
            .map(|id| TypeRef::named(name, id))
            .ok_or_else(|| SymbolError::NameNotFound {
                name: name.to_string(),
            })
    }

    /// Names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, TypeId)> {
        self.entries.iter().map(|(name, id)| (name.as_str(), *id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_unknown_name() {
        let table = SymbolTable::new();
        assert_eq!(
            table.lookup("Missing").unwrap_err(),
            SymbolError::NameNotFound {
                name: "Missing".into()
            }
        );
    }

    #[test]
    fn test_names_keep_declaration_order() {
        let mut table = SymbolTable::new();
        table.bind("Zeta", TypeId::from_raw(0));
        table.bind("Alpha", TypeId::from_raw(1));
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["Zeta", "Alpha"]);
        assert_eq!(table.lookup("Alpha").unwrap().id(), TypeId::from_raw(1));
    }
}
