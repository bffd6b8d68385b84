//! # Type Arena
//!
//! Storage for every datatype of a schema, addressed by [`TypeId`]. A slot is
//! either reserved for a declared name or holds a defined datatype. Slots are
//! never removed, so a handle stays valid for the arena's lifetime.
//!
//! The arena also answers the graph-level questions a single descriptor
//! cannot: whether a range is ordered (it inherits from its base), what a
//! value's comparable form is, which members an aggregate has once
//! derivation is taken into account.

use std::collections::HashSet;

use bigdecimal::num_bigint::BigInt;
use gpd_core::{Comparable, Representation, Value};

use crate::aggregate::{AggregateKind, Member};
use crate::datatype::{Datatype, TypeKind};
use crate::reference::TypeId;
use crate::sequence::SequenceShape;

#[derive(Debug, Clone)]
enum Slot {
    Reserved(String),
    Defined(Datatype),
}

#[derive(Debug, Clone, Default)]
pub struct TypeArena {
    slots: Vec<Slot>,
}

impl TypeArena {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> TypeId {
        TypeId::from_raw(u32::try_from(self.slots.len()).unwrap_or(u32::MAX))
    }

    /// Reserve a slot for a name that will be defined later.
    pub(crate) fn reserve(&mut self, name: &str) -> TypeId {
        let id = self.next_id();
        self.slots.push(Slot::Reserved(name.to_string()));
        id
    }

    pub(crate) fn insert(&mut self, datatype: Datatype) -> TypeId {
        let id = self.next_id();
        self.slots.push(Slot::Defined(datatype));
        id
    }

    /// Fill a reserved slot. Returns false if the slot was already defined.
    pub(crate) fn fill(&mut self, id: TypeId, datatype: Datatype) -> bool {
        match self.slots.get_mut(id.index()) {
            Some(slot @ Slot::Reserved(_)) => {
                *slot = Slot::Defined(datatype);
                true
            }
            _ => false,
        }
    }

    /// Swap the datatype held by a defined slot, returning the old one.
    pub(crate) fn replace(&mut self, id: TypeId, datatype: Datatype) -> Option<Datatype> {
        match self.slots.get_mut(id.index()) {
            Some(Slot::Defined(old)) => Some(std::mem::replace(old, datatype)),
            _ => None,
        }
    }

    pub fn get(&self, id: TypeId) -> Option<&Datatype> {
        match self.slots.get(id.index()) {
            Some(Slot::Defined(datatype)) => Some(datatype),
            _ => None,
        }
    }

    pub fn is_defined(&self, id: TypeId) -> bool {
        self.get(id).is_some()
    }

    /// Name a reserved slot was declared under.
    pub fn reserved_name(&self, id: TypeId) -> Option<&str> {
        match self.slots.get(id.index()) {
            Some(Slot::Reserved(name)) => Some(name),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Defined datatypes with their handles, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &Datatype)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| match slot {
            Slot::Defined(d) => Some((TypeId::from_raw(i as u32), d)),
            Slot::Reserved(_) => None,
        })
    }

    /// Label for diagnostics.
    pub fn label(&self, id: TypeId) -> String {
        match self.slots.get(id.index()) {
            Some(Slot::Defined(d)) => d.label(),
            Some(Slot::Reserved(name)) => name.clone(),
            None => id.to_string(),
        }
    }

    // ─── Graph Queries ───────────────────────────────────────────────

    /// Follow range bases down to the first non-range datatype.
    pub fn root(&self, id: TypeId) -> Option<(TypeId, &Datatype)> {
        let mut current = id;
        for _ in 0..=self.slots.len() {
            let datatype = self.get(current)?;
            match datatype.kind() {
                TypeKind::Range(range) => current = range.base().id(),
                _ => return Some((current, datatype)),
            }
        }
        None
    }

    pub fn is_ordered(&self, id: TypeId) -> bool {
        matches!(
            self.root(id).map(|(_, d)| d.kind()),
            Some(
                TypeKind::Integral(_)
                    | TypeKind::Real(_)
                    | TypeKind::Character(_)
                    | TypeKind::Enumerated(_)
            )
        )
    }

    pub fn is_numeric(&self, id: TypeId) -> bool {
        matches!(
            self.root(id).map(|(_, d)| d.kind()),
            Some(TypeKind::Integral(_) | TypeKind::Real(_))
        )
    }

    /// The host shape `to_value` produces for this type.
    pub fn representation(&self, id: TypeId) -> Representation {
        let Some((_, datatype)) = self.root(id) else {
            return Representation::Void;
        };
        match datatype.kind() {
            TypeKind::Boolean => Representation::Boolean,
            TypeKind::Integral(_) => Representation::Integer,
            TypeKind::Real(_) => Representation::Decimal,
            TypeKind::Character(_) => Representation::Character,
            TypeKind::Enumerated(_) => Representation::Symbol,
            TypeKind::Sequence(seq) => match self.sequence_shape(seq.element().id()) {
                SequenceShape::Text => Representation::Text,
                SequenceShape::Octets => Representation::Octets,
                SequenceShape::List => Representation::List,
            },
            TypeKind::Aggregate(agg) if agg.kind() == AggregateKind::Table => Representation::List,
            TypeKind::Aggregate(_) => Representation::Record,
            TypeKind::Set(_) => Representation::List,
            TypeKind::Range(_) => Representation::Void,
        }
    }

    /// Canonical shape of a sequence whose elements are of type `element`.
    pub fn sequence_shape(&self, element: TypeId) -> SequenceShape {
        match self.root(element).map(|(_, d)| d.kind()) {
            Some(TypeKind::Character(_)) => SequenceShape::Text,
            Some(TypeKind::Integral(_)) => {
                let octet = (Comparable::from(0), Comparable::from(255));
                match self.value_bounds(element) {
                    Some((low, high)) if low >= octet.0 && high <= octet.1 => SequenceShape::Octets,
                    _ => SequenceShape::List,
                }
            }
            _ => SequenceShape::List,
        }
    }

    /// Comparable form of a canonical value of type `id`.
    pub fn comparable(&self, id: TypeId, value: &Value) -> Option<Comparable> {
        let (_, datatype) = self.root(id)?;
        match (datatype.kind(), value) {
            (TypeKind::Integral(_), Value::Integer(i)) => Some(Comparable::Integer(i.clone())),
            (TypeKind::Real(_), Value::Decimal(d)) => Some(Comparable::Decimal(d.clone())),
            (TypeKind::Character(_), Value::Character(c)) => {
                Some(Comparable::Integer(BigInt::from(*c as u32)))
            }
            (TypeKind::Enumerated(e), Value::Symbol(s)) => e
                .ordinal(s)
                .and_then(|i| i64::try_from(i).ok())
                .map(Comparable::from),
            (TypeKind::Boolean, Value::Boolean(b)) => Some(Comparable::from(i64::from(*b))),
            _ => None,
        }
    }

    /// Lowest and highest comparable values of an ordered or boolean type.
    pub fn value_bounds(&self, id: TypeId) -> Option<(Comparable, Comparable)> {
        let datatype = self.get(id)?;
        match datatype.kind() {
            TypeKind::Boolean => Some((Comparable::from(0), Comparable::from(1))),
            TypeKind::Integral(t) => Some((
                Comparable::Integer(t.min().clone()),
                Comparable::Integer(t.max().clone()),
            )),
            TypeKind::Real(t) => Some((
                Comparable::Decimal(t.range().min_inclusive().clone()),
                Comparable::Decimal(t.range().max_inclusive().clone()),
            )),
            TypeKind::Character(t) => Some(t.bounds()),
            TypeKind::Enumerated(t) => Some(t.bounds()),
            TypeKind::Range(r) => Some((
                r.bounds().min_inclusive().clone(),
                r.bounds().max_inclusive().clone(),
            )),
            TypeKind::Sequence(_) | TypeKind::Aggregate(_) | TypeKind::Set(_) => None,
        }
    }

    /// Members of an aggregate including inherited ones.
    ///
    /// Own members come first in declaration order, then each derivation
    /// target's members depth-first. A name already present hides later
    /// members of the same name. Derivation cycles are cut.
    pub fn members(&self, id: TypeId) -> Vec<&Member> {
        let mut out = Vec::new();
        let mut visited = HashSet::new();
        self.collect_members(id, &mut out, &mut visited);
        out
    }

    fn collect_members<'a>(
        &'a self,
        id: TypeId,
        out: &mut Vec<&'a Member>,
        visited: &mut HashSet<TypeId>,
    ) {
        if !visited.insert(id) {
            return;
        }
        let Some(TypeKind::Aggregate(agg)) = self.get(id).map(Datatype::kind) else {
            return;
        };
        for member in agg.members() {
            if !out.iter().any(|m| m.name == member.name) {
                out.push(member);
            }
        }
        for parent in agg.derives_from() {
            self.collect_members(parent.id(), out, visited);
        }
    }
}
