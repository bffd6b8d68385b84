//! # Validation and Conversion Engine
//!
//! `to_value` turns a raw host value into the canonical value of a datatype,
//! or reports why it cannot. Checks run in a fixed order and the first
//! failure stops the pipeline:
//!
//! 1. Representation: the raw host shape must be compatible with the type
//!    (`DataTypeMismatch`).
//! 2. Bounds and length: ordered values within `[min, max]`
//!    (`NumericOutOfRange`); element counts within `[minLength, maxLength]`
//!    (`BoundsRange`).
//! 3. Pattern, strings only (`PatternMismatch`).
//! 4. Repertoire, characters and strings only (`CharacterNotInRepertoire`).
//!    For strings this happens while each element is validated by the
//!    element type.
//! 5. Enumeration: the validated value must equal one of the closed list of
//!    choices (`NoMatchingChoice`).
//!
//! The engine never mutates the graph. Nested failures are re-located with
//! the index or member name they occurred at.

use gpd_core::{Comparable, Facet, Representation, Value, ValueError, ValueErrorKind};

use crate::aggregate::{Aggregate, AggregateKind, Member};
use crate::arena::TypeArena;
use crate::datatype::TypeKind;
use crate::primitive::{self, Character};
use crate::range::RangeType;
use crate::reference::TypeId;
use crate::sequence::{Sequence, SequenceShape};
use crate::set::SetType;

/// Validate `raw` against the datatype `id` and return its canonical form.
pub(crate) fn to_value(arena: &TypeArena, id: TypeId, raw: &Value) -> Result<Value, ValueError> {
    let Some(datatype) = arena.get(id) else {
        return Err(ValueError::new(
            ValueErrorKind::DataTypeMismatch,
            Facet::Representation,
            format!("type {} is declared but not defined", arena.label(id)),
        ));
    };
    match datatype.kind() {
        TypeKind::Boolean => primitive::boolean_to_value(raw),
        TypeKind::Integral(t) => t.to_value(raw),
        TypeKind::Real(t) => t.to_value(raw),
        TypeKind::Character(t) => t.to_value(raw),
        TypeKind::Enumerated(t) => t.to_value(raw),
        TypeKind::Sequence(seq) => sequence_to_value(arena, seq, raw),
        TypeKind::Aggregate(agg) => aggregate_to_value(arena, id, agg, raw),
        TypeKind::Range(range) => range_to_value(arena, range, raw),
        TypeKind::Set(set) => set_to_value(arena, set, raw),
    }
}

// ─── Sequence ────────────────────────────────────────────────────────

fn shape_representation(shape: SequenceShape) -> Representation {
    match shape {
        SequenceShape::Text => Representation::Text,
        SequenceShape::Octets => Representation::Octets,
        SequenceShape::List => Representation::List,
    }
}

pub(crate) fn sequence_to_value(
    arena: &TypeArena,
    seq: &Sequence,
    raw: &Value,
) -> Result<Value, ValueError> {
    let element = seq.element().id();
    let shape = arena.sequence_shape(element);

    let items: Vec<Value> = match (raw, shape) {
        (Value::List(items), _) => items.clone(),
        (Value::Text(s), SequenceShape::Text) => s.chars().map(Value::Character).collect(),
        (Value::Octets(bytes), SequenceShape::Octets | SequenceShape::List) => {
            bytes.iter().map(|b| Value::from(i64::from(*b))).collect()
        }
        (other, _) => {
            return Err(ValueError::mismatch(
                shape_representation(shape),
                other.representation(),
            ))
        }
    };
    let text: Option<String> = match shape {
        SequenceShape::Text => Some(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| Character::extract(item).map_err(|e| e.at_index(i)))
                .collect::<Result<String, ValueError>>()?,
        ),
        _ => None,
    };

    let count = u64::try_from(items.len()).unwrap_or(u64::MAX);
    seq.length().check(count)?;

    if let Some(pattern) = seq.pattern() {
        match &text {
            Some(text) => pattern.check(text)?,
            None => {
                return Err(ValueError::mismatch(
                    Representation::Text,
                    raw.representation(),
                ))
            }
        }
    }

    let mut canonical = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        canonical.push(to_value(arena, element, item).map_err(|e| e.at_index(i))?);
    }
    let value = assemble(shape, canonical);

    if let Some(choices) = seq.choices() {
        choices.check(&value)?;
    }
    Ok(value)
}

fn assemble(shape: SequenceShape, canonical: Vec<Value>) -> Value {
    match shape {
        SequenceShape::Text => {
            let chars: Option<String> = canonical
                .iter()
                .map(|v| match v {
                    Value::Character(c) => Some(*c),
                    _ => None,
                })
                .collect();
            chars.map_or(Value::List(canonical), Value::Text)
        }
        SequenceShape::Octets => {
            let bytes: Option<Vec<u8>> = canonical
                .iter()
                .map(|v| v.as_integer().and_then(|i| u8::try_from(i).ok()))
                .collect();
            bytes.map_or(Value::List(canonical), Value::Octets)
        }
        SequenceShape::List => Value::List(canonical),
    }
}

// ─── Aggregate ───────────────────────────────────────────────────────

fn aggregate_to_value(
    arena: &TypeArena,
    id: TypeId,
    agg: &Aggregate,
    raw: &Value,
) -> Result<Value, ValueError> {
    let members = arena.members(id);
    if agg.kind() != AggregateKind::Table {
        return record_to_value(arena, &members, raw);
    }
    let Value::List(rows) = raw else {
        return Err(ValueError::mismatch(
            Representation::List,
            raw.representation(),
        ));
    };
    let mut out = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        out.push(record_to_value(arena, &members, row).map_err(|e| e.at_index(i))?);
    }
    Ok(Value::List(out))
}

fn member_index(members: &[&Member], name: &str) -> Option<usize> {
    members
        .iter()
        .position(|m| m.name == name)
        .or_else(|| members.iter().position(|m| m.name.eq_ignore_ascii_case(name)))
}

fn members_error(message: String) -> ValueError {
    ValueError::new(ValueErrorKind::DataTypeMismatch, Facet::Members, message)
}

fn record_to_value(
    arena: &TypeArena,
    members: &[&Member],
    raw: &Value,
) -> Result<Value, ValueError> {
    let assigned: Vec<&Value> = match raw {
        Value::Record(fields) => {
            let mut slots: Vec<Option<&Value>> = vec![None; members.len()];
            for (name, value) in fields {
                let Some(i) = member_index(members, name) else {
                    return Err(members_error(format!("unknown member '{name}'")));
                };
                if slots[i].is_some() {
                    return Err(members_error(format!(
                        "member '{}' given more than once",
                        members[i].name
                    )));
                }
                slots[i] = Some(value);
            }
            let mut assigned = Vec::with_capacity(members.len());
            for (member, slot) in members.iter().zip(slots) {
                match slot {
                    Some(value) => assigned.push(value),
                    None => {
                        return Err(members_error(format!("missing member '{}'", member.name)))
                    }
                }
            }
            assigned
        }
        Value::List(items) => {
            if items.len() != members.len() {
                return Err(members_error(format!(
                    "expected {} members, got {}",
                    members.len(),
                    items.len()
                )));
            }
            items.iter().collect()
        }
        other => {
            return Err(ValueError::mismatch(
                Representation::Record,
                other.representation(),
            ))
        }
    };

    let mut out = Vec::with_capacity(members.len());
    for (member, value) in members.iter().zip(assigned) {
        let canonical = to_value(arena, member.type_ref.id(), value)
            .map_err(|e| e.at_member(member.name.clone()))?;
        out.push((member.name.clone(), canonical));
    }
    Ok(Value::Record(out))
}

// ─── Range ───────────────────────────────────────────────────────────

fn range_to_value(arena: &TypeArena, range: &RangeType, raw: &Value) -> Result<Value, ValueError> {
    let base = range.base().id();
    let canonical = to_value(arena, base, raw)?;
    let Some(comparable) = arena.comparable(base, &canonical) else {
        return Err(ValueError::mismatch(
            arena.representation(base),
            canonical.representation(),
        ));
    };
    range.bounds().check(&comparable)?;
    Ok(canonical)
}

// ─── Set ─────────────────────────────────────────────────────────────

fn set_to_value(arena: &TypeArena, set: &SetType, raw: &Value) -> Result<Value, ValueError> {
    let Value::List(items) = raw else {
        return Err(ValueError::mismatch(
            Representation::List,
            raw.representation(),
        ));
    };
    let base = set.base().id();
    let mut elements: Vec<(Comparable, Value)> = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let canonical = to_value(arena, base, item).map_err(|e| e.at_index(i))?;
        let Some(comparable) = arena.comparable(base, &canonical) else {
            return Err(ValueError::mismatch(
                arena.representation(base),
                canonical.representation(),
            )
            .at_index(i));
        };
        if !elements.iter().any(|(c, _)| *c == comparable) {
            elements.push((comparable, canonical));
        }
    }
    elements.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(Value::List(elements.into_iter().map(|(_, v)| v).collect()))
}
