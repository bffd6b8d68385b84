//! # Restriction and Equality Comparator
//!
//! Structural comparison of two datatypes of one arena.
//!
//! - `equals(A, B)`: same category, identical facet values, and pairwise
//!   equal element/member/base targets. Names and comments are not compared.
//! - `is_restriction_of(A, B)`: every value A accepts, B accepts too. Bounds
//!   and lengths must nest, choice lists must narrow, and element/member
//!   types must be equal or themselves restrictions (covariance).
//!
//! Both relations recurse through the type graph and are co-inductive: a pair
//! that is already being compared further up the stack is assumed to hold.
//! That is what makes cyclic aggregates terminate.
//!
//! A type is never a restriction of itself. The test is identity of the
//! handle only; a distinct but structurally equal type does count.
//!
//! The comparator never errors. Incompatibility, including comparison with an
//! undefined slot, is reported as `false`.

use std::fmt;

use gpd_core::{BoundedRange, Comparable, Enumeration, Pattern, Value};

use crate::arena::TypeArena;
use crate::datatype::TypeKind;
use crate::range::RangeType;
use crate::reference::TypeId;
use crate::validate;

pub(crate) struct Comparator<'a> {
    arena: &'a TypeArena,
    equating: Vec<(TypeId, TypeId)>,
    restricting: Vec<(TypeId, TypeId)>,
}

impl<'a> Comparator<'a> {
    pub(crate) fn new(arena: &'a TypeArena) -> Self {
        Self {
            arena,
            equating: Vec::new(),
            restricting: Vec::new(),
        }
    }

    // ─── Equality ────────────────────────────────────────────────────

    pub(crate) fn equals(&mut self, a: TypeId, b: TypeId) -> bool {
        if a == b || self.equating.contains(&(a, b)) {
            return true;
        }
        if self.arena.get(a).is_none() || self.arena.get(b).is_none() {
            return false;
        }
        self.equating.push((a, b));
        let result = self.equal_kinds(a, b);
        self.equating.pop();
        result
    }

    fn equal_kinds(&mut self, a: TypeId, b: TypeId) -> bool {
        let arena = self.arena;
        let (Some(da), Some(db)) = (arena.get(a), arena.get(b)) else {
            return false;
        };
        match (da.kind(), db.kind()) {
            (TypeKind::Boolean, TypeKind::Boolean) => true,
            (TypeKind::Integral(x), TypeKind::Integral(y)) => {
                x.range() == y.range() && same_choices(x.choices(), y.choices())
            }
            (TypeKind::Real(x), TypeKind::Real(y)) => {
                x.precision_bits() == y.precision_bits()
                    && x.range() == y.range()
                    && same_choices(x.choices(), y.choices())
            }
            (TypeKind::Character(x), TypeKind::Character(y)) => x.repertoire() == y.repertoire(),
            (TypeKind::Enumerated(x), TypeKind::Enumerated(y)) => x.values() == y.values(),
            (TypeKind::Sequence(x), TypeKind::Sequence(y)) => {
                x.length() == y.length()
                    && x.pattern() == y.pattern()
                    && same_choices(x.choices(), y.choices())
                    && self.equals(x.element().id(), y.element().id())
            }
            (TypeKind::Aggregate(x), TypeKind::Aggregate(y)) => {
                if x.kind() != y.kind() || x.is_packed() != y.is_packed() {
                    return false;
                }
                self.member_pairs(a, b)
                    .is_some_and(|pairs| pairs.into_iter().all(|(ma, mb)| self.equals(ma, mb)))
            }
            (TypeKind::Range(x), TypeKind::Range(y)) => {
                x.bounds() == y.bounds() && self.equals(x.base().id(), y.base().id())
            }
            (TypeKind::Set(x), TypeKind::Set(y)) => {
                x.width() == y.width() && self.equals(x.base().id(), y.base().id())
            }
            _ => false,
        }
    }

    /// Flattened member types of two aggregates, paired by position.
    /// `None` if the member counts or names differ.
    fn member_pairs(&self, a: TypeId, b: TypeId) -> Option<Vec<(TypeId, TypeId)>> {
        let ma = self.arena.members(a);
        let mb = self.arena.members(b);
        if ma.len() != mb.len() || ma.iter().zip(&mb).any(|(x, y)| x.name != y.name) {
            return None;
        }
        Some(
            ma.iter()
                .zip(&mb)
                .map(|(x, y)| (x.type_ref.id(), y.type_ref.id()))
                .collect(),
        )
    }

    // ─── Restriction ─────────────────────────────────────────────────

    pub(crate) fn is_restriction_of(&mut self, a: TypeId, b: TypeId) -> bool {
        if a == b {
            return false;
        }
        if self.restricting.contains(&(a, b)) {
            return true;
        }
        if self.arena.get(a).is_none() || self.arena.get(b).is_none() {
            return false;
        }
        self.restricting.push((a, b));
        let result = self.restricts(a, b);
        self.restricting.pop();
        result
    }

    fn covariant(&mut self, a: TypeId, b: TypeId) -> bool {
        self.equals(a, b) || self.is_restriction_of(a, b)
    }

    fn restricts(&mut self, a: TypeId, b: TypeId) -> bool {
        let arena = self.arena;
        let (Some(da), Some(db)) = (arena.get(a), arena.get(b)) else {
            return false;
        };
        if let (Some(names), true) = (enumerated_names(arena, a), has_enumerated_root(arena, b)) {
            return names.iter().all(|name| accepts_name(arena, b, name));
        }
        match (da.kind(), db.kind()) {
            (TypeKind::Boolean, TypeKind::Boolean) => true,
            (TypeKind::Integral(x), TypeKind::Integral(y)) => {
                x.range().is_within(y.range()) && narrower_choices(x.choices(), y.choices())
            }
            (TypeKind::Real(x), TypeKind::Real(y)) => {
                x.precision_bits() <= y.precision_bits()
                    && x.range().is_within(y.range())
                    && narrower_choices(x.choices(), y.choices())
            }
            (TypeKind::Character(x), TypeKind::Character(y)) => {
                x.repertoire().is_subset_of(y.repertoire())
            }
            (TypeKind::Enumerated(x), TypeKind::Enumerated(y)) => {
                x.enumeration().is_subset_of(y.enumeration())
            }
            (TypeKind::Sequence(x), TypeKind::Sequence(y)) => {
                x.length().is_within(&y.length())
                    && narrower_pattern(x.pattern(), y.pattern())
                    && narrower_choices(x.choices(), y.choices())
                    && self.covariant(x.element().id(), y.element().id())
            }
            (TypeKind::Aggregate(x), TypeKind::Aggregate(y)) => {
                if x.kind() != y.kind() {
                    return false;
                }
                self.member_pairs(a, b)
                    .is_some_and(|pairs| pairs.into_iter().all(|(ma, mb)| self.covariant(ma, mb)))
            }
            (TypeKind::Range(x), TypeKind::Range(y)) => {
                x.bounds().is_within(y.bounds())
                    && (self.covariant(x.base().id(), y.base().id())
                        || self.is_restriction_of(a, y.base().id()))
            }
            (TypeKind::Range(x), _) => {
                self.covariant(x.base().id(), b) || self.range_fits_open(x, db.kind())
            }
            (_, TypeKind::Range(y)) => {
                let Some((low, high)) = arena.value_bounds(a) else {
                    return false;
                };
                BoundedRange::spanning(low, high).is_within(y.bounds())
                    && self.covariant(a, y.base().id())
            }
            (TypeKind::Set(x), TypeKind::Set(y)) => self.covariant(x.base().id(), y.base().id()),
            _ => false,
        }
    }

    /// A range over a numeric base restricts an unconstrained numeric type
    /// of the same category whose bounds contain the range, even if the
    /// range's own base is wider.
    fn range_fits_open(&self, range: &RangeType, target: &TypeKind) -> bool {
        let Some((_, root)) = self.arena.root(range.base().id()) else {
            return false;
        };
        let target_bounds = match (root.kind(), target) {
            (TypeKind::Integral(_), TypeKind::Integral(t)) if t.choices().is_none() => {
                BoundedRange::spanning(
                    Comparable::Integer(t.min().clone()),
                    Comparable::Integer(t.max().clone()),
                )
            }
            (TypeKind::Real(r), TypeKind::Real(t)) if t.choices().is_none() => {
                if r.precision_bits() > t.precision_bits() {
                    return false;
                }
                BoundedRange::spanning(
                    Comparable::Decimal(t.range().min_inclusive().clone()),
                    Comparable::Decimal(t.range().max_inclusive().clone()),
                )
            }
            _ => return false,
        };
        range.bounds().is_within(&target_bounds)
    }
}

// ─── Enumerated roots ────────────────────────────────────────────────

// Comparable forms of enumerated values are ordinals in their own root's
// list, so bounds over two different enumerations cannot be compared
// numerically. Such types are compared by the value names they accept.

fn has_enumerated_root(arena: &TypeArena, id: TypeId) -> bool {
    matches!(
        arena.root(id).map(|(_, d)| d.kind()),
        Some(TypeKind::Enumerated(_))
    )
}

fn accepts_name(arena: &TypeArena, id: TypeId, name: &str) -> bool {
    validate::to_value(arena, id, &Value::symbol(name)).is_ok()
}

/// Value names accepted by a type whose root is enumerated, in root order.
fn enumerated_names(arena: &TypeArena, id: TypeId) -> Option<Vec<&str>> {
    let (_, root) = arena.root(id)?;
    let TypeKind::Enumerated(e) = root.kind() else {
        return None;
    };
    Some(
        e.values()
            .iter()
            .map(String::as_str)
            .filter(|name| accepts_name(arena, id, name))
            .collect(),
    )
}

fn same_choices<T: PartialEq + fmt::Display>(
    a: Option<&Enumeration<T>>,
    b: Option<&Enumeration<T>>,
) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(x), Some(y)) => x.same_literals(y),
        _ => false,
    }
}

/// If B has no choice list, A's is irrelevant; if both have one, A's must be
/// a subset; a closed B never admits an open A.
fn narrower_choices<T: PartialEq + fmt::Display>(
    a: Option<&Enumeration<T>>,
    b: Option<&Enumeration<T>>,
) -> bool {
    match (a, b) {
        (_, None) => true,
        (Some(x), Some(y)) => x.is_subset_of(y),
        (None, Some(_)) => false,
    }
}

fn narrower_pattern(a: Option<&Pattern>, b: Option<&Pattern>) -> bool {
    match (a, b) {
        (_, None) => true,
        (Some(x), Some(y)) => x == y,
        (None, Some(_)) => false,
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::SchemaBuilder;
    use crate::primitive::{Character, Enumerated, Integral, Real};
    use crate::sequence::Sequence;
    use gpd_core::{BigDecimal, BigInt, Length, Pattern, Value};

    #[test]
    fn test_names_and_comments_ignored() {
        let mut b = SchemaBuilder::new();
        let a = b.define("Byte", Integral::octet()).unwrap();
        let c = b
            .add(crate::Datatype::from(Integral::octet()).with_comment("unsigned 8 bits"))
            .unwrap();
        let schema = b.build().unwrap();
        assert!(schema.equals(&a, &c));
    }

    #[test]
    fn test_choice_lists_narrow() {
        let mut b = SchemaBuilder::new();
        let open = b.add(Integral::octet()).unwrap();
        let small = b
            .add(Integral::octet().with_choices(vec![BigInt::from(1), BigInt::from(2)]).unwrap())
            .unwrap();
        let smaller = b
            .add(Integral::octet().with_choices(vec![BigInt::from(2)]).unwrap())
            .unwrap();
        let schema = b.build().unwrap();

        assert!(schema.is_restriction_of(&small, &open));
        assert!(schema.is_restriction_of(&smaller, &small));
        assert!(!schema.is_restriction_of(&small, &smaller));
        assert!(!schema.is_restriction_of(&open, &small));
        assert!(!schema.equals(&small, &open));
    }

    #[test]
    fn test_real_precision_must_not_grow() {
        let mut b = SchemaBuilder::new();
        let single = b.add(Real::single()).unwrap();
        let double = b.add(Real::double()).unwrap();
        let unit = b
            .add(Real::new(24, BigDecimal::from(0), BigDecimal::from(1)).unwrap())
            .unwrap();
        let schema = b.build().unwrap();

        assert!(schema.is_restriction_of(&single, &double));
        assert!(!schema.is_restriction_of(&double, &single));
        assert!(schema.is_restriction_of(&unit, &single));
    }

    #[test]
    fn test_repertoire_and_enumerated_subsets() {
        let mut b = SchemaBuilder::new();
        let ascii = b.add(Character::ascii()).unwrap();
        let latin = b.add(Character::latin1()).unwrap();
        let rgb = b.add(Enumerated::new(["red", "green", "blue"]).unwrap()).unwrap();
        let rg = b.add(Enumerated::new(["red", "green"]).unwrap()).unwrap();
        let gr = b.add(Enumerated::new(["green", "red"]).unwrap()).unwrap();
        let schema = b.build().unwrap();

        assert!(schema.is_restriction_of(&ascii, &latin));
        assert!(!schema.is_restriction_of(&latin, &ascii));
        assert!(schema.is_restriction_of(&rg, &rgb));
        assert!(!schema.equals(&rg, &gr));
    }

    #[test]
    fn test_sequence_pattern_and_element_covariance() {
        let mut b = SchemaBuilder::new();
        let ascii = b.add(Character::ascii()).unwrap();
        let latin = b.add(Character::latin1()).unwrap();
        let code = b
            .add(
                Sequence::new(ascii.clone(), Length::fixed(3))
                    .with_pattern(Pattern::new("[A-Z]+").unwrap()),
            )
            .unwrap();
        let text = b.add(Sequence::unbounded(latin)).unwrap();
        let patterned = b
            .add(Sequence::unbounded(ascii).with_pattern(Pattern::new("[a-z]+").unwrap()))
            .unwrap();
        let schema = b.build().unwrap();

        assert!(schema.is_restriction_of(&code, &text));
        assert!(!schema.is_restriction_of(&text, &code));
        assert!(!schema.is_restriction_of(&code, &patterned));
    }

    #[test]
    fn test_range_against_open_numeric() {
        let mut b = SchemaBuilder::new();
        let long = b.add(Integral::long()).unwrap();
        let byte = b.add(Integral::octet()).unwrap();
        let small = b.range(&long, 1, 12).unwrap();
        let small = b.add(small).unwrap();
        let wide = b.range(&long, -1, 12).unwrap();
        let wide = b.add(wide).unwrap();
        let within = b.range(&byte, 0, 100).unwrap();
        let within = b.add(within).unwrap();
        let schema = b.build().unwrap();

        assert!(schema.is_restriction_of(&small, &byte));
        assert!(!schema.is_restriction_of(&wide, &byte));
        assert!(schema.is_restriction_of(&byte, &long));
        assert!(!schema.is_restriction_of(&within, &wide));
        // Different bases, but every value of `small` is an octet within 0..=100.
        assert!(schema.is_restriction_of(&small, &within));
        assert_eq!(schema.to_value(&small, &Value::from(12)).unwrap(), Value::from(12));
    }

    #[test]
    fn test_non_range_against_range() {
        let mut b = SchemaBuilder::new();
        let int = b.add(Integral::integer()).unwrap();
        let nibble = b.add(Integral::new(0, 15).unwrap()).unwrap();
        let month = b.range(&int, 0, 31).unwrap();
        let month = b.add(month).unwrap();
        let schema = b.build().unwrap();

        assert!(schema.is_restriction_of(&nibble, &month));
        assert!(!schema.is_restriction_of(&int, &month));
    }

    #[test]
    fn test_set_restriction_follows_base() {
        let mut b = SchemaBuilder::new();
        let rgb = b.add(Enumerated::new(["red", "green", "blue"]).unwrap()).unwrap();
        let rg = b.add(Enumerated::new(["red", "green"]).unwrap()).unwrap();
        let wide = b.set(&rgb).unwrap();
        let wide = b.add(wide).unwrap();
        let narrow = b.set(&rg).unwrap();
        let narrow = b.add(narrow).unwrap();
        let schema = b.build().unwrap();

        assert!(schema.is_restriction_of(&narrow, &wide));
        assert!(!schema.is_restriction_of(&wide, &narrow));
    }

    #[test]
    fn test_ranges_over_different_enumerations_compare_by_name() {
        let mut b = SchemaBuilder::new();
        let e1 = b.add(Enumerated::new(["blue", "red"]).unwrap()).unwrap();
        let e2 = b.add(Enumerated::new(["red", "green", "blue"]).unwrap()).unwrap();
        let x = b.range(&e1, "blue", "red").unwrap();
        let x = b.add(x).unwrap();
        let y = b.range(&e2, "red", "green").unwrap();
        let y = b.add(y).unwrap();
        let only_red = b.range(&e1, "red", "red").unwrap();
        let only_red = b.add(only_red).unwrap();
        let schema = b.build().unwrap();

        assert!(schema.to_value(&x, &Value::text("blue")).is_ok());
        assert!(schema.to_value(&y, &Value::text("blue")).is_err());
        assert!(!schema.is_restriction_of(&x, &y));
        assert!(!schema.is_restriction_of(&e1, &y));
        assert!(schema.is_restriction_of(&only_red, &y));
        assert!(schema.is_restriction_of(&only_red, &e2));
        assert!(schema.is_restriction_of(&y, &e2));
        assert!(!schema.is_restriction_of(&e2, &y));
    }

    #[test]
    fn test_sets_over_different_enumerations_compare_by_name() {
        let mut b = SchemaBuilder::new();
        let e1 = b.add(Enumerated::new(["blue", "red"]).unwrap()).unwrap();
        let e2 = b.add(Enumerated::new(["red", "green", "blue"]).unwrap()).unwrap();
        let warm = b.range(&e2, "red", "green").unwrap();
        let warm = b.add(warm).unwrap();
        let red = b.range(&e1, "red", "red").unwrap();
        let red = b.add(red).unwrap();
        let sets = [&e1, &warm, &red].map(|base| b.set(base).unwrap());
        let [of_e1, of_warm, of_red] = sets.map(|set| b.add(set).unwrap());
        let schema = b.build().unwrap();

        assert!(!schema.is_restriction_of(&of_e1, &of_warm));
        assert!(schema.is_restriction_of(&of_red, &of_warm));
        assert!(schema.is_restriction_of(&of_red, &of_e1));
    }

    #[test]
    fn test_category_mismatch_is_false() {
        let mut b = SchemaBuilder::new();
        let byte = b.add(Integral::octet()).unwrap();
        let ch = b.add(Character::latin1()).unwrap();
        let schema = b.build().unwrap();
        assert!(!schema.equals(&byte, &ch));
        assert!(!schema.is_restriction_of(&byte, &ch));
    }
}
