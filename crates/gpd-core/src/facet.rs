//! # Facets — Independently Checkable Constraints
//!
//! A facet is a named constraint a datatype may expose. Facets are plain
//! values: each has a validated constructor that rejects inconsistent
//! parameters (`min > max`, an invalid regex, an empty choice list) and a
//! check that classifies a violation into exactly one [`ValueErrorKind`].
//!
//! | Facet | Check failure |
//! |---|---|
//! | [`BoundedRange`] | `NumericOutOfRange` |
//! | [`Length`] | `BoundsRange` |
//! | [`Pattern`] | `PatternMismatch` |
//! | [`Enumeration`] | `NoMatchingChoice` |
//!
//! Character repertoires live in [`crate::repertoire`].

use std::fmt;

use regex::Regex;

use crate::error::{ConstructionError, Facet, ValueError, ValueErrorKind};

// ─── Bounded Range ───────────────────────────────────────────────────

/// Inclusive `[min, max]` bounds over an ordered value space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedRange<T> {
    min_inclusive: T,
    max_inclusive: T,
}

impl<T: Ord + fmt::Display> BoundedRange<T> {
    /// # Errors
    ///
    /// Returns `ConstructionError::InvertedBounds` if `min > max`.
    pub fn new(min_inclusive: T, max_inclusive: T) -> Result<Self, ConstructionError> {
        if min_inclusive > max_inclusive {
            return Err(ConstructionError::InvertedBounds {
                facet: Facet::MinInclusive,
                min: min_inclusive.to_string(),
                max: max_inclusive.to_string(),
            });
        }
        Ok(Self {
            min_inclusive,
            max_inclusive,
        })
    }

    /// Bounds spanning `a` and `b`, whichever order they come in.
    pub fn spanning(a: T, b: T) -> Self {
        if a <= b {
            Self {
                min_inclusive: a,
                max_inclusive: b,
            }
        } else {
            Self {
                min_inclusive: b,
                max_inclusive: a,
            }
        }
    }

    pub fn min_inclusive(&self) -> &T {
        &self.min_inclusive
    }

    pub fn max_inclusive(&self) -> &T {
        &self.max_inclusive
    }

    pub fn contains(&self, value: &T) -> bool {
        *value >= self.min_inclusive && *value <= self.max_inclusive
    }

    /// True if every value inside `self` is also inside `other`.
    pub fn is_within(&self, other: &Self) -> bool {
        self.min_inclusive >= other.min_inclusive && self.max_inclusive <= other.max_inclusive
    }

    /// # Errors
    ///
    /// Returns a `NumericOutOfRange` error naming the violated bound.
    pub fn check(&self, value: &T) -> Result<(), ValueError> {
        if *value < self.min_inclusive {
            return Err(ValueError::new(
                ValueErrorKind::NumericOutOfRange,
                Facet::MinInclusive,
                format!("{value} is below minimum {}", self.min_inclusive),
            ));
        }
        if *value > self.max_inclusive {
            return Err(ValueError::new(
                ValueErrorKind::NumericOutOfRange,
                Facet::MaxInclusive,
                format!("{value} is above maximum {}", self.max_inclusive),
            ));
        }
        Ok(())
    }
}

impl<T: fmt::Display> fmt::Display for BoundedRange<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min_inclusive, self.max_inclusive)
    }
}

// ─── Length ──────────────────────────────────────────────────────────

/// Element count bounds of a sequence. `max == None` is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Length {
    min: u64,
    max: Option<u64>,
}

impl Length {
    /// # Errors
    ///
    /// Returns `ConstructionError::InvertedBounds` if `min > max`.
    pub fn new(min: u64, max: Option<u64>) -> Result<Self, ConstructionError> {
        if let Some(max) = max {
            if min > max {
                return Err(ConstructionError::InvertedBounds {
                    facet: Facet::MinLength,
                    min: min.to_string(),
                    max: max.to_string(),
                });
            }
        }
        Ok(Self { min, max })
    }

    /// Exactly `n` elements.
    pub fn fixed(n: u64) -> Self {
        Self { min: n, max: Some(n) }
    }

    /// Any number of elements.
    pub fn unbounded() -> Self {
        Self { min: 0, max: None }
    }

    pub fn min(&self) -> u64 {
        self.min
    }

    pub fn max(&self) -> Option<u64> {
        self.max
    }

    pub fn is_fixed(&self) -> bool {
        self.max == Some(self.min)
    }

    pub fn contains(&self, count: u64) -> bool {
        count >= self.min && self.max.map_or(true, |max| count <= max)
    }

    /// True if every count accepted by `self` is accepted by `other`.
    pub fn is_within(&self, other: &Self) -> bool {
        if self.min < other.min {
            return false;
        }
        match (self.max, other.max) {
            (_, None) => true,
            (None, Some(_)) => false,
            (Some(a), Some(b)) => a <= b,
        }
    }

    /// # Errors
    ///
    /// Returns a `BoundsRange` error naming `minLength` or `maxLength`.
    pub fn check(&self, count: u64) -> Result<(), ValueError> {
        if count < self.min {
            return Err(ValueError::new(
                ValueErrorKind::BoundsRange,
                Facet::MinLength,
                format!("{count} elements, at least {} required", self.min),
            ));
        }
        if let Some(max) = self.max {
            if count > max {
                return Err(ValueError::new(
                    ValueErrorKind::BoundsRange,
                    Facet::MaxLength,
                    format!("{count} elements, at most {max} allowed"),
                ));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "[{}, {}]", self.min, max),
            None => write!(f, "[{}, *]", self.min),
        }
    }
}

// ─── Pattern ─────────────────────────────────────────────────────────

/// A regular expression a whole string must match.
///
/// The expression is anchored at both ends, as XML Schema patterns are.
/// Two patterns are equal when their sources are equal.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// # Errors
    ///
    /// Returns `ConstructionError::InvalidPattern` if `source` does not compile.
    pub fn new(source: impl Into<String>) -> Result<Self, ConstructionError> {
        let source = source.into();
        let regex = Regex::new(&format!("^(?:{source})$")).map_err(|e| {
            ConstructionError::InvalidPattern {
                pattern: source.clone(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self { source, regex })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// # Errors
    ///
    /// Returns a `PatternMismatch` error if `text` does not match.
    pub fn check(&self, text: &str) -> Result<(), ValueError> {
        if self.is_match(text) {
            Ok(())
        } else {
            Err(ValueError::new(
                ValueErrorKind::PatternMismatch,
                Facet::Pattern,
                format!("{text:?} does not match /{}/", self.source),
            ))
        }
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Pattern {}

// ─── Enumeration ─────────────────────────────────────────────────────

/// A closed, ordered list of permitted literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enumeration<T> {
    choices: Vec<T>,
}

impl<T: PartialEq + fmt::Display> Enumeration<T> {
    /// # Errors
    ///
    /// Returns `EmptyEnumeration` for an empty list and `DuplicateLiteral`
    /// if a literal repeats.
    pub fn new(choices: Vec<T>) -> Result<Self, ConstructionError> {
        if choices.is_empty() {
            return Err(ConstructionError::EmptyEnumeration);
        }
        for (i, choice) in choices.iter().enumerate() {
            if choices[..i].contains(choice) {
                return Err(ConstructionError::DuplicateLiteral {
                    literal: choice.to_string(),
                });
            }
        }
        Ok(Self { choices })
    }

    pub fn choices(&self) -> &[T] {
        &self.choices
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    pub fn contains(&self, value: &T) -> bool {
        self.choices.contains(value)
    }

    /// Position of `value` in declaration order.
    pub fn position(&self, value: &T) -> Option<usize> {
        self.choices.iter().position(|c| c == value)
    }

    /// True if every literal of `self` is a literal of `other`.
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.choices.iter().all(|c| other.contains(c))
    }

    /// Same literals regardless of order.
    pub fn same_literals(&self, other: &Self) -> bool {
        self.len() == other.len() && self.is_subset_of(other)
    }

    /// # Errors
    ///
    /// Returns a `NoMatchingChoice` error if `value` is not a literal.
    pub fn check(&self, value: &T) -> Result<(), ValueError> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(ValueError::new(
                ValueErrorKind::NoMatchingChoice,
                Facet::Enumeration,
                format!("{value} is not one of {} choices", self.choices.len()),
            ))
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// A value is accepted iff it lies between the bounds.
        #[test]
        fn bounded_range_check_matches_contains(a in any::<i32>(), b in any::<i32>(), v in any::<i32>()) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let r = BoundedRange::new(lo, hi).unwrap();
            prop_assert_eq!(r.check(&v).is_ok(), lo <= v && v <= hi);
        }

        /// Nested length windows are within each other.
        #[test]
        fn length_within_is_transitive(a in 0u64..10, b in 0u64..10, c in 0u64..10) {
            let outer = Length::new(a, Some(a + b + c + 2)).unwrap();
            let mid = Length::new(a + 1, Some(a + b + c + 1)).unwrap();
            let inner = Length::new(a + 1, Some(a + 1)).unwrap();
            prop_assert!(inner.is_within(&mid));
            prop_assert!(mid.is_within(&outer));
            prop_assert!(inner.is_within(&outer));
        }
    }
}
