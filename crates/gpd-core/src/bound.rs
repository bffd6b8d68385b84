//! # Comparable Bound Forms
//!
//! Ordered datatypes compare their values through a common numeric form:
//! integral values, character codepoints and enumeration ordinals map to
//! `Integer`; real values map to `Decimal`. Ranges store their bounds in this
//! form next to the native bound values, and sets use it to decide whether a
//! base fits their storage width.

use std::cmp::Ordering;
use std::fmt;

use bigdecimal::num_bigint::BigInt;
use bigdecimal::BigDecimal;

/// An ordered value reduced to a number.
///
/// Ordering between an `Integer` and a `Decimal` is numeric.
#[derive(Debug, Clone)]
pub enum Comparable {
    /// Integral value, codepoint or enumeration ordinal.
    Integer(BigInt),
    /// Real value.
    Decimal(BigDecimal),
}

impl Comparable {
    /// Widen to a decimal.
    pub fn to_decimal(&self) -> BigDecimal {
        match self {
            Self::Integer(i) => BigDecimal::from(i.clone()),
            Self::Decimal(d) => d.clone(),
        }
    }

    /// Returns the integer form, if this is integral.
    pub fn as_integer(&self) -> Option<&BigInt> {
        match self {
            Self::Integer(i) => Some(i),
            Self::Decimal(_) => None,
        }
    }
}

impl From<BigInt> for Comparable {
    fn from(i: BigInt) -> Self {
        Self::Integer(i)
    }
}

impl From<i64> for Comparable {
    fn from(i: i64) -> Self {
        Self::Integer(BigInt::from(i))
    }
}

impl From<BigDecimal> for Comparable {
    fn from(d: BigDecimal) -> Self {
        Self::Decimal(d)
    }
}

impl PartialEq for Comparable {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Comparable {}

impl PartialOrd for Comparable {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Comparable {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a.cmp(b),
            (Self::Decimal(a), Self::Decimal(b)) => a.cmp(b),
            _ => self.to_decimal().cmp(&other.to_decimal()),
        }
    }
}

impl fmt::Display for Comparable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{i}"),
            Self::Decimal(d) => write!(f, "{}", d.normalized()),
        }
    }
}
