//! # Primitive Datatypes
//!
//! Leaf domains that need no other type to validate a value: boolean,
//! integral, real, character and enumerated. Each fixes its domain at
//! construction and is immutable thereafter.
//!
//! There is one parametrized type per category. The familiar fixed-width
//! types are presets: [`Integral::octet`] is `Integral(0, 255)`,
//! [`Real::double`] is `Real(53 bits, ±1.797…e308)`.

use bigdecimal::num_bigint::BigInt;
use bigdecimal::BigDecimal;
use std::str::FromStr;

use gpd_core::{
    BoundedRange, Comparable, ConstructionError, Enumeration, Facet, Repertoire, Representation,
    Value, ValueError, ValueErrorKind,
};

// ─── Boolean ─────────────────────────────────────────────────────────

/// Validate a boolean. Accepts `Boolean` and the texts `true`/`false`.
pub(crate) fn boolean_to_value(raw: &Value) -> Result<Value, ValueError> {
    match raw {
        Value::Boolean(b) => Ok(Value::Boolean(*b)),
        Value::Text(s) if s.eq_ignore_ascii_case("true") => Ok(Value::Boolean(true)),
        Value::Text(s) if s.eq_ignore_ascii_case("false") => Ok(Value::Boolean(false)),
        other => Err(ValueError::mismatch(
            Representation::Boolean,
            other.representation(),
        )),
    }
}

// ─── Integral ────────────────────────────────────────────────────────

/// Integers within inclusive arbitrary-precision bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Integral {
    range: BoundedRange<BigInt>,
    choices: Option<Enumeration<BigInt>>,
}

impl Integral {
    /// # Errors
    ///
    /// Returns `InvertedBounds` if `min > max`.
    pub fn new(min: impl Into<BigInt>, max: impl Into<BigInt>) -> Result<Self, ConstructionError> {
        Ok(Self {
            range: BoundedRange::new(min.into(), max.into())?,
            choices: None,
        })
    }

    fn preset(min: i64, max: i64) -> Self {
        Self {
            range: BoundedRange::spanning(BigInt::from(min), BigInt::from(max)),
            choices: None,
        }
    }

    /// 0..=255.
    pub fn octet() -> Self {
        Self::preset(0, 255)
    }

    /// -32768..=32767.
    pub fn short() -> Self {
        Self::preset(i64::from(i16::MIN), i64::from(i16::MAX))
    }

    /// 0..=65535.
    pub fn unsigned_short() -> Self {
        Self::preset(0, i64::from(u16::MAX))
    }

    /// 32-bit signed.
    pub fn integer() -> Self {
        Self::preset(i64::from(i32::MIN), i64::from(i32::MAX))
    }

    /// 32-bit unsigned.
    pub fn unsigned_int() -> Self {
        Self::preset(0, i64::from(u32::MAX))
    }

    /// 64-bit signed.
    pub fn long() -> Self {
        Self::preset(i64::MIN, i64::MAX)
    }

    /// Restrict the type to a closed list of values.
    ///
    /// # Errors
    ///
    /// Returns `InvalidChoice` if a literal lies outside the bounds, or an
    /// enumeration error for an empty or repeating list.
    pub fn with_choices(mut self, choices: Vec<BigInt>) -> Result<Self, ConstructionError> {
        for choice in &choices {
            if let Err(e) = self.range.check(choice) {
                return Err(ConstructionError::InvalidChoice {
                    choice: choice.to_string(),
                    reason: e.message,
                });
            }
        }
        self.choices = Some(Enumeration::new(choices)?);
        Ok(self)
    }

    pub fn range(&self) -> &BoundedRange<BigInt> {
        &self.range
    }

    pub fn min(&self) -> &BigInt {
        self.range.min_inclusive()
    }

    pub fn max(&self) -> &BigInt {
        self.range.max_inclusive()
    }

    pub fn choices(&self) -> Option<&Enumeration<BigInt>> {
        self.choices.as_ref()
    }

    pub(crate) fn to_value(&self, raw: &Value) -> Result<Value, ValueError> {
        let n = match raw {
            Value::Integer(i) => i.clone(),
            Value::Decimal(d) if d.is_integer() => d.with_scale(0).as_bigint_and_exponent().0,
            Value::Text(s) => BigInt::from_str(s.trim()).map_err(|_| {
                ValueError::new(
                    ValueErrorKind::DataTypeMismatch,
                    Facet::Representation,
                    format!("{s:?} is not an integer"),
                )
            })?,
            other => {
                return Err(ValueError::mismatch(
                    Representation::Integer,
                    other.representation(),
                ))
            }
        };
        self.range.check(&n)?;
        if let Some(choices) = &self.choices {
            choices.check(&n)?;
        }
        Ok(Value::Integer(n))
    }
}

// ─── Real ────────────────────────────────────────────────────────────

/// Decimal approximations of real numbers with a binary precision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Real {
    precision_bits: u32,
    range: BoundedRange<BigDecimal>,
    choices: Option<Enumeration<BigDecimal>>,
}

impl Real {
    /// # Errors
    ///
    /// Returns `NonPositive` for zero precision and `InvertedBounds` if
    /// `min > max`.
    pub fn new(
        precision_bits: u32,
        min: BigDecimal,
        max: BigDecimal,
    ) -> Result<Self, ConstructionError> {
        if precision_bits == 0 {
            return Err(ConstructionError::NonPositive {
                what: "precision",
                value: precision_bits.to_string(),
            });
        }
        Ok(Self {
            precision_bits,
            range: BoundedRange::new(min.normalized(), max.normalized())?,
            choices: None,
        })
    }

    fn preset(precision_bits: u32, mantissa: i64, exponent: i64) -> Self {
        let max = BigDecimal::new(BigInt::from(mantissa), -exponent);
        let min = -max.clone();
        Self {
            precision_bits,
            range: BoundedRange::spanning(min, max),
            choices: None,
        }
    }

    /// IEEE 754 binary32 range with 24 bits of precision.
    pub fn single() -> Self {
        Self::preset(24, 34_028_235, 31)
    }

    /// IEEE 754 binary64 range with 53 bits of precision.
    pub fn double() -> Self {
        Self::preset(53, 17_976_931_348_623_157, 292)
    }

    /// # Errors
    ///
    /// Returns `InvalidChoice` if a literal lies outside the bounds.
    pub fn with_choices(mut self, choices: Vec<BigDecimal>) -> Result<Self, ConstructionError> {
        let mut canonical = Vec::with_capacity(choices.len());
        for choice in choices {
            let rounded = self.round(&choice);
            let checked = self
                .range
                .check(&choice)
                .and_then(|()| self.range.check(&rounded));
            if let Err(e) = checked {
                return Err(ConstructionError::InvalidChoice {
                    choice: choice.to_string(),
                    reason: e.message,
                });
            }
            canonical.push(rounded);
        }
        self.choices = Some(Enumeration::new(canonical)?);
        Ok(self)
    }

    pub fn precision_bits(&self) -> u32 {
        self.precision_bits
    }

    /// Significant decimal digits: `ceil(bits · log10 2)`.
    pub fn precision_digits(&self) -> u64 {
        (u64::from(self.precision_bits) * 30_103).div_ceil(100_000)
    }

    pub fn range(&self) -> &BoundedRange<BigDecimal> {
        &self.range
    }

    pub fn choices(&self) -> Option<&Enumeration<BigDecimal>> {
        self.choices.as_ref()
    }

    fn round(&self, d: &BigDecimal) -> BigDecimal {
        d.with_prec(self.precision_digits()).normalized()
    }

    pub(crate) fn to_value(&self, raw: &Value) -> Result<Value, ValueError> {
        let d = match raw {
            Value::Decimal(d) => d.clone(),
            Value::Integer(i) => BigDecimal::from(i.clone()),
            Value::Text(s) => BigDecimal::from_str(s.trim()).map_err(|_| {
                ValueError::new(
                    ValueErrorKind::DataTypeMismatch,
                    Facet::Representation,
                    format!("{s:?} is not a decimal number"),
                )
            })?,
            other => {
                return Err(ValueError::mismatch(
                    Representation::Decimal,
                    other.representation(),
                ))
            }
        };
        // Bounds apply to the value as given; rounding must not pull an
        // out-of-range value back onto a bound, nor push one off it.
        self.range.check(&d)?;
        let canonical = self.round(&d);
        self.range.check(&canonical)?;
        if let Some(choices) = &self.choices {
            choices.check(&canonical)?;
        }
        Ok(Value::Decimal(canonical))
    }
}

// ─── Character ───────────────────────────────────────────────────────

/// A single character drawn from a repertoire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    repertoire: Repertoire,
}

impl Character {
    pub fn new(repertoire: Repertoire) -> Self {
        Self { repertoire }
    }

    pub fn ascii() -> Self {
        Self::new(Repertoire::ascii())
    }

    pub fn latin1() -> Self {
        Self::new(Repertoire::latin1())
    }

    pub fn ucs2() -> Self {
        Self::new(Repertoire::ucs2())
    }

    pub fn unicode() -> Self {
        Self::new(Repertoire::unicode())
    }

    pub fn repertoire(&self) -> &Repertoire {
        &self.repertoire
    }

    /// Codepoint bounds of the repertoire.
    pub fn bounds(&self) -> (Comparable, Comparable) {
        (
            Comparable::from(i64::from(self.repertoire.min_codepoint())),
            Comparable::from(i64::from(self.repertoire.max_codepoint())),
        )
    }

    /// Representation check only: a `Character` or a one-character `Text`.
    pub(crate) fn extract(raw: &Value) -> Result<char, ValueError> {
        match raw {
            Value::Character(c) => Ok(*c),
            Value::Text(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(c),
                    _ => Err(ValueError::new(
                        ValueErrorKind::DataTypeMismatch,
                        Facet::Representation,
                        format!("{s:?} is not a single character"),
                    )),
                }
            }
            other => Err(ValueError::mismatch(
                Representation::Character,
                other.representation(),
            )),
        }
    }

    pub(crate) fn check_repertoire(&self, c: char) -> Result<(), ValueError> {
        if self.repertoire.contains(c) {
            Ok(())
        } else {
            Err(ValueError::new(
                ValueErrorKind::CharacterNotInRepertoire,
                Facet::Repertoire,
                format!("U+{:04X} is not in {}", c as u32, self.repertoire),
            ))
        }
    }

    pub(crate) fn to_value(&self, raw: &Value) -> Result<Value, ValueError> {
        let c = Self::extract(raw)?;
        self.check_repertoire(c)?;
        Ok(Value::Character(c))
    }
}

// ─── Enumerated ──────────────────────────────────────────────────────

/// An ordered list of value names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enumerated {
    values: Enumeration<String>,
}

impl Enumerated {
    /// # Errors
    ///
    /// Returns `EmptyEnumeration` or `DuplicateLiteral`.
    pub fn new<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Result<Self, ConstructionError> {
        Ok(Self {
            values: Enumeration::new(values.into_iter().map(Into::into).collect())?,
        })
    }

    pub fn values(&self) -> &[String] {
        self.values.choices()
    }

    pub fn enumeration(&self) -> &Enumeration<String> {
        &self.values
    }

    pub fn ordinal(&self, name: &str) -> Option<usize> {
        self.values.choices().iter().position(|v| v == name)
    }

    /// Ordinal bounds `0..=len-1`.
    pub fn bounds(&self) -> (Comparable, Comparable) {
        let last = i64::try_from(self.values.len().saturating_sub(1)).unwrap_or(i64::MAX);
        (Comparable::from(0), Comparable::from(last))
    }

    /// The list with `more` appended, leaving `self` untouched.
    pub(crate) fn extended<S: Into<String>>(
        &self,
        more: impl IntoIterator<Item = S>,
    ) -> Result<Self, ConstructionError> {
        let mut values = self.values.choices().to_vec();
        values.extend(more.into_iter().map(Into::into));
        Ok(Self {
            values: Enumeration::new(values)?,
        })
    }

    pub(crate) fn to_value(&self, raw: &Value) -> Result<Value, ValueError> {
        let name = match raw {
            Value::Symbol(s) | Value::Text(s) => s,
            other => {
                return Err(ValueError::mismatch(
                    Representation::Symbol,
                    other.representation(),
                ))
            }
        };
        self.values.check(name)?;
        Ok(Value::Symbol(name.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integral_octet_bounds() {
        let t = Integral::octet();
        assert_eq!(
            t.to_value(&Value::from(-1i64)).unwrap_err().kind,
            ValueErrorKind::NumericOutOfRange
        );
        assert_eq!(t.to_value(&Value::from(255i64)).unwrap(), Value::from(255i64));
        assert_eq!(
            t.to_value(&Value::from(256i64)).unwrap_err().facet,
            Facet::MaxInclusive
        );
    }

    #[test]
    fn test_integral_accepts_text_and_integral_decimal() {
        let t = Integral::short();
        assert_eq!(t.to_value(&Value::text(" 42 ")).unwrap(), Value::from(42i64));
        let d = BigDecimal::from_str("7.00").unwrap();
        assert_eq!(t.to_value(&Value::Decimal(d)).unwrap(), Value::from(7i64));
        let frac = BigDecimal::from_str("7.5").unwrap();
        assert_eq!(
            t.to_value(&Value::Decimal(frac)).unwrap_err().kind,
            ValueErrorKind::DataTypeMismatch
        );
    }

    #[test]
    fn test_integral_rejects_inverted() {
        assert!(matches!(
            Integral::new(10, 1).unwrap_err(),
            ConstructionError::InvertedBounds { .. }
        ));
    }

    #[test]
    fn test_integral_choices() {
        let t = Integral::octet()
            .with_choices(vec![BigInt::from(1), BigInt::from(2)])
            .unwrap();
        assert!(t.to_value(&Value::from(2i64)).is_ok());
        assert_eq!(
            t.to_value(&Value::from(3i64)).unwrap_err().kind,
            ValueErrorKind::NoMatchingChoice
        );
        assert!(Integral::octet().with_choices(vec![BigInt::from(300)]).is_err());
    }

    #[test]
    fn test_real_rounds_to_precision() {
        let t = Real::single();
        assert_eq!(t.precision_digits(), 8);
        let v = t
            .to_value(&Value::Decimal(BigDecimal::from_str("3.14159265358979").unwrap()))
            .unwrap();
        assert_eq!(v, Value::Decimal(BigDecimal::from_str("3.1415927").unwrap()));
        assert_eq!(t.to_value(&v).unwrap(), v);
    }

    #[test]
    fn test_real_rejects_zero_precision() {
        assert!(matches!(
            Real::new(0, BigDecimal::from(0), BigDecimal::from(1)).unwrap_err(),
            ConstructionError::NonPositive { .. }
        ));
    }

    #[test]
    fn test_real_bounds() {
        let t = Real::new(53, BigDecimal::from(0), BigDecimal::from(1)).unwrap();
        assert_eq!(
            t.to_value(&Value::text("1.5")).unwrap_err().kind,
            ValueErrorKind::NumericOutOfRange
        );
        assert!(t.to_value(&Value::from(1i64)).is_ok());
    }

    #[test]
    fn test_real_bounds_checked_before_rounding() {
        let t = Real::new(24, BigDecimal::from(0), BigDecimal::from(1)).unwrap();
        let above = Value::Decimal(BigDecimal::from_str("1.000000001").unwrap());
        let err = t.to_value(&above).unwrap_err();
        assert_eq!(err.kind, ValueErrorKind::NumericOutOfRange);
        assert_eq!(err.facet, Facet::MaxInclusive);
        let below = Value::Decimal(BigDecimal::from_str("-0.000000001").unwrap());
        assert_eq!(t.to_value(&below).unwrap_err().facet, Facet::MinInclusive);
        let inside = Value::Decimal(BigDecimal::from_str("0.999999999").unwrap());
        assert_eq!(t.to_value(&inside).unwrap(), Value::Decimal(BigDecimal::from(1)));
        assert!(t
            .with_choices(vec![BigDecimal::from_str("1.000000001").unwrap()])
            .is_err());
    }

    #[test]
    fn test_character() {
        let t = Character::latin1();
        assert_eq!(t.to_value(&Value::text("é")).unwrap(), Value::Character('é'));
        assert_eq!(
            t.to_value(&Value::Character('\u{0100}')).unwrap_err().kind,
            ValueErrorKind::CharacterNotInRepertoire
        );
        assert_eq!(
            t.to_value(&Value::text("ab")).unwrap_err().kind,
            ValueErrorKind::DataTypeMismatch
        );
    }

    #[test]
    fn test_boolean() {
        assert_eq!(boolean_to_value(&Value::text("TRUE")).unwrap(), Value::Boolean(true));
        assert!(boolean_to_value(&Value::from(1i64)).is_err());
    }

    #[test]
    fn test_enumerated() {
        let t = Enumerated::new(["red", "green", "blue"]).unwrap();
        assert_eq!(t.to_value(&Value::text("green")).unwrap(), Value::symbol("green"));
        assert_eq!(
            t.to_value(&Value::text("Green")).unwrap_err().kind,
            ValueErrorKind::NoMatchingChoice
        );
        assert_eq!(t.ordinal("blue"), Some(2));
        let grown = t.extended(["cyan"]).unwrap();
        assert_eq!(grown.values().len(), 4);
        assert!(t.extended(["red"]).is_err());
    }
}
