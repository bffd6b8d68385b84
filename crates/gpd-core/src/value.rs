//! # Host Value Model
//!
//! `Value` is the host representation raw input arrives in and canonical
//! output leaves in. Every datatype declares the [`Representation`] it
//! produces; validation starts by checking that the raw value's shape is
//! compatible with it.
//!
//! JSON input is converted with [`Value::from_json`]: integral numbers become
//! `Integer`, numbers with a fraction or exponent become `Decimal`, objects
//! become `Record` with member order preserved.

use std::fmt;
use std::str::FromStr;

use bigdecimal::num_bigint::BigInt;
use bigdecimal::BigDecimal;
use serde_json::Value as Json;

/// Native host shape of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Representation {
    /// No value.
    Void,
    /// `true` / `false`.
    Boolean,
    /// Arbitrary-precision integer.
    Integer,
    /// Arbitrary-precision decimal.
    Decimal,
    /// A single Unicode scalar value.
    Character,
    /// A string of characters.
    Text,
    /// A string of bytes.
    Octets,
    /// A value name of an enumerated type.
    Symbol,
    /// An ordered collection.
    List,
    /// Named members in order.
    Record,
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Void => "void",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            Self::Character => "character",
            Self::Text => "text",
            Self::Octets => "octets",
            Self::Symbol => "symbol",
            Self::List => "list",
            Self::Record => "record",
        };
        f.write_str(s)
    }
}

/// A raw or canonical value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// No value; JSON `null`.
    Null,
    /// `true` / `false`.
    Boolean(bool),
    /// Arbitrary-precision integer.
    Integer(BigInt),
    /// Arbitrary-precision decimal.
    Decimal(BigDecimal),
    /// A single Unicode scalar value.
    Character(char),
    /// A string of characters.
    Text(String),
    /// A string of bytes.
    Octets(Vec<u8>),
    /// A value name of an enumerated type.
    Symbol(String),
    /// An ordered collection.
    List(Vec<Value>),
    /// Named members in order.
    Record(Vec<(String, Value)>),
}

impl Value {
    /// The host shape of this value.
    pub fn representation(&self) -> Representation {
        match self {
            Self::Null => Representation::Void,
            Self::Boolean(_) => Representation::Boolean,
            Self::Integer(_) => Representation::Integer,
            Self::Decimal(_) => Representation::Decimal,
            Self::Character(_) => Representation::Character,
            Self::Text(_) => Representation::Text,
            Self::Octets(_) => Representation::Octets,
            Self::Symbol(_) => Representation::Symbol,
            Self::List(_) => Representation::List,
            Self::Record(_) => Representation::Record,
        }
    }

    /// Shorthand for a text value.
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Shorthand for an enumerated value name.
    pub fn symbol(s: impl Into<String>) -> Self {
        Self::Symbol(s.into())
    }

    /// Shorthand for a list of integers.
    pub fn integers(items: impl IntoIterator<Item = i64>) -> Self {
        Self::List(items.into_iter().map(Self::from).collect())
    }

    /// Returns the string content of `Text` or `Symbol`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::Symbol(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer content of an `Integer`.
    pub fn as_integer(&self) -> Option<&BigInt> {
        match self {
            Self::Integer(i) => Some(i),
            _ => None,
        }
    }

    /// Looks up a record member by exact name.
    pub fn member(&self, name: &str) -> Option<&Value> {
        match self {
            Self::Record(members) => members.iter().find(|(n, _)| n == name).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Convert a JSON document into a value.
    ///
    /// Numbers that are not representable as `i64`/`u64` are parsed from
    /// their decimal rendering, so `1.5` and `1e3` become `Decimal`.
    pub fn from_json(json: &Json) -> Self {
        match json {
            Json::Null => Self::Null,
            Json::Bool(b) => Self::Boolean(*b),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Integer(BigInt::from(i))
                } else if let Some(u) = n.as_u64() {
                    Self::Integer(BigInt::from(u))
                } else {
                    match BigDecimal::from_str(&n.to_string()) {
                        Ok(d) => Self::Decimal(d),
                        Err(_) => Self::Text(n.to_string()),
                    }
                }
            }
            Json::String(s) => Self::Text(s.clone()),
            Json::Array(items) => Self::List(items.iter().map(Self::from_json).collect()),
            Json::Object(map) => Self::Record(
                map.iter()
                    .map(|(k, v)| (k.clone(), Self::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Render this value as JSON.
    ///
    /// Integers outside the `i64` range and all decimals render as strings
    /// so that no precision is lost.
    pub fn to_json(&self) -> Json {
        match self {
            Self::Null => Json::Null,
            Self::Boolean(b) => Json::Bool(*b),
            Self::Integer(i) => match i64::try_from(i) {
                Ok(small) => Json::from(small),
                Err(_) => Json::String(i.to_string()),
            },
            Self::Decimal(d) => Json::String(d.normalized().to_string()),
            Self::Character(c) => Json::String(c.to_string()),
            Self::Text(s) | Self::Symbol(s) => Json::String(s.clone()),
            Self::Octets(bytes) => Json::Array(bytes.iter().map(|b| Json::from(*b)).collect()),
            Self::List(items) => Json::Array(items.iter().map(Self::to_json).collect()),
            Self::Record(members) => Json::Object(
                members
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Decimal(d) => write!(f, "{}", d.normalized()),
            Self::Character(c) => write!(f, "{c:?}"),
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Octets(bytes) => {
                f.write_str("0x")?;
                for b in bytes {
                    write!(f, "{b:02x}")?;
                }
                Ok(())
            }
            Self::Symbol(s) => f.write_str(s),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Record(members) => {
                f.write_str("{")?;
                for (i, (name, v)) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}: {v}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(BigInt::from(i))
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Integer(BigInt::from(i))
    }
}

impl From<BigInt> for Value {
    fn from(i: BigInt) -> Self {
        Self::Integer(i)
    }
}

impl From<BigDecimal> for Value {
    fn from(d: BigDecimal) -> Self {
        Self::Decimal(d)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Self::Character(c)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}
