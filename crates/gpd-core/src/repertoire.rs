//! # Character Repertoires
//!
//! A repertoire is the set of codepoints a character or string type admits.
//! It is stored as sorted, non-overlapping inclusive codepoint ranges so
//! membership, bounds and subset tests are all decidable.
//!
//! Named presets cover the repertoires the standard calls out; the full
//! per-charset lookup tables are not part of this crate.

use std::fmt;

use crate::error::ConstructionError;

const MAX_CODEPOINT: u32 = 0x10FFFF;

/// A named set of permitted codepoints.
///
/// Equality compares the codepoint sets, not the names.
#[derive(Debug, Clone)]
pub struct Repertoire {
    name: String,
    ranges: Vec<(u32, u32)>,
}

impl Repertoire {
    /// Build a repertoire from inclusive codepoint ranges.
    ///
    /// Ranges are sorted and merged; overlapping or adjacent ranges
    /// collapse into one.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCodepoints` for a range with `low > high` or beyond
    /// U+10FFFF, and `EmptyEnumeration` if no ranges are given.
    pub fn new(
        name: impl Into<String>,
        ranges: impl IntoIterator<Item = (u32, u32)>,
    ) -> Result<Self, ConstructionError> {
        let mut ranges: Vec<(u32, u32)> = ranges.into_iter().collect();
        if ranges.is_empty() {
            return Err(ConstructionError::EmptyEnumeration);
        }
        for &(low, high) in &ranges {
            if low > high || high > MAX_CODEPOINT {
                return Err(ConstructionError::InvalidCodepoints { low, high });
            }
        }
        ranges.sort_unstable();
        let mut merged: Vec<(u32, u32)> = Vec::with_capacity(ranges.len());
        for (low, high) in ranges {
            match merged.last_mut() {
                Some(last) if low <= last.1.saturating_add(1) => last.1 = last.1.max(high),
                _ => merged.push((low, high)),
            }
        }
        Ok(Self {
            name: name.into(),
            ranges: merged,
        })
    }

    fn preset(name: &str, ranges: &[(u32, u32)]) -> Self {
        Self {
            name: name.to_string(),
            ranges: ranges.to_vec(),
        }
    }

    /// US-ASCII, U+0000..U+007F.
    pub fn ascii() -> Self {
        Self::preset("ASCII", &[(0x00, 0x7F)])
    }

    /// ISO 8859-1, U+0000..U+00FF.
    pub fn latin1() -> Self {
        Self::preset("ISO-8859-1", &[(0x00, 0xFF)])
    }

    /// UCS-2: the Basic Multilingual Plane without surrogates.
    pub fn ucs2() -> Self {
        Self::preset("UCS-2", &[(0x0000, 0xD7FF), (0xE000, 0xFFFF)])
    }

    /// All Unicode scalar values.
    pub fn unicode() -> Self {
        Self::preset("UNICODE", &[(0x0000, 0xD7FF), (0xE000, MAX_CODEPOINT)])
    }

    /// Resolve a preset by name, case-insensitively, accepting common aliases.
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "ASCII" | "US-ASCII" | "ISO646" => Some(Self::ascii()),
            "LATIN1" | "LATIN-1" | "ISO-8859-1" | "ISO8859-1" => Some(Self::latin1()),
            "UCS2" | "UCS-2" | "BMP" => Some(Self::ucs2()),
            "UNICODE" | "UCS4" | "UCS-4" | "UTF-8" | "UTF8" => Some(Self::unicode()),
            _ => None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ranges(&self) -> &[(u32, u32)] {
        &self.ranges
    }

    pub fn contains(&self, c: char) -> bool {
        let cp = c as u32;
        self.ranges
            .binary_search_by(|&(low, high)| {
                if high < cp {
                    std::cmp::Ordering::Less
                } else if low > cp {
                    std::cmp::Ordering::Greater
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .is_ok()
    }

    /// Lowest codepoint in the repertoire.
    pub fn min_codepoint(&self) -> u32 {
        self.ranges.first().map_or(0, |r| r.0)
    }

    /// Highest codepoint in the repertoire.
    pub fn max_codepoint(&self) -> u32 {
        self.ranges.last().map_or(0, |r| r.1)
    }

    /// Number of codepoints in the repertoire.
    pub fn cardinality(&self) -> u64 {
        self.ranges
            .iter()
            .map(|&(low, high)| u64::from(high - low) + 1)
            .sum()
    }

    /// True if every codepoint of `self` is in `other`.
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.ranges.iter().all(|&(low, high)| {
            other
                .ranges
                .iter()
                .any(|&(olow, ohigh)| olow <= low && high <= ohigh)
        })
    }
}

impl PartialEq for Repertoire {
    fn eq(&self, other: &Self) -> bool {
        self.ranges == other.ranges
    }
}

impl Eq for Repertoire {}

impl fmt::Display for Repertoire {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin1_membership() {
        let r = Repertoire::latin1();
        assert!(r.contains('A'));
        assert!(r.contains('\u{00FF}'));
        assert!(!r.contains('\u{0100}'));
    }

    #[test]
    fn test_preset_subsets() {
        assert!(Repertoire::ascii().is_subset_of(&Repertoire::latin1()));
        assert!(Repertoire::latin1().is_subset_of(&Repertoire::ucs2()));
        assert!(Repertoire::ucs2().is_subset_of(&Repertoire::unicode()));
        assert!(!Repertoire::unicode().is_subset_of(&Repertoire::ucs2()));
    }

    #[test]
    fn test_new_merges_ranges() {
        let r = Repertoire::new("digits+letters", [(0x41, 0x5A), (0x30, 0x39), (0x3A, 0x40)])
            .unwrap();
        assert_eq!(r.ranges(), &[(0x30, 0x5A)]);
        assert_eq!(r.cardinality(), 0x5A - 0x30 + 1);
    }

    #[test]
    fn test_new_rejects_invalid() {
        assert!(Repertoire::new("bad", [(0x20, 0x10)]).is_err());
        assert!(Repertoire::new("bad", [(0, 0x110000)]).is_err());
        assert!(Repertoire::new("empty", Vec::new()).is_err());
    }

    #[test]
    fn test_by_name_aliases() {
        assert_eq!(Repertoire::by_name("latin-1"), Some(Repertoire::latin1()));
        assert_eq!(Repertoire::by_name("US-ASCII"), Some(Repertoire::ascii()));
        assert!(Repertoire::by_name("EBCDIC").is_none());
    }

    #[test]
    fn test_codepoint_bounds() {
        let r = Repertoire::ucs2();
        assert_eq!(r.min_codepoint(), 0);
        assert_eq!(r.max_codepoint(), 0xFFFF);
        assert!(!r.contains('\u{10000}'));
    }
}
