//! Release version type: strict `major.minor.patch` with numeric ordering

use crate::error::{BoardError, Result};
use serde::de::{Deserializer, Error as DeError};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A strict semantic version triple.
///
/// Accepts exactly `major.minor.patch` with all-digit components
/// (`"0.2"` or `"1.2.3-rc1"` are rejected). Ordering is numeric per
/// component, never lexicographic, so `0.10.0 > 0.9.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Create a version from its components
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse a strict `major.minor.patch` string
    pub fn parse(raw: &str) -> Result<Version> {
        let mut parts = raw.split('.');
        let (major, minor, patch) = match (parts.next(), parts.next(), parts.next(), parts.next())
        {
            (Some(major), Some(minor), Some(patch), None) => (major, minor, patch),
            _ => return Err(BoardError::invalid_version(raw)),
        };

        let component = |s: &str| -> Result<u64> {
            if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
                return Err(BoardError::invalid_version(raw));
            }
            s.parse().map_err(|_| BoardError::invalid_version(raw))
        };

        Ok(Version {
            major: component(major)?,
            minor: component(minor)?,
            patch: component(patch)?,
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Version::parse(&raw).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!(Version::parse("0.3.0").unwrap(), Version::new(0, 3, 0));
        assert_eq!(Version::parse("12.0.99").unwrap(), Version::new(12, 0, 99));
    }

    #[test]
    fn test_parse_rejects_missing_patch() {
        assert!(Version::parse("0.2").is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for raw in ["", "1", "1.2.3.4", "v1.2.3", "1.2.x", "1..3", "1.2.3-rc1"] {
            assert!(Version::parse(raw).is_err(), "should reject {raw:?}");
        }
    }

    #[test]
    fn test_ordering_is_numeric() {
        assert!(Version::parse("0.10.0").unwrap() > Version::parse("0.9.0").unwrap());
        assert!(Version::parse("1.0.0").unwrap() > Version::parse("0.99.99").unwrap());
        assert!(Version::parse("0.2.0").unwrap() < Version::parse("0.3.0").unwrap());
        assert!(Version::parse("0.2.0").unwrap() > Version::parse("0.1.5").unwrap());
    }

    #[test]
    fn test_serialization_as_string() {
        let v = Version::new(1, 4, 2);
        assert_eq!(serde_json::to_string(&v).unwrap(), "\"1.4.2\"");
        let parsed: Version = serde_json::from_str("\"1.4.2\"").unwrap();
        assert_eq!(parsed, v);
    }
}
