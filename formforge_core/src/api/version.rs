//! API version literals and their total order.

use crate::error::{FormforgeError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A dotted numeric version with an optional qualifier suffix.
///
/// Ordering, equality and hashing consider the numeric segments only
/// (missing segments count as zero, so `4` equals `4.0`). A qualifier such
/// as `-SNAPSHOT` never elevates or demotes a version; it is tracked purely
/// for display and diagnostics. This is what makes a snapshot resolve
/// exactly like its release.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiVersion {
    segments: Vec<u32>,
    qualifier: Option<String>,
}

impl ApiVersion {
    pub fn new(segments: impl Into<Vec<u32>>) -> Self {
        ApiVersion {
            segments: segments.into(),
            qualifier: None,
        }
    }

    pub fn with_qualifier(segments: impl Into<Vec<u32>>, qualifier: impl Into<String>) -> Self {
        ApiVersion {
            segments: segments.into(),
            qualifier: Some(qualifier.into()),
        }
    }

    pub fn segments(&self) -> &[u32] {
        &self.segments
    }

    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }

    pub fn is_snapshot(&self) -> bool {
        self.qualifier
            .as_deref()
            .is_some_and(|q| q.eq_ignore_ascii_case("SNAPSHOT"))
    }

    pub fn major(&self) -> u32 {
        self.segments.first().copied().unwrap_or(0)
    }

    /// Parse `"11"`, `"11.4.5"` or `"4.3-SNAPSHOT"`.
    pub fn parse(literal: &str) -> Result<Self> {
        let (numbers, qualifier) = match literal.split_once('-') {
            Some((n, q)) => (n, Some(q.to_string())),
            None => (literal, None),
        };
        if numbers.is_empty() {
            return Err(FormforgeError::InvalidVersion(literal.to_string()));
        }
        let segments = numbers
            .split('.')
            .map(|s| {
                s.parse::<u32>()
                    .map_err(|_| FormforgeError::InvalidVersion(literal.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(ApiVersion {
            segments,
            qualifier,
        })
    }

    fn segment_or_zero(&self, idx: usize) -> u32 {
        self.segments.get(idx).copied().unwrap_or(0)
    }
}

impl FromStr for ApiVersion {
    type Err = FormforgeError;

    fn from_str(s: &str) -> Result<Self> {
        ApiVersion::parse(s)
    }
}

impl PartialEq for ApiVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ApiVersion {}

impl std::hash::Hash for ApiVersion {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        // trailing zeros are identity-neutral, consistent with Eq
        let mut len = self.segments.len();
        while len > 0 && self.segments[len - 1] == 0 {
            len -= 1;
        }
        self.segments[..len].hash(state);
    }
}

impl Ord for ApiVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        for idx in 0..len {
            match self.segment_or_zero(idx).cmp(&other.segment_or_zero(idx)) {
                Ordering::Equal => continue,
                other => return other,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for ApiVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .segments
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(".");
        match &self.qualifier {
            Some(q) => write!(f, "{}-{}", joined, q),
            None => write!(f, "{}", joined),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_and_display() {
        let v = ApiVersion::parse("11.4.5").unwrap();
        assert_eq!(v.segments(), &[11, 4, 5]);
        assert_eq!(v.to_string(), "11.4.5");

        let s = ApiVersion::parse("4.3-SNAPSHOT").unwrap();
        assert_eq!(s.segments(), &[4, 3]);
        assert!(s.is_snapshot());
        assert_eq!(s.to_string(), "4.3-SNAPSHOT");

        assert!(ApiVersion::parse("").is_err());
        assert!(ApiVersion::parse("4.x").is_err());
    }

    #[test]
    fn test_qualifier_does_not_elevate_ordering() {
        let release = ApiVersion::parse("4.4").unwrap();
        let snapshot = ApiVersion::parse("4.4-SNAPSHOT").unwrap();
        assert_eq!(release, snapshot);
        assert_eq!(release.cmp(&snapshot), Ordering::Equal);
    }

    #[test]
    fn test_missing_segments_count_as_zero() {
        assert_eq!(
            ApiVersion::parse("4").unwrap(),
            ApiVersion::parse("4.0.0").unwrap()
        );
        assert!(ApiVersion::parse("4").unwrap() < ApiVersion::parse("4.3").unwrap());
        assert!(ApiVersion::parse("4.3").unwrap() < ApiVersion::parse("4.4").unwrap());
    }

    proptest! {
        #[test]
        fn prop_ordering_is_antisymmetric(
            a in proptest::collection::vec(0u32..50, 1..4),
            b in proptest::collection::vec(0u32..50, 1..4),
        ) {
            let va = ApiVersion::new(a);
            let vb = ApiVersion::new(b);
            prop_assert_eq!(va.cmp(&vb), vb.cmp(&va).reverse());
        }

        #[test]
        fn prop_compare_with_self_is_equal(
            a in proptest::collection::vec(0u32..50, 1..4),
        ) {
            let va = ApiVersion::new(a);
            prop_assert_eq!(va.cmp(&va), Ordering::Equal);
        }
    }
}
