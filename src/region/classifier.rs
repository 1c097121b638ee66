//! Region Classifier
//!
//! Classifies a partially typed postcode into a region label by matching its
//! 1-2 letter prefix against a region table. Pure function, called on every
//! keystroke, so it must stay allocation-light and never touch I/O.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::LazyLock;

use regex::Regex;

/// Mapping from a 1-2 letter uppercase postcode prefix to a region display name.
///
/// A `BTreeMap` keeps keys in lexicographic order, which the tie-break below
/// relies on.
pub type RegionTable = BTreeMap<String, String>;

/// Shape of a full or partial UK postcode: 1-2 area letters followed by the
/// district/sector/unit remainder (digits, letters and at most one space).
static POSTCODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z]{1,2})([0-9]?[A-Z]?[0-9 ]{0,3}[A-Z]{0,2})$")
        .expect("postcode pattern is valid")
});

/// Outcome of classifying a query string against a region table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionResult {
    /// The query looks like a postcode and its letter prefix maps to a region.
    Region(String),
    /// The query is empty; nothing to classify yet.
    Indeterminate,
    /// The query does not look like a postcode, or its prefix is unknown.
    /// Both failure modes collapse into this one variant: the UI treats them
    /// identically.
    Invalid,
}

impl RegionResult {
    /// Returns the region name if one was resolved.
    pub fn name(&self) -> Option<&str> {
        match self {
            RegionResult::Region(name) => Some(name),
            _ => None,
        }
    }
}

/// Classify an uppercased query string against the region table.
///
/// The candidate prefix is the leading 1-2 letter group of the postcode
/// pattern. Several table keys may start with that candidate (for `"E"` both
/// `"E"` and `"EC"` match); the lexicographically smallest matching key wins,
/// deterministically.
pub fn classify(raw: &str, table: &RegionTable) -> RegionResult {
    if raw.is_empty() {
        return RegionResult::Indeterminate;
    }

    let Some(caps) = POSTCODE_RE.captures(raw) else {
        return RegionResult::Invalid;
    };
    let candidate = caps.get(1).map(|m| m.as_str()).unwrap_or_default();

    // Keys sharing the candidate prefix are all >= the candidate, so in a
    // sorted map the first key in range that still starts with the candidate
    // is the lexicographically smallest match.
    table
        .range::<str, _>((Bound::Included(candidate), Bound::Unbounded))
        .take_while(|(key, _)| key.starts_with(candidate))
        .map(|(_, name)| RegionResult::Region(name.clone()))
        .next()
        .unwrap_or(RegionResult::Invalid)
}

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod classifier_tests;
