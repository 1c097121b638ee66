//! Highlight Aligner
//!
//! Computes how many leading characters of an autocomplete candidate are
//! already implied by the typed query, so the UI can bold them. Either string
//! may carry an embedded space the other lacks ("EC1A1BB" vs "EC1A 1BB"), so
//! a plain prefix comparison is not enough: the scan advances two independent
//! cursors and skips spaces on whichever side has one.

/// Returns the number of leading bytes of `candidate` covered by `search`.
///
/// Stops at the first real divergence and returns the candidate index reached
/// at that point. Postcodes are ASCII, so byte indices equal character
/// indices; non-ASCII input simply diverges at the first mismatching byte.
pub fn highlight_len(search: &str, candidate: &str) -> usize {
    let search = search.as_bytes();
    let candidate = candidate.as_bytes();
    let mut i = 0;
    let mut j = 0;

    while i < search.len() {
        if j < candidate.len() && candidate[j] == b' ' {
            j += 1;
        } else if search[i] == b' ' {
            i += 1;
        } else if j >= candidate.len() || search[i] != candidate[j] {
            return j;
        } else {
            i += 1;
            j += 1;
        }
    }

    j
}

/// Compares two postcodes ignoring embedded spaces.
///
/// "EC1A1BB" and "EC1A 1BB" denote the same postcode; the lookup service
/// returns the spaced rendering while users often type without the space.
pub fn eq_ignore_spaces(a: &str, b: &str) -> bool {
    let mut a = a.bytes().filter(|&b| b != b' ');
    let mut b = b.bytes().filter(|&b| b != b' ');
    loop {
        match (a.next(), b.next()) {
            (None, None) => return true,
            (x, y) if x == y => {}
            _ => return false,
        }
    }
}

#[cfg(test)]
#[path = "highlight_tests.rs"]
mod highlight_tests;
