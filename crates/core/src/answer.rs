//! Answer matching shared by single-quiz tests and play sessions.
//!
//! Both sides are trimmed and upper-cased before an exact comparison. There is
//! no partial credit and no locale-aware collation beyond simple case folding.

/// Returns the canonical form an answer is compared in.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.trim().to_uppercase()
}

/// Returns true when `submitted` is an acceptable answer for `expected`.
#[must_use]
pub fn matches(submitted: &str, expected: &str) -> bool {
    normalize(submitted) == normalize(expected)
}
