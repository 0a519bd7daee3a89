// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Term normalization.
//!
//! The archive vocabulary is stored lower-cased and in composed (NFC) form.
//! Query terms must land in the same shape or exact lookup misses: "Śiva"
//! typed with a combining acute must find the precomposed "śiva".
//!
//! Diacritics are *kept*. The corpus is full of transliterated Sanskrit, and
//! "sāṃkhya" vs "samkhya" is a distinction users search for on purpose. The
//! fuzzy sources exist to bridge the gap when they don't.

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

/// Normalize a single term: trim, NFC compose, lowercase.
///
/// # Example
///
/// ```
/// use proxima::normalize_term;
/// assert_eq!(normalize_term("  Yoga "), "yoga");
/// ```
#[cfg(feature = "unicode-normalization")]
pub fn normalize_term(term: &str) -> String {
    term.trim().nfc().collect::<String>().to_lowercase()
}

/// Lowercase-only normalization when the unicode tables are compiled out.
/// Assumes input is already composed.
#[cfg(not(feature = "unicode-normalization"))]
pub fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}
