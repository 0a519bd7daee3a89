// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! N-gram candidate resolver.
//!
//! Finds vocabulary words that share "enough" bigrams with a query term,
//! using only the n-gram → word-ID lists from the index store:
//!
//! 1. Pad the term and slice it into grams (`cat` → `_c ca at t_`).
//! 2. Fetch the candidate list of every distinct gram. Grams with no entry
//!    are dropped.
//! 3. `k = round_half_up(threshold × gram count)`. A word is similar if it
//!    appears in every list of at least one k-subset of the surviving grams.
//! 4. That is the same as appearing in at least k surviving lists, so the
//!    lists are merged once and each word's list count is checked against k.
//!
//! Repeated grams are kept in the count (step 3) even though each distinct
//! gram is fetched once. `"aaaa"` has five grams, two of them distinct.

use crate::config::{DEFAULT_GRAM_LENGTH, DEFAULT_NGRAM_PADDING, DEFAULT_SIMILARITY_THRESHOLD};
use crate::error::Result;
use crate::store::{fetch_ngram_candidates, IndexStore};
use crate::types::WordId;
use futures::future::try_join_all;
use itertools::Itertools;
use std::collections::HashSet;
use tracing::debug;

/// Pad `term` with `gram_length - 1` copies of `padding` on both ends and
/// slide a window of `gram_length` chars over it. Repeats are kept.
///
/// ```
/// use proxima::ngram::padded_ngrams;
/// assert_eq!(padded_ngrams("cat", 2, '_'), vec!["_c", "ca", "at", "t_"]);
/// ```
pub fn padded_ngrams(term: &str, gram_length: usize, padding: char) -> Vec<String> {
    if term.is_empty() || gram_length == 0 {
        return Vec::new();
    }
    let pad = gram_length - 1;
    let chars: Vec<char> = std::iter::repeat(padding)
        .take(pad)
        .chain(term.chars())
        .chain(std::iter::repeat(padding).take(pad))
        .collect();
    chars
        .windows(gram_length)
        .map(|window| window.iter().collect())
        .collect()
}

/// Minimum number of shared grams for a word to count as similar.
///
/// Round half up: a fractional part below 0.5 truncates, anything else
/// rounds up. Never less than 1 for a non-empty term.
pub fn required_matches(similarity_threshold: f64, gram_count: usize) -> usize {
    if gram_count == 0 {
        return 0;
    }
    let exact = similarity_threshold * gram_count as f64;
    let whole = exact.floor();
    let rounded = if exact - whole < 0.5 { whole } else { whole + 1.0 };
    (rounded as usize).clamp(1, gram_count)
}

/// Shared-gram ratio between two strings, in `[0, 1]`.
///
/// Each gram of the shorter string can be matched once against the grams of
/// the longer one; the hit count is divided by the longer string's gram
/// count. Either string empty ⇒ `0.0`.
pub fn similarity(a: &str, b: &str, gram_length: usize, padding: char) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let (shorter, longer) = if a.chars().count() < b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };
    let mut unmatched: HashSet<String> = padded_ngrams(shorter, gram_length, padding)
        .into_iter()
        .collect();
    let grams = padded_ngrams(longer, gram_length, padding);
    if grams.is_empty() {
        return 0.0;
    }
    let hits = grams.iter().filter(|gram| unmatched.remove(*gram)).count();
    hits as f64 / grams.len() as f64
}

/// Word IDs present in at least `required` of `lists`.
///
/// Same set as the union of the intersections of every `required`-sized
/// subset, computed with one k-way merge instead of enumerating subsets.
/// `lists` are the candidate lists of the grams that survived fetching, each
/// strictly ascending. Output is strictly ascending.
pub fn combine_candidate_lists(lists: &[Vec<WordId>], required: usize) -> Vec<WordId> {
    if required == 0 || required > lists.len() {
        return Vec::new();
    }
    lists
        .iter()
        .map(|list| list.iter().copied())
        .kmerge()
        .dedup_with_count()
        .filter(|&(count, _)| count >= required)
        .map(|(_, id)| id)
        .collect()
}

/// Resolves a term to n-gram-similar word IDs against an index store.
#[derive(Debug, Clone, PartialEq)]
pub struct NGramResolver {
    gram_length: usize,
    similarity_threshold: f64,
    padding: char,
}

impl Default for NGramResolver {
    fn default() -> Self {
        Self::new(DEFAULT_GRAM_LENGTH, DEFAULT_SIMILARITY_THRESHOLD)
    }
}

impl NGramResolver {
    pub fn new(gram_length: usize, similarity_threshold: f64) -> Self {
        Self {
            gram_length,
            similarity_threshold,
            padding: DEFAULT_NGRAM_PADDING,
        }
    }

    pub fn with_padding(mut self, padding: char) -> Self {
        self.padding = padding;
        self
    }

    pub fn gram_length(&self) -> usize {
        self.gram_length
    }

    pub fn padding(&self) -> char {
        self.padding
    }

    pub fn grams(&self, term: &str) -> Vec<String> {
        padded_ngrams(term, self.gram_length, self.padding)
    }

    /// Shared-gram ratio with this resolver's gram settings.
    pub fn similarity(&self, a: &str, b: &str) -> f64 {
        similarity(a, b, self.gram_length, self.padding)
    }

    /// Word IDs similar to `term`, ascending and deduplicated.
    ///
    /// A missing or unreadable gram contributes nothing. Only index
    /// corruption in a gram's candidate list is an error.
    pub async fn resolve(&self, term: &str, store: &dyn IndexStore) -> Result<Vec<WordId>> {
        let grams = self.grams(term);
        let required = required_matches(self.similarity_threshold, grams.len());
        let distinct: Vec<&str> = grams.iter().map(String::as_str).unique().collect();

        let fetched = try_join_all(
            distinct
                .iter()
                .map(|gram| fetch_ngram_candidates(store, gram)),
        )
        .await?;
        let lists: Vec<Vec<WordId>> = fetched.into_iter().filter(|l| !l.is_empty()).collect();

        let candidates = combine_candidate_lists(&lists, required);
        debug!(
            term,
            grams = grams.len(),
            distinct = distinct.len(),
            available = lists.len(),
            required,
            candidates = candidates.len(),
            "ngram resolution"
        );
        Ok(candidates)
    }
}
