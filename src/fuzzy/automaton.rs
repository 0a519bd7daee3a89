// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use super::{Automaton, BoundedLevenshtein};
use crate::types::WordId;
use crate::vocab::Vocabulary;
use async_trait::async_trait;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// In-memory oracle built from a [`Vocabulary`].
///
/// Keeps the terms sorted lexicographically so prefix search is a binary
/// search plus a forward scan. Edit-distance search is a linear scan with the
/// length filter applied before any DP.
#[derive(Debug, Clone, Default)]
pub struct VocabularyAutomaton {
    /// `(term, char count, word ID)`, sorted by term.
    sorted: Vec<(String, usize, WordId)>,
}

impl VocabularyAutomaton {
    pub fn new(vocabulary: &Vocabulary) -> Self {
        let mut sorted: Vec<(String, usize, WordId)> = vocabulary
            .iter()
            .map(|(id, word)| (word.to_string(), word.chars().count(), id))
            .collect();
        sorted.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        Self { sorted }
    }

    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// Synchronous prefix search, ascending word IDs.
    pub fn prefix_matches(&self, term: &str) -> Vec<WordId> {
        if term.is_empty() {
            return Vec::new();
        }
        let start = self.sorted.partition_point(|(word, _, _)| word.as_str() < term);
        let mut ids: Vec<WordId> = self.sorted[start..]
            .iter()
            .take_while(|(word, _, _)| word.starts_with(term))
            .map(|&(_, _, id)| id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Synchronous edit-distance search (`<= max` edits), ascending word IDs.
    pub fn within_distance(&self, term: &str, max: usize) -> Vec<WordId> {
        if term.is_empty() {
            return Vec::new();
        }
        let matcher = BoundedLevenshtein::new(term, max);
        let admits = |entry: &(String, usize, WordId)| {
            matcher.length_admits(entry.1) && matcher.matches(&entry.0)
        };

        #[cfg(feature = "parallel")]
        let mut ids: Vec<WordId> = self
            .sorted
            .par_iter()
            .filter(|entry| admits(*entry))
            .map(|&(_, _, id)| id)
            .collect();

        #[cfg(not(feature = "parallel"))]
        let mut ids: Vec<WordId> = self
            .sorted
            .iter()
            .filter(|entry| admits(*entry))
            .map(|&(_, _, id)| id)
            .collect();

        ids.sort_unstable();
        ids
    }
}

#[async_trait]
impl Automaton for VocabularyAutomaton {
    async fn prefix_search(&self, term: &str) -> Vec<WordId> {
        self.prefix_matches(term)
    }

    async fn levenshtein1_search(&self, term: &str) -> Vec<WordId> {
        self.within_distance(term, 1)
    }

    async fn levenshtein2_search(&self, term: &str) -> Vec<WordId> {
        self.within_distance(term, 2)
    }
}
