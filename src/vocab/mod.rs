// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The vocabulary: every distinct term in the archive, in a fixed order.
//!
//! A term's position in this list *is* its word ID. The fuzzy automaton and
//! the n-gram index both speak in word IDs, and the positional index is keyed
//! by them, so the list has to be exactly the one the index was built with.
//! It is loaded once and never changes afterwards.

use crate::error::VocabularyError;
use crate::types::WordId;
use std::collections::HashMap;
use std::path::Path;

/// Ordered, duplicate-free term list with O(1) lookups both ways.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    words: Vec<String>,
    ids: HashMap<String, WordId>,
}

impl Vocabulary {
    /// Build from terms in word-ID order. Duplicates are rejected: two IDs
    /// for one term would make exact lookup ambiguous.
    pub fn new(words: Vec<String>) -> Result<Self, VocabularyError> {
        let mut ids = HashMap::with_capacity(words.len());
        for (id, word) in words.iter().enumerate() {
            if ids.insert(word.clone(), id as WordId).is_some() {
                return Err(VocabularyError::Duplicate { term: word.clone() });
            }
        }
        Ok(Self { words, ids })
    }

    /// Decode a JSON array of strings (`words.json`).
    pub fn from_json(bytes: &[u8]) -> Result<Self, VocabularyError> {
        let words: Vec<String> = serde_json::from_slice(bytes)?;
        Self::new(words)
    }

    /// Read and decode a `words.json` file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, VocabularyError> {
        let bytes = tokio::fs::read(path).await?;
        Self::from_json(&bytes)
    }

    /// Exact lookup. `None` if the term is not in the archive.
    pub fn index_of(&self, term: &str) -> Option<WordId> {
        self.ids.get(term).copied()
    }

    /// Inverse lookup.
    pub fn word_at(&self, id: WordId) -> Result<&str, VocabularyError> {
        self.words
            .get(id as usize)
            .map(String::as_str)
            .ok_or(VocabularyError::OutOfRange {
                id,
                len: self.words.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// `(word ID, term)` pairs in ID order.
    pub fn iter(&self) -> impl Iterator<Item = (WordId, &str)> + '_ {
        self.words
            .iter()
            .enumerate()
            .map(|(id, word)| (id as WordId, word.as_str()))
    }
}
