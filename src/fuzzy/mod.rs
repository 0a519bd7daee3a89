// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzzy term oracle: prefix and bounded edit-distance search over the
//! vocabulary.
//!
//! The resolver only sees the [`Automaton`] trait. [`VocabularyAutomaton`] is
//! the in-process implementation; an FST-backed or remote oracle can sit
//! behind the same trait.

mod automaton;
mod levenshtein;

pub use automaton::VocabularyAutomaton;
pub use levenshtein::{levenshtein_within, BoundedLevenshtein};

use crate::types::WordId;
use async_trait::async_trait;
use std::sync::Arc;

/// Vocabulary word IDs matching a term under prefix or edit-distance rules.
///
/// All three searches are pure: same term, same answer. Results need not be
/// sorted or unique; the resolver unions them.
#[async_trait]
pub trait Automaton: Send + Sync {
    /// Words starting with `term` (including `term` itself).
    async fn prefix_search(&self, term: &str) -> Vec<WordId>;

    /// Words within one edit of `term`.
    async fn levenshtein1_search(&self, term: &str) -> Vec<WordId>;

    /// Words within two edits of `term`.
    async fn levenshtein2_search(&self, term: &str) -> Vec<WordId>;
}

#[async_trait]
impl<A: Automaton + ?Sized> Automaton for Arc<A> {
    async fn prefix_search(&self, term: &str) -> Vec<WordId> {
        (**self).prefix_search(term).await
    }

    async fn levenshtein1_search(&self, term: &str) -> Vec<WordId> {
        (**self).levenshtein1_search(term).await
    }

    async fn levenshtein2_search(&self, term: &str) -> Vec<WordId> {
        (**self).levenshtein2_search(term).await
    }
}
