// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Term resolver: one query term in, one [`TermNode`] out.
//!
//! For each term, concurrently:
//!
//! - every enabled fuzzy source (prefix, Levenshtein-1/2, n-gram) yields
//!   word IDs, which are unioned and mapped to candidate strings;
//! - the term's own positional record is fetched if the vocabulary knows it.
//!
//! Candidate records are *not* fetched here. They stay
//! [`SuggestionRecord::Unfetched`] until a caller selects one
//! (see [`fetch_selected`]).

use crate::error::Result;
use crate::query::TermNode;
use crate::searcher::SearchContext;
use crate::store::fetch_positional_record;
use crate::types::{PositionalIndexRecord, SearchTypeFlags, WordId};
use serde::Serialize;
use std::collections::btree_map;
use std::collections::{BTreeMap, BTreeSet};
use std::future::Future;
use tracing::{debug, warn};

/// Lazy positional record of one suggestion.
///
/// `Fetched` is final, including `Fetched(empty)`: a candidate whose fetch
/// found nothing is never fetched again within the same query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "record", rename_all = "lowercase")]
pub enum SuggestionRecord {
    Unfetched,
    Fetched(PositionalIndexRecord),
}

impl SuggestionRecord {
    pub fn is_fetched(&self) -> bool {
        matches!(self, SuggestionRecord::Fetched(_))
    }

    pub fn record(&self) -> Option<&PositionalIndexRecord> {
        match self {
            SuggestionRecord::Fetched(record) => Some(record),
            SuggestionRecord::Unfetched => None,
        }
    }
}

/// Candidate string → lazy record, in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SuggestionSet {
    entries: BTreeMap<String, SuggestionRecord>,
}

impl SuggestionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a candidate placeholder. An existing entry is left alone.
    pub fn insert_unfetched(&mut self, candidate: impl Into<String>) {
        self.entries
            .entry(candidate.into())
            .or_insert(SuggestionRecord::Unfetched);
    }

    pub fn insert_fetched(&mut self, candidate: impl Into<String>, record: PositionalIndexRecord) {
        self.entries
            .insert(candidate.into(), SuggestionRecord::Fetched(record));
    }

    pub fn contains(&self, candidate: &str) -> bool {
        self.entries.contains_key(candidate)
    }

    pub fn get(&self, candidate: &str) -> Option<&SuggestionRecord> {
        self.entries.get(candidate)
    }

    /// The fetched record of `candidate`; `None` if unknown or unfetched.
    pub fn record(&self, candidate: &str) -> Option<&PositionalIndexRecord> {
        self.get(candidate).and_then(SuggestionRecord::record)
    }

    /// Candidate strings, lexicographically sorted.
    pub fn candidates(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, SuggestionRecord> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolve one normalized term. Safe to run concurrently for every term of
/// a query; it only reads from `ctx`.
pub async fn resolve_term(ctx: &SearchContext, text: &str, flags: SearchTypeFlags) -> Result<TermNode> {
    let automaton = ctx.automaton();
    let (prefix, lev1, lev2, ngram, exact) = futures::join!(
        when(flags.prefix, automaton.prefix_search(text)),
        when(flags.levenshtein1, automaton.levenshtein1_search(text)),
        when(flags.levenshtein2, automaton.levenshtein2_search(text)),
        async {
            if flags.ngram {
                ctx.ngram().resolve(text, ctx.store()).await
            } else {
                Ok(Vec::new())
            }
        },
        fetch_exact(ctx, text),
    );

    let ids: BTreeSet<WordId> = prefix
        .into_iter()
        .chain(lev1)
        .chain(lev2)
        .chain(ngram?)
        .collect();

    let mut suggestions = SuggestionSet::new();
    for id in &ids {
        match ctx.vocabulary().word_at(*id) {
            Ok(word) => suggestions.insert_unfetched(word),
            Err(e) => warn!(term = text, error = %e, "automaton returned unknown word ID, skipping"),
        }
    }

    let is_exact_match = match exact? {
        Some(record) => {
            suggestions.insert_fetched(text, record);
            true
        }
        None => false,
    };

    debug!(
        term = text,
        is_exact_match,
        candidates = ids.len(),
        suggestions = suggestions.len(),
        "resolved term"
    );
    Ok(TermNode::new(text, is_exact_match, suggestions))
}

/// Fetch the record of `term.selected()` if it has not been fetched yet.
///
/// Returns the record to install; the caller decides when to write it into
/// the term node, so an abandoned query never leaves half-updated state.
/// A candidate unknown to the vocabulary or missing from the store resolves
/// to the empty record.
pub async fn fetch_selected(ctx: &SearchContext, term: &TermNode) -> Result<Option<PositionalIndexRecord>> {
    if term.is_resolved() {
        return Ok(None);
    }
    let candidate = term.selected();
    let record = match ctx.vocabulary().index_of(candidate) {
        Some(id) => fetch_positional_record(ctx.store(), id).await?,
        None => None,
    };
    debug!(term = %term.text, candidate, found = record.is_some(), "fetched selected suggestion");
    Ok(Some(record.unwrap_or_default()))
}

async fn fetch_exact(ctx: &SearchContext, text: &str) -> Result<Option<PositionalIndexRecord>> {
    match ctx.vocabulary().index_of(text) {
        Some(id) => fetch_positional_record(ctx.store(), id).await,
        None => Ok(None),
    }
}

async fn when<F>(enabled: bool, search: F) -> Vec<WordId>
where
    F: Future<Output = Vec<WordId>>,
{
    if enabled {
        search.await
    } else {
        Vec::new()
    }
}
