// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query orchestration.
//!
//! ```text
//!  query string ──parse──▶ terms + operators
//!                              │
//!              ┌───────────────┼───────────────┐   fan-out, one future per
//!              ▼               ▼               ▼   term, joined by position
//!         resolve(t0)     resolve(t1)     resolve(t2)
//!              └───────────────┼───────────────┘
//!                              ▼
//!                     QueryAst (all exact?) ──no──▶ suggestions only
//!                              │ yes
//!                              ▼
//!                    engine walk (sequential)
//! ```
//!
//! # Cancellation
//!
//! A [`Searcher`] remembers the token of its in-flight query. Starting a new
//! query cancels the previous one, which then resolves to
//! [`SearchError::Cancelled`]. Resolution results are only written into a
//! query after every fetch has finished, so an abandoned query leaves nothing
//! behind.

use crate::config::SearchConfig;
use crate::engine::evaluate_cancellable;
use crate::error::{Result, SearchError};
use crate::fuzzy::{Automaton, VocabularyAutomaton};
use crate::ngram::NGramResolver;
use crate::query::{parse_query, QueryAst, TermNode};
use crate::resolve::{fetch_selected, resolve_term};
use crate::store::{DirectoryStore, IndexStore};
use crate::types::{PositionalIndexRecord, QueryResult, SearchTypeFlags};
use crate::vocab::Vocabulary;
use futures::future::try_join_all;
use parking_lot::Mutex;
use serde::Serialize;
use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Everything a query reads: vocabulary, fuzzy oracle, index store and
/// settings. Shared read-only between concurrent queries.
pub struct SearchContext {
    vocabulary: Arc<Vocabulary>,
    automaton: Arc<dyn Automaton>,
    store: Arc<dyn IndexStore>,
    ngram: NGramResolver,
    config: SearchConfig,
}

impl SearchContext {
    pub fn new(
        vocabulary: Arc<Vocabulary>,
        automaton: Arc<dyn Automaton>,
        store: Arc<dyn IndexStore>,
        config: SearchConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            vocabulary,
            automaton,
            store,
            ngram: config.ngram_resolver(),
            config,
        })
    }

    /// Context with the in-memory automaton built from `vocabulary`.
    pub fn with_store<S>(vocabulary: Vocabulary, store: S, config: SearchConfig) -> Result<Self>
    where
        S: IndexStore + 'static,
    {
        let automaton = VocabularyAutomaton::new(&vocabulary);
        Self::new(Arc::new(vocabulary), Arc::new(automaton), Arc::new(store), config)
    }

    /// Open a static index directory (`words.json` + sharded records).
    pub async fn open_directory(root: impl AsRef<Path>, config: SearchConfig) -> Result<Self> {
        let store = DirectoryStore::new(root.as_ref());
        let vocabulary = Vocabulary::load(store.vocabulary_path()).await?;
        info!(
            root = %root.as_ref().display(),
            words = vocabulary.len(),
            "opened index directory"
        );
        Self::with_store(vocabulary, store, config)
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn automaton(&self) -> &dyn Automaton {
        self.automaton.as_ref()
    }

    pub fn store(&self) -> &dyn IndexStore {
        self.store.as_ref()
    }

    pub fn ngram(&self) -> &NGramResolver {
        &self.ngram
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

impl std::fmt::Debug for SearchContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchContext")
            .field("words", &self.vocabulary.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// A parsed and resolved query, kept so the caller can pick suggestions and
/// re-run it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedQuery {
    ast: QueryAst,
    flags: SearchTypeFlags,
}

impl ResolvedQuery {
    pub fn ast(&self) -> &QueryAst {
        &self.ast
    }

    pub fn flags(&self) -> SearchTypeFlags {
        self.flags
    }

    pub fn terms(&self) -> impl Iterator<Item = &TermNode> + '_ {
        self.ast.terms()
    }

    pub fn all_exact_matches(&self) -> bool {
        self.ast.all_exact_matches()
    }

    pub fn is_fuzzy_search(&self) -> bool {
        self.flags.any_fuzzy()
    }

    fn result(&self, matching_positions: PositionalIndexRecord) -> QueryResult {
        QueryResult {
            matching_positions,
            all_exact_matches: self.all_exact_matches(),
            is_fuzzy_search: self.is_fuzzy_search(),
        }
    }
}

/// Result of a fresh search.
///
/// When `result.all_exact_matches` is false the engine did not run and
/// `result.matching_positions` is empty; the suggestions in `query` are the
/// answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub query: ResolvedQuery,
    pub result: QueryResult,
}

/// Parse, resolve and evaluate `query` under `token`.
pub async fn run_query(
    ctx: &SearchContext,
    query: &str,
    flags: SearchTypeFlags,
    token: &CancellationToken,
) -> Result<SearchOutcome> {
    let started = Instant::now();
    let (texts, operators) = parse_query(query)?.into_parts();

    let terms = cancellable(
        token,
        try_join_all(texts.iter().map(|text| resolve_term(ctx, text, flags))),
    )
    .await?;
    let ast = QueryAst::from_parts(terms, operators)?;
    let resolved = ResolvedQuery { ast, flags };

    let matching_positions = if resolved.all_exact_matches() {
        evaluate_cancellable(&resolved.ast, token)?
    } else {
        debug!(query, "not every term matched exactly, skipping intersection");
        PositionalIndexRecord::new()
    };
    let result = resolved.result(matching_positions);

    info!(
        query,
        terms = resolved.ast.num_terms(),
        all_exact = result.all_exact_matches,
        fuzzy = result.is_fuzzy_search,
        docs = result.matching_positions.num_docs(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "search finished"
    );
    Ok(SearchOutcome {
        query: resolved,
        result,
    })
}

/// Apply `selections` (`(term index, candidate)`) to `query`, fetch the
/// newly selected records and re-run the full walk.
///
/// `query` is only updated when the whole evaluation succeeds.
pub async fn run_with_selections(
    ctx: &SearchContext,
    query: &mut ResolvedQuery,
    selections: &[(usize, String)],
    token: &CancellationToken,
) -> Result<QueryResult> {
    let mut ast = query.ast.clone();
    for (index, candidate) in selections {
        ast.term_mut(*index)?.select(candidate)?;
    }
    if let Some(term) = ast
        .terms()
        .find(|term| !term.is_exact_match && term.selected() == term.text)
    {
        return Err(SearchError::UnresolvedTerm {
            term: term.text.clone(),
        });
    }

    let fetched = cancellable(
        token,
        try_join_all(ast.terms().map(|term| fetch_selected(ctx, term))),
    )
    .await?;
    for (term, record) in ast.terms_mut().zip(fetched) {
        if let Some(record) = record {
            let selected = term.selected().to_string();
            term.suggestions.insert_fetched(selected, record);
        }
    }

    let matching_positions = evaluate_cancellable(&ast, token)?;
    query.ast = ast;
    let result = query.result(matching_positions);
    info!(
        selections = selections.len(),
        docs = result.matching_positions.num_docs(),
        "search by suggestions finished"
    );
    Ok(result)
}

async fn cancellable<T, F>(token: &CancellationToken, work: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(SearchError::Cancelled),
        outcome = work => outcome,
    }
}

/// Query front door with superseded-query cancellation.
#[derive(Debug)]
pub struct Searcher {
    ctx: Arc<SearchContext>,
    in_flight: Mutex<Option<CancellationToken>>,
}

impl Searcher {
    pub fn new(ctx: SearchContext) -> Self {
        Self::from_shared(Arc::new(ctx))
    }

    pub fn from_shared(ctx: Arc<SearchContext>) -> Self {
        Self {
            ctx,
            in_flight: Mutex::new(None),
        }
    }

    pub fn context(&self) -> &SearchContext {
        &self.ctx
    }

    /// Search with the configured default flags.
    pub async fn search(&self, query: &str) -> Result<SearchOutcome> {
        self.search_with_flags(query, self.ctx.config().flags).await
    }

    /// Search, cancelling whatever query this searcher was still running.
    pub async fn search_with_flags(&self, query: &str, flags: SearchTypeFlags) -> Result<SearchOutcome> {
        let token = self.supersede();
        run_query(&self.ctx, query, flags, &token).await
    }

    /// Re-run `query` with some terms switched to one of their suggestions.
    /// Also supersedes the in-flight query.
    pub async fn search_by_suggestions(
        &self,
        query: &mut ResolvedQuery,
        selections: &[(usize, String)],
    ) -> Result<QueryResult> {
        let token = self.supersede();
        run_with_selections(&self.ctx, query, selections, &token).await
    }

    /// Cancel the in-flight query, if any.
    pub fn cancel_in_flight(&self) {
        if let Some(token) = self.in_flight.lock().take() {
            token.cancel();
        }
    }

    fn supersede(&self) -> CancellationToken {
        let token = CancellationToken::new();
        if let Some(previous) = self.in_flight.lock().replace(token.clone()) {
            previous.cancel();
        }
        token
    }
}
