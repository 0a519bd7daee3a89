// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Positional proximity search with fuzzy term resolution.
//!
//! Queries such as `yoga o-exact/2 ayurveda` are answered from a static,
//! read-only index: a vocabulary, one positional index record per word, and
//! n-gram candidate lists. Terms that are not in the vocabulary (misspellings,
//! transliteration artifacts) get fuzzy suggestions from prefix, edit-distance
//! and bigram-similarity sources, which the caller can select and re-run.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │  query::     │──▶│  resolve::   │──▶│  engine::    │──▶│ QueryResult  │
//! │  parse_query │   │ resolve_term │   │  evaluate    │   │ doc → [pos]  │
//! └──────────────┘   └──────┬───────┘   └──────┬───────┘   └──────────────┘
//!                           │                  │
//!          ┌────────────────┼──────────┐       ▼
//!          ▼                ▼          ▼   ┌──────────────┐
//!   ┌────────────┐  ┌────────────┐ ┌──────┐│   merge::    │
//!   │  fuzzy::   │  │  ngram::   │ │store:││ two-pointer  │
//!   │ Automaton  │  │  resolve   │ │ get  ││ primitives   │
//!   └────────────┘  └────────────┘ └──────┘└──────────────┘
//! ```
//!
//! [`Searcher`] ties it together: terms are resolved concurrently and joined
//! by position, then the engine walks the query left to right. A new query
//! on the same searcher cancels the previous one.
//!
//! # Usage
//!
//! ```
//! use proxima::testing::{context_from, record};
//! use proxima::Searcher;
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let ctx = context_from(
//!     &["yoga", "ayurveda"],
//!     &[("yoga", record(&[(5, &[10])])), ("ayurveda", record(&[(5, &[13])]))],
//! );
//! let searcher = Searcher::new(ctx);
//! let outcome = searcher.search("yoga o-exact/2 ayurveda").await.unwrap();
//! assert_eq!(outcome.result.matching_document_ids(), vec![5]);
//! assert_eq!(outcome.result.matching_positions.get(5), Some(&[10, 13][..]));
//! # });
//! ```

pub mod config;
pub mod contracts;
pub mod engine;
pub mod error;
pub mod fuzzy;
pub mod merge;
pub mod ngram;
pub mod query;
pub mod resolve;
pub mod searcher;
pub mod store;
pub mod testing;
pub mod types;
pub mod util;
pub mod vocab;

pub use config::SearchConfig;
pub use error::{QueryParseError, Result, SearchError, StoreError, VocabularyError};
pub use fuzzy::{Automaton, VocabularyAutomaton};
pub use ngram::NGramResolver;
pub use query::{parse_query, Operator, ProximityKind, QueryAst, QueryNode, TermNode};
pub use resolve::{SuggestionRecord, SuggestionSet};
pub use searcher::{ResolvedQuery, SearchContext, SearchOutcome, Searcher};
pub use store::{DirectoryStore, IndexStore, MemoryStore, StoreKey};
pub use types::{DocumentId, Position, PositionalIndexRecord, QueryResult, SearchTypeFlags, WordId};
pub use util::normalize::normalize_term;
pub use vocab::Vocabulary;
