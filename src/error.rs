// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error taxonomy.
//!
//! Only some of these ever reach a caller. Store failures on a single key are
//! absorbed where they happen and turned into "no data", so partial fuzzy
//! results stay useful. Parse errors, index corruption and cancellation
//! propagate.

use crate::contracts::InvariantError;
use crate::store::StoreKey;
use crate::types::WordId;
use thiserror::Error;

/// Failures of the vocabulary (ID ⇄ term table).
#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("word ID {id} out of range (vocabulary has {len} words)")]
    OutOfRange { id: WordId, len: usize },
    #[error("duplicate vocabulary term '{term}'")]
    Duplicate { term: String },
    #[error("invalid vocabulary JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("failed to read vocabulary: {0}")]
    Io(#[from] std::io::Error),
}

/// A single index store key could not be read.
///
/// Absent keys are not errors: stores return `Ok(None)` for those.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("index store unavailable for {key}: {source}")]
    Unavailable {
        key: StoreKey,
        #[source]
        source: std::io::Error,
    },
}

/// Malformed query syntax. Raised before any resolution work begins.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryParseError {
    #[error("query is empty")]
    Empty,
    #[error("unbalanced quote starting at byte {offset}")]
    UnbalancedQuote { offset: usize },
    #[error("empty phrase at byte {offset}")]
    EmptyPhrase { offset: usize },
    #[error("operator '{operator}' must sit between two terms")]
    DanglingOperator { operator: String },
    #[error("operators '{first}' and '{second}' cannot follow each other")]
    ConsecutiveOperators { first: String, second: String },
    #[error("terms '{left}' and '{right}' need an operator between them")]
    MissingOperator { left: String, right: String },
    #[error("invalid distance in operator '{operator}'")]
    InvalidDistance { operator: String },
    #[error("unknown operator '{operator}'")]
    UnknownOperator { operator: String },
}

/// Crate-level error.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Parse(#[from] QueryParseError),
    #[error("index corruption at {key}: {source}")]
    IndexCorruption {
        key: StoreKey,
        #[source]
        source: InvariantError,
    },
    #[error(transparent)]
    Vocabulary(#[from] VocabularyError),
    #[error("query was superseded by a newer one")]
    Cancelled,
    #[error("'{candidate}' is not a suggestion for term '{term}'")]
    UnknownSuggestion { term: String, candidate: String },
    #[error("term '{term}' has no exact match; select one of its suggestions")]
    UnresolvedTerm { term: String },
    #[error("query has no term at index {index} (it has {len})")]
    TermIndexOutOfRange { index: usize, len: usize },
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T, E = SearchError> = std::result::Result<T, E>;
