// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index store: read-only `get(key) -> Option<bytes>` over the static index.
//!
//! Two kinds of key exist. A word ID maps to that word's positional index
//! record (`{"<doc id>": [positions...]}`), and an n-gram maps to the word
//! IDs containing it (`[ids...]`).
//!
//! The typed fetches in this module implement the failure policy:
//!
//! | Outcome                  | `fetch_positional_record` | `fetch_ngram_candidates` |
//! |--------------------------|---------------------------|--------------------------|
//! | key absent               | `Ok(None)`                | `Ok(vec![])`             |
//! | store error on the key   | `Ok(None)`, logged        | `Ok(vec![])`, logged     |
//! | bytes fail to decode     | `Err(IndexCorruption)`    | `Err(IndexCorruption)`   |
//! | invariant violated       | `Err(IndexCorruption)`    | `Err(IndexCorruption)`   |

mod directory;
mod memory;

pub use directory::{relative_path, DirectoryStore, VOCABULARY_FILE};
pub use memory::MemoryStore;

use crate::contracts::{validate_candidates, InvariantError};
use crate::error::{Result, SearchError, StoreError};
use crate::types::{PositionalIndexRecord, WordId};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// Key into the index store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StoreKey {
    /// Positional index record of a vocabulary word.
    Positional(WordId),
    /// Candidate word-ID list of an n-gram.
    NGram(String),
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKey::Positional(id) => write!(f, "word {}", id),
            StoreKey::NGram(gram) => write!(f, "ngram '{}'", gram),
        }
    }
}

/// Raw key/value access to the index.
///
/// Implementations must be safe to call concurrently: a query fans out one
/// fetch per term and one per distinct n-gram.
#[async_trait]
pub trait IndexStore: Send + Sync {
    /// `Ok(None)` when the key does not exist. `Err` only when the key
    /// could not be read.
    async fn get(&self, key: &StoreKey) -> Result<Option<Vec<u8>>, StoreError>;
}

#[async_trait]
impl<S: IndexStore + ?Sized> IndexStore for Arc<S> {
    async fn get(&self, key: &StoreKey) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key).await
    }
}

/// Fetch and decode the positional index record of `word_id`.
pub async fn fetch_positional_record(
    store: &dyn IndexStore,
    word_id: WordId,
) -> Result<Option<PositionalIndexRecord>> {
    let key = StoreKey::Positional(word_id);
    let Some(bytes) = get_or_absorb(store, &key).await else {
        return Ok(None);
    };
    let record = serde_json::from_slice(&bytes).map_err(|e| corruption(&key, e))?;
    Ok(Some(record))
}

/// Fetch and decode the candidate list of `gram`. Absent ⇒ empty.
pub async fn fetch_ngram_candidates(store: &dyn IndexStore, gram: &str) -> Result<Vec<WordId>> {
    let key = StoreKey::NGram(gram.to_string());
    let Some(bytes) = get_or_absorb(store, &key).await else {
        return Ok(Vec::new());
    };
    let ids: Vec<WordId> = serde_json::from_slice(&bytes).map_err(|e| corruption(&key, e))?;
    validate_candidates(&ids).map_err(|source| SearchError::IndexCorruption { key, source })?;
    Ok(ids)
}

async fn get_or_absorb(store: &dyn IndexStore, key: &StoreKey) -> Option<Vec<u8>> {
    match store.get(key).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(%key, error = %e, "index store fetch failed, treating as absent");
            None
        }
    }
}

fn corruption(key: &StoreKey, e: serde_json::Error) -> SearchError {
    SearchError::IndexCorruption {
        key: key.clone(),
        source: InvariantError::Malformed {
            reason: e.to_string(),
        },
    }
}
