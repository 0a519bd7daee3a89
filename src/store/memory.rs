// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use super::{IndexStore, StoreKey};
use crate::error::StoreError;
use crate::types::{PositionalIndexRecord, WordId};
use async_trait::async_trait;
use std::collections::HashMap;

/// In-memory index store, for tests and for embedding a prebuilt index.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<StoreKey, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw bytes under `key`. No validation happens here.
    pub fn insert_raw(&mut self, key: StoreKey, bytes: Vec<u8>) {
        self.entries.insert(key, bytes);
    }

    pub fn insert_record(&mut self, word_id: WordId, record: &PositionalIndexRecord) {
        let bytes = serde_json::to_vec(record).expect("integer-keyed record always serializes");
        self.insert_raw(StoreKey::Positional(word_id), bytes);
    }

    pub fn insert_ngram(&mut self, gram: &str, word_ids: &[WordId]) {
        let bytes = serde_json::to_vec(word_ids).expect("integer list always serializes");
        self.insert_raw(StoreKey::NGram(gram.to_string()), bytes);
    }

    pub fn remove(&mut self, key: &StoreKey) -> Option<Vec<u8>> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl IndexStore for MemoryStore {
    async fn get(&self, key: &StoreKey) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }
}
