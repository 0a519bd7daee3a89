// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Static directory tree store.
//!
//! ```text
//! <root>/
//! ├── words.json                       vocabulary, index = word ID
//! ├── terms/1/0/1/101443.json          record of word 101443
//! ├── terms/4/2/42.json                short IDs use fewer levels
//! └── ngrams/5f/5f63.json              candidates of "_c" (hex of UTF-8)
//! ```
//!
//! Sharding keeps directory fan-out small for static hosting.

use super::{IndexStore, StoreKey};
use crate::error::StoreError;
use crate::types::WordId;
use async_trait::async_trait;
use std::fmt::Write as _;
use std::io;
use std::path::{Path, PathBuf};

/// Vocabulary file name under the index root.
pub const VOCABULARY_FILE: &str = "words.json";

const TERMS_DIR: &str = "terms";
const NGRAMS_DIR: &str = "ngrams";
const SHARD_LEVELS: usize = 3;

#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn vocabulary_path(&self) -> PathBuf {
        self.root.join(VOCABULARY_FILE)
    }

    /// Absolute path of the file holding `key`.
    pub fn path_for(&self, key: &StoreKey) -> PathBuf {
        self.root.join(relative_path(key))
    }
}

/// Path of `key` relative to the index root.
pub fn relative_path(key: &StoreKey) -> PathBuf {
    match key {
        StoreKey::Positional(id) => positional_path(*id),
        StoreKey::NGram(gram) => ngram_path(gram),
    }
}

fn positional_path(id: WordId) -> PathBuf {
    let digits = id.to_string();
    let mut path = PathBuf::from(TERMS_DIR);
    for digit in digits.chars().take(SHARD_LEVELS) {
        path.push(digit.to_string());
    }
    path.push(format!("{}.json", digits));
    path
}

fn ngram_path(gram: &str) -> PathBuf {
    let first = gram.chars().next().map(|c| hex(c.to_string().as_bytes()));
    let mut path = PathBuf::from(NGRAMS_DIR);
    path.push(first.unwrap_or_default());
    path.push(format!("{}.json", hex(gram.as_bytes())));
    path
}

fn hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(out, "{:02x}", byte);
    }
    out
}

#[async_trait]
impl IndexStore for DirectoryStore {
    async fn get(&self, key: &StoreKey) -> Result<Option<Vec<u8>>, StoreError> {
        match tokio::fs::read(self.path_for(key)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Unavailable {
                key: key.clone(),
                source,
            }),
        }
    }
}
