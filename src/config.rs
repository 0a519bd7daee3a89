// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search configuration.
//!
//! Defaults are compile-time constants. Runtime overrides come from an
//! optional JSON file and then from CLI flags in `main.rs`.

use crate::error::{Result, SearchError};
use crate::ngram::NGramResolver;
use crate::types::SearchTypeFlags;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fraction of a term's bigrams a vocabulary word must share to count as similar.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.7;

/// N-gram length used by the n-gram index (bigrams).
pub const DEFAULT_GRAM_LENGTH: usize = 2;

/// Sentinel used to pad both ends of a term before slicing n-grams.
pub const DEFAULT_NGRAM_PADDING: char = '_';

/// Runtime search settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    pub similarity_threshold: f64,
    pub gram_length: usize,
    pub ngram_padding: char,
    /// Fuzzy sources enabled when the caller does not pass flags explicitly.
    pub flags: SearchTypeFlags,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            gram_length: DEFAULT_GRAM_LENGTH,
            ngram_padding: DEFAULT_NGRAM_PADDING,
            flags: SearchTypeFlags::EXACT,
        }
    }
}

impl SearchConfig {
    /// Load and validate a JSON config file. Missing fields take defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| SearchError::Config(format!("failed to read {}: {}", path.display(), e)))?;
        let config: SearchConfig = serde_json::from_str(&raw)
            .map_err(|e| SearchError::Config(format!("invalid {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.similarity_threshold > 0.0 && self.similarity_threshold <= 1.0) {
            return Err(SearchError::Config(format!(
                "similarity_threshold must be in (0, 1], got {}",
                self.similarity_threshold
            )));
        }
        if self.gram_length == 0 {
            return Err(SearchError::Config("gram_length must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn ngram_resolver(&self) -> NGramResolver {
        NGramResolver::new(self.gram_length, self.similarity_threshold)
            .with_padding(self.ngram_padding)
    }
}
