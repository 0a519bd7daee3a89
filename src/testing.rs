// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit tests, integration tests, benches and
//! fuzz targets.
//!
//! Always compiled but hidden from documentation. Helpers panic on bad
//! fixtures instead of returning errors.

#![doc(hidden)]

use crate::config::{SearchConfig, DEFAULT_GRAM_LENGTH, DEFAULT_NGRAM_PADDING};
use crate::ngram::padded_ngrams;
use crate::searcher::SearchContext;
use crate::store::{DirectoryStore, MemoryStore, StoreKey};
use crate::types::{DocumentId, Position, PositionalIndexRecord, WordId};
use crate::vocab::Vocabulary;
use itertools::Itertools;
use std::collections::BTreeMap;
use std::path::Path;

/// Build a record from literal entries. Panics if the entries break the
/// record invariants.
pub fn record(entries: &[(DocumentId, &[Position])]) -> PositionalIndexRecord {
    PositionalIndexRecord::from_entries(entries.iter().map(|(doc, positions)| (*doc, positions.to_vec())))
        .expect("fixture record must be sorted and unique")
}

pub fn vocabulary(words: &[&str]) -> Vocabulary {
    Vocabulary::new(words.iter().map(|w| w.to_string()).collect()).expect("fixture words must be unique")
}

/// N-gram → ascending word IDs, the way the index builder lays it out.
pub fn ngram_lists(vocabulary: &Vocabulary, gram_length: usize, padding: char) -> BTreeMap<String, Vec<WordId>> {
    let mut lists: BTreeMap<String, Vec<WordId>> = BTreeMap::new();
    for (id, word) in vocabulary.iter() {
        for gram in padded_ngrams(word, gram_length, padding).into_iter().unique() {
            lists.entry(gram).or_default().push(id);
        }
    }
    lists
}

/// Memory store holding `records` (by term) and the default-config n-gram
/// lists of the whole vocabulary.
pub fn memory_store(vocabulary: &Vocabulary, records: &[(&str, PositionalIndexRecord)]) -> MemoryStore {
    let mut store = MemoryStore::new();
    for (term, record) in records {
        let id = vocabulary
            .index_of(term)
            .unwrap_or_else(|| panic!("fixture term '{}' not in vocabulary", term));
        store.insert_record(id, record);
    }
    for (gram, ids) in ngram_lists(vocabulary, DEFAULT_GRAM_LENGTH, DEFAULT_NGRAM_PADDING) {
        store.insert_ngram(&gram, &ids);
    }
    store
}

/// Context over an in-memory index with default configuration.
pub fn context_from(words: &[&str], records: &[(&str, PositionalIndexRecord)]) -> SearchContext {
    let vocabulary = vocabulary(words);
    let store = memory_store(&vocabulary, records);
    SearchContext::with_store(vocabulary, store, SearchConfig::default()).expect("default config is valid")
}

/// Write a complete static index directory under `root`.
pub fn write_directory_index(root: &Path, words: &[&str], records: &[(&str, PositionalIndexRecord)]) {
    let vocabulary = vocabulary(words);
    let store = DirectoryStore::new(root);
    write_file(&store.vocabulary_path(), &serde_json::to_vec(words).expect("words serialize"));
    for (term, record) in records {
        let id = vocabulary
            .index_of(term)
            .unwrap_or_else(|| panic!("fixture term '{}' not in vocabulary", term));
        let bytes = serde_json::to_vec(record).expect("record serializes");
        write_file(&store.path_for(&StoreKey::Positional(id)), &bytes);
    }
    for (gram, ids) in ngram_lists(&vocabulary, DEFAULT_GRAM_LENGTH, DEFAULT_NGRAM_PADDING) {
        let bytes = serde_json::to_vec(&ids).expect("ids serialize");
        write_file(&store.path_for(&StoreKey::NGram(gram)), &bytes);
    }
}

fn write_file(path: &Path, bytes: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create index directory");
    }
    std::fs::write(path, bytes).expect("write index file");
}
