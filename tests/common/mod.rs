//! Shared test utilities and fixtures.

#![allow(dead_code)]

use async_trait::async_trait;
use proxima::{
    normalize_term, DocumentId, IndexStore, MemoryStore, PositionalIndexRecord, SearchConfig,
    SearchContext, Searcher, StoreError, StoreKey, Vocabulary, WordId,
};
use std::collections::{BTreeMap, HashMap};
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

// Re-export canonical test utilities from proxima::testing
pub use proxima::testing::{memory_store, record};

// ============================================================================
// CORPUS
// ============================================================================

/// Archive messages used across the integration tests.
///
/// Positions are word-token offsets, so e.g. in document 2 `yoga` is at 0 and
/// `ayurveda` at 3 (two words between them).
pub const ARCHIVE: &[(DocumentId, &str)] = &[
    (1, "sanskrit verse similar to vedic verse"),
    (2, "yoga practice with ayurveda"),
    (3, "ayurveda and yoga"),
    (4, "yoga and ayurveda texts on yoga"),
    (5, "the yogi recited a verse from the vedanta"),
    (6, "tattva cintamani of gangesa"),
];

/// A tokenized corpus: vocabulary in first-seen order plus one positional
/// record per word.
pub struct Corpus {
    pub words: Vec<String>,
    pub records: BTreeMap<String, PositionalIndexRecord>,
}

impl Corpus {
    pub fn index(docs: &[(DocumentId, &str)]) -> Self {
        let mut words: Vec<String> = Vec::new();
        let mut postings: BTreeMap<String, BTreeMap<DocumentId, Vec<u32>>> = BTreeMap::new();
        for (doc_id, text) in docs {
            for (position, token) in text.split_whitespace().enumerate() {
                let word = normalize_term(token);
                if !postings.contains_key(&word) {
                    words.push(word.clone());
                }
                postings
                    .entry(word)
                    .or_default()
                    .entry(*doc_id)
                    .or_default()
                    .push(position as u32);
            }
        }
        let records = postings
            .into_iter()
            .map(|(word, docs)| {
                let record = PositionalIndexRecord::from_entries(docs).expect("positions are ascending");
                (word, record)
            })
            .collect();
        Self { words, records }
    }

    pub fn archive() -> Self {
        Self::index(ARCHIVE)
    }

    pub fn word_id(&self, word: &str) -> WordId {
        self.words
            .iter()
            .position(|w| w == word)
            .unwrap_or_else(|| panic!("'{}' is not in the corpus", word)) as WordId
    }

    pub fn vocabulary(&self) -> Vocabulary {
        Vocabulary::new(self.words.clone()).expect("corpus words are unique")
    }

    pub fn record_list(&self) -> Vec<(&str, PositionalIndexRecord)> {
        self.records
            .iter()
            .map(|(word, record)| (word.as_str(), record.clone()))
            .collect()
    }

    pub fn store(&self) -> MemoryStore {
        memory_store(&self.vocabulary(), &self.record_list())
    }

    pub fn context(&self) -> SearchContext {
        self.context_with(self.store())
    }

    pub fn context_with<S: IndexStore + 'static>(&self, store: S) -> SearchContext {
        SearchContext::with_store(self.vocabulary(), store, SearchConfig::default())
            .expect("default config is valid")
    }

    pub fn searcher(&self) -> Searcher {
        Searcher::new(self.context())
    }
}

// ============================================================================
// STORE WRAPPERS
// ============================================================================

/// Delays every read, so a query stays in flight long enough to be superseded.
pub struct SlowStore<S> {
    pub inner: S,
    pub delay: Duration,
}

#[async_trait]
impl<S: IndexStore> IndexStore for SlowStore<S> {
    async fn get(&self, key: &StoreKey) -> Result<Option<Vec<u8>>, StoreError> {
        tokio::time::sleep(self.delay).await;
        self.inner.get(key).await
    }
}

/// Delays reads of individual keys; unlisted keys answer immediately.
pub struct DelayedStore<S> {
    pub inner: S,
    pub delays: HashMap<StoreKey, Duration>,
}

impl<S> DelayedStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            delays: HashMap::new(),
        }
    }

    pub fn delay(mut self, key: StoreKey, delay: Duration) -> Self {
        self.delays.insert(key, delay);
        self
    }
}

#[async_trait]
impl<S: IndexStore> IndexStore for DelayedStore<S> {
    async fn get(&self, key: &StoreKey) -> Result<Option<Vec<u8>>, StoreError> {
        if let Some(delay) = self.delays.get(key) {
            tokio::time::sleep(*delay).await;
        }
        self.inner.get(key).await
    }
}

/// Counts positional record reads.
pub struct CountingStore<S> {
    pub inner: S,
    pub positional_reads: Arc<AtomicUsize>,
}

impl<S> CountingStore<S> {
    pub fn new(inner: S) -> (Self, Arc<AtomicUsize>) {
        let counter = Arc::new(AtomicUsize::new(0));
        (
            Self {
                inner,
                positional_reads: counter.clone(),
            },
            counter,
        )
    }
}

#[async_trait]
impl<S: IndexStore> IndexStore for CountingStore<S> {
    async fn get(&self, key: &StoreKey) -> Result<Option<Vec<u8>>, StoreError> {
        if matches!(key, StoreKey::Positional(_)) {
            self.positional_reads.fetch_add(1, Ordering::SeqCst);
        }
        self.inner.get(key).await
    }
}

/// Fails reads of the listed keys, passes everything else through.
pub struct FlakyStore<S> {
    pub inner: S,
    pub failing: Vec<StoreKey>,
}

#[async_trait]
impl<S: IndexStore> IndexStore for FlakyStore<S> {
    async fn get(&self, key: &StoreKey) -> Result<Option<Vec<u8>>, StoreError> {
        if self.failing.contains(key) {
            return Err(StoreError::Unavailable {
                key: key.clone(),
                source: io::Error::new(io::ErrorKind::TimedOut, "simulated timeout"),
            });
        }
        self.inner.get(key).await
    }
}
