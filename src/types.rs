// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Core data types shared by every stage of query evaluation.
//!
//! Word IDs index the vocabulary, document IDs name archive messages, and
//! positions are word-token offsets inside a document. A positional index
//! record ties the last two together for a single term:
//!
//! ```text
//! "yoga" ──▶ { 5: [10, 48], 17: [3] }
//!             │    └─ strictly ascending word offsets
//!             └─ document IDs, ascending (BTreeMap order)
//! ```
//!
//! Records are produced by the index store and never mutated after a fetch;
//! intersection always builds a fresh record.

use crate::contracts::{check_positions_strictly_ascending, validate_positions};
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

/// Index into the vocabulary.
pub type WordId = u32;

/// Archive document (message) identifier.
pub type DocumentId = u32;

/// Word-token offset within a document.
pub type Position = u32;

/// Per-document sorted position lists for one term (or one intersection result).
///
/// # Invariants
///
/// - Positions within a document are strictly increasing.
/// - Every document key appears once.
///
/// Both are checked when a record is decoded or built from entries. Records
/// built by the engine go through `insert_sorted`, which only debug-asserts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionalIndexRecord {
    docs: BTreeMap<DocumentId, Vec<Position>>,
}

impl PositionalIndexRecord {
    /// The empty record. Identity element for positional intersection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from `(document, positions)` pairs, validating invariants.
    pub fn from_entries<I>(entries: I) -> Result<Self, crate::contracts::InvariantError>
    where
        I: IntoIterator<Item = (DocumentId, Vec<Position>)>,
    {
        let mut docs = BTreeMap::new();
        for (doc_id, positions) in entries {
            validate_positions(doc_id, &positions)?;
            if docs.insert(doc_id, positions).is_some() {
                return Err(crate::contracts::InvariantError::DuplicateDocument { doc_id });
            }
        }
        Ok(Self { docs })
    }

    /// Insert an already sorted, deduplicated position list.
    pub(crate) fn insert_sorted(&mut self, doc_id: DocumentId, positions: Vec<Position>) {
        check_positions_strictly_ascending(&positions);
        self.docs.insert(doc_id, positions);
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Number of documents in the record.
    pub fn num_docs(&self) -> usize {
        self.docs.len()
    }

    /// Total number of positions across all documents.
    pub fn num_positions(&self) -> usize {
        self.docs.values().map(Vec::len).sum()
    }

    pub fn get(&self, doc_id: DocumentId) -> Option<&[Position]> {
        self.docs.get(&doc_id).map(Vec::as_slice)
    }

    /// Document IDs in ascending order.
    pub fn doc_ids(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.docs.keys().copied()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, DocumentId, Vec<Position>> {
        self.docs.iter()
    }
}

impl<'a> IntoIterator for &'a PositionalIndexRecord {
    type Item = (&'a DocumentId, &'a Vec<Position>);
    type IntoIter = btree_map::Iter<'a, DocumentId, Vec<Position>>;

    fn into_iter(self) -> Self::IntoIter {
        self.docs.iter()
    }
}

impl Serialize for PositionalIndexRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.docs.serialize(serializer)
    }
}

/// Decodes `{"<doc id>": [positions...]}`, rejecting duplicate documents and
/// unsorted or repeated positions rather than silently repairing them.
impl<'de> Deserialize<'de> for PositionalIndexRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = PositionalIndexRecord;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from document ID to ascending word positions")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut docs = BTreeMap::new();
                while let Some((doc_id, positions)) =
                    map.next_entry::<DocumentId, Vec<Position>>()?
                {
                    validate_positions(doc_id, &positions).map_err(de::Error::custom)?;
                    if docs.insert(doc_id, positions).is_some() {
                        return Err(de::Error::custom(
                            crate::contracts::InvariantError::DuplicateDocument { doc_id },
                        ));
                    }
                }
                Ok(PositionalIndexRecord { docs })
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}

/// Which fuzzy algorithms contribute suggestions for every term of a query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchTypeFlags {
    pub prefix: bool,
    pub levenshtein1: bool,
    pub levenshtein2: bool,
    pub ngram: bool,
}

impl SearchTypeFlags {
    /// Exact search only.
    pub const EXACT: Self = Self {
        prefix: false,
        levenshtein1: false,
        levenshtein2: false,
        ngram: false,
    };

    /// Every fuzzy source enabled.
    pub const ALL: Self = Self {
        prefix: true,
        levenshtein1: true,
        levenshtein2: true,
        ngram: true,
    };

    /// True if at least one fuzzy source is enabled.
    pub fn any_fuzzy(&self) -> bool {
        self.prefix || self.levenshtein1 || self.levenshtein2 || self.ngram
    }
}

/// Outcome of evaluating a query.
///
/// When `all_exact_matches` is false the engine did not run and
/// `matching_positions` is empty; the per-term suggestion sets on the
/// resolved query are the useful output in that case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryResult {
    pub matching_positions: PositionalIndexRecord,
    pub all_exact_matches: bool,
    pub is_fuzzy_search: bool,
}

impl QueryResult {
    /// Matching documents, ascending.
    pub fn matching_document_ids(&self) -> Vec<DocumentId> {
        self.matching_positions.doc_ids().collect()
    }
}
