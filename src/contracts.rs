// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime contracts for the sorted-sequence invariants.
//!
//! Every merge in this crate is a two-pointer walk, and every two-pointer
//! walk silently produces garbage on unsorted input. So there are two layers:
//!
//! 1. **Validation** (`validate_*`): always on, run where data enters the
//!    process (index store decoding). A violation is index corruption and
//!    is returned as an error.
//! 2. **Contracts** (`check_*`): `debug_assert!` only, run on the hot path
//!    (merge inputs, engine output). Zero cost in release builds.
//!
//! # INVARIANTS (DO NOT REMOVE THESE CHECKS)
//!
//! | Check                               | Where it matters                 |
//! |-------------------------------------|----------------------------------|
//! | positions strictly ascending        | exact/maximum offset merges      |
//! | one entry per document              | document-key intersection        |
//! | candidate word IDs strictly ascending | n-gram list intersection       |

use crate::types::{DocumentId, Position, WordId};
use thiserror::Error;

/// Violation of a sortedness or uniqueness invariant in index data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    #[error("positions for document {doc_id} not ascending at index {index}")]
    UnsortedPositions { doc_id: DocumentId, index: usize },
    #[error("duplicate position {position} in document {doc_id}")]
    DuplicatePosition { doc_id: DocumentId, position: Position },
    #[error("duplicate document {doc_id}")]
    DuplicateDocument { doc_id: DocumentId },
    #[error("candidate word IDs not ascending at index {index}")]
    UnsortedCandidates { index: usize },
    #[error("malformed index data: {reason}")]
    Malformed { reason: String },
}

// ============================================================================
// VALIDATION (always on)
// ============================================================================

/// Positions within one document must be strictly increasing.
pub fn validate_positions(doc_id: DocumentId, positions: &[Position]) -> Result<(), InvariantError> {
    for (index, pair) in positions.windows(2).enumerate() {
        if pair[0] == pair[1] {
            return Err(InvariantError::DuplicatePosition {
                doc_id,
                position: pair[0],
            });
        }
        if pair[0] > pair[1] {
            return Err(InvariantError::UnsortedPositions {
                doc_id,
                index: index + 1,
            });
        }
    }
    Ok(())
}

/// N-gram candidate lists must be strictly increasing word IDs.
pub fn validate_candidates(ids: &[WordId]) -> Result<(), InvariantError> {
    match ids.windows(2).position(|pair| pair[0] >= pair[1]) {
        Some(index) => Err(InvariantError::UnsortedCandidates { index: index + 1 }),
        None => Ok(()),
    }
}

// ============================================================================
// CONTRACTS (debug builds only)
// ============================================================================

/// Merge inputs must be strictly ascending.
#[inline]
pub fn check_strictly_ascending<T: Ord + std::fmt::Debug>(values: &[T], what: &str) {
    debug_assert!(
        values.windows(2).all(|pair| pair[0] < pair[1]),
        "Contract violation: {} not strictly ascending: {:?}",
        what,
        values
    );
}

/// Engine output per document must be sorted and deduplicated.
#[inline]
pub fn check_positions_strictly_ascending(positions: &[Position]) {
    check_strictly_ascending(positions, "positions");
}
