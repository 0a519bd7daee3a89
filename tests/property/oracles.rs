//! Reference oracles for differential testing.
//!
//! Simple, obviously-correct implementations: nested loops and set
//! operations. Slow, but there is nothing in them to get wrong.

use proptest::prelude::*;
use proxima::{Position, WordId};
use std::collections::BTreeSet;

// =============================================================================
// ORACLE IMPLEMENTATIONS
// =============================================================================

/// Set intersection, treating an empty side as "no constraint".
pub fn oracle_intersect(a: &[u32], b: &[u32]) -> Vec<u32> {
    if a.is_empty() {
        return b.to_vec();
    }
    if b.is_empty() {
        return a.to_vec();
    }
    let left: BTreeSet<u32> = a.iter().copied().collect();
    b.iter().copied().filter(|x| left.contains(x)).collect()
}

/// Every pair `(p, q)` with `q == p + distance + 1`, by brute force.
pub fn oracle_exact_pairs(a: &[Position], b: &[Position], distance: u32) -> Vec<(Position, Position)> {
    let mut pairs = Vec::new();
    for &p in a {
        for &q in b {
            if u64::from(q) == u64::from(p) + u64::from(distance) + 1 {
                pairs.push((p, q));
            }
        }
    }
    pairs
}

/// Union over every `d` in `0..=distance` of the flattened exact pairs.
pub fn oracle_maximum(a: &[Position], b: &[Position], distance: u32) -> Vec<Position> {
    let mut out = BTreeSet::new();
    for d in 0..=distance {
        for (p, q) in oracle_exact_pairs(a, b, d) {
            out.insert(p);
            out.insert(q);
        }
    }
    out.into_iter().collect()
}

/// A word is a candidate iff at least `required` of the lists contain it.
///
/// Same answer as "union over every `required`-subset of the intersection of
/// that subset", without enumerating subsets.
pub fn oracle_ngram_candidates(lists: &[Vec<WordId>], required: usize) -> Vec<WordId> {
    if required == 0 {
        return Vec::new();
    }
    let every: BTreeSet<WordId> = lists.iter().flatten().copied().collect();
    every
        .into_iter()
        .filter(|id| lists.iter().filter(|list| list.contains(id)).count() >= required)
        .collect()
}

// =============================================================================
// STRATEGIES
// =============================================================================

/// Strictly ascending list of small values, so that offsets collide often.
pub fn sorted_unique(max_value: u32, max_len: usize) -> impl Strategy<Value = Vec<u32>> {
    prop::collection::btree_set(0..max_value, 0..max_len).prop_map(|set| set.into_iter().collect())
}

/// Non-empty strictly ascending list.
pub fn sorted_unique_nonempty(max_value: u32, max_len: usize) -> impl Strategy<Value = Vec<u32>> {
    prop::collection::btree_set(0..max_value, 1..max_len).prop_map(|set| set.into_iter().collect())
}

// =============================================================================
// ORACLE SELF-CHECKS
// =============================================================================

#[test]
fn oracle_maximum_zero_is_adjacency() {
    assert_eq!(oracle_maximum(&[1, 5], &[2, 9], 0), vec![1, 2]);
}

#[test]
fn oracle_ngram_candidates_counts_lists() {
    let lists = vec![vec![1, 2, 3], vec![2, 3], vec![3, 4]];
    assert_eq!(oracle_ngram_candidates(&lists, 2), vec![2, 3]);
    assert_eq!(oracle_ngram_candidates(&lists, 3), vec![3]);
}
