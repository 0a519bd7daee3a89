// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Merge intersector: two-pointer primitives over sorted sequences.
//!
//! Everything that combines sorted integer lists goes through here: n-gram
//! candidate lists, document-ID key sets, and per-document position lists.
//!
//! ```text
//!   a:  113        144        200
//!        │ +1       │ +1       │ +1         distance 0 ⇒ shift by 1
//!   b:  114   146  147        201   1008
//!        ▲                     ▲
//!        └── (113,114)         └── (200,201)
//! ```
//!
//! # Contracts
//!
//! All inputs must be strictly ascending. Checked with `debug_assert!` only;
//! data from the index store is validated once on decode (`contracts.rs`).

use crate::contracts::check_strictly_ascending;
use crate::types::Position;
use std::cmp::Ordering;
use std::fmt::Debug;

/// Pairwise intersection with the empty sequence as identity.
///
/// `intersect_sorted(a, []) == a`. An empty operand means "no constraint",
/// not "matches nothing", which is what lets an empty accumulator adopt the
/// first operand unchanged.
pub fn intersect_sorted<T: Ord + Copy + Debug>(a: &[T], b: &[T]) -> Vec<T> {
    if a.is_empty() {
        return b.to_vec();
    }
    if b.is_empty() {
        return a.to_vec();
    }
    merge_join(a, b)
}

/// Left fold of [`intersect_sorted`] over any number of lists.
///
/// Zero lists yield an empty result and a single list is returned unchanged.
/// The fold stops as soon as two non-empty operands have nothing in common,
/// so an empty intermediate never gets mistaken for the identity.
pub fn intersect_all<T, L>(lists: &[L]) -> Vec<T>
where
    T: Ord + Copy + Debug,
    L: AsRef<[T]>,
{
    let mut acc: Vec<T> = Vec::new();
    for list in lists.iter().map(AsRef::as_ref).filter(|l| !l.is_empty()) {
        if acc.is_empty() {
            acc = list.to_vec();
            continue;
        }
        acc = merge_join(&acc, list);
        if acc.is_empty() {
            break;
        }
    }
    acc
}

/// Sorted, deduplicated union of two strictly ascending lists.
pub fn union_sorted<T: Ord + Copy + Debug>(a: &[T], b: &[T]) -> Vec<T> {
    check_strictly_ascending(a, "union input a");
    check_strictly_ascending(b, "union input b");

    let mut out = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Less => {
                out.push(a[i]);
                i += 1;
            }
            Ordering::Greater => {
                out.push(b[j]);
                j += 1;
            }
            Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out.extend_from_slice(&a[i..]);
    out.extend_from_slice(&b[j..]);
    out
}

/// Pairs `(p, q)` with `p` from `a`, `q` from `b` and exactly `distance`
/// words between them, i.e. `q == p + distance + 1`.
///
/// Ordered: `a` must come first.
pub fn intersect_with_exact_offset(
    a: &[Position],
    b: &[Position],
    distance: u32,
) -> Vec<(Position, Position)> {
    check_strictly_ascending(a, "exact offset input a");
    check_strictly_ascending(b, "exact offset input b");

    // Widen so `p + distance + 1` cannot overflow near u32::MAX.
    let shift = u64::from(distance) + 1;
    let mut pairs = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        let left = u64::from(a[i]) + shift;
        let right = u64::from(b[j]);
        match left.cmp(&right) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                pairs.push((a[i], b[j]));
                i += 1;
                j += 1;
            }
        }
    }
    pairs
}

/// [`intersect_with_exact_offset`] flattened into one sorted position list.
pub fn exact_offset_positions(a: &[Position], b: &[Position], distance: u32) -> Vec<Position> {
    let pairs = intersect_with_exact_offset(a, b, distance);
    let (firsts, seconds): (Vec<Position>, Vec<Position>) = pairs.into_iter().unzip();
    union_sorted(&firsts, &seconds)
}

/// Union of [`exact_offset_positions`] for every distance in `0..=distance`,
/// flattened.
///
/// Equivalently: every `p` in `a` with some `q` in `b` such that
/// `1 <= q - p <= distance + 1`, plus every such `q`. Computed in one sliding
/// window pass instead of `distance + 1` separate merges, so large distances
/// cost the same as small ones.
pub fn intersect_with_maximum_offset(a: &[Position], b: &[Position], distance: u32) -> Vec<Position> {
    check_strictly_ascending(a, "maximum offset input a");
    check_strictly_ascending(b, "maximum offset input b");

    let reach = u64::from(distance) + 1;
    let mut firsts = Vec::new();
    let mut seconds = Vec::new();
    // `lo` only moves forward because the window start `p + 1` is monotonic.
    let mut lo = 0;
    // Index of the first `b` not yet emitted, so each `q` is pushed once.
    let mut emitted = 0;

    for &p in a {
        let start = u64::from(p) + 1;
        let end = u64::from(p) + reach;
        while lo < b.len() && u64::from(b[lo]) < start {
            lo += 1;
        }
        if lo == b.len() {
            break;
        }
        if u64::from(b[lo]) > end {
            continue;
        }
        firsts.push(p);
        let mut k = lo.max(emitted);
        while k < b.len() && u64::from(b[k]) <= end {
            seconds.push(b[k]);
            k += 1;
        }
        emitted = emitted.max(k);
    }

    union_sorted(&firsts, &seconds)
}

/// Plain two-pointer intersection. Advances the smaller head, emits on equality.
fn merge_join<T: Ord + Copy + Debug>(a: &[T], b: &[T]) -> Vec<T> {
    check_strictly_ascending(a, "intersection input a");
    check_strictly_ascending(b, "intersection input b");

    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out
}
