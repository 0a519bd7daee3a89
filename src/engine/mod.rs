// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Positional intersection engine.
//!
//! A left-to-right fold over the query AST with one accumulator and one
//! pending operator:
//!
//! ```text
//!   acc = ∅, pending = AND
//!   Term(a)        acc = combine(acc, rec(a), pending)   ∅ ∘ a = a
//!   Operator(op)   pending = op
//!   Term(b)        acc = combine(acc, rec(b), pending)
//!   ...
//! ```
//!
//! The empty record is the identity of `combine`, which is what lets the
//! first term pass straight into the accumulator. The walk order encodes
//! operator binding and is never reordered or parallelized.

use crate::contracts::check_positions_strictly_ascending;
use crate::error::{Result, SearchError};
use crate::merge::{exact_offset_positions, intersect_sorted, intersect_with_maximum_offset, union_sorted};
use crate::query::{Operator, ProximityKind, QueryAst, QueryNode};
use crate::types::{DocumentId, Position, PositionalIndexRecord};
use tokio_util::sync::CancellationToken;

/// Combine the accumulator with the next term's record under `op`.
///
/// 1. Either side empty ⇒ the other side, unchanged.
/// 2. Otherwise only documents present in both survive, with their position
///    lists combined by [`combine_positions`].
/// 3. Documents whose combined list is empty are dropped.
pub fn combine(
    acc: &PositionalIndexRecord,
    record: &PositionalIndexRecord,
    op: Operator,
) -> PositionalIndexRecord {
    if acc.is_empty() {
        return record.clone();
    }
    if record.is_empty() {
        return acc.clone();
    }

    let left: Vec<DocumentId> = acc.doc_ids().collect();
    let right: Vec<DocumentId> = record.doc_ids().collect();
    let mut out = PositionalIndexRecord::new();
    for doc_id in intersect_sorted(&left, &right) {
        let (Some(a), Some(b)) = (acc.get(doc_id), record.get(doc_id)) else {
            continue;
        };
        let positions = combine_positions(a, b, op);
        if !positions.is_empty() {
            out.insert_sorted(doc_id, positions);
        }
    }
    out
}

/// Combine two position lists of one document. Output is sorted and
/// deduplicated.
///
/// - `AND`: all positions of both terms.
/// - ordered kinds: `a` must precede `b`.
/// - unordered kinds: union of both directions.
pub fn combine_positions(a: &[Position], b: &[Position], op: Operator) -> Vec<Position> {
    let positions = match op {
        Operator::And => union_sorted(a, b),
        Operator::Proximity { kind, distance } => {
            let directed: fn(&[Position], &[Position], u32) -> Vec<Position> = match kind {
                ProximityKind::OrderedExact | ProximityKind::UnorderedExact => exact_offset_positions,
                ProximityKind::OrderedMaximum | ProximityKind::UnorderedMaximum => {
                    intersect_with_maximum_offset
                }
            };
            let forward = directed(a, b, distance);
            if kind.is_ordered() {
                forward
            } else {
                union_sorted(&forward, &directed(b, a, distance))
            }
        }
    };
    check_positions_strictly_ascending(&positions);
    positions
}

/// Evaluate the whole query with each term's selected record.
///
/// Every term must have its selected record fetched; a term without one is
/// [`SearchError::UnresolvedTerm`].
pub fn evaluate(ast: &QueryAst) -> Result<PositionalIndexRecord> {
    walk(ast, None)
}

/// [`evaluate`], abandoning the walk as soon as `token` is cancelled.
pub fn evaluate_cancellable(ast: &QueryAst, token: &CancellationToken) -> Result<PositionalIndexRecord> {
    walk(ast, Some(token))
}

fn walk(ast: &QueryAst, token: Option<&CancellationToken>) -> Result<PositionalIndexRecord> {
    let mut acc = PositionalIndexRecord::new();
    let mut pending = Operator::And;

    for node in ast.nodes() {
        match node {
            QueryNode::Operator(op) => pending = *op,
            QueryNode::Term(term) => {
                if token.is_some_and(CancellationToken::is_cancelled) {
                    return Err(SearchError::Cancelled);
                }
                let record = term.selected_record().ok_or_else(|| SearchError::UnresolvedTerm {
                    term: term.text.clone(),
                })?;
                acc = combine(&acc, record, pending);
                pending = Operator::And;
            }
        }
    }

    Ok(acc)
}
