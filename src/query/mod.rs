// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query AST.
//!
//! A query is an alternating sequence `Term (Operator Term)*`. Operators bind
//! the term on their left to the term on their right; evaluation is strictly
//! left to right, so `a o-exact/0 b u-max/3 c` means `(a ∘ b) ∘ c`.
//!
//! ```text
//! "yoga o-exact/2 ayurveda"
//!
//!   Term(yoga) ── Operator(o-exact/2) ── Term(ayurveda)
//! ```

mod parse;

pub use parse::{parse_query, ParsedQuery};

use crate::error::{QueryParseError, SearchError};
use crate::resolve::SuggestionSet;
use crate::types::PositionalIndexRecord;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Positional constraint of a proximity operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProximityKind {
    /// First term, then exactly N words, then the second term.
    OrderedExact,
    /// Exactly N words between the terms, either order.
    UnorderedExact,
    /// First term, then at most N words, then the second term.
    OrderedMaximum,
    /// At most N words between the terms, either order.
    UnorderedMaximum,
}

impl ProximityKind {
    pub const ALL: [ProximityKind; 4] = [
        ProximityKind::OrderedExact,
        ProximityKind::UnorderedExact,
        ProximityKind::OrderedMaximum,
        ProximityKind::UnorderedMaximum,
    ];

    /// Operator name in query syntax.
    pub fn syntax(self) -> &'static str {
        match self {
            ProximityKind::OrderedExact => "o-exact",
            ProximityKind::UnorderedExact => "u-exact",
            ProximityKind::OrderedMaximum => "o-max",
            ProximityKind::UnorderedMaximum => "u-max",
        }
    }

    pub fn is_ordered(self) -> bool {
        matches!(self, ProximityKind::OrderedExact | ProximityKind::OrderedMaximum)
    }
}

impl FromStr for ProximityKind {
    type Err = QueryParseError;

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        ProximityKind::ALL
            .into_iter()
            .find(|kind| kind.syntax() == lower)
            .ok_or_else(|| QueryParseError::UnknownOperator {
                operator: s.to_string(),
            })
    }
}

/// Connective between two terms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Operator {
    /// Both terms occur in the document; no positional constraint.
    #[default]
    And,
    /// `distance` is the number of words between the two terms.
    Proximity { kind: ProximityKind, distance: u32 },
}

impl Operator {
    pub fn proximity(kind: ProximityKind, distance: u32) -> Self {
        Operator::Proximity { kind, distance }
    }

    /// Word distance, or `-1` for `And` (no positional constraint).
    pub fn distance(&self) -> i64 {
        match self {
            Operator::And => -1,
            Operator::Proximity { distance, .. } => i64::from(*distance),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::And => f.write_str("AND"),
            Operator::Proximity { kind, distance } => write!(f, "{}/{}", kind.syntax(), distance),
        }
    }
}

/// A query term after resolution: its exact record (if any) and its fuzzy
/// suggestions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermNode {
    pub text: String,
    pub is_exact_match: bool,
    pub suggestions: SuggestionSet,
    selected: String,
}

impl TermNode {
    /// A term with its own text selected.
    pub fn new(text: impl Into<String>, is_exact_match: bool, suggestions: SuggestionSet) -> Self {
        let text = text.into();
        Self {
            selected: text.clone(),
            text,
            is_exact_match,
            suggestions,
        }
    }

    /// Candidate whose record takes part in intersection.
    pub fn selected(&self) -> &str {
        &self.selected
    }

    /// Select `candidate` for the next evaluation. It must be the term itself
    /// or one of its suggestions.
    pub fn select(&mut self, candidate: &str) -> Result<(), SearchError> {
        if candidate != self.text && !self.suggestions.contains(candidate) {
            return Err(SearchError::UnknownSuggestion {
                term: self.text.clone(),
                candidate: candidate.to_string(),
            });
        }
        self.selected = candidate.to_string();
        Ok(())
    }

    /// `true` if the selected candidate has a record ready for intersection.
    pub fn is_resolved(&self) -> bool {
        self.selected_record().is_some()
    }

    /// Record of the selected candidate, if it has been fetched.
    pub fn selected_record(&self) -> Option<&PositionalIndexRecord> {
        self.suggestions.record(&self.selected)
    }
}

/// One node of the query sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "node", content = "value", rename_all = "lowercase")]
pub enum QueryNode {
    Term(TermNode),
    Operator(Operator),
}

/// Validated alternating sequence of terms and operators.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct QueryAst {
    nodes: Vec<QueryNode>,
}

impl QueryAst {
    /// Check the `Term (Operator Term)*` shape.
    pub fn new(nodes: Vec<QueryNode>) -> Result<Self, QueryParseError> {
        let (Some(first), Some(last)) = (nodes.first(), nodes.last()) else {
            return Err(QueryParseError::Empty);
        };
        for node in [first, last] {
            if let QueryNode::Operator(op) = node {
                return Err(QueryParseError::DanglingOperator {
                    operator: op.to_string(),
                });
            }
        }
        for pair in nodes.windows(2) {
            match (&pair[0], &pair[1]) {
                (QueryNode::Operator(a), QueryNode::Operator(b)) => {
                    return Err(QueryParseError::ConsecutiveOperators {
                        first: a.to_string(),
                        second: b.to_string(),
                    });
                }
                (QueryNode::Term(a), QueryNode::Term(b)) => {
                    return Err(QueryParseError::MissingOperator {
                        left: a.text.clone(),
                        right: b.text.clone(),
                    });
                }
                _ => {}
            }
        }
        Ok(Self { nodes })
    }

    /// Interleave resolved terms with the operators between them.
    ///
    /// `terms.len()` must be `operators.len() + 1`.
    pub fn from_parts(terms: Vec<TermNode>, operators: Vec<Operator>) -> Result<Self, QueryParseError> {
        let mut nodes = Vec::with_capacity(terms.len() + operators.len());
        let mut operators = operators.into_iter();
        for (i, term) in terms.into_iter().enumerate() {
            if i > 0 {
                match operators.next() {
                    Some(op) => nodes.push(QueryNode::Operator(op)),
                    None => {
                        let left = match nodes.last() {
                            Some(QueryNode::Term(t)) => t.text.clone(),
                            _ => String::new(),
                        };
                        return Err(QueryParseError::MissingOperator {
                            left,
                            right: term.text,
                        });
                    }
                }
            }
            nodes.push(QueryNode::Term(term));
        }
        // Leftover operators end up trailing and are rejected by `new`.
        nodes.extend(operators.map(QueryNode::Operator));
        Self::new(nodes)
    }

    pub fn nodes(&self) -> &[QueryNode] {
        &self.nodes
    }

    pub fn terms(&self) -> impl Iterator<Item = &TermNode> + '_ {
        self.nodes.iter().filter_map(|node| match node {
            QueryNode::Term(term) => Some(term),
            QueryNode::Operator(_) => None,
        })
    }

    pub fn terms_mut(&mut self) -> impl Iterator<Item = &mut TermNode> + '_ {
        self.nodes.iter_mut().filter_map(|node| match node {
            QueryNode::Term(term) => Some(term),
            QueryNode::Operator(_) => None,
        })
    }

    pub fn operators(&self) -> impl Iterator<Item = Operator> + '_ {
        self.nodes.iter().filter_map(|node| match node {
            QueryNode::Operator(op) => Some(*op),
            QueryNode::Term(_) => None,
        })
    }

    pub fn num_terms(&self) -> usize {
        self.nodes.len() / 2 + 1
    }

    /// Term by its index among terms (operators not counted).
    pub fn term(&self, index: usize) -> Result<&TermNode, SearchError> {
        let len = self.num_terms();
        self.terms()
            .nth(index)
            .ok_or(SearchError::TermIndexOutOfRange { index, len })
    }

    pub fn term_mut(&mut self, index: usize) -> Result<&mut TermNode, SearchError> {
        let len = self.num_terms();
        self.terms_mut()
            .nth(index)
            .ok_or(SearchError::TermIndexOutOfRange { index, len })
    }

    pub fn all_exact_matches(&self) -> bool {
        self.terms().all(|term| term.is_exact_match)
    }
}
