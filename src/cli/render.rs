// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Boxed reports for `search` and `lookup`.

use super::display::{
    dim, heading, match_badge, operator_label, pad_right, positions_preview, row, section_bot,
    section_mid, section_top, similarity_value, timing_ms,
};
use proxima::query::QueryNode;
use proxima::resolve::SuggestionRecord;
use proxima::{NGramResolver, QueryResult, ResolvedQuery, WordId};

const MAX_SUGGESTIONS: usize = 12;
const MAX_DOCUMENTS: usize = 20;
const MAX_POSITIONS: usize = 10;

pub fn search_report(query: &ResolvedQuery, result: &QueryResult, ngram: &NGramResolver, elapsed_ms: f64) {
    section_top("QUERY");
    let mut line = String::from(" ");
    for node in query.ast().nodes() {
        match node {
            QueryNode::Term(term) => {
                line.push_str(&heading(&term.text));
                if term.selected() != term.text {
                    line.push_str(&dim(&format!(" → {}", term.selected())));
                }
            }
            QueryNode::Operator(op) => {
                line.push(' ');
                line.push_str(&operator_label(*op));
                line.push(' ');
            }
        }
    }
    row(&line);

    section_mid("TERMS");
    for (i, term) in query.terms().enumerate() {
        row(&format!(
            " {} {} {}",
            dim(&format!("#{}", i)),
            pad_right(&term.text, 24),
            match_badge(term.is_exact_match)
        ));
        let others: Vec<(&str, &SuggestionRecord)> = term
            .suggestions
            .iter()
            .map(|(candidate, record)| (candidate.as_str(), record))
            .filter(|(candidate, _)| *candidate != term.text)
            .collect();
        for (candidate, record) in others.iter().take(MAX_SUGGESTIONS) {
            let state = match record {
                SuggestionRecord::Fetched(r) => format!("{} docs", r.num_docs()),
                SuggestionRecord::Unfetched => "not fetched".to_string(),
            };
            row(&format!(
                "     {} {}  {}",
                pad_right(candidate, 24),
                similarity_value(ngram.similarity(&term.text, candidate)),
                dim(&state)
            ));
        }
        if others.len() > MAX_SUGGESTIONS {
            row(&dim(&format!("     … {} more", others.len() - MAX_SUGGESTIONS)));
        }
    }

    section_mid("RESULTS");
    // After --select every term is resolved even though some were inexact.
    if query.terms().any(|term| !term.is_resolved()) {
        row(" Not every term matched exactly. Pick suggestions with --select I=WORD.");
    } else {
        let docs = result.matching_document_ids();
        row(&format!(
            " {} documents{}",
            docs.len(),
            if result.is_fuzzy_search { " (fuzzy sources on)" } else { "" }
        ));
        for (doc_id, positions) in result.matching_positions.iter().take(MAX_DOCUMENTS) {
            row(&format!(
                "   {} {}",
                pad_right(&heading(&doc_id.to_string()), 10),
                positions_preview(positions, MAX_POSITIONS)
            ));
        }
        if docs.len() > MAX_DOCUMENTS {
            row(&dim(&format!("   … {} more", docs.len() - MAX_DOCUMENTS)));
        }
    }
    row(&format!(" {}", timing_ms(elapsed_ms)));
    section_bot();
}

/// What the index knows about one term.
pub struct LookupReport<'a> {
    pub term: &'a str,
    pub word_id: Option<WordId>,
    pub store_path: Option<String>,
    pub docs: usize,
    pub positions: usize,
    pub prefix_matches: usize,
    pub lev1_matches: usize,
    pub lev2_matches: usize,
}

pub fn lookup_report(report: &LookupReport<'_>) {
    section_top("LOOKUP");
    row(&format!(" {}", heading(report.term)));
    match report.word_id {
        Some(id) => {
            row(&format!(" word ID      {}", id));
            if let Some(path) = &report.store_path {
                row(&format!(" record       {}", dim(path)));
            }
            row(&format!(" documents    {}", report.docs));
            row(&format!(" positions    {}", report.positions));
        }
        None => row(&format!(" {}", match_badge(false))),
    }
    section_mid("NEIGHBOURS");
    row(&format!(" prefix       {}", report.prefix_matches));
    row(&format!(" 1 edit       {}", report.lev1_matches));
    row(&format!(" 2 edits      {}", report.lev2_matches));
    section_bot();
}
