// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query-string parser.
//!
//! Grammar (whitespace separated):
//!
//! ```text
//! query    := unit (op? unit)*
//! unit     := word | '"' word+ '"'
//! op       := ("o-exact" | "u-exact" | "o-max" | "u-max") "/" N
//! ```
//!
//! Adjacent units get an implicit AND. A quoted phrase becomes its words
//! joined by `o-exact/0`. An operator next to a phrase binds to the phrase's
//! last word on the left and first word on the right. Operator names are
//! case-insensitive.
//!
//! Any bare token shaped like `name-name/...` is an operator attempt: an
//! unknown name or a bad distance is an error, never silently a term.

use super::{Operator, ProximityKind};
use crate::error::QueryParseError;
use crate::util::normalize::normalize_term;
use std::fmt;

/// Parser output: normalized terms and the operators between them.
///
/// `terms.len() == operators.len() + 1` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    terms: Vec<String>,
    operators: Vec<Operator>,
}

impl ParsedQuery {
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// `operators()[i]` sits between `terms()[i]` and `terms()[i + 1]`.
    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<Operator>) {
        (self.terms, self.operators)
    }
}

/// Canonical query string. Parses back to the same `ParsedQuery`.
impl fmt::Display for ParsedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                match self.operators[i - 1] {
                    Operator::And => f.write_str(" ")?,
                    op => write!(f, " {} ", op)?,
                }
            }
            if looks_like_operator(term) {
                write!(f, "\"{}\"", term)?;
            } else {
                f.write_str(term)?;
            }
        }
        Ok(())
    }
}

enum Token {
    Words(Vec<String>),
    Op { operator: Operator, raw: String },
}

/// Parse a raw query string.
///
/// ```
/// use proxima::query::{parse_query, Operator, ProximityKind};
///
/// let parsed = parse_query("Yoga o-exact/2 ayurveda").unwrap();
/// assert_eq!(parsed.terms(), ["yoga", "ayurveda"]);
/// assert_eq!(
///     parsed.operators(),
///     [Operator::proximity(ProximityKind::OrderedExact, 2)]
/// );
/// ```
pub fn parse_query(input: &str) -> Result<ParsedQuery, QueryParseError> {
    let tokens = tokenize(input)?;

    let mut terms: Vec<String> = Vec::new();
    let mut operators: Vec<Operator> = Vec::new();
    let mut pending: Option<(Operator, String)> = None;

    for token in tokens {
        match token {
            Token::Op { operator, raw } => {
                if terms.is_empty() {
                    return Err(QueryParseError::DanglingOperator { operator: raw });
                }
                if let Some((_, first)) = pending.take() {
                    return Err(QueryParseError::ConsecutiveOperators { first, second: raw });
                }
                pending = Some((operator, raw));
            }
            Token::Words(words) => {
                for (i, word) in words.into_iter().enumerate() {
                    if !terms.is_empty() {
                        let op = if i > 0 {
                            Operator::proximity(ProximityKind::OrderedExact, 0)
                        } else {
                            pending.take().map(|(op, _)| op).unwrap_or_default()
                        };
                        operators.push(op);
                    }
                    terms.push(word);
                }
            }
        }
    }

    if let Some((_, raw)) = pending {
        return Err(QueryParseError::DanglingOperator { operator: raw });
    }
    if terms.is_empty() {
        return Err(QueryParseError::Empty);
    }
    Ok(ParsedQuery { terms, operators })
}

fn tokenize(input: &str) -> Result<Vec<Token>, QueryParseError> {
    let mut tokens = Vec::new();
    let mut rest = input.char_indices().peekable();

    while let Some(&(start, c)) = rest.peek() {
        if c.is_whitespace() {
            rest.next();
            continue;
        }

        if c == '"' {
            rest.next();
            let body_start = start + c.len_utf8();
            let close = input[body_start..]
                .find('"')
                .map(|rel| body_start + rel)
                .ok_or(QueryParseError::UnbalancedQuote { offset: start })?;
            let words: Vec<String> = input[body_start..close]
                .split_whitespace()
                .map(normalize_term)
                .filter(|w| !w.is_empty())
                .collect();
            if words.is_empty() {
                return Err(QueryParseError::EmptyPhrase { offset: start });
            }
            tokens.push(Token::Words(words));
            while rest.peek().is_some_and(|&(i, _)| i <= close) {
                rest.next();
            }
            continue;
        }

        let mut end = input.len();
        while let Some(&(i, c)) = rest.peek() {
            if c.is_whitespace() || c == '"' {
                end = i;
                break;
            }
            rest.next();
        }
        let raw = &input[start..end];
        match classify_operator(raw) {
            Some(operator) => tokens.push(Token::Op {
                operator: operator?,
                raw: raw.to_string(),
            }),
            None => {
                let word = normalize_term(raw);
                if !word.is_empty() {
                    tokens.push(Token::Words(vec![word]));
                }
            }
        }
    }

    Ok(tokens)
}

/// `None` if `raw` is not operator-shaped, otherwise the parse outcome.
fn classify_operator(raw: &str) -> Option<Result<Operator, QueryParseError>> {
    let (name, distance) = raw.rsplit_once('/')?;
    if !is_operator_name(name) {
        return None;
    }
    let kind = match name.parse::<ProximityKind>() {
        Ok(kind) => kind,
        Err(_) => {
            return Some(Err(QueryParseError::UnknownOperator {
                operator: raw.to_string(),
            }))
        }
    };
    let parsed = if distance.bytes().all(|b| b.is_ascii_digit()) {
        distance.parse::<u32>().ok()
    } else {
        None
    };
    Some(parsed.map(|d| Operator::proximity(kind, d)).ok_or_else(|| {
        QueryParseError::InvalidDistance {
            operator: raw.to_string(),
        }
    }))
}

/// `letters-letters`.
fn is_operator_name(name: &str) -> bool {
    match name.split_once('-') {
        Some((a, b)) => {
            !a.is_empty()
                && !b.is_empty()
                && a.chars().all(|c| c.is_ascii_alphabetic())
                && b.chars().all(|c| c.is_ascii_alphabetic())
        }
        None => false,
    }
}

fn looks_like_operator(term: &str) -> bool {
    classify_operator(term).is_some()
}
