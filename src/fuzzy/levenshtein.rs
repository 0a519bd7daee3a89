// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Bounded edit distance with early exits.
//!
//! `|len(a) - len(b)|` is a lower bound on edit distance, so most
//! vocabulary words are rejected before the O(nm) DP allocates anything.
//! Inside the DP, once every cell of a row exceeds the bound the rest of the
//! table cannot come back under it.
//!
//! Lengths are in chars, not bytes: `śiva` and `siva` are one edit apart.

/// Are these strings within `max` edits of each other? Inclusive.
pub fn levenshtein_within(a: &str, b: &str, max: usize) -> bool {
    BoundedLevenshtein::new(a, max).matches(b)
}

/// A query term prepared for scanning many candidates at one bound.
#[derive(Debug, Clone)]
pub struct BoundedLevenshtein {
    query: Vec<char>,
    max: usize,
}

impl BoundedLevenshtein {
    pub fn new(query: &str, max: usize) -> Self {
        Self {
            query: query.chars().collect(),
            max,
        }
    }

    /// Cheap length-only rejection. `false` means the candidate cannot match.
    #[inline]
    pub fn length_admits(&self, candidate_len: usize) -> bool {
        self.query.len().abs_diff(candidate_len) <= self.max
    }

    pub fn matches(&self, candidate: &str) -> bool {
        let candidate: Vec<char> = candidate.chars().collect();
        if !self.length_admits(candidate.len()) {
            return false;
        }

        let mut dp: Vec<usize> = (0..=candidate.len()).collect();
        for (i, &qc) in self.query.iter().enumerate() {
            let mut prev = dp[0];
            dp[0] = i + 1;
            let mut min_row = dp[0];

            for (j, &cc) in candidate.iter().enumerate() {
                let above = dp[j + 1];
                let cost = usize::from(qc != cc);
                dp[j + 1] = (above + 1).min(dp[j] + 1).min(prev + cost);
                prev = above;
                min_row = min_row.min(dp[j + 1]);
            }

            if min_row > self.max {
                return false;
            }
        }

        dp[candidate.len()] <= self.max
    }
}
