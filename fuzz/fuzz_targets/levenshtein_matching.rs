// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for bounded Levenshtein matching.
//!
//! The reusable matcher, the one-shot check and a plain Wagner-Fischer
//! distance must all agree on whether two words are within k edits.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use proxima::fuzzy::{levenshtein_within, BoundedLevenshtein};

#[derive(Debug, Arbitrary)]
struct MatchInput {
    query: String,
    target: String,
    max: u8,
}

fn distance(a: &[char], b: &[char]) -> usize {
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.iter().enumerate() {
        let mut curr = vec![i + 1; b.len() + 1];
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        prev = curr;
    }
    prev[b.len()]
}

fuzz_target!(|input: MatchInput| {
    let query: String = input.query.chars().take(24).collect();
    let target: String = input.target.chars().take(24).collect();
    let max = usize::from(input.max % 3);

    let a: Vec<char> = query.chars().collect();
    let b: Vec<char> = target.chars().collect();
    let expected = distance(&a, &b) <= max;

    assert_eq!(levenshtein_within(&query, &target, max), expected);
    assert_eq!(BoundedLevenshtein::new(&query, max).matches(&target), expected);
});
