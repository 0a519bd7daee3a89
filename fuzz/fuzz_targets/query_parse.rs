// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the query parser.
//!
//! Any input either fails with a parse error or yields a well-shaped query
//! whose canonical form parses back to the same thing.

#![no_main]

use libfuzzer_sys::fuzz_target;
use proxima::parse_query;

fuzz_target!(|data: &[u8]| {
    let input: String = String::from_utf8_lossy(data).chars().take(200).collect();

    let Ok(parsed) = parse_query(&input) else {
        return;
    };
    assert_eq!(parsed.terms().len(), parsed.operators().len() + 1);
    assert!(parsed.terms().iter().all(|t| !t.is_empty()));

    let canonical = parsed.to_string();
    let reparsed = parse_query(&canonical)
        .unwrap_or_else(|e| panic!("canonical form {:?} failed to parse: {}", canonical, e));
    assert_eq!(reparsed, parsed, "canonical form {:?}", canonical);
});
