// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for positional record decoding.
//!
//! Store bytes are untrusted. Decoding must never panic, and anything that
//! decodes must satisfy the record invariants.

#![no_main]

use libfuzzer_sys::fuzz_target;
use proxima::PositionalIndexRecord;

fuzz_target!(|data: &[u8]| {
    let Ok(record) = serde_json::from_slice::<PositionalIndexRecord>(data) else {
        return;
    };
    for (_, positions) in &record {
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
    let encoded = serde_json::to_vec(&record).expect("decoded record re-encodes");
    let again: PositionalIndexRecord = serde_json::from_slice(&encoded).expect("re-encoded record decodes");
    assert_eq!(again, record);
});
