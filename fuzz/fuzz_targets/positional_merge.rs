// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the positional merges.
//!
//! The sliding-window maximum-offset merge must agree with the union of the
//! exact-offset merges it replaces, including next to `u32::MAX`.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use proxima::merge::{exact_offset_positions, intersect_with_maximum_offset, union_sorted};

#[derive(Debug, Arbitrary)]
struct MergeInput {
    a: Vec<u32>,
    b: Vec<u32>,
    distance: u8,
    near_max: bool,
}

fn prepare(mut xs: Vec<u32>, near_max: bool) -> Vec<u32> {
    xs.truncate(64);
    if near_max {
        xs.iter_mut().for_each(|x| *x = u32::MAX - (*x % 256));
    } else {
        xs.iter_mut().for_each(|x| *x %= 512);
    }
    xs.sort_unstable();
    xs.dedup();
    xs
}

fuzz_target!(|input: MergeInput| {
    let a = prepare(input.a, input.near_max);
    let b = prepare(input.b, input.near_max);
    let distance = u32::from(input.distance % 32);

    let expected = (0..=distance).fold(Vec::new(), |acc, d| {
        union_sorted(&acc, &exact_offset_positions(&a, &b, d))
    });
    let got = intersect_with_maximum_offset(&a, &b, distance);
    assert_eq!(got, expected, "a={:?} b={:?} distance={}", a, b, distance);
});
