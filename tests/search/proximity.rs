//! Exact-term queries over the archive corpus: every operator kind, phrases
//! and chains.
//!
//! Token offsets (see `common::ARCHIVE`):
//!
//! ```text
//! 1: sanskrit₀ verse₁ similar₂ to₃ vedic₄ verse₅
//! 2: yoga₀ practice₁ with₂ ayurveda₃
//! 3: ayurveda₀ and₁ yoga₂
//! 4: yoga₀ and₁ ayurveda₂ texts₃ on₄ yoga₅
//! 5: the₀ yogi₁ recited₂ a₃ verse₄ from₅ the₆ vedanta₇
//! ```

use crate::common::{record, Corpus};
use proxima::{DocumentId, Position, PositionalIndexRecord, SearchOutcome};

async fn search(query: &str) -> SearchOutcome {
    Corpus::archive()
        .searcher()
        .search(query)
        .await
        .unwrap_or_else(|e| panic!("query '{}' failed: {}", query, e))
}

fn expected(entries: &[(DocumentId, &[Position])]) -> PositionalIndexRecord {
    record(entries)
}

#[tokio::test]
async fn test_ordered_exact() {
    let outcome = search("yoga o-exact/2 ayurveda").await;

    assert!(outcome.result.all_exact_matches);
    assert!(!outcome.result.is_fuzzy_search);
    assert_eq!(outcome.result.matching_positions, expected(&[(2, &[0, 3])]));
}

#[tokio::test]
async fn test_ordered_exact_rejects_reverse_order() {
    let outcome = search("ayurveda o-exact/2 yoga").await;
    assert!(outcome.result.matching_positions.is_empty());
}

#[tokio::test]
async fn test_unordered_exact_matches_both_directions() {
    let outcome = search("yoga u-exact/1 ayurveda").await;
    assert_eq!(
        outcome.result.matching_positions,
        expected(&[(3, &[0, 2]), (4, &[0, 2])])
    );
}

#[tokio::test]
async fn test_ordered_maximum() {
    let outcome = search("yoga o-max/2 ayurveda").await;
    assert_eq!(
        outcome.result.matching_positions,
        expected(&[(2, &[0, 3]), (4, &[0, 2])])
    );
}

#[tokio::test]
async fn test_unordered_maximum_zero_means_adjacent() {
    let outcome = search("yoga u-max/0 ayurveda").await;
    assert!(outcome.result.all_exact_matches);
    assert!(outcome.result.matching_positions.is_empty());

    let outcome = search("and u-max/0 yoga").await;
    assert_eq!(outcome.result.matching_positions, expected(&[(3, &[1, 2]), (4, &[0, 1])]));
}

#[tokio::test]
async fn test_implicit_and_keeps_every_position() {
    let outcome = search("yoga ayurveda").await;
    assert_eq!(
        outcome.result.matching_positions,
        expected(&[(2, &[0, 3]), (3, &[0, 2]), (4, &[0, 2, 5])])
    );
    assert_eq!(
        outcome.result.matching_positions.doc_ids().collect::<Vec<_>>(),
        [2, 3, 4]
    );
}

#[tokio::test]
async fn test_phrase_is_adjacent_ordered() {
    let outcome = search("\"and ayurveda\"").await;
    assert_eq!(outcome.result.matching_positions, expected(&[(4, &[1, 2])]));

    let outcome = search("\"ayurveda and\"").await;
    assert_eq!(outcome.result.matching_positions, expected(&[(3, &[0, 1])]));
}

#[tokio::test]
async fn test_chained_operators_fold_left() {
    let outcome = search("sanskrit o-exact/0 verse u-max/4 vedic").await;
    assert_eq!(outcome.result.matching_positions, expected(&[(1, &[0, 1, 4])]));
}

#[tokio::test]
async fn test_same_term_twice() {
    let outcome = search("verse o-exact/3 verse").await;
    assert_eq!(outcome.result.matching_positions, expected(&[(1, &[1, 5])]));
}

#[tokio::test]
async fn test_single_term_returns_its_record() {
    let corpus = Corpus::archive();
    let outcome = search("Verse").await;
    assert_eq!(&outcome.result.matching_positions, &corpus.records["verse"]);
}

#[tokio::test]
async fn test_unknown_term_skips_intersection() {
    let outcome = search("yoga o-exact/2 nirvana").await;

    assert!(!outcome.result.all_exact_matches);
    assert!(outcome.result.matching_positions.is_empty());
    let terms: Vec<_> = outcome.query.terms().collect();
    assert!(terms[0].is_exact_match);
    assert!(!terms[1].is_exact_match);
    assert!(terms[1].suggestions.is_empty());
}

#[tokio::test]
async fn test_malformed_query_is_a_parse_error() {
    let searcher = Corpus::archive().searcher();
    for query in ["", "o-exact/2 yoga", "yoga u-max/", "yoga o-near/3 veda", "\"yoga"] {
        let err = searcher.search(query).await.unwrap_err();
        assert!(
            matches!(err, proxima::SearchError::Parse(_)),
            "'{}' should fail to parse, got {:?}",
            query,
            err
        );
    }
}
