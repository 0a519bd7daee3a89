//! Terms keep their query position when their records arrive out of order.
//!
//! Each test slows the record of one term so the fetches complete in the
//! opposite order from the query, then checks the ordered operator still
//! binds its left and right sides to the right terms.

use crate::common::{record, Corpus, DelayedStore};
use proxima::{Searcher, SearchOutcome, StoreKey};
use std::time::Duration;

const LATE: Duration = Duration::from_millis(120);

async fn search_with_late(query: &str, late_word: &str) -> SearchOutcome {
    let corpus = Corpus::archive();
    let store = DelayedStore::new(corpus.store())
        .delay(StoreKey::Positional(corpus.word_id(late_word)), LATE);
    Searcher::new(corpus.context_with(store))
        .search(query)
        .await
        .unwrap_or_else(|e| panic!("query '{}' failed: {}", query, e))
}

fn assert_terms_bound(outcome: &SearchOutcome, expected_order: &[&str]) {
    let corpus = Corpus::archive();
    let ast = outcome.query.ast();
    for (index, word) in expected_order.iter().enumerate() {
        let term = ast.term(index).unwrap();
        assert_eq!(term.text, *word);
        assert_eq!(term.selected_record(), Some(&corpus.records[*word]));
    }
}

#[tokio::test]
async fn test_first_term_arrives_last() {
    let outcome = search_with_late("yoga o-exact/2 ayurveda", "yoga").await;

    assert_terms_bound(&outcome, &["yoga", "ayurveda"]);
    assert_eq!(outcome.result.matching_positions, record(&[(2, &[0, 3])]));
}

#[tokio::test]
async fn test_last_term_arrives_last() {
    let outcome = search_with_late("yoga o-exact/2 ayurveda", "ayurveda").await;

    assert_terms_bound(&outcome, &["yoga", "ayurveda"]);
    assert_eq!(outcome.result.matching_positions, record(&[(2, &[0, 3])]));
}

#[tokio::test]
async fn test_reversed_query_stays_empty_when_first_term_arrives_last() {
    let outcome = search_with_late("ayurveda o-exact/2 yoga", "ayurveda").await;

    assert_terms_bound(&outcome, &["ayurveda", "yoga"]);
    assert!(outcome.result.matching_positions.is_empty());
}

#[tokio::test]
async fn test_reversed_query_keeps_direction() {
    // Doc 3: ayurveda₀ and₁ yoga₂. Doc 4 has ayurveda₂ … yoga₅, too far.
    for late in ["ayurveda", "yoga"] {
        let outcome = search_with_late("ayurveda o-exact/1 yoga", late).await;

        assert_terms_bound(&outcome, &["ayurveda", "yoga"]);
        assert_eq!(
            outcome.result.matching_positions,
            record(&[(3, &[0, 2])]),
            "late record: {}",
            late
        );
    }
}
