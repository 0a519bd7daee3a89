//! Fuzzy suggestion sources: prefix, Levenshtein 1 and 2, n-gram.

use crate::common::Corpus;
use proxima::{SearchOutcome, SearchTypeFlags, SuggestionRecord};

async fn search(query: &str, flags: SearchTypeFlags) -> SearchOutcome {
    Corpus::archive()
        .searcher()
        .search_with_flags(query, flags)
        .await
        .unwrap_or_else(|e| panic!("query '{}' failed: {}", query, e))
}

fn suggestions(outcome: &SearchOutcome, term: usize) -> Vec<String> {
    outcome
        .query
        .ast()
        .term(term)
        .unwrap()
        .suggestions
        .candidates()
        .map(str::to_string)
        .collect()
}

const LEV1: SearchTypeFlags = SearchTypeFlags {
    levenshtein1: true,
    ..SearchTypeFlags::EXACT
};

#[tokio::test]
async fn test_misspelled_term_gets_suggestions_not_results() {
    let outcome = search("yogu o-exact/2 ayurveda", LEV1).await;

    assert!(!outcome.result.all_exact_matches);
    assert!(outcome.result.is_fuzzy_search);
    assert!(outcome.result.matching_positions.is_empty());
    assert_eq!(suggestions(&outcome, 0), ["yoga", "yogi"]);
}

#[tokio::test]
async fn test_prefix_suggestions() {
    let flags = SearchTypeFlags {
        prefix: true,
        ..SearchTypeFlags::EXACT
    };
    let outcome = search("ved", flags).await;
    assert_eq!(suggestions(&outcome, 0), ["vedanta", "vedic"]);
}

#[tokio::test]
async fn test_levenshtein2_reaches_further_than_levenshtein1() {
    let outcome = search("tatwa", LEV1).await;
    assert!(suggestions(&outcome, 0).is_empty());

    let flags = SearchTypeFlags {
        levenshtein2: true,
        ..SearchTypeFlags::EXACT
    };
    let outcome = search("tatwa", flags).await;
    assert_eq!(suggestions(&outcome, 0), ["tattva"]);
}

#[tokio::test]
async fn test_ngram_suggestions() {
    let flags = SearchTypeFlags {
        ngram: true,
        ..SearchTypeFlags::EXACT
    };
    let outcome = search("sanskrt", flags).await;
    assert!(suggestions(&outcome, 0).contains(&"sanskrit".to_string()));
}

#[tokio::test]
async fn test_exact_term_with_fuzzy_flags_still_evaluates() {
    let outcome = search("yoga o-exact/2 ayurveda", LEV1).await;

    assert!(outcome.result.all_exact_matches);
    assert!(outcome.result.is_fuzzy_search);
    assert_eq!(outcome.result.matching_positions.doc_ids().collect::<Vec<_>>(), [2]);

    // Only the exact candidate is fetched up front.
    let term = outcome.query.ast().term(0).unwrap();
    assert!(matches!(term.suggestions.get("yoga"), Some(SuggestionRecord::Fetched(_))));
    assert!(matches!(term.suggestions.get("yogi"), Some(SuggestionRecord::Unfetched)));
}

#[tokio::test]
async fn test_all_sources_union() {
    let outcome = search("yog", SearchTypeFlags::ALL).await;
    let found = suggestions(&outcome, 0);
    assert!(found.contains(&"yoga".to_string()));
    assert!(found.contains(&"yogi".to_string()));
    assert!(found.windows(2).all(|w| w[0] < w[1]), "suggestions are deduplicated");
}

#[tokio::test]
async fn test_configured_flags_apply_to_plain_search() {
    let corpus = Corpus::archive();
    let config = proxima::SearchConfig {
        flags: LEV1,
        ..Default::default()
    };
    let ctx = proxima::SearchContext::with_store(corpus.vocabulary(), corpus.store(), config).unwrap();
    let outcome = proxima::Searcher::new(ctx).search("yogu").await.unwrap();

    assert!(outcome.query.is_fuzzy_search());
    assert_eq!(suggestions(&outcome, 0), ["yoga", "yogi"]);
}
