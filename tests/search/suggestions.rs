//! Re-running a query with selected suggestions.

use crate::common::{record, Corpus, CountingStore};
use proxima::{SearchError, SearchTypeFlags, Searcher, StoreKey, SuggestionRecord};
use std::sync::atomic::Ordering;

const LEV1: SearchTypeFlags = SearchTypeFlags {
    levenshtein1: true,
    ..SearchTypeFlags::EXACT
};

#[tokio::test]
async fn test_selecting_suggestion_evaluates_query() {
    let searcher = Corpus::archive().searcher();
    let mut query = searcher
        .search_with_flags("yogu o-exact/2 ayurveda", LEV1)
        .await
        .unwrap()
        .query;

    let result = searcher
        .search_by_suggestions(&mut query, &[(0, "yoga".to_string())])
        .await
        .unwrap();

    assert_eq!(result.matching_positions, record(&[(2, &[0, 3])]));
    assert!(!result.all_exact_matches);
    assert!(result.is_fuzzy_search);

    let term = query.ast().term(0).unwrap();
    assert_eq!(term.selected(), "yoga");
    assert!(matches!(term.suggestions.get("yoga"), Some(SuggestionRecord::Fetched(_))));
}

#[tokio::test]
async fn test_switching_selection_reuses_fetched_records() {
    let corpus = Corpus::archive();
    let (store, reads) = CountingStore::new(corpus.store());
    let searcher = Searcher::new(corpus.context_with(store));

    let mut query = searcher
        .search_with_flags("yogu ayurveda", LEV1)
        .await
        .unwrap()
        .query;
    // "yogu" is not in the vocabulary, so only "ayurveda" is read.
    assert_eq!(reads.load(Ordering::SeqCst), 1);

    searcher
        .search_by_suggestions(&mut query, &[(0, "yoga".to_string())])
        .await
        .unwrap();
    assert_eq!(reads.load(Ordering::SeqCst), 2);

    let result = searcher
        .search_by_suggestions(&mut query, &[(0, "yogi".to_string())])
        .await
        .unwrap();
    assert_eq!(reads.load(Ordering::SeqCst), 3);
    assert!(result.matching_positions.is_empty());

    let result = searcher
        .search_by_suggestions(&mut query, &[(0, "yoga".to_string())])
        .await
        .unwrap();
    assert_eq!(reads.load(Ordering::SeqCst), 3);
    assert_eq!(result.matching_positions.doc_ids().collect::<Vec<_>>(), [2, 3, 4]);
}

#[tokio::test]
async fn test_unknown_suggestion_leaves_query_untouched() {
    let searcher = Corpus::archive().searcher();
    let mut query = searcher.search_with_flags("yogu ayurveda", LEV1).await.unwrap().query;
    let before = query.clone();

    let err = searcher
        .search_by_suggestions(&mut query, &[(0, "yoga".to_string()), (1, "tattva".to_string())])
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SearchError::UnknownSuggestion { ref term, ref candidate } if term == "ayurveda" && candidate == "tattva"
    ));
    assert_eq!(query, before);
}

#[tokio::test]
async fn test_term_index_out_of_range() {
    let searcher = Corpus::archive().searcher();
    let mut query = searcher.search_with_flags("yogu ayurveda", LEV1).await.unwrap().query;

    let err = searcher
        .search_by_suggestions(&mut query, &[(5, "yoga".to_string())])
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::TermIndexOutOfRange { index: 5, len: 2 }));
}

#[tokio::test]
async fn test_unselected_inexact_term_is_rejected() {
    let searcher = Corpus::archive().searcher();
    let mut query = searcher.search_with_flags("yogu ayurveda", LEV1).await.unwrap().query;

    let err = searcher.search_by_suggestions(&mut query, &[]).await.unwrap_err();
    assert!(matches!(err, SearchError::UnresolvedTerm { ref term } if term == "yogu"));
}

#[tokio::test]
async fn test_selection_without_stored_record_is_empty() {
    let corpus = Corpus::archive();
    let vocabulary = corpus.vocabulary();
    let mut store = corpus.store();
    store.remove(&StoreKey::Positional(vocabulary.index_of("yogi").unwrap()));
    let searcher = Searcher::new(corpus.context_with(store));

    let mut query = searcher.search_with_flags("yogu ayurveda", LEV1).await.unwrap().query;
    let result = searcher
        .search_by_suggestions(&mut query, &[(0, "yogi".to_string())])
        .await
        .unwrap();

    let term = query.ast().term(0).unwrap();
    assert_eq!(term.selected_record().map(|r| r.is_empty()), Some(true));
    // An empty record is the identity, so only "ayurveda" constrains the result.
    assert_eq!(&result.matching_positions, &corpus.records["ayurveda"]);
}
