//! Superseded and cancelled queries.

use crate::common::{Corpus, SlowStore};
use proxima::searcher::run_query;
use proxima::{SearchError, SearchTypeFlags, Searcher};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

const STORE_DELAY: Duration = Duration::from_millis(200);
const HEAD_START: Duration = Duration::from_millis(20);

fn slow_searcher(corpus: &Corpus) -> Searcher {
    Searcher::new(corpus.context_with(SlowStore {
        inner: corpus.store(),
        delay: STORE_DELAY,
    }))
}

#[tokio::test]
async fn test_new_query_supersedes_in_flight_query() {
    let corpus = Corpus::archive();
    let searcher = slow_searcher(&corpus);

    let (first, second) = tokio::join!(searcher.search("yoga ayurveda"), async {
        tokio::time::sleep(HEAD_START).await;
        searcher.search("yoga").await
    });

    assert!(matches!(first, Err(SearchError::Cancelled)));
    let second = second.unwrap();
    assert_eq!(&second.result.matching_positions, &corpus.records["yoga"]);
}

#[tokio::test]
async fn test_cancel_in_flight() {
    let corpus = Corpus::archive();
    let searcher = slow_searcher(&corpus);

    let (outcome, ()) = tokio::join!(searcher.search("yoga"), async {
        tokio::time::sleep(HEAD_START).await;
        searcher.cancel_in_flight();
    });

    assert!(matches!(outcome, Err(SearchError::Cancelled)));
}

#[tokio::test]
async fn test_cancel_with_nothing_in_flight_is_harmless() {
    let corpus = Corpus::archive();
    let searcher = corpus.searcher();

    searcher.cancel_in_flight();
    let outcome = searcher.search("yoga").await.unwrap();
    assert!(outcome.result.all_exact_matches);
}

#[tokio::test]
async fn test_cancelled_selection_leaves_query_untouched() {
    let corpus = Corpus::archive();
    let searcher = slow_searcher(&corpus);
    let flags = SearchTypeFlags {
        levenshtein1: true,
        ..SearchTypeFlags::EXACT
    };
    let mut query = searcher.search_with_flags("yogu ayurveda", flags).await.unwrap().query;
    let before = query.clone();

    let selections = [(0, "yoga".to_string())];
    let (result, ()) = tokio::join!(searcher.search_by_suggestions(&mut query, &selections), async {
        tokio::time::sleep(HEAD_START).await;
        searcher.cancel_in_flight();
    });

    assert!(matches!(result, Err(SearchError::Cancelled)));
    assert_eq!(query, before);
    assert_eq!(query.ast().term(0).unwrap().selected(), "yogu");
}

#[tokio::test]
async fn test_pre_cancelled_token_does_no_work() {
    let corpus = Corpus::archive();
    let ctx = corpus.context();
    let token = CancellationToken::new();
    token.cancel();

    let err = run_query(&ctx, "yoga", SearchTypeFlags::EXACT, &token)
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::Cancelled));
}
