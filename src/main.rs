// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use clap::Parser;
use proxima::store::fetch_positional_record;
use proxima::{
    normalize_term, Automaton, SearchConfig, SearchContext, SearchError, SearchTypeFlags, Searcher,
    StoreKey,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

mod cli;
use cli::display::error_line;
use cli::render::{lookup_report, search_report, LookupReport};
use cli::{Cli, Commands, FuzzyArgs};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("proxima=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Commands::Search {
            index,
            query,
            fuzzy,
            threshold,
            config,
            selections,
            json,
        } => {
            run_search(SearchArgs {
                index,
                query,
                fuzzy,
                threshold,
                config,
                selections,
                json,
            })
            .await
        }
        Commands::Lookup { index, term } => run_lookup(&index, &term).await,
    };

    if let Err(e) = outcome {
        eprintln!("{}", error_line(&format!("❌ {}", e)));
        std::process::exit(1);
    }
}

struct SearchArgs {
    index: PathBuf,
    query: String,
    fuzzy: FuzzyArgs,
    threshold: Option<f64>,
    config: Option<PathBuf>,
    selections: Vec<(usize, String)>,
    json: bool,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    query: &'a proxima::ResolvedQuery,
    result: &'a proxima::QueryResult,
    matching_document_ids: Vec<proxima::DocumentId>,
}

async fn run_search(args: SearchArgs) -> Result<(), SearchError> {
    let mut config = match &args.config {
        Some(path) => SearchConfig::from_file(path)?,
        None => SearchConfig::default(),
    };
    if let Some(threshold) = args.threshold {
        config.similarity_threshold = threshold;
    }
    let flags = SearchTypeFlags {
        prefix: config.flags.prefix || args.fuzzy.prefix,
        levenshtein1: config.flags.levenshtein1 || args.fuzzy.lev1,
        levenshtein2: config.flags.levenshtein2 || args.fuzzy.lev2,
        ngram: config.flags.ngram || args.fuzzy.ngram,
    };

    let ctx = SearchContext::open_directory(&args.index, config).await?;
    let searcher = Searcher::new(ctx);

    let started = Instant::now();
    let mut outcome = searcher.search_with_flags(&args.query, flags).await?;
    let result = if args.selections.is_empty() {
        outcome.result
    } else {
        searcher
            .search_by_suggestions(&mut outcome.query, &args.selections)
            .await?
    };
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

    if args.json {
        let report = JsonReport {
            query: &outcome.query,
            result: &result,
            matching_document_ids: result.matching_document_ids(),
        };
        let text = serde_json::to_string_pretty(&report)
            .map_err(|e| SearchError::Config(format!("failed to serialize report: {}", e)))?;
        println!("{}", text);
    } else {
        search_report(&outcome.query, &result, searcher.context().ngram(), elapsed_ms);
    }
    Ok(())
}

async fn run_lookup(index: &Path, term: &str) -> Result<(), SearchError> {
    let ctx = SearchContext::open_directory(index, SearchConfig::default()).await?;
    let term = normalize_term(term);
    let word_id = ctx.vocabulary().index_of(&term);

    let (docs, positions) = match word_id {
        Some(id) => match fetch_positional_record(ctx.store(), id).await? {
            Some(record) => (record.num_docs(), record.num_positions()),
            None => (0, 0),
        },
        None => (0, 0),
    };
    let store_path = word_id.map(|id| {
        proxima::store::relative_path(&StoreKey::Positional(id))
            .display()
            .to_string()
    });

    let automaton: &dyn Automaton = ctx.automaton();
    let report = LookupReport {
        term: &term,
        word_id,
        store_path,
        docs,
        positions,
        prefix_matches: automaton.prefix_search(&term).await.len(),
        lev1_matches: automaton.levenshtein1_search(&term).await.len(),
        lev2_matches: automaton.levenshtein2_search(&term).await.len(),
    };
    lookup_report(&report);
    Ok(())
}
