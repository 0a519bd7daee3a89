// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the proxima command-line interface.
//!
//! Two subcommands: `search` runs a proximity query against a static index
//! directory (optionally re-running it with chosen suggestions), and `lookup`
//! shows what the index knows about a single term.

pub mod display;
pub mod render;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "proxima",
    about = "Positional proximity search with fuzzy term resolution",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a query against an index directory
    Search {
        /// Index directory (words.json, terms/, ngrams/)
        index: PathBuf,

        /// Query string, e.g. `yoga o-exact/2 ayurveda`
        query: String,

        #[command(flatten)]
        fuzzy: FuzzyArgs,

        /// N-gram similarity threshold in (0, 1]
        #[arg(long)]
        threshold: Option<f64>,

        /// JSON config file (see SearchConfig)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Replace term I (0-based) with one of its suggestions, then re-run
        ///
        /// May be given several times, e.g. `--select 0=yogi --select 2=veda`.
        #[arg(long = "select", value_name = "I=WORD", value_parser = parse_selection)]
        selections: Vec<(usize, String)>,

        /// Print the outcome as JSON instead of the boxed report
        #[arg(long)]
        json: bool,
    },

    /// Show vocabulary and index information for one term
    Lookup {
        /// Index directory
        index: PathBuf,

        /// Term to look up (normalized before lookup)
        term: String,
    },
}

/// Fuzzy sources to enable, in addition to any enabled by `--config`.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct FuzzyArgs {
    /// Prefix matches
    #[arg(long)]
    pub prefix: bool,

    /// Words within one edit
    #[arg(long)]
    pub lev1: bool,

    /// Words within two edits
    #[arg(long)]
    pub lev2: bool,

    /// Bigram-similar words
    #[arg(long)]
    pub ngram: bool,
}

/// `I=WORD` → `(I, WORD)`.
pub fn parse_selection(raw: &str) -> Result<(usize, String), String> {
    let (index, word) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected I=WORD, got '{}'", raw))?;
    let index = index
        .trim()
        .parse::<usize>()
        .map_err(|_| format!("'{}' is not a term index", index))?;
    let word = word.trim();
    if word.is_empty() {
        return Err(format!("missing word in '{}'", raw));
    }
    Ok((index, word.to_string()))
}
