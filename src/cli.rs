//! Command-line surface over the engine API. A thin translation layer: parse
//! arguments, optionally fold in a config file's defaults, build a `GenomeMatcher`
//! from the reference library, dispatch to a query, print results.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "genomatch", about = "Indexed approximate-match genomic search")]
pub struct Cli {
    /// Path to a YAML config file (see `crate::config::EngineConfig`). When given, its
    /// `reference_paths` and `default_*` fields fill in anything not set on the
    /// command line; per-invocation flags still take precedence.
    #[arg(short = 'C', long = "config")]
    pub config: Option<String>,

    /// One or more FASTA reference files to load into the search library.
    #[arg(short = 'r', long = "reference")]
    pub reference: Vec<String>,

    /// k: the trie's fixed key width. Falls back to a config file's
    /// `minimum_search_length` if not given, and to 10 if neither is given.
    #[arg(short = 'k', long = "minimum-search-length")]
    pub minimum_search_length: Option<usize>,

    #[arg(long = "log-level", default_value = "Info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Does this fragment occur (within one mismatch after its first base, unless
    /// --exact) in any reference genome?
    Match {
        fragment: String,
        #[arg(short = 'm', long = "minimum-length")]
        minimum_length: Option<usize>,
        #[arg(long = "exact")]
        exact: bool,
    },
    /// How related is a query genome to each reference genome, by windowed seed hits?
    Related {
        /// Path to a FASTA file holding exactly the query genome.
        query_path: String,
        #[arg(short = 'f', long = "fragment-length")]
        fragment_length: Option<usize>,
        #[arg(short = 't', long = "threshold")]
        threshold: Option<f64>,
        #[arg(long = "exact")]
        exact: bool,
    },
}
