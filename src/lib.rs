//! Indexed approximate-match genomic sequence search engine.
//!
//! `trie` holds the fixed-width index structure; `matcher` is the public query API
//! built on top of it; `config` and `error` are the ambient configuration/error layer;
//! `common::genome::Genome` (re-exported here) is the value type both query entry
//! points work in terms of.

pub mod config;
pub mod error;
pub mod matcher;
pub mod trie;

pub use common::genome::Genome;
pub use error::EngineError;
pub use matcher::{DnaMatch, GenomeMatch, GenomeMatcher};
