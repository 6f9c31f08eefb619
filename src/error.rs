use std::io;

/// Failures that can prevent the engine from starting from a bad config file.
/// Reference-library load failures surface as `fasta_reader::FastaError` directly; a
/// bad library is the loader's concern, not the engine's. Per-query precondition
/// failures are not errors at all — they are a `false`/empty result, per the matcher's
/// own API (see `crate::matcher`).
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("could not read config file {path}: {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("could not parse config file {path}: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("minimum_search_length must be at least 1, got {0}")]
    InvalidMinimumSearchLength(usize),

    #[error("default_threshold must be between 0 and 100, got {0}")]
    InvalidDefaultThreshold(f64),
}
