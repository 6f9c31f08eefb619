use std::io;

/// Why a FASTA-format stream was rejected.
///
/// A rejected stream never yields a partial library: the loader either returns every
/// genome the file describes, or none of them.
#[derive(Debug, thiserror::Error)]
pub enum FastaError {
    #[error("could not open {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("file contains no records")]
    EmptyFile,

    #[error("line {line}: expected a record marker ('>') before any sequence data")]
    MissingLeadingMarker { line: usize },

    #[error("line {line}: record name is empty")]
    EmptyName { line: usize },

    #[error("line {line}: record has no sequence data")]
    MissingSequenceAfterName { line: usize },

    #[error("line {line}: blank line inside a record")]
    BlankLineWithinRecord { line: usize },

    #[error("line {line}: '{character}' is not a valid base (expected A, C, G, T, or N)")]
    InvalidBase { line: usize, character: char },
}
