//! Loads a FASTA-like genome library from disk into `common::genome::Genome` records.
//!
//! This is the out-of-core loader described in the search engine's external interfaces:
//! the trie, `Genome`, and `GenomeMatcher` never parse files themselves. Rejection is
//! all-or-nothing — a malformed stream produces zero genomes, never a partial library.

pub mod error;

use common::base::Base;
use common::genome::Genome;
use common::file_tools::read_lines;
use log::{debug, error};

pub use error::FastaError;

enum State {
    BeforeFirstRecord,
    JustSawName,
    InSequence,
}

/// Parses a FASTA file at `path` into an ordered list of genomes.
///
/// See the module docs and `FastaError` for the rejection rules. The returned `Vec`
/// preserves record order.
pub fn load(path: &str) -> Result<Vec<Genome>, FastaError> {
    let lines = read_lines(path).map_err(|source| FastaError::Io {
        path: path.to_string(),
        source,
    })?;

    let mut genomes = Vec::new();
    let mut state = State::BeforeFirstRecord;
    let mut current_name: Option<String> = None;
    let mut current_seq = String::new();
    let mut line_no = 0usize;

    for raw_line in lines {
        line_no += 1;
        let line = raw_line.map_err(|source| FastaError::Io {
            path: path.to_string(),
            source,
        })?;
        let is_blank = line.trim().is_empty();
        let is_name = line.starts_with('>');

        if matches!(state, State::BeforeFirstRecord) {
            if is_blank {
                continue;
            }
            if !is_name {
                return Err(FastaError::MissingLeadingMarker { line: line_no });
            }
        }

        if is_name {
            match state {
                State::JustSawName => {
                    return Err(FastaError::MissingSequenceAfterName { line: line_no - 1 })
                }
                State::InSequence => {
                    genomes.push(Genome::new(current_name.take().unwrap(), &current_seq));
                    current_seq.clear();
                }
                State::BeforeFirstRecord => {}
            }

            let name = &line[1..];
            if name.is_empty() {
                return Err(FastaError::EmptyName { line: line_no });
            }
            current_name = Some(name.to_string());
            state = State::JustSawName;
            continue;
        }

        if is_blank {
            return match state {
                State::JustSawName => {
                    Err(FastaError::MissingSequenceAfterName { line: line_no - 1 })
                }
                State::InSequence => Err(FastaError::BlankLineWithinRecord { line: line_no }),
                State::BeforeFirstRecord => unreachable!("blank lines are skipped above"),
            };
        }

        if let Some(bad) = line.chars().find(|&c| !Base::is_valid(c)) {
            return Err(FastaError::InvalidBase {
                line: line_no,
                character: bad,
            });
        }
        current_seq.push_str(&line);
        state = State::InSequence;
    }

    match state {
        State::BeforeFirstRecord => {
            error!("{path}: no FASTA records found");
            Err(FastaError::EmptyFile)
        }
        State::JustSawName => Err(FastaError::MissingSequenceAfterName { line: line_no }),
        State::InSequence => {
            genomes.push(Genome::new(current_name.take().unwrap(), &current_seq));
            debug!("{path}: loaded {} record(s)", genomes.len());
            Ok(genomes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_fixture(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    fn path_of(file: &tempfile::NamedTempFile) -> &str {
        file.path().to_str().unwrap()
    }

    #[test]
    fn loads_a_single_record() {
        let file = write_fixture(">H1N1_HA\nACGTacgtN\n");
        let genomes = load(path_of(&file)).unwrap();
        assert_eq!(genomes.len(), 1);
        assert_eq!(genomes[0].name(), "H1N1_HA");
        assert_eq!(genomes[0].sequence(), "ACGTACGTN");
    }

    #[test]
    fn loads_multiple_records_preserving_order() {
        let file = write_fixture(">first\nACGT\n>second\nTTTT\nGGGG\n");
        let genomes = load(path_of(&file)).unwrap();
        assert_eq!(genomes.len(), 2);
        assert_eq!(genomes[0].name(), "first");
        assert_eq!(genomes[1].name(), "second");
        assert_eq!(genomes[1].sequence(), "TTTTGGGG");
    }

    #[test]
    fn tolerates_leading_blank_lines() {
        let file = write_fixture("\n\n>a\nACGT\n");
        let genomes = load(path_of(&file)).unwrap();
        assert_eq!(genomes[0].name(), "a");
    }

    #[test]
    fn rejects_stream_not_starting_with_marker() {
        let file = write_fixture("ACGT\n>a\nACGT\n");
        assert!(matches!(
            load(path_of(&file)),
            Err(FastaError::MissingLeadingMarker { line: 1 })
        ));
    }

    #[test]
    fn rejects_empty_name() {
        let file = write_fixture(">\nACGT\n");
        assert!(matches!(
            load(path_of(&file)),
            Err(FastaError::EmptyName { line: 1 })
        ));
    }

    #[test]
    fn rejects_name_with_no_sequence_before_next_record() {
        let file = write_fixture(">a\n>b\nACGT\n");
        assert!(matches!(
            load(path_of(&file)),
            Err(FastaError::MissingSequenceAfterName { line: 1 })
        ));
    }

    #[test]
    fn rejects_name_with_no_sequence_before_eof() {
        let file = write_fixture(">a\n");
        assert!(matches!(
            load(path_of(&file)),
            Err(FastaError::MissingSequenceAfterName { line: 1 })
        ));
    }

    #[test]
    fn rejects_blank_line_between_sequence_lines() {
        let file = write_fixture(">a\nACGT\n\nTTTT\n");
        assert!(matches!(
            load(path_of(&file)),
            Err(FastaError::BlankLineWithinRecord { line: 3 })
        ));
    }

    #[test]
    fn rejects_invalid_base_character() {
        let file = write_fixture(">a\nACGTX\n");
        assert!(matches!(
            load(path_of(&file)),
            Err(FastaError::InvalidBase { line: 2, character: 'X' })
        ));
    }

    #[test]
    fn rejects_entirely_blank_file() {
        let file = write_fixture("\n\n");
        assert!(matches!(load(path_of(&file)), Err(FastaError::EmptyFile)));
    }

    #[test]
    fn rejects_missing_file() {
        assert!(matches!(load("definitely/missing.fa"), Err(FastaError::Io { .. })));
    }

    #[test]
    fn a_rejected_file_yields_no_partial_library() {
        // The second record is malformed; the first, otherwise-valid record must not
        // leak out as a partial result.
        let file = write_fixture(">good\nACGT\n>bad\nACGTX\n");
        assert!(load(path_of(&file)).is_err());
    }
}
