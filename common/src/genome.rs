use crate::base::Base;

/// An immutable, named DNA sequence.
///
/// The sequence is normalised to uppercase at construction time. Validation that every
/// character is a recognized `Base` is the loader's job (see `fasta_reader`), not this
/// type's: `Genome` is a plain value that can be built directly by callers who already
/// know their input is clean (tests, in-memory libraries), and it does not want to carry
/// a `Result` for a check most callers have already performed upstream.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Genome {
    name: String,
    sequence: String,
}

impl Genome {
    /// Builds a genome, upper-casing `sequence` in the process. `name` and `sequence`
    /// are expected to be non-empty; an empty sequence is accepted here (the matcher
    /// simply indexes no seeds for it) since rejecting it is a loader-level concern.
    pub fn new(name: impl Into<String>, sequence: impl AsRef<str>) -> Genome {
        Genome {
            name: name.into(),
            sequence: sequence.as_ref().to_ascii_uppercase(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    pub fn length(&self) -> usize {
        self.sequence.len()
    }

    /// Extracts `sequence[position .. position + length)`, or `None` if that range runs
    /// off the end of the genome. There is no partial extraction: either the whole
    /// requested run is returned or nothing is.
    pub fn extract(&self, position: usize, length: usize) -> Option<&str> {
        let end = position.checked_add(length)?;
        if end > self.sequence.len() {
            return None;
        }
        Some(&self.sequence[position..end])
    }

    /// Base at `position`, or `None` past the end of the sequence.
    pub fn base_at(&self, position: usize) -> Option<Base> {
        self.sequence.as_bytes().get(position).and_then(|&b| Base::from_char(b as char))
    }
}
