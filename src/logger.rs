//! Installs the process-wide logger. Library crates (`common`, `fasta_reader`, and this
//! crate's own `trie`/`matcher`/`config`) only ever depend on the `log` facade; this is
//! the one place a concrete backend (`simplelog`) is wired in, and it is only ever
//! called once, from `main`.

use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

/// Installs a terminal logger at `level`. Returns an error rather than panicking if a
/// logger has already been installed (for instance if a test harness installed one
/// first); `main` is responsible for deciding whether that's fatal.
pub fn init(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
}
