mod cli;
mod logger;

use std::process;
use std::str::FromStr;

use clap::Parser;
use log::{error, info};
use simplelog::LevelFilter;

use genomatch::config::EngineConfig;
use genomatch::GenomeMatcher;

use cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();

    let level = LevelFilter::from_str(&cli.log_level).unwrap_or(LevelFilter::Info);
    if let Err(e) = logger::init(level) {
        eprintln!("warning: could not install logger: {e}");
    }

    let config = match &cli.config {
        Some(path) => match EngineConfig::load(path) {
            Ok(config) => Some(config),
            Err(e) => {
                error!("{e}");
                process::exit(1);
            }
        },
        None => None,
    };

    let reference_paths: Vec<String> = if !cli.reference.is_empty() {
        cli.reference.clone()
    } else {
        config
            .as_ref()
            .map(|c| c.reference_paths.clone())
            .unwrap_or_default()
    };

    if reference_paths.is_empty() {
        error!("no reference paths given: pass --reference or a --config with reference_paths");
        process::exit(1);
    }

    let minimum_search_length = cli.minimum_search_length.unwrap_or_else(|| {
        config
            .as_ref()
            .map(|c| c.minimum_search_length)
            .unwrap_or(10)
    });

    let mut matcher = GenomeMatcher::new(minimum_search_length);
    for path in &reference_paths {
        match fasta_reader::load(path) {
            Ok(genomes) => {
                for genome in genomes {
                    matcher.add_genome(genome);
                }
            }
            Err(e) => {
                error!("failed to load reference library {path}: {e}");
                process::exit(1);
            }
        }
    }
    info!(
        "loaded {} genome(s) from {} file(s)",
        matcher.genome_count(),
        reference_paths.len()
    );

    match &cli.command {
        Command::Match {
            fragment,
            minimum_length,
            exact,
        } => {
            let minimum_length = minimum_length.unwrap_or_else(|| {
                config
                    .as_ref()
                    .map(|c| c.default_minimum_length)
                    .unwrap_or(minimum_search_length)
            });
            let exact = *exact || config.as_ref().is_some_and(|c| c.default_exact);

            let (matches, found) =
                matcher.find_genomes_with_this_dna(fragment, minimum_length, exact);
            if !found {
                println!("no matches");
                process::exit(1);
            }
            for m in matches {
                println!("{}\t{}\t{}", m.genome_name, m.length, m.position);
            }
        }
        Command::Related {
            query_path,
            fragment_length,
            threshold,
            exact,
        } => {
            let genomes = match fasta_reader::load(query_path) {
                Ok(g) => g,
                Err(e) => {
                    error!("failed to load query genome {query_path}: {e}");
                    process::exit(1);
                }
            };
            let Some(query) = genomes.into_iter().next() else {
                error!("{query_path}: no query genome found");
                process::exit(1);
            };

            let fragment_length = fragment_length.unwrap_or_else(|| {
                config
                    .as_ref()
                    .map(|c| c.default_fragment_length)
                    .unwrap_or(minimum_search_length)
            });
            let threshold = threshold.unwrap_or_else(|| {
                config.as_ref().map(|c| c.default_threshold).unwrap_or(50.0)
            });
            let exact = *exact || config.as_ref().is_some_and(|c| c.default_exact);

            let (matches, found) =
                matcher.find_related_genomes(&query, fragment_length, exact, threshold);
            if !found {
                println!("no related genomes above threshold");
                process::exit(1);
            }
            for m in matches {
                println!("{}\t{:.2}", m.genome_name, m.percent_match);
            }
        }
    }
}
