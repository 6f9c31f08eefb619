//! YAML-loadable engine configuration, mirroring the defaults a bare CLI invocation
//! would otherwise need repeated on every command line.

use std::fs;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// k: the trie's fixed key width and the floor for every query's minimum length.
    pub minimum_search_length: usize,
    #[serde(default = "default_minimum_length")]
    pub default_minimum_length: usize,
    #[serde(default)]
    pub default_exact: bool,
    #[serde(default = "default_fragment_length")]
    pub default_fragment_length: usize,
    #[serde(default = "default_threshold")]
    pub default_threshold: f64,
    #[serde(default)]
    pub reference_paths: Vec<String>,
}

fn default_minimum_length() -> usize {
    10
}

fn default_fragment_length() -> usize {
    10
}

fn default_threshold() -> f64 {
    50.0
}

impl EngineConfig {
    /// Reads and validates a config file. A config that would let the engine start in
    /// an unusable state (`k < 1`, `default_threshold` outside `[0, 100]`) is rejected
    /// here rather than surfacing later as a silently-empty query result.
    pub fn load(path: &str) -> Result<Self, EngineError> {
        let text = fs::read_to_string(path).map_err(|source| EngineError::ConfigIo {
            path: path.to_string(),
            source,
        })?;
        let config: EngineConfig =
            serde_yaml::from_str(&text).map_err(|source| EngineError::ConfigParse {
                path: path.to_string(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), EngineError> {
        if self.minimum_search_length < 1 {
            return Err(EngineError::InvalidMinimumSearchLength(
                self.minimum_search_length,
            ));
        }
        if !(0.0..=100.0).contains(&self.default_threshold) {
            return Err(EngineError::InvalidDefaultThreshold(self.default_threshold));
        }
        Ok(())
    }
}
