use std::path::Path;

use absorb_markov::SolverConfig;
use absorb_markov::config::DEFAULT_MAX_STATES;
use anyhow::{Context, Result};
use serde::Deserialize;

/// A chain file: the transition counts plus optional solver settings.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChainFile {
    /// Square matrix of observed transition counts.
    pub counts: Vec<Vec<u64>>,

    /// Solver settings.
    #[serde(default)]
    pub solver: SolverToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SolverToml {
    #[serde(default = "default_max_states")]
    pub max_states: usize,
    #[serde(default)]
    pub start_state: usize,
}

impl Default for SolverToml {
    fn default() -> Self {
        Self {
            max_states: default_max_states(),
            start_state: 0,
        }
    }
}

fn default_max_states() -> usize {
    DEFAULT_MAX_STATES
}

impl SolverToml {
    /// Builds a [`SolverConfig`], letting CLI values override file values.
    pub fn to_config(&self, max_states: Option<usize>, start_state: Option<usize>) -> SolverConfig {
        SolverConfig::new()
            .with_max_states(max_states.unwrap_or(self.max_states))
            .with_start_state(start_state.unwrap_or(self.start_state))
    }
}

/// Reads and parses a chain file.
pub fn load(path: &Path) -> Result<ChainFile> {
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read chain file: {}", path.display()))?;
    parse(&toml_str).with_context(|| format!("failed to parse chain file: {}", path.display()))
}

fn parse(toml_str: &str) -> Result<ChainFile> {
    Ok(toml::from_str(toml_str)?)
}
