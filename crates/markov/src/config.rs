//! Configuration for absorption solving.

use crate::error::MarkovError;

/// Largest chain accepted by default.
///
/// Cofactor inversion grows factorially with the number of transient states,
/// so inputs are capped well before that becomes noticeable.
pub const DEFAULT_MAX_STATES: usize = 10;

/// Configuration for [`solve_with_config`](crate::solve_with_config).
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use absorb_markov::SolverConfig;
///
/// let config = SolverConfig::new()
///     .with_max_states(8)
///     .with_start_state(1);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    max_states: usize,
    start_state: usize,
}

impl SolverConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `max_states = 10`, `start_state = 0`.
    pub fn new() -> Self {
        Self {
            max_states: DEFAULT_MAX_STATES,
            start_state: 0,
        }
    }

    /// Sets the largest number of states accepted.
    pub fn with_max_states(mut self, max_states: usize) -> Self {
        self.max_states = max_states;
        self
    }

    /// Sets the state the process starts in.
    pub fn with_start_state(mut self, start_state: usize) -> Self {
        self.start_state = start_state;
        self
    }

    /// Returns the largest number of states accepted.
    pub fn max_states(&self) -> usize {
        self.max_states
    }

    /// Returns the state the process starts in.
    pub fn start_state(&self) -> usize {
        self.start_state
    }

    /// Validates this configuration.
    ///
    /// `max_states` must be at least 1 and must admit the start state.
    pub fn validate(&self) -> Result<(), MarkovError> {
        if self.max_states == 0 {
            return Err(MarkovError::InvalidConfig {
                reason: "max_states must be at least 1".to_string(),
            });
        }
        if self.start_state >= self.max_states {
            return Err(MarkovError::InvalidConfig {
                reason: format!(
                    "start_state {} is not below max_states {}",
                    self.start_state, self.max_states
                ),
            });
        }
        Ok(())
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::new()
    }
}
