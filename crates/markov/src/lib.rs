//! Exact absorption probabilities for absorbing Markov chains.
//!
//! A chain is given as a square matrix of observed transition counts, where
//! entry `(i, j)` counts transitions from state `i` to state `j`. A state
//! whose row is all zero is absorbing. For a process starting in state 0 (or
//! a configured start state), [`solve`] returns the exact probability of
//! ending in each absorbing state, as integer numerators over one shared
//! denominator.
//!
//! # Pipeline
//!
//! ```text
//!  ┌──────────────┐     ┌────────────────┐     ┌──────────────────────┐
//!  │  normalize    │────▶│  partition     │────▶│  solve               │
//!  │  (counts→P)   │     │  (Q and R)     │     │  N=(I−Q)⁻¹, B=N·R    │
//!  └──────────────┘     └────────────────┘     └──────────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use absorb_markov::solve;
//!
//! let counts = vec![
//!     vec![0, 2, 1, 0, 0],
//!     vec![0, 0, 0, 3, 4],
//!     vec![0, 0, 0, 0, 0],
//!     vec![0, 0, 0, 0, 0],
//!     vec![0, 0, 0, 0, 0],
//! ];
//! let result = solve(&counts).unwrap();
//!
//! assert_eq!(result.to_i64_vec().unwrap(), vec![7, 6, 8, 21]);
//! ```

pub mod config;
pub mod error;
pub mod normalize;
pub mod partition;
pub mod result;
pub mod solve;

pub use config::SolverConfig;
pub use error::MarkovError;
pub use normalize::normalize;
pub use partition::{CanonicalForm, classify, partition};
pub use result::AbsorptionResult;
pub use solve::{expected_steps, solve, solve_with_config, solve_with_steps};
