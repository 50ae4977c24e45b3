//! Canonical-form partition of a transition matrix.

use absorb_matrix::Matrix;
use tracing::debug;

use crate::config::SolverConfig;
use crate::error::MarkovError;
use crate::normalize::{normalize, validate_counts};

/// The transient/absorbing split of a transition matrix.
///
/// Reordering states so that transient ones come first gives the block form
///
/// ```text
///  P = | Q  R |
///      | 0  I |
/// ```
///
/// `Q` holds transient→transient probabilities and `R` transient→absorbing
/// probabilities. Both index lists are in ascending original order, and row
/// `k` of `Q`/`R` belongs to state `transient()[k]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalForm {
    transient: Vec<usize>,
    absorbing: Vec<usize>,
    q: Matrix,
    r: Matrix,
}

impl CanonicalForm {
    /// Original indices of the transient states, ascending.
    pub fn transient(&self) -> &[usize] {
        &self.transient
    }

    /// Original indices of the absorbing states, ascending.
    pub fn absorbing(&self) -> &[usize] {
        &self.absorbing
    }

    /// Transient→transient block.
    pub fn q(&self) -> &Matrix {
        &self.q
    }

    /// Transient→absorbing block.
    pub fn r(&self) -> &Matrix {
        &self.r
    }

    /// Position of `state` among the transient states, if it is transient.
    pub fn transient_position(&self, state: usize) -> Option<usize> {
        self.transient.binary_search(&state).ok()
    }
}

/// Splits a square transition matrix into its canonical-form blocks.
///
/// A state is absorbing iff every entry of its row is zero.
///
/// # Errors
///
/// Returns [`MarkovError::Matrix`] if `transition` is not square.
pub fn partition(transition: &Matrix) -> Result<CanonicalForm, MarkovError> {
    if !transition.is_square() {
        return Err(absorb_matrix::MatrixError::NotSquare {
            rows: transition.rows(),
            cols: transition.cols(),
        }
        .into());
    }

    let (absorbing, transient): (Vec<usize>, Vec<usize>) = transition
        .iter_rows()
        .enumerate()
        .map(|(i, row)| (i, row.iter().all(|p| p.is_zero())))
        .fold((Vec::new(), Vec::new()), |(mut a, mut t), (i, is_absorbing)| {
            if is_absorbing {
                a.push(i);
            } else {
                t.push(i);
            }
            (a, t)
        });

    let q = transition.select(&transient, &transient)?;
    let r = transition.select(&transient, &absorbing)?;
    debug!(
        transient = transient.len(),
        absorbing = absorbing.len(),
        "partitioned chain"
    );

    Ok(CanonicalForm {
        transient,
        absorbing,
        q,
        r,
    })
}

/// Validates `counts`, normalizes them and partitions the result.
///
/// Applies the same input checks as [`solve_with_config`](crate::solve_with_config),
/// so a chain that classifies cleanly is one the solver accepts up to
/// reachability.
///
/// # Errors
///
/// - [`MarkovError::InvalidConfig`] if `config` is invalid.
/// - [`MarkovError::EmptyMatrix`], [`MarkovError::NotSquare`],
///   [`MarkovError::TooManyStates`], [`MarkovError::StartOutOfRange`] for
///   malformed input.
pub fn classify(counts: &[Vec<u64>], config: &SolverConfig) -> Result<CanonicalForm, MarkovError> {
    config.validate()?;
    validate_counts(counts, config)?;
    partition(&normalize(counts)?)
}
