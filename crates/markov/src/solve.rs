//! Absorption probabilities via the fundamental matrix.

use absorb_matrix::Matrix;
use absorb_rational::Rational;
use tracing::debug;

use crate::config::SolverConfig;
use crate::error::MarkovError;
use crate::normalize::{is_absorbing_row, normalize, validate_counts};
use crate::partition::{CanonicalForm, partition};
use crate::result::AbsorptionResult;

/// Canonical form and fundamental matrix of a chain whose start state is
/// transient.
struct Prepared {
    form: CanonicalForm,
    fundamental: Matrix,
    start_row: usize,
}

/// Returns `N = (I - Q)^-1`.
fn fundamental_matrix(q: &Matrix) -> Result<Matrix, MarkovError> {
    Ok(Matrix::identity(q.rows()).subtract(q)?.power(-1)?)
}

/// Normalizes and partitions `counts` and inverts `I - Q`.
///
/// Returns `Ok(None)` when the start state is itself absorbing.
fn prepare(counts: &[Vec<u64>], config: &SolverConfig) -> Result<Option<Prepared>, MarkovError> {
    config.validate()?;
    validate_counts(counts, config)?;
    let start = config.start_state();
    if is_absorbing_row(&counts[start]) {
        debug!(start, "start state is absorbing");
        return Ok(None);
    }

    let transition = normalize(counts)?;
    let form = partition(&transition)?;
    let fundamental = fundamental_matrix(form.q())?;
    let start_row = form
        .transient_position(start)
        .expect("a state with outgoing transitions is transient");
    Ok(Some(Prepared {
        form,
        fundamental,
        start_row,
    }))
}

/// Solves for absorption probabilities from state 0.
///
/// Equivalent to [`solve_with_config`] with [`SolverConfig::default`].
///
/// # Errors
///
/// See [`solve_with_config`].
pub fn solve(counts: &[Vec<u64>]) -> Result<AbsorptionResult, MarkovError> {
    solve_with_config(counts, &SolverConfig::default())
}

/// Original indices of every all-zero row of `counts`.
fn absorbing_states(counts: &[Vec<u64>]) -> Vec<usize> {
    counts
        .iter()
        .enumerate()
        .filter(|(_, row)| is_absorbing_row(row))
        .map(|(i, _)| i)
        .collect()
}

impl Prepared {
    /// Scales the start state's row of `B = N R` onto a common denominator.
    fn absorption(&self) -> Result<AbsorptionResult, MarkovError> {
        let b = self.fundamental.matrix_multiply(self.form.r())?;
        let probabilities = b.row(self.start_row).unwrap_or_default();
        let result =
            AbsorptionResult::from_probabilities(self.form.absorbing().to_vec(), probabilities)?;
        debug!(
            absorbing = result.len(),
            denominator = %result.denominator(),
            "solved absorption probabilities"
        );
        Ok(result)
    }

    /// Row sum of `N` for the start state.
    fn expected_steps(&self) -> Rational {
        self.fundamental
            .row(self.start_row)
            .map(|row| row.iter().sum())
            .unwrap_or_default()
    }
}

/// Solves for the exact probability of ending in each absorbing state.
///
/// 1. If the start state has no outgoing transitions, it is absorbed
///    immediately: probability one there, zero at every other absorbing
///    state, denominator one.
/// 2. Otherwise the counts are normalized and partitioned into `Q` and `R`,
///    and `B = (I - Q)^-1 R` is computed exactly.
/// 3. The start state's row of `B` is scaled onto the least common multiple
///    of its denominators.
///
/// A single-state chain `[[0]]` therefore yields numerators `[1]` over
/// denominator `1`.
///
/// # Errors
///
/// - [`MarkovError::EmptyMatrix`], [`MarkovError::NotSquare`],
///   [`MarkovError::TooManyStates`], [`MarkovError::StartOutOfRange`] for
///   malformed input.
/// - [`MarkovError::InvalidConfig`] if `config` is invalid.
/// - [`MarkovError::NoAbsorbingPath`] if some transient state can never be
///   absorbed, which makes `I - Q` singular.
#[tracing::instrument(skip(counts, config), fields(n = counts.len(), start = config.start_state()))]
pub fn solve_with_config(
    counts: &[Vec<u64>],
    config: &SolverConfig,
) -> Result<AbsorptionResult, MarkovError> {
    match prepare(counts, config)? {
        Some(prepared) => prepared.absorption(),
        None => Ok(AbsorptionResult::certain(
            absorbing_states(counts),
            config.start_state(),
        )),
    }
}

/// Expected number of transitions before absorption, from the start state.
///
/// This is the start state's row sum of the fundamental matrix `N`, since
/// `N[i][j]` is the expected number of visits to transient state `j`. Zero
/// when the start state is absorbing.
///
/// # Errors
///
/// Same as [`solve_with_config`].
pub fn expected_steps(counts: &[Vec<u64>], config: &SolverConfig) -> Result<Rational, MarkovError> {
    Ok(prepare(counts, config)?
        .map(|prepared| prepared.expected_steps())
        .unwrap_or_default())
}

/// Absorption probabilities and expected steps from one inversion of
/// `I - Q`.
///
/// Same results as calling [`solve_with_config`] and [`expected_steps`]
/// separately.
///
/// # Errors
///
/// Same as [`solve_with_config`].
#[tracing::instrument(skip(counts, config), fields(n = counts.len(), start = config.start_state()))]
pub fn solve_with_steps(
    counts: &[Vec<u64>],
    config: &SolverConfig,
) -> Result<(AbsorptionResult, Rational), MarkovError> {
    match prepare(counts, config)? {
        Some(prepared) => Ok((prepared.absorption()?, prepared.expected_steps())),
        None => Ok((
            AbsorptionResult::certain(absorbing_states(counts), config.start_state()),
            Rational::zero(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(n: i64, d: i64) -> Rational {
        Rational::new(n, d).unwrap()
    }

    #[test]
    fn fundamental_matrix_two_states() {
        // Q = [[0, 1/2], [4/9, 0]] -> det(I - Q) = 7/9.
        let q = Matrix::from_rows(vec![vec![r(0, 1), r(1, 2)], vec![r(4, 9), r(0, 1)]]).unwrap();
        let n = fundamental_matrix(&q).unwrap();
        assert_eq!(
            n,
            Matrix::from_rows(vec![vec![r(9, 7), r(9, 14)], vec![r(4, 7), r(9, 7)]]).unwrap()
        );
    }

    #[test]
    fn fundamental_matrix_singular() {
        let q = Matrix::from_rows(vec![vec![Rational::one()]]).unwrap();
        assert_eq!(fundamental_matrix(&q), Err(MarkovError::NoAbsorbingPath));
    }

    #[test]
    fn solve_two_state() {
        let result = solve(&[vec![0, 3], vec![0, 0]]).unwrap();
        assert_eq!(result.to_i64_vec().unwrap(), vec![1, 1]);
        assert_eq!(result.absorbing_states(), &[1]);
    }

    #[test]
    fn solve_self_loop_on_start() {
        // State 0 stays put half the time and is absorbed into 1 or 2 otherwise.
        let result = solve(&[vec![2, 1, 1], vec![0, 0, 0], vec![0, 0, 0]]).unwrap();
        assert_eq!(result.to_i64_vec().unwrap(), vec![1, 1, 2]);
    }

    #[test]
    fn solve_start_state_override() {
        let counts = [
            vec![0, 1, 0, 0, 0, 1],
            vec![4, 0, 0, 3, 2, 0],
            vec![0, 0, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0, 0],
        ];
        let config = SolverConfig::new().with_start_state(1);
        let result = solve_with_config(&counts, &config).unwrap();
        // From s1: s3 = 3/7, s4 = 2/7, s5 = 2/7.
        assert_eq!(result.to_i64_vec().unwrap(), vec![0, 3, 2, 2, 7]);
    }

    #[test]
    fn solve_absorbing_start_override() {
        let counts = [vec![0, 1, 0], vec![0, 0, 0], vec![0, 0, 0]];
        let config = SolverConfig::new().with_start_state(2);
        let result = solve_with_config(&counts, &config).unwrap();
        assert_eq!(result.absorbing_states(), &[1, 2]);
        assert_eq!(result.to_i64_vec().unwrap(), vec![0, 1, 1]);
    }

    #[test]
    fn solve_closed_transient_loop() {
        // States 1 and 2 bounce between each other forever.
        let counts = [vec![0, 1, 0, 1], vec![0, 0, 1, 0], vec![0, 1, 0, 0], vec![0, 0, 0, 0]];
        assert_eq!(solve(&counts), Err(MarkovError::NoAbsorbingPath));
    }

    #[test]
    fn solve_rejects_invalid_config() {
        let config = SolverConfig::new().with_max_states(0);
        assert!(matches!(
            solve_with_config(&[vec![0]], &config),
            Err(MarkovError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn expected_steps_simple() {
        // From 0: always to 1, then 1 always absorbs into 2.
        let counts = [vec![0, 1, 0], vec![0, 0, 5], vec![0, 0, 0]];
        assert_eq!(
            expected_steps(&counts, &SolverConfig::default()).unwrap(),
            r(2, 1)
        );
    }

    #[test]
    fn expected_steps_geometric() {
        // Stay with probability 1/2: expected 2 steps.
        let counts = [vec![1, 1], vec![0, 0]];
        assert_eq!(
            expected_steps(&counts, &SolverConfig::default()).unwrap(),
            r(2, 1)
        );
    }

    #[test]
    fn expected_steps_absorbing_start() {
        assert_eq!(
            expected_steps(&[vec![0]], &SolverConfig::default()).unwrap(),
            Rational::zero()
        );
    }

    #[test]
    fn solve_with_steps_matches_separate_calls() {
        let counts = [
            vec![0, 1, 0, 0, 0, 1],
            vec![4, 0, 0, 3, 2, 0],
            vec![0, 0, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0, 0],
        ];
        let config = SolverConfig::default();
        let (result, steps) = solve_with_steps(&counts, &config).unwrap();
        assert_eq!(result, solve_with_config(&counts, &config).unwrap());
        assert_eq!(steps, expected_steps(&counts, &config).unwrap());
        assert_eq!(result.to_i64_vec().unwrap(), vec![0, 3, 2, 9, 14]);
        assert_eq!(steps, r(27, 14));
    }

    #[test]
    fn solve_with_steps_absorbing_start() {
        let (result, steps) = solve_with_steps(&[vec![0, 0], vec![1, 0]], &SolverConfig::default())
            .unwrap();
        assert_eq!(result.to_i64_vec().unwrap(), vec![1, 1]);
        assert!(steps.is_zero());
    }

    #[test]
    fn solve_with_steps_propagates_errors() {
        let counts = [vec![0, 1, 0, 1], vec![0, 0, 1, 0], vec![0, 1, 0, 0], vec![0, 0, 0, 0]];
        assert_eq!(
            solve_with_steps(&counts, &SolverConfig::default()),
            Err(MarkovError::NoAbsorbingPath)
        );
    }
}
