//! Conversion of raw transition counts into a row-stochastic matrix.

use absorb_matrix::Matrix;
use absorb_rational::Rational;
use num_bigint::BigInt;
use num_traits::Zero;

use crate::config::SolverConfig;
use crate::error::MarkovError;

/// Checks that `counts` is a non-empty square matrix within the configured
/// bounds, and returns its dimension.
pub(crate) fn validate_counts(counts: &[Vec<u64>], config: &SolverConfig) -> Result<usize, MarkovError> {
    let n = counts.len();
    if n == 0 {
        return Err(MarkovError::EmptyMatrix);
    }
    if let Some((row, r)) = counts.iter().enumerate().find(|(_, r)| r.len() != n) {
        return Err(MarkovError::NotSquare {
            row,
            len: r.len(),
            expected: n,
        });
    }
    if n > config.max_states() {
        return Err(MarkovError::TooManyStates {
            n,
            max: config.max_states(),
        });
    }
    if config.start_state() >= n {
        return Err(MarkovError::StartOutOfRange {
            start: config.start_state(),
            n,
        });
    }
    Ok(n)
}

/// Returns `true` if the row has no outgoing transitions.
pub(crate) fn is_absorbing_row(row: &[u64]) -> bool {
    row.iter().all(|&c| c == 0)
}

/// Converts transition counts into exact transition probabilities.
///
/// Each row is divided by its sum. A row summing to zero (an absorbing
/// state) becomes a row of zeros rather than a self-loop; absorbing rows are
/// never read as sources of `Q` or `R`.
///
/// Row sums are accumulated as big integers, so large counts cannot overflow.
///
/// # Errors
///
/// Returns [`MarkovError::Matrix`] if the rows differ in length.
pub fn normalize(counts: &[Vec<u64>]) -> Result<Matrix, MarkovError> {
    let rows = counts
        .iter()
        .map(|row| {
            let total: BigInt = row.iter().map(|&c| BigInt::from(c)).sum();
            if total.is_zero() {
                Ok(vec![Rational::zero(); row.len()])
            } else {
                row.iter()
                    .map(|&c| Rational::new(c, total.clone()))
                    .collect::<Result<Vec<_>, _>>()
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Matrix::from_rows(rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(n: i64, d: i64) -> Rational {
        Rational::new(n, d).unwrap()
    }

    #[test]
    fn normalize_rows() {
        let p = normalize(&[vec![0, 1, 1], vec![2, 0, 6], vec![0, 0, 0]]).unwrap();
        assert_eq!(p.row(0).unwrap(), &[r(0, 1), r(1, 2), r(1, 2)]);
        assert_eq!(p.row(1).unwrap(), &[r(1, 4), r(0, 1), r(3, 4)]);
        assert_eq!(p.row(2).unwrap(), &[r(0, 1), r(0, 1), r(0, 1)]);
    }

    #[test]
    fn normalize_rows_sum_to_one_or_zero() {
        let p = normalize(&[vec![3, 5, 7], vec![0, 0, 0], vec![1, 0, 0]]).unwrap();
        assert_eq!(
            p.row_sums(),
            vec![Rational::one(), Rational::zero(), Rational::one()]
        );
    }

    #[test]
    fn normalize_large_counts() {
        let p = normalize(&[vec![u64::MAX, u64::MAX]]).unwrap();
        assert_eq!(p.row(0).unwrap(), &[r(1, 2), r(1, 2)]);
    }

    #[test]
    fn normalize_ragged_fails() {
        let result = normalize(&[vec![1, 2], vec![3]]);
        assert!(matches!(result, Err(MarkovError::Matrix(_))));
    }

    #[test]
    fn validate_counts_errors() {
        let cfg = SolverConfig::new();
        assert_eq!(validate_counts(&[], &cfg), Err(MarkovError::EmptyMatrix));
        assert_eq!(
            validate_counts(&[vec![0, 1], vec![0]], &cfg),
            Err(MarkovError::NotSquare {
                row: 1,
                len: 1,
                expected: 2
            })
        );
        let big = vec![vec![0u64; 11]; 11];
        assert_eq!(
            validate_counts(&big, &cfg),
            Err(MarkovError::TooManyStates { n: 11, max: 10 })
        );
        let cfg = SolverConfig::new().with_start_state(2);
        assert_eq!(
            validate_counts(&[vec![0, 1], vec![0, 0]], &cfg),
            Err(MarkovError::StartOutOfRange { start: 2, n: 2 })
        );
    }

    #[test]
    fn validate_counts_ok() {
        let cfg = SolverConfig::new();
        assert_eq!(validate_counts(&[vec![0]], &cfg), Ok(1));
    }

    #[test]
    fn absorbing_rows() {
        assert!(is_absorbing_row(&[0, 0, 0]));
        assert!(!is_absorbing_row(&[0, 1, 0]));
    }
}
