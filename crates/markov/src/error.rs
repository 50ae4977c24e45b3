//! Error types for the absorb-markov crate.

use absorb_matrix::MatrixError;
use absorb_rational::RationalError;

/// Error type for all fallible operations in the absorb-markov crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarkovError {
    /// Returned when the count matrix has no rows.
    #[error("count matrix is empty")]
    EmptyMatrix,

    /// Returned when a row's length differs from the number of rows.
    #[error("count matrix is not square: row {row} has {len} entries, expected {expected}")]
    NotSquare {
        /// Index of the offending row.
        row: usize,
        /// Its length.
        len: usize,
        /// Number of rows in the matrix.
        expected: usize,
    },

    /// Returned when the chain has more states than the configured maximum.
    #[error("too many states: got {n}, maximum is {max}")]
    TooManyStates {
        /// Number of states in the input.
        n: usize,
        /// Configured maximum.
        max: usize,
    },

    /// Returned when the start state is not a row of the matrix.
    #[error("start state {start} out of range for {n} states")]
    StartOutOfRange {
        /// Configured start state.
        start: usize,
        /// Number of states in the input.
        n: usize,
    },

    /// Returned when a configuration value is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when `I - Q` is singular, i.e. some transient state cannot
    /// reach any absorbing state.
    #[error("some transient state has no path to an absorbing state")]
    NoAbsorbingPath,

    /// Returned when a result value does not fit the requested integer type.
    #[error("value {value} does not fit in a 64-bit integer")]
    Overflow {
        /// The value, in decimal.
        value: String,
    },

    /// A matrix operation failed.
    #[error(transparent)]
    Matrix(MatrixError),

    /// A rational operation failed.
    #[error(transparent)]
    Rational(#[from] RationalError),
}

impl From<MatrixError> for MarkovError {
    fn from(e: MatrixError) -> Self {
        match e {
            MatrixError::Singular => MarkovError::NoAbsorbingPath,
            other => MarkovError::Matrix(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_empty_matrix() {
        assert_eq!(MarkovError::EmptyMatrix.to_string(), "count matrix is empty");
    }

    #[test]
    fn error_not_square() {
        let e = MarkovError::NotSquare {
            row: 2,
            len: 4,
            expected: 3,
        };
        assert_eq!(
            e.to_string(),
            "count matrix is not square: row 2 has 4 entries, expected 3"
        );
    }

    #[test]
    fn error_too_many_states() {
        let e = MarkovError::TooManyStates { n: 12, max: 10 };
        assert_eq!(e.to_string(), "too many states: got 12, maximum is 10");
    }

    #[test]
    fn error_start_out_of_range() {
        let e = MarkovError::StartOutOfRange { start: 5, n: 3 };
        assert_eq!(e.to_string(), "start state 5 out of range for 3 states");
    }

    #[test]
    fn error_invalid_config() {
        let e = MarkovError::InvalidConfig {
            reason: "bad".to_string(),
        };
        assert_eq!(e.to_string(), "invalid configuration: bad");
    }

    #[test]
    fn error_no_absorbing_path() {
        assert_eq!(
            MarkovError::NoAbsorbingPath.to_string(),
            "some transient state has no path to an absorbing state"
        );
    }

    #[test]
    fn error_overflow() {
        let e = MarkovError::Overflow {
            value: "99999999999999999999".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "value 99999999999999999999 does not fit in a 64-bit integer"
        );
    }

    #[test]
    fn singular_maps_to_no_absorbing_path() {
        assert_eq!(
            MarkovError::from(MatrixError::Singular),
            MarkovError::NoAbsorbingPath
        );
        assert_eq!(
            MarkovError::from(MatrixError::NotSquare { rows: 1, cols: 2 }),
            MarkovError::Matrix(MatrixError::NotSquare { rows: 1, cols: 2 })
        );
    }

    #[test]
    fn rational_errors_are_transparent() {
        let e = MarkovError::from(RationalError::DivisionByZero);
        assert_eq!(e.to_string(), "division by zero");
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<MarkovError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<MarkovError>();
    }
}
