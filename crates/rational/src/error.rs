//! Error types for the absorb-rational crate.

/// Error type for all fallible operations in the absorb-rational crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RationalError {
    /// Returned when a denominator is zero or a zero value is inverted.
    #[error("division by zero")]
    DivisionByZero,

    /// Returned when an exact integer was requested from a proper fraction.
    #[error("value {value} is not an integer")]
    NotIntegral {
        /// The offending value, rendered as `n/d`.
        value: String,
    },

    /// Returned when a string cannot be parsed as `n` or `n/d`.
    #[error("cannot parse {input:?} as a rational number")]
    Parse {
        /// The rejected input.
        input: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_division_by_zero() {
        assert_eq!(RationalError::DivisionByZero.to_string(), "division by zero");
    }

    #[test]
    fn error_not_integral() {
        let e = RationalError::NotIntegral {
            value: "3/4".to_string(),
        };
        assert_eq!(e.to_string(), "value 3/4 is not an integer");
    }

    #[test]
    fn error_parse() {
        let e = RationalError::Parse {
            input: "1/x".to_string(),
        };
        assert_eq!(e.to_string(), "cannot parse \"1/x\" as a rational number");
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<RationalError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<RationalError>();
    }
}
