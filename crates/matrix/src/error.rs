//! Error types for the absorb-matrix crate.

/// Error type for all fallible operations in the absorb-matrix crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatrixError {
    /// Returned when operand shapes are incompatible, or rows are ragged.
    #[error("shape mismatch: {reason}")]
    ShapeMismatch {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a square-only operation is applied to a non-square matrix.
    #[error("matrix is not square: {rows}x{cols}")]
    NotSquare {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// Returned when a row or column index lies outside the matrix.
    #[error("index ({row}, {col}) out of range for {rows}x{cols} matrix")]
    IndexOutOfRange {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// Returned when inverting a matrix whose determinant is exactly zero.
    #[error("matrix is singular")]
    Singular,

    /// Returned for exponents other than -1, 0 and 1.
    #[error("unsupported matrix power: {exponent}")]
    UnsupportedPower {
        /// The rejected exponent.
        exponent: i32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_shape_mismatch() {
        let e = MatrixError::ShapeMismatch {
            reason: "cannot add 2x2 and 3x3".to_string(),
        };
        assert_eq!(e.to_string(), "shape mismatch: cannot add 2x2 and 3x3");
    }

    #[test]
    fn error_not_square() {
        let e = MatrixError::NotSquare { rows: 2, cols: 3 };
        assert_eq!(e.to_string(), "matrix is not square: 2x3");
    }

    #[test]
    fn error_index_out_of_range() {
        let e = MatrixError::IndexOutOfRange {
            row: 4,
            col: 0,
            rows: 3,
            cols: 3,
        };
        assert_eq!(e.to_string(), "index (4, 0) out of range for 3x3 matrix");
    }

    #[test]
    fn error_singular() {
        assert_eq!(MatrixError::Singular.to_string(), "matrix is singular");
    }

    #[test]
    fn error_unsupported_power() {
        let e = MatrixError::UnsupportedPower { exponent: 2 };
        assert_eq!(e.to_string(), "unsupported matrix power: 2");
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<MatrixError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<MatrixError>();
    }
}
