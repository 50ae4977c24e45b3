//! Dense matrices over exact rationals.
//!
//! [`Matrix`] is an immutable grid of [`Rational`] values. Every operation
//! returns a new matrix; shape errors are reported as [`MatrixError`] rather
//! than panicking.
//!
//! Determinants use recursive cofactor (Laplace) expansion, and inverses
//! are the adjugate scaled by the reciprocal determinant. Both are exact and
//! factorial in the dimension, so they are meant for small matrices only
//! (roughly ten rows or fewer).
//!
//! # Quick start
//!
//! ```rust
//! use absorb_matrix::Matrix;
//!
//! let m = Matrix::from_integers(&[vec![2, 1], vec![7, 4]]).unwrap();
//! let inv = m.inverse().unwrap();
//!
//! assert_eq!(m.matrix_multiply(&inv).unwrap(), Matrix::identity(2));
//! ```

pub mod error;
pub mod matrix;

pub use absorb_rational::Rational;
pub use error::MatrixError;
pub use matrix::Matrix;
