//! The [`Matrix`] type and its exact linear algebra.

use std::fmt;
use std::ops::Index;

use absorb_rational::Rational;
use num_bigint::BigInt;
use tracing::trace;

use crate::error::MatrixError;

/// A dense, immutable `rows x cols` matrix of [`Rational`] values.
///
/// All rows have the same length. The column count is stored separately so
/// that matrices with zero rows still carry a width.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Matrix {
    data: Vec<Vec<Rational>>,
    cols: usize,
}

impl Matrix {
    /// Builds a matrix from a list of rows.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::ShapeMismatch`] if the rows differ in length.
    pub fn from_rows(rows: Vec<Vec<Rational>>) -> Result<Self, MatrixError> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(MatrixError::ShapeMismatch {
                reason: format!("row {i} has {} entries, expected {cols}", row.len()),
            });
        }
        Ok(Self { data: rows, cols })
    }

    /// Builds a matrix of integers.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::ShapeMismatch`] if the rows differ in length.
    pub fn from_integers<T>(rows: &[Vec<T>]) -> Result<Self, MatrixError>
    where
        T: Copy + Into<BigInt>,
    {
        Self::from_rows(
            rows.iter()
                .map(|row| row.iter().map(|&v| Rational::from_integer(v)).collect())
                .collect(),
        )
    }

    /// Returns a `rows x cols` matrix of zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![vec![Rational::zero(); cols]; rows],
            cols,
        }
    }

    /// Returns the `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let data = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| if i == j { Rational::one() } else { Rational::zero() })
                    .collect()
            })
            .collect();
        Self { data, cols: n }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.data.len()
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows(), self.cols)
    }

    /// Returns `true` if the matrix has as many rows as columns.
    pub fn is_square(&self) -> bool {
        self.rows() == self.cols
    }

    /// Returns the entry at `(i, j)`, or `None` if out of range.
    pub fn get(&self, i: usize, j: usize) -> Option<&Rational> {
        self.data.get(i)?.get(j)
    }

    /// Returns row `i`, or `None` if out of range.
    pub fn row(&self, i: usize) -> Option<&[Rational]> {
        self.data.get(i).map(Vec::as_slice)
    }

    /// Iterates over the rows in order.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Rational]> {
        self.data.iter().map(Vec::as_slice)
    }

    /// Sum of each row.
    pub fn row_sums(&self) -> Vec<Rational> {
        self.data.iter().map(|row| row.iter().sum()).collect()
    }

    fn require_same_shape(&self, other: &Matrix, op: &str) -> Result<(), MatrixError> {
        if self.shape() != other.shape() {
            return Err(MatrixError::ShapeMismatch {
                reason: format!(
                    "cannot {op} {}x{} and {}x{}",
                    self.rows(),
                    self.cols,
                    other.rows(),
                    other.cols
                ),
            });
        }
        Ok(())
    }

    fn require_square(&self) -> Result<(), MatrixError> {
        if !self.is_square() {
            return Err(MatrixError::NotSquare {
                rows: self.rows(),
                cols: self.cols,
            });
        }
        Ok(())
    }

    fn zip_with(&self, other: &Matrix, f: impl Fn(&Rational, &Rational) -> Rational) -> Matrix {
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| a.iter().zip(b).map(|(x, y)| f(x, y)).collect())
            .collect();
        Matrix {
            data,
            cols: self.cols,
        }
    }

    /// Element-wise sum.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::ShapeMismatch`] if the shapes differ.
    pub fn add(&self, other: &Matrix) -> Result<Matrix, MatrixError> {
        self.require_same_shape(other, "add")?;
        Ok(self.zip_with(other, |a, b| a + b))
    }

    /// Element-wise difference `self - other`.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::ShapeMismatch`] if the shapes differ.
    pub fn subtract(&self, other: &Matrix) -> Result<Matrix, MatrixError> {
        self.require_same_shape(other, "subtract")?;
        Ok(self.zip_with(other, |a, b| a - b))
    }

    /// Multiplies every entry by `scalar`.
    pub fn scalar_multiply(&self, scalar: &Rational) -> Matrix {
        let data = self
            .data
            .iter()
            .map(|row| row.iter().map(|x| x * scalar).collect())
            .collect();
        Matrix {
            data,
            cols: self.cols,
        }
    }

    /// Matrix product `self * other`.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::ShapeMismatch`] if `self.cols() != other.rows()`.
    pub fn matrix_multiply(&self, other: &Matrix) -> Result<Matrix, MatrixError> {
        if self.cols != other.rows() {
            return Err(MatrixError::ShapeMismatch {
                reason: format!(
                    "cannot multiply {}x{} by {}x{}",
                    self.rows(),
                    self.cols,
                    other.rows(),
                    other.cols
                ),
            });
        }
        let data: Vec<Vec<Rational>> = self
            .data
            .iter()
            .map(|row| {
                (0..other.cols)
                    .map(|j| {
                        row.iter()
                            .zip(&other.data)
                            .filter(|(a, _)| !a.is_zero())
                            .map(|(a, b_row)| a * &b_row[j])
                            .sum()
                    })
                    .collect()
            })
            .collect();
        Ok(Matrix {
            data,
            cols: other.cols,
        })
    }

    /// Returns the transpose.
    pub fn transpose(&self) -> Matrix {
        let data = (0..self.cols)
            .map(|j| self.data.iter().map(|row| row[j].clone()).collect())
            .collect();
        Matrix {
            data,
            cols: self.rows(),
        }
    }

    /// Returns the matrix with row `i` and column `j` removed.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::IndexOutOfRange`] if `i` or `j` is outside the
    /// matrix.
    pub fn minor(&self, i: usize, j: usize) -> Result<Matrix, MatrixError> {
        if i >= self.rows() || j >= self.cols {
            return Err(self.out_of_range(i, j));
        }
        Ok(self.minor_unchecked(i, j))
    }

    fn minor_unchecked(&self, i: usize, j: usize) -> Matrix {
        let data = self
            .data
            .iter()
            .enumerate()
            .filter(|&(x, _)| x != i)
            .map(|(_, row)| {
                row.iter()
                    .enumerate()
                    .filter(|&(y, _)| y != j)
                    .map(|(_, v)| v.clone())
                    .collect()
            })
            .collect();
        Matrix {
            data,
            cols: self.cols - 1,
        }
    }

    /// Returns the sub-matrix at the given rows and columns, in the given
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::IndexOutOfRange`] if any index is outside the
    /// matrix.
    pub fn select(&self, row_indices: &[usize], col_indices: &[usize]) -> Result<Matrix, MatrixError> {
        if let Some(&i) = row_indices.iter().find(|&&i| i >= self.rows()) {
            return Err(self.out_of_range(i, 0));
        }
        if let Some(&j) = col_indices.iter().find(|&&j| j >= self.cols) {
            return Err(self.out_of_range(0, j));
        }
        let data = row_indices
            .iter()
            .map(|&i| col_indices.iter().map(|&j| self.data[i][j].clone()).collect())
            .collect();
        Ok(Matrix {
            data,
            cols: col_indices.len(),
        })
    }

    fn out_of_range(&self, row: usize, col: usize) -> MatrixError {
        MatrixError::IndexOutOfRange {
            row,
            col,
            rows: self.rows(),
            cols: self.cols,
        }
    }

    /// Determinant by cofactor expansion along the first row.
    ///
    /// The empty matrix has determinant one.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::NotSquare`] for a non-square matrix.
    pub fn determinant(&self) -> Result<Rational, MatrixError> {
        self.require_square()?;
        Ok(self.determinant_unchecked())
    }

    fn determinant_unchecked(&self) -> Rational {
        let d = &self.data;
        match self.rows() {
            0 => Rational::one(),
            1 => d[0][0].clone(),
            2 => &d[0][0] * &d[1][1] - &d[0][1] * &d[1][0],
            _ => d[0]
                .iter()
                .enumerate()
                .filter(|(_, a)| !a.is_zero())
                .map(|(j, a)| {
                    let term = a * &self.minor_unchecked(0, j).determinant_unchecked();
                    if j % 2 == 0 { term } else { -term }
                })
                .sum(),
        }
    }

    /// Matrix of signed minors: entry `(i, j)` is `(-1)^(i+j) * det(minor(i, j))`.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::NotSquare`] for a non-square matrix.
    pub fn cofactor(&self) -> Result<Matrix, MatrixError> {
        self.require_square()?;
        let n = self.rows();
        let data = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| {
                        let m = self.minor_unchecked(i, j).determinant_unchecked();
                        if (i + j) % 2 == 0 { m } else { -m }
                    })
                    .collect()
            })
            .collect();
        Ok(Matrix { data, cols: n })
    }

    /// Transpose of the cofactor matrix.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::NotSquare`] for a non-square matrix.
    pub fn adjoint(&self) -> Result<Matrix, MatrixError> {
        Ok(self.cofactor()?.transpose())
    }

    /// Exact inverse, `adjoint() * (1 / determinant())`.
    ///
    /// 1x1 and 2x2 matrices use closed forms that agree with the general
    /// formula.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::NotSquare`] for a non-square matrix and
    /// [`MatrixError::Singular`] when the determinant is zero.
    pub fn inverse(&self) -> Result<Matrix, MatrixError> {
        let det = self.determinant()?;
        let scale = det.invert().map_err(|_| MatrixError::Singular)?;
        trace!(n = self.rows(), det = %det, "inverting matrix");

        let d = &self.data;
        match self.rows() {
            1 => Ok(Matrix {
                data: vec![vec![scale]],
                cols: 1,
            }),
            2 => {
                let adj = Matrix {
                    data: vec![
                        vec![d[1][1].clone(), -&d[0][1]],
                        vec![-&d[1][0], d[0][0].clone()],
                    ],
                    cols: 2,
                };
                Ok(adj.scalar_multiply(&scale))
            }
            _ => Ok(self.adjoint()?.scalar_multiply(&scale)),
        }
    }

    /// Raises the matrix to `exponent`, which must be -1, 0 or 1.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::UnsupportedPower`] for any other exponent,
    /// [`MatrixError::NotSquare`] when `exponent` is 0 or -1 on a non-square
    /// matrix, and [`MatrixError::Singular`] from the inverse.
    pub fn power(&self, exponent: i32) -> Result<Matrix, MatrixError> {
        match exponent {
            0 => {
                self.require_square()?;
                Ok(Matrix::identity(self.rows()))
            }
            1 => Ok(self.clone()),
            -1 => self.inverse(),
            _ => Err(MatrixError::UnsupportedPower { exponent }),
        }
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = Rational;

    /// # Panics
    ///
    /// Panics if the index is out of range.
    fn index(&self, (i, j): (usize, usize)) -> &Rational {
        &self.data[i][j]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.data.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "[")?;
            for (j, v) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{v}")?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}
