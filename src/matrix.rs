//! Immutable dense matrices.
//!
//! `Matrix` is the value type everything else in this crate is built on. It is
//! a rectangular grid of `f64` stored contiguously in row-major order, and it
//! is never mutated: every operation returns a freshly built `Matrix`, so a
//! value handed to a layer or a caller can be shared freely.
//!
//! Shape rules:
//! - construction validates rectangularity and rejects empty grids
//!   ([`Error::Shape`])
//! - elementwise combination requires identical shapes ([`Error::SizeMismatch`])
//! - `dot` requires matching inner dimensions ([`Error::Dimension`])

use std::fmt;

use rand::Rng;

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    /// Row-major, `rows * cols` scalars.
    data: Vec<f64>,
}

impl Matrix {
    /// Build a matrix from explicit row data.
    ///
    /// Fails with [`Error::Shape`] if `rows` is empty or any row's length
    /// differs from the first row's.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        if rows.is_empty() {
            return Err(Error::Shape("matrix must have at least one row".to_owned()));
        }

        let cols = rows[0].len();
        if cols == 0 {
            return Err(Error::Shape(
                "matrix must have at least one column".to_owned(),
            ));
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(Error::Shape(format!(
                    "row {i} has len {}, expected {cols}",
                    row.len()
                )));
            }
        }

        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            data.extend_from_slice(row);
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Build a matrix from a flat row-major buffer with the given column count.
    pub fn from_flat(data: Vec<f64>, cols: usize) -> Result<Self> {
        if cols == 0 {
            return Err(Error::Shape(
                "matrix must have at least one column".to_owned(),
            ));
        }
        if data.is_empty() || data.len() % cols != 0 {
            return Err(Error::Shape(format!(
                "buffer length {} is not a positive multiple of cols {cols}",
                data.len()
            )));
        }

        let rows = data.len() / cols;
        Ok(Self { rows, cols, data })
    }

    /// Build a `rows x cols` matrix by calling `f(row, col)` for every cell.
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> f64,
    {
        if rows == 0 || cols == 0 {
            return Err(Error::Shape(format!(
                "matrix dimensions must be > 0, got {rows}x{cols}"
            )));
        }

        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Ok(Self { rows, cols, data })
    }

    /// Build a matrix where each cell holds its own column index.
    ///
    /// This is the default generator of the dimension-based constructor.
    pub fn column_indexed(rows: usize, cols: usize) -> Result<Self> {
        Self::from_fn(rows, cols, |_, c| c as f64)
    }

    /// Build a matrix with every cell set to `value`.
    pub fn filled(rows: usize, cols: usize, value: f64) -> Result<Self> {
        Self::from_fn(rows, cols, |_, _| value)
    }

    /// Build a matrix with cells drawn uniformly from `[-1, 1)`.
    ///
    /// Draws from the process-wide rng; use [`Matrix::random_with_rng`] for a
    /// deterministic source.
    pub fn random(rows: usize, cols: usize) -> Result<Self> {
        Self::random_with_rng(rows, cols, &mut rand::thread_rng())
    }

    /// Build a matrix with cells drawn uniformly from `[-1, 1)` using `rng`.
    pub fn random_with_rng<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Result<Self> {
        Self::from_fn(rows, cols, |_, _| rng.gen_range(-1.0..1.0))
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the cell at `(row, col)`.
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        self.data[row * self.cols + col]
    }

    /// Flat row-major view of the cells.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Defensive copy of the grid as one `Vec` per row.
    ///
    /// Mutating the returned rows never affects this matrix.
    pub fn data(&self) -> Vec<Vec<f64>> {
        self.data.chunks(self.cols).map(<[f64]>::to_vec).collect()
    }

    #[inline]
    pub fn is_same_size(&self, other: &Matrix) -> bool {
        self.rows == other.rows && self.cols == other.cols
    }

    /// Returns the `cols x rows` transpose.
    pub fn transpose(&self) -> Matrix {
        let mut data = Vec::with_capacity(self.data.len());
        for c in 0..self.cols {
            for r in 0..self.rows {
                data.push(self.data[r * self.cols + c]);
            }
        }
        Matrix {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }

    /// Sum of all cells.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Apply `f` to every cell, preserving shape.
    pub fn map<F>(&self, mut f: F) -> Matrix
    where
        F: FnMut(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&x| f(x)).collect(),
        }
    }

    /// Combine two equally shaped matrices cell by cell.
    ///
    /// Fails with [`Error::SizeMismatch`] if the shapes differ.
    pub fn zip<F>(&self, other: &Matrix, mut f: F) -> Result<Matrix>
    where
        F: FnMut(f64, f64) -> f64,
    {
        if !self.is_same_size(other) {
            return Err(Error::SizeMismatch(format!(
                "{}x{} does not match {}x{}",
                self.rows, self.cols, other.rows, other.cols
            )));
        }

        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }

    /// Elementwise sum of two equally shaped matrices.
    pub fn add(&self, other: &Matrix) -> Result<Matrix> {
        self.zip(other, |a, b| a + b)
    }

    /// Elementwise difference of two equally shaped matrices.
    pub fn subtract(&self, other: &Matrix) -> Result<Matrix> {
        self.zip(other, |a, b| a - b)
    }

    /// Elementwise (Hadamard) product of two equally shaped matrices.
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix> {
        self.zip(other, |a, b| a * b)
    }

    /// Add `x` to every cell.
    pub fn add_scalar(&self, x: f64) -> Matrix {
        self.map(|v| v + x)
    }

    /// Subtract `x` from every cell.
    pub fn subtract_scalar(&self, x: f64) -> Matrix {
        self.map(|v| v - x)
    }

    /// Multiply every cell by `x`.
    pub fn multiply_scalar(&self, x: f64) -> Matrix {
        self.map(|v| v * x)
    }

    /// Standard matrix product.
    ///
    /// Fails with [`Error::Dimension`] unless `self.cols == other.rows`. The
    /// result has shape `self.rows x other.cols` with
    /// `result[i][j] = sum_k self[i][k] * other[k][j]`.
    pub fn dot(&self, other: &Matrix) -> Result<Matrix> {
        if self.cols != other.rows {
            return Err(Error::Dimension(format!(
                "left cols {} do not match right rows {}",
                self.cols, other.rows
            )));
        }

        let mut data = vec![0.0; self.rows * other.cols];
        for i in 0..self.rows {
            for j in 0..other.cols {
                let mut acc = 0.0_f64;
                for k in 0..self.cols {
                    acc = self.data[i * self.cols + k].mul_add(other.data[k * other.cols + j], acc);
                }
                data[i * other.cols + j] = acc;
            }
        }

        Ok(Matrix {
            rows: self.rows,
            cols: other.cols,
            data,
        })
    }

    /// A same-shaped matrix with fresh cells drawn uniformly from `[-1, 1)`.
    pub fn randomize(&self) -> Matrix {
        self.randomize_with_rng(&mut rand::thread_rng())
    }

    /// A same-shaped matrix with fresh uniform `[-1, 1)` cells drawn from `rng`.
    pub fn randomize_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Matrix {
        self.map(|_| rng.gen_range(-1.0..1.0))
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Matrix ({} x {})", self.rows, self.cols)?;
        for row in self.data.chunks(self.cols) {
            writeln!(f, "{row:?}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn assert_close(a: &Matrix, b: &Matrix, tol: f64) {
        assert!(a.is_same_size(b), "{}x{} vs {}x{}", a.rows(), a.cols(), b.rows(), b.cols());
        for (x, y) in a.as_slice().iter().zip(b.as_slice()) {
            assert!((x - y).abs() <= tol, "{x} != {y} (tol {tol})");
        }
    }

    #[test]
    fn construction_rejects_ragged_and_empty_data() {
        assert!(Matrix::from_rows(&[]).is_err());
        assert!(Matrix::from_rows(&[vec![]]).is_err());
        assert!(Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]).is_err());
        assert!(Matrix::from_flat(vec![1.0, 2.0, 3.0], 2).is_err());
        assert!(Matrix::from_fn(0, 3, |_, _| 0.0).is_err());
    }

    #[test]
    fn construction_roundtrips_through_data() {
        let a = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let copy = Matrix::from_rows(&a.data()).unwrap();
        assert_eq!(a, copy);

        // data() is a defensive copy.
        let mut grid = a.data();
        grid[0][0] = 99.0;
        assert_eq!(a.get(0, 0), 1.0);
    }

    #[test]
    fn column_indexed_fills_cells_with_their_column() {
        let a = Matrix::column_indexed(2, 3).unwrap();
        assert_eq!(a.data(), vec![vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 2.0]]);
    }

    #[test]
    fn transpose_is_an_involution() {
        let a = Matrix::from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        let t = a.transpose();
        assert_eq!(t.rows(), 3);
        assert_eq!(t.cols(), 2);
        assert_eq!(t.get(2, 1), 6.0);
        assert_eq!(a.transpose().transpose(), a);
    }

    #[test]
    fn zip_requires_identical_shapes() {
        let a = Matrix::filled(2, 2, 1.0).unwrap();
        let b = Matrix::filled(2, 3, 1.0).unwrap();
        assert!(matches!(a.zip(&b, |x, y| x + y), Err(Error::SizeMismatch(_))));
        assert!(a.zip(&a, |x, y| x + y).is_ok());
    }

    #[test]
    fn add_then_subtract_restores_the_original() {
        let a = Matrix::from_rows(&[vec![0.1, -2.5], vec![3.75, 0.0]]).unwrap();
        let b = Matrix::from_rows(&[vec![1.3, 0.2], vec![-0.7, 4.1]]).unwrap();
        let roundtrip = a.add(&b).unwrap().subtract(&b).unwrap();
        assert_close(&a, &roundtrip, 1e-12);
    }

    #[test]
    fn scalar_ops_apply_to_every_cell() {
        let a = Matrix::from_rows(&[vec![1.0, 2.0]]).unwrap();
        assert_eq!(a.add_scalar(1.0).data(), vec![vec![2.0, 3.0]]);
        assert_eq!(a.subtract_scalar(1.0).data(), vec![vec![0.0, 1.0]]);
        assert_eq!(a.multiply_scalar(2.0).data(), vec![vec![2.0, 4.0]]);
    }

    #[test]
    fn dot_matches_the_worked_example() {
        let a = Matrix::from_rows(&[vec![1.0, 2.0, 1.0], vec![0.0, 1.0, 1.0]]).unwrap();
        let b = Matrix::from_rows(&[vec![2.0, 5.0], vec![6.0, 7.0], vec![1.0, 1.0]]).unwrap();
        let c = a.dot(&b).unwrap();
        assert_eq!(c.data(), vec![vec![15.0, 20.0], vec![7.0, 8.0]]);
    }

    #[test]
    fn dot_requires_matching_inner_dimensions() {
        let a = Matrix::filled(2, 3, 1.0).unwrap();
        let b = Matrix::filled(2, 2, 1.0).unwrap();
        assert!(matches!(a.dot(&b), Err(Error::Dimension(_))));
    }

    #[test]
    fn sum_adds_every_cell() {
        let a = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, -1.5]]).unwrap();
        assert!((a.sum() - 4.5).abs() < 1e-12);
    }

    #[test]
    fn randomize_stays_in_range_and_keeps_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let a = Matrix::random_with_rng(4, 5, &mut rng).unwrap();
        let b = a.randomize_with_rng(&mut rng);
        assert!(a.is_same_size(&b));
        for &v in b.as_slice() {
            assert!((-1.0..1.0).contains(&v), "{v} outside [-1, 1)");
        }
    }
}
