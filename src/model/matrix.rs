//! Dense row-major matrix used by the simulator.
//!
//! Influence graphs are small (tens of concepts), so a flat `Vec<f64>` with
//! plain triple loops is all the linear algebra needed. No pivoting, no
//! stability correction.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// `rows × cols` matrix stored row-major.
///
/// Serialized as nested rows (`[[0, 0.5], [0, 0]]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<Vec<f64>>", try_from = "Vec<Vec<f64>>")]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self { rows, cols, data: vec![0.0; rows * cols] }
    }

    pub fn square(n: usize) -> Self {
        Self::zeros(n, n)
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Self::square(n);
        for i in 0..n {
            m.set(i, i, 1.0);
        }
        m
    }

    /// Build from nested rows. All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(Error::Shape(format!(
                    "row {i} has {} columns, expected {cols}",
                    row.len()
                )));
            }
            data.extend_from_slice(row);
        }
        Ok(Self { rows: rows.len(), cols, data })
    }

    pub fn rows(&self) -> usize { self.rows }
    pub fn cols(&self) -> usize { self.cols }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.cols + j]
    }

    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        self.data[i * self.cols + j] = value;
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        (0..self.rows).map(move |i| self.row(i))
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.iter_rows().map(<[f64]>::to_vec).collect()
    }

    /// Standard dense product `self · rhs`.
    ///
    /// # Panics
    ///
    /// If `self.cols() != rhs.rows()`.
    pub fn matmul(&self, rhs: &Matrix) -> Matrix {
        assert_eq!(self.cols, rhs.rows, "matrix product shape mismatch");
        let mut out = Matrix::zeros(self.rows, rhs.cols);
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a = self.data[i * self.cols + k];
                for j in 0..rhs.cols {
                    out.data[i * rhs.cols + j] += a * rhs.data[k * rhs.cols + j];
                }
            }
        }
        out
    }

    /// Row vector times matrix: `v · self`.
    ///
    /// # Panics
    ///
    /// If `v.len() != self.rows()`.
    pub fn left_mul(&self, v: &[f64]) -> Vec<f64> {
        assert_eq!(v.len(), self.rows, "vector length does not match matrix rows");
        let mut out = vec![0.0; self.cols];
        for (k, &vk) in v.iter().enumerate() {
            for (j, o) in out.iter_mut().enumerate() {
                *o += vk * self.data[k * self.cols + j];
            }
        }
        out
    }
}

impl From<Matrix> for Vec<Vec<f64>> {
    fn from(m: Matrix) -> Self {
        m.to_rows()
    }
}

impl TryFrom<Vec<Vec<f64>>> for Matrix {
    type Error = Error;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self> {
        Matrix::from_rows(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn m(rows: &[&[f64]]) -> Matrix {
        Matrix::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    #[test]
    fn test_product() {
        let a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let b = m(&[&[0.0, 1.0], &[1.0, 0.0]]);
        assert_eq!(a.matmul(&b), m(&[&[2.0, 1.0], &[4.0, 3.0]]));
        assert_eq!(a.matmul(&Matrix::identity(2)), a);
    }

    #[test]
    fn test_nilpotent_square() {
        let a = m(&[&[0.0, 0.5], &[0.0, 0.0]]);
        assert_eq!(a.matmul(&a), Matrix::square(2));
    }

    #[test]
    fn test_row_vector_product() {
        let a = m(&[&[0.0, 0.5], &[0.0, 0.0]]);
        assert_eq!(a.left_mul(&[1.0, -1.0]), vec![0.0, 0.5]);

        let b = m(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
        assert_eq!(b.left_mul(&[1.0, 1.0]), vec![5.0, 7.0, 9.0]);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(err, Error::Shape(_)));
    }

    #[test]
    fn test_serializes_as_nested_rows() {
        let a = m(&[&[0.0, 0.5], &[0.0, 0.0]]);
        let json = serde_json::to_string(&a).unwrap();
        assert_eq!(json, "[[0.0,0.5],[0.0,0.0]]");
        let back: Matrix = serde_json::from_str(&json).unwrap();
        assert_eq!(back, a);
    }

    #[test]
    fn test_empty_matrix() {
        let e = Matrix::square(0);
        assert_eq!(e.iter_rows().count(), 0);
        assert_eq!(e.matmul(&e), e);
        assert!(e.left_mul(&[]).is_empty());
    }
}
