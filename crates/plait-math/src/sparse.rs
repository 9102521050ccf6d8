//! Sparse triplet assembly.
//!
//! Force engines emit `(row, col, value)` triplets at caller-supplied
//! offsets so that several strands can share one global system. The
//! external solver consumes them through `faer` in compressed-column form.

use faer::sparse::{SparseColMat, Triplet as FaerTriplet};
use nalgebra::DMatrix;
use plait_types::{PlaitError, PlaitResult, Scalar};
use serde::{Deserialize, Serialize};

/// A single sparse entry `(row, col, value)`.
pub type Triplet = (usize, usize, Scalar);

/// Compressed Sparse Row (CSR) matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsrMatrix {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
    /// Row pointer array (length = rows + 1).
    /// `row_ptr[i]..row_ptr[i+1]` are the indices into `col_idx` and `values`
    /// for non-zeros in row `i`.
    pub row_ptr: Vec<usize>,
    /// Column indices of non-zero entries.
    pub col_idx: Vec<usize>,
    /// Non-zero values.
    pub values: Vec<Scalar>,
}

impl CsrMatrix {
    /// Creates an empty CSR matrix with the given dimensions.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            row_ptr: vec![0; rows + 1],
            col_idx: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Returns the number of stored entries.
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Creates a CSR matrix from triplets (row, col, value).
    ///
    /// Duplicate entries are summed.
    pub fn from_triplets(rows: usize, cols: usize, triplets: &[Triplet]) -> Self {
        let mut row_counts = vec![0usize; rows];
        for &(r, _, _) in triplets {
            row_counts[r] += 1;
        }

        let mut row_ptr = vec![0usize; rows + 1];
        for i in 0..rows {
            row_ptr[i + 1] = row_ptr[i] + row_counts[i];
        }

        let nnz = row_ptr[rows];
        let mut entries: Vec<(usize, Scalar)> = vec![(0, 0.0); nnz];
        let mut cursor = row_ptr[..rows].to_vec();
        for &(r, c, v) in triplets {
            entries[cursor[r]] = (c, v);
            cursor[r] += 1;
        }

        let mut merged_ptr = vec![0usize; rows + 1];
        let mut col_idx = Vec::with_capacity(nnz);
        let mut values = Vec::with_capacity(nnz);
        for i in 0..rows {
            let row = &mut entries[row_ptr[i]..row_ptr[i + 1]];
            row.sort_by_key(|&(c, _)| c);
            for &(c, v) in row.iter() {
                if col_idx.len() > merged_ptr[i] && col_idx.last() == Some(&c) {
                    if let Some(last) = values.last_mut() {
                        *last += v;
                    }
                } else {
                    col_idx.push(c);
                    values.push(v);
                }
            }
            merged_ptr[i + 1] = col_idx.len();
        }

        Self {
            rows,
            cols,
            row_ptr: merged_ptr,
            col_idx,
            values,
        }
    }

    /// Computes `y = A x`.
    pub fn mul_vec(&self, x: &[Scalar]) -> Vec<Scalar> {
        let mut y = vec![0.0; self.rows];
        for (row, out) in y.iter_mut().enumerate() {
            for idx in self.row_ptr[row]..self.row_ptr[row + 1] {
                *out += self.values[idx] * x[self.col_idx[idx]];
            }
        }
        y
    }

    /// Expands into a dense matrix. Intended for small systems and tests.
    pub fn to_dense(&self) -> DMatrix<Scalar> {
        let mut dense = DMatrix::zeros(self.rows, self.cols);
        for row in 0..self.rows {
            for idx in self.row_ptr[row]..self.row_ptr[row + 1] {
                dense[(row, self.col_idx[idx])] += self.values[idx];
            }
        }
        dense
    }

    /// Converts to `faer`'s compressed-column matrix.
    pub fn to_faer(&self) -> PlaitResult<SparseColMat<usize, Scalar>> {
        let mut triplets: Vec<FaerTriplet<usize, usize, Scalar>> = Vec::with_capacity(self.nnz());
        for row in 0..self.rows {
            for idx in self.row_ptr[row]..self.row_ptr[row + 1] {
                triplets.push(FaerTriplet {
                    row,
                    col: self.col_idx[idx],
                    val: self.values[idx],
                });
            }
        }

        SparseColMat::try_new_from_triplets(self.rows, self.cols, &triplets)
            .map_err(|e| PlaitError::Assembly(format!("Failed to construct faer CSC matrix: {e:?}")))
    }
}
