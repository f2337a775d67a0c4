//! Compressed sparse row matrices.

use gsp_tensor::{Tensor1, Tensor2};
use num_traits::{One, Zero};

use crate::{error::TensorOpsError, kernels::matmul_kernel};

/// A sparse matrix in compressed sparse row (CSR) format.
///
/// Column indices are strictly increasing within each row. Entries that are
/// stored explicitly stay stored even when their value is zero.
#[derive(Debug, Clone, PartialEq)]
pub struct CsrMatrix<T> {
    row_ptrs: Vec<usize>,
    col_indices: Vec<usize>,
    values: Vec<T>,
    shape: [usize; 2],
}

impl<T> CsrMatrix<T> {
    /// Create a new CSR matrix from its components.
    ///
    /// # Arguments
    ///
    /// * `row_ptrs` - Row pointers (length: nrows + 1)
    /// * `col_indices` - Column index of each stored entry
    /// * `values` - Value of each stored entry
    /// * `shape` - Matrix shape [nrows, ncols]
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `row_ptrs` length != nrows + 1, or it is not non-decreasing from 0 to nnz
    /// - `col_indices` and `values` have different lengths
    /// - a column index is out of bounds or the indices of a row are not strictly increasing
    pub fn new(
        row_ptrs: Vec<usize>,
        col_indices: Vec<usize>,
        values: Vec<T>,
        shape: [usize; 2],
    ) -> Result<Self, TensorOpsError> {
        let [nrows, ncols] = shape;

        if row_ptrs.len() != nrows + 1 {
            return Err(TensorOpsError::ShapeMismatch(
                vec![nrows + 1],
                vec![row_ptrs.len()],
            ));
        }

        if col_indices.len() != values.len() {
            return Err(TensorOpsError::ShapeMismatch(
                vec![values.len()],
                vec![col_indices.len()],
            ));
        }

        let nnz = values.len();
        if row_ptrs[0] != 0 || row_ptrs[nrows] != nnz {
            return Err(TensorOpsError::InvalidArgument(format!(
                "row pointers must run from 0 to {nnz}, got {} to {}",
                row_ptrs[0], row_ptrs[nrows]
            )));
        }

        for row in row_ptrs.windows(2) {
            let (start, end) = (row[0], row[1]);
            if start > end || end > nnz {
                return Err(TensorOpsError::InvalidArgument(format!(
                    "row pointers must be non-decreasing up to {nnz}, got {start} before {end}"
                )));
            }
            let cols = &col_indices[start..end];
            if let Some(&c) = cols.iter().find(|&&c| c >= ncols) {
                return Err(TensorOpsError::DimOutOfBounds(c, ncols));
            }
            if cols.windows(2).any(|pair| pair[0] >= pair[1]) {
                return Err(TensorOpsError::InvalidArgument(
                    "column indices must be strictly increasing within a row".to_string(),
                ));
            }
        }

        Ok(Self {
            row_ptrs,
            col_indices,
            values,
            shape,
        })
    }

    /// Create a square matrix with `diagonal` on its main diagonal.
    ///
    /// Every diagonal entry is stored, including zeros.
    pub fn from_diagonal(diagonal: &[T]) -> Self
    where
        T: Clone,
    {
        let n = diagonal.len();
        Self {
            row_ptrs: (0..=n).collect(),
            col_indices: (0..n).collect(),
            values: diagonal.to_vec(),
            shape: [n, n],
        }
    }

    /// Create the `n × n` identity matrix.
    pub fn identity(n: usize) -> Self
    where
        T: One + Clone,
    {
        Self::from_diagonal(&vec![T::one(); n])
    }

    /// The shape of the matrix as [nrows, ncols].
    #[inline]
    pub fn shape(&self) -> [usize; 2] {
        self.shape
    }

    /// Number of stored entries.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Row pointers (length nrows + 1).
    pub fn row_ptrs(&self) -> &[usize] {
        &self.row_ptrs
    }

    /// Column index of each stored entry.
    pub fn col_indices(&self) -> &[usize] {
        &self.col_indices
    }

    /// Value of each stored entry.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Get the stored entry at `(row, col)`, or `None` if it is not stored.
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row >= self.shape[0] {
            return None;
        }
        let (start, end) = (self.row_ptrs[row], self.row_ptrs[row + 1]);
        self.col_indices[start..end]
            .binary_search(&col)
            .ok()
            .map(|pos| &self.values[start + pos])
    }

    /// Extract the main diagonal as a dense vector.
    ///
    /// The result has length `min(nrows, ncols)`; entries that are not stored
    /// are returned as zeros.
    pub fn diagonal(&self) -> Tensor1<T>
    where
        T: Zero + Clone,
    {
        let n = self.shape[0].min(self.shape[1]);
        Tensor1::from_shape_fn([n], |[i]| self.get(i, i).cloned().unwrap_or_else(T::zero))
    }

    /// Multiply the matrix with a dense vector.
    ///
    /// # Errors
    ///
    /// If the length of `x` differs from the number of columns, an error is returned.
    pub fn matvec(&self, x: &Tensor1<T>) -> Result<Tensor1<T>, TensorOpsError>
    where
        T: Zero + Copy + std::ops::Add<Output = T> + std::ops::Mul<Output = T>,
    {
        let [nrows, ncols] = self.shape;
        if x.shape[0] != ncols {
            return Err(TensorOpsError::ShapeMismatch(vec![ncols], x.shape.to_vec()));
        }

        let xs = x.as_slice();
        let data = self
            .row_ptrs
            .windows(2)
            .map(|row| {
                let (start, end) = (row[0], row[1]);
                self.col_indices[start..end]
                    .iter()
                    .zip(self.values[start..end].iter())
                    .fold(T::zero(), |acc, (&c, &v)| acc + v * xs[c])
            })
            .collect();

        Ok(Tensor1::from_shape_vec([nrows], data)?)
    }

    /// Multiply the matrix with a dense matrix.
    ///
    /// # Errors
    ///
    /// If the number of rows of `b` differs from the number of columns, an error is returned.
    pub fn matmul_dense(&self, b: &Tensor2<T>) -> Result<Tensor2<T>, TensorOpsError>
    where
        T: Zero + Copy + std::ops::Add<Output = T> + std::ops::Mul<Output = T>,
    {
        let [_, ncols] = self.shape;
        if b.shape[0] != ncols {
            return Err(TensorOpsError::ShapeMismatch(
                vec![ncols, b.shape[1]],
                b.shape.to_vec(),
            ));
        }
        let dense = self.to_dense();
        let data = matmul_kernel(dense.as_slice(), b.as_slice(), self.shape[0], ncols, b.shape[1])?;
        Ok(Tensor2::from_shape_vec([self.shape[0], b.shape[1]], data)?)
    }

    /// Convert to a dense matrix.
    pub fn to_dense(&self) -> Tensor2<T>
    where
        T: Zero + Clone,
    {
        let [nrows, ncols] = self.shape;
        let mut data = vec![T::zero(); nrows * ncols];
        for (row, bounds) in self.row_ptrs.windows(2).enumerate() {
            for pos in bounds[0]..bounds[1] {
                data[row * ncols + self.col_indices[pos]] = self.values[pos].clone();
            }
        }
        Tensor2 {
            storage: gsp_tensor::storage::TensorStorage::from_vec(data),
            shape: [nrows, ncols],
            strides: [ncols, 1],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example() -> Result<CsrMatrix<f64>, TensorOpsError> {
        // [[1, 0, 2],
        //  [0, 0, 3],
        //  [4, 5, 0]]
        CsrMatrix::new(
            vec![0, 2, 3, 5],
            vec![0, 2, 2, 0, 1],
            vec![1.0, 2.0, 3.0, 4.0, 5.0],
            [3, 3],
        )
    }

    #[test]
    fn test_csr_new_and_get() -> Result<(), TensorOpsError> {
        let m = example()?;
        assert_eq!(m.shape(), [3, 3]);
        assert_eq!(m.nnz(), 5);
        assert_eq!(m.get(0, 2), Some(&2.0));
        assert_eq!(m.get(2, 1), Some(&5.0));
        assert_eq!(m.get(1, 1), None);
        assert_eq!(m.get(3, 0), None);
        Ok(())
    }

    #[test]
    fn test_csr_new_invalid() {
        let bad_ptrs = CsrMatrix::new(vec![0, 1], vec![0], vec![1.0], [2, 2]);
        assert_eq!(
            bad_ptrs.err(),
            Some(TensorOpsError::ShapeMismatch(vec![3], vec![2]))
        );

        let bad_col = CsrMatrix::new(vec![0, 1, 1], vec![2], vec![1.0], [2, 2]);
        assert_eq!(bad_col.err(), Some(TensorOpsError::DimOutOfBounds(2, 2)));

        let unsorted = CsrMatrix::new(vec![0, 2, 2], vec![1, 0], vec![1.0, 2.0], [2, 2]);
        assert!(matches!(unsorted, Err(TensorOpsError::InvalidArgument(_))));

        let bad_nnz = CsrMatrix::new(vec![0, 1, 3], vec![0, 1], vec![1.0, 2.0], [2, 2]);
        assert!(matches!(bad_nnz, Err(TensorOpsError::InvalidArgument(_))));
    }

    #[test]
    fn test_csr_diagonal_and_dense() -> Result<(), TensorOpsError> {
        let m = example()?;
        assert_eq!(m.diagonal().as_slice(), &[1.0, 0.0, 0.0]);
        assert_eq!(
            m.to_dense().as_slice(),
            &[1.0, 0.0, 2.0, 0.0, 0.0, 3.0, 4.0, 5.0, 0.0]
        );

        let wide = CsrMatrix::new(vec![0, 1, 2], vec![0, 1], vec![7, 8], [2, 4])?;
        assert_eq!(wide.diagonal().as_slice(), &[7, 8]);
        Ok(())
    }

    #[test]
    fn test_csr_matvec() -> Result<(), TensorOpsError> {
        let m = example()?;
        let x = Tensor1::from_shape_vec([3], vec![1.0, 2.0, 3.0])?;
        assert_eq!(m.matvec(&x)?.as_slice(), &[7.0, 9.0, 14.0]);

        let short = Tensor1::from_shape_vec([2], vec![1.0, 2.0])?;
        assert!(m.matvec(&short).is_err());
        Ok(())
    }

    #[test]
    fn test_csr_identity_matmul() -> Result<(), TensorOpsError> {
        let eye = CsrMatrix::<i32>::identity(3);
        let b = Tensor2::from_shape_vec([3, 2], vec![1, 2, 3, 4, 5, 6])?;
        assert_eq!(eye.matmul_dense(&b)?.as_slice(), b.as_slice());
        Ok(())
    }
}
