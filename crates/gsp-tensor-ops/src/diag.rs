//! Conversions between dense diagonals and sparse diagonal matrices.

use gsp_tensor::{Tensor1, Tensor2, TensorView};
use num_traits::Zero;

use crate::{error::TensorOpsError, sparse::CsrMatrix};

/// Conversion between a dense diagonal and a sparse diagonal matrix.
///
/// Implemented in both directions: a dense vector becomes a square sparse
/// matrix with the vector on its diagonal, and a sparse matrix gives back its
/// diagonal as a dense vector. Inputs of any other type or rank have no
/// implementation and are rejected when compiling.
pub trait Spdiag {
    /// The type produced by the conversion.
    type Output;

    /// Convert to the other representation.
    fn spdiag(&self) -> Self::Output;
}

impl<T: Clone> Spdiag for Tensor1<T> {
    type Output = CsrMatrix<T>;

    fn spdiag(&self) -> CsrMatrix<T> {
        CsrMatrix::from_diagonal(self.as_slice())
    }
}

impl<T: Zero + Clone> Spdiag for CsrMatrix<T> {
    type Output = Tensor1<T>;

    fn spdiag(&self) -> Tensor1<T> {
        self.diagonal()
    }
}

/// Convert a dense diagonal to a sparse matrix, or a sparse matrix to its diagonal.
///
/// # Example
///
/// ```
/// use gsp_tensor::Tensor1;
/// use gsp_tensor_ops::diag::spdiag;
///
/// let v = Tensor1::<f64>::from_shape_vec([3], vec![1.0, 0.0, 3.0]).unwrap();
/// let m = spdiag(&v);
/// assert_eq!(m.shape(), [3, 3]);
/// assert_eq!(m.nnz(), 3);
/// assert_eq!(spdiag(&m).as_slice(), v.as_slice());
/// ```
///
/// Dense matrices are not accepted:
///
/// ```compile_fail
/// use gsp_tensor::Tensor2;
/// use gsp_tensor_ops::diag::spdiag;
///
/// let m = Tensor2::<f64>::zeros([3, 3]);
/// let d = spdiag(&m);
/// ```
///
/// Neither are plain containers:
///
/// ```compile_fail
/// use gsp_tensor_ops::diag::spdiag;
///
/// let d = spdiag(&vec![1.0, 2.0]);
/// ```
pub fn spdiag<D: Spdiag + ?Sized>(data: &D) -> D::Output {
    data.spdiag()
}

/// Check whether a square matrix is diagonal.
///
/// The off-diagonal entries of an `m × m` row-major matrix form `m - 1` runs
/// of `m` elements, each starting right after a diagonal entry. They are
/// visited through a single strided window over the storage.
///
/// # Errors
///
/// `InvalidArgument` if the matrix is not square.
///
/// # Example
///
/// ```
/// use gsp_tensor::Tensor2;
/// use gsp_tensor_ops::diag::is_diag;
///
/// let d = Tensor2::<i32>::from_shape_vec([2, 2], vec![1, 0, 0, 2]).unwrap();
/// assert!(is_diag(&d).unwrap());
///
/// let u = Tensor2::<i32>::from_shape_vec([2, 2], vec![1, 1, 0, 2]).unwrap();
/// assert!(!is_diag(&u).unwrap());
/// ```
///
/// Only matrices are accepted:
///
/// ```compile_fail
/// use gsp_tensor::Tensor3;
/// use gsp_tensor_ops::diag::is_diag;
///
/// let t = Tensor3::<f64>::zeros([2, 2, 2]);
/// let r = is_diag(&t);
/// ```
pub fn is_diag<T>(a: &Tensor2<T>) -> Result<bool, TensorOpsError>
where
    T: Zero + PartialEq,
{
    let [rows, cols] = a.shape;
    if rows != cols {
        return Err(TensorOpsError::InvalidArgument(format!(
            "is_diag expects a square matrix, got shape {:?}",
            a.shape
        )));
    }
    if rows <= 1 {
        return Ok(true);
    }

    let [p, q] = a.strides;
    let off_diagonal = TensorView::as_strided(&a.storage, q, [rows - 1, rows], [p + q, q])?;
    Ok(off_diagonal.iter().all(|v| v.is_zero()))
}
