#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Diagonal conversions and diagonality checks.
///
/// Provides the [`Spdiag`] conversion between dense diagonals and sparse
/// diagonal matrices, and [`is_diag`] for dense square matrices.
pub mod diag;

/// Error types for tensor operations.
///
/// Defines [`TensorOpsError`] for handling failures during tensor computations.
pub mod error;

/// Low-level computational kernels for tensor operations.
pub mod kernels;

/// Column-major vectorisation and Kronecker-structured operators.
///
/// Applies Kronecker products and Kronecker sums of per-axis factors to a
/// tensor one axis at a time, without forming the full operator.
pub mod ops;

/// Compressed sparse row matrices.
pub mod sparse;

pub use diag::{is_diag, spdiag, Spdiag};
pub use error::TensorOpsError;
pub use ops::{mat, tensor_product, tensor_product_of_sum, vec};
pub use sparse::CsrMatrix;
