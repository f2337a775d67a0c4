use gsp_tensor::TensorError;
use thiserror::Error;

/// An error type for tensor operations.
#[derive(Error, Debug, PartialEq)]
pub enum TensorOpsError {
    /// The dimension to perform the operation over is greater than the number of dimensions of the tensor.
    #[error("Dimension out of bounds. The dimension {0} is out of bounds ({1}).")]
    DimOutOfBounds(usize, usize),

    /// Tensor error
    #[error("Error with the tensor: {0}")]
    TensorError(#[from] TensorError),

    /// Length mismatch for the slices handed to a kernel
    #[error("Length mismatch: expected {0} elements, got {1}")]
    LengthMismatch(usize, usize),

    /// Shape mismatch between an operand and what the operation requires
    #[error("Shape mismatch: expected {0:?}, got {1:?}")]
    ShapeMismatch(Vec<usize>, Vec<usize>),

    /// Malformed argument, e.g. a non-square matrix where a square one is required
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
