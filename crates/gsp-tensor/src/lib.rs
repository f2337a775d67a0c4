#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Overview
//!
//! `gsp-tensor` provides the dense array type used to hold graph signals,
//! eigenvalue grids and factor operators across the `gsp` crates.
//!
//! - **Tensor**: owned multi-dimensional array with a compile-time rank, stored row-major
//! - **TensorStorage**: reference-counted buffer with copy-on-write mutation
//! - **TensorView**: non-owning reshaped, permuted or arbitrarily strided window
//!
//! # Quick Start
//!
//! ```rust
//! use gsp_tensor::Tensor;
//!
//! let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
//! let tensor = Tensor::<f64, 2>::from_shape_vec([2, 3], data).unwrap();
//!
//! assert_eq!(tensor.get([0, 0]), Some(&1.0));
//! assert_eq!(tensor.get([1, 2]), Some(&6.0));
//!
//! let transposed = tensor.permute_axes([1, 0]).unwrap().as_contiguous();
//! assert_eq!(transposed.shape, [3, 2]);
//! ```

/// Serde module for JSON/other format serialization and deserialization.
///
/// Enabled with the `serde` feature.
#[cfg(feature = "serde")]
pub mod serde;

/// Storage module containing the reference-counted tensor buffer.
pub mod storage;

/// Tensor module containing the main tensor implementation and error types.
pub mod tensor;

/// View module containing non-owning tensor view implementations.
pub mod view;

pub(crate) use crate::tensor::get_strides_from_shape;
pub use crate::tensor::{Tensor, TensorError};
pub use crate::view::TensorView;

/// Type alias for a 1-dimensional tensor.
pub type Tensor1<T> = Tensor<T, 1>;

/// Type alias for a 2-dimensional tensor.
pub type Tensor2<T> = Tensor<T, 2>;

/// Type alias for a 3-dimensional tensor.
pub type Tensor3<T> = Tensor<T, 3>;

/// Type alias for a 4-dimensional tensor.
pub type Tensor4<T> = Tensor<T, 4>;
