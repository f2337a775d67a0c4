#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use gsp_tensor as tensor;

#[doc(inline)]
pub use gsp_tensor_ops as tensor_ops;

#[doc(inline)]
pub use gsp_filters as filters;
