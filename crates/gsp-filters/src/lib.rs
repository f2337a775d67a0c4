#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Overview
//!
//! A filter function maps the eigenvalues of a graph Laplacian to the
//! response applied to each spectral component of a signal.
//!
//! - [`UnivariateFilterFunction`]: one graph, one scalar parameter `β`
//! - [`MultivariateFilterFunction`]: a product of `ndim` graphs, one parameter per factor
//! - [`FilterFunction`]: either of the two behind the shared `{ndim, set_beta, apply}` interface
//!
//! Five builtin families are provided (see [`FilterKind`]); custom responses
//! are plain closures.
//!
//! # Quick Start
//!
//! ```rust
//! use gsp_filters::{FilterError, MultivariateFilterFunction, UnivariateFilterFunction};
//! use gsp_tensor::Tensor2;
//!
//! let fil = UnivariateFilterFunction::random_walk(1.5);
//! assert_eq!(fil.evaluate(2.0), 0.25);
//!
//! // eigenvalue grid of a 2 x 3 product graph, broadcast from its factors
//! let rows = Tensor2::from_shape_vec([2, 1], vec![0.0, 2.0])?;
//! let cols = Tensor2::from_shape_vec([1, 3], vec![0.0, 1.0, 3.0])?;
//! let fil = MultivariateFilterFunction::diffusion(vec![1.0, 0.5])?;
//! let response = fil.apply(&[rows, cols])?;
//! assert_eq!(response.shape, [2, 3]);
//! assert_eq!(*response.get_unchecked([0, 0]), 1.0);
//! # Ok::<(), FilterError>(())
//! ```

/// Broadcasting of per-factor eigenvalue arrays.
pub mod broadcast;

/// Compatibility checks between signals, graphs and filters.
pub mod check;

/// Serialisable filter descriptions.
pub mod config;

/// Error types for filter functions.
pub mod error;

/// The tagged filter function and its parameters.
pub mod filter;

/// The builtin filter families.
pub mod kind;

/// Filters on product graphs.
pub mod multivariate;

pub mod response;

/// Filters on a single graph.
pub mod univariate;

pub use check::{check_compatible, check_filter_ndim};
pub use config::FilterConfig;
pub use error::FilterError;
pub use filter::{Beta, FilterFunction};
pub use kind::FilterKind;
pub use multivariate::{MultivariateFilterFunction, MultivariateResponse};
pub use univariate::{UnivariateFilterFunction, UnivariateResponse};
