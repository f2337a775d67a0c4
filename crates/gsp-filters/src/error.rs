use gsp_tensor::TensorError;

/// An error type for filter functions.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum FilterError {
    /// The number of parameters or eigenvalue arrays disagrees with the filter's dimensionality.
    #[error("{what} should be length {expected} but it is length {actual}")]
    DimensionMismatch {
        /// What was supplied, e.g. `"beta"` or `"lams"`
        what: &'static str,
        /// The dimensionality the filter was built with
        expected: usize,
        /// The length that was supplied
        actual: usize,
    },

    /// A multivariate filter was constructed without parameters.
    #[error("a multivariate filter needs at least one parameter")]
    EmptyParameters,

    /// Per-factor eigenvalue arrays whose shapes cannot be broadcast together.
    #[error("eigenvalue arrays with shapes {0:?} and {1:?} cannot be broadcast together")]
    BroadcastError(Vec<usize>, Vec<usize>),

    /// A signal whose shape differs from the graph it is defined on.
    #[error("the graph and signal have incompatible shapes: {expected:?} vs {actual:?}")]
    SignalShapeMismatch {
        /// Shape of the graph signal space
        expected: Vec<usize>,
        /// Shape of the signal
        actual: Vec<usize>,
    },

    /// Filter name that is not one of the builtin families.
    #[error("unknown filter kind `{0}`")]
    UnknownKind(String),

    /// Tensor error
    #[error("Error with the tensor: {0}")]
    TensorError(#[from] TensorError),
}

impl FilterError {
    pub(crate) fn dimension_mismatch(what: &'static str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            what,
            expected,
            actual,
        }
    }
}
