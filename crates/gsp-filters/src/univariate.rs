use std::{fmt, sync::Arc};

use gsp_tensor::Tensor;
use num_traits::Float;

use crate::{kind::FilterKind, response};

/// A custom univariate response `f(λ, β)`.
pub type UnivariateResponse<T> = Arc<dyn Fn(T, T) -> T + Send + Sync>;

#[derive(Clone)]
enum Response<T> {
    Builtin(FilterKind),
    Custom(UnivariateResponse<T>),
}

/// A filter on a single graph, parametrised by one scalar `β`.
///
/// The response is evaluated with the current `β` on every call, so
/// [`set_beta`](Self::set_beta) changes the behaviour of subsequent calls.
///
/// `set_beta` takes `&mut self`; a filter shared between threads that is also
/// updated must be wrapped in a lock by the caller.
///
/// # Example
///
/// ```
/// use gsp_filters::UnivariateFilterFunction;
///
/// let mut fil = UnivariateFilterFunction::random_walk(1.5);
/// assert_eq!(fil.evaluate(2.0), 0.25);
///
/// fil.set_beta(1.0);
/// assert_eq!(fil.evaluate(3.0), 0.25);
///
/// // custom response
/// let two_hop = UnivariateFilterFunction::new(|lam: f64, beta: f64| (1.0 + beta * lam).powi(-2), 1.0);
/// assert_eq!(two_hop.evaluate(3.0), 0.0625);
/// ```
#[derive(Clone)]
pub struct UnivariateFilterFunction<T> {
    response: Response<T>,
    beta: T,
}

impl<T: Float> UnivariateFilterFunction<T> {
    /// The dimensionality of every univariate filter.
    pub const NDIM: usize = 1;

    /// Create a filter from a custom response `f(λ, β)`.
    pub fn new<F>(f: F, beta: T) -> Self
    where
        F: Fn(T, T) -> T + Send + Sync + 'static,
    {
        Self {
            response: Response::Custom(Arc::new(f)),
            beta,
        }
    }

    /// Create a filter of one of the builtin families.
    pub fn from_kind(kind: FilterKind, beta: T) -> Self {
        Self {
            response: Response::Builtin(kind),
            beta,
        }
    }

    /// Random walk filter `(1 + β·λ)^-1`.
    pub fn random_walk(beta: T) -> Self {
        Self::from_kind(FilterKind::RandomWalk, beta)
    }

    /// Diffusion filter `exp(-β·λ)`.
    pub fn diffusion(beta: T) -> Self {
        Self::from_kind(FilterKind::Diffusion, beta)
    }

    /// Rectified linear filter `max(1 - β·λ, 0)`.
    pub fn relu(beta: T) -> Self {
        Self::from_kind(FilterKind::ReLu, beta)
    }

    /// Sigmoid filter `2·exp(-β·λ) / (1 + exp(-β·λ))`.
    pub fn sigmoid(beta: T) -> Self {
        Self::from_kind(FilterKind::Sigmoid, beta)
    }

    /// Band-limited filter: 1 where `λ ≤ 1/β`, 0 elsewhere.
    ///
    /// `β = 0` passes every eigenvalue.
    pub fn bandlimited(beta: T) -> Self {
        Self::from_kind(FilterKind::Bandlimited, beta)
    }

    /// The builtin family, or `None` for a custom response.
    pub fn kind(&self) -> Option<FilterKind> {
        match self.response {
            Response::Builtin(kind) => Some(kind),
            Response::Custom(_) => None,
        }
    }

    /// The number of graph factors the filter acts on. Always 1.
    pub fn ndim(&self) -> usize {
        Self::NDIM
    }

    /// The current parameter.
    pub fn beta(&self) -> T {
        self.beta
    }

    /// Replace the parameter used by subsequent calls.
    pub fn set_beta(&mut self, beta: T) {
        log::debug!(
            "univariate filter: set beta to {}",
            beta.to_f64().unwrap_or(f64::NAN)
        );
        self.beta = beta;
    }

    /// Response at a single eigenvalue.
    pub fn evaluate(&self, lam: T) -> T {
        match &self.response {
            Response::Builtin(kind) => response::univariate(*kind, lam, self.beta),
            Response::Custom(f) => f(lam, self.beta),
        }
    }

    /// Response at every eigenvalue of `lams`, keeping its shape.
    pub fn apply<const N: usize>(&self, lams: &Tensor<T, N>) -> Tensor<T, N> {
        lams.map(|&lam| self.evaluate(lam))
    }
}

impl<T: fmt::Debug> fmt::Debug for UnivariateFilterFunction<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let response = match &self.response {
            Response::Builtin(kind) => kind.name(),
            Response::Custom(_) => "custom",
        };
        f.debug_struct("UnivariateFilterFunction")
            .field("response", &response)
            .field("beta", &self.beta)
            .finish()
    }
}
