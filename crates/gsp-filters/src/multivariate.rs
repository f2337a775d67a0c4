use std::{borrow::Borrow, fmt, sync::Arc};

use gsp_tensor::Tensor;
use num_traits::Float;

use crate::{broadcast::broadcast_map, error::FilterError, kind::FilterKind, response};

/// A custom multivariate response `f(λ, β)` evaluated at one point of the
/// product spectrum: `λ` holds one eigenvalue per factor and `β` the
/// matching parameters.
pub type MultivariateResponse<T> = Arc<dyn Fn(&[T], &[T]) -> T + Send + Sync>;

#[derive(Clone)]
enum Response<T> {
    Builtin(FilterKind),
    Custom(MultivariateResponse<T>),
}

/// A filter on a product of graphs, with one parameter per factor graph.
///
/// The number of parameters fixes the filter's dimensionality `ndim` when it
/// is built. Parameter updates and calls must supply exactly `ndim` values
/// or eigenvalue arrays; anything else is rejected before evaluation.
///
/// `set_beta` takes `&mut self`; a filter shared between threads that is also
/// updated must be wrapped in a lock by the caller.
///
/// # Example
///
/// ```
/// use gsp_filters::{FilterError, MultivariateFilterFunction};
/// use gsp_tensor::Tensor2;
///
/// let mut fil = MultivariateFilterFunction::random_walk(vec![1.0, 2.0, 3.0])?;
/// assert_eq!(fil.ndim(), 3);
///
/// let lams: Vec<Tensor2<f64>> = (0..3)
///     .map(|i| Tensor2::from_shape_val([2, 2], i as f64))
///     .collect();
/// let response = fil.apply(&lams)?;
/// assert_eq!(response.shape, [2, 2]);
/// assert_eq!(response.as_slice(), &[1.0 / 9.0; 4]);
///
/// assert!(matches!(
///     fil.set_beta(&[1.0, 2.0]),
///     Err(FilterError::DimensionMismatch { expected: 3, actual: 2, .. })
/// ));
/// # Ok::<(), FilterError>(())
/// ```
#[derive(Clone)]
pub struct MultivariateFilterFunction<T> {
    response: Response<T>,
    betas: Vec<T>,
}

impl<T: Float> MultivariateFilterFunction<T> {
    fn with_response(response: Response<T>, betas: Vec<T>) -> Result<Self, FilterError> {
        if betas.is_empty() {
            return Err(FilterError::EmptyParameters);
        }
        Ok(Self { response, betas })
    }

    /// Create a filter from a custom pointwise response.
    ///
    /// # Errors
    ///
    /// `EmptyParameters` if `betas` is empty.
    pub fn new<F>(f: F, betas: Vec<T>) -> Result<Self, FilterError>
    where
        F: Fn(&[T], &[T]) -> T + Send + Sync + 'static,
    {
        Self::with_response(Response::Custom(Arc::new(f)), betas)
    }

    /// Create a filter of one of the builtin families.
    ///
    /// # Errors
    ///
    /// `EmptyParameters` if `betas` is empty.
    pub fn from_kind(kind: FilterKind, betas: Vec<T>) -> Result<Self, FilterError> {
        Self::with_response(Response::Builtin(kind), betas)
    }

    /// Random walk filter `(1 + Σ β_i·λ_i)^-1`.
    pub fn random_walk(betas: Vec<T>) -> Result<Self, FilterError> {
        Self::from_kind(FilterKind::RandomWalk, betas)
    }

    /// Diffusion filter `exp(-Σ β_i·λ_i)`.
    pub fn diffusion(betas: Vec<T>) -> Result<Self, FilterError> {
        Self::from_kind(FilterKind::Diffusion, betas)
    }

    /// Rectified linear filter `max(1 - Σ β_i·λ_i, 0)`.
    pub fn relu(betas: Vec<T>) -> Result<Self, FilterError> {
        Self::from_kind(FilterKind::ReLu, betas)
    }

    /// Sigmoid filter `2E / (1 + E)` with `E = exp(-Σ β_i·λ_i)`.
    pub fn sigmoid(betas: Vec<T>) -> Result<Self, FilterError> {
        Self::from_kind(FilterKind::Sigmoid, betas)
    }

    /// Band-limited filter: 1 where `β_i·λ_i < 1` for every factor, 0 elsewhere.
    ///
    /// A zero parameter places no limit on its factor.
    pub fn bandlimited(betas: Vec<T>) -> Result<Self, FilterError> {
        Self::from_kind(FilterKind::Bandlimited, betas)
    }

    /// The builtin family, or `None` for a custom response.
    pub fn kind(&self) -> Option<FilterKind> {
        match self.response {
            Response::Builtin(kind) => Some(kind),
            Response::Custom(_) => None,
        }
    }

    /// The number of factor graphs the filter acts on.
    pub fn ndim(&self) -> usize {
        self.betas.len()
    }

    /// The current parameters, one per factor.
    pub fn betas(&self) -> &[T] {
        &self.betas
    }

    /// Replace the parameters used by subsequent calls.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if `betas.len() != self.ndim()`; the stored
    /// parameters are left untouched.
    pub fn set_beta(&mut self, betas: &[T]) -> Result<(), FilterError> {
        self.check_len("beta", betas.len())?;
        log::debug!("multivariate filter: set {} parameters", betas.len());
        self.betas.copy_from_slice(betas);
        Ok(())
    }

    fn check_len(&self, what: &'static str, actual: usize) -> Result<(), FilterError> {
        if actual != self.ndim() {
            return Err(FilterError::dimension_mismatch(what, self.ndim(), actual));
        }
        Ok(())
    }

    /// Response at one point of the product spectrum, one eigenvalue per factor.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if `lams.len() != self.ndim()`.
    pub fn evaluate(&self, lams: &[T]) -> Result<T, FilterError> {
        self.check_len("lams", lams.len())?;
        Ok(self.evaluate_unchecked(lams))
    }

    fn evaluate_unchecked(&self, lams: &[T]) -> T {
        match &self.response {
            Response::Builtin(kind) => response::multivariate(*kind, lams, &self.betas),
            Response::Custom(f) => f(lams, &self.betas),
        }
    }

    /// Response over per-factor eigenvalue arrays.
    ///
    /// The arrays are broadcast against each other, so a grid over the
    /// product spectrum can be given as factors of shape `[n, 1]` and
    /// `[1, m]`. The result has the broadcast shape.
    ///
    /// # Errors
    ///
    /// * `DimensionMismatch` if the number of arrays differs from `ndim`.
    /// * `BroadcastError` if the arrays cannot be broadcast together.
    pub fn apply<F, const N: usize>(&self, lams: &[F]) -> Result<Tensor<T, N>, FilterError>
    where
        F: Borrow<Tensor<T, N>>,
    {
        self.check_len("lams", lams.len())?;
        let inputs: Vec<&Tensor<T, N>> = lams.iter().map(<F as Borrow<Tensor<T, N>>>::borrow).collect();
        broadcast_map(&inputs, |point| self.evaluate_unchecked(point))
    }
}

impl<T: fmt::Debug> fmt::Debug for MultivariateFilterFunction<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let response = match &self.response {
            Response::Builtin(kind) => kind.name(),
            Response::Custom(_) => "custom",
        };
        f.debug_struct("MultivariateFilterFunction")
            .field("response", &response)
            .field("betas", &self.betas)
            .finish()
    }
}
