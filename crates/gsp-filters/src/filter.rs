use std::borrow::Borrow;

use gsp_tensor::Tensor;
use num_traits::Float;
use serde::{Deserialize, Serialize};

use crate::{
    error::FilterError, multivariate::MultivariateFilterFunction,
    univariate::UnivariateFilterFunction,
};

/// Filter parameters: a scalar for a single graph, a vector for a product graph.
///
/// Deserialises from either a number or an array of numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Beta<T> {
    /// One parameter.
    Scalar(T),
    /// One parameter per factor graph.
    Vector(Vec<T>),
}

impl<T> Beta<T> {
    /// Number of parameters. A scalar counts as one.
    pub fn len(&self) -> usize {
        match self {
            Beta::Scalar(_) => 1,
            Beta::Vector(v) => v.len(),
        }
    }

    /// True for an empty vector.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The parameters as a slice.
    pub fn as_slice(&self) -> &[T] {
        match self {
            Beta::Scalar(b) => std::slice::from_ref(b),
            Beta::Vector(v) => v,
        }
    }
}

impl<T> From<T> for Beta<T> {
    fn from(value: T) -> Self {
        Beta::Scalar(value)
    }
}

impl<T> From<Vec<T>> for Beta<T> {
    fn from(value: Vec<T>) -> Self {
        Beta::Vector(value)
    }
}

/// A filter function on a graph or a product of graphs.
///
/// Both variants share the interface `{ndim, set_beta, apply}`; the
/// dimensionality is fixed when the filter is built.
///
/// A scalar parameter and a length-1 vector are interchangeable: a univariate
/// filter accepts `Beta::Vector` of length 1, and a multivariate filter with
/// `ndim == 1` accepts `Beta::Scalar`.
///
/// # Example
///
/// ```
/// use gsp_filters::{Beta, FilterError, FilterFunction, MultivariateFilterFunction};
///
/// let mut fil: FilterFunction<f64> = MultivariateFilterFunction::sigmoid(vec![1.0, 1.0])?.into();
/// assert_eq!(fil.ndim(), 2);
/// fil.set_beta(vec![0.5, 2.0])?;
/// assert!(fil.set_beta(Beta::Scalar(0.5)).is_err());
/// # Ok::<(), FilterError>(())
/// ```
#[derive(Debug, Clone)]
pub enum FilterFunction<T> {
    /// Filter on a single graph.
    Univariate(UnivariateFilterFunction<T>),
    /// Filter on a product of graphs.
    Multivariate(MultivariateFilterFunction<T>),
}

impl<T: Float> FilterFunction<T> {
    /// The number of factor graphs the filter acts on.
    pub fn ndim(&self) -> usize {
        match self {
            FilterFunction::Univariate(f) => f.ndim(),
            FilterFunction::Multivariate(f) => f.ndim(),
        }
    }

    /// Replace the parameters used by subsequent calls.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if the number of parameters differs from `ndim`.
    pub fn set_beta(&mut self, beta: impl Into<Beta<T>>) -> Result<(), FilterError> {
        let beta = beta.into();
        match self {
            FilterFunction::Univariate(f) => match beta.as_slice() {
                [b] => {
                    f.set_beta(*b);
                    Ok(())
                }
                other => Err(FilterError::dimension_mismatch("beta", 1, other.len())),
            },
            FilterFunction::Multivariate(f) => f.set_beta(beta.as_slice()),
        }
    }

    /// Response over per-factor eigenvalue arrays.
    ///
    /// A univariate filter takes exactly one array and keeps its shape; a
    /// multivariate filter takes `ndim` arrays and broadcasts them.
    ///
    /// # Errors
    ///
    /// * `DimensionMismatch` if the number of arrays differs from `ndim`.
    /// * `BroadcastError` if the arrays cannot be broadcast together.
    pub fn apply<F, const N: usize>(&self, lams: &[F]) -> Result<Tensor<T, N>, FilterError>
    where
        F: Borrow<Tensor<T, N>>,
    {
        match self {
            FilterFunction::Univariate(f) => match lams {
                [lam] => Ok(f.apply(<F as Borrow<Tensor<T, N>>>::borrow(lam))),
                other => Err(FilterError::dimension_mismatch("lams", 1, other.len())),
            },
            FilterFunction::Multivariate(f) => f.apply(lams),
        }
    }

    /// The univariate filter, if this is one.
    pub fn as_univariate(&self) -> Option<&UnivariateFilterFunction<T>> {
        match self {
            FilterFunction::Univariate(f) => Some(f),
            FilterFunction::Multivariate(_) => None,
        }
    }

    /// The multivariate filter, if this is one.
    pub fn as_multivariate(&self) -> Option<&MultivariateFilterFunction<T>> {
        match self {
            FilterFunction::Univariate(_) => None,
            FilterFunction::Multivariate(f) => Some(f),
        }
    }
}

impl<T> From<UnivariateFilterFunction<T>> for FilterFunction<T> {
    fn from(value: UnivariateFilterFunction<T>) -> Self {
        FilterFunction::Univariate(value)
    }
}

impl<T> From<MultivariateFilterFunction<T>> for FilterFunction<T> {
    fn from(value: MultivariateFilterFunction<T>) -> Self {
        FilterFunction::Multivariate(value)
    }
}

#[cfg(test)]
mod tests {
    use gsp_tensor::{Tensor1, Tensor2};

    use super::*;

    #[test]
    fn test_beta_len() {
        assert_eq!(Beta::Scalar(1.0).len(), 1);
        assert_eq!(Beta::Vector(vec![1.0, 2.0]).len(), 2);
        assert!(Beta::<f64>::Vector(vec![]).is_empty());
        assert_eq!(Beta::Scalar(3.0).as_slice(), &[3.0]);
    }

    #[test]
    fn test_univariate_dispatch() -> Result<(), FilterError> {
        let mut fil: FilterFunction<f64> = UnivariateFilterFunction::random_walk(1.5).into();
        assert_eq!(fil.ndim(), 1);
        assert!(fil.as_univariate().is_some());
        assert!(fil.as_multivariate().is_none());

        let lams = Tensor1::from_shape_vec([2], vec![0.0, 2.0])?;
        assert_eq!(fil.apply(&[&lams])?.as_slice(), &[1.0, 0.25]);
        assert_eq!(
            fil.apply(&[&lams, &lams]).err(),
            Some(FilterError::dimension_mismatch("lams", 1, 2))
        );

        fil.set_beta(Beta::Vector(vec![1.0]))?;
        assert_eq!(fil.as_univariate().map(|f| f.beta()), Some(1.0));
        assert_eq!(
            fil.set_beta(vec![1.0, 2.0]).err(),
            Some(FilterError::dimension_mismatch("beta", 1, 2))
        );
        Ok(())
    }

    #[test]
    fn test_multivariate_dispatch() -> Result<(), FilterError> {
        let mut fil: FilterFunction<f64> =
            MultivariateFilterFunction::random_walk(vec![1.0, 2.0, 3.0])?.into();
        assert_eq!(fil.ndim(), 3);
        assert_eq!(
            fil.set_beta(vec![1.0, 2.0]).err(),
            Some(FilterError::dimension_mismatch("beta", 3, 2))
        );

        let lams = [
            Tensor2::<f64>::zeros([2, 2]),
            Tensor2::<f64>::zeros([2, 2]),
        ];
        assert_eq!(
            fil.apply(&lams).err(),
            Some(FilterError::dimension_mismatch("lams", 3, 2))
        );

        let mut single: FilterFunction<f64> = MultivariateFilterFunction::diffusion(vec![1.0])?.into();
        single.set_beta(0.5)?;
        assert_eq!(single.as_multivariate().map(|f| f.betas().to_vec()), Some(vec![0.5]));
        Ok(())
    }
}
