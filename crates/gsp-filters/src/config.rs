use num_traits::Float;
use serde::{Deserialize, Serialize};

use crate::{
    error::FilterError,
    filter::{Beta, FilterFunction},
    kind::FilterKind,
    multivariate::MultivariateFilterFunction,
    univariate::UnivariateFilterFunction,
};

/// Description of a builtin filter, e.g. loaded from a JSON file.
///
/// A scalar `beta` describes a univariate filter and a vector `beta` a
/// multivariate one.
///
/// # Example
///
/// ```
/// use gsp_filters::{FilterConfig, FilterKind};
///
/// let config: FilterConfig<f64> =
///     serde_json::from_str(r#"{"kind": "diffusion", "beta": [0.5, 1.0]}"#).unwrap();
/// assert_eq!(config.kind, FilterKind::Diffusion);
///
/// let fil = config.build().unwrap();
/// assert_eq!(fil.ndim(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig<T> {
    /// The builtin filter family.
    pub kind: FilterKind,
    /// Parameter, or one parameter per factor graph.
    pub beta: Beta<T>,
}

impl<T: Float> FilterConfig<T> {
    /// Build the described filter.
    ///
    /// # Errors
    ///
    /// `EmptyParameters` if `beta` is an empty vector.
    pub fn build(&self) -> Result<FilterFunction<T>, FilterError> {
        log::debug!("building {} filter with {} parameters", self.kind, self.beta.len());
        let fil: FilterFunction<T> = match &self.beta {
            Beta::Scalar(beta) => UnivariateFilterFunction::from_kind(self.kind, *beta).into(),
            Beta::Vector(betas) => {
                MultivariateFilterFunction::from_kind(self.kind, betas.clone())?.into()
            }
        };
        Ok(fil)
    }
}
