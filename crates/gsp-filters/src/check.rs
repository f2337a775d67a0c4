use gsp_tensor::Tensor;
use num_traits::Float;

use crate::{error::FilterError, filter::FilterFunction};

/// Check that a filter acts on as many factor graphs as a signal has axes.
///
/// # Errors
///
/// `DimensionMismatch` if `filter.ndim() != signal_ndim`.
pub fn check_filter_ndim<T: Float>(
    filter: &FilterFunction<T>,
    signal_ndim: usize,
) -> Result<(), FilterError> {
    if filter.ndim() != signal_ndim {
        return Err(FilterError::dimension_mismatch(
            "filter ndim",
            signal_ndim,
            filter.ndim(),
        ));
    }
    Ok(())
}

/// Check that a signal, the shape of the graph it lives on, and a filter agree.
///
/// The rank of the signal and of the graph shape agree by construction; the
/// axis lengths and the filter dimensionality are checked here.
///
/// # Errors
///
/// * `SignalShapeMismatch` if `signal.shape != graph_shape`.
/// * `DimensionMismatch` if `filter.ndim() != N`.
///
/// # Example
///
/// ```
/// use gsp_filters::{check_compatible, FilterError, MultivariateFilterFunction};
/// use gsp_tensor::Tensor2;
///
/// let signal = Tensor2::<f64>::zeros([4, 3]);
/// let fil = MultivariateFilterFunction::diffusion(vec![1.0, 1.0])?.into();
/// check_compatible(&signal, [4, 3], &fil)?;
/// assert!(check_compatible(&signal, [3, 4], &fil).is_err());
/// # Ok::<(), FilterError>(())
/// ```
pub fn check_compatible<T: Float, const N: usize>(
    signal: &Tensor<T, N>,
    graph_shape: [usize; N],
    filter: &FilterFunction<T>,
) -> Result<(), FilterError> {
    if signal.shape != graph_shape {
        return Err(FilterError::SignalShapeMismatch {
            expected: graph_shape.to_vec(),
            actual: signal.shape.to_vec(),
        });
    }
    check_filter_ndim(filter, N)
}

#[cfg(test)]
mod tests {
    use gsp_tensor::{Tensor1, Tensor3};

    use super::*;
    use crate::{MultivariateFilterFunction, UnivariateFilterFunction};

    #[test]
    fn test_check_filter_ndim() -> Result<(), FilterError> {
        let uni: FilterFunction<f64> = UnivariateFilterFunction::sigmoid(1.0).into();
        check_filter_ndim(&uni, 1)?;
        assert_eq!(
            check_filter_ndim(&uni, 2),
            Err(FilterError::dimension_mismatch("filter ndim", 2, 1))
        );

        let multi: FilterFunction<f64> =
            MultivariateFilterFunction::diffusion(vec![1.0, 2.0, 3.0])?.into();
        check_filter_ndim(&multi, 3)?;
        assert!(check_filter_ndim(&multi, 2).is_err());
        Ok(())
    }

    #[test]
    fn test_check_compatible() -> Result<(), FilterError> {
        let signal = Tensor3::<f64>::zeros([4, 3, 2]);
        let fil: FilterFunction<f64> =
            MultivariateFilterFunction::random_walk(vec![1.0, 1.0, 1.0])?.into();
        check_compatible(&signal, [4, 3, 2], &fil)?;
        assert_eq!(
            check_compatible(&signal, [2, 3, 4], &fil),
            Err(FilterError::SignalShapeMismatch {
                expected: vec![2, 3, 4],
                actual: vec![4, 3, 2]
            })
        );

        let flat = Tensor1::<f64>::zeros([24]);
        assert!(matches!(
            check_compatible(&flat, [24], &fil),
            Err(FilterError::DimensionMismatch { .. })
        ));
        Ok(())
    }
}
