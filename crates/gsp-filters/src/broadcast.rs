//! Broadcasting of per-factor eigenvalue arrays.
//!
//! Arrays of equal rank are broadcast the way numpy does it: along each axis
//! the sizes must agree, and an axis of size 1 is repeated to match the
//! others. The repetition is a zero stride in a [`TensorView`], so nothing is
//! copied.

use gsp_tensor::{Tensor, TensorView};

use crate::error::FilterError;

/// Compute the common shape of a set of tensors.
///
/// # Errors
///
/// `BroadcastError` if two tensors disagree on an axis where neither has size 1.
pub fn broadcast_shape<T, const N: usize>(
    inputs: &[&Tensor<T, N>],
) -> Result<[usize; N], FilterError> {
    let mut shape = [1; N];
    for t in inputs {
        for (d, &size) in t.shape.iter().enumerate() {
            if size == 1 || size == shape[d] {
                continue;
            }
            if shape[d] != 1 {
                return Err(FilterError::BroadcastError(
                    shape.to_vec(),
                    t.shape.to_vec(),
                ));
            }
            shape[d] = size;
        }
    }
    Ok(shape)
}

/// View of `t` stretched to `shape`, with zero strides on the repeated axes.
fn broadcast_view<'a, T, const N: usize>(
    t: &'a Tensor<T, N>,
    shape: [usize; N],
) -> Result<TensorView<'a, T, N>, FilterError> {
    let mut strides = t.strides;
    for (stride, &size) in strides.iter_mut().zip(t.shape.iter()) {
        if size == 1 {
            *stride = 0;
        }
    }
    Ok(TensorView::as_strided(&t.storage, 0, shape, strides)?)
}

/// Broadcast `inputs` together and apply `f` to the values at every point.
///
/// `f` receives one value per input, in input order.
pub fn broadcast_map<T, U, F, const N: usize>(
    inputs: &[&Tensor<T, N>],
    mut f: F,
) -> Result<Tensor<U, N>, FilterError>
where
    T: Copy,
    F: FnMut(&[T]) -> U,
{
    let shape = broadcast_shape(inputs)?;
    let views = inputs
        .iter()
        .map(|t| broadcast_view(t, shape))
        .collect::<Result<Vec<_>, _>>()?;
    let mut iters: Vec<_> = views.iter().map(|v| v.iter()).collect();

    let numel = shape.iter().product::<usize>();
    let mut point = Vec::with_capacity(inputs.len());
    let mut data = Vec::with_capacity(numel);
    for _ in 0..numel {
        point.clear();
        point.extend(iters.iter_mut().filter_map(|it| it.next().copied()));
        data.push(f(&point));
    }

    Ok(Tensor::from_shape_vec(shape, data)?)
}
