use std::borrow::Borrow;

use gsp_tensor::{storage::TensorStorage, Tensor, Tensor1, Tensor2, TensorView};
use num_traits::{One, Zero};

use crate::{error::TensorOpsError, kernels::matmul_kernel};

/// View of `x` with the order of all axes reversed.
fn reversed_view<T, const N: usize>(x: &Tensor<T, N>) -> TensorView<'_, T, N> {
    let mut shape = x.shape;
    let mut strides = x.strides;
    shape.reverse();
    strides.reverse();
    TensorView {
        storage: &x.storage,
        offset: 0,
        shape,
        strides,
    }
}

/// Flatten a tensor into a vector in column-major (Fortran) order.
///
/// The first axis varies fastest, which is the ordering under which the
/// Kronecker product `A0 ⊗ A1 ⊗ ... ⊗ A_{N-1}` acts on `vec(X)` with
/// `A_{N-1}` on the first axis. [`mat`] is the exact inverse.
///
/// # Example
///
/// ```
/// use gsp_tensor::Tensor2;
/// use gsp_tensor_ops::ops::vec;
///
/// let x = Tensor2::<i32>::from_shape_vec([2, 3], vec![1, 2, 3, 4, 5, 6]).unwrap();
/// assert_eq!(vec(&x).as_slice(), &[1, 4, 2, 5, 3, 6]);
/// ```
pub fn vec<T, const N: usize>(x: &Tensor<T, N>) -> Tensor1<T>
where
    T: Clone,
{
    let data: Vec<T> = reversed_view(x).iter().cloned().collect();
    Tensor {
        shape: [data.len()],
        strides: [1],
        storage: TensorStorage::from_vec(data),
    }
}

/// Reshape a vector into a tensor of the given shape using column-major order.
///
/// Inverse of [`vec`]: `mat(&vec(&x), x.shape)` reproduces `x` exactly.
///
/// # Errors
///
/// If the length of `x` differs from the number of elements of `shape`, an error is returned.
///
/// # Example
///
/// ```
/// use gsp_tensor::Tensor1;
/// use gsp_tensor_ops::ops::mat;
///
/// let x = Tensor1::<i32>::from_shape_vec([6], vec![1, 4, 2, 5, 3, 6]).unwrap();
/// let t = mat(&x, [2, 3]).unwrap();
/// assert_eq!(t.as_slice(), &[1, 2, 3, 4, 5, 6]);
/// ```
///
/// Only one-dimensional inputs are accepted:
///
/// ```compile_fail
/// use gsp_tensor::Tensor2;
/// use gsp_tensor_ops::ops::mat;
///
/// let x = Tensor2::<i32>::zeros([2, 3]);
/// let t = mat(&x, [3, 2]);
/// ```
pub fn mat<T, const N: usize>(
    x: &Tensor1<T>,
    shape: [usize; N],
) -> Result<Tensor<T, N>, TensorOpsError>
where
    T: Clone,
{
    let mut reversed_shape = shape;
    reversed_shape.reverse();
    let reversed = Tensor::from_shape_slice(reversed_shape, x.as_slice())?;
    Ok(reversed_view(&reversed).as_contiguous())
}

/// Reshape a vector into a tensor shaped like `like`, using column-major order.
///
/// # Errors
///
/// If the length of `x` differs from the number of elements of `like`, an error is returned.
pub fn mat_like<T, U, const N: usize>(
    x: &Tensor1<T>,
    like: &Tensor<U, N>,
) -> Result<Tensor<T, N>, TensorOpsError>
where
    T: Clone,
{
    mat(x, like.shape)
}

/// Contract the second axis of a matrix with one axis of a tensor.
///
/// Equivalent to numpy's `tensordot(a, x, axes=[[1], [axis]])`: the output's
/// first axis has length `a.shape[0]`, followed by the remaining axes of `x`
/// in their original order.
///
/// # Errors
///
/// * `DimOutOfBounds` if `axis >= N`.
/// * `ShapeMismatch` if `a.shape[1] != x.shape[axis]`.
///
/// # Example
///
/// ```
/// use gsp_tensor::{Tensor2, Tensor3};
/// use gsp_tensor_ops::ops::contract_mode;
///
/// let a = Tensor2::<f64>::from_shape_vec([5, 3], vec![1.0; 15]).unwrap();
/// let x = Tensor3::<f64>::from_shape_val([2, 3, 4], 1.0);
/// let y = contract_mode(&a, &x, 1).unwrap();
/// assert_eq!(y.shape, [5, 2, 4]);
/// assert!(y.iter().all(|&v| v == 3.0));
/// ```
pub fn contract_mode<T, const N: usize>(
    a: &Tensor2<T>,
    x: &Tensor<T, N>,
    axis: usize,
) -> Result<Tensor<T, N>, TensorOpsError>
where
    T: Zero + Copy + std::ops::Add<Output = T> + std::ops::Mul<Output = T>,
{
    if axis >= N {
        return Err(TensorOpsError::DimOutOfBounds(axis, N));
    }
    let [rows, cols] = a.shape;
    if cols != x.shape[axis] {
        return Err(TensorOpsError::ShapeMismatch(
            vec![rows, x.shape[axis]],
            a.shape.to_vec(),
        ));
    }

    // bring `axis` to the front, keep the others in order
    let mut axes = [0; N];
    axes[0] = axis;
    for (slot, other) in axes[1..].iter_mut().zip((0..N).filter(|&d| d != axis)) {
        *slot = other;
    }
    let moved = x.permute_axes(axes)?.as_contiguous();

    let rest = moved.shape[1..].iter().product::<usize>();
    let data = matmul_kernel(a.as_slice(), moved.as_slice(), rows, cols, rest)?;

    let mut shape = moved.shape;
    shape[0] = rows;
    Ok(Tensor::from_shape_vec(shape, data)?)
}

/// Check that `factors` can act on `x`: one square factor per axis, with
/// factor `A_{N-1-i}` matching the length of axis `i`.
fn check_factors<T, F, const N: usize>(x: &Tensor<T, N>, factors: &[F]) -> Result<(), TensorOpsError>
where
    F: Borrow<Tensor2<T>>,
{
    if factors.len() != N {
        let expected = factors
            .iter()
            .rev()
            .map(|a| {
                let a: &Tensor2<T> = a.borrow();
                a.shape[0]
            })
            .collect();
        return Err(TensorOpsError::ShapeMismatch(expected, x.shape.to_vec()));
    }

    for (a, &size) in factors.iter().rev().zip(x.shape.iter()) {
        let a: &Tensor2<T> = a.borrow();
        if a.shape != [size, size] {
            return Err(TensorOpsError::ShapeMismatch(
                vec![size, size],
                a.shape.to_vec(),
            ));
        }
    }

    Ok(())
}

/// Apply the Kronecker product of the factors to a tensor.
///
/// Computes `mat((A0 ⊗ A1 ⊗ ... ⊗ A_{N-1}) vec(X))` without forming the
/// Kronecker product. Factor `A_{N-1-i}` acts on axis `i` of `x`, so the last
/// factor acts on the first axis.
///
/// The factors are contracted one at a time, last factor first. Every
/// contraction puts its output axis at the front, which reverses the axis
/// order over the whole sweep; a final reversal restores it.
///
/// # Errors
///
/// `ShapeMismatch` if the number of factors differs from the rank of `x`, or if
/// a factor is not square with the length of the axis it acts on.
///
/// # Example
///
/// ```
/// use gsp_tensor::{Tensor2, Tensor3};
/// use gsp_tensor_ops::ops::tensor_product;
///
/// let x = Tensor3::<f64>::from_shape_val([4, 3, 2], 1.0);
/// let a0 = Tensor2::<f64>::from_shape_fn([2, 2], |[i, j]| if i == j { 2.0 } else { 0.0 });
/// let a1 = Tensor2::<f64>::from_shape_fn([3, 3], |[i, j]| if i == j { 3.0 } else { 0.0 });
/// let a2 = Tensor2::<f64>::from_shape_fn([4, 4], |[i, j]| if i == j { 5.0 } else { 0.0 });
/// let y = tensor_product(&x, &[a0, a1, a2]).unwrap();
/// assert_eq!(y.shape, [4, 3, 2]);
/// assert!(y.iter().all(|&v| v == 30.0));
/// ```
pub fn tensor_product<T, F, const N: usize>(
    x: &Tensor<T, N>,
    factors: &[F],
) -> Result<Tensor<T, N>, TensorOpsError>
where
    T: Zero + Copy + std::ops::Add<Output = T> + std::ops::Mul<Output = T>,
    F: Borrow<Tensor2<T>>,
{
    check_factors(x, factors)?;
    log::debug!("tensor_product: shape {:?}, {} factors", x.shape, factors.len());

    let mut acc = x.clone();
    for (i, a) in factors.iter().rev().enumerate() {
        let a: &Tensor2<T> = a.borrow();
        acc = contract_mode(a, &acc, i)?;
        log::trace!("tensor_product: contracted axis {i}, shape {:?}", acc.shape);
    }

    Ok(reversed_view(&acc).as_contiguous())
}

/// Apply the Kronecker sum of the factors to a tensor.
///
/// Computes `mat((A0 ⊕ A1 ⊕ ... ⊕ A_{N-1}) vec(X))` where the Kronecker sum is
/// `Σ_i I ⊗ ... ⊗ A_i ⊗ ... ⊗ I`, without forming it. Each factor is
/// contracted against the original `x` along its own axis, the new axis is
/// moved back into place, and the terms are summed.
///
/// For graph Laplacians `L0, ..., L_{N-1}` this is the Laplacian of the
/// Cartesian product graph applied to a signal.
///
/// # Errors
///
/// Same preconditions as [`tensor_product`].
pub fn tensor_product_of_sum<T, F, const N: usize>(
    x: &Tensor<T, N>,
    factors: &[F],
) -> Result<Tensor<T, N>, TensorOpsError>
where
    T: Zero + Copy + std::ops::Add<Output = T> + std::ops::Mul<Output = T>,
    F: Borrow<Tensor2<T>>,
{
    check_factors(x, factors)?;
    log::debug!(
        "tensor_product_of_sum: shape {:?}, {} factors",
        x.shape,
        factors.len()
    );

    let mut acc = Tensor::<T, N>::zeros(x.shape);
    for (i, a) in factors.iter().rev().enumerate() {
        let a: &Tensor2<T> = a.borrow();
        let contracted = contract_mode(a, x, i)?;

        // new axis sits at 0, put it back at position i
        let mut axes = [0; N];
        for (j, slot) in axes.iter_mut().enumerate() {
            *slot = match j.cmp(&i) {
                std::cmp::Ordering::Less => j + 1,
                std::cmp::Ordering::Equal => 0,
                std::cmp::Ordering::Greater => j,
            };
        }
        let term = contracted.permute_axes(axes)?;

        acc.as_slice_mut()
            .iter_mut()
            .zip(term.iter())
            .for_each(|(s, &v)| *s = *s + v);
        log::trace!("tensor_product_of_sum: accumulated axis {i}");
    }

    Ok(acc)
}

/// Materialise the Kronecker product of two matrices.
///
/// Meant for small operators and for checking the mode-wise routines; the
/// result has `(m·p) × (n·q)` entries.
///
/// # Example
///
/// ```
/// use gsp_tensor::Tensor2;
/// use gsp_tensor_ops::ops::kron;
///
/// let a = Tensor2::<i32>::from_shape_vec([2, 2], vec![1, 2, 3, 4]).unwrap();
/// let b = Tensor2::<i32>::from_shape_vec([1, 2], vec![0, 1]).unwrap();
/// let k = kron(&a, &b);
/// assert_eq!(k.shape, [2, 4]);
/// assert_eq!(k.as_slice(), &[0, 1, 0, 2, 0, 3, 0, 4]);
/// ```
pub fn kron<T>(a: &Tensor2<T>, b: &Tensor2<T>) -> Tensor2<T>
where
    T: Copy + std::ops::Mul<Output = T>,
{
    let [m, n] = a.shape;
    let [p, q] = b.shape;
    Tensor2::from_shape_fn([m * p, n * q], |[r, c]| {
        *a.get_unchecked([r / p, c / q]) * *b.get_unchecked([r % p, c % q])
    })
}

/// Create an `n × n` identity matrix.
pub fn eye<T>(n: usize) -> Tensor2<T>
where
    T: Zero + One,
{
    Tensor2::from_shape_fn([n, n], |[i, j]| if i == j { T::one() } else { T::zero() })
}

/// Multiply a matrix with a vector.
///
/// # Errors
///
/// If the number of columns of `a` differs from the length of `x`, an error is returned.
pub fn matvec<T>(a: &Tensor2<T>, x: &Tensor1<T>) -> Result<Tensor1<T>, TensorOpsError>
where
    T: Zero + Copy + std::ops::Add<Output = T> + std::ops::Mul<Output = T>,
{
    let [rows, cols] = a.shape;
    if cols != x.shape[0] {
        return Err(TensorOpsError::ShapeMismatch(vec![cols], x.shape.to_vec()));
    }
    let data = matmul_kernel(a.as_slice(), x.as_slice(), rows, cols, 1)?;
    Ok(Tensor1::from_shape_vec([rows], data)?)
}
