use num_traits::Zero;
use thiserror::Error;

use super::{storage::TensorStorage, view::TensorView};

/// An error type for tensor operations.
#[derive(Error, Debug, PartialEq)]
pub enum TensorError {
    /// Tensor shape does not match the provided data.
    ///
    /// The product of the shape dimensions must equal the number of elements exactly.
    #[error("Shape mismatch: expected {expected} elements for shape, but got {actual} elements in data")]
    InvalidShape {
        /// Expected number of elements based on shape
        expected: usize,
        /// Actual number of elements provided
        actual: usize,
    },

    /// An index or offset lies outside the tensor.
    #[error("Index {index} out of bounds for dimension of size {size}")]
    IndexOutOfBounds {
        /// The offending index
        index: usize,
        /// The size of the indexed dimension or buffer
        size: usize,
    },

    /// Two tensors taking part in one operation have incompatible shapes.
    #[error("Dimension mismatch: expected shape {expected:?}, got {actual:?}")]
    DimensionMismatch {
        /// Shape required by the operation
        expected: Vec<usize>,
        /// Shape that was supplied
        actual: Vec<usize>,
    },

    /// The axes passed to a permutation are not a permutation of `0..N`.
    #[error("Invalid permutation {0:?}: axes must be a permutation of 0..N")]
    InvalidPermutation(Vec<usize>),
}

impl TensorError {
    /// Create an InvalidShape error
    pub fn invalid_shape(expected: usize, actual: usize) -> Self {
        Self::InvalidShape { expected, actual }
    }

    /// Create an IndexOutOfBounds error
    pub fn index_out_of_bounds(index: usize, size: usize) -> Self {
        Self::IndexOutOfBounds { index, size }
    }

    /// Create a DimensionMismatch error
    pub fn dimension_mismatch(expected: &[usize], actual: &[usize]) -> Self {
        Self::DimensionMismatch {
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        }
    }
}

/// Computes the strides for a row-major (C-contiguous) tensor layout.
///
/// # Examples
///
/// ```rust
/// use gsp_tensor::tensor::get_strides_from_shape;
///
/// let strides = get_strides_from_shape([2, 3, 4]);
/// assert_eq!(strides, [12, 4, 1]);
/// ```
pub fn get_strides_from_shape<const N: usize>(shape: [usize; N]) -> [usize; N] {
    let mut strides: [usize; N] = [0; N];
    let mut stride = 1;
    for i in (0..shape.len()).rev() {
        strides[i] = stride;
        stride *= shape[i];
    }
    strides
}

/// A multi-dimensional array (tensor) with owned data.
///
/// The rank `N` is part of the type. An owned tensor always stores its
/// elements in row-major (C-contiguous) order; permuted or strided access goes
/// through a [`TensorView`].
///
/// Cloning a tensor is cheap: the buffer is reference counted and only copied
/// when one of the handles is mutated.
///
/// # Example
///
/// ```
/// use gsp_tensor::Tensor2;
///
/// let t = Tensor2::<f64>::from_shape_vec([2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
/// assert_eq!(t.ndim(), 2);
/// assert_eq!(t.get([1, 2]), Some(&6.0));
/// ```
#[derive(Debug)]
pub struct Tensor<T, const N: usize> {
    /// The storage of the tensor.
    pub storage: TensorStorage<T>,
    /// The shape of the tensor.
    pub shape: [usize; N],
    /// The strides of the tensor data in memory.
    pub strides: [usize; N],
}

impl<T, const N: usize> Tensor<T, N> {
    /// Returns the number of dimensions (axes) of the tensor.
    #[inline]
    pub const fn ndim(&self) -> usize {
        N
    }

    /// Get the data of the tensor as a slice, in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.storage.as_slice()
    }

    /// Get the data of the tensor as a mutable slice.
    ///
    /// Detaches the buffer first if it is shared with a clone.
    #[inline]
    pub fn as_slice_mut(&mut self) -> &mut [T]
    where
        T: Clone,
    {
        self.storage.as_mut_slice()
    }

    /// Get the data of the tensor as a pointer.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.storage.as_ptr()
    }

    /// Consumes the tensor and returns the underlying vector.
    pub fn into_vec(self) -> Vec<T>
    where
        T: Clone,
    {
        self.storage.into_vec()
    }

    /// Returns an iterator over the elements in row-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Creates a new `Tensor` with the given shape and data.
    ///
    /// # Errors
    ///
    /// If the number of elements in the data does not match the shape of the tensor, an error is returned.
    ///
    /// # Example
    ///
    /// ```
    /// use gsp_tensor::Tensor2;
    ///
    /// let t = Tensor2::<u8>::from_shape_vec([2, 2], vec![1, 2, 3, 4]).unwrap();
    /// assert_eq!(t.shape, [2, 2]);
    /// ```
    pub fn from_shape_vec(shape: [usize; N], data: Vec<T>) -> Result<Self, TensorError> {
        let numel = shape.iter().product::<usize>();
        if numel != data.len() {
            return Err(TensorError::invalid_shape(numel, data.len()));
        }
        let storage = TensorStorage::from_vec(data);
        let strides = get_strides_from_shape(shape);
        Ok(Self {
            storage,
            shape,
            strides,
        })
    }

    /// Creates a new `Tensor` with the given shape and slice of data.
    ///
    /// # Errors
    ///
    /// If the number of elements in the data does not match the shape of the tensor, an error is returned.
    pub fn from_shape_slice(shape: [usize; N], data: &[T]) -> Result<Self, TensorError>
    where
        T: Clone,
    {
        Self::from_shape_vec(shape, data.to_vec())
    }

    /// Creates a new `Tensor` with the given shape filled with `value`.
    ///
    /// # Example
    ///
    /// ```
    /// use gsp_tensor::Tensor3;
    ///
    /// let t = Tensor3::<u8>::from_shape_val([2, 1, 3], 2);
    /// assert_eq!(t.as_slice(), vec![2, 2, 2, 2, 2, 2]);
    /// ```
    pub fn from_shape_val(shape: [usize; N], value: T) -> Self
    where
        T: Clone,
    {
        let numel = shape.iter().product::<usize>();
        Self {
            storage: TensorStorage::from_vec(vec![value; numel]),
            shape,
            strides: get_strides_from_shape(shape),
        }
    }

    /// Create a new `Tensor` with the given shape and a function to generate the data.
    ///
    /// The function `f` is called with the index of each element, in row-major order.
    ///
    /// # Example
    ///
    /// ```
    /// use gsp_tensor::Tensor2;
    ///
    /// let t = Tensor2::<u8>::from_shape_fn([2, 2], |[i, j]| (i * 2 + j) as u8);
    /// assert_eq!(t.as_slice(), vec![0, 1, 2, 3]);
    /// ```
    pub fn from_shape_fn<F>(shape: [usize; N], f: F) -> Self
    where
        F: Fn([usize; N]) -> T,
    {
        let numel = shape.iter().product::<usize>();
        let data: Vec<T> = (0..numel)
            .map(|i| {
                let mut index = [0; N];
                let mut j = i;
                for k in (0..N).rev() {
                    index[k] = j % shape[k];
                    j /= shape[k];
                }
                f(index)
            })
            .collect();
        Self {
            storage: TensorStorage::from_vec(data),
            shape,
            strides: get_strides_from_shape(shape),
        }
    }

    /// Creates a new `Tensor` filled with zeros.
    pub fn zeros(shape: [usize; N]) -> Self
    where
        T: Zero + Clone,
    {
        Self::from_shape_val(shape, T::zero())
    }

    /// Returns the number of elements in the tensor.
    #[inline]
    pub fn numel(&self) -> usize {
        self.storage.len()
    }

    /// Get the offset of the element at the given index, or `None` if the
    /// index is out of bounds.
    pub fn get_iter_offset(&self, index: [usize; N]) -> Option<usize> {
        let mut offset = 0;
        for ((&idx, dim_size), stride) in index.iter().zip(self.shape).zip(self.strides) {
            if idx >= dim_size {
                return None;
            }
            offset += idx * stride;
        }
        Some(offset)
    }

    /// Get the offset of the element at the given index without checking dim sizes.
    pub fn get_iter_offset_unchecked(&self, index: [usize; N]) -> usize {
        index
            .iter()
            .zip(self.strides)
            .fold(0, |acc, (&idx, stride)| acc + idx * stride)
    }

    /// Get the index of the element at the given offset without checking
    /// bounds. The reverse of [`Self::get_iter_offset_unchecked`].
    pub fn get_index_unchecked(&self, offset: usize) -> [usize; N] {
        let mut idx = [0; N];
        let mut rem = offset;
        for (dim_i, &s) in self.strides.iter().enumerate() {
            if s == 0 {
                continue;
            }
            idx[dim_i] = rem / s;
            rem %= s;
        }
        idx
    }

    /// Get the index of the element at the given offset.
    ///
    /// # Errors
    ///
    /// If the offset is out of bounds (>= numel), an error is returned.
    pub fn get_index(&self, offset: usize) -> Result<[usize; N], TensorError> {
        let numel = self.numel();
        if offset >= numel {
            return Err(TensorError::index_out_of_bounds(offset, numel));
        }
        Ok(self.get_index_unchecked(offset))
    }

    /// Get the element at the given index without checking if the index is out of bounds.
    ///
    /// # Panics
    ///
    /// Panics if the computed offset lies outside the buffer.
    pub fn get_unchecked(&self, index: [usize; N]) -> &T {
        let offset = self.get_iter_offset_unchecked(index);
        &self.as_slice()[offset]
    }

    /// Get the element at the given index, checking if the index is out of bounds.
    ///
    /// # Example
    ///
    /// ```
    /// use gsp_tensor::Tensor2;
    ///
    /// let t = Tensor2::<u8>::from_shape_vec([2, 2], vec![1, 2, 3, 4]).unwrap();
    /// assert_eq!(t.get([1, 0]), Some(&3));
    /// assert!(t.get([2, 0]).is_none());
    /// ```
    pub fn get(&self, index: [usize; N]) -> Option<&T> {
        self.get_iter_offset(index)
            .and_then(|offset| self.as_slice().get(offset))
    }

    /// Reshape the tensor to a new row-major shape without copying.
    ///
    /// # Errors
    ///
    /// If the number of elements of the new shape differs, an error is returned.
    ///
    /// # Example
    ///
    /// ```
    /// use gsp_tensor::Tensor1;
    ///
    /// let t = Tensor1::<u8>::from_shape_vec([4], vec![1, 2, 3, 4]).unwrap();
    /// let view = t.reshape([2, 2]).unwrap();
    /// assert_eq!(view.shape, [2, 2]);
    /// assert_eq!(*view.get_unchecked([1, 0]), 3);
    /// ```
    pub fn reshape<const M: usize>(
        &self,
        shape: [usize; M],
    ) -> Result<TensorView<'_, T, M>, TensorError> {
        let numel = shape.iter().product::<usize>();
        if numel != self.numel() {
            return Err(TensorError::invalid_shape(numel, self.numel()));
        }
        Ok(TensorView {
            storage: &self.storage,
            offset: 0,
            shape,
            strides: get_strides_from_shape(shape),
        })
    }

    /// Permute the axes of the tensor without copying.
    ///
    /// Axis `i` of the returned view is axis `axes[i]` of the tensor, the same
    /// convention as numpy's `transpose`.
    ///
    /// # Errors
    ///
    /// If `axes` is not a permutation of `0..N`, an error is returned.
    ///
    /// # Example
    ///
    /// ```
    /// use gsp_tensor::Tensor2;
    ///
    /// let t = Tensor2::<u8>::from_shape_vec([2, 3], vec![1, 2, 3, 4, 5, 6]).unwrap();
    /// let transposed = t.permute_axes([1, 0]).unwrap().as_contiguous();
    /// assert_eq!(transposed.shape, [3, 2]);
    /// assert_eq!(transposed.as_slice(), &[1, 4, 2, 5, 3, 6]);
    /// ```
    pub fn permute_axes(&self, axes: [usize; N]) -> Result<TensorView<'_, T, N>, TensorError> {
        let mut seen = [false; N];
        for &axis in axes.iter() {
            if axis >= N || seen[axis] {
                return Err(TensorError::InvalidPermutation(axes.to_vec()));
            }
            seen[axis] = true;
        }

        let mut shape = [0; N];
        let mut strides = [0; N];
        for (i, &axis) in axes.iter().enumerate() {
            shape[i] = self.shape[axis];
            strides[i] = self.strides[axis];
        }

        Ok(TensorView {
            storage: &self.storage,
            offset: 0,
            shape,
            strides,
        })
    }

    /// Return a view over the whole tensor.
    pub fn view(&self) -> TensorView<'_, T, N> {
        TensorView {
            storage: &self.storage,
            offset: 0,
            shape: self.shape,
            strides: self.strides,
        }
    }

    /// Apply a function to each element of the tensor.
    ///
    /// # Example
    ///
    /// ```
    /// use gsp_tensor::Tensor1;
    ///
    /// let t = Tensor1::<f64>::from_shape_vec([3], vec![1.0, 2.0, 3.0]).unwrap();
    /// let doubled = t.map(|x| x * 2.0);
    /// assert_eq!(doubled.as_slice(), &[2.0, 4.0, 6.0]);
    /// ```
    pub fn map<U, F>(&self, f: F) -> Tensor<U, N>
    where
        F: Fn(&T) -> U,
    {
        let data: Vec<U> = self.as_slice().iter().map(f).collect();
        Tensor {
            storage: TensorStorage::from_vec(data),
            shape: self.shape,
            strides: self.strides,
        }
    }

    /// Apply a binary function element-wise to two tensors of the same shape.
    ///
    /// # Errors
    ///
    /// If the shapes of the tensors differ, an error is returned.
    pub fn element_wise_op<F>(&self, other: &Tensor<T, N>, op: F) -> Result<Tensor<T, N>, TensorError>
    where
        F: Fn(&T, &T) -> T,
    {
        if self.shape != other.shape {
            return Err(TensorError::dimension_mismatch(&self.shape, &other.shape));
        }

        let data = self
            .as_slice()
            .iter()
            .zip(other.as_slice().iter())
            .map(|(a, b)| op(a, b))
            .collect();

        Ok(Tensor {
            storage: TensorStorage::from_vec(data),
            shape: self.shape,
            strides: self.strides,
        })
    }

    /// Add another tensor of the same shape to this one in place.
    ///
    /// # Errors
    ///
    /// If the shapes of the tensors differ, an error is returned.
    pub fn add_inplace(&mut self, other: &Tensor<T, N>) -> Result<(), TensorError>
    where
        T: std::ops::AddAssign + Clone,
    {
        if self.shape != other.shape {
            return Err(TensorError::dimension_mismatch(&self.shape, &other.shape));
        }

        self.as_slice_mut()
            .iter_mut()
            .zip(other.as_slice().iter())
            .for_each(|(a, b)| *a += b.clone());

        Ok(())
    }
}

impl<T, const N: usize> Clone for Tensor<T, N> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            shape: self.shape,
            strides: self.strides,
        }
    }
}

impl<T, const N: usize> std::fmt::Display for Tensor<T, N>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn write_level<T: std::fmt::Display>(
            f: &mut std::fmt::Formatter<'_>,
            data: &[T],
            shape: &[usize],
            depth: usize,
        ) -> std::fmt::Result {
            let Some((&len, rest)) = shape.split_first() else {
                return match data.first() {
                    Some(v) => write!(f, "{v:.4}"),
                    None => Ok(()),
                };
            };
            let chunk = rest.iter().product::<usize>();
            write!(f, "[")?;
            for i in 0..len {
                if i > 0 {
                    if rest.is_empty() {
                        write!(f, ", ")?;
                    } else {
                        write!(f, ",\n{}", " ".repeat(depth + 1))?;
                    }
                }
                write_level(f, &data[i * chunk..(i + 1) * chunk], rest, depth + 1)?;
            }
            write!(f, "]")
        }

        write_level(f, self.as_slice(), &self.shape, 0)
    }
}

#[cfg(test)]
mod tests {
    use crate::tensor::TensorError;
    use crate::{Tensor, Tensor1, Tensor2, Tensor3};

    #[test]
    fn constructor_1d() -> Result<(), TensorError> {
        let data: Vec<u8> = vec![1];
        let t = Tensor1::<u8>::from_shape_vec([1], data)?;
        assert_eq!(t.shape, [1]);
        assert_eq!(t.as_slice(), vec![1]);
        assert_eq!(t.strides, [1]);
        assert_eq!(t.numel(), 1);
        assert_eq!(t.ndim(), 1);
        Ok(())
    }

    #[test]
    fn constructor_2d() -> Result<(), TensorError> {
        let data: Vec<u8> = vec![1, 2];
        let t = Tensor2::<u8>::from_shape_vec([1, 2], data)?;
        assert_eq!(t.shape, [1, 2]);
        assert_eq!(t.as_slice(), vec![1, 2]);
        assert_eq!(t.strides, [2, 1]);
        assert_eq!(t.numel(), 2);
        Ok(())
    }

    #[test]
    fn constructor_invalid_shape() {
        let res = Tensor2::<u8>::from_shape_vec([2, 3], vec![1, 2, 3, 4, 5]);
        assert_eq!(res.unwrap_err(), TensorError::invalid_shape(6, 5));
    }

    #[test]
    fn constructor_scalar() -> Result<(), TensorError> {
        let t = Tensor::<f64, 0>::from_shape_vec([], vec![3.5])?;
        assert_eq!(t.numel(), 1);
        assert_eq!(t.get([]), Some(&3.5));
        assert_eq!(t.to_string(), "3.5000");
        Ok(())
    }

    #[test]
    fn get_2d() -> Result<(), TensorError> {
        let data: Vec<u8> = vec![1, 2, 3, 4];
        let t = Tensor2::<u8>::from_shape_vec([2, 2], data)?;
        assert_eq!(t.get([0, 0]), Some(&1));
        assert_eq!(t.get([0, 1]), Some(&2));
        assert_eq!(t.get([1, 0]), Some(&3));
        assert_eq!(t.get([1, 1]), Some(&4));
        assert!(t.get([2, 0]).is_none());
        assert!(t.get([0, 2]).is_none());
        Ok(())
    }

    #[test]
    fn get_3d() -> Result<(), TensorError> {
        let data: Vec<u8> = vec![1, 2, 3, 4, 5, 6];
        let t = Tensor3::<u8>::from_shape_vec([2, 1, 3], data)?;
        assert_eq!(t.get([0, 0, 2]), Some(&3));
        assert_eq!(t.get([1, 0, 0]), Some(&4));
        assert_eq!(*t.get_unchecked([1, 0, 2]), 6);
        assert!(t.get([0, 1, 0]).is_none());
        Ok(())
    }

    #[test]
    fn get_index_roundtrip() -> Result<(), TensorError> {
        let t = Tensor3::<u8>::zeros([2, 3, 4]);
        for offset in 0..t.numel() {
            let index = t.get_index(offset)?;
            assert_eq!(t.get_iter_offset(index), Some(offset));
        }
        assert_eq!(t.get_index(24), Err(TensorError::index_out_of_bounds(24, 24)));
        Ok(())
    }

    #[test]
    fn reshape_1d() -> Result<(), TensorError> {
        let data: Vec<u8> = vec![1, 2, 3, 4];
        let t = Tensor1::<u8>::from_shape_vec([4], data)?;

        let view = t.reshape([2, 2])?;

        assert_eq!(view.shape, [2, 2]);
        assert_eq!(view.strides, [2, 1]);
        assert_eq!(view.numel(), 4);
        assert_eq!(view.as_contiguous().as_slice(), vec![1, 2, 3, 4]);
        assert!(t.reshape([3, 2]).is_err());
        Ok(())
    }

    #[test]
    fn permute_3d() -> Result<(), TensorError> {
        let t = Tensor3::<u8>::from_shape_fn([2, 3, 4], |[i, j, k]| (i * 100 + j * 10 + k) as u8);
        let permuted = t.permute_axes([2, 0, 1])?.as_contiguous();
        assert_eq!(permuted.shape, [4, 2, 3]);
        assert_eq!(permuted.get([3, 1, 2]), Some(&123));
        assert_eq!(permuted.get([0, 1, 0]), Some(&100));
        Ok(())
    }

    #[test]
    fn permute_invalid() {
        let t = Tensor3::<u8>::zeros([2, 3, 4]);
        assert_eq!(
            t.permute_axes([0, 0, 1]).err(),
            Some(TensorError::InvalidPermutation(vec![0, 0, 1]))
        );
        assert!(t.permute_axes([0, 1, 3]).is_err());
    }

    #[test]
    fn map_and_element_wise() -> Result<(), TensorError> {
        let a = Tensor2::<f64>::from_shape_vec([2, 2], vec![1.0, 2.0, 3.0, 4.0])?;
        let b = a.map(|x| x * 10.0);
        let c = a.element_wise_op(&b, |x, y| x + y)?;
        assert_eq!(c.as_slice(), &[11.0, 22.0, 33.0, 44.0]);

        let d = Tensor2::<f64>::zeros([2, 3]);
        assert_eq!(
            a.element_wise_op(&d, |x, y| x + y).unwrap_err(),
            TensorError::dimension_mismatch(&[2, 2], &[2, 3])
        );
        Ok(())
    }

    #[test]
    fn add_inplace_detaches_shared_storage() -> Result<(), TensorError> {
        let mut a = Tensor1::<i32>::from_shape_vec([3], vec![1, 2, 3])?;
        let snapshot = a.clone();
        a.add_inplace(&snapshot)?;
        assert_eq!(a.as_slice(), &[2, 4, 6]);
        assert_eq!(snapshot.as_slice(), &[1, 2, 3]);
        Ok(())
    }

    #[test]
    fn display_2d() -> Result<(), TensorError> {
        let t = Tensor2::<f64>::from_shape_vec([2, 2], vec![1.0, 2.0, 3.0, 4.0])?;
        assert_eq!(t.to_string(), "[[1.0000, 2.0000],\n [3.0000, 4.0000]]");
        Ok(())
    }
}
