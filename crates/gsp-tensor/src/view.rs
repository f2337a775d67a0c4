use crate::{get_strides_from_shape, storage::TensorStorage, Tensor, TensorError};

/// A non-owning view into tensor data.
///
/// A view borrows a [`TensorStorage`] and addresses it through its own
/// offset, shape and strides. Reshapes, axis permutations and arbitrary
/// strided windows are all views; nothing is copied until
/// [`TensorView::as_contiguous`] is called.
///
/// # Examples
///
/// ```rust
/// use gsp_tensor::Tensor2;
///
/// let data = vec![1, 2, 3, 4];
/// let tensor = Tensor2::<i32>::from_shape_vec([2, 2], data).unwrap();
///
/// // Permute creates a non-contiguous view
/// let view = tensor.permute_axes([1, 0]).unwrap();
///
/// // Convert to an owned contiguous tensor
/// let contiguous = view.as_contiguous();
/// assert_eq!(contiguous.as_slice(), &[1, 3, 2, 4]);
/// ```
pub struct TensorView<'a, T, const N: usize> {
    /// Reference to the storage held by another tensor.
    pub storage: &'a TensorStorage<T>,

    /// Offset of the first element of the view in the storage.
    pub offset: usize,

    /// The shape of the tensor view.
    pub shape: [usize; N],

    /// The strides for accessing elements in the view.
    pub strides: [usize; N],
}

impl<'a, T, const N: usize> TensorView<'a, T, N> {
    /// Creates an arbitrary strided window into a storage buffer.
    ///
    /// This is the equivalent of numpy's `as_strided`, with the difference
    /// that the window is checked against the buffer length up front.
    ///
    /// # Errors
    ///
    /// If the last element addressed by the window lies outside the buffer, an
    /// error is returned.
    ///
    /// # Example
    ///
    /// ```rust
    /// use gsp_tensor::{Tensor1, TensorView};
    ///
    /// let t = Tensor1::<u8>::from_shape_vec([6], vec![0, 1, 2, 3, 4, 5]).unwrap();
    /// // every second element, starting from the second
    /// let odd = TensorView::as_strided(&t.storage, 1, [3], [2]).unwrap();
    /// assert_eq!(odd.iter().copied().collect::<Vec<_>>(), vec![1, 3, 5]);
    ///
    /// assert!(TensorView::as_strided(&t.storage, 1, [4], [2]).is_err());
    /// ```
    pub fn as_strided(
        storage: &'a TensorStorage<T>,
        offset: usize,
        shape: [usize; N],
        strides: [usize; N],
    ) -> Result<Self, TensorError> {
        if shape.iter().all(|&s| s > 0) {
            let last = shape
                .iter()
                .zip(strides.iter())
                .fold(offset, |acc, (&s, &st)| acc + (s - 1) * st);
            if last >= storage.len() {
                return Err(TensorError::index_out_of_bounds(last, storage.len()));
            }
        }

        Ok(Self {
            storage,
            offset,
            shape,
            strides,
        })
    }

    /// Returns the whole underlying storage slice.
    ///
    /// This is not restricted to the elements visible through the view; use
    /// [`iter`](Self::iter) for element-wise access respecting the layout.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.storage.as_slice()
    }

    /// Returns a raw pointer to the underlying storage.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.storage.as_ptr()
    }

    /// Returns the number of elements addressed by the view.
    #[inline]
    pub fn numel(&self) -> usize {
        self.shape.iter().product()
    }

    /// Returns true if the view addresses its elements in row-major order
    /// without gaps.
    pub fn is_standard_layout(&self) -> bool {
        self.shape
            .iter()
            .zip(get_strides_from_shape(self.shape))
            .zip(self.strides)
            .all(|((&size, expected), actual)| size <= 1 || expected == actual)
    }

    /// Gets the element at the given index without checking it against the
    /// view's shape.
    ///
    /// # Panics
    ///
    /// Panics if the computed offset lies outside the storage.
    pub fn get_unchecked(&self, index: [usize; N]) -> &'a T {
        let offset = index
            .iter()
            .zip(self.strides.iter())
            .fold(self.offset, |acc, (i, s)| acc + i * s);
        &self.storage.as_slice()[offset]
    }

    /// Gets the element at the given index, or `None` if it lies outside the view.
    pub fn get(&self, index: [usize; N]) -> Option<&'a T> {
        if index.iter().zip(self.shape.iter()).any(|(i, s)| i >= s) {
            return None;
        }
        Some(self.get_unchecked(index))
    }

    /// Returns an iterator over the elements of the view in logical row-major order.
    pub fn iter(&self) -> ViewIter<'_, 'a, T, N> {
        ViewIter {
            view: self,
            index: [0; N],
            remaining: self.numel(),
        }
    }

    /// Converts the view to an owned tensor with contiguous memory layout.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gsp_tensor::Tensor2;
    ///
    /// let data = vec![1, 2, 3, 4, 5, 6];
    /// let tensor = Tensor2::<i32>::from_shape_vec([2, 3], data).unwrap();
    ///
    /// let transposed = tensor.permute_axes([1, 0]).unwrap();
    /// let contiguous = transposed.as_contiguous();
    /// assert_eq!(contiguous.as_slice(), &[1, 4, 2, 5, 3, 6]);
    /// ```
    pub fn as_contiguous(&self) -> Tensor<T, N>
    where
        T: Clone,
    {
        let data: Vec<T> = self.iter().cloned().collect();
        Tensor {
            storage: TensorStorage::from_vec(data),
            shape: self.shape,
            strides: get_strides_from_shape(self.shape),
        }
    }
}

/// Row-major iterator over the elements of a [`TensorView`].
pub struct ViewIter<'v, 'a, T, const N: usize> {
    view: &'v TensorView<'a, T, N>,
    index: [usize; N],
    remaining: usize,
}

impl<'a, T, const N: usize> Iterator for ViewIter<'_, 'a, T, N> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let value = self.view.get_unchecked(self.index);
        self.remaining -= 1;

        for k in (0..N).rev() {
            self.index[k] += 1;
            if self.index[k] < self.view.shape[k] {
                break;
            }
            self.index[k] = 0;
        }

        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, const N: usize> ExactSizeIterator for ViewIter<'_, '_, T, N> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tensor_view_from_vec() -> Result<(), TensorError> {
        let storage = TensorStorage::from_vec(vec![1u8, 2, 3, 4, 5, 6, 7, 8]);

        let view = TensorView::<u8, 1>::as_strided(&storage, 0, [8], [1])?;

        assert_eq!(view.numel(), 8);
        assert!(!view.as_ptr().is_null());
        assert!(view.is_standard_layout());

        let data = view.as_slice();
        assert_eq!(data.len(), 8);
        assert_eq!(data[0], 1);
        assert_eq!(data[7], 8);

        assert_eq!(view.get_unchecked([0]), &1);
        assert_eq!(view.get_unchecked([3]), &4);
        assert_eq!(view.get_unchecked([7]), &8);
        assert_eq!(view.get([8]), None);

        Ok(())
    }

    #[test]
    fn test_as_strided_diagonal() -> Result<(), TensorError> {
        let t = Tensor::<u8, 2>::from_shape_fn([3, 3], |[i, j]| (i * 3 + j) as u8);
        let diagonal = TensorView::as_strided(&t.storage, 0, [3], [4])?;
        assert_eq!(diagonal.iter().copied().collect::<Vec<_>>(), vec![0, 4, 8]);
        assert!(!diagonal.is_standard_layout());
        Ok(())
    }

    #[test]
    fn test_as_strided_out_of_bounds() {
        let storage = TensorStorage::from_vec(vec![0u8; 4]);
        let res = TensorView::as_strided(&storage, 2, [2, 2], [1, 1]);
        assert_eq!(res.err(), Some(TensorError::index_out_of_bounds(4, 4)));
    }

    #[test]
    fn test_as_strided_empty_window() -> Result<(), TensorError> {
        let storage = TensorStorage::from_vec(Vec::<f64>::new());
        let view = TensorView::as_strided(&storage, 0, [0, 3], [3, 1])?;
        assert_eq!(view.numel(), 0);
        assert_eq!(view.iter().count(), 0);
        Ok(())
    }

    #[test]
    fn test_iter_permuted() -> Result<(), TensorError> {
        let t = Tensor::<i32, 2>::from_shape_vec([2, 3], vec![1, 2, 3, 4, 5, 6])?;
        let view = t.permute_axes([1, 0])?;
        assert_eq!(view.iter().len(), 6);
        assert_eq!(view.iter().copied().collect::<Vec<_>>(), vec![1, 4, 2, 5, 3, 6]);
        Ok(())
    }
}
