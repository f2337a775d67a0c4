//! Arc-based storage management for zero-copy views and cheap sharing.
//!
//! Clones of a [`TensorStorage`] share the same buffer. Mutable access
//! detaches the buffer first when it is shared (copy-on-write).

use std::sync::Arc;

/// Reference-counted tensor buffer.
///
/// # Thread Safety
///
/// `TensorStorage` is `Send + Sync` when `T: Send + Sync`.
pub struct TensorStorage<T> {
    inner: Arc<Vec<T>>,
}

impl<T> TensorStorage<T> {
    /// Creates a new storage taking ownership of the vector.
    pub fn from_vec(data: Vec<T>) -> Self {
        Self {
            inner: Arc::new(data),
        }
    }

    /// Returns the pointer to the first element of the buffer.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.inner.as_ptr()
    }

    /// Returns the storage data as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.inner.as_slice()
    }

    /// Returns the storage data as a mutable slice.
    ///
    /// If the buffer is shared with other tensors it is cloned first, so the
    /// mutation is never observed through the other handles.
    pub fn as_mut_slice(&mut self) -> &mut [T]
    where
        T: Clone,
    {
        Arc::make_mut(&mut self.inner).as_mut_slice()
    }

    /// Returns the number of elements in the buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if the buffer holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns true if no other handle shares this buffer.
    #[inline]
    pub fn is_unique(&self) -> bool {
        Arc::strong_count(&self.inner) == 1
    }

    /// Consumes the storage and returns the underlying vector.
    ///
    /// The buffer is moved out when uniquely owned and cloned otherwise.
    pub fn into_vec(self) -> Vec<T>
    where
        T: Clone,
    {
        Arc::try_unwrap(self.inner).unwrap_or_else(|shared| shared.as_ref().clone())
    }
}

impl<T> Clone for TensorStorage<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> std::fmt::Debug for TensorStorage<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TensorStorage")
            .field("len", &self.len())
            .field("shared", &!self.is_unique())
            .finish()
    }
}
