use num_traits::Zero;

use crate::error::TensorOpsError;

/// Multiplies two row-major matrices stored in slices.
///
/// Computes `C = A · B` where `A` is `m × k` and `B` is `k × n`. The result is
/// returned as a row-major `m × n` buffer.
///
/// # Errors
///
/// If a slice length does not match its declared dimensions, a `LengthMismatch` error is returned.
///
/// Example:
/// ```
/// use gsp_tensor_ops::kernels::matmul_kernel;
///
/// let a = [1.0, 2.0, 3.0, 4.0];
/// let b = [5.0, 6.0];
/// let c = matmul_kernel(&a, &b, 2, 2, 1).unwrap();
/// assert_eq!(c, vec![17.0, 39.0]);
/// ```
pub fn matmul_kernel<T>(
    a: &[T],
    b: &[T],
    m: usize,
    k: usize,
    n: usize,
) -> Result<Vec<T>, TensorOpsError>
where
    T: Zero + Copy + std::ops::Add<Output = T> + std::ops::Mul<Output = T>,
{
    if a.len() != m * k {
        return Err(TensorOpsError::LengthMismatch(m * k, a.len()));
    }
    if b.len() != k * n {
        return Err(TensorOpsError::LengthMismatch(k * n, b.len()));
    }

    let mut c = vec![T::zero(); m * n];
    if n == 0 {
        return Ok(c);
    }

    // i-p-j order keeps the inner loop on contiguous rows of B and C
    for (a_row, c_row) in a.chunks_exact(k.max(1)).zip(c.chunks_exact_mut(n)) {
        for (&a_ip, b_row) in a_row.iter().zip(b.chunks_exact(n)) {
            for (c_ij, &b_pj) in c_row.iter_mut().zip(b_row.iter()) {
                *c_ij = *c_ij + a_ip * b_pj;
            }
        }
    }

    Ok(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matmul_kernel_2x3_3x2() -> Result<(), TensorOpsError> {
        let a = [1, 2, 3, 4, 5, 6];
        let b = [7, 8, 9, 10, 11, 12];
        let c = matmul_kernel(&a, &b, 2, 3, 2)?;
        assert_eq!(c, vec![58, 64, 139, 154]);
        Ok(())
    }

    #[test]
    fn test_matmul_kernel_length_mismatch() {
        let a = [1.0, 2.0, 3.0];
        let b = [1.0, 2.0];
        let res = matmul_kernel(&a, &b, 2, 2, 1);
        assert!(matches!(res, Err(TensorOpsError::LengthMismatch(4, 3))));
    }

    #[test]
    fn test_matmul_kernel_empty_inner_dim() -> Result<(), TensorOpsError> {
        let a: [f64; 0] = [];
        let b: [f64; 0] = [];
        let c = matmul_kernel(&a, &b, 2, 0, 3)?;
        assert_eq!(c, vec![0.0; 6]);
        Ok(())
    }
}
