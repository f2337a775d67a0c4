//! Pointwise filter responses.
//!
//! The four smooth families depend on the eigenvalue and the parameter only
//! through their product `x = β·λ` (or `x = Σ_i β_i·λ_i` for product graphs),
//! so they are written as functions of `x`. The band-limited family is not,
//! and has dedicated univariate and multivariate forms.

use num_traits::Float;

use crate::kind::FilterKind;

/// `(1 + x)^-1`
#[inline]
pub fn random_walk<T: Float>(x: T) -> T {
    (T::one() + x).recip()
}

/// `exp(-x)`
#[inline]
pub fn diffusion<T: Float>(x: T) -> T {
    (-x).exp()
}

/// `max(1 - x, 0)`, propagating NaN.
#[inline]
pub fn relu<T: Float>(x: T) -> T {
    let y = T::one() - x;
    if y < T::zero() {
        T::zero()
    } else {
        y
    }
}

/// `2·exp(-x) / (1 + exp(-x))`, evaluated as `2 / (1 + exp(x))`.
#[inline]
pub fn sigmoid<T: Float>(x: T) -> T {
    let two = T::one() + T::one();
    two / (T::one() + x.exp())
}

/// 1 where `λ ≤ 1/β`, 0 elsewhere; `β = 0` passes everything.
#[inline]
pub fn bandlimited<T: Float>(lam: T, beta: T) -> T {
    if beta == T::zero() || lam <= beta.recip() {
        T::one()
    } else {
        T::zero()
    }
}

/// 1 where every factor satisfies `β_i·λ_i < 1`, 0 elsewhere.
#[inline]
pub fn bandlimited_multivariate<T: Float>(lams: &[T], betas: &[T]) -> T {
    if lams.iter().zip(betas).all(|(&l, &b)| b * l < T::one()) {
        T::one()
    } else {
        T::zero()
    }
}

/// Response of a builtin family at one eigenvalue.
pub fn univariate<T: Float>(kind: FilterKind, lam: T, beta: T) -> T {
    match kind {
        FilterKind::RandomWalk => random_walk(beta * lam),
        FilterKind::Diffusion => diffusion(beta * lam),
        FilterKind::ReLu => relu(beta * lam),
        FilterKind::Sigmoid => sigmoid(beta * lam),
        FilterKind::Bandlimited => bandlimited(lam, beta),
    }
}

/// Response of a builtin family at one point of the product spectrum.
///
/// `lams` and `betas` are expected to have the same length.
pub fn multivariate<T: Float>(kind: FilterKind, lams: &[T], betas: &[T]) -> T {
    let x = || {
        lams.iter()
            .zip(betas)
            .fold(T::zero(), |acc, (&l, &b)| acc + b * l)
    };
    match kind {
        FilterKind::RandomWalk => random_walk(x()),
        FilterKind::Diffusion => diffusion(x()),
        FilterKind::ReLu => relu(x()),
        FilterKind::Sigmoid => sigmoid(x()),
        FilterKind::Bandlimited => bandlimited_multivariate(lams, betas),
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_smooth_families_at_zero() {
        for kind in [
            FilterKind::RandomWalk,
            FilterKind::Diffusion,
            FilterKind::ReLu,
            FilterKind::Sigmoid,
        ] {
            for beta in [0.0, 0.3, 1.5, 10.0] {
                assert_eq!(univariate(kind, 0.0f64, beta), 1.0, "{kind} with beta {beta}");
                assert_eq!(multivariate(kind, &[0.0f64, 0.0], &[beta, 2.0]), 1.0);
            }
        }
    }

    #[test]
    fn test_random_walk_value() {
        assert_relative_eq!(univariate(FilterKind::RandomWalk, 2.0f64, 1.5), 0.25);
        assert_relative_eq!(univariate(FilterKind::RandomWalk, 3.0f32, 1.0), 0.25);
    }

    #[test]
    fn test_sigmoid_matches_definition() {
        for x in [-3.0f64, -0.5, 0.0, 0.7, 4.0] {
            let e = (-x).exp();
            assert_relative_eq!(sigmoid(x), 2.0 * e / (1.0 + e), max_relative = 1e-12);
        }
        // large negative arguments saturate instead of producing NaN
        assert_relative_eq!(sigmoid(-1000.0f64), 2.0);
        assert_eq!(sigmoid(1000.0f64), 0.0);
    }

    #[test]
    fn test_relu() {
        assert_eq!(relu(0.25f64), 0.75);
        assert_eq!(relu(2.0f64), 0.0);
        assert!(relu(f64::NAN).is_nan());
    }

    #[test]
    fn test_bandlimited() {
        assert_eq!(bandlimited(1.0f64, 1.0), 1.0);
        assert_eq!(bandlimited(1.01f64, 1.0), 0.0);
        assert_eq!(bandlimited(1e9f64, 0.0), 1.0);

        // strict inequality per factor, zero parameters always pass
        assert_eq!(bandlimited_multivariate(&[0.5f64, 0.9], &[1.0, 1.0]), 1.0);
        assert_eq!(bandlimited_multivariate(&[0.5f64, 1.0], &[1.0, 1.0]), 0.0);
        assert_eq!(bandlimited_multivariate(&[1e9f64, 0.1], &[0.0, 1.0]), 1.0);
    }

    #[test]
    fn test_multivariate_sums_arguments() {
        let lams = [0.5f64, 1.0, 2.0];
        let betas = [1.0, 2.0, 0.25];
        assert_relative_eq!(multivariate(FilterKind::RandomWalk, &lams, &betas), 1.0 / 4.0);
        assert_relative_eq!(multivariate(FilterKind::Diffusion, &lams, &betas), (-3.0f64).exp());
        assert_eq!(multivariate(FilterKind::ReLu, &lams, &betas), 0.0);
    }
}
