use approx::assert_relative_eq;
use rand::{rngs::StdRng, Rng, SeedableRng};

use gsp::filters::{FilterFunction, FilterKind, MultivariateFilterFunction};
use gsp::tensor::Tensor2;
use gsp::tensor_ops::{ops::contract_mode, tensor_product, tensor_product_of_sum};

type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Laplacian, eigenvalues and orthonormal eigenvectors (as columns) of the 4-cycle.
fn cycle4() -> Result<(Tensor2<f64>, Vec<f64>, Tensor2<f64>), Box<dyn std::error::Error>> {
    let laplacian = Tensor2::from_shape_vec(
        [4, 4],
        vec![
            2.0, -1.0, 0.0, -1.0, //
            -1.0, 2.0, -1.0, 0.0, //
            0.0, -1.0, 2.0, -1.0, //
            -1.0, 0.0, -1.0, 2.0,
        ],
    )?;
    let h = 0.5;
    let r = std::f64::consts::FRAC_1_SQRT_2;
    let eigenvectors = Tensor2::from_shape_vec(
        [4, 4],
        vec![
            h, r, 0.0, h, //
            h, 0.0, r, -h, //
            h, -r, 0.0, h, //
            h, 0.0, -r, -h,
        ],
    )?;
    Ok((laplacian, vec![0.0, 2.0, 2.0, 4.0], eigenvectors))
}

/// Laplacian, eigenvalues and orthonormal eigenvectors of a single edge.
fn edge() -> Result<(Tensor2<f64>, Vec<f64>, Tensor2<f64>), Box<dyn std::error::Error>> {
    let laplacian = Tensor2::from_shape_vec([2, 2], vec![1.0, -1.0, -1.0, 1.0])?;
    let r = std::f64::consts::FRAC_1_SQRT_2;
    let eigenvectors = Tensor2::from_shape_vec([2, 2], vec![r, r, r, -r])?;
    Ok((laplacian, vec![0.0, 2.0], eigenvectors))
}

fn transpose(a: &Tensor2<f64>) -> Result<Tensor2<f64>, Box<dyn std::error::Error>> {
    Ok(a.permute_axes([1, 0])?.as_contiguous())
}

fn scale(a: &Tensor2<f64>, s: f64) -> Tensor2<f64> {
    a.map(|v| v * s)
}

#[test]
fn eigenbases_diagonalise_the_laplacians() -> TestResult {
    for (laplacian, lams, u) in [cycle4()?, edge()?] {
        // U^T L U = diag(lams)
        let lu = contract_mode(&laplacian, &u, 0)?;
        let d = contract_mode(&transpose(&u)?, &lu, 0)?;
        for (i, &lam) in lams.iter().enumerate() {
            for j in 0..lams.len() {
                let expected = if i == j { lam } else { 0.0 };
                assert_relative_eq!(*d.get_unchecked([i, j]), expected, epsilon = 1e-12);
            }
        }
    }
    Ok(())
}

#[test]
fn random_walk_filter_inverts_the_regularised_laplacian() -> TestResult {
    let (l0, lams0, u0) = cycle4()?;
    let (l1, lams1, u1) = edge()?;
    let betas = vec![0.8, 1.7];

    // factor 0 (the cycle) acts on axis 1, factor 1 (the edge) on axis 0
    let mut rng = StdRng::seed_from_u64(17);
    let data = (0..8).map(|_| rng.random_range(-1.0..1.0)).collect();
    let x = Tensor2::from_shape_vec([2, 4], data)?;

    let fil: FilterFunction<f64> =
        MultivariateFilterFunction::from_kind(FilterKind::RandomWalk, betas.clone())?.into();
    let grid = [
        Tensor2::from_shape_vec([1, 4], lams0)?,
        Tensor2::from_shape_vec([2, 1], lams1)?,
    ];
    let response = fil.apply(&grid)?;
    assert_eq!(response.shape, x.shape);

    // Y = (U0 ⊗ U1) diag(g) (U0 ⊗ U1)^T vec(X)
    let spectral = tensor_product(&x, &[transpose(&u0)?, transpose(&u1)?])?;
    let filtered = spectral.element_wise_op(&response, |a, g| a * g)?;
    let y = tensor_product(&filtered, &[&u0, &u1])?;

    // (I + β0·L0 ⊕ β1·L1) Y = X
    let ly = tensor_product_of_sum(&y, &[scale(&l0, betas[0]), scale(&l1, betas[1])])?;
    for ((yv, lv), xv) in y.iter().zip(ly.iter()).zip(x.iter()) {
        assert_relative_eq!(yv + lv, *xv, epsilon = 1e-12);
    }
    Ok(())
}

#[test]
fn constant_signals_are_kept_by_every_builtin_filter() -> TestResult {
    let (_, lams0, u0) = cycle4()?;
    let (_, lams1, u1) = edge()?;
    let x = Tensor2::from_shape_val([2, 4], 0.25);

    let grid = [
        Tensor2::from_shape_vec([1, 4], lams0)?,
        Tensor2::from_shape_vec([2, 1], lams1)?,
    ];
    for kind in FilterKind::ALL {
        let fil = MultivariateFilterFunction::from_kind(kind, vec![0.3, 0.3])?;
        let response = fil.apply(&grid)?;

        let spectral = tensor_product(&x, &[transpose(&u0)?, transpose(&u1)?])?;
        let filtered = spectral.element_wise_op(&response, |a, g| a * g)?;
        let y = tensor_product(&filtered, &[&u0, &u1])?;
        for v in y.iter() {
            assert_relative_eq!(*v, 0.25, epsilon = 1e-12);
        }
    }
    Ok(())
}
