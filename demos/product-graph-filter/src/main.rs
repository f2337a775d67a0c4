use std::f64::consts::PI;

use argh::FromArgs;
use rand::{rngs::StdRng, Rng, SeedableRng};

use gsp::filters::{check_compatible, Beta, FilterConfig, FilterKind};
use gsp::tensor::{Tensor, Tensor2};
use gsp::tensor_ops::{tensor_product, tensor_product_of_sum};

#[derive(FromArgs)]
/// Filter a random signal on the Cartesian product of two cycle graphs
struct Args {
    /// number of nodes of the first cycle
    #[argh(option, default = "8")]
    n: usize,

    /// number of nodes of the second cycle
    #[argh(option, default = "6")]
    m: usize,

    /// filter family: random_walk, diffusion, relu, sigmoid or bandlimited
    #[argh(option, default = "FilterKind::Diffusion")]
    kind: FilterKind,

    /// filter parameter, once per cycle (default 1.0 for both)
    #[argh(option)]
    beta: Vec<f64>,

    /// seed of the random signal
    #[argh(option, default = "0")]
    seed: u64,
}

/// Laplacian of the cycle graph on `n` nodes.
fn cycle_laplacian(n: usize) -> Tensor2<f64> {
    Tensor2::from_shape_fn([n, n], |[i, j]| {
        if i == j {
            2.0
        } else if (i + 1) % n == j || (j + 1) % n == i {
            -1.0
        } else {
            0.0
        }
    })
}

/// Eigenvalues and real orthonormal eigenvectors (as columns) of the cycle Laplacian.
///
/// Column 0 is the constant mode; columns `2f - 1` and `2f` are the cosine and
/// sine modes of frequency `f`; for even `n` the last column alternates sign.
fn cycle_spectrum(n: usize) -> (Vec<f64>, Tensor2<f64>) {
    let nf = n as f64;
    let freq = |c: usize| (c + 1) / 2;

    let lams = (0..n)
        .map(|c| 2.0 - 2.0 * (2.0 * PI * freq(c) as f64 / nf).cos())
        .collect();

    let u = Tensor2::from_shape_fn([n, n], |[i, c]| {
        let angle = 2.0 * PI * (freq(c) * i) as f64 / nf;
        if c == 0 {
            nf.sqrt().recip()
        } else if n % 2 == 0 && c == n - 1 {
            angle.cos() / nf.sqrt()
        } else if c % 2 == 1 {
            angle.cos() * (2.0 / nf).sqrt()
        } else {
            angle.sin() * (2.0 / nf).sqrt()
        }
    });

    (lams, u)
}

fn transpose(a: &Tensor2<f64>) -> Result<Tensor2<f64>, Box<dyn std::error::Error>> {
    Ok(a.permute_axes([1, 0])?.as_contiguous())
}

fn dot<const N: usize>(a: &Tensor<f64, N>, b: &Tensor<f64, N>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();
    if args.n < 3 || args.m < 3 {
        return Err(format!("cycles need at least 3 nodes, got {} and {}", args.n, args.m).into());
    }
    let (n, m) = (args.n, args.m);

    let betas = if args.beta.is_empty() {
        vec![1.0, 1.0]
    } else {
        args.beta
    };

    let config = FilterConfig {
        kind: args.kind,
        beta: Beta::Vector(betas.clone()),
    };
    let fil = config.build()?;

    // the first cycle acts on axis 1, the second on axis 0
    let mut rng = StdRng::seed_from_u64(args.seed);
    let data = (0..n * m).map(|_| rng.random_range(-1.0..1.0)).collect();
    let x = Tensor2::from_shape_vec([m, n], data)?;
    check_compatible(&x, [m, n], &fil)?;

    let (ln, lm) = (cycle_laplacian(n), cycle_laplacian(m));
    let (lams_n, un) = cycle_spectrum(n);
    let (lams_m, um) = cycle_spectrum(m);

    let energy_before = dot(&x, &tensor_product_of_sum(&x, &[&ln, &lm])?);
    log::info!(
        "signal on C{n} x C{m}: norm {:.4}, dirichlet energy {:.4}",
        dot(&x, &x).sqrt(),
        energy_before
    );

    // response over the product spectrum, broadcast from the two factors
    let grid = [
        Tensor2::from_shape_vec([1, n], lams_n)?,
        Tensor2::from_shape_vec([m, 1], lams_m)?,
    ];
    let response = fil.apply(&grid)?;
    let (min, max) = response
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    log::info!(
        "{} response: min {min:.4}, max {max:.4}, mean {:.4}",
        args.kind,
        response.iter().sum::<f64>() / response.numel() as f64
    );

    // analysis, pointwise response, synthesis
    let spectral = tensor_product(&x, &[transpose(&un)?, transpose(&um)?])?;
    let filtered = spectral.element_wise_op(&response, |a, g| a * g)?;
    let y = tensor_product(&filtered, &[&un, &um])?;

    let energy_after = dot(&y, &tensor_product_of_sum(&y, &[&ln, &lm])?);
    log::info!(
        "filtered signal: norm {:.4}, dirichlet energy {:.4}",
        dot(&y, &y).sqrt(),
        energy_after
    );

    if args.kind == FilterKind::RandomWalk {
        // y solves (I + β0·Ln ⊕ β1·Lm) y = x
        let scaled = [ln.map(|v| v * betas[0]), lm.map(|v| v * betas[1])];
        let ly = tensor_product_of_sum(&y, &scaled)?;
        let residual = y
            .iter()
            .zip(ly.iter())
            .zip(x.iter())
            .map(|((a, b), c)| (a + b - c).powi(2))
            .sum::<f64>()
            .sqrt();
        log::info!("random walk residual: {residual:.3e}");
    }

    println!(
        "{}: dirichlet energy {:.4} -> {:.4}",
        args.kind, energy_before, energy_after
    );

    Ok(())
}
