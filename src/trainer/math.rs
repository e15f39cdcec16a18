//! Ordinary least squares.

use ndarray::{s, Array1, Array2, ArrayView1, ArrayView2};

use crate::prelude::*;

/// Solves `a · x = b` by Gaussian elimination with partial pivoting.
pub fn solve(mut a: Array2<f64>, mut b: Array1<f64>) -> Result<Array1<f64>> {
    let n = a.nrows();
    if n != a.ncols() || n != b.len() {
        return Err(anyhow!("shape mismatch: {:?} and {}", a.dim(), b.len()));
    }
    let tolerance = a.iter().fold(0.0_f64, |scale, value| scale.max(value.abs())) * 1e-12;

    for column in 0..n {
        let pivot_row = (column..n)
            .max_by(|&lhs, &rhs| a[[lhs, column]].abs().total_cmp(&a[[rhs, column]].abs()))
            .ok_or_else(|| anyhow!("empty system"))?;
        if a[[pivot_row, column]].abs() <= tolerance {
            return Err(anyhow!("the system is singular, features are linearly dependent"));
        }
        if pivot_row != column {
            for k in 0..n {
                a.swap([column, k], [pivot_row, k]);
            }
            b.swap(column, pivot_row);
        }

        for row in (column + 1)..n {
            let factor = a[[row, column]] / a[[column, column]];
            for k in column..n {
                a[[row, k]] -= factor * a[[column, k]];
            }
            b[row] -= factor * b[column];
        }
    }

    let mut x = Array1::zeros(n);
    for row in (0..n).rev() {
        let tail = a.slice(s![row, row + 1..]).dot(&x.slice(s![row + 1..]));
        x[row] = (b[row] - tail) / a[[row, row]];
    }
    Ok(x)
}

/// Fits `y ≈ β₀ + β · x` via the normal equations `(XᵀX) β = Xᵀy`,
/// where `X` is prefixed with a column of ones.
///
/// Returns `[β₀, β₁, …]`.
pub fn least_squares(x: ArrayView2<f64>, y: ArrayView1<f64>) -> Result<Array1<f64>> {
    let (n_samples, n_features) = x.dim();
    if n_samples != y.len() {
        return Err(anyhow!("{} rows but {} targets", n_samples, y.len()));
    }
    if n_samples <= n_features {
        return Err(anyhow!("need at least {} samples, got {}", n_features + 1, n_samples));
    }

    let mut design = Array2::<f64>::ones((n_samples, n_features + 1));
    design.slice_mut(s![.., 1..]).assign(&x);
    let xtx = design.t().dot(&design);
    let xty = design.t().dot(&y);
    solve(xtx, xty)
}

/// Root mean squared error of `predictions` against `y`.
pub fn rmse(predictions: ArrayView1<f64>, y: ArrayView1<f64>) -> f64 {
    let residuals = &predictions - &y;
    residuals
        .mapv(|residual| residual * residual)
        .mean()
        .unwrap_or_default()
        .sqrt()
}
