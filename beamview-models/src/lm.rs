//! Levenberg-Marquardt least-squares fitting for 1-D models.
//!
//! Damped normal equations with Gaussian elimination for the N x N solve.
//! Uses f64 throughout for numerical stability.

use crate::error::{Error, Result};
use crate::fittable::Fittable1D;

/// Configuration for Levenberg-Marquardt optimization.
#[derive(Debug, Clone)]
pub struct LmConfig {
    /// Maximum iterations.
    pub max_iterations: usize,
    /// Convergence threshold for parameter changes.
    pub convergence_threshold: f64,
    /// Initial damping parameter.
    pub initial_lambda: f64,
    /// Factor to increase lambda on a rejected step.
    pub lambda_up: f64,
    /// Factor to decrease lambda on an accepted step.
    pub lambda_down: f64,
}

impl Default for LmConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            convergence_threshold: 1e-8,
            initial_lambda: 0.001,
            lambda_up: 10.0,
            lambda_down: 0.1,
        }
    }
}

/// Result of a fit.
#[derive(Debug, Clone, Copy)]
pub struct FitResult<const N: usize> {
    /// Fitted parameters.
    pub params: [f64; N],
    /// Sum of squared residuals at the fitted parameters.
    pub chi2: f64,
    /// Whether the parameter deltas fell below the convergence threshold.
    pub converged: bool,
    /// Number of iterations used.
    pub iterations: usize,
}

/// Fit a model to `(x, y)` samples.
///
/// # Errors
/// Returns an error if the samples are empty or `x` and `y` lengths differ.
pub fn fit<const N: usize, M: Fittable1D<N>>(
    model: &M,
    xs: &[f64],
    ys: &[f64],
    initial_params: [f64; N],
    config: &LmConfig,
) -> Result<FitResult<N>> {
    if xs.is_empty() {
        return Err(Error::EmptyData);
    }
    if xs.len() != ys.len() {
        return Err(Error::LengthMismatch {
            x_len: xs.len(),
            y_len: ys.len(),
        });
    }

    let mut params = initial_params;
    let mut lambda = config.initial_lambda;
    let mut chi2 = compute_chi2(model, xs, ys, &params);
    let mut converged = false;
    let mut iterations = 0;

    for iter in 0..config.max_iterations {
        iterations = iter + 1;

        let (hessian, gradient) = normal_equations(model, xs, ys, &params);

        let mut damped = hessian;
        for (i, row) in damped.iter_mut().enumerate() {
            row[i] *= 1.0 + lambda;
        }

        let Some(delta) = solve(&damped, &gradient) else {
            // Singular system; increase damping and retry.
            lambda *= config.lambda_up;
            continue;
        };

        let mut trial = params;
        for (p, d) in trial.iter_mut().zip(delta.iter()) {
            *p += d;
        }
        model.constrain(&mut trial);

        let trial_chi2 = compute_chi2(model, xs, ys, &trial);
        if trial_chi2 < chi2 {
            let improvement = chi2 - trial_chi2;
            params = trial;
            chi2 = trial_chi2;
            lambda *= config.lambda_down;

            // Stop on negligible parameter motion, or on a relative chi2
            // improvement too small to keep iterating for.
            let max_delta = delta.iter().fold(0.0_f64, |m, d| m.max(d.abs()));
            if max_delta < config.convergence_threshold
                || improvement <= config.convergence_threshold * chi2.max(f64::EPSILON)
            {
                converged = true;
                break;
            }
        } else {
            lambda *= config.lambda_up;
        }
    }

    Ok(FitResult {
        params,
        chi2,
        converged,
        iterations,
    })
}

/// Sum of squared residuals.
fn compute_chi2<const N: usize, M: Fittable1D<N>>(
    model: &M,
    xs: &[f64],
    ys: &[f64],
    params: &[f64; N],
) -> f64 {
    xs.iter()
        .zip(ys.iter())
        .map(|(&x, &y)| {
            let r = y - model.evaluate(x, params);
            r * r
        })
        .sum()
}

/// Build J^T J and J^T r for the current parameters.
#[allow(clippy::needless_range_loop)]
fn normal_equations<const N: usize, M: Fittable1D<N>>(
    model: &M,
    xs: &[f64],
    ys: &[f64],
    params: &[f64; N],
) -> ([[f64; N]; N], [f64; N]) {
    let mut hessian = [[0.0; N]; N];
    let mut gradient = [0.0; N];

    for (&x, &y) in xs.iter().zip(ys.iter()) {
        let residual = y - model.evaluate(x, params);
        let row = model.jacobian(x, params);

        for i in 0..N {
            gradient[i] += row[i] * residual;
            for j in i..N {
                hessian[i][j] += row[i] * row[j];
            }
        }
    }

    // Mirror the upper triangle.
    for i in 0..N {
        for j in 0..i {
            hessian[i][j] = hessian[j][i];
        }
    }

    (hessian, gradient)
}

/// Solve an NxN linear system using Gaussian elimination with partial pivoting.
///
/// Returns `None` if the matrix is singular (pivot too small).
#[allow(clippy::needless_range_loop)]
fn solve<const N: usize>(a: &[[f64; N]; N], b: &[f64; N]) -> Option<[f64; N]> {
    let mut matrix = *a;
    let mut rhs = *b;

    // Forward elimination with partial pivoting
    for col in 0..N {
        let mut max_row = col;
        let mut max_val = matrix[col][col].abs();
        for row in (col + 1)..N {
            if matrix[row][col].abs() > max_val {
                max_val = matrix[row][col].abs();
                max_row = row;
            }
        }

        if max_val < 1e-12 {
            return None;
        }

        if max_row != col {
            matrix.swap(col, max_row);
            rhs.swap(col, max_row);
        }

        for row in (col + 1)..N {
            let factor = matrix[row][col] / matrix[col][col];
            let pivot_row = matrix[col];
            for (j, m) in matrix[row].iter_mut().enumerate().skip(col) {
                *m -= factor * pivot_row[j];
            }
            rhs[row] -= factor * rhs[col];
        }
    }

    // Back substitution
    let mut x = [0.0_f64; N];
    for i in (0..N).rev() {
        let mut sum = rhs[i];
        for (j, &xj) in x.iter().enumerate().skip(i + 1) {
            sum -= matrix[i][j] * xj;
        }
        x[i] = sum / matrix[i][i];
    }

    Some(x)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn solver_inverts_known_system() {
        // 2x + y = 5, x + 3y = 10 -> x = 1, y = 3
        let a = [[2.0, 1.0], [1.0, 3.0]];
        let b = [5.0, 10.0];
        let x = solve(&a, &b).unwrap();
        assert_abs_diff_eq!(x[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x[1], 3.0, epsilon = 1e-12);
    }

    #[test]
    fn solver_rejects_singular_matrix() {
        let a = [[1.0, 2.0], [2.0, 4.0]];
        let b = [1.0, 2.0];
        assert!(solve(&a, &b).is_none());
    }

    struct Line;

    impl Fittable1D<2> for Line {
        fn name(&self) -> &'static str {
            "line"
        }

        fn evaluate(&self, x: f64, params: &[f64; 2]) -> f64 {
            params[0] * x + params[1]
        }

        fn jacobian(&self, x: f64, _params: &[f64; 2]) -> [f64; 2] {
            [x, 1.0]
        }
    }

    #[test]
    fn linear_model_fits_in_one_accepted_step() {
        let xs: Vec<f64> = (0..20).map(f64::from).collect();
        let ys: Vec<f64> = xs.iter().map(|&x| 3.0 * x - 7.0).collect();

        let result = fit(&Line, &xs, &ys, [0.0, 0.0], &LmConfig::default()).unwrap();
        assert!(result.converged);
        assert_abs_diff_eq!(result.params[0], 3.0, epsilon = 1e-6);
        assert_abs_diff_eq!(result.params[1], -7.0, epsilon = 1e-6);
    }

    #[test]
    fn empty_and_mismatched_samples_are_rejected() {
        assert!(matches!(
            fit(&Line, &[], &[], [0.0, 0.0], &LmConfig::default()),
            Err(Error::EmptyData)
        ));
        assert!(matches!(
            fit(&Line, &[1.0, 2.0], &[1.0], [0.0, 0.0], &LmConfig::default()),
            Err(Error::LengthMismatch { .. })
        ));
    }
}
