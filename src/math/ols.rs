//! Small dense linear solves.
//!
//! Two shapes of problem show up:
//!
//! - square collocation systems (the 5×5 intermediate-amplitude polynomial), solved
//!   exactly with LU
//! - tall least-squares problems (log-log power-law diagnostics of a phase
//!   residual), solved with SVD
//!
//! (Nalgebra's `LU::solve` is intended for square systems; SVD handles the tall
//! design matrices robustly.)

use nalgebra::{DMatrix, DVector};

/// Solve a square system `a x = b` with partial-pivot LU.
///
/// Returns `None` if the matrix is singular or the solution is not finite.
pub fn solve_square(a: DMatrix<f64>, b: &DVector<f64>) -> Option<DVector<f64>> {
    if !a.is_square() || a.nrows() != b.len() {
        return None;
    }
    let x = a.lu().solve(b)?;
    if x.iter().all(|v| v.is_finite()) {
        Some(x)
    } else {
        None
    }
}

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if strict solve fails.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}
