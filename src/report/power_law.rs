//! Power-law diagnostics of a phase residual.
//!
//! A single ppE term adds `β η^{p/5} (πMf)^{(2p-5)/3}` to the phase, so the
//! residual against the undeformed model is a straight line in log-log space.
//! Fitting that line recovers the exponent and checks the deviation landed at
//! the requested order.

use nalgebra::{DMatrix, DVector};
use serde::Serialize;

use crate::math::solve_least_squares;

/// `residual ≈ prefactor · f^exponent`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PowerLawFit {
    pub exponent: f64,
    /// Signed; carries the sign of the residual.
    pub prefactor: f64,
    /// RMS of `ln|r| - fit` over the samples.
    pub rms_log_error: f64,
    pub n: usize,
}

impl PowerLawFit {
    pub fn predict(&self, f: f64) -> f64 {
        self.prefactor * f.powf(self.exponent)
    }
}

/// Least-squares line through `(ln f, ln|r|)`.
///
/// Returns `None` for mismatched or short inputs, non-positive frequencies, or a
/// residual that is zero somewhere or changes sign.
pub fn fit_power_law(f: &[f64], residual: &[f64]) -> Option<PowerLawFit> {
    let n = f.len();
    if n < 2 || residual.len() != n {
        return None;
    }

    let sign = residual.first()?.signum();
    let mut x = DMatrix::<f64>::zeros(n, 2);
    let mut y = DVector::<f64>::zeros(n);
    for (i, (&fi, &ri)) in f.iter().zip(residual).enumerate() {
        if !(fi.is_finite() && fi > 0.0 && ri.is_finite()) || ri == 0.0 || ri.signum() != sign {
            return None;
        }
        x[(i, 0)] = 1.0;
        x[(i, 1)] = fi.ln();
        y[i] = ri.abs().ln();
    }

    let beta = solve_least_squares(&x, &y)?;
    let fitted = &x * &beta;
    let sse: f64 = (&y - fitted).iter().map(|e| e * e).sum();

    Some(PowerLawFit {
        exponent: beta[1],
        prefactor: sign * beta[0].exp(),
        rms_log_error: (sse / n as f64).sqrt(),
        n,
    })
}

/// Exponent of `f` produced by a ppE term at PN order `pn`.
pub fn ppe_exponent(pn: f64) -> f64 {
    (2.0 * pn - 5.0) / 3.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_exact_power_law() {
        let f: Vec<f64> = (1..=40).map(|i| 10.0 * i as f64).collect();
        let r: Vec<f64> = f.iter().map(|x| -3.5 * x.powf(-1.25)).collect();
        let fit = fit_power_law(&f, &r).unwrap();
        assert!((fit.exponent + 1.25).abs() < 1e-10);
        assert!((fit.prefactor + 3.5).abs() < 1e-8);
        assert!(fit.rms_log_error < 1e-10);
        assert!((fit.predict(25.0) - (-3.5 * 25f64.powf(-1.25))).abs() < 1e-9);
    }

    #[test]
    fn rejects_sign_changes_and_zeros() {
        let f = [1.0, 2.0, 3.0];
        assert!(fit_power_law(&f, &[1.0, -1.0, 1.0]).is_none());
        assert!(fit_power_law(&f, &[1.0, 0.0, 1.0]).is_none());
        assert!(fit_power_law(&f, &[1.0, 1.0]).is_none());
        assert!(fit_power_law(&[0.0, 1.0], &[1.0, 1.0]).is_none());
    }

    #[test]
    fn ppe_exponent_at_known_orders() {
        assert!((ppe_exponent(-1.0) + 7.0 / 3.0).abs() < 1e-15);
        assert!((ppe_exponent(0.0) + 5.0 / 3.0).abs() < 1e-15);
        assert!(ppe_exponent(2.5).abs() < 1e-15);
    }
}
