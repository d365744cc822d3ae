//! Polarization projection and the high-frequency cutoff.

use num_complex::Complex64;
use tracing::debug;

use crate::domain::Polarizations;

/// `(A₊, A×)` for inclination `iota`.
pub fn project(amplitude: f64, iota: f64) -> (f64, f64) {
    let c = iota.cos();
    (amplitude * 0.5 * (1.0 + c * c), amplitude * c)
}

/// `h₊ = A₊ e^{iΨ}`, `h× = i A× e^{iΨ}`, zeroed above `f_cut` (dimensionless).
///
/// `hz`, `ff`, `amplitude` and `phase` are parallel arrays over the same grid.
pub fn compose(hz: &[f64], ff: &[f64], amplitude: &[f64], phase: &[f64], iota: f64, f_cut: f64) -> Polarizations {
    let n = hz.len();
    let mut plus = Vec::with_capacity(n);
    let mut cross = Vec::with_capacity(n);

    for ((&f, &a), &psi) in ff.iter().zip(amplitude).zip(phase) {
        if f > f_cut {
            plus.push(Complex64::new(0.0, 0.0));
            cross.push(Complex64::new(0.0, 0.0));
            continue;
        }
        let (a_plus, a_cross) = project(a, iota);
        let rot = Complex64::from_polar(1.0, psi);
        plus.push(rot * a_plus);
        cross.push(Complex64::i() * rot * a_cross);
    }

    let cut = ff.iter().filter(|&&f| f > f_cut).count();
    debug!(samples = n, cut, f_cut, "composed polarizations");

    Polarizations {
        frequencies: hz.to_vec(),
        plus,
        cross,
    }
}
