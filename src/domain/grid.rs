//! Frequency grids and polarization arrays.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::WaveformError;

/// Frequency samples [Hz], strictly increasing and strictly positive.
///
/// Negative powers and logarithms of `πf` appear throughout the phase, so `f = 0`
/// is excluded here once instead of being special-cased at every evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyGrid {
    hz: Vec<f64>,
}

impl FrequencyGrid {
    /// Validate a caller-supplied grid.
    pub fn new(hz: Vec<f64>) -> Result<Self, WaveformError> {
        if hz.is_empty() {
            return Err(WaveformError::InvalidGrid("grid is empty".to_string()));
        }
        for (i, &f) in hz.iter().enumerate() {
            if !(f.is_finite() && f > 0.0) {
                return Err(WaveformError::InvalidGrid(format!(
                    "sample {i} is {f}, frequencies must be finite and > 0"
                )));
            }
        }
        if let Some(i) = hz.windows(2).position(|w| w[1] <= w[0]) {
            return Err(WaveformError::InvalidGrid(format!(
                "samples {i} and {} are not strictly increasing",
                i + 1
            )));
        }
        Ok(Self { hz })
    }

    /// `steps` equally spaced points between `min` and `max` (inclusive).
    pub fn linear(min: f64, max: f64, steps: usize) -> Result<Self, WaveformError> {
        check_range(min, max, steps)?;
        let step = (max - min) / (steps as f64 - 1.0);
        Self::new((0..steps).map(|i| min + step * i as f64).collect())
    }

    /// `steps` log-spaced points between `min` and `max` (inclusive).
    pub fn log_spaced(min: f64, max: f64, steps: usize) -> Result<Self, WaveformError> {
        check_range(min, max, steps)?;
        let ln_min = min.ln();
        let ln_max = max.ln();
        let step = (ln_max - ln_min) / (steps as f64 - 1.0);

        let mut out = Vec::with_capacity(steps);
        for i in 0..steps {
            out.push((ln_min + step * i as f64).exp());
        }
        // Pin the endpoints so exp(ln(x)) round-off never leaks into the grid bounds.
        out[0] = min;
        out[steps - 1] = max;
        Self::new(out)
    }

    pub fn hz(&self) -> &[f64] {
        &self.hz
    }

    pub fn len(&self) -> usize {
        self.hz.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hz.is_empty()
    }

    /// Frequencies in units of `c^3 / (G M)`, i.e. `M f` with `M` in seconds.
    pub fn dimensionless(&self, total_mass_s: f64) -> Vec<f64> {
        self.hz.iter().map(|f| f * total_mass_s).collect()
    }
}

fn check_range(min: f64, max: f64, steps: usize) -> Result<(), WaveformError> {
    if !(min.is_finite() && max.is_finite() && min > 0.0 && max > min) {
        return Err(WaveformError::InvalidGrid(format!(
            "range min={min}, max={max} must be finite, >0, and max>min"
        )));
    }
    if steps < 2 {
        return Err(WaveformError::InvalidGrid("steps must be >= 2".to_string()));
    }
    Ok(())
}

/// Plus and cross polarizations sampled on a frequency grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polarizations {
    pub frequencies: Vec<f64>,
    pub plus: Vec<Complex64>,
    pub cross: Vec<Complex64>,
}

impl Polarizations {
    pub fn len(&self) -> usize {
        self.plus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plus.is_empty()
    }

    /// Row view: one `[h_plus, h_cross]` pair per frequency.
    pub fn as_columns(&self) -> Vec<[Complex64; 2]> {
        self.plus
            .iter()
            .zip(self.cross.iter())
            .map(|(&p, &c)| [p, c])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_spaced_includes_endpoints() {
        let g = FrequencyGrid::log_spaced(10.0, 1000.0, 5).unwrap();
        assert_eq!(g.hz()[0], 10.0);
        assert_eq!(g.hz()[4], 1000.0);
        assert!((g.hz()[2] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_zero_and_unsorted_samples() {
        assert!(FrequencyGrid::new(vec![0.0, 1.0]).is_err());
        assert!(FrequencyGrid::new(vec![2.0, 1.0]).is_err());
        assert!(FrequencyGrid::new(vec![1.0, 1.0]).is_err());
        assert!(FrequencyGrid::new(vec![]).is_err());
        assert!(FrequencyGrid::linear(5.0, 5.0, 10).is_err());
    }

    #[test]
    fn dimensionless_preserves_shape_and_order() {
        let g = FrequencyGrid::linear(10.0, 20.0, 11).unwrap();
        let ff = g.dimensionless(2.0);
        assert_eq!(ff.len(), 11);
        assert_eq!(ff[0], 20.0);
        assert!(ff.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn columns_pair_plus_with_cross() {
        let p = Polarizations {
            frequencies: vec![1.0, 2.0],
            plus: vec![Complex64::new(1.0, 0.0), Complex64::new(2.0, 0.0)],
            cross: vec![Complex64::new(0.0, 1.0), Complex64::new(0.0, 2.0)],
        };
        let cols = p.as_columns();
        assert_eq!(cols.len(), 2);
        assert_eq!(cols[1], [Complex64::new(2.0, 0.0), Complex64::new(0.0, 2.0)]);
    }
}
