//! Deviation parameters: the named knobs that deform the GR phase.
//!
//! Every parameter defaults to 0, which is the GR limit. Three families live
//! side by side and are read by different models:
//!
//! - ppE: `PN`, `beta`
//! - gIMR: `delta_phi_0` ... `delta_phi_10`
//! - multipolar / tidal: `k_1`, `k_2`, `lambda_1`, `lambda_2`, `tilde`, `delta_tilde`

use serde::{Deserialize, Serialize};

use crate::error::WaveformError;

/// Number of gIMR coefficients (`delta_phi_0` ... `delta_phi_10`).
pub const GIMR_LEN: usize = 11;

/// Every recognised deviation key, in display order.
pub const DEVIATION_KEYS: [&str; 19] = [
    "PN",
    "beta",
    "delta_phi_0",
    "delta_phi_1",
    "delta_phi_2",
    "delta_phi_3",
    "delta_phi_4",
    "delta_phi_5",
    "delta_phi_6",
    "delta_phi_7",
    "delta_phi_8",
    "delta_phi_9",
    "delta_phi_10",
    "k_1",
    "k_2",
    "lambda_1",
    "lambda_2",
    "tilde",
    "delta_tilde",
];

/// Deviation parameters with GR defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviationParams {
    /// ppE post-Newtonian order (continuous; -1 is one order below leading).
    #[serde(rename = "PN")]
    pub pn: f64,
    /// ppE amplitude.
    pub beta: f64,
    /// gIMR fractional (or, for indices 1 and 10, additive) phase deviations.
    pub delta_phi: [f64; GIMR_LEN],
    /// Spin-induced quadrupole deviations.
    pub k_1: f64,
    pub k_2: f64,
    /// Spin-induced octupole deviations.
    pub lambda_1: f64,
    pub lambda_2: f64,
    /// Tidal deformability deviations.
    pub tilde: f64,
    pub delta_tilde: f64,
}

impl DeviationParams {
    /// The GR limit: every deviation set to zero.
    pub fn gr() -> Self {
        Self::default()
    }

    pub fn is_known(key: &str) -> bool {
        DEVIATION_KEYS.contains(&key)
    }

    pub fn get(&self, key: &str) -> Result<f64, WaveformError> {
        let value = match key {
            "PN" => self.pn,
            "beta" => self.beta,
            "k_1" => self.k_1,
            "k_2" => self.k_2,
            "lambda_1" => self.lambda_1,
            "lambda_2" => self.lambda_2,
            "tilde" => self.tilde,
            "delta_tilde" => self.delta_tilde,
            _ => self.delta_phi[gimr_index(key)?],
        };
        Ok(value)
    }

    pub fn set(&mut self, key: &str, value: f64) -> Result<(), WaveformError> {
        let slot = match key {
            "PN" => &mut self.pn,
            "beta" => &mut self.beta,
            "k_1" => &mut self.k_1,
            "k_2" => &mut self.k_2,
            "lambda_1" => &mut self.lambda_1,
            "lambda_2" => &mut self.lambda_2,
            "tilde" => &mut self.tilde,
            "delta_tilde" => &mut self.delta_tilde,
            _ => &mut self.delta_phi[gimr_index(key)?],
        };
        *slot = value;
        Ok(())
    }

    /// True when no deviation is active.
    pub fn is_gr(&self) -> bool {
        *self == Self::gr()
    }

    /// `(key, value)` pairs in display order.
    pub fn entries(&self) -> Vec<(&'static str, f64)> {
        DEVIATION_KEYS
            .iter()
            .filter_map(|&k| self.get(k).ok().map(|v| (k, v)))
            .collect()
    }
}

fn gimr_index(key: &str) -> Result<usize, WaveformError> {
    key.strip_prefix("delta_phi_")
        .and_then(|n| n.parse::<usize>().ok())
        .filter(|&i| i < GIMR_LEN && key == format!("delta_phi_{i}"))
        .ok_or_else(|| WaveformError::UnknownParameter(key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_gr() {
        let d = DeviationParams::default();
        assert!(d.is_gr());
        for key in DEVIATION_KEYS {
            assert_eq!(d.get(key).unwrap(), 0.0, "{key}");
        }
    }

    #[test]
    fn set_then_get_every_key() {
        let mut d = DeviationParams::default();
        for (i, key) in DEVIATION_KEYS.iter().enumerate() {
            d.set(key, i as f64 + 0.5).unwrap();
        }
        for (i, key) in DEVIATION_KEYS.iter().enumerate() {
            assert_eq!(d.get(key).unwrap(), i as f64 + 0.5);
        }
        assert_eq!(d.delta_phi[10], 12.5);
    }

    #[test]
    fn rejects_malformed_gimr_keys() {
        let d = DeviationParams::default();
        for key in ["delta_phi_11", "delta_phi_", "delta_phi_01", "delta_phi_x", "gamma"] {
            assert_eq!(
                d.get(key),
                Err(WaveformError::UnknownParameter(key.to_string())),
                "{key}"
            );
        }
    }
}
