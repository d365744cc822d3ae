//! Waveform parameter sets.
//!
//! `WaveformParams` is the flat key → value vocabulary callers use to configure a
//! waveform: binary parameters, deviation parameters and the `maxn` data option.
//! `update` merges a partial map into the set. It validates every entry before
//! applying any, so a rejected update leaves the set exactly as it was.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::BinaryParams;
use crate::error::WaveformError;

pub mod deviations;

pub use deviations::*;

/// Binary parameter keys, in display order.
pub const BINARY_KEYS: [&str; 10] = [
    "mass_1",
    "mass_2",
    "a_1",
    "a_2",
    "redshift",
    "luminosity_distance",
    "theta_jn",
    "phase",
    "geocent_time",
    "cut",
];

/// Highest TaylorF2 PN index (3.5PN) plus one.
pub const DEFAULT_MAXN: usize = 8;

/// Options that are not physical parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataParams {
    /// Number of TaylorF2 phase orders kept in the baseline (PN index `< maxn`).
    pub maxn: usize,
}

impl Default for DataParams {
    fn default() -> Self {
        Self { maxn: DEFAULT_MAXN }
    }
}

/// Full parameter state of one waveform instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveformParams {
    pub binary: BinaryParams,
    pub deviations: DeviationParams,
    pub data: DataParams,
}

impl WaveformParams {
    pub fn new(binary: BinaryParams) -> Self {
        Self {
            binary,
            ..Self::default()
        }
    }

    pub fn from_map(map: &BTreeMap<String, f64>) -> Result<Self, WaveformError> {
        let mut params = Self::default();
        params.update(map)?;
        Ok(params)
    }

    pub fn get(&self, key: &str) -> Result<f64, WaveformError> {
        let b = &self.binary;
        let value = match key {
            "mass_1" => b.mass_1,
            "mass_2" => b.mass_2,
            "a_1" => b.a_1,
            "a_2" => b.a_2,
            "redshift" => b.redshift,
            "luminosity_distance" => b.luminosity_distance,
            "theta_jn" => b.theta_jn,
            "phase" => b.phase,
            "geocent_time" => b.geocent_time,
            "cut" => b.cut,
            "maxn" => self.data.maxn as f64,
            _ => self.deviations.get(key)?,
        };
        Ok(value)
    }

    /// Set a single key.
    pub fn set(&mut self, key: &str, value: f64) -> Result<(), WaveformError> {
        if !value.is_finite() {
            return Err(WaveformError::NonFiniteParameter {
                key: key.to_string(),
                value,
            });
        }
        if key == "maxn" {
            self.data.maxn = parse_maxn(value)?;
            return Ok(());
        }

        let b = &mut self.binary;
        let slot = match key {
            "mass_1" => &mut b.mass_1,
            "mass_2" => &mut b.mass_2,
            "a_1" => &mut b.a_1,
            "a_2" => &mut b.a_2,
            "redshift" => &mut b.redshift,
            "luminosity_distance" => &mut b.luminosity_distance,
            "theta_jn" => &mut b.theta_jn,
            "phase" => &mut b.phase,
            "geocent_time" => &mut b.geocent_time,
            "cut" => &mut b.cut,
            _ => return self.deviations.set(key, value),
        };
        *slot = value;
        Ok(())
    }

    /// Merge a partial map into the set.
    ///
    /// Keys not present in `partial` keep their value. Either every entry is
    /// applied or none is.
    pub fn update(&mut self, partial: &BTreeMap<String, f64>) -> Result<(), WaveformError> {
        let mut next = *self;
        for (key, &value) in partial {
            next.set(key, value)?;
        }
        *self = next;
        Ok(())
    }

    /// Every key with its current value, binary keys first.
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        BINARY_KEYS
            .iter()
            .chain(std::iter::once(&"maxn"))
            .chain(DEVIATION_KEYS.iter())
            .filter_map(|&k| self.get(k).ok().map(|v| (k.to_string(), v)))
            .collect()
    }
}

fn parse_maxn(value: f64) -> Result<usize, WaveformError> {
    if value.fract() != 0.0 || value < 1.0 {
        return Err(WaveformError::InvalidOption {
            key: "maxn".to_string(),
            reason: format!("must be a positive integer, got {value}"),
        });
    }
    Ok(value as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partial(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
        entries.iter().map(|&(k, v)| (k.to_string(), v)).collect()
    }

    #[test]
    fn update_merges_without_touching_other_keys() {
        let mut p = WaveformParams::from_map(&partial(&[("mass_1", 1.4), ("mass_2", 1.3)])).unwrap();
        p.update(&partial(&[("beta", 1e-3), ("PN", -1.0)])).unwrap();

        assert_eq!(p.binary.mass_1, 1.4);
        assert_eq!(p.binary.mass_2, 1.3);
        assert_eq!(p.binary.cut, 2.0);
        assert_eq!(p.deviations.beta, 1e-3);
        assert_eq!(p.deviations.pn, -1.0);
    }

    #[test]
    fn failed_update_is_atomic() {
        let mut p = WaveformParams::default();
        let before = p;
        let err = p
            .update(&partial(&[("beta", 2.0), ("not_a_key", 1.0)]))
            .unwrap_err();
        assert_eq!(err, WaveformError::UnknownParameter("not_a_key".to_string()));
        assert_eq!(p, before);
    }

    #[test]
    fn maxn_must_be_a_positive_integer() {
        let mut p = WaveformParams::default();
        assert!(matches!(
            p.update(&partial(&[("maxn", 2.5)])),
            Err(WaveformError::InvalidOption { .. })
        ));
        assert!(p.update(&partial(&[("maxn", 0.0)])).is_err());
        p.update(&partial(&[("maxn", 4.0)])).unwrap();
        assert_eq!(p.data.maxn, 4);
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let mut p = WaveformParams::default();
        assert!(matches!(
            p.set("k_1", f64::INFINITY),
            Err(WaveformError::NonFiniteParameter { .. })
        ));
    }

    #[test]
    fn map_covers_the_whole_vocabulary() {
        let map = WaveformParams::default().to_map();
        assert_eq!(map.len(), BINARY_KEYS.len() + 1 + DEVIATION_KEYS.len());
        assert_eq!(map["cut"], 2.0);
        assert_eq!(map["maxn"], 8.0);
        let back = WaveformParams::from_map(&map).unwrap();
        assert_eq!(back, WaveformParams::default());
    }
}
