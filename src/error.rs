//! Error types.
//!
//! - `WaveformError`: typed failures of the library (domain and configuration)
//! - `AppError`: what the `gwdev` binary reports, carrying a process exit code

use thiserror::Error;

/// Failures raised while configuring or evaluating a waveform.
///
/// Domain errors describe a physically meaningless input (bad masses, band
/// boundaries out of order). Configuration errors describe a malformed request
/// (unknown parameter key, missing calibration data) and are raised at update
/// time, before any evaluation happens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WaveformError {
    #[error("component masses must be finite and positive (mass_1={mass_1}, mass_2={mass_2})")]
    InvalidMass { mass_1: f64, mass_2: f64 },
    #[error("symmetric mass ratio {eta} is outside (0, 0.25]")]
    SymmetricMassRatio { eta: f64 },
    #[error("luminosity distance must be finite and positive, got {0} Mpc")]
    InvalidDistance(f64),
    #[error("band boundaries out of order: f1={f1} must be below f2={f2}")]
    BandOrdering { f1: f64, f2: f64 },
    #[error("unknown waveform parameter '{0}'")]
    UnknownParameter(String),
    #[error("parameter '{key}' must be finite, got {value}")]
    NonFiniteParameter { key: String, value: f64 },
    #[error("invalid option '{key}': {reason}")]
    InvalidOption { key: String, reason: String },
    #[error("invalid frequency grid: {0}")]
    InvalidGrid(String),
    #[error("unknown waveform model '{0}'")]
    UnknownModel(String),
    #[error("model {0} needs phenomenological coefficients, none were supplied")]
    MissingPhenomCoefficients(&'static str),
    #[error("invalid phenomenological coefficients: {0}")]
    InvalidPhenomFit(String),
    #[error("singular linear system while solving {0}")]
    SingularSystem(&'static str),
}

impl WaveformError {
    /// True for errors caused by a physically invalid binary or band layout.
    pub fn is_domain(&self) -> bool {
        matches!(
            self,
            WaveformError::InvalidMass { .. }
                | WaveformError::SymmetricMassRatio { .. }
                | WaveformError::InvalidDistance(_)
                | WaveformError::BandOrdering { .. }
                | WaveformError::SingularSystem(_)
        )
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<WaveformError> for AppError {
    fn from(err: WaveformError) -> Self {
        let code = if err.is_domain() { 3 } else { 2 };
        AppError::new(code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_exit_code_3() {
        let err: AppError = WaveformError::BandOrdering { f1: 0.02, f2: 0.01 }.into();
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("f1=0.02"));
    }

    #[test]
    fn configuration_errors_map_to_exit_code_2() {
        let err: AppError = WaveformError::UnknownParameter("gamma".to_string()).into();
        assert_eq!(err.exit_code(), 2);
    }
}
