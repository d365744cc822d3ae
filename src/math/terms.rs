//! Power-law and logarithmic phase terms in `x = πf`.
//!
//! Every PN phase piece used here, baseline or deviation, is a coefficient times
//! one of two shapes:
//!
//! - `Power(n)`: `x^n`
//! - `LogPower(n)`: `ln(x) x^n`
//!
//! Writing them as data lets the three-band assembler evaluate the inspiral phase
//! and its exact first derivative at a seam from the same term list that produces
//! the full-grid phase, so value and derivative can never disagree.
//!
//! Frequencies are dimensionless (`M f`). Derivatives are with respect to that
//! same dimensionless frequency.

use std::f64::consts::PI;

/// Functional shape of a phase term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Power(f64),
    LogPower(f64),
}

/// `coeff * shape(πf)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseTerm {
    pub coeff: f64,
    pub shape: Shape,
}

impl PhaseTerm {
    pub fn power(coeff: f64, n: f64) -> Self {
        Self {
            coeff,
            shape: Shape::Power(n),
        }
    }

    pub fn log_power(coeff: f64, n: f64) -> Self {
        Self {
            coeff,
            shape: Shape::LogPower(n),
        }
    }

    /// `coeff * f^n` written in the `πf` basis.
    pub fn power_in_f(coeff: f64, n: f64) -> Self {
        Self::power(coeff * PI.powf(-n), n)
    }

    pub fn value(&self, f: f64) -> f64 {
        let x = PI * f;
        match self.shape {
            Shape::Power(n) => self.coeff * x.powf(n),
            Shape::LogPower(n) => self.coeff * x.ln() * x.powf(n),
        }
    }

    /// `d/df` of the term.
    pub fn derivative(&self, f: f64) -> f64 {
        let x = PI * f;
        match self.shape {
            Shape::Power(n) => {
                if n == 0.0 {
                    0.0
                } else {
                    self.coeff * n * PI * x.powf(n - 1.0)
                }
            }
            Shape::LogPower(n) => self.coeff * PI * x.powf(n - 1.0) * (1.0 + n * x.ln()),
        }
    }
}

/// A finite sum of phase terms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhaseSeries {
    terms: Vec<PhaseTerm>,
}

impl PhaseSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, term: PhaseTerm) {
        self.terms.push(term);
    }

    pub fn with(mut self, term: PhaseTerm) -> Self {
        self.push(term);
        self
    }

    pub fn extend(&mut self, other: PhaseSeries) {
        self.terms.extend(other.terms);
    }

    /// Multiply every coefficient by `k`.
    pub fn scaled(mut self, k: f64) -> Self {
        for t in &mut self.terms {
            t.coeff *= k;
        }
        self
    }

    pub fn terms(&self) -> &[PhaseTerm] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn value(&self, f: f64) -> f64 {
        self.terms.iter().map(|t| t.value(f)).sum()
    }

    pub fn derivative(&self, f: f64) -> f64 {
        self.terms.iter().map(|t| t.derivative(f)).sum()
    }

    /// Pointwise values on a grid (same length and order).
    pub fn evaluate(&self, ff: &[f64]) -> Vec<f64> {
        ff.iter().map(|&f| self.value(f)).collect()
    }
}

impl FromIterator<PhaseTerm> for PhaseSeries {
    fn from_iter<I: IntoIterator<Item = PhaseTerm>>(iter: I) -> Self {
        Self {
            terms: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
pub(crate) fn central_difference(g: impl Fn(f64) -> f64, f: f64) -> f64 {
    let h = f * 1e-5;
    (g(f + h) - g(f - h)) / (2.0 * h)
}
