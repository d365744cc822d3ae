//! TaylorF2 post-Newtonian coefficients (aligned spins).
//!
//! Phase: `Ψ(f) = -φ_c - π/4 + 3/(128η) Σ_i φ_i x^{(i-5)/3}` with `x = πMf`, plus the
//! logarithmic pieces at 2.5PN (`φ_5l ln x`) and 3PN (`φ_6l x^{1/3} ln x`).
//!
//! Amplitude: `A(f) = A_0(f) Σ_i a_i x^{i/3}` where `A_0` is the leading-order
//! (Newtonian) amplitude.

use std::f64::consts::PI;

use crate::domain::constants::EULER_GAMMA;
use crate::domain::{BinaryParams, DerivedParams};
use crate::math::{PhaseSeries, PhaseTerm};

/// Phase coefficients `φ_0 ... φ_7` with the two logarithmic coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PnPhaseCoefficients {
    pub phi_0: f64,
    pub phi_1: f64,
    pub phi_2: f64,
    pub phi_3: f64,
    pub phi_4: f64,
    pub phi_5: f64,
    pub phi_5_l: f64,
    pub phi_6: f64,
    pub phi_6_l: f64,
    pub phi_7: f64,
}

impl PnPhaseCoefficients {
    pub fn new(d: &DerivedParams) -> Self {
        let eta = d.eta;
        let eta2 = eta * eta;
        let eta3 = eta2 * eta;
        let delta = d.delta;
        let chi_s = d.chi_s;
        let chi_a = d.chi_a;
        let pi2 = PI * PI;

        let phi_2 = 3715.0 / 756.0 + 55.0 / 9.0 * eta;

        let phi_3 = -16.0 * PI + 113.0 / 3.0 * delta * chi_a + (113.0 / 3.0 - 76.0 / 3.0 * eta) * chi_s;

        let phi_4 = 15293365.0 / 508032.0 + 27145.0 / 504.0 * eta + 3085.0 / 72.0 * eta2
            + (-405.0 / 8.0 + 200.0 * eta) * chi_a * chi_a
            - 405.0 / 4.0 * delta * chi_a * chi_s
            + (-405.0 / 8.0 + 5.0 / 2.0 * eta) * chi_s * chi_s;

        // 2.5PN enters as (1 + ln x) times a single bracket.
        let phi_5 = 38645.0 * PI / 756.0 - 65.0 * PI / 9.0 * eta
            + delta * (-732985.0 / 2268.0 - 140.0 / 9.0 * eta) * chi_a
            + (-732985.0 / 2268.0 + 24260.0 / 81.0 * eta + 340.0 / 9.0 * eta2) * chi_s;

        let phi_6 = 11583231236531.0 / 4694215680.0 - 6848.0 / 21.0 * EULER_GAMMA - 640.0 / 3.0 * pi2
            + (-15737765635.0 / 3048192.0 + 2255.0 / 12.0 * pi2) * eta
            + 76055.0 / 1728.0 * eta2
            - 127825.0 / 1296.0 * eta3
            - 6848.0 / 21.0 * 4f64.ln()
            + 2270.0 / 3.0 * PI * delta * chi_a
            + (2270.0 / 3.0 * PI - 520.0 * PI * eta) * chi_s;

        let phi_7 = 77096675.0 * PI / 254016.0 + 378515.0 / 1512.0 * PI * eta - 74045.0 / 756.0 * PI * eta2
            + delta * (-25150083775.0 / 3048192.0 + 26804935.0 / 6048.0 * eta - 1985.0 / 48.0 * eta2) * chi_a
            + (-25150083775.0 / 3048192.0 + 10566655595.0 / 762048.0 * eta - 1042165.0 / 3024.0 * eta2
                + 5345.0 / 36.0 * eta3)
                * chi_s;

        Self {
            phi_0: 1.0,
            phi_1: 0.0,
            phi_2,
            phi_3,
            phi_4,
            phi_5,
            phi_5_l: phi_5,
            phi_6,
            phi_6_l: -6848.0 / 63.0,
            phi_7,
        }
    }
}

/// Baseline TaylorF2 phase as a term list, keeping PN indices `i < maxn`.
pub fn taylorf2_phase(
    binary: &BinaryParams,
    d: &DerivedParams,
    coeffs: &PnPhaseCoefficients,
    maxn: usize,
) -> PhaseSeries {
    let pre = 3.0 / (128.0 * d.eta);
    let c = coeffs;
    let orders: [(usize, &[PhaseTerm]); 8] = [
        (0, &[PhaseTerm::power(c.phi_0, -5.0 / 3.0)]),
        (1, &[PhaseTerm::power(c.phi_1, -4.0 / 3.0)]),
        (2, &[PhaseTerm::power(c.phi_2, -1.0)]),
        (3, &[PhaseTerm::power(c.phi_3, -2.0 / 3.0)]),
        (4, &[PhaseTerm::power(c.phi_4, -1.0 / 3.0)]),
        (5, &[PhaseTerm::power(c.phi_5, 0.0), PhaseTerm::log_power(c.phi_5_l, 0.0)]),
        (6, &[PhaseTerm::power(c.phi_6, 1.0 / 3.0), PhaseTerm::log_power(c.phi_6_l, 1.0 / 3.0)]),
        (7, &[PhaseTerm::power(c.phi_7, 2.0 / 3.0)]),
    ];

    let pn: PhaseSeries = orders
        .iter()
        .filter(|(i, _)| *i < maxn)
        .flat_map(|(_, terms)| terms.iter().copied())
        .collect();

    let mut series = PhaseSeries::new().with(PhaseTerm::power(-binary.phase - PI / 4.0, 0.0));
    series.extend(pn.scaled(pre));
    series
}

/// Amplitude coefficients `a_0 ... a_6` of the PN-expanded amplitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PnAmplitudeCoefficients {
    pub a_0: f64,
    pub a_1: f64,
    pub a_2: f64,
    pub a_3: f64,
    pub a_4: f64,
    pub a_5: f64,
    pub a_6: f64,
}

impl PnAmplitudeCoefficients {
    pub fn new(d: &DerivedParams) -> Self {
        let eta = d.eta;
        let eta2 = eta * eta;
        let eta3 = eta2 * eta;
        let delta = d.delta;
        let chi_s = d.chi_s;
        let chi_a = d.chi_a;
        let chi_s2 = chi_s * chi_s;
        let chi_a2 = chi_a * chi_a;
        let pi2 = PI * PI;

        let a_2 = -323.0 / 224.0 + 451.0 / 168.0 * eta;

        let a_3 = 27.0 / 8.0 * delta * chi_a + (27.0 / 8.0 - 11.0 / 6.0 * eta) * chi_s;

        let a_4 = -27312085.0 / 8128512.0 - 1975055.0 / 338688.0 * eta + 105271.0 / 24192.0 * eta2
            + (-81.0 / 32.0 + 8.0 * eta) * chi_a2
            - 81.0 / 16.0 * delta * chi_a * chi_s
            + (-81.0 / 32.0 + 17.0 / 8.0 * eta) * chi_s2;

        let a_5 = -85.0 * PI / 64.0 + 85.0 * PI / 16.0 * eta
            + delta * (285197.0 / 16128.0 - 1579.0 / 4032.0 * eta) * chi_a
            + (285197.0 / 16128.0 - 15317.0 / 672.0 * eta - 2227.0 / 1008.0 * eta2) * chi_s;

        let a_6 = -177520268561.0 / 8583708672.0
            + (545384828789.0 / 5007163392.0 - 205.0 * pi2 / 48.0) * eta
            - 3248849057.0 / 178827264.0 * eta2
            + 34473079.0 / 6386688.0 * eta3
            + (1614569.0 / 64512.0 - 1873643.0 / 16128.0 * eta + 2167.0 / 42.0 * eta2) * chi_a2
            + (31.0 * PI / 12.0 - 7.0 * PI / 3.0 * eta) * chi_s
            + (1614569.0 / 64512.0 - 61391.0 / 1344.0 * eta + 57451.0 / 4032.0 * eta2) * chi_s2
            + delta * chi_a * (31.0 * PI / 12.0 + (1614569.0 / 32256.0 - 165961.0 / 2688.0 * eta) * chi_s);

        Self {
            a_0: 1.0,
            a_1: 0.0,
            a_2,
            a_3,
            a_4,
            a_5,
            a_6,
        }
    }

    /// `Σ a_i x^{i/3}` as a term list.
    pub fn series(&self) -> PhaseSeries {
        [
            PhaseTerm::power(self.a_0, 0.0),
            PhaseTerm::power(self.a_1, 1.0 / 3.0),
            PhaseTerm::power(self.a_2, 2.0 / 3.0),
            PhaseTerm::power(self.a_3, 1.0),
            PhaseTerm::power(self.a_4, 4.0 / 3.0),
            PhaseTerm::power(self.a_5, 5.0 / 3.0),
            PhaseTerm::power(self.a_6, 2.0),
        ]
        .into_iter()
        .collect()
    }
}

/// Leading-order amplitude `π^{-2/3} √(5/24) (c/r) Mc^{5/6} f^{-7/6}` at `f_hz`.
pub fn newtonian_amplitude(d: &DerivedParams, distance_m: f64, f_hz: f64) -> f64 {
    PI.powf(-2.0 / 3.0)
        * (5.0f64 / 24.0).sqrt()
        * d.inverse_distance_s(distance_m)
        * d.chirp_mass_s.powf(5.0 / 6.0)
        * f_hz.powf(-7.0 / 6.0)
}
