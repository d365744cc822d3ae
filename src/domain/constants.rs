//! Physical constants (SI).

/// Newton's gravitational constant [m^3 kg^-1 s^-2].
pub const G: f64 = 6.674_30e-11;

/// Speed of light [m/s].
pub const C: f64 = 299_792_458.0;

/// Solar mass [kg].
pub const M_SUN: f64 = 1.988_409_870_698_051e30;

/// Megaparsec [m].
pub const MPC: f64 = 3.085_677_581_491_367e22;

/// Euler–Mascheroni constant.
pub const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// Geometric time of one solar mass, `G M_sun / c^3` [s].
pub fn solar_mass_seconds() -> f64 {
    G * M_SUN / (C * C * C)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solar_mass_time_is_about_five_microseconds() {
        let t = solar_mass_seconds();
        assert!((t - 4.925e-6).abs() < 1e-8, "got {t}");
    }
}
