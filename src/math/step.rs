//! Band indicator weights.
//!
//! Bands are joined with `θ∓(f, b) = ½(1 ∓ step(f, b))` where `step` is the sign
//! of `f - b`. Away from a boundary exactly one band contributes; a sample sitting
//! on the boundary takes the mean of both neighbours, which is the matched value
//! once the seam coefficients are solved.

/// `sign(f - boundary)`, with 0 on the boundary.
pub fn step_function(f: f64, boundary: f64) -> f64 {
    if f > boundary {
        1.0
    } else if f < boundary {
        -1.0
    } else {
        0.0
    }
}

/// Weight of the band below `boundary`.
pub fn theta_minus(step: f64) -> f64 {
    0.5 * (1.0 - step)
}

/// Weight of the band above `boundary`.
pub fn theta_plus(step: f64) -> f64 {
    0.5 * (1.0 + step)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_split_evenly_on_the_boundary() {
        let s = step_function(0.018, 0.018);
        assert_eq!(theta_minus(s), 0.5);
        assert_eq!(theta_plus(s), 0.5);
    }

    #[test]
    fn weights_select_one_band_away_from_it() {
        assert_eq!(theta_minus(step_function(0.01, 0.018)), 1.0);
        assert_eq!(theta_plus(step_function(0.01, 0.018)), 0.0);
        assert_eq!(theta_plus(step_function(0.02, 0.018)), 1.0);
    }
}
