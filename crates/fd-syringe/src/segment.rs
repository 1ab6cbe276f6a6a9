//! Circular-segment geometry of liquid lying in a horizontal barrel.
//!
//! The liquid occupies a segment of the circular cross-section subtended by
//! the central angle `θ`. Its area is `(r²/2)(θ − sin θ)`, non-decreasing on
//! `[0, 2π]` with no closed-form inverse.

/// Cross-section area (mm²) of the liquid segment for central angle `theta`.
pub fn model_area(theta: f64, radius: f64) -> f64 {
    (radius.powi(2) / 2.0) * (theta - theta.sin())
}

/// Segment height `(D/2)(1 − cos(θ/2))` without the wall clamp.
pub fn segment_height(diameter: f64, theta: f64) -> f64 {
    (diameter / 2.0) * (1.0 - (theta / 2.0).cos())
}

/// Liquid height (mm) for central angle `theta` in a barrel of `diameter`.
///
/// Heights above the barrel axis are pinned to `D/2`: beyond that the liquid
/// reaches the outlet and leaves the syringe.
pub fn calculate_height(diameter: f64, theta: f64) -> f64 {
    segment_height(diameter, theta).min(diameter / 2.0)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::TAU;

    proptest! {
        #[test]
        fn height_never_exceeds_radius(
            diameter in 1.0_f64..30.0,
            theta in -20.0_f64..20.0,
        ) {
            prop_assert!(calculate_height(diameter, theta) <= diameter / 2.0);
        }

        #[test]
        fn area_is_non_decreasing(
            radius in 1.0_f64..15.0,
            a in 0.0_f64..TAU,
            b in 0.0_f64..TAU,
        ) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(model_area(lo, radius) <= model_area(hi, radius));
        }
    }
}
