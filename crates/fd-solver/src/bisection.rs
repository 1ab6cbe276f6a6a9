//! Per-target bisection on the unrounded area function.

use fd_core::round_ticks;
use fd_syringe::model_area;
use std::f64::consts::TAU;

const MAX_ITER: usize = 200;

/// Smallest angle in `[0, 2π]` whose area rounds to at least `tick`.
///
/// Returns `None` when no angle rounds exactly to `tick`.
pub fn smallest_angle_for_tick(tick: i64, radius: f64, digits: u32) -> Option<f64> {
    let reaches = |theta: f64| round_ticks(model_area(theta, radius), digits) >= tick;

    if reaches(0.0) {
        return (round_ticks(0.0, digits) == tick).then_some(0.0);
    }
    if !reaches(TAU) {
        return None;
    }

    let (mut lo, mut hi) = (0.0_f64, TAU);
    for _ in 0..MAX_ITER {
        let mid = 0.5 * (lo + hi);
        if mid <= lo || mid >= hi {
            break;
        }
        if reaches(mid) {
            hi = mid;
        } else {
            lo = mid;
        }
    }

    (round_ticks(model_area(hi, radius), digits) == tick).then_some(hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn recovers_half_fill() {
        let r = 7.98;
        let half = model_area(PI, r);
        let tick = round_ticks(half, 3);
        let theta = smallest_angle_for_tick(tick, r, 3).unwrap();
        assert_eq!(round_ticks(model_area(theta, r), 3), tick);
        assert!((theta - PI).abs() < 1e-3);
    }

    #[test]
    fn zero_tick_is_zero_angle() {
        assert_eq!(smallest_angle_for_tick(0, 5.0, 2), Some(0.0));
    }

    #[test]
    fn beyond_full_bore_is_none() {
        let r = 5.0;
        let too_big = round_ticks(PI * r * r, 2) + 10;
        assert_eq!(smallest_angle_for_tick(too_big, r, 2), None);
    }
}
