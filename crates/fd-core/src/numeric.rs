use crate::FdError;

/// Floating point type used throughout system
pub type Real = f64;

/// Largest supported number of rounding digits for area matching.
pub const MAX_ACCURACY_DIGITS: u32 = 5;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, FdError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(FdError::NonFinite { what, value: v })
    }
}

/// Reject values that would be used as a divisor.
///
/// Zero (or negative) divisors are reported as `DivisionByZero` so callers
/// never propagate NaN/Inf into a series.
pub fn ensure_positive_divisor(v: Real, what: &'static str) -> Result<Real, FdError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(FdError::DivisionByZero { what })
    }
}

/// Scale factor `10^digits` for the given accuracy.
pub fn digits_scale(digits: u32) -> Real {
    10f64.powi(digits.min(MAX_ACCURACY_DIGITS) as i32)
}

/// Round `v` to `digits` decimal places and return it as integer ticks.
///
/// Two values round to the same decimal iff their ticks are equal, which
/// keeps table matching exact instead of comparing floats.
pub fn round_ticks(v: Real, digits: u32) -> i64 {
    (v * digits_scale(digits)).round() as i64
}

/// Round `v` to `digits` decimal places.
pub fn round_to_digits(v: Real, digits: u32) -> Real {
    round_ticks(v, digits) as Real / digits_scale(digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn zero_divisor_is_rejected() {
        let err = ensure_positive_divisor(0.0, "flow rate").unwrap_err();
        assert_eq!(err, FdError::DivisionByZero { what: "flow rate" });
        assert!(ensure_positive_divisor(-1.0, "x").is_err());
        assert_eq!(ensure_positive_divisor(2.5, "x").unwrap(), 2.5);
    }

    #[test]
    fn ticks_follow_decimal_rounding() {
        assert_eq!(round_ticks(12.344, 2), 1234);
        assert_eq!(round_ticks(12.346, 2), 1235);
        assert_eq!(round_ticks(12.6, 0), 13);
        assert_eq!(round_ticks(0.000_04, 5), 4);
        assert!(nearly_equal(
            round_to_digits(3.14159, 3),
            3.142,
            Tolerances::default()
        ));
    }

    #[test]
    fn digits_are_capped() {
        assert_eq!(digits_scale(9), digits_scale(MAX_ACCURACY_DIGITS));
    }
}
