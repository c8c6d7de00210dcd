use crate::constants::{
    ANGLEMOD_UNIT_DEG, ANGLEMOD_UNIT_RAD, FLOAT_EQUAL_REL_TOLERANCE, FLOAT_ZERO_ABS_TOLERANCE,
};

/// Test if `a` and `b` are equal within a relative tolerance.
///
/// Mirrors `isclose` with a relative tolerance of 1e-9 and no absolute
/// tolerance, so `float_equal(x, 0.0)` only holds for exact zero.
pub fn float_equal(a: f64, b: f64) -> bool {
    if a == b {
        return true;
    }
    if !a.is_finite() || !b.is_finite() {
        return false;
    }
    (a - b).abs() <= FLOAT_EQUAL_REL_TOLERANCE * a.abs().max(b.abs())
}

/// Test if `a` is zero within an absolute tolerance of 1e-6.
pub fn float_zero(a: f64) -> bool {
    a.abs() <= FLOAT_ZERO_ABS_TOLERANCE
}

/// Quantise an angle in radians to 16-bit angle units.
///
/// Negative angles wrap around, e.g. -350° maps to the step just above 10°.
pub fn anglemod_rad(a: f64) -> f64 {
    anglemod(a, ANGLEMOD_UNIT_RAD)
}

/// Degrees version of [`anglemod_rad`].
pub fn anglemod_deg(a: f64) -> f64 {
    anglemod(a, ANGLEMOD_UNIT_DEG)
}

fn anglemod(a: f64, unit: f64) -> f64 {
    // Truncate toward zero first, then keep the low 16 bits (two's complement)
    let steps = (a / unit) as i64;
    (steps & 0xffff) as f64 * unit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_equal() {
        assert!(float_equal(1.5, 1.5 + 1e-10));
        assert!(!float_equal(1.5, 1.5 - 1e-4));
        assert!(!float_equal(1e-5, 0.0));
        assert!(float_equal(0.0, 0.0));
    }

    #[test]
    fn test_float_zero() {
        assert!(float_zero(1e-10));
        assert!(float_zero(-1e-7));
        assert!(!float_zero(1e-4));
    }

    #[test]
    fn test_anglemod_rad() {
        assert_eq!(anglemod_rad(0.0), 0.0);
        assert_eq!(anglemod_rad(10f64.to_radians()), 1820.0 * ANGLEMOD_UNIT_RAD);
        assert_eq!(anglemod_rad((-350f64).to_radians()), 1821.0 * ANGLEMOD_UNIT_RAD);
        assert_eq!(anglemod_rad(std::f64::consts::FRAC_PI_4), std::f64::consts::FRAC_PI_4);
    }

    #[test]
    fn test_anglemod_deg() {
        assert_eq!(anglemod_deg(0.0), 0.0);
        assert_eq!(anglemod_deg(30.0), 5461.0 * ANGLEMOD_UNIT_DEG);
        assert_eq!(anglemod_deg(-330.0), 5462.0 * ANGLEMOD_UNIT_DEG);
    }
}
