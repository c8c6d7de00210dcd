//! Closed-form strafing and ballistic relations.
//!
//! Horizontal motion under optimal strafing satisfies v(t)² = v₀² + Kt,
//! so distance is a 3/2 power of time. Vertical motion is plain constant
//! gravity. All functions assume case 1 or case 2 strafing and are a
//! continuous-time approximation of per-frame motion.

use crate::common::{float_equal, float_zero};
use crate::error::{DomainError, Result};

fn check_k(k: f64) -> Result<()> {
    if k < 0.0 {
        return Err(DomainError::NegativeK(k));
    }
    Ok(())
}

/// Speed after strafing for `t` seconds from speed `speed`.
///
/// Negative `t` is accepted (strafing backwards in time) as long as the
/// squared speed stays non-negative.
pub fn speed_after(t: f64, speed: f64, k: f64) -> Result<f64> {
    check_k(k)?;
    let sq = speed * speed + t * k;
    if sq < 0.0 {
        return Err(DomainError::ComplexResult("sqrt(v0^2 + tK)"));
    }
    Ok(sq.sqrt())
}

/// Distance covered after strafing for `t` seconds from speed `speed`.
///
/// The sign of `speed` is ignored.
pub fn distance_after(t: f64, speed: f64, k: f64) -> Result<f64> {
    check_k(k)?;
    let speed = speed.abs();
    if float_equal(k, 0.0) {
        return Ok(speed * t);
    }
    let speedsq = speed * speed;
    let base = speedsq + t * k;
    if base < 0.0 {
        return Err(DomainError::ComplexResult("(v0^2 + tK)^1.5"));
    }
    let ret = (base.powf(1.5) - speedsq * speed) / (1.5 * k);
    // Negative t with a small speed gives a negative antiderivative
    Ok(ret.abs())
}

/// Time needed to strafe a distance `x` starting at speed `speed`.
///
/// Inverse of [`distance_after`] at fixed speed. Signs of both `x` and
/// `speed` are ignored and the result is never negative. With K ≈ 0 this
/// is straight-line motion, so zero speed gives +inf.
pub fn time_for(x: f64, speed: f64, k: f64) -> Result<f64> {
    check_k(k)?;
    let speed = speed.abs();
    let x = x.abs();
    if float_zero(x) {
        return Ok(0.0);
    }
    if float_zero(k) {
        if speed == 0.0 {
            return Ok(f64::INFINITY);
        }
        return Ok(x / speed);
    }
    let sq = speed * speed;
    let ret = ((sq * speed + 1.5 * k * x).powf(2.0 / 3.0) - sq) / k;
    // Cancellation with tiny x and a large speed can dip below zero
    Ok(ret.max(0.0))
}

/// Initial vertical speed needed to be at height `z` after `t` seconds
/// under gravity `g`. `z` may be negative.
///
/// At t = 0 the answer is infinite with the sign of `z`; if `z` is zero
/// as well the form is indeterminate.
pub fn speed_for_height_at_time(t: f64, z: f64, g: f64) -> Result<f64> {
    if float_zero(t) && float_zero(z) {
        return Err(DomainError::Indeterminate("(g t^2 / 2 + z) / t"));
    }
    if t == 0.0 {
        return Ok(f64::INFINITY.copysign(z));
    }
    Ok((0.5 * g * t * t + z) / t)
}

/// Both times at which a body launched upward at `speed_z` passes height
/// `z`, ordered so that the first is on the ascending branch.
///
/// With g ≈ 0 the motion is linear and both times coincide. A negative
/// discriminant means the height is never reached.
pub fn times_to_height(speed_z: f64, z: f64, g: f64) -> Result<(f64, f64)> {
    if float_zero(g) {
        if speed_z == 0.0 {
            return Err(DomainError::DivisionByZero("z / v0z with v0z = 0"));
        }
        let t = z / speed_z;
        return Ok((t, t));
    }
    let discriminant = speed_z * speed_z - 2.0 * g * z;
    if discriminant < 0.0 {
        return Err(DomainError::UnreachableHeight { discriminant });
    }
    let sqrt_tmp = discriminant.sqrt();
    let t1 = (speed_z - sqrt_tmp) / g;
    let t2 = (speed_z + sqrt_tmp) / g;
    Ok((t1, t2))
}
