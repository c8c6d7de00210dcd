//! Per-frame movement physics: collisions, friction, gravity and a single
//! strafe frame. These operate on velocities directly and are independent
//! of the continuous-time strafing model.

use crate::advisory::{Advised, Advisory};
use crate::common::{float_equal, float_zero};
use crate::constants::MIN_FRICTION_SPEED;
use crate::error::{DomainError, Result};
use nalgebra::{Vector2, Vector3};

/// Clip velocity `v` against a plane with unit normal `n` and bounce
/// factor `b` (usually 1).
///
/// `v` should point into the plane. If it points out of it, the velocity
/// is returned unchanged with [`Advisory::OutOfPlane`]. A bounce factor
/// below 1 stops the player dead, as the engine does.
pub fn collide(v: Vector3<f64>, n: Vector3<f64>, b: f64) -> Result<Advised<Vector3<f64>>> {
    let length = n.norm();
    if !float_equal(length, 1.0) {
        return Err(DomainError::NotUnitVector { length });
    }

    if b < 1.0 {
        return Ok(Advised::clean(Vector3::zeros()));
    }

    let vdotn = v.dot(&n);
    if vdotn > 0.0 {
        return Ok(Advised::flagged(v, Advisory::OutOfPlane));
    }

    Ok(Advised::clean(v - n * (vdotn * b)))
}

/// Apply one frame of ground friction to the horizontal part of `v`.
///
/// Above the stop speed `e` the speed shrinks by the factor 1 - τk; below
/// it a constant τek is removed, never reversing direction. The vertical
/// component is untouched. Edge and entity friction are the caller's job:
/// fold their multipliers into `k`.
pub fn friction(v: Vector3<f64>, tau: f64, e: f64, k: f64) -> Vector3<f64> {
    let horizontal = v.xy();
    let speed = horizontal.norm();
    if speed < MIN_FRICTION_SPEED {
        return v;
    }

    let new_horizontal = if speed >= e {
        horizontal * (1.0 - tau * k)
    } else {
        let drop = tau * e * k;
        if speed >= drop {
            horizontal - horizontal * (1.0 / speed) * drop
        } else {
            Vector2::zeros()
        }
    };

    Vector3::new(new_horizontal.x, new_horizontal.y, v.z)
}

/// Half a frame of gravity on the vertical component, as applied before
/// and after each movement step
pub fn gravity_half(v: Vector3<f64>, g: f64, tau: f64) -> Vector3<f64> {
    Vector3::new(v.x, v.y, v.z - 0.5 * g * tau)
}

/// One strafe frame at angle `theta` between velocity and acceleration.
///
/// Positive `theta` strafes to the left. `l` is typically `min(30, M)` in
/// the air and `M` on the ground, `gamma1` is usually k_e τMA. When the
/// projected speed already exceeds `l` no acceleration happens.
pub fn strafe_fme_theta(v: Vector2<f64>, theta: f64, l: f64, gamma1: f64) -> Result<Vector2<f64>> {
    let speed = v.norm();
    if float_zero(speed) {
        return Err(DomainError::DivisionByZero("strafe direction at zero speed"));
    }
    let vhat = v / speed;
    let (st, ct) = theta.sin_cos();
    let gamma2 = l - speed * ct;
    if gamma2 <= 0.0 {
        return Ok(v);
    }
    let mu = gamma1.min(gamma2);
    let accel_dir = Vector2::new(vhat.x * ct - vhat.y * st, vhat.x * st + vhat.y * ct);
    Ok(v + accel_dir * mu)
}

/// Scalar speed after one frame of ground friction
pub fn friction_speed(speed: f64, tau: f64, e: f64, k: f64) -> f64 {
    if speed >= e {
        speed - speed * tau * k
    } else {
        (speed - e * k * tau).max(0.0)
    }
}

/// Speed after friction followed by one optimally angled strafe frame.
///
/// Covers all three strafing cases: turn-rate limited (L - τMA ≤ 0),
/// acceleration limited, and the low-speed case where the full τMA is
/// added along the velocity.
pub fn strafe_max_accel_speed(speed: f64, l: f64, tau: f64, m: f64, a: f64, e: f64, k: f64) -> f64 {
    let speed = friction_speed(speed, tau, e, k);
    let tau_ma = tau * m * a;
    let slack = l - tau_ma;
    if slack <= 0.0 {
        (speed * speed + l * l).sqrt()
    } else if slack <= speed {
        (speed * speed + tau_ma * (l + slack)).sqrt()
    } else {
        speed + tau_ma
    }
}
