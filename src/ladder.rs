//! Optimal view angles for climbing ladders.

use crate::common::float_equal;
use crate::error::{DomainError, Result};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2};

/// View angles in radians. `yaw` is `None` when the ladder is horizontal
/// and any yaw gives the same climbing speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LadderAngles {
    pub pitch: f64,
    pub yaw: Option<f64>,
}

fn sign(x: f64) -> f64 {
    1.0f64.copysign(x)
}

/// View angles that climb a ladder with unit normal `n` at maximum speed.
///
/// `vdir` selects climbing up (positive) or down (negative); `f` and `s`
/// are the forward and side move values, of which only the signs matter.
pub fn maxspeed_normal(n: Vector3<f64>, vdir: f64, f: f64, s: f64) -> Result<LadderAngles> {
    if !float_equal(n.norm_squared(), 1.0) {
        return Err(DomainError::NotUnitVector { length: n.norm() });
    }

    if float_equal(n.z.abs(), 1.0) {
        return Ok(LadderAngles { pitch: 0.0, yaw: None });
    }

    let sign_vdir = sign(vdir);
    let sign_f = sign(f) * sign_vdir;
    let sign_s = sign(s) * sign_vdir;
    let mut yaw = n.y.atan2(n.x);

    let pitch = if n.z >= 0.0 {
        let tmp = (2.0 * n.z * n.x.hypot(n.y)).sqrt();
        yaw += (-sign_s).atan2(-sign_f * tmp);
        -sign_f * sign(FRAC_1_SQRT_2 - n.z) * tmp.acos()
    } else {
        yaw += sign_s * sign(FRAC_1_SQRT_2 + n.z) * FRAC_PI_2;
        -sign_f * FRAC_PI_2
    };

    Ok(LadderAngles { pitch, yaw: Some(yaw) })
}
