//! Inverse problems: which horizontal speed, or which boost, makes the
//! strafed horizontal motion and the ballistic vertical motion arrive at
//! their targets at the same time.

use crate::common::{float_equal, float_zero};
use crate::error::{DomainError, Result};
use crate::kinematics::{speed_for_height_at_time, time_for, times_to_height};
use crate::numeric::{find_root, minimize_scalar, MinimizeOptions, RootOptions};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sign {
    Positive,
    Negative,
}

/// Outcome of an inverse solve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Solution {
    Exact(f64),
    /// The answer is infinite, e.g. arriving in zero time
    Unbounded(Sign),
    /// The target cannot be reached at all
    NoSolution,
}

impl Solution {
    /// Flat f64 form: ±inf for unbounded, NaN for no solution
    pub fn to_f64(self) -> f64 {
        match self {
            Solution::Exact(v) => v,
            Solution::Unbounded(Sign::Positive) => f64::INFINITY,
            Solution::Unbounded(Sign::Negative) => f64::NEG_INFINITY,
            Solution::NoSolution => f64::NAN,
        }
    }

    pub fn exact(self) -> Option<f64> {
        match self {
            Solution::Exact(v) => Some(v),
            _ => None,
        }
    }
}

/// Initial horizontal speed needed to reach horizontal distance `x` at the
/// moment the ballistic motion (launched at `speed_z`, gravity `g`) first
/// reaches height `z`. `z` may be negative, the sign of `x` is ignored.
///
/// Returns `Exact(0.0)` when strafing from standing still already gets
/// there no later than the vertical motion. In that case the caller has to
/// waste time some other way (a longer path, backpedalling) so both arrive
/// together. Returns `Unbounded` when the vertical target is reached at
/// t = 0 but `x` is not zero, and `NoSolution` when the height is only
/// reached at negative times.
pub fn solve_initial_horizontal_speed(
    speed_z: f64,
    k: f64,
    x: f64,
    z: f64,
    g: f64,
) -> Result<Solution> {
    solve_initial_horizontal_speed_with_options(speed_z, k, x, z, g, &RootOptions::default())
}

pub fn solve_initial_horizontal_speed_with_options(
    speed_z: f64,
    k: f64,
    x: f64,
    z: f64,
    g: f64,
    options: &RootOptions,
) -> Result<Solution> {
    if k < 0.0 {
        return Err(DomainError::NegativeK(k));
    }

    let (t1, t2) = times_to_height(speed_z, z, g)?;
    let tz = if t1 >= 0.0 {
        t1
    } else if t2 >= 0.0 {
        t2
    } else {
        debug!(t1, t2, "height only reached in the past");
        return Ok(Solution::NoSolution);
    };

    let x = x.abs();
    if float_zero(x) {
        return Ok(Solution::Exact(0.0));
    }
    if float_zero(k) {
        // No acceleration: constant speed over the whole flight
        if float_zero(tz) {
            return Ok(Solution::Unbounded(Sign::Positive));
        }
        return Ok(Solution::Exact(x / tz));
    }

    // Slowest horizontal arrival: strafing from zero speed
    let txmax = (1.5 * x).powf(2.0 / 3.0) * k.powf(-1.0 / 3.0);
    if float_zero(txmax) {
        return Ok(Solution::Exact(0.0));
    }
    if float_equal(txmax, tz) || txmax < tz {
        debug!(txmax, tz, "zero initial speed arrives early enough");
        return Ok(Solution::Exact(0.0));
    }
    if float_zero(tz) {
        return Ok(Solution::Unbounded(Sign::Positive));
    }

    // x / tz is the constant speed covering x in tz; strafing only adds
    // speed, so the root lies below it
    let upper = x / tz;
    let residual = |v: f64| time_for(x, v, k).unwrap_or(f64::NAN) - tz;
    let result = find_root(residual, 0.0, upper, options)?;
    debug!(
        speed = result.root,
        iterations = result.iterations,
        converged = result.converged,
        "initial horizontal speed solved"
    );
    Ok(Solution::Exact(result.root))
}

/// Velocity increment along the horizontal and vertical directions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Boost {
    pub horizontal: f64,
    pub vertical: f64,
}

impl Boost {
    pub fn as_vector(&self) -> Vector2<f64> {
        Vector2::new(self.horizontal, self.vertical)
    }

    pub fn magnitude(&self) -> f64 {
        self.horizontal.hypot(self.vertical)
    }
}

/// Smallest boost (dx, dy), both non-negative, that makes the strafe time
/// to |x| from horizontal speed |vᵢₓ| + dx equal the time at which the
/// boosted vertical motion vᵢz + dy sits at height `z`.
///
/// The vertical component only ever adds speed: when the required vertical
/// speed is below the current one, dy is 0. This turns the "arrive no
/// earlier than the horizontal target" constraint into a one-sided penalty
/// on dx² + dy², minimised over dx ≥ 0.
///
/// Resulting paths tend to end on the descending branch. The boost is
/// finite except when x = 0 and z > 0: the target then has to be reached
/// in zero time, so dx is 0 and dy is +inf.
pub fn solve_minimal_boost(
    initial_velocity: Vector2<f64>,
    k: f64,
    x: f64,
    z: f64,
    g: f64,
) -> Result<Boost> {
    solve_minimal_boost_with_options(initial_velocity, k, x, z, g, &MinimizeOptions::default())
}

pub fn solve_minimal_boost_with_options(
    initial_velocity: Vector2<f64>,
    k: f64,
    x: f64,
    z: f64,
    g: f64,
    options: &MinimizeOptions,
) -> Result<Boost> {
    if k < 0.0 {
        return Err(DomainError::NegativeK(k));
    }

    let x = x.abs();
    let vix = initial_velocity.x.abs();
    let viz = initial_velocity.y;

    let compute_dy = |dx: f64| -> f64 {
        let tx = match time_for(x, vix + dx, k) {
            Ok(tx) => tx,
            Err(_) => return f64::NAN,
        };
        match speed_for_height_at_time(tx, z, g) {
            // Never arriving horizontally (tx = inf) gives inf/inf
            Ok(needed) if needed.is_nan() => f64::INFINITY,
            Ok(needed) => (needed - viz).max(0.0),
            // 0/0 means no height to gain in no time
            Err(_) => 0.0,
        }
    };

    // At x = 0 the arrival time is 0 whatever dx is, so dx only adds cost
    if float_zero(x) {
        let dy = compute_dy(0.0);
        debug!(dy, "target straight above or below");
        return Ok(Boost { horizontal: 0.0, vertical: dy });
    }

    let objective = |dx: f64| {
        let dy = compute_dy(dx);
        dx * dx + dy * dy
    };

    let result = minimize_scalar(objective, None, options)?;
    let dx = result.x.max(0.0);
    let dy = compute_dy(dx);
    debug!(
        dx,
        dy,
        iterations = result.iterations,
        converged = result.converged,
        "minimal boost solved"
    );
    Ok(Boost { horizontal: dx, vertical: dy })
}
