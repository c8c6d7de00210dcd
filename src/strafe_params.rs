use crate::constants::{AIR_ACCELERATE, AIR_TURN_CAP, FRAME_DURATION, MAX_SPEED};
use crate::error::{DomainError, Result};
use serde::{Deserialize, Serialize};

/// Strafing configuration: turn-rate cap L, frame duration τ, maximum
/// speed M and acceleration A. All four must be non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrafeParameters {
    pub turn_cap: f64,
    pub frame_duration: f64,
    pub max_speed: f64,
    pub accel: f64,
}

impl Default for StrafeParameters {
    /// Air strafing at 1000 fps with the stock server settings
    fn default() -> Self {
        Self {
            turn_cap: AIR_TURN_CAP,
            frame_duration: FRAME_DURATION,
            max_speed: MAX_SPEED,
            accel: AIR_ACCELERATE,
        }
    }
}

impl StrafeParameters {
    pub fn new(turn_cap: f64, frame_duration: f64, max_speed: f64, accel: f64) -> Self {
        Self { turn_cap, frame_duration, max_speed, accel }
    }

    /// Ground strafing, where the wish speed is not clamped so L = M
    pub fn ground(frame_duration: f64, max_speed: f64, accel: f64) -> Self {
        Self::new(max_speed, frame_duration, max_speed, accel)
    }

    /// Acceleration budget K for this configuration
    pub fn k(&self) -> Result<f64> {
        compute_k(self.turn_cap, self.frame_duration, self.max_speed, self.accel)
    }
}

/// Compute the acceleration constant K from strafing parameters.
///
/// Folds the turn-rate-limited regime (L - τMA ≤ 0, K = L²/τ) and the
/// acceleration-limited regime (K = MA(L + L - τMA)) into one constant.
/// The third regime, where L - τMA exceeds the current speed, only occurs
/// at very low speeds and is not modelled; negative parameters would
/// reach it and are rejected.
pub fn compute_k(turn_cap: f64, frame_duration: f64, max_speed: f64, accel: f64) -> Result<f64> {
    for (name, value) in [
        ("turn_cap", turn_cap),
        ("frame_duration", frame_duration),
        ("max_speed", max_speed),
        ("accel", accel),
    ] {
        if value < 0.0 {
            return Err(DomainError::NegativeParameter { name, value });
        }
    }

    let l = turn_cap.min(max_speed);
    let slack = l - frame_duration * max_speed * accel;
    if slack <= 0.0 {
        if frame_duration == 0.0 {
            return Err(DomainError::DivisionByZero("L^2 / tau with tau = 0"));
        }
        return Ok(l * l / frame_duration);
    }
    Ok(max_speed * accel * (l + slack))
}
