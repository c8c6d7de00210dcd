/// Physical constants and numerical defaults used by the strafing model

/// Default gravitational acceleration in units/s²
///
/// Value: 800 (the `sv_gravity` default)
pub const GRAVITY: f64 = 800.0;

/// Default friction speed threshold E in units/s
///
/// Below this horizontal speed ground friction removes a constant amount
/// per frame instead of a proportional one (`sv_stopspeed`).
pub const STOP_SPEED: f64 = 100.0;

/// Default ground friction coefficient k (`sv_friction`)
pub const FRICTION: f64 = 4.0;

/// Default air-strafe turn-rate cap L
///
/// Air strafing clamps the wish speed to 30 units/s before accelerating,
/// which is why L is usually `min(30, M)` in the air and `M` on the ground.
pub const AIR_TURN_CAP: f64 = 30.0;

/// Default frame duration τ in seconds (1000 fps)
pub const FRAME_DURATION: f64 = 0.001;

/// Default maximum speed M (`sv_maxspeed`)
pub const MAX_SPEED: f64 = 320.0;

/// Default air acceleration A (`sv_airaccelerate`)
pub const AIR_ACCELERATE: f64 = 10.0;

/// Default ground acceleration A (`sv_accelerate`)
pub const ACCELERATE: f64 = 10.0;

/// Smallest representable angle step in radians
///
/// Angles are quantised to 16 bits: 2π / 65536.
pub const ANGLEMOD_UNIT_RAD: f64 = std::f64::consts::PI / 32768.0;

/// Smallest representable angle step in degrees: 360 / 65536
pub const ANGLEMOD_UNIT_DEG: f64 = 360.0 / 65536.0;

// Comparison tolerances

/// Relative tolerance for `float_equal`
pub const FLOAT_EQUAL_REL_TOLERANCE: f64 = 1e-9;

/// Absolute tolerance for `float_zero`
pub const FLOAT_ZERO_ABS_TOLERANCE: f64 = 1e-6;

/// Horizontal speed below which friction is skipped entirely
pub const MIN_FRICTION_SPEED: f64 = 0.1;

// Numeric primitive defaults

/// Absolute x tolerance for root finding
pub const ROOT_FINDING_TOLERANCE: f64 = 1e-12;

/// Iteration cap for root finding
///
/// Bisection alone halves the bracket each step, so 200 iterations cover
/// any finite f64 bracket down to `ROOT_FINDING_TOLERANCE`.
pub const ROOT_FINDING_MAX_ITER: usize = 200;

/// Absolute x tolerance for scalar minimisation
pub const MINIMIZE_TOLERANCE: f64 = 1e-10;

/// Iteration cap for scalar minimisation
pub const MINIMIZE_MAX_ITER: usize = 500;

/// Number of golden-ratio expansions tried when searching for a bracket
pub const BRACKET_MAX_EXPANSIONS: usize = 100;
