//! # Strafe Engine
//!
//! Strafing kinematics for Half-Life style movement: the acceleration
//! constant K, closed-form speed/distance/time under optimal strafing,
//! inverse solvers for jump planning, and the per-frame movement, ladder,
//! damage and view helpers around them.

// Re-export the main types and functions
pub use advisory::{Advised, Advisory};
pub use damage::{ap_for_health_loss, fall_damage, hpap_damage, ArmorInterval, LowerBound, UpperBound};
pub use error::{DomainError, Result};
pub use kinematics::{distance_after, speed_after, speed_for_height_at_time, time_for, times_to_height};
pub use ladder::{maxspeed_normal, LadderAngles};
pub use numeric::{find_root, minimize_scalar, MinimizeOptions, MinimizeResult, RootOptions, RootResult};
pub use solvers::{
    solve_initial_horizontal_speed, solve_initial_horizontal_speed_with_options, solve_minimal_boost,
    solve_minimal_boost_with_options, Boost, Sign, Solution,
};
pub use strafe_params::{compute_k, StrafeParameters};
pub use view::{view_vectors_2d, view_vectors_3d};

// Module declarations
pub mod advisory;
pub mod common;
pub mod constants;
pub mod damage;
pub mod error;
pub mod ffi;
pub mod kinematics;
pub mod ladder;
pub mod movement;
pub mod numeric;
pub mod solvers;
pub mod strafe_params;
pub mod view;
