//! C ABI bindings for game tools and scripting hosts
//!
//! Every call returns a status code and writes its value through an out
//! pointer. Solver boundary cases are flattened the usual way: NaN for no
//! solution, ±inf for unbounded.

use crate::error::Result;
use crate::{
    compute_k, distance_after, solve_initial_horizontal_speed, solve_minimal_boost, speed_after,
    time_for,
};
use nalgebra::Vector2;
use std::os::raw::{c_char, c_double, c_int};
use tracing::debug;

pub const STRAFE_OK: c_int = 0;
pub const STRAFE_ERR_DOMAIN: c_int = 1;
pub const STRAFE_ERR_NULL: c_int = 2;

// FFI-safe structures with C-compatible layouts

#[repr(C)]
pub struct FFIStrafeParameters {
    pub turn_cap: c_double,           // L, wish speed cap
    pub frame_duration: c_double,     // tau, seconds
    pub max_speed: c_double,          // M
    pub accel: c_double,              // A
}

#[repr(C)]
pub struct FFIBoost {
    pub horizontal: c_double,
    pub vertical: c_double,
}

fn write_value(result: Result<f64>, out: *mut c_double) -> c_int {
    if out.is_null() {
        return STRAFE_ERR_NULL;
    }
    match result {
        Ok(value) => {
            unsafe { *out = value };
            STRAFE_OK
        }
        Err(e) => {
            debug!(error = %e, "ffi call rejected");
            unsafe { *out = f64::NAN };
            STRAFE_ERR_DOMAIN
        }
    }
}

#[no_mangle]
pub extern "C" fn strafe_compute_k(params: *const FFIStrafeParameters, out: *mut c_double) -> c_int {
    if params.is_null() {
        return STRAFE_ERR_NULL;
    }
    let params = unsafe { &*params };
    write_value(
        compute_k(params.turn_cap, params.frame_duration, params.max_speed, params.accel),
        out,
    )
}

#[no_mangle]
pub extern "C" fn strafe_speed_after(t: c_double, speed: c_double, k: c_double, out: *mut c_double) -> c_int {
    write_value(speed_after(t, speed, k), out)
}

#[no_mangle]
pub extern "C" fn strafe_distance_after(t: c_double, speed: c_double, k: c_double, out: *mut c_double) -> c_int {
    write_value(distance_after(t, speed, k), out)
}

#[no_mangle]
pub extern "C" fn strafe_time_for(x: c_double, speed: c_double, k: c_double, out: *mut c_double) -> c_int {
    write_value(time_for(x, speed, k), out)
}

/// Writes NaN when there is no solution and +inf when the speed is unbounded
#[no_mangle]
pub extern "C" fn strafe_solve_initial_horizontal_speed(
    speed_z: c_double,
    k: c_double,
    x: c_double,
    z: c_double,
    g: c_double,
    out: *mut c_double,
) -> c_int {
    write_value(
        solve_initial_horizontal_speed(speed_z, k, x, z, g).map(|s| s.to_f64()),
        out,
    )
}

#[no_mangle]
pub extern "C" fn strafe_solve_minimal_boost(
    initial_horizontal: c_double,
    initial_vertical: c_double,
    k: c_double,
    x: c_double,
    z: c_double,
    g: c_double,
    out: *mut FFIBoost,
) -> c_int {
    if out.is_null() {
        return STRAFE_ERR_NULL;
    }
    let initial_velocity = Vector2::new(initial_horizontal, initial_vertical);
    match solve_minimal_boost(initial_velocity, k, x, z, g) {
        Ok(boost) => {
            unsafe {
                (*out).horizontal = boost.horizontal;
                (*out).vertical = boost.vertical;
            }
            STRAFE_OK
        }
        Err(e) => {
            debug!(error = %e, "ffi call rejected");
            unsafe {
                (*out).horizontal = f64::NAN;
                (*out).vertical = f64::NAN;
            }
            STRAFE_ERR_DOMAIN
        }
    }
}

// Get library version
#[no_mangle]
pub extern "C" fn strafe_get_version() -> *const c_char {
    concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr() as *const c_char
}
