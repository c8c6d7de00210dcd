//! Property-based tests for the strafing model and its solvers.
//!
//! - Round trip between distance and time
//! - Monotonicity of speed and distance in time
//! - K is non-negative and continuous across the regime boundary
//! - Sign symmetry in x and initial speed
//! - Solver outputs satisfy the arrival condition
//! - Minimal boosts are non-negative and idempotent

use nalgebra::{Vector2, Vector3};
use proptest::prelude::*;
use strafe_engine::constants::{FRICTION, GRAVITY, STOP_SPEED};
use strafe_engine::movement::{collide, friction};
use strafe_engine::{
    compute_k, distance_after, solve_initial_horizontal_speed, solve_minimal_boost, speed_after,
    time_for, times_to_height, Solution,
};

const G: f64 = GRAVITY;

// =============================================================================
// Kinematics
// =============================================================================

proptest! {
    #[test]
    fn distance_after_inverts_time_for(
        x in 1.0f64..5000.0,
        v in 0.0f64..2000.0,
        k in 1e3f64..1e6,
    ) {
        let t = time_for(x, v, k).unwrap();
        let d = distance_after(t, v, k).unwrap();
        prop_assert!(
            (d - x).abs() <= 1e-6 * x,
            "x={}, v={}, k={}, t={}, d={}", x, v, k, t, d
        );
    }

    #[test]
    fn speed_and_distance_grow_with_time(
        t1 in 0.0f64..10.0,
        t2 in 0.0f64..10.0,
        v in 0.0f64..2000.0,
        k in 1.0f64..1e6,
    ) {
        let (lo, hi) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
        prop_assert!(speed_after(lo, v, k).unwrap() <= speed_after(hi, v, k).unwrap());
        prop_assert!(distance_after(lo, v, k).unwrap() <= distance_after(hi, v, k).unwrap());
    }

    #[test]
    fn signs_of_x_and_speed_are_ignored(
        x in -5000.0f64..5000.0,
        v in -2000.0f64..2000.0,
        t in 0.0f64..5.0,
        k in 0.0f64..1e6,
    ) {
        prop_assert_eq!(time_for(x, v, k).unwrap(), time_for(-x, -v, k).unwrap());
        prop_assert_eq!(distance_after(t, v, k).unwrap(), distance_after(t, -v, k).unwrap());
        prop_assert!(time_for(x, v, k).unwrap() >= 0.0);
    }
}

// =============================================================================
// Acceleration constant
// =============================================================================

proptest! {
    #[test]
    fn k_is_non_negative_and_finite(
        turn_cap in 0.0f64..400.0,
        tau in 1e-4f64..0.1,
        max_speed in 0.0f64..1000.0,
        accel in 0.0f64..100.0,
    ) {
        let k = compute_k(turn_cap, tau, max_speed, accel).unwrap();
        prop_assert!(k >= 0.0 && k.is_finite(), "k={}", k);
    }

    #[test]
    fn k_is_continuous_at_regime_boundary(
        turn_cap in 1.0f64..400.0,
        max_speed in 1.0f64..1000.0,
        accel in 0.1f64..100.0,
    ) {
        let l = turn_cap.min(max_speed);
        let tau = l / (max_speed * accel);
        let below = compute_k(turn_cap, tau * (1.0 - 1e-9), max_speed, accel).unwrap();
        let above = compute_k(turn_cap, tau * (1.0 + 1e-9), max_speed, accel).unwrap();
        prop_assert!((below - above).abs() <= 1e-6 * above, "below={}, above={}", below, above);
    }
}

// =============================================================================
// Solvers
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn solved_speed_arrives_with_vertical_motion(
        speed_z in 0.0f64..1000.0,
        z in -300.0f64..300.0,
        x in 1.0f64..3000.0,
        k in prop_oneof![Just(0.0), 1.0f64..1e6],
    ) {
        prop_assume!(speed_z * speed_z >= 2.0 * G * z);
        let (t1, t2) = times_to_height(speed_z, z, G).unwrap();
        let tz = if t1 >= 0.0 { t1 } else { t2 };

        let solution = solve_initial_horizontal_speed(speed_z, k, x, z, G).unwrap();
        prop_assert_eq!(solution, solve_initial_horizontal_speed(speed_z, k, -x, z, G).unwrap());
        if let Solution::Exact(v) = solution {
            prop_assert!(v >= 0.0);
            if v > 0.0 {
                let tx = time_for(x, v, k).unwrap();
                prop_assert!((tx - tz).abs() <= 1e-6, "tx={}, tz={}", tx, tz);
            }
        }
    }

    #[test]
    fn minimal_boost_is_non_negative_and_idempotent(
        vix in -500.0f64..500.0,
        viz in -500.0f64..500.0,
        x in 10.0f64..2000.0,
        z in -300.0f64..300.0,
        k in prop_oneof![Just(0.0), 1.0f64..1e6],
    ) {
        let boost = solve_minimal_boost(Vector2::new(vix, viz), k, x, z, G).unwrap();
        prop_assert!(boost.horizontal >= 0.0 && boost.horizontal.is_finite(), "{:?}", boost);
        prop_assert!(boost.vertical >= 0.0 && boost.vertical.is_finite(), "{:?}", boost);

        let boosted = Vector2::new(vix.abs() + boost.horizontal, viz + boost.vertical);
        let again = solve_minimal_boost(boosted, k, x, z, G).unwrap();
        prop_assert!(again.horizontal.abs() < 1e-3, "{:?}", again);
        prop_assert!(again.vertical.abs() < 1e-3, "{:?}", again);
    }
}

// =============================================================================
// Per-frame movement
// =============================================================================

proptest! {
    #[test]
    fn friction_never_speeds_up_or_reverses(
        vx in -3000.0f64..3000.0,
        vy in -3000.0f64..3000.0,
        vz in -1000.0f64..1000.0,
        tau in 1e-4f64..0.1,
        k in 0.0f64..(2.0 * FRICTION),
    ) {
        let before = Vector3::new(vx, vy, vz);
        let after = friction(before, tau, STOP_SPEED, k);
        prop_assert!(after.xy().norm() <= before.xy().norm() + 1e-9);
        prop_assert!(after.xy().dot(&before.xy()) >= 0.0);
        prop_assert_eq!(after.z, vz);
    }

    #[test]
    fn collide_leaves_no_velocity_into_plane(
        nx in -1.0f64..1.0,
        ny in -1.0f64..1.0,
        nz in -1.0f64..1.0,
        vx in -1000.0f64..1000.0,
        vy in -1000.0f64..1000.0,
        vz in -1000.0f64..1000.0,
    ) {
        let n = Vector3::new(nx, ny, nz);
        prop_assume!(n.norm() > 0.1);
        let n = n.normalize();
        let v = Vector3::new(vx, vy, vz);

        let out = collide(v, n, 1.0).unwrap();
        if out.is_flagged() {
            prop_assert_eq!(out.value, v);
        } else {
            prop_assert!(out.value.dot(&n).abs() <= 1e-9 * v.norm().max(1.0));
        }
    }
}
