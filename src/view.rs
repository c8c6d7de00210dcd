use crate::advisory::{Advised, Advisory};
use crate::common::float_zero;
use nalgebra::{Vector2, Vector3};

/// Unit forward and side view vectors projected onto the horizontal plane.
///
/// Angles are in radians with zero roll. Equivalent to taking the 3D
/// vectors, dropping z and renormalising. At a pitch of ±π/2 the
/// horizontal direction is lost; the vectors are still computed as if the
/// pitch were not vertical and [`Advisory::GimbalLock`] is attached.
pub fn view_vectors_2d(pitch: f64, yaw: f64) -> Advised<(Vector2<f64>, Vector2<f64>)> {
    let (syaw, cyaw) = yaw.sin_cos();
    let forward = Vector2::new(cyaw, syaw);
    let side = Vector2::new(syaw, -cyaw);
    if float_zero(pitch.cos()) {
        Advised::flagged((forward, side), Advisory::GimbalLock)
    } else {
        Advised::clean((forward, side))
    }
}

/// Unit forward and side view vectors in 3D
pub fn view_vectors_3d(pitch: f64, yaw: f64) -> (Vector3<f64>, Vector3<f64>) {
    let (syaw, cyaw) = yaw.sin_cos();
    let (spitch, cpitch) = pitch.sin_cos();
    let forward = Vector3::new(cyaw * cpitch, syaw * cpitch, -spitch);
    let side = Vector3::new(syaw, -cyaw, 0.0);
    (forward, side)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close2(a: Vector2<f64>, x: f64, y: f64) -> bool {
        (a.x - x).abs() < 1e-9 && (a.y - y).abs() < 1e-9
    }

    fn close3(a: Vector3<f64>, b: Vector3<f64>) -> bool {
        (a - b).norm() < 1e-9
    }

    #[test]
    fn test_view_vectors_2d() {
        let out = view_vectors_2d(0.0, 0.0);
        assert!(!out.is_flagged());
        assert_eq!(out.value, (Vector2::new(1.0, 0.0), Vector2::new(0.0, -1.0)));

        let (fv, sv) = view_vectors_2d(45f64.to_radians(), 0.0).into_value();
        assert_eq!((fv, sv), (Vector2::new(1.0, 0.0), Vector2::new(0.0, -1.0)));

        let (fv, sv) = view_vectors_2d(30f64.to_radians(), 115f64.to_radians()).into_value();
        assert!(close2(fv, -0.42261826174069933, 0.90630778703665));
        assert!(close2(sv, 0.90630778703665, 0.42261826174069933));
    }

    #[test]
    fn test_view_vectors_3d() {
        let (fv, sv) = view_vectors_3d(0.0, 0.0);
        assert!(close3(fv, Vector3::x()));
        assert!(close3(sv, -Vector3::y()));

        let (pitch, yaw) = ((-80f64).to_radians(), 115f64.to_radians());
        let (fv, sv) = view_vectors_3d(pitch, yaw);
        let expected = Vector3::new(yaw.cos() * pitch.cos(), yaw.sin() * pitch.cos(), -pitch.sin());
        assert!(close3(fv, expected));
        let rad25 = 25f64.to_radians();
        assert!(close3(sv, Vector3::new(rad25.cos(), rad25.sin(), 0.0)));

        let (fv, sv) = view_vectors_3d(std::f64::consts::FRAC_PI_2, 0.0);
        assert!(close3(fv, -Vector3::z()));
        assert!(close3(sv, -Vector3::y()));
    }

    #[test]
    fn test_view_vectors_gimbal_lock() {
        let out = view_vectors_2d(90f64.to_radians(), 0.0);
        assert_eq!(out.advisory, Some(Advisory::GimbalLock));
        assert_eq!(out.value, (Vector2::new(1.0, 0.0), Vector2::new(0.0, -1.0)));

        let out = view_vectors_2d((-270f64).to_radians(), 348.0);
        assert!(out.is_flagged());
        let (fv, sv) = out.value;
        assert!(close2(fv, -0.7539220584369601, 0.6569638725243396));
        assert!(close2(sv, 0.6569638725243396, 0.7539220584369601));
    }
}
