//! Math types and glam re-exports.
//!
//! We re-export [glam](https://docs.rs/glam) types so the rest of the crate
//! (and the binary) never names glam directly. The free functions build the
//! two matrices a 2D pose is made of: a translation in the XY plane and a
//! rotation about +Z.

pub use glam::{Mat4, Vec2, Vec3, Vec4};

/// Pure translation by `offset` in the XY plane (z = 0).
pub fn translation_matrix(offset: Vec2) -> Mat4 {
    Mat4::from_translation(offset.extend(0.0))
}

/// Counter-clockwise rotation by `angle` radians about the +Z axis.
pub fn rotation_matrix(angle: f32) -> Mat4 {
    Mat4::from_rotation_z(angle)
}

/// Unit vector an object faces when its orientation is `angle` radians.
pub fn forward(angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(cos, sin)
}

/// Forward direction read off a rotation matrix: the x/y components of its
/// first (local x) basis column.
pub fn forward_from_rotation(rotation: &Mat4) -> Vec2 {
    Vec2::new(rotation.x_axis.x, rotation.x_axis.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn rotation_of_zero_is_identity() {
        assert_eq!(rotation_matrix(0.0), Mat4::IDENTITY);
    }

    #[test]
    fn rotation_block_matches_cos_sin() {
        for i in 0..32 {
            let theta = i as f32 * 0.37 - 5.0;
            let m = rotation_matrix(theta);
            let (s, c) = theta.sin_cos();
            // Column-major: row 0 is [x_axis.x, y_axis.x].
            assert!((m.x_axis.x - c).abs() < EPS);
            assert!((m.y_axis.x + s).abs() < EPS);
            assert!((m.x_axis.y - s).abs() < EPS);
            assert!((m.y_axis.y - c).abs() < EPS);
        }
    }

    #[test]
    fn translation_moves_origin() {
        let m = translation_matrix(Vec2::new(1.5, -2.0));
        let p = m.transform_point3(Vec3::ZERO);
        assert_eq!(p, Vec3::new(1.5, -2.0, 0.0));
    }

    #[test]
    fn both_forward_formulations_agree() {
        for i in 0..64 {
            let theta = i as f32 * 0.21 - 6.5;
            let a = forward(theta);
            let b = forward_from_rotation(&rotation_matrix(theta));
            assert!(a.abs_diff_eq(b, 1e-6), "θ={theta}: {a} vs {b}");
            assert!((a.length() - 1.0).abs() < EPS);
        }
    }
}
