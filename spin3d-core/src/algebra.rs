//! Fixed-size vector and matrix types shared by every pipeline stage.
//!
//! Vectors carry no tag for the space they live in (model, clip or pixel);
//! each stage documents which space it consumes and produces.
use nalgebra::{Matrix4, Vector2, Vector3, Vector4};
use std::fmt::Write;

pub type Vec2 = Vector2<f64>;
pub type Vec3 = Vector3<f64>;
pub type Vec4 = Vector4<f64>;

/// Row-major 4x4 matrix, always applied as `matrix * column_vector`
pub type Mat4 = Matrix4<f64>;

/// Lift a point into homogeneous coordinates with w = 1
pub fn lift(point: &Vec3) -> Vec4 {
    Vec4::new(point.x, point.y, point.z, 1.0)
}

/// Drop the w component without dividing by it
pub fn drop_w(v: &Vec4) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

/// Standard 4x4 product `a * b`
pub fn compose(a: &Mat4, b: &Mat4) -> Mat4 {
    a * b
}

/// Homogeneous matrix-vector product `m * v`
pub fn apply(m: &Mat4, v: &Vec4) -> Vec4 {
    m * v
}

/// Render a matrix one row per line, for debug logging
pub fn format_matrix(m: &Mat4) -> String {
    let mut out = String::new();
    for row in m.row_iter() {
        let cells: Vec<String> = row.iter().map(|v| format!("{v:.6}")).collect();
        let _ = writeln!(out, "{}", cells.join(", "));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lift_and_drop_w() {
        let p = Vec3::new(1.0, -2.0, 3.5);
        let h = lift(&p);
        assert_eq!(h.w, 1.0);
        assert_eq!(drop_w(&h), p);
    }

    #[test]
    fn test_drop_w_does_not_divide() {
        let v = Vec4::new(2.0, 4.0, 6.0, 2.0);
        assert_eq!(drop_w(&v), Vec3::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn test_compose_is_row_by_column() {
        #[rustfmt::skip]
        let a = Mat4::new(
            1.0, 2.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        #[rustfmt::skip]
        let b = Mat4::new(
            1.0, 0.0, 0.0, 0.0,
            3.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        let c = compose(&a, &b);
        // row 0 of a against column 0 of b: 1*1 + 2*3
        assert_eq!(c[(0, 0)], 7.0);
        assert_eq!(c[(0, 1)], 2.0);
        assert_eq!(c[(1, 0)], 3.0);
    }

    #[test]
    fn test_apply_translation() {
        let t = Mat4::new_translation(&Vec3::new(0.0, 0.0, 1.5));
        let moved = apply(&t, &lift(&Vec3::new(0.5, 0.5, 0.5)));
        assert_relative_eq!(drop_w(&moved), Vec3::new(0.5, 0.5, 2.0));
    }

    #[test]
    fn test_format_matrix_has_four_rows() {
        let text = format_matrix(&Mat4::identity());
        assert_eq!(text.lines().count(), 4);
        assert!(text.starts_with("1.000000, 0.000000"));
    }
}
