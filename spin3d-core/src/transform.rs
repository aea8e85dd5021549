//! Model rotation and the vertex-to-pixel transform
use serde::{Deserialize, Serialize};

use crate::algebra::{apply, compose, drop_w, lift, Mat4, Vec2, Vec3, Vec4};
use crate::projection::Viewport;

/// Per-frame spin angles around the X and Z axes (in radians)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpinRate {
    pub x: f64,
    pub z: f64,
}

impl SpinRate {
    pub fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, z: 0.0 }
    }

    /// Incremental rotation applied once per frame
    pub fn matrix(&self) -> Mat4 {
        Transform::spin_matrix(self.x, self.z)
    }
}

impl Default for SpinRate {
    fn default() -> Self {
        Self::new(0.03, 0.015)
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Rotation about X. The sine terms are placed so a positive angle turns
    /// +y towards -z.
    pub fn rotation_x(angle: f64) -> Mat4 {
        let (s, c) = angle.sin_cos();
        #[rustfmt::skip]
        let m = Mat4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, c, s, 0.0,
            0.0, -s, c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        m
    }

    /// Rotation about Z, counter-clockwise for a positive angle
    pub fn rotation_z(angle: f64) -> Mat4 {
        let (s, c) = angle.sin_cos();
        #[rustfmt::skip]
        let m = Mat4::new(
            c, -s, 0.0, 0.0,
            s, c, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        m
    }

    /// Create a translation matrix
    pub fn translation(x: f64, y: f64, z: f64) -> Mat4 {
        Mat4::new_translation(&Vec3::new(x, y, z))
    }

    /// Z rotation composed with X rotation (X applied first)
    pub fn spin_matrix(x_angle: f64, z_angle: f64) -> Mat4 {
        compose(&Self::rotation_z(z_angle), &Self::rotation_x(x_angle))
    }
}

/// Rotate `point` about `pivot` by the linear part of `rotation`
pub fn transform_vertex(point: &Vec3, pivot: &Vec3, rotation: &Mat4) -> Vec3 {
    let local = point - pivot;
    drop_w(&apply(rotation, &lift(&local))) + pivot
}

/// Divide x and y by w. A zero w yields non-finite output.
pub fn perspective_divide(clip: &Vec4) -> Vec2 {
    Vec2::new(clip.x / clip.w, clip.y / clip.w)
}

/// Map normalized device coordinates to pixels.
///
/// Both axes use `size / 2 * (ndc + 1)`; y is not flipped, so +y in device
/// space lands on larger row indices.
pub fn ndc_to_pixel(ndc: &Vec2, viewport: Viewport) -> Vec2 {
    let size = viewport.size();
    Vec2::new(size.x / 2.0 * (ndc.x + 1.0), size.y / 2.0 * (1.0 + ndc.y))
}

/// Project a world-space point to pixel coordinates
pub fn project_to_pixel(point: &Vec3, projection: &Mat4, viewport: Viewport) -> Vec2 {
    let clip = apply(projection, &lift(point));
    ndc_to_pixel(&perspective_divide(&clip), viewport)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_spin_is_identity() {
        assert_relative_eq!(SpinRate::zero().matrix(), Mat4::identity());
    }

    #[test]
    fn test_rotation_x_direction() {
        let r = Transform::rotation_x(std::f64::consts::FRAC_PI_2);
        let p = transform_vertex(&Vec3::new(0.0, 1.0, 0.0), &Vec3::zeros(), &r);
        assert_relative_eq!(p, Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_z_direction() {
        let r = Transform::rotation_z(std::f64::consts::FRAC_PI_2);
        let p = transform_vertex(&Vec3::new(1.0, 0.0, 0.0), &Vec3::zeros(), &r);
        assert_relative_eq!(p, Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_transform_vertex_round_trip() {
        let rotation = SpinRate::new(0.7, -1.3).matrix();
        let inverse = rotation.transpose();
        let pivot = Vec3::new(0.0, 0.0, 1.5);
        let points = [
            Vec3::new(-0.5, -0.5, 1.0),
            Vec3::new(0.5, 0.5, 2.0),
            Vec3::new(3.0, -7.0, 11.0),
        ];
        for p in points {
            let spun = transform_vertex(&p, &pivot, &rotation);
            let back = transform_vertex(&spun, &pivot, &inverse);
            assert_relative_eq!(back, p, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_pivot_is_fixed_point() {
        let pivot = Vec3::new(0.0, 0.0, 1.5);
        let moved = transform_vertex(&pivot, &pivot, &SpinRate::default().matrix());
        assert_eq!(moved, pivot);
    }

    #[test]
    fn test_origin_maps_to_viewport_centre() {
        let px = project_to_pixel(&Vec3::zeros(), &Mat4::identity(), Viewport::new(2, 2));
        assert_eq!(px, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_y_axis_not_flipped() {
        let px = ndc_to_pixel(&Vec2::new(1.0, 1.0), Viewport::new(320, 240));
        assert_eq!(px, Vec2::new(320.0, 240.0));
        let px = ndc_to_pixel(&Vec2::new(-1.0, -1.0), Viewport::new(320, 240));
        assert_eq!(px, Vec2::new(0.0, 0.0));
    }

    #[test]
    fn test_zero_w_is_not_guarded() {
        let ndc = perspective_divide(&Vec4::new(1.0, 0.0, 0.0, 0.0));
        assert!(ndc.x.is_infinite());
        assert!(ndc.y.is_nan());
    }
}
