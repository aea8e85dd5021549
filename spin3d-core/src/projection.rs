//! Perspective projection and viewport state
use log::debug;
use serde::{Deserialize, Serialize};

use crate::algebra::{Mat4, Vec2};
use crate::error::{Error, Result};

/// Pixel dimensions of the render target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Height over width. Deliberately the inverse of the usual convention.
    pub fn aspect(&self) -> f64 {
        f64::from(self.height) / f64::from(self.width)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(f64::from(self.width), f64::from(self.height))
    }
}

/// Build a perspective projection matrix.
///
/// `fov` is the full field-of-view angle in radians. `aspect` is multiplied
/// into the x scale, and the last row writes `-z` into w.
pub fn build_projection(fov: f64, near: f64, far: f64, aspect: f64) -> Mat4 {
    let scale = 1.0 / (fov / 2.0).tan();
    #[rustfmt::skip]
    let m = Mat4::new(
        scale * aspect, 0.0, 0.0, 0.0,
        0.0, scale, 0.0, 0.0,
        0.0, 0.0, (far + near) / (near - far), 2.0 * far * near / (near - far),
        0.0, 0.0, -1.0, 0.0,
    );
    m
}

/// Camera projection that follows the viewport's aspect ratio
#[derive(Debug, Clone)]
pub struct Projection {
    fov: f64,
    near: f64,
    far: f64,
    viewport: Viewport,
    matrix: Mat4,
}

impl Projection {
    pub fn new(fov: f64, near: f64, far: f64, viewport: Viewport) -> Result<Self> {
        viewport.validate()?;
        if !(near > 0.0 && near < far) {
            return Err(Error::InvalidClipPlanes { near, far });
        }
        Ok(Self {
            fov,
            near,
            far,
            viewport,
            matrix: build_projection(fov, near, far, viewport.aspect()),
        })
    }

    pub fn matrix(&self) -> &Mat4 {
        &self.matrix
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn fov(&self) -> f64 {
        self.fov
    }

    pub fn clip_planes(&self) -> (f64, f64) {
        (self.near, self.far)
    }

    /// Adopt a new viewport and rebuild the matrix for its aspect ratio.
    ///
    /// Returns false and leaves the projection untouched when the size is
    /// unchanged or has a zero dimension.
    pub fn resize(&mut self, viewport: Viewport) -> bool {
        if viewport == self.viewport || viewport.validate().is_err() {
            return false;
        }
        self.viewport = viewport;
        self.matrix = build_projection(self.fov, self.near, self.far, viewport.aspect());
        debug!(
            "projection resized to {}x{} (aspect {:.4})",
            viewport.width,
            viewport.height,
            viewport.aspect()
        );
        true
    }
}
