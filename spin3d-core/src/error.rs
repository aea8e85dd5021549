//! Error types for scene construction and configuration
use thiserror::Error;

/// Errors raised while validating configuration or building a scene.
///
/// The per-frame pipeline itself never fails: degenerate projections
/// propagate as non-finite coordinates instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("viewport must be at least 1x1 pixels, got {width}x{height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("viewport {width}x{height} does not match the fixed {panel_width}x{panel_height} panel")]
    PanelMismatch {
        width: u32,
        height: u32,
        panel_width: u32,
        panel_height: u32,
    },

    #[error("clip planes must satisfy 0 < near < far, got near={near} far={far}")]
    InvalidClipPlanes { near: f64, far: f64 },

    #[error("field of view must be between 0 and 180 degrees, got {0}")]
    InvalidFieldOfView(f64),

    #[error("failed to parse render config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
