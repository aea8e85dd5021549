//! Startup parameters for the pipeline and per-device presets
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::color::Rgb;
use crate::error::{Error, Result};
use crate::projection::Viewport;
use crate::transform::SpinRate;

/// Render configuration fixed at startup.
///
/// Missing fields in serialized form fall back to the desktop preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Full field-of-view angle in degrees
    pub fov_degrees: f64,
    pub near: f64,
    pub far: f64,
    pub viewport: Viewport,
    pub spin: SpinRate,
    /// Distance the mesh is pushed along +z before rendering starts
    pub pivot_offset_z: f64,
    pub background: Rgb,
}

impl RenderConfig {
    /// Resizable desktop window
    pub fn desktop() -> Self {
        Self {
            fov_degrees: 90.0,
            near: 1.0,
            far: 90.0,
            viewport: Viewport::new(800, 800),
            spin: SpinRate::default(),
            pivot_offset_z: 1.5,
            background: Rgb::RAYWHITE,
        }
    }

    /// 320x240 LCD panel
    pub fn device() -> Self {
        Self {
            fov_degrees: 85.0,
            viewport: Viewport::new(320, 240),
            background: Rgb::WHITE,
            ..Self::desktop()
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse `text` as overrides on top of `base`; fields it leaves out,
    /// nested ones included, keep the base values.
    pub fn from_json_over(base: &Self, text: &str) -> Result<Self> {
        let mut merged = serde_json::to_value(base)?;
        merge_json(&mut merged, serde_json::from_str(text)?);
        let config: Self = serde_json::from_value(merged)?;
        config.validate()?;
        Ok(config)
    }

    pub fn fov_radians(&self) -> f64 {
        self.fov_degrees.to_radians()
    }

    pub fn validate(&self) -> Result<()> {
        self.viewport.validate()?;
        if !(self.near > 0.0 && self.near < self.far) {
            return Err(Error::InvalidClipPlanes {
                near: self.near,
                far: self.far,
            });
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(Error::InvalidFieldOfView(self.fov_degrees));
        }
        Ok(())
    }
}

fn merge_json(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base), Value::Object(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(slot) => merge_json(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::desktop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(RenderConfig::desktop().validate().is_ok());
        assert!(RenderConfig::device().validate().is_ok());
        assert_eq!(RenderConfig::device().near, 1.0);
        assert_eq!(RenderConfig::device().viewport, Viewport::new(320, 240));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = RenderConfig::from_json(r#"{ "fov_degrees": 60.0 }"#).unwrap();
        assert_eq!(config.fov_degrees, 60.0);
        assert_eq!(config.far, 90.0);
        assert_eq!(config.viewport, Viewport::new(800, 800));
    }

    #[test]
    fn test_json_over_device_keeps_panel() {
        let device = RenderConfig::device();
        let config = RenderConfig::from_json_over(&device, r#"{ "spin": { "x": 0.1 } }"#).unwrap();
        assert_eq!(config.viewport, Viewport::new(320, 240));
        assert_eq!(config.fov_degrees, 85.0);
        assert_eq!(config.background, Rgb::WHITE);
        assert_eq!(config.spin, SpinRate::new(0.1, 0.015));

        let empty = RenderConfig::from_json_over(&device, "{}").unwrap();
        assert_eq!(empty, device);
    }

    #[test]
    fn test_json_over_validates() {
        let err = RenderConfig::from_json_over(&RenderConfig::device(), r#"{ "near": 100.0 }"#)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidClipPlanes { .. }));
    }

    #[test]
    fn test_json_validation() {
        let err = RenderConfig::from_json(r#"{ "viewport": { "width": 0, "height": 10 } }"#)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidViewport { width: 0, .. }));

        let err = RenderConfig::from_json(r#"{ "fov_degrees": 180.0 }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidFieldOfView(_)));

        let err = RenderConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
