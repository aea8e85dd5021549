//! Scene state and the per-frame tick
use log::{debug, trace, warn};

use crate::algebra::{format_matrix, Mat4, Vec2};
use crate::color::Rgb;
use crate::config::RenderConfig;
use crate::dispatch::{dispatch, DrawList};
use crate::error::Result;
use crate::geometry::{Mesh, CORNER_COUNT};
use crate::projection::{Projection, Viewport};
use crate::transform::{project_to_pixel, transform_vertex, Transform};

/// Host events observed since the previous tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Edge-triggered: true only on the tick the toggle was pressed
    pub toggle_wireframe: bool,
    pub resize: Option<Viewport>,
}

impl FrameInput {
    pub fn toggle() -> Self {
        Self {
            toggle_wireframe: true,
            resize: None,
        }
    }

    pub fn resized(viewport: Viewport) -> Self {
        Self {
            toggle_wireframe: false,
            resize: Some(viewport),
        }
    }
}

/// The spinning cube and everything needed to project it.
///
/// Owned by a single front end and mutated only through [`tick`] or the
/// methods below.
#[derive(Debug, Clone)]
pub struct SceneState {
    mesh: Mesh,
    spin: Mat4,
    projection: Projection,
    background: Rgb,
    wireframe: bool,
    screen: [Vec2; CORNER_COUNT],
    frames: u64,
}

impl SceneState {
    /// Build the unit cube and push it out to `pivot_offset_z`. The first
    /// spin step happens on the first tick.
    pub fn new(config: &RenderConfig) -> Result<Self> {
        config.validate()?;
        let projection = Projection::new(
            config.fov_radians(),
            config.near,
            config.far,
            config.viewport,
        )?;
        let spin = config.spin.matrix();

        let mut mesh = Mesh::cube(1.0);
        mesh.transform_all(&Transform::translation(0.0, 0.0, config.pivot_offset_z));

        let mut state = Self {
            mesh,
            spin,
            projection,
            background: config.background,
            wireframe: false,
            screen: [Vec2::zeros(); CORNER_COUNT],
            frames: 0,
        };
        state.refresh_screen();

        debug!(
            "scene ready: {}x{} viewport, projection\n{}",
            config.viewport.width,
            config.viewport.height,
            format_matrix(state.projection.matrix())
        );
        Ok(state)
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn spin(&self) -> &Mat4 {
        &self.spin
    }

    pub fn background(&self) -> Rgb {
        self.background
    }

    pub fn wireframe(&self) -> bool {
        self.wireframe
    }

    /// Frames advanced since construction
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Pixel positions of the corners as of the last refresh
    pub fn screen_points(&self) -> &[Vec2; CORNER_COUNT] {
        &self.screen
    }

    pub fn toggle_wireframe(&mut self) -> bool {
        self.wireframe = !self.wireframe;
        debug!("wireframe {}", if self.wireframe { "on" } else { "off" });
        self.wireframe
    }

    /// Follow a host resize. Zero-sized viewports are ignored.
    pub fn resize(&mut self, viewport: Viewport) -> bool {
        if viewport.validate().is_err() {
            warn!(
                "ignoring resize to empty viewport {}x{}",
                viewport.width, viewport.height
            );
            return false;
        }
        let changed = self.projection.resize(viewport);
        if changed {
            self.refresh_screen();
        }
        changed
    }

    /// Spin every corner one increment about the pivot and reproject
    pub fn advance(&mut self) {
        let spin = self.spin;
        self.mesh
            .update_corners(|corner, pivot| transform_vertex(corner, pivot, &spin));
        self.refresh_screen();
        self.frames += 1;
    }

    /// Draw requests for the current screen-space cache
    pub fn draw_list(&self) -> DrawList {
        dispatch(
            self.mesh.triangles(),
            &self.screen,
            self.wireframe,
            self.background,
        )
    }

    fn refresh_screen(&mut self) {
        let matrix = self.projection.matrix();
        let viewport = self.projection.viewport();
        for (slot, corner) in self.screen.iter_mut().zip(self.mesh.corners()) {
            *slot = project_to_pixel(corner, matrix, viewport);
        }
    }
}

/// Advance the scene by one frame and return what to draw.
///
/// Input is applied first (resize, then wireframe toggle), then the corners
/// spin and are reprojected.
pub fn tick(state: &mut SceneState, input: FrameInput) -> DrawList {
    if let Some(viewport) = input.resize {
        state.resize(viewport);
    }
    if input.toggle_wireframe {
        state.toggle_wireframe();
    }
    state.advance();

    let list = state.draw_list();
    trace!("frame {}: {} draw commands", state.frames(), list.len());
    for command in &list.commands {
        trace!("  {command}");
    }
    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::Vec3;
    use crate::dispatch::DrawKind;
    use crate::geometry::PIVOT;

    #[test]
    fn test_starting_pose_is_only_translated() {
        let state = SceneState::new(&RenderConfig::desktop()).unwrap();
        assert_eq!(state.mesh().vertices()[0], Vec3::new(-0.5, -0.5, 1.0));
        assert_eq!(state.mesh().vertices()[6], Vec3::new(0.5, 0.5, 2.0));
        assert_eq!(state.frames(), 0);
    }

    #[test]
    fn test_pivot_never_moves() {
        let mut state = SceneState::new(&RenderConfig::desktop()).unwrap();
        assert_eq!(state.mesh().pivot(), Vec3::new(0.0, 0.0, 1.5));
        for _ in 0..100 {
            tick(&mut state, FrameInput::default());
            assert_eq!(state.mesh().vertices()[PIVOT], Vec3::new(0.0, 0.0, 1.5));
        }
    }

    #[test]
    fn test_corners_keep_distance_from_pivot() {
        let mut state = SceneState::new(&RenderConfig::device()).unwrap();
        let radius = (0.75f64).sqrt();
        for _ in 0..50 {
            state.advance();
        }
        let pivot = state.mesh().pivot();
        for corner in state.mesh().corners() {
            assert!(((corner - pivot).norm() - radius).abs() < 1e-9);
        }
    }

    #[test]
    fn test_double_toggle_restores_dispatch() {
        let config = RenderConfig {
            spin: crate::transform::SpinRate::zero(),
            ..RenderConfig::desktop()
        };
        let mut state = SceneState::new(&config).unwrap();
        let baseline = tick(&mut state, FrameInput::default());

        let wire = tick(&mut state, FrameInput::toggle());
        assert!(state.wireframe());
        assert_eq!(wire.len(), 12);
        assert!(wire.commands.iter().all(|c| c.kind == DrawKind::Outline));

        let restored = tick(&mut state, FrameInput::toggle());
        assert!(!state.wireframe());
        assert_eq!(restored, baseline);
    }

    #[test]
    fn test_resize_reprojects() {
        let mut state = SceneState::new(&RenderConfig::desktop()).unwrap();
        let before = *state.screen_points();
        assert!(state.resize(Viewport::new(400, 400)));
        let after = state.screen_points();
        // Same aspect, half the size: every point scales by one half.
        for (a, b) in before.iter().zip(after.iter()) {
            assert!((a / 2.0 - b).norm() < 1e-9);
        }
    }

    #[test]
    fn test_empty_resize_ignored() {
        let mut state = SceneState::new(&RenderConfig::desktop()).unwrap();
        let list = tick(&mut state, FrameInput::resized(Viewport::new(0, 0)));
        assert_eq!(state.projection().viewport(), Viewport::new(800, 800));
        assert!(!list.is_empty());
    }

    #[test]
    fn test_solid_frames_cull_some_faces() {
        let mut state = SceneState::new(&RenderConfig::desktop()).unwrap();
        for _ in 0..30 {
            let list = tick(&mut state, FrameInput::default());
            assert!(list.len() < 12);
            assert!(list.commands.iter().all(|c| c.kind == DrawKind::Filled));
        }
        assert_eq!(state.frames(), 30);
    }
}
