//! spin3d core: the shared geometry, projection and rasterization pipeline.
//!
//! A front end owns a [`SceneState`], calls [`tick`] once per displayed
//! frame, and hands the resulting [`DrawList`] to its own surface through
//! [`render_frame`].

pub mod algebra;
pub mod color;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod framebuffer;
pub mod geometry;
pub mod projection;
pub mod scene;
pub mod surface;
pub mod transform;
pub mod visibility;

// Re-export commonly used types
pub use algebra::{Mat4, Vec2, Vec3, Vec4};
pub use color::Rgb;
pub use config::RenderConfig;
pub use dispatch::{DrawCommand, DrawKind, DrawList};
pub use error::{Error, Result};
pub use framebuffer::Framebuffer;
pub use geometry::{Mesh, Triangle};
pub use projection::{build_projection, Projection, Viewport};
pub use scene::{tick, FrameInput, SceneState};
pub use surface::{render_frame, Surface, TriangleDrawer};
pub use transform::{project_to_pixel, transform_vertex, SpinRate, Transform};
pub use visibility::{is_front_facing, signed_area};
