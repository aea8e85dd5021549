//! Collaborator traits implemented by each front end
use crate::algebra::Vec2;
use crate::color::Rgb;
use crate::dispatch::{DrawKind, DrawList};
use crate::projection::Viewport;

/// A presentable render target
pub trait Surface {
    type Error;

    /// Current pixel size; may change between frames
    fn viewport(&self) -> Viewport;

    fn clear(&mut self, color: Rgb);

    /// Show everything drawn since the last clear
    fn present(&mut self) -> Result<(), Self::Error>;
}

/// Pixel writer for triangles and lines in pixel space
pub trait TriangleDrawer {
    fn fill_triangle(&mut self, p0: Vec2, p1: Vec2, p2: Vec2, color: Rgb);

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Rgb);

    fn outline_triangle(&mut self, p0: Vec2, p1: Vec2, p2: Vec2, color: Rgb) {
        self.draw_line(p0, p1, color);
        self.draw_line(p1, p2, color);
        self.draw_line(p2, p0, color);
    }
}

/// Clear, replay every draw request in order, then present
pub fn render_frame<T>(target: &mut T, frame: &DrawList) -> Result<(), T::Error>
where
    T: Surface + TriangleDrawer,
{
    target.clear(frame.background);
    for command in &frame.commands {
        let [p0, p1, p2] = command.points;
        match command.kind {
            DrawKind::Filled => target.fill_triangle(p0, p1, p2, command.color),
            DrawKind::Outline => target.outline_triangle(p0, p1, p2, command.color),
        }
    }
    target.present()
}
