//! Turning projected triangles into draw requests
use std::fmt;

use crate::algebra::Vec2;
use crate::color::{triangle_color, Rgb};
use crate::geometry::Triangle;
use crate::visibility::is_front_facing;

/// How a triangle should be rasterized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawKind {
    Filled,
    Outline,
}

/// One request for the drawing collaborator, in pixel space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub kind: DrawKind,
    pub points: [Vec2; 3],
    pub color: Rgb,
}

impl fmt::Display for DrawCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            DrawKind::Filled => "fill",
            DrawKind::Outline => "outline",
        };
        write!(f, "{kind} #{:06x}", self.color.to_u32())?;
        for p in &self.points {
            write!(f, " ({:.2}, {:.2})", p.x, p.y)?;
        }
        Ok(())
    }
}

/// Everything needed to paint one frame: clear, then draw in order
#[derive(Debug, Clone, PartialEq)]
pub struct DrawList {
    pub background: Rgb,
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Emit draw requests for `triangles` in list order.
///
/// Wireframe outlines every triangle with no culling. Solid mode fills only
/// the triangles that pass the backface test and skips the rest.
pub fn dispatch(
    triangles: &[Triangle],
    screen: &[Vec2],
    wireframe: bool,
    background: Rgb,
) -> DrawList {
    let mut commands = Vec::with_capacity(triangles.len());

    for (i, triangle) in triangles.iter().enumerate() {
        let [a, b, c] = triangle.indices;
        let points = [screen[a], screen[b], screen[c]];
        let color = triangle_color(i);

        let kind = if wireframe {
            DrawKind::Outline
        } else if is_front_facing(&points[0], &points[1], &points[2]) {
            DrawKind::Filled
        } else {
            continue;
        };

        commands.push(DrawCommand {
            kind,
            points,
            color,
        });
    }

    DrawList {
        background,
        commands,
    }
}
