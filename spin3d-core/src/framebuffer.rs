//! Software framebuffer implementing the drawing collaborator
use std::convert::Infallible;

use crate::algebra::Vec2;
use crate::color::Rgb;
use crate::projection::Viewport;
use crate::surface::{Surface, TriangleDrawer};
use crate::visibility::signed_area;

/// Endpoints further than this outside the buffer are not rasterized
const GUARD_BAND: f64 = 16384.0;

/// Row-major RGB pixel buffer
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::BLACK; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Resize and clear to black; no-op when the size is unchanged
    pub fn resize(&mut self, width: usize, height: usize) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels = vec![Rgb::BLACK; width * height];
    }

    pub fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    pub fn set_pixel(&mut self, x: i64, y: i64, color: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.pixels[y as usize * self.width + x as usize] = color;
        }
    }

    /// RGBA bytes, 4 per pixel, for canvas-style consumers
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_rgba()).collect()
    }

    fn in_guard_band(&self, p: &Vec2) -> bool {
        p.x.is_finite()
            && p.y.is_finite()
            && p.x.abs() < GUARD_BAND + self.width as f64
            && p.y.abs() < GUARD_BAND + self.height as f64
    }
}

impl Surface for Framebuffer {
    type Error = Infallible;

    fn viewport(&self) -> Viewport {
        Viewport::new(self.width as u32, self.height as u32)
    }

    fn clear(&mut self, color: Rgb) {
        self.fill(color);
    }

    fn present(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
}

impl TriangleDrawer for Framebuffer {
    /// Edge-function coverage sampled at pixel centres, either winding
    fn fill_triangle(&mut self, p0: Vec2, p1: Vec2, p2: Vec2, color: Rgb) {
        if ![p0, p1, p2].iter().all(|p| self.in_guard_band(p)) {
            return;
        }
        let area = signed_area(&p0, &p1, &p2);
        if area == 0.0 {
            return;
        }

        let min_x = p0.x.min(p1.x).min(p2.x).floor().max(0.0) as i64;
        let max_x = p0.x.max(p1.x).max(p2.x).ceil().min(self.width as f64 - 1.0) as i64;
        let min_y = p0.y.min(p1.y).min(p2.y).floor().max(0.0) as i64;
        let max_y = p0.y.max(p1.y).max(p2.y).ceil().min(self.height as f64 - 1.0) as i64;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = Vec2::new(x as f64 + 0.5, y as f64 + 0.5);
                let w0 = signed_area(&p1, &p2, &p);
                let w1 = signed_area(&p2, &p0, &p);
                let w2 = signed_area(&p0, &p1, &p);

                let inside = if area > 0.0 {
                    w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0
                } else {
                    w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0
                };
                if inside {
                    self.set_pixel(x, y, color);
                }
            }
        }
    }

    /// Bresenham between the rounded endpoints
    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Rgb) {
        if !self.in_guard_band(&from) || !self.in_guard_band(&to) {
            return;
        }
        let (x1, y1) = (to.x.round() as i64, to.y.round() as i64);
        let (mut x, mut y) = (from.x.round() as i64, from.y.round() as i64);

        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.set_pixel(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}
