//! Character-cell surface: one terminal cell per pixel
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::{self, Write};
use spin3d_core::{Framebuffer, Rgb, Surface, TriangleDrawer, Vec2, Viewport};

/// Glyph used for every pixel; the color carries the image
const PIXEL_GLYPH: char = '█';

/// Framebuffer-backed surface that presents to a terminal writer
pub struct TerminalSurface<W: Write> {
    framebuffer: Framebuffer,
    out: W,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, viewport: Viewport) -> Self {
        Self {
            framebuffer: Framebuffer::new(viewport.width as usize, viewport.height as usize),
            out,
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.framebuffer
            .resize(viewport.width as usize, viewport.height as usize);
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    /// Queue every row, switching foreground color only when it changes
    pub fn draw(&mut self) -> io::Result<()> {
        let width = self.framebuffer.width();
        let mut current: Option<Rgb> = None;

        for (y, row) in self.framebuffer.pixels().chunks(width.max(1)).enumerate() {
            self.out.queue(cursor::MoveTo(0, y as u16))?;
            for &pixel in row {
                if current != Some(pixel) {
                    self.out.queue(SetForegroundColor(to_color(pixel)))?;
                    current = Some(pixel);
                }
                self.out.queue(Print(PIXEL_GLYPH))?;
            }
        }
        self.out.queue(ResetColor)?;
        Ok(())
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    type Error = io::Error;

    fn viewport(&self) -> Viewport {
        self.framebuffer.viewport()
    }

    fn clear(&mut self, color: Rgb) {
        self.framebuffer.clear(color);
    }

    fn present(&mut self) -> io::Result<()> {
        self.draw()
    }
}

impl<W: Write> TriangleDrawer for TerminalSurface<W> {
    fn fill_triangle(&mut self, p0: Vec2, p1: Vec2, p2: Vec2, color: Rgb) {
        self.framebuffer.fill_triangle(p0, p1, p2, color);
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Rgb) {
        self.framebuffer.draw_line(from, to, color);
    }
}

fn to_color(pixel: Rgb) -> Color {
    Color::Rgb {
        r: pixel.r,
        g: pixel.g,
        b: pixel.b,
    }
}
