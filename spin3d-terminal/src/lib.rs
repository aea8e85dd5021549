//! Terminal front end for the spin3d pipeline
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use log::info;
use std::io::{self, stdout, Stdout, Write};
use std::time::{Duration, Instant};
use spin3d_core::{render_frame, tick, FrameInput, RenderConfig, SceneState, Viewport};

pub mod renderer;

pub use renderer::TerminalSurface;

/// Frames per second the main loop aims for
const TARGET_FPS: u64 = 60;

/// What a single terminal event means for the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    ToggleWireframe,
    Resize(Viewport),
    Ignore,
}

/// Image area for a terminal of `cols` x `rows`. The bottom row is kept for
/// the status line, so the bottom-right cell is never written and the
/// alternate screen does not scroll.
pub fn image_viewport(cols: u16, rows: u16) -> Viewport {
    Viewport::new(u32::from(cols), u32::from(rows.saturating_sub(1)))
}

/// Status text clipped to leave the last column of the row empty
pub fn status_line(fps: f32, wireframe: bool, cols: u16) -> String {
    let mode = if wireframe { "wireframe" } else { "solid" };
    format!("spin3d | FPS: {fps:.1} | {mode} | W=Wireframe Q=Quit")
        .chars()
        .take(usize::from(cols.saturating_sub(1)))
        .collect()
}

/// Map a terminal event to an app command
pub fn command_for(event: &Event) -> Command {
    match event {
        Event::Key(KeyEvent { code, kind, .. }) if *kind != KeyEventKind::Release => match code {
            KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
            KeyCode::Char('w') => Command::ToggleWireframe,
            _ => Command::Ignore,
        },
        Event::Resize(cols, rows) => Command::Resize(image_viewport(*cols, *rows)),
        _ => Command::Ignore,
    }
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    scene: SceneState,
    surface: TerminalSurface<Stdout>,
    pending: FrameInput,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    /// Build the scene from `config`, sized to the current terminal
    pub fn new(mut config: RenderConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        config.viewport = image_viewport(width, height);

        let scene = SceneState::new(&config)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        Ok(Self {
            surface: TerminalSurface::new(stdout(), config.viewport),
            scene,
            pending: FrameInput::default(),
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        info!("terminal renderer stopped after {} frames", self.scene.frames());
        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / TARGET_FPS);

        while self.running {
            let frame_start = Instant::now();

            // Drain input; a toggle counts once per frame however often it arrived
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(&event::read()?);
            }
            if !self.running {
                break;
            }

            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: &Event) {
        match command_for(event) {
            Command::Quit => self.running = false,
            Command::ToggleWireframe => self.pending.toggle_wireframe = true,
            Command::Resize(viewport) => self.pending.resize = Some(viewport),
            Command::Ignore => {}
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let input = std::mem::take(&mut self.pending);
        let frame = tick(&mut self.scene, input);

        self.surface.resize(self.scene.projection().viewport());
        render_frame(&mut self.surface, &frame)?;

        // Status line on the row below the image
        let viewport = self.scene.projection().viewport();
        let line = status_line(self.fps, self.scene.wireframe(), viewport.width as u16);
        let out = self.surface.writer();
        queue!(
            out,
            cursor::MoveTo(0, viewport.height as u16),
            terminal::Clear(terminal::ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(line),
            ResetColor
        )?;

        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        let mut key = KeyEvent::new(code, KeyModifiers::NONE);
        key.kind = kind;
        Event::Key(key)
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(
            command_for(&key(KeyCode::Char('w'), KeyEventKind::Press)),
            Command::ToggleWireframe
        );
        assert_eq!(command_for(&key(KeyCode::Esc, KeyEventKind::Press)), Command::Quit);
        assert_eq!(command_for(&key(KeyCode::Char('q'), KeyEventKind::Press)), Command::Quit);
        assert_eq!(command_for(&key(KeyCode::Char('x'), KeyEventKind::Press)), Command::Ignore);
    }

    #[test]
    fn test_release_does_not_toggle() {
        assert_eq!(
            command_for(&key(KeyCode::Char('w'), KeyEventKind::Release)),
            Command::Ignore
        );
    }

    #[test]
    fn test_resize_event() {
        assert_eq!(
            command_for(&Event::Resize(120, 40)),
            Command::Resize(Viewport::new(120, 39))
        );
    }

    #[test]
    fn test_image_leaves_bottom_row_free() {
        assert_eq!(image_viewport(80, 24), Viewport::new(80, 23));
        assert_eq!(image_viewport(80, 0), Viewport::new(80, 0));
    }

    #[test]
    fn test_status_line_skips_last_column() {
        let line = status_line(59.94, true, 20);
        assert_eq!(line.chars().count(), 19);
        assert!(line.starts_with("spin3d | FPS: 59.9"));
        assert!(status_line(60.0, false, 200).ends_with("Q=Quit"));
    }
}
