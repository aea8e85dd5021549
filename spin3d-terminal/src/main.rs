/// spin3d Terminal - Spinning Cube
///
/// Renders the spinning cube into the terminal, one cell per pixel.
/// Controls:
///   - W: Toggle wireframe
///   - Q/ESC: Quit
///
/// Set RUST_LOG=debug to see pipeline logging on stderr.
use anyhow::Context;
use spin3d_core::RenderConfig;
use spin3d_terminal::TerminalApp;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = RenderConfig::desktop();
    config.validate().context("invalid desktop render config")?;

    let mut app = TerminalApp::new(config).context("failed to set up terminal renderer")?;
    app.run().context("terminal renderer failed")?;

    Ok(())
}
