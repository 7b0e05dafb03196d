mod logging;

use anyhow::{Context, Result};
use desktop::{DesktopApp, WindowConfig};
use tracing::info;
use winit::event_loop::EventLoop;

fn main() -> Result<()> {
    let _guard = logging::init_logging()?;
    info!("Starting the line drawer");

    let event_loop = EventLoop::new().context("Failed to create the event loop")?;
    let mut app = DesktopApp::new(WindowConfig::line_drawer())?;
    event_loop
        .run_app(&mut app)
        .context("The event loop exited with an error")?;

    if let Some(error) = app.take_error() {
        return Err(error);
    }
    info!("Goodbye");
    Ok(())
}
