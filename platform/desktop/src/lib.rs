//! Runs the line drawer in a native window, driven by winit.
pub mod config;
pub mod frame_loop;
pub mod timer;
pub mod window;

pub use config::WindowConfig;
pub use frame_loop::{FrameLoop, LoopState, WindowHandle, WindowState};
pub use timer::Timer;
pub use window::{DesktopApp, WinitWindow};
