pub mod app;
pub mod document;
pub mod pipeline;
pub mod projection;
pub mod shapes;
pub mod view;

use euclid::default::Size2D;
use graphics::DrawList;
use input::{CursorIcon, KeyboardEvent, MouseEvent};
use serde::{Deserialize, Serialize};

pub use app::{DrawingApp, Message};
pub use document::{DrawMode, DrawingDocument, Palette};
pub use view::SurfaceRenderer;

/// What the frame loop should do after an event was handled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum EventResponse {
    #[default]
    Continue,
    Exit,
}

/// The application driven by the frame loop.
#[allow(unused_variables)]
pub trait Application {
    /// Advances the application by `delta` seconds, called once per frame before drawing.
    fn update(&mut self, delta: f64);

    /// Records the whole frame into `list`.
    fn render(&self, list: &mut DrawList);

    fn mouse_event(&mut self, event: MouseEvent) -> EventResponse;
    fn keyboard_event(&mut self, event: KeyboardEvent) -> EventResponse;

    /// The drawing surface now has `size` physical pixels.
    fn resize(&mut self, size: Size2D<u32>) {}

    fn cursor_icon(&self) -> CursorIcon {
        CursorIcon::Default
    }
}
