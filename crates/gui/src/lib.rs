//! # A small immediate-mode widget library.
//!
//! Widgets keep their own geometry and state and record themselves into a
//! [`graphics::DrawList`] every frame, the [`WidgetManager`] owns them and resolves which one is
//! under the pointer.
//!
//! Every widget carries a single message value which is handed back to the caller when the widget
//! is clicked, applying it is left to the application.

use euclid::default::Box2D;
use graphics::DrawList;

mod macros;

pub mod manager;
pub mod widgets;

pub use manager::{WidgetId, WidgetManager};
pub use widgets::{Widget, WidgetColors};

#[allow(unused_variables)]
pub trait Element {
    type Message: Clone;

    fn as_widget(self) -> Widget<Self::Message>;

    /// The area that reacts to the pointer, the minimum edges are inclusive and the maximum edges
    /// exclusive.
    fn bounds(&self) -> Box2D<f32>;

    fn is_enabled(&self) -> bool;
    fn set_enabled(&mut self, enabled: bool);

    /// Advances time based state, `delta` is in seconds.
    fn update(&mut self, delta: f64) {}

    fn render(&self, list: &mut DrawList);
    /// Draws the widget as it looks while the pointer is over it.
    fn render_hover(&self, list: &mut DrawList);
    /// Draws the widget as it looks while it holds keyboard focus.
    fn render_focus(&self, list: &mut DrawList);

    /// Runs the widget's own click behaviour and returns the message it was built with.
    fn click(&mut self) -> Self::Message;
}
