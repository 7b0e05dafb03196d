use euclid::default::Point2D;
use graphics::DrawList;
use tracing::debug;

use crate::{
    Element,
    widgets::{ButtonWidget, CheckboxWidget, Widget},
};

/// Handle to a widget owned by a [`WidgetManager`].
///
/// Widgets are never removed, so a handle stays valid for the lifetime of the manager that
/// issued it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(usize);

impl WidgetId {
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Owns every widget, in paint order.
///
/// Later widgets paint over earlier ones and therefore also win hit-tests where they overlap.
pub struct WidgetManager<M: Clone> {
    widgets: Vec<Widget<M>>,

    current_hover: Option<WidgetId>,
    current_focus: Option<WidgetId>,
}

impl<M: Clone> Default for WidgetManager<M> {
    fn default() -> Self {
        Self {
            widgets: Vec::new(),
            current_hover: None,
            current_focus: None,
        }
    }
}

impl<M: Clone> WidgetManager<M> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, widget: impl Element<Message = M>) -> WidgetId {
        let id = WidgetId(self.widgets.len());
        self.widgets.push(widget.as_widget());
        id
    }

    pub fn add_button(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        label: impl Into<String>,
        on_click: M,
    ) -> WidgetId {
        self.add(ButtonWidget::new(x, y, width, height, label, on_click))
    }

    pub fn add_checkbox(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        label: impl Into<String>,
        on_click: M,
    ) -> WidgetId {
        self.add(CheckboxWidget::new(x, y, width, height, label, on_click))
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn widget(&self, id: WidgetId) -> Option<&Widget<M>> {
        self.widgets.get(id.0)
    }

    pub fn widget_mut(&mut self, id: WidgetId) -> Option<&mut Widget<M>> {
        self.widgets.get_mut(id.0)
    }

    pub fn update(&mut self, delta: f64) {
        for widget in &mut self.widgets {
            widget.update(delta);
        }
    }

    /// Recomputes which widget is under the pointer.
    ///
    /// Disabled widgets are skipped, so the pointer falls through to whatever lies below them.
    pub fn on_mouse_move(&mut self, x: f32, y: f32) {
        let point = Point2D::new(x, y);
        // `Box2D::contains` is half open, which keeps adjacent widgets from sharing an edge.
        self.current_hover = self
            .widgets
            .iter()
            .rposition(|widget| widget.is_enabled() && widget.bounds().contains(point))
            .map(WidgetId);
    }

    /// Forgets the hovered widget, for when the pointer leaves the surface.
    pub fn clear_hover(&mut self) {
        self.current_hover = None;
    }

    /// Clicks the hovered widget, returning the message it carries.
    pub fn on_mouse_click(&mut self) -> Option<M> {
        let id = self.current_hover?;
        let widget = self.widgets.get_mut(id.0)?;
        // It may have been disabled since the last pointer move.
        if !widget.is_enabled() {
            return None;
        }
        debug!(widget = id.0, "Widget clicked");
        Some(widget.click())
    }

    pub fn is_over_widget(&self) -> bool {
        self.current_hover.is_some()
    }

    pub fn current_hover(&self) -> Option<WidgetId> {
        self.current_hover
    }

    pub fn current_focus(&self) -> Option<WidgetId> {
        self.current_focus
    }

    pub fn set_focus(&mut self, focus: Option<WidgetId>) {
        self.current_focus = focus.filter(|id| id.0 < self.widgets.len());
    }

    /// Draws every widget, then repaints the hovered and focused ones on top.
    pub fn render(&self, list: &mut DrawList) {
        for widget in &self.widgets {
            widget.render(list);
        }
        if let Some(widget) = self.current_hover.and_then(|id| self.widget(id)) {
            widget.render_hover(list);
        }
        if let Some(widget) = self.current_focus.and_then(|id| self.widget(id)) {
            widget.render_focus(list);
        }
    }
}

#[cfg(test)]
mod tests {
    use graphics::DrawCommand;

    use super::*;
    use crate::widgets::WidgetColors;

    #[derive(Clone, Copy, Debug, PartialEq)]
    enum Message {
        First,
        Second,
        Toggle,
    }

    fn overlapping() -> (WidgetManager<Message>, WidgetId, WidgetId) {
        let mut manager = WidgetManager::new();
        let first = manager.add_button(0., 0., 100., 100., "First", Message::First);
        let second = manager.add_button(50., 50., 100., 100., "Second", Message::Second);
        (manager, first, second)
    }

    fn fills(list: &DrawList) -> Vec<color::PremulColor<color::Srgb>> {
        list.commands()
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Rectangle { options, .. } => options.fill,
                _ => None,
            })
            .collect()
    }

    #[test]
    fn last_widget_wins_where_they_overlap() {
        let (mut manager, first, second) = overlapping();

        manager.on_mouse_move(75., 75.);
        assert_eq!(manager.current_hover(), Some(second));

        manager.on_mouse_move(25., 25.);
        assert_eq!(manager.current_hover(), Some(first));

        manager.on_mouse_move(500., 500.);
        assert_eq!(manager.current_hover(), None);
        assert!(!manager.is_over_widget());
    }

    #[test]
    fn boxes_are_half_open() {
        let mut manager = WidgetManager::new();
        manager.add_button(10., 10., 100., 40., "Button", Message::First);

        for (x, y, hovered) in [
            (10., 10., true),
            (109., 49., true),
            (110., 10., false),
            (10., 50., false),
            (9.9, 20., false),
        ] {
            manager.on_mouse_move(x, y);
            assert_eq!(manager.is_over_widget(), hovered, "at ({x}, {y})");
        }
    }

    #[test]
    fn click_goes_to_the_hovered_widget_once() {
        let (mut manager, _, _) = overlapping();
        assert_eq!(manager.on_mouse_click(), None);

        manager.on_mouse_move(120., 120.);
        assert_eq!(manager.on_mouse_click(), Some(Message::Second));
    }

    #[test]
    fn checkbox_toggles_before_its_message_is_returned() {
        let mut manager = WidgetManager::new();
        let id = manager.add_checkbox(0., 0., 150., 30., "Fill", Message::Toggle);

        manager.on_mouse_move(5., 5.);
        assert_eq!(manager.on_mouse_click(), Some(Message::Toggle));
        let checked = manager
            .widget(id)
            .and_then(Widget::as_checkbox)
            .is_some_and(CheckboxWidget::is_checked);
        assert!(checked);
    }

    #[test]
    fn disabled_widgets_are_never_hovered_or_clicked() {
        let (mut manager, first, second) = overlapping();
        if let Some(widget) = manager.widget_mut(second) {
            widget.set_enabled(false);
        }

        manager.on_mouse_move(75., 75.);
        assert_eq!(manager.current_hover(), Some(first));

        manager.on_mouse_move(120., 120.);
        assert_eq!(manager.current_hover(), None);
        assert_eq!(manager.on_mouse_click(), None);
    }

    #[test]
    fn disabling_after_hover_suppresses_the_click() {
        let (mut manager, first, _) = overlapping();
        manager.on_mouse_move(10., 10.);
        if let Some(widget) = manager.widget_mut(first) {
            widget.set_enabled(false);
        }
        assert_eq!(manager.on_mouse_click(), None);
    }

    #[test]
    fn hover_and_focus_paint_after_every_widget() {
        let (mut manager, first, second) = overlapping();
        manager.on_mouse_move(10., 10.);
        manager.set_focus(Some(second));
        assert_eq!(manager.current_focus(), Some(second));
        assert_eq!(manager.current_hover(), Some(first));

        let mut list = DrawList::new();
        manager.render(&mut list);

        let colors = WidgetColors::DEFAULT;
        assert_eq!(
            fills(&list),
            [
                colors.background,
                colors.background,
                colors.background_hover,
                colors.background,
            ]
        );
    }

    #[test]
    fn focus_ignores_unknown_widgets() {
        let (mut manager, _, _) = overlapping();
        manager.set_focus(Some(WidgetId(10)));
        assert_eq!(manager.current_focus(), None);
    }

    #[test]
    fn update_reaches_every_widget() {
        let (mut manager, first, _) = overlapping();
        manager.on_mouse_move(10., 10.);
        manager.on_mouse_click();

        let pressed = |manager: &WidgetManager<Message>| {
            manager
                .widget(first)
                .and_then(Widget::as_button)
                .is_some_and(ButtonWidget::is_pressed)
        };
        assert!(pressed(&manager));
        manager.update(1.);
        assert!(!pressed(&manager));
    }
}
