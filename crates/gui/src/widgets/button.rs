use euclid::default::{Box2D, Point2D, Size2D};
use graphics::{
    DrawList,
    primitives::{Alignment, TextOptions},
};

use crate::{
    Element,
    widgets::{Widget, WidgetColors, WidgetInteractionState, WidgetVisualState, render_focus_ring},
};

/// How long, in seconds, a button keeps its pressed look after being clicked.
pub const CLICK_FLASH: f64 = 0.15;
pub const LABEL_FONT_SIZE: f32 = 20.;

#[derive(Clone, Debug)]
pub struct ButtonWidget<M: Clone> {
    area: Box2D<f32>,
    label: String,
    colors: WidgetColors,

    state: WidgetInteractionState,
    flash_remaining: f64,

    on_click: M,
}

impl<M: Clone> ButtonWidget<M> {
    pub fn new(x: f32, y: f32, width: f32, height: f32, label: impl Into<String>, on_click: M) -> Self {
        Self {
            area: Box2D::from_origin_and_size(Point2D::new(x, y), Size2D::new(width, height)),
            label: label.into(),
            colors: WidgetColors::DEFAULT,

            state: WidgetInteractionState::default(),
            flash_remaining: 0.,

            on_click,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub const fn is_active(&self) -> bool {
        self.state.is_active()
    }
    pub const fn set_active(&mut self, active: bool) {
        self.state.set_active(active);
    }

    /// Whether the click animation is still running.
    pub const fn is_pressed(&self) -> bool {
        self.state.is_pressed()
    }

    fn paint(&self, list: &mut DrawList, visual: WidgetVisualState) {
        let appearance = self.colors.appearance(visual);
        list.fill_rectangle(self.area, appearance.background);
        list.stroke_rectangle(self.area, appearance.border, appearance.border_width);
        list.text(
            self.label.as_str(),
            self.area,
            TextOptions {
                color: appearance.text,
                font_size: LABEL_FONT_SIZE,
                alignment: Alignment::Center,
                ..Default::default()
            },
        );
    }
}

impl<M: Clone> Element for ButtonWidget<M> {
    type Message = M;

    fn as_widget(self) -> Widget<Self::Message> {
        Widget::Button(self)
    }

    fn bounds(&self) -> Box2D<f32> {
        self.area
    }

    fn is_enabled(&self) -> bool {
        self.state.is_enabled()
    }
    fn set_enabled(&mut self, enabled: bool) {
        self.state.set_enabled(enabled);
    }

    fn update(&mut self, delta: f64) {
        if self.flash_remaining > 0. {
            self.flash_remaining = (self.flash_remaining - delta).max(0.);
            self.state.set_pressed(self.flash_remaining > 0.);
        }
    }

    fn render(&self, list: &mut DrawList) {
        self.paint(list, self.state.to_visual());
    }

    fn render_hover(&self, list: &mut DrawList) {
        self.paint(list, self.state.to_visual().hovered());
    }

    fn render_focus(&self, list: &mut DrawList) {
        self.paint(list, self.state.to_visual().focused());
        render_focus_ring(list, self.area, self.colors.border_hover);
    }

    fn click(&mut self) -> M {
        self.flash_remaining = CLICK_FLASH;
        self.state.set_pressed(true);
        self.on_click.clone()
    }
}

#[cfg(test)]
mod tests {
    use graphics::DrawCommand;

    use super::*;

    fn button() -> ButtonWidget<&'static str> {
        ButtonWidget::new(10., 20., 100., 30., "Line", "line")
    }

    #[test]
    fn paints_background_border_then_label() {
        let mut list = DrawList::new();
        button().render(&mut list);

        let commands = list.commands();
        assert_eq!(commands.len(), 3);
        match &commands[0] {
            DrawCommand::Rectangle { area, options } => {
                assert_eq!(*area, Box2D::new(Point2D::new(10., 20.), Point2D::new(110., 50.)));
                assert_eq!(options.fill, Some(WidgetColors::DEFAULT.background));
            }
            other => panic!("expected the background, got {other:?}"),
        }
        match &commands[1] {
            DrawCommand::Rectangle { options, .. } => {
                assert_eq!(options.fill, None);
                assert_eq!(options.stroke_color, Some(WidgetColors::DEFAULT.border));
            }
            other => panic!("expected the border, got {other:?}"),
        }
        match &commands[2] {
            DrawCommand::Text {
                content, options, ..
            } => {
                assert_eq!(content, "Line");
                assert_eq!(options.alignment, Alignment::Center);
                assert_eq!(options.font_size, LABEL_FONT_SIZE);
            }
            other => panic!("expected the label, got {other:?}"),
        }
    }

    #[test]
    fn hover_uses_hover_colors() {
        let mut list = DrawList::new();
        button().render_hover(&mut list);

        match &list.commands()[0] {
            DrawCommand::Rectangle { options, .. } => {
                assert_eq!(options.fill, Some(WidgetColors::DEFAULT.background_hover));
            }
            other => panic!("expected the background, got {other:?}"),
        }
    }

    #[test]
    fn click_returns_message_and_flashes() {
        let mut button = button();
        assert_eq!(button.click(), "line");
        assert!(button.is_pressed());

        button.update(0.1);
        assert!(button.is_pressed());

        button.update(0.1);
        assert!(!button.is_pressed());
    }

    #[test]
    fn focus_adds_a_ring_around_the_button() {
        let mut list = DrawList::new();
        button().render_focus(&mut list);

        assert_eq!(list.commands().len(), 4);
        match &list.commands()[3] {
            DrawCommand::Rectangle { area, .. } => {
                assert_eq!(*area, Box2D::new(Point2D::new(7., 17.), Point2D::new(113., 53.)));
            }
            other => panic!("expected the focus ring, got {other:?}"),
        }
    }
}
