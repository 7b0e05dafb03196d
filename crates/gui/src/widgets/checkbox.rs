use color::{PremulColor, Srgb};
use euclid::default::{Box2D, Point2D, Size2D};
use graphics::{
    DrawList,
    primitives::{Alignment, TextOptions},
};
use tracing::debug;

use crate::{
    Element,
    widgets::{Widget, WidgetColors, WidgetInteractionState, WidgetVisualState, render_focus_ring},
};

pub const BOX_SIZE: f32 = 20.;
/// Horizontal distance from the widget origin to the start of the label.
pub const LABEL_OFFSET: f32 = 25.;
pub const LABEL_FONT_SIZE: f32 = 20.;

const MARK_COLOR: PremulColor<Srgb> = PremulColor::BLACK;

/// A toggle drawn as a small box followed by its label, the whole area is clickable.
#[derive(Clone, Debug)]
pub struct CheckboxWidget<M: Clone> {
    area: Box2D<f32>,
    label: String,
    colors: WidgetColors,

    checked: bool,
    state: WidgetInteractionState,

    on_click: M,
}

impl<M: Clone> CheckboxWidget<M> {
    pub const COLORS: WidgetColors = WidgetColors {
        background: PremulColor::WHITE,
        background_hover: PremulColor::new([0.98, 0.92, 0.84, 1.]),
        border: PremulColor::new([1., 0.92, 0.8, 1.]),
        border_hover: PremulColor::new([1., 0.89, 0.77, 1.]),
        text: PremulColor::new([0.96, 0.96, 0.96, 1.]),
    };

    pub fn new(x: f32, y: f32, width: f32, height: f32, label: impl Into<String>, on_click: M) -> Self {
        Self {
            area: Box2D::from_origin_and_size(Point2D::new(x, y), Size2D::new(width, height)),
            label: label.into(),
            colors: Self::COLORS,

            checked: false,
            state: WidgetInteractionState::default(),

            on_click,
        }
    }

    pub const fn is_checked(&self) -> bool {
        self.checked
    }
    pub const fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// The square part of the widget, vertically centered next to the label.
    pub fn box_area(&self) -> Box2D<f32> {
        let top = self.area.min.y + (self.area.height() - BOX_SIZE).max(0.) / 2.;
        Box2D::from_origin_and_size(
            Point2D::new(self.area.min.x, top),
            Size2D::new(BOX_SIZE, BOX_SIZE),
        )
    }

    fn label_area(&self) -> Box2D<f32> {
        Box2D::new(
            Point2D::new(self.area.min.x + LABEL_OFFSET, self.area.min.y),
            Point2D::new(self.area.max.x.max(self.area.min.x + LABEL_OFFSET), self.area.max.y),
        )
    }

    fn paint(&self, list: &mut DrawList, visual: WidgetVisualState) {
        let appearance = self.colors.appearance(visual);
        let box_area = self.box_area();

        list.fill_rectangle(box_area, appearance.background);
        list.stroke_rectangle(box_area, appearance.border, appearance.border_width);
        list.text(
            self.label.as_str(),
            self.label_area(),
            TextOptions {
                color: appearance.text,
                font_size: LABEL_FONT_SIZE,
                alignment: Alignment::Left,
                ..Default::default()
            },
        );

        if self.checked {
            list.text(
                "X",
                box_area,
                TextOptions {
                    color: MARK_COLOR,
                    font_size: LABEL_FONT_SIZE,
                    alignment: Alignment::Center,
                    ..Default::default()
                },
            );
        }
    }
}

impl<M: Clone> Element for CheckboxWidget<M> {
    type Message = M;

    fn as_widget(self) -> Widget<Self::Message> {
        Widget::Checkbox(self)
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

    fn render(&self, list: &mut DrawList) {
        self.paint(list, self.state.to_visual());
    }

    fn render_hover(&self, list: &mut DrawList) {
        self.paint(list, self.state.to_visual().hovered());
    }

    fn render_focus(&self, list: &mut DrawList) {
        self.paint(list, self.state.to_visual().focused());
        render_focus_ring(list, self.box_area(), self.colors.border_hover);
    }

    /// Flips the checked state before handing out the message, so whoever applies it already
    /// sees the new state.
    fn click(&mut self) -> M {
        self.checked = !self.checked;
        debug!(label = %self.label, checked = self.checked, "Checkbox toggled");
        self.on_click.clone()
    }
}
