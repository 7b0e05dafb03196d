use color::{PremulColor, Srgb};
use euclid::default::{Box2D, Point2D, Size2D};
use graphics::{
    DrawList,
    primitives::{Alignment, TextOptions},
};
use gui::{
    WidgetId, WidgetManager,
    widgets::{CheckboxWidget, Widget},
};
use input::{
    CursorIcon, Key, KeyboardEvent, MouseButton, MouseEvent, MouseEventKind, SpecialKey,
};
use strum::IntoEnumIterator;
use tracing::info;

use crate::{
    Application, EventResponse,
    document::{DrawMode, DrawingDocument, Palette},
};

pub const BACKGROUND: PremulColor<Srgb> = PremulColor::BLACK;

pub const MOUSE_LABEL_AREA: Box2D<f32> = Box2D {
    min: Point2D::new(0., 0.),
    max: Point2D::new(400., 40.),
};
pub const MOUSE_LABEL_FONT_SIZE: f32 = 20.;

pub const PANEL_ORIGIN: Point2D<f32> = Point2D::new(10., 50.);
pub const BUTTON_SIZE: Size2D<f32> = Size2D::new(110., 32.);
pub const CHECKBOX_WIDTH: f32 = 170.;
pub const PANEL_GAP: f32 = 6.;

/// Actions carried by the widgets of the panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Message {
    SetMode(DrawMode),
    SetColor(Palette),
    ToggleFill,
    ClearAll,
}

pub fn mouse_label(position: Point2D<f32>) -> String {
    format!("Mouse at (x:{}, y:{})", position.x as i32, position.y as i32)
}

/// The line drawing tool: a document, the panel that configures it, and the pointer state tying
/// the two together.
pub struct DrawingApp {
    document: DrawingDocument,
    widgets: WidgetManager<Message>,

    mode_buttons: Vec<(DrawMode, WidgetId)>,
    color_buttons: Vec<(Palette, WidgetId)>,
    fill_checkbox: WidgetId,

    mouse_position: Point2D<f32>,
    viewport: Size2D<u32>,
}

impl DrawingApp {
    pub fn new(viewport: Size2D<u32>) -> Self {
        let mut widgets = WidgetManager::new();
        let mut rows = (0..).map(|row: u16| {
            PANEL_ORIGIN.y + f32::from(row) * (BUTTON_SIZE.height + PANEL_GAP)
        });
        let add_button = |widgets: &mut WidgetManager<Message>,
                          y: f32,
                          label: &'static str,
                          message: Message| {
            widgets.add_button(
                PANEL_ORIGIN.x,
                y,
                BUTTON_SIZE.width,
                BUTTON_SIZE.height,
                label,
                message,
            )
        };

        let mode_buttons: Vec<_> = DrawMode::iter()
            .zip(&mut rows)
            .map(|(mode, y)| (mode, add_button(&mut widgets, y, mode.label(), Message::SetMode(mode))))
            .collect();
        let color_buttons: Vec<_> = Palette::iter()
            .zip(&mut rows)
            .map(|(color, y)| {
                (color, add_button(&mut widgets, y, color.label(), Message::SetColor(color)))
            })
            .collect();
        let clear_y = rows.next().unwrap_or(PANEL_ORIGIN.y);
        add_button(&mut widgets, clear_y, "Clear", Message::ClearAll);
        let fill_y = rows.next().unwrap_or(PANEL_ORIGIN.y);
        let fill_checkbox = widgets.add_checkbox(
            PANEL_ORIGIN.x,
            fill_y,
            CHECKBOX_WIDTH,
            BUTTON_SIZE.height,
            "Fill rectangles",
            Message::ToggleFill,
        );

        let mut app = Self {
            document: DrawingDocument::new(),
            widgets,

            mode_buttons,
            color_buttons,
            fill_checkbox,

            mouse_position: Point2D::origin(),
            viewport,
        };
        app.sync_widgets();
        app
    }

    pub const fn document(&self) -> &DrawingDocument {
        &self.document
    }

    pub const fn widgets(&self) -> &WidgetManager<Message> {
        &self.widgets
    }

    pub const fn viewport(&self) -> Size2D<u32> {
        self.viewport
    }

    pub fn mode_button(&self, mode: DrawMode) -> Option<WidgetId> {
        self.mode_buttons
            .iter()
            .find_map(|(candidate, id)| (*candidate == mode).then_some(*id))
    }

    pub fn color_button(&self, color: Palette) -> Option<WidgetId> {
        self.color_buttons
            .iter()
            .find_map(|(candidate, id)| (*candidate == color).then_some(*id))
    }

    pub const fn fill_checkbox(&self) -> WidgetId {
        self.fill_checkbox
    }

    pub fn handle_message(&mut self, message: Message) {
        match message {
            Message::SetMode(mode) => {
                info!("Drawing mode changed to {mode:?}");
                self.document.set_active_mode(mode);
            }
            Message::SetColor(color) => {
                info!("Drawing color changed to {color:?}");
                self.document.set_active_color(color);
            }
            Message::ToggleFill => {
                // The checkbox has already flipped itself, follow it instead of toggling blindly.
                let fill = self
                    .widgets
                    .widget(self.fill_checkbox)
                    .and_then(Widget::as_checkbox)
                    .map_or(!self.document.fill_new_rectangles(), CheckboxWidget::is_checked);
                info!("Filling new rectangles: {fill}");
                self.document.set_fill_new_rectangles(fill);
            }
            Message::ClearAll => {
                info!("Clearing the drawing");
                self.document.clear_all();
            }
        }
        self.sync_widgets();
    }

    /// Marks the buttons of the active mode and color, and matches the checkbox to the document.
    fn sync_widgets(&mut self) {
        let active_mode = self.document.active_mode();
        for (mode, id) in &self.mode_buttons {
            if let Some(button) = self.widgets.widget_mut(*id).and_then(Widget::as_button_mut) {
                button.set_active(*mode == active_mode);
            }
        }
        let active_color = self.document.active_color();
        for (color, id) in &self.color_buttons {
            if let Some(button) = self.widgets.widget_mut(*id).and_then(Widget::as_button_mut) {
                button.set_active(*color == active_color);
            }
        }
        let fill = self.document.fill_new_rectangles();
        if let Some(checkbox) = self
            .widgets
            .widget_mut(self.fill_checkbox)
            .and_then(Widget::as_checkbox_mut)
        {
            checkbox.set_checked(fill);
        }
    }

    fn pointer_moved(&mut self, position: Point2D<f32>) {
        self.mouse_position = position;
        self.widgets.on_mouse_move(position.x, position.y);
    }
}

impl Application for DrawingApp {
    fn update(&mut self, delta: f64) {
        self.widgets.update(delta);
    }

    fn render(&self, list: &mut DrawList) {
        list.clear(BACKGROUND);
        self.document.render(list);
        list.text(
            mouse_label(self.mouse_position),
            MOUSE_LABEL_AREA,
            TextOptions {
                color: PremulColor::WHITE,
                font_size: MOUSE_LABEL_FONT_SIZE,
                alignment: Alignment::Left,
                ..Default::default()
            },
        );
        self.widgets.render(list);
    }

    fn mouse_event(&mut self, event: MouseEvent) -> EventResponse {
        let position = event.position;
        match event.kind {
            MouseEventKind::Enter | MouseEventKind::Motion => {
                self.pointer_moved(position);
                self.document.drag_to(position);
            }
            MouseEventKind::Leave => self.widgets.clear_hover(),
            MouseEventKind::Press {
                button: MouseButton::Left,
            } => {
                // Hover is refreshed first so a press without prior motion still hits widgets.
                self.pointer_moved(position);
                if !self.widgets.is_over_widget() {
                    self.document.begin(position);
                }
            }
            MouseEventKind::Release {
                button: MouseButton::Left,
            } => {
                self.pointer_moved(position);
                if self.document.is_drawing() {
                    self.document.drag_to(position);
                    self.document.commit();
                } else if let Some(message) = self.widgets.on_mouse_click() {
                    self.handle_message(message);
                }
            }
            MouseEventKind::Press { .. } | MouseEventKind::Release { .. } => {}
        }
        EventResponse::Continue
    }

    fn keyboard_event(&mut self, event: KeyboardEvent) -> EventResponse {
        match event.pressed() {
            Some(Key::SpecialKey(SpecialKey::Escape)) => {
                info!("Escape pressed, exiting");
                EventResponse::Exit
            }
            _ => EventResponse::Continue,
        }
    }

    fn resize(&mut self, size: Size2D<u32>) {
        self.viewport = size;
    }

    fn cursor_icon(&self) -> CursorIcon {
        if self.widgets.is_over_widget() {
            CursorIcon::Pointer
        } else {
            CursorIcon::Crosshair
        }
    }
}
