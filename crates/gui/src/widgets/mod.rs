use color::{PremulColor, Srgb};
use euclid::default::Box2D;
use graphics::DrawList;

use crate::Element;
use crate::macros::widget::{delegate_widget, impl_as_variants};

pub mod button;
pub mod checkbox;

pub use button::ButtonWidget;
pub use checkbox::CheckboxWidget;

pub enum Widget<M: Clone> {
    Button(ButtonWidget<M>),
    Checkbox(CheckboxWidget<M>),
}

impl_as_variants! {
    as_button, as_button_mut => Button(ButtonWidget<M>),
    as_checkbox, as_checkbox_mut => Checkbox(CheckboxWidget<M>),
}

impl<M: Clone> Element for Widget<M> {
    type Message = M;

    fn as_widget(self) -> Widget<M> {
        self
    }

    delegate_widget!(Button, Checkbox);
}

/// Scales every channel of a premultiplied color, fading it towards transparent.
const fn fade(color: PremulColor<Srgb>, amount: f32) -> PremulColor<Srgb> {
    let [r, g, b, a] = color.components;
    PremulColor::new([r * amount, g * amount, b * amount, a * amount])
}

const DISABLED_FADE: f32 = 0.4;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WidgetColors {
    pub background: PremulColor<Srgb>,
    pub background_hover: PremulColor<Srgb>,
    pub border: PremulColor<Srgb>,
    pub border_hover: PremulColor<Srgb>,
    pub text: PremulColor<Srgb>,
}

impl WidgetColors {
    pub const DEFAULT: Self = Self {
        background: PremulColor::new([0.08, 0.08, 0.08, 1.]),
        background_hover: PremulColor::new([0.22, 0.22, 0.22, 1.]),
        border: PremulColor::new([0.6, 0.6, 0.6, 1.]),
        border_hover: PremulColor::new([0.9, 0.9, 0.9, 1.]),
        text: PremulColor::WHITE,
    };

    /// Resolves the colors and border width used to paint `visual`.
    pub const fn appearance(&self, visual: WidgetVisualState) -> Appearance {
        match visual {
            WidgetVisualState::Pressed => Appearance {
                background: self.background_hover,
                border: self.border_hover,
                text: self.text,
                border_width: 3.,
            },
            WidgetVisualState::Active => Appearance {
                background: self.background_hover,
                border: self.border_hover,
                text: self.text,
                border_width: 2.,
            },
            WidgetVisualState::Hovered => Appearance {
                background: self.background_hover,
                border: self.border_hover,
                text: self.text,
                border_width: 1.,
            },
            WidgetVisualState::Focused | WidgetVisualState::Normal => Appearance {
                background: self.background,
                border: self.border,
                text: self.text,
                border_width: 1.,
            },
            WidgetVisualState::Disabled => Appearance {
                background: fade(self.background, DISABLED_FADE),
                border: fade(self.border, DISABLED_FADE),
                text: fade(self.text, DISABLED_FADE),
                border_width: 1.,
            },
        }
    }
}

impl Default for WidgetColors {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Appearance {
    pub background: PremulColor<Srgb>,
    pub border: PremulColor<Srgb>,
    pub text: PremulColor<Srgb>,
    pub border_width: f32,
}

/// Outline drawn around a widget that holds keyboard focus.
pub(crate) fn render_focus_ring(list: &mut DrawList, area: Box2D<f32>, color: PremulColor<Srgb>) {
    list.stroke_rectangle(area.inflate(3., 3.), color, 1.);
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WidgetInteractionState {
    active: bool,
    pressed: bool,
    enabled: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum WidgetVisualState {
    /// Pressed is the state with the most visual priority, it represents that the widget
    /// has just been clicked.
    Pressed = 0,
    /// Active is a special state for widgets that can be toggled on/off at the user's discretion.
    /// This is meant to represent when a widget is in a special state such as being the current
    /// mode or the color currently selected.
    Active = 1,
    /// The pointer is currently inside this widget.
    Hovered = 2,
    /// The widget holds keyboard focus.
    Focused = 3,
    /// The normal state of the widget when it has neither mouse or keyboard focus.
    Normal = 4,
    /// A special state for when the widget is marked as disabled.
    Disabled = 5,
}

impl WidgetVisualState {
    /// The state shown while the pointer is over the widget.
    pub const fn hovered(self) -> Self {
        match self {
            Self::Active | Self::Focused | Self::Normal => Self::Hovered,
            other => other,
        }
    }

    pub const fn focused(self) -> Self {
        match self {
            Self::Normal => Self::Focused,
            other => other,
        }
    }
}

impl WidgetInteractionState {
    pub const fn new(active: bool, pressed: bool, enabled: bool) -> Self {
        Self {
            active,
            pressed,
            enabled,
        }
    }

    pub const fn to_visual(&self) -> WidgetVisualState {
        if !self.enabled {
            return WidgetVisualState::Disabled;
        }
        if self.pressed {
            return WidgetVisualState::Pressed;
        }
        if self.active {
            return WidgetVisualState::Active;
        }
        WidgetVisualState::Normal
    }

    pub const fn is_active(&self) -> bool {
        self.active
    }
    pub const fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub const fn is_pressed(&self) -> bool {
        self.pressed
    }
    pub const fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }

    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }
    pub const fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

impl Default for WidgetInteractionState {
    fn default() -> Self {
        Self::new(false, false, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_outranks_every_other_state() {
        let state = WidgetInteractionState::new(true, true, false);
        assert_eq!(state.to_visual(), WidgetVisualState::Disabled);
        assert_eq!(state.to_visual().hovered(), WidgetVisualState::Disabled);
    }

    #[test]
    fn pressed_outranks_active() {
        let state = WidgetInteractionState::new(true, true, true);
        assert_eq!(state.to_visual(), WidgetVisualState::Pressed);
        assert_eq!(state.to_visual().hovered(), WidgetVisualState::Pressed);
    }

    #[test]
    fn hovering_an_active_widget_shows_hover() {
        let state = WidgetInteractionState::new(true, false, true);
        assert_eq!(state.to_visual(), WidgetVisualState::Active);
        assert_eq!(state.to_visual().hovered(), WidgetVisualState::Hovered);
        assert_eq!(state.to_visual().focused(), WidgetVisualState::Active);
    }

    #[test]
    fn disabled_colors_are_faded() {
        let colors = WidgetColors::DEFAULT;
        let appearance = colors.appearance(WidgetVisualState::Disabled);
        assert_eq!(appearance.text, fade(PremulColor::WHITE, DISABLED_FADE));
        assert!(appearance.background.components[3] < 1.);
    }
}
