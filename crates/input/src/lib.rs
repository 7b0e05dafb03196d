//! Platform independent input events, the platform layer converts its native events into these.
use bitflags::bitflags;
use euclid::default::Point2D;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "winit")]
pub mod winit;

bitflags! {
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u32 {
        const SHIFT = 1 << 0;
        const CTRL = 1 << 1;
        const ALT = 1 << 2;
        /// The "logo" key, also known as the "windows" or "super" key on a keyboard.
        #[doc(alias = "windows")]
        #[doc(alias = "super")]
        const LOGO = 1 << 3;
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyboardEvent {
    pub modifiers: Modifiers,
    pub kind: KeyboardEventKind,
}

impl KeyboardEvent {
    pub const fn new(modifiers: Modifiers, kind: KeyboardEventKind) -> Self {
        Self { modifiers, kind }
    }
    pub const fn press(key: Key) -> Self {
        Self::new(Modifiers::empty(), KeyboardEventKind::Press(key))
    }

    /// Returns the key if this event is a press of it.
    pub fn pressed(&self) -> Option<&Key> {
        match &self.kind {
            KeyboardEventKind::Press(key) => Some(key),
            _ => None,
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyboardEventKind {
    Press(Key),
    Release(Key),
    ModifiersChanged,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    SpecialKey(SpecialKey),
    Character(String),
    Unknown,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpecialKey {
    Shift,
    Ctrl,
    Alt,
    Logo,

    Escape,
    Enter,
    Backspace,
    Delete,
    Tab,

    Left,
    Right,
    Up,
    Down,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MouseEvent {
    /// Position in physical pixels, relative to the top left of the window.
    pub position: Point2D<f32>,
    pub kind: MouseEventKind,
}

impl MouseEvent {
    pub const fn new(position: Point2D<f32>, kind: MouseEventKind) -> Self {
        Self { position, kind }
    }
    pub const fn enter(position: Point2D<f32>) -> Self {
        Self::new(position, MouseEventKind::Enter)
    }
    pub const fn leave(position: Point2D<f32>) -> Self {
        Self::new(position, MouseEventKind::Leave)
    }
    pub const fn motion(position: Point2D<f32>) -> Self {
        Self::new(position, MouseEventKind::Motion)
    }
    pub const fn press(position: Point2D<f32>, button: MouseButton) -> Self {
        Self::new(position, MouseEventKind::Press { button })
    }
    pub const fn release(position: Point2D<f32>, button: MouseButton) -> Self {
        Self::new(position, MouseEventKind::Release { button })
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MouseEventKind {
    Enter,
    Leave,
    Motion,
    Press { button: MouseButton },
    Release { button: MouseButton },
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum CursorIcon {
    /// The platform-dependent default cursor. Often rendered as arrow.
    #[default]
    Default,

    /// A pointer that indicates something clickable. Often rendered as the
    /// backside of a hand with the index finger extended.
    Pointer,

    /// A simple crosshair (e.g., short line segments resembling a "+" sign).
    Crosshair,
}
