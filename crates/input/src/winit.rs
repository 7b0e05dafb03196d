use winit::{
    event::{ElementState, KeyEvent},
    keyboard::{self, ModifiersState, NamedKey},
};

use crate::{CursorIcon, Key, KeyboardEvent, KeyboardEventKind, Modifiers, MouseButton, SpecialKey};

pub const fn mouse_button(button: winit::event::MouseButton) -> MouseButton {
    match button {
        winit::event::MouseButton::Left => MouseButton::Left,
        winit::event::MouseButton::Right => MouseButton::Right,
        winit::event::MouseButton::Middle => MouseButton::Middle,
        winit::event::MouseButton::Back => MouseButton::Back,
        winit::event::MouseButton::Forward => MouseButton::Forward,
        winit::event::MouseButton::Other(id) => MouseButton::Other(id),
    }
}

pub fn keyboard_event(event: &KeyEvent, modifiers: ModifiersState) -> KeyboardEvent {
    let key = self::key(&event.logical_key);
    KeyboardEvent {
        modifiers: self::modifiers(modifiers),
        kind: match event.state {
            ElementState::Pressed => KeyboardEventKind::Press(key),
            ElementState::Released => KeyboardEventKind::Release(key),
        },
    }
}

pub fn modifiers_changed(modifiers: ModifiersState) -> KeyboardEvent {
    KeyboardEvent {
        modifiers: self::modifiers(modifiers),
        kind: KeyboardEventKind::ModifiersChanged,
    }
}

pub fn modifiers(modifiers: ModifiersState) -> Modifiers {
    let mut new = Modifiers::empty();
    if modifiers.control_key() {
        new = new.union(Modifiers::CTRL);
    };
    if modifiers.alt_key() {
        new = new.union(Modifiers::ALT);
    };
    if modifiers.shift_key() {
        new = new.union(Modifiers::SHIFT);
    };
    if modifiers.super_key() {
        new = new.union(Modifiers::LOGO);
    };
    new
}

pub fn key(key: &keyboard::Key) -> Key {
    match key {
        keyboard::Key::Named(named) => match named {
            NamedKey::Shift => Key::SpecialKey(SpecialKey::Shift),
            NamedKey::Control => Key::SpecialKey(SpecialKey::Ctrl),
            NamedKey::Alt => Key::SpecialKey(SpecialKey::Alt),
            NamedKey::Super => Key::SpecialKey(SpecialKey::Logo),

            NamedKey::Escape => Key::SpecialKey(SpecialKey::Escape),
            NamedKey::Enter => Key::SpecialKey(SpecialKey::Enter),
            NamedKey::Backspace => Key::SpecialKey(SpecialKey::Backspace),
            NamedKey::Delete => Key::SpecialKey(SpecialKey::Delete),
            NamedKey::Tab => Key::SpecialKey(SpecialKey::Tab),

            NamedKey::ArrowLeft => Key::SpecialKey(SpecialKey::Left),
            NamedKey::ArrowRight => Key::SpecialKey(SpecialKey::Right),
            NamedKey::ArrowUp => Key::SpecialKey(SpecialKey::Up),
            NamedKey::ArrowDown => Key::SpecialKey(SpecialKey::Down),
            _ => Key::Unknown,
        },
        keyboard::Key::Character(repr) => Key::Character(repr.to_string()),
        _ => Key::Unknown,
    }
}

pub const fn cursor_icon(icon: CursorIcon) -> winit::window::CursorIcon {
    match icon {
        CursorIcon::Default => winit::window::CursorIcon::Default,
        CursorIcon::Pointer => winit::window::CursorIcon::Pointer,
        CursorIcon::Crosshair => winit::window::CursorIcon::Crosshair,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_escape_and_characters() {
        assert_eq!(
            key(&keyboard::Key::Named(NamedKey::Escape)),
            Key::SpecialKey(SpecialKey::Escape)
        );
        assert_eq!(
            key(&keyboard::Key::Character("a".into())),
            Key::Character("a".to_string())
        );
        assert_eq!(key(&keyboard::Key::Named(NamedKey::F13)), Key::Unknown);
    }

    #[test]
    fn maps_modifier_state() {
        let state = ModifiersState::SHIFT | ModifiersState::CONTROL;
        assert_eq!(modifiers(state), Modifiers::SHIFT | Modifiers::CTRL);
        assert_eq!(modifiers(ModifiersState::empty()), Modifiers::empty());
    }
}
