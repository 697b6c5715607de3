//! Input events, narrowed from crossterm to what widgets react to.

use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEventKind, KeyModifiers, MouseButton as CtButton,
    MouseEventKind,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key { key: Key, ctrl: bool },
    Click { x: u16, y: u16, button: MouseButton },
    /// Mouse wheel, one step per event. Shift+wheel is horizontal.
    Scroll { x: u16, y: u16, delta_x: i16, delta_y: i16 },
    Resize { width: u16, height: u16 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Escape,
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl From<CtButton> for MouseButton {
    fn from(button: CtButton) -> Self {
        match button {
            CtButton::Left => MouseButton::Left,
            CtButton::Right => MouseButton::Right,
            CtButton::Middle => MouseButton::Middle,
        }
    }
}

impl Key {
    fn from_code(code: KeyCode) -> Option<Key> {
        Some(match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Esc => Key::Escape,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            _ => return None,
        })
    }
}

impl Event {
    /// None for events nothing reacts to: key releases, mouse moves, focus, paste.
    pub fn from_crossterm(event: CrosstermEvent) -> Option<Event> {
        match event {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key {
                key: Key::from_code(key.code)?,
                ctrl: key.modifiers.contains(KeyModifiers::CONTROL),
            }),
            CrosstermEvent::Mouse(mouse) => {
                let (x, y) = (mouse.column, mouse.row);
                let shift = mouse.modifiers.contains(KeyModifiers::SHIFT);
                let (delta_x, delta_y) = match mouse.kind {
                    MouseEventKind::Down(button) => {
                        return Some(Event::Click {
                            x,
                            y,
                            button: button.into(),
                        });
                    }
                    MouseEventKind::ScrollUp if shift => (-1, 0),
                    MouseEventKind::ScrollDown if shift => (1, 0),
                    MouseEventKind::ScrollUp => (0, -1),
                    MouseEventKind::ScrollDown => (0, 1),
                    MouseEventKind::ScrollLeft => (-1, 0),
                    MouseEventKind::ScrollRight => (1, 0),
                    _ => return None,
                };
                Some(Event::Scroll {
                    x,
                    y,
                    delta_x,
                    delta_y,
                })
            }
            CrosstermEvent::Resize(width, height) => Some(Event::Resize { width, height }),
            _ => None,
        }
    }
}
