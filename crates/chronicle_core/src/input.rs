//! Input events.
//!
//! Events are produced by the window backend, are immutable once created,
//! and are consumed by at most one handler in the engine's priority chain:
//! the first handler that claims an event stops its propagation.

use crate::geometry::ScreenPos;

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button.
    Left,
    /// Right mouse button.
    Right,
    /// Middle mouse button (scroll wheel click).
    Middle,
}

/// Keyboard key.
///
/// Only the keys the engine routes are listed; backends drop anything else
/// before it reaches the dispatch chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Arrow left.
    Left,
    /// Arrow right.
    Right,
    /// Escape key.
    Escape,
    /// Enter/Return key.
    Enter,
    /// Space bar.
    Space,
}

/// A single input event from the window backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The window was asked to close.
    Quit,
    /// A key was pressed.
    KeyPress {
        /// The key that was pressed.
        key: Key,
    },
    /// A mouse button was pressed.
    MousePress {
        /// The button.
        button: MouseButton,
        /// Cursor position at press time.
        position: ScreenPos,
    },
    /// A mouse button was released.
    MouseRelease {
        /// The button.
        button: MouseButton,
        /// Cursor position at release time.
        position: ScreenPos,
    },
    /// The cursor moved.
    MouseMove {
        /// New cursor position.
        position: ScreenPos,
    },
    /// The scroll wheel moved.
    Scroll {
        /// Scroll delta (positive = away from the user).
        delta: f32,
        /// Cursor position when scrolling.
        position: ScreenPos,
    },
}

impl InputEvent {
    /// Returns true for mouse press/release/move/scroll events.
    #[must_use]
    pub const fn is_mouse_event(&self) -> bool {
        matches!(
            self,
            Self::MousePress { .. } | Self::MouseRelease { .. } | Self::MouseMove { .. } | Self::Scroll { .. }
        )
    }

    /// Returns true for keyboard events.
    #[must_use]
    pub const fn is_keyboard_event(&self) -> bool {
        matches!(self, Self::KeyPress { .. })
    }

    /// Returns the cursor position carried by the event, if any.
    #[must_use]
    pub const fn position(&self) -> Option<ScreenPos> {
        match self {
            Self::MousePress { position, .. }
            | Self::MouseRelease { position, .. }
            | Self::MouseMove { position }
            | Self::Scroll { position, .. } => Some(*position),
            Self::Quit | Self::KeyPress { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_classification() {
        let press = InputEvent::MousePress {
            button: MouseButton::Left,
            position: ScreenPos::new(10.0, 10.0),
        };
        assert!(press.is_mouse_event());
        assert!(!press.is_keyboard_event());

        let key = InputEvent::KeyPress { key: Key::Up };
        assert!(key.is_keyboard_event());
        assert!(!key.is_mouse_event());

        assert!(!InputEvent::Quit.is_mouse_event());
    }

    #[test]
    fn test_event_position() {
        let pos = ScreenPos::new(3.0, 4.0);
        let event = InputEvent::MouseMove { position: pos };
        assert_eq!(event.position(), Some(pos));
        assert_eq!(InputEvent::Quit.position(), None);
    }
}
