//! Modal dialog.

use std::rc::Rc;

use chronicle_core::{InputEvent, Key, MouseButton, ScreenPos, ScreenRect, Size};
use chronicle_render::{Alignment, Color, Image, RenderTarget, Text};

/// What the player decided in a dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogChoice {
    /// Dismiss the dialog and resume.
    Cancel,
    /// Close the window and quit the session.
    Quit,
}

/// The in-game menu dialog.
///
/// While a dialog is present the engine routes every input event to it
/// before any other handler; the dialog itself only reports the choice the
/// event produced (if any) - claiming is the engine's job.
#[derive(Debug)]
pub struct Dialog {
    rect: ScreenRect,
    background: Option<Rc<Image>>,
    buttons: Vec<(DialogChoice, ScreenRect, &'static str)>,
}

impl Dialog {
    const PANEL_SIZE: Size = Size::new(300.0, 180.0);
    const BUTTON_SIZE: Size = Size::new(220.0, 40.0);
    const BUTTON_GAP: f32 = 16.0;

    /// Creates a dialog centered in the window.
    ///
    /// `background` comes from the asset layer; a miss means the panel
    /// renders as a plain box (degraded, not fatal).
    #[must_use]
    pub fn new(window_size: Size, background: Option<Rc<Image>>) -> Self {
        let panel = background
            .as_ref()
            .map_or(Self::PANEL_SIZE, |image| image.size);
        let rect = ScreenRect::new(
            (window_size.width - panel.width) / 2.0,
            (window_size.height - panel.height) / 2.0,
            panel.width,
            panel.height,
        );

        let labels = [
            (DialogChoice::Cancel, "Resume game"),
            (DialogChoice::Quit, "Quit game"),
        ];
        let mut buttons = Vec::with_capacity(labels.len());
        let mut y = rect.y + 40.0;
        for (choice, label) in labels {
            let button = ScreenRect::new(
                rect.x + (rect.width - Self::BUTTON_SIZE.width) / 2.0,
                y,
                Self::BUTTON_SIZE.width,
                Self::BUTTON_SIZE.height,
            );
            buttons.push((choice, button, label));
            y += Self::BUTTON_SIZE.height + Self::BUTTON_GAP;
        }

        Self {
            rect,
            background,
            buttons,
        }
    }

    /// Returns the dialog's panel bounds.
    #[must_use]
    pub fn rect(&self) -> ScreenRect {
        self.rect
    }

    /// Routes an event to the dialog. Returns the resulting choice, if the
    /// event produced one; `None` keeps the dialog open.
    pub fn handle_event(&mut self, event: &InputEvent) -> Option<DialogChoice> {
        match event {
            InputEvent::KeyPress { key: Key::Escape } => Some(DialogChoice::Cancel),
            InputEvent::MouseRelease {
                button: MouseButton::Left,
                position,
            } => self
                .buttons
                .iter()
                .find(|(_, rect, _)| rect.contains(*position))
                .map(|(choice, _, _)| *choice),
            _ => None,
        }
    }

    /// Records the dialog's draw commands.
    pub fn draw(&mut self, target: &mut RenderTarget) {
        // Dim everything underneath.
        let window = ScreenRect::from_pos_size(ScreenPos::ZERO, target.size());
        target.draw_rect(window, Color::BLACK.with_alpha(0.5), Color::TRANSPARENT, 0.0);

        match &self.background {
            Some(image) => target.draw_image(image, self.rect.top_left()),
            None => target.draw_rect(
                self.rect,
                Color::rgba(0.1, 0.1, 0.15, 1.0),
                Color::GOLD,
                2.0,
            ),
        }

        for (_, rect, label) in &self.buttons {
            target.draw_rect(*rect, Color::rgba(0.25, 0.2, 0.1, 1.0), Color::GOLD, 1.0);
            target.draw_text(
                Text::new(*label, ScreenPos::new(rect.center().x, rect.y + 10.0), 16.0)
                    .with_color(Color::WHITE)
                    .with_alignment(Alignment::Center),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dialog() -> Dialog {
        Dialog::new(Size::new(1280.0, 1024.0), None)
    }

    #[test]
    fn test_escape_cancels() {
        let mut dialog = dialog();
        let choice = dialog.handle_event(&InputEvent::KeyPress { key: Key::Escape });
        assert_eq!(choice, Some(DialogChoice::Cancel));
    }

    #[test]
    fn test_click_on_quit_button() {
        let mut dialog = dialog();
        let (_, quit_rect, _) = dialog.buttons[1];

        let choice = dialog.handle_event(&InputEvent::MouseRelease {
            button: MouseButton::Left,
            position: quit_rect.center(),
        });
        assert_eq!(choice, Some(DialogChoice::Quit));
    }

    #[test]
    fn test_unrelated_events_keep_dialog_open() {
        let mut dialog = dialog();

        assert_eq!(
            dialog.handle_event(&InputEvent::MouseMove {
                position: ScreenPos::new(3.0, 3.0)
            }),
            None
        );
        assert_eq!(
            dialog.handle_event(&InputEvent::KeyPress { key: Key::Up }),
            None
        );
    }

    #[test]
    fn test_dialog_centered() {
        let dialog = dialog();
        let rect = dialog.rect();
        assert_eq!(rect.center(), ScreenPos::new(640.0, 512.0));
    }
}
