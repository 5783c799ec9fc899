//! Resource counter labels.

use std::rc::Rc;

use chronicle_core::{ScreenPos, TimeMs};
use chronicle_render::{Color, Image, RenderTarget, Text};

use crate::widget::Widget;

/// An icon-plus-number HUD label (wood, food, gold, stone, population).
///
/// `set_value`/`set_max_value` report whether the displayed number
/// actually changed; this value-level diff is the primitive the engine's
/// redraw coalescing is built from.
#[derive(Debug)]
pub struct NumberLabel {
    position: ScreenPos,
    icon: Option<Rc<Image>>,
    value: i32,
    max_value: Option<i32>,
}

impl NumberLabel {
    /// Point size of the number text.
    const POINT_SIZE: f32 = 15.0;
    /// Horizontal gap between icon and number.
    const ICON_GAP: f32 = 4.0;

    /// Creates a label at the origin showing zero.
    #[must_use]
    pub fn new(icon: Option<Rc<Image>>) -> Self {
        Self {
            position: ScreenPos::ZERO,
            icon,
            value: 0,
            max_value: None,
        }
    }

    /// Moves the label.
    pub fn set_position(&mut self, position: ScreenPos) {
        self.position = position;
    }

    /// Sets the displayed value. Returns true if it changed.
    pub fn set_value(&mut self, value: i32) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        true
    }

    /// Sets the displayed maximum (e.g. population cap). Returns true if
    /// it changed.
    pub fn set_max_value(&mut self, max_value: i32) -> bool {
        if self.max_value == Some(max_value) {
            return false;
        }
        self.max_value = Some(max_value);
        true
    }

    /// Returns the displayed value.
    #[must_use]
    pub fn value(&self) -> i32 {
        self.value
    }

    fn text_content(&self) -> String {
        match self.max_value {
            Some(max) => format!("{}/{}", self.value, max),
            None => self.value.to_string(),
        }
    }
}

impl Widget for NumberLabel {
    fn update(&mut self, _delta_ms: TimeMs) -> bool {
        // Labels change through set_value/set_max_value, never by time.
        false
    }

    fn draw(&mut self, target: &mut RenderTarget) {
        let mut text_pos = self.position;
        if let Some(icon) = &self.icon {
            target.draw_image(icon, self.position);
            text_pos.x += icon.size.width + Self::ICON_GAP;
        }

        target.draw_text(
            Text::new(self.text_content(), text_pos, Self::POINT_SIZE)
                .with_color(Color::WHITE)
                .with_outline(Color::BLACK, 1.0),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_value_diffs() {
        let mut label = NumberLabel::new(None);

        assert!(label.set_value(100));
        assert!(!label.set_value(100));
        assert!(label.set_value(99));
    }

    #[test]
    fn test_set_max_value_diffs() {
        let mut label = NumberLabel::new(None);

        assert!(label.set_max_value(125));
        assert!(!label.set_max_value(125));
        assert!(label.set_max_value(130));
    }

    #[test]
    fn test_max_value_changes_text() {
        let mut label = NumberLabel::new(None);
        label.set_value(12);
        assert_eq!(label.text_content(), "12");

        label.set_max_value(40);
        assert_eq!(label.text_content(), "12/40");
    }
}
