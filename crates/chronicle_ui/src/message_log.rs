//! Scrolling on-screen message lines.

use chronicle_core::{ScreenPos, TimeMs};
use chronicle_render::{Color, RenderTarget, Text};

use crate::widget::Widget;

#[derive(Debug, Clone)]
struct MessageLine {
    text: String,
    end_time_ms: TimeMs,
}

/// Fixed-size ring of timed message lines.
///
/// New messages shift older ones up; when the ring is full the oldest is
/// evicted. Expiry is soft: an expired line is skipped at render time but
/// keeps its slot until new messages push it out, and expiring alone never
/// requests a redraw - a stale line can linger until the next redraw
/// happens for another reason. Both quirks are kept deliberately; changing
/// them would alter when messages visibly disappear under slot pressure.
#[derive(Debug)]
pub struct MessageLog {
    lines: Vec<MessageLine>,
    capacity: usize,
    timeout_ms: TimeMs,
    origin: ScreenPos,
    now_ms: TimeMs,
}

impl MessageLog {
    /// Point size of message text.
    const POINT_SIZE: f32 = 14.0;

    /// Creates a log with `capacity` visible lines.
    #[must_use]
    pub fn new(capacity: usize, timeout_ms: TimeMs, origin: ScreenPos) -> Self {
        Self {
            lines: Vec::with_capacity(capacity),
            capacity,
            timeout_ms,
            origin,
            now_ms: 0,
        }
    }

    /// Appends a message, evicting the oldest line if the ring is full.
    ///
    /// The new line expires at the log's current time plus the timeout.
    pub fn push(&mut self, text: impl Into<String>) {
        if self.lines.len() == self.capacity {
            self.lines.remove(0);
        }
        self.lines.push(MessageLine {
            text: text.into(),
            end_time_ms: self.now_ms + self.timeout_ms,
        });
    }

    /// Returns the texts currently held, oldest first (including expired
    /// lines that have not been evicted yet).
    #[must_use]
    pub fn held_lines(&self) -> Vec<&str> {
        self.lines.iter().map(|line| line.text.as_str()).collect()
    }

    /// Returns the texts that would render right now.
    #[must_use]
    pub fn visible_lines(&self) -> Vec<&str> {
        self.lines
            .iter()
            .filter(|line| line.end_time_ms >= self.now_ms)
            .map(|line| line.text.as_str())
            .collect()
    }

    fn line_spacing() -> f32 {
        Text::new(String::new(), ScreenPos::ZERO, Self::POINT_SIZE).line_spacing()
    }
}

impl Widget for MessageLog {
    fn update(&mut self, delta_ms: TimeMs) -> bool {
        self.now_ms += delta_ms;
        // Soft expiry: lines disappearing is a visibility change only at
        // the next redraw, never a reason for one.
        false
    }

    fn draw(&mut self, target: &mut RenderTarget) {
        let spacing = Self::line_spacing();
        for (index, line) in self.lines.iter().enumerate() {
            if line.end_time_ms < self.now_ms {
                continue;
            }

            // Newest message sits in the bottom slot; older ones stack up.
            let slot = self.capacity - self.lines.len() + index;
            let position = ScreenPos::new(self.origin.x, self.origin.y + slot as f32 * spacing);
            target.draw_text(
                Text::new(line.text.clone(), position, Self::POINT_SIZE)
                    .with_color(Color::WHITE)
                    .with_outline(Color::BLACK, 1.0),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chronicle_core::Size;

    fn log() -> MessageLog {
        MessageLog::new(3, 10_000, ScreenPos::new(5.0, 30.0))
    }

    #[test]
    fn test_overflow_evicts_oldest() {
        let mut log = log();
        log.push("one");
        log.push("two");
        log.push("three");
        log.push("four");

        assert_eq!(log.held_lines(), vec!["two", "three", "four"]);
    }

    #[test]
    fn test_expiry_is_soft() {
        let mut log = log();
        log.push("old");
        log.update(10_001);

        // Hidden at render time, but still occupying its slot.
        assert!(log.visible_lines().is_empty());
        assert_eq!(log.held_lines(), vec!["old"]);

        // Expiry never requests a redraw on its own.
        assert!(!log.update(1));
    }

    #[test]
    fn test_expiry_stamped_from_push_time() {
        let mut log = log();
        log.update(5_000);
        log.push("late");

        log.update(9_999);
        assert_eq!(log.visible_lines(), vec!["late"]);

        log.update(5_002);
        assert!(log.visible_lines().is_empty());
    }

    #[test]
    fn test_draw_skips_expired_lines() {
        let mut log = log();
        log.push("stale");
        log.push("fresh");

        // Expire only the first line: re-stamp by pushing later.
        log.update(10_001);
        log.push("newest");

        let mut target = RenderTarget::new(Size::new(640.0, 480.0)).unwrap();
        target.clear(Color::BLACK);
        log.draw(&mut target);

        // stale + fresh expired, only newest renders.
        assert_eq!(target.draw_call_count(), 1);
    }
}
