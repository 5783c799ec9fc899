//! Widget and input-handler traits.

use chronicle_core::{InputEvent, TimeMs};
use chronicle_render::RenderTarget;

/// Result of offering an event to an input handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// The handler consumed the event; propagation stops.
    Claimed,
    /// The handler is not interested; offer the event to the next one.
    Pass,
}

impl InputOutcome {
    /// Returns true if the event was claimed.
    #[must_use]
    pub const fn is_claimed(self) -> bool {
        matches!(self, Self::Claimed)
    }
}

/// A HUD widget.
///
/// `update` is a pure state refresh: no drawing, returns whether anything
/// visible changed since the last call (value-diffed, not time-diffed).
/// `draw` records commands into the shared target; it is cheap and
/// idempotent within a frame. Widgets must not keep state-derived bindings
/// across an active-state swap - the engine rebinds them explicitly.
pub trait Widget {
    /// Refreshes internal state. Returns true if a redraw is needed.
    fn update(&mut self, delta_ms: TimeMs) -> bool;

    /// Records this widget's draw commands.
    fn draw(&mut self, target: &mut RenderTarget);
}

/// A participant in the engine's fixed-priority input chain.
///
/// The chain is evaluated in a fixed order; the first handler returning
/// [`InputOutcome::Claimed`] stops propagation for that event.
pub trait InputHandler {
    /// Offers an event to this handler.
    fn handle_input(&mut self, event: &InputEvent) -> InputOutcome;
}
