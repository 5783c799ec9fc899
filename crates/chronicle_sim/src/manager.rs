//! Active-state bookkeeping.

use std::rc::Rc;

use crate::state::SharedGameState;

/// Holds the currently active game state.
///
/// Exactly one state is active at a time. Swapping is the engine's
/// mandatory rebind point: every widget that caches state-derived data
/// must be rebound before the next frame renders.
#[derive(Default)]
pub struct StateManager {
    active: Option<SharedGameState>,
}

impl StateManager {
    /// Creates an empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `state` the active state, replacing any previous one.
    pub fn set_active(&mut self, state: SharedGameState) {
        self.active = Some(state);
    }

    /// Returns the active state, if one was set.
    #[must_use]
    pub fn active_state(&self) -> Option<SharedGameState> {
        self.active.clone()
    }

    /// Returns true if `state` is the same allocation as the active state.
    ///
    /// Pointer identity, not structural equality: this is how the frame
    /// loop detects swaps.
    #[must_use]
    pub fn is_active(&self, state: &SharedGameState) -> bool {
        self.active
            .as_ref()
            .is_some_and(|active| Rc::ptr_eq(active, state))
    }
}
