//! The software mouse cursor.

use std::rc::Rc;

use chronicle_core::{ScreenPos, ScreenRect};
use chronicle_render::{AssetStore, Color, GraphicId, Image, RenderTarget};
use chronicle_sim::{CursorHint, UnitManager};

/// Graphic id of the first cursor frame; hints index into the set.
const CURSOR_GRAPHIC_BASE: u32 = 51_000;

/// Cursor drawn by the engine (the OS cursor is hidden in-game).
///
/// The shape follows the unit layer's hover hint; both position and shape
/// changes are reported so the engine can fold them into the redraw
/// decision.
#[derive(Debug)]
pub struct MouseCursor {
    position: ScreenPos,
    hint: CursorHint,
    frames: [Option<Rc<Image>>; 3],
}

impl MouseCursor {
    /// Creates a cursor, loading its frames from the asset store.
    #[must_use]
    pub fn new(assets: &dyn AssetStore) -> Self {
        let mut frames: [Option<Rc<Image>>; 3] = [None, None, None];
        for (index, slot) in frames.iter_mut().enumerate() {
            *slot = assets.image(GraphicId(CURSOR_GRAPHIC_BASE + index as u32));
        }
        if frames.iter().any(Option::is_none) {
            tracing::warn!("missing cursor frames, falling back to plain pointer");
        }

        Self {
            position: ScreenPos::ZERO,
            hint: CursorHint::Normal,
            frames,
        }
    }

    /// Moves the cursor. Returns true if the position changed.
    pub fn set_position(&mut self, position: ScreenPos) -> bool {
        if self.position == position {
            return false;
        }
        self.position = position;
        true
    }

    /// Returns the current position.
    #[must_use]
    pub fn position(&self) -> ScreenPos {
        self.position
    }

    /// Refreshes the cursor shape from the unit layer's hover hint.
    /// Returns true if the shape changed.
    pub fn update(&mut self, unit_manager: &dyn UnitManager) -> bool {
        let hint = unit_manager.cursor_hint();
        if hint == self.hint {
            return false;
        }
        self.hint = hint;
        true
    }

    /// Records the cursor's draw commands. Always last in the frame so the
    /// cursor sits above every layer.
    pub fn draw(&mut self, target: &mut RenderTarget) {
        let frame = match self.hint {
            CursorHint::Normal => &self.frames[0],
            CursorHint::Attack => &self.frames[1],
            CursorHint::Action => &self.frames[2],
        };

        match frame {
            Some(image) => target.draw_image(image, self.position),
            None => target.draw_rect(
                ScreenRect::new(self.position.x, self.position.y, 8.0, 12.0),
                Color::WHITE,
                Color::BLACK,
                1.0,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chronicle_core::{MapPos, ScreenRect};
    use chronicle_render::{Camera, NullAssets};
    use chronicle_sim::{EntityId, EntityRef, UnitAction, UnitSummary};

    struct HintOnly(CursorHint);

    impl UnitManager for HintOnly {
        fn on_mouse_move(&mut self, _map_pos: MapPos) {}
        fn on_left_click(&mut self, _pos: ScreenPos, _camera: &Camera) -> bool {
            false
        }
        fn on_mouse_release(&mut self) -> bool {
            false
        }
        fn on_right_click(&mut self, _pos: ScreenPos, _camera: &Camera) {}
        fn select_units(&mut self, _rect: ScreenRect, _camera: &Camera) {}
        fn select_entity(&mut self, _id: EntityId) {}
        fn selection(&self) -> Vec<UnitSummary> {
            Vec::new()
        }
        fn trigger_action(&mut self, _action: UnitAction) {}
        fn cursor_hint(&self) -> CursorHint {
            self.0
        }
        fn render(&self, _target: &mut RenderTarget, _visible: &[EntityRef]) {}
    }

    #[test]
    fn test_position_diffs() {
        let mut cursor = MouseCursor::new(&NullAssets);

        assert!(cursor.set_position(ScreenPos::new(10.0, 10.0)));
        assert!(!cursor.set_position(ScreenPos::new(10.0, 10.0)));
    }

    #[test]
    fn test_hint_diffs() {
        let mut cursor = MouseCursor::new(&NullAssets);

        assert!(!cursor.update(&HintOnly(CursorHint::Normal)));
        assert!(cursor.update(&HintOnly(CursorHint::Attack)));
        assert!(!cursor.update(&HintOnly(CursorHint::Attack)));
    }
}
