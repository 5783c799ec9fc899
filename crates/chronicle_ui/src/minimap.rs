//! Minimap widget.

use std::cell::RefCell;
use std::rc::Rc;

use chronicle_core::{InputEvent, MapPos, MouseButton, ScreenPos, ScreenRect, TimeMs};
use chronicle_render::{Camera, Color, RenderResult, RenderTarget};
use chronicle_sim::{EntityRef, VisibilityView, WorldMap};

use crate::palette::{player_color, terrain_color};
use crate::widget::{InputHandler, InputOutcome, Widget};

/// Minimap: a scaled-down view of the whole map with entity dots.
///
/// Renders into its own offscreen target, re-composited into the frame
/// each redraw; the offscreen content is only rebuilt when the entity
/// snapshot actually differs from the cached one. Clicking recenters the
/// shared camera.
pub struct Minimap {
    rect: ScreenRect,
    camera: Rc<RefCell<Camera>>,
    map: Option<Rc<dyn WorldMap>>,
    visibility: Option<Rc<dyn VisibilityView>>,
    surface: RenderTarget,
    cached: Vec<EntityRef>,
    dirty: bool,
}

impl Minimap {
    /// Creates a minimap occupying `rect`, unbound to any state.
    ///
    /// # Errors
    ///
    /// Fails if `rect` has no area (the offscreen target needs one).
    pub fn new(rect: ScreenRect, camera: Rc<RefCell<Camera>>) -> RenderResult<Self> {
        Ok(Self {
            rect,
            camera,
            map: None,
            visibility: None,
            surface: RenderTarget::new(rect.size())?,
            cached: Vec::new(),
            dirty: true,
        })
    }

    /// Returns the minimap's bounds.
    #[must_use]
    pub fn rect(&self) -> ScreenRect {
        self.rect
    }

    /// Rebinds the minimap to a new state's map and visibility.
    ///
    /// Called by the engine on every active-state swap; stale bindings
    /// must never survive a swap.
    pub fn bind(&mut self, map: Rc<dyn WorldMap>, visibility: Rc<dyn VisibilityView>) {
        self.map = Some(map);
        self.visibility = Some(visibility);
        self.cached.clear();
        self.dirty = true;
    }

    fn rebuild_surface(&mut self, snapshot: &[EntityRef]) {
        let Some(map) = self.map.clone() else {
            return;
        };

        let cols = map.columns().max(1);
        let rows = map.rows().max(1);
        let cell_w = self.rect.width / cols as f32;
        let cell_h = self.rect.height / rows as f32;

        self.surface.clear(Color::BLACK);
        for row in 0..rows {
            for col in 0..cols {
                let explored = self
                    .visibility
                    .as_ref()
                    .map_or(true, |visibility| visibility.is_explored(col, row));
                let color = if explored {
                    terrain_color(map.terrain_at(col, row))
                } else {
                    Color::FOG
                };
                self.surface.draw_rect(
                    ScreenRect::new(col as f32 * cell_w, row as f32 * cell_h, cell_w, cell_h),
                    color,
                    Color::TRANSPARENT,
                    0.0,
                );
            }
        }

        let pixel_size = map.pixel_size();
        for entity in snapshot {
            let x = entity.position.x / pixel_size.width * self.rect.width;
            let y = entity.position.y / pixel_size.height * self.rect.height;
            self.surface.draw_rect(
                ScreenRect::new(x - 1.0, y - 1.0, 2.0, 2.0),
                player_color(entity.owner),
                Color::TRANSPARENT,
                0.0,
            );
        }
        self.surface.present();
    }

    fn recenter(&mut self, position: ScreenPos) {
        let Some(map) = &self.map else {
            return;
        };

        let pixel_size = map.pixel_size();
        let target = MapPos::new(
            (position.x - self.rect.x) / self.rect.width * pixel_size.width,
            (position.y - self.rect.y) / self.rect.height * pixel_size.height,
            0.0,
        );
        self.camera
            .borrow_mut()
            .set_target_position(target, pixel_size);
        self.dirty = true;
    }
}

impl Widget for Minimap {
    fn update(&mut self, _delta_ms: TimeMs) -> bool {
        let Some(map) = self.map.clone() else {
            return false;
        };

        let snapshot = map.entities_between(0, 0, map.columns().saturating_sub(1), map.rows().saturating_sub(1));
        if !self.dirty && snapshot == self.cached {
            return false;
        }

        self.rebuild_surface(&snapshot);
        self.cached = snapshot;
        self.dirty = false;
        true
    }

    fn draw(&mut self, target: &mut RenderTarget) {
        target.draw_target(&self.surface, self.rect.top_left());
    }
}

impl InputHandler for Minimap {
    fn handle_input(&mut self, event: &InputEvent) -> InputOutcome {
        match event {
            InputEvent::MousePress {
                button: MouseButton::Left,
                position,
            } if self.rect.contains(*position) => {
                self.recenter(*position);
                InputOutcome::Claimed
            }
            InputEvent::MouseRelease { position, .. } if self.rect.contains(*position) => {
                InputOutcome::Claimed
            }
            _ => InputOutcome::Pass,
        }
    }
}
