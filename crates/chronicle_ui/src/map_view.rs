//! World-layer renderer.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use chronicle_core::{MapPos, ScreenPos, ScreenRect, TimeMs};
use chronicle_render::{AssetStore, Camera, Color, Image, RenderTarget};
use chronicle_sim::{VisibilityView, WorldMap, TILE_HEIGHT, TILE_WIDTH};

use crate::palette::terrain_color;
use crate::widget::Widget;

/// Draws the terrain layer under everything else.
///
/// Keeps a camera-derived window of visible tiles; `update` reports true
/// exactly when the camera moved since the last frame, which is what makes
/// camera scrolling trigger redraws. Tile art comes from the asset store
/// with a flat-color fallback per terrain id.
pub struct MapView {
    camera: Rc<RefCell<Camera>>,
    assets: Rc<dyn AssetStore>,
    map: Option<Rc<dyn WorldMap>>,
    visibility: Option<Rc<dyn VisibilityView>>,
    tile_cache: HashMap<u16, Option<Rc<Image>>>,
    last_drawn_target: Option<MapPos>,
}

impl MapView {
    /// Creates an unbound map view.
    #[must_use]
    pub fn new(camera: Rc<RefCell<Camera>>, assets: Rc<dyn AssetStore>) -> Self {
        Self {
            camera,
            assets,
            map: None,
            visibility: None,
            tile_cache: HashMap::new(),
            last_drawn_target: None,
        }
    }

    /// Rebinds the view to a new state's map and visibility.
    pub fn bind(&mut self, map: Rc<dyn WorldMap>, visibility: Rc<dyn VisibilityView>) {
        self.map = Some(map);
        self.visibility = Some(visibility);
        self.last_drawn_target = None;
    }

    /// The inclusive tile window currently in view, as
    /// `(first_col, first_row, last_col, last_row)`.
    ///
    /// `None` while unbound.
    #[must_use]
    pub fn visible_tile_window(&self) -> Option<(u32, u32, u32, u32)> {
        let map = self.map.as_ref()?;
        let camera = self.camera.borrow();
        let viewport = camera.viewport();

        // Project all four viewport corners into map space and take the
        // bounding tile range; the dimetric view makes any single corner
        // insufficient.
        let corners = [
            ScreenPos::ZERO,
            ScreenPos::new(viewport.width, 0.0),
            ScreenPos::new(0.0, viewport.height),
            ScreenPos::new(viewport.width, viewport.height),
        ];
        let mut min_x = f32::MAX;
        let mut min_y = f32::MAX;
        let mut max_x = f32::MIN;
        let mut max_y = f32::MIN;
        for corner in corners {
            let map_pos = camera.absolute_map_pos(corner);
            min_x = min_x.min(map_pos.x);
            min_y = min_y.min(map_pos.y);
            max_x = max_x.max(map_pos.x);
            max_y = max_y.max(map_pos.y);
        }

        let clamp_col = |value: f32| (value / TILE_WIDTH).floor().max(0.0) as u32;
        let last_col = map.columns().saturating_sub(1);
        let last_row = map.rows().saturating_sub(1);
        Some((
            clamp_col(min_x).min(last_col),
            clamp_col(min_y).min(last_row),
            clamp_col(max_x).min(last_col),
            clamp_col(max_y).min(last_row),
        ))
    }

    fn tile_image(&mut self, terrain: u16) -> Option<Rc<Image>> {
        if !self.tile_cache.contains_key(&terrain) {
            let image = self.assets.terrain_tile(terrain);
            self.tile_cache.insert(terrain, image);
        }
        self.tile_cache.get(&terrain).cloned().flatten()
    }
}

impl Widget for MapView {
    fn update(&mut self, _delta_ms: TimeMs) -> bool {
        if self.map.is_none() {
            return false;
        }

        let target = self.camera.borrow().target_position();
        if self.last_drawn_target == Some(target) {
            return false;
        }
        self.last_drawn_target = Some(target);
        true
    }

    fn draw(&mut self, target: &mut RenderTarget) {
        let Some(map) = self.map.clone() else {
            return;
        };
        let Some((first_col, first_row, last_col, last_row)) = self.visible_tile_window() else {
            return;
        };
        let visibility = self.visibility.clone();

        for row in first_row..=last_row {
            for col in first_col..=last_col {
                let explored = visibility
                    .as_ref()
                    .map_or(true, |visibility| visibility.is_explored(col, row));
                if !explored {
                    continue;
                }

                let center = MapPos::new(
                    (col as f32 + 0.5) * TILE_WIDTH,
                    (row as f32 + 0.5) * TILE_WIDTH,
                    0.0,
                );
                let screen = self.camera.borrow().absolute_screen_pos(center);
                let terrain = map.terrain_at(col, row);

                match self.tile_image(terrain) {
                    Some(image) => target.draw_image(
                        &image,
                        ScreenPos::new(
                            screen.x - image.size.width / 2.0,
                            screen.y - image.size.height / 2.0,
                        ),
                    ),
                    None => target.draw_rect(
                        ScreenRect::new(
                            screen.x - TILE_WIDTH,
                            screen.y - TILE_HEIGHT / 2.0,
                            TILE_WIDTH * 2.0,
                            TILE_HEIGHT,
                        ),
                        terrain_color(terrain),
                        Color::TRANSPARENT,
                        0.0,
                    ),
                }
            }
        }
    }
}
