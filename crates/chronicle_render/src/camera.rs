//! Camera over the world map.

use chronicle_core::{MapPos, ScreenPos, Size};

/// Camera holding a target world position.
///
/// The target is in map-pixel space and is clamped to the map's pixel
/// bounds after every mutation, so arbitrary scroll deltas can never move
/// the view off the map.
#[derive(Debug, Clone)]
pub struct Camera {
    target: MapPos,
    viewport: Size,
}

impl Camera {
    /// Creates a camera with the given viewport size, looking at the origin.
    #[must_use]
    pub fn new(viewport: Size) -> Self {
        Self {
            target: MapPos::ZERO,
            viewport,
        }
    }

    /// Returns the current target position (map-pixel space).
    #[must_use]
    pub fn target_position(&self) -> MapPos {
        self.target
    }

    /// Moves the camera target, clamping to `[0, map_pixel_bounds]` on
    /// both axes.
    pub fn set_target_position(&mut self, target: MapPos, map_pixel_bounds: Size) {
        self.target = target.clamped(map_pixel_bounds);
    }

    /// Returns the viewport size.
    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Resizes the viewport.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Converts a screen position to the map position currently under it.
    #[must_use]
    pub fn absolute_map_pos(&self, screen: ScreenPos) -> MapPos {
        (screen - self.viewport_center() + self.target.to_screen()).to_map()
    }

    /// Converts a map position to its current on-screen position.
    #[must_use]
    pub fn absolute_screen_pos(&self, map: MapPos) -> ScreenPos {
        map.to_screen() - self.target.to_screen() + self.viewport_center()
    }

    fn viewport_center(&self) -> ScreenPos {
        ScreenPos::new(self.viewport.width / 2.0, self.viewport.height / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_clamped_on_mutation() {
        let bounds = Size::new(1000.0, 1000.0);
        let mut camera = Camera::new(Size::new(640.0, 480.0));

        camera.set_target_position(MapPos::new(-500.0, 2000.0, 0.0), bounds);
        let target = camera.target_position();
        assert_eq!(target.x, 0.0);
        assert_eq!(target.y, 1000.0);

        camera.set_target_position(MapPos::new(1e9, -1e9, 0.0), bounds);
        let target = camera.target_position();
        assert_eq!(target.x, 1000.0);
        assert_eq!(target.y, 0.0);
    }

    #[test]
    fn test_screen_center_maps_to_target() {
        let bounds = Size::new(4000.0, 4000.0);
        let mut camera = Camera::new(Size::new(640.0, 480.0));
        camera.set_target_position(MapPos::new(500.0, 300.0, 0.0), bounds);

        let center = ScreenPos::new(320.0, 240.0);
        let map = camera.absolute_map_pos(center);
        assert!((map.x - 500.0).abs() < 1e-3);
        assert!((map.y - 300.0).abs() < 1e-3);
    }

    #[test]
    fn test_round_trip_through_camera() {
        let bounds = Size::new(4000.0, 4000.0);
        let mut camera = Camera::new(Size::new(800.0, 600.0));
        camera.set_target_position(MapPos::new(1200.0, 900.0, 0.0), bounds);

        let screen = ScreenPos::new(100.0, 150.0);
        let back = camera.absolute_screen_pos(camera.absolute_map_pos(screen));
        assert!((back.x - screen.x).abs() < 1e-3);
        assert!((back.y - screen.y).abs() < 1e-3);
    }
}
