//! Screen- and map-space geometry.
//!
//! Two coordinate spaces exist side by side:
//! - **Screen space**: pixels on the window, y grows downward.
//! - **Map space**: pixels on the (dimetric) world map, z is elevation.
//!
//! [`MapPos::to_screen`] and [`ScreenPos::to_map`] convert between them
//! without a camera reference; camera-relative conversion lives in the
//! render crate.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// A position in screen space (pixels, y down).
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct ScreenPos {
    /// Horizontal pixel coordinate.
    pub x: f32,
    /// Vertical pixel coordinate (grows downward).
    pub y: f32,
}

impl ScreenPos {
    /// Origin.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Creates a new screen position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Converts to map space (dimetric projection, elevation zero).
    #[must_use]
    pub fn to_map(self) -> MapPos {
        MapPos::new(self.y + self.x / 2.0, self.y - self.x / 2.0, 0.0)
    }
}

impl std::ops::Add for ScreenPos {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for ScreenPos {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A position in map-pixel space.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct MapPos {
    /// Map-pixel x.
    pub x: f32,
    /// Map-pixel y.
    pub y: f32,
    /// Elevation.
    pub z: f32,
}

impl MapPos {
    /// Origin at ground level.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Creates a new map position.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Converts to screen space (dimetric projection).
    #[must_use]
    pub fn to_screen(self) -> ScreenPos {
        ScreenPos::new(self.x - self.y, (self.x + self.y) / 2.0 - self.z)
    }

    /// Returns the position with x and y clamped to `[0, bounds]`.
    ///
    /// Applied after every camera mutation; elevation is left alone.
    #[must_use]
    pub fn clamped(self, bounds: Size) -> Self {
        Self::new(
            self.x.clamp(0.0, bounds.width),
            self.y.clamp(0.0, bounds.height),
            self.z,
        )
    }
}

impl std::ops::Add for MapPos {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::Sub for MapPos {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// A width/height pair in pixels.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Size {
    /// Zero size.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Creates a new size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns true if both dimensions are positive.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// An axis-aligned rectangle in screen space.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct ScreenRect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl ScreenRect {
    /// A zero-sized rect at the origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Creates the normalized rectangle spanning two corner points.
    ///
    /// The corners may be given in any order; the result always has
    /// non-negative width and height.
    #[must_use]
    pub fn from_corners(a: ScreenPos, b: ScreenPos) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self::new(x, y, (a.x - b.x).abs(), (a.y - b.y).abs())
    }

    /// Creates a rectangle from a top-left position and a size.
    #[must_use]
    pub const fn from_pos_size(pos: ScreenPos, size: Size) -> Self {
        Self::new(pos.x, pos.y, size.width, size.height)
    }

    /// Returns the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Returns the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Returns the top-left corner.
    #[must_use]
    pub const fn top_left(&self) -> ScreenPos {
        ScreenPos::new(self.x, self.y)
    }

    /// Returns the center point.
    #[must_use]
    pub fn center(&self) -> ScreenPos {
        ScreenPos::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Returns the size.
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Returns true if the point is inside the rectangle.
    #[must_use]
    pub fn contains(&self, pos: ScreenPos) -> bool {
        pos.x >= self.x && pos.x < self.right() && pos.y >= self.y && pos.y < self.bottom()
    }

    /// Returns true if two rectangles overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Returns true if the rectangle has no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}
