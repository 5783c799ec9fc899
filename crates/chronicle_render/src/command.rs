//! Draw commands and drawable value types.
//!
//! A [`DrawCommand`] is the unit of rendering: widgets record commands into
//! a [`crate::RenderTarget`] and the window backend replays the committed
//! list. Commands are cheap to clone; images are shared behind `Rc`.

use std::rc::Rc;

use chronicle_core::{ScreenPos, ScreenRect, Size};

use crate::color::Color;

/// A decoded image handle.
///
/// The asset layer owns the pixel data; the render layer only needs a
/// stable id (for the backend's texture cache) and the size (for layout).
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    /// Backend texture id.
    pub id: u32,
    /// Image dimensions in pixels.
    pub size: Size,
}

impl Image {
    /// Creates a new image handle.
    #[must_use]
    pub const fn new(id: u32, size: Size) -> Self {
        Self { id, size }
    }
}

/// Horizontal text alignment relative to the anchor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// Anchor is the left edge.
    #[default]
    Left,
    /// Anchor is the horizontal center.
    Center,
}

/// A styled text run.
///
/// Metrics are approximate (the font backend is external); they are good
/// enough for line stacking and overlay centering, which is all the engine
/// needs before the backend rasterizes.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    /// Text content.
    pub content: String,
    /// Anchor position.
    pub position: ScreenPos,
    /// Point size.
    pub point_size: f32,
    /// Fill color.
    pub color: Color,
    /// Outline color.
    pub outline_color: Color,
    /// Outline thickness in pixels.
    pub outline_thickness: f32,
    /// Horizontal alignment.
    pub alignment: Alignment,
}

impl Text {
    /// Average glyph advance as a fraction of the point size.
    const GLYPH_ASPECT: f32 = 0.6;
    /// Line spacing as a fraction of the point size.
    const LINE_SPACING: f32 = 1.4;

    /// Creates a text run with default styling (white fill, no outline).
    #[must_use]
    pub fn new(content: impl Into<String>, position: ScreenPos, point_size: f32) -> Self {
        Self {
            content: content.into(),
            position,
            point_size,
            color: Color::WHITE,
            outline_color: Color::TRANSPARENT,
            outline_thickness: 0.0,
            alignment: Alignment::Left,
        }
    }

    /// Sets the fill color.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Sets the outline color and thickness.
    #[must_use]
    pub fn with_outline(mut self, color: Color, thickness: f32) -> Self {
        self.outline_color = color;
        self.outline_thickness = thickness;
        self
    }

    /// Sets the alignment.
    #[must_use]
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Vertical distance between stacked lines at this point size.
    #[must_use]
    pub fn line_spacing(&self) -> f32 {
        self.point_size * Self::LINE_SPACING
    }

    /// Approximate rendered bounds of the (single-line) content.
    #[must_use]
    pub fn bounds(&self) -> Size {
        Size::new(
            self.content.chars().count() as f32 * self.point_size * Self::GLYPH_ASPECT,
            self.point_size * Self::LINE_SPACING,
        )
    }
}

/// A recorded draw operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Clear the whole target to a color. Always the first command of a
    /// committed frame.
    Clear {
        /// Clear color.
        color: Color,
    },
    /// Blit an image at a screen position.
    Image {
        /// The image to draw.
        image: Rc<Image>,
        /// Top-left position.
        position: ScreenPos,
    },
    /// Filled and/or outlined rectangle.
    Rect {
        /// Bounds.
        rect: ScreenRect,
        /// Fill color (may be transparent).
        fill: Color,
        /// Outline color (may be transparent).
        outline: Color,
        /// Outline width in pixels.
        outline_width: f32,
    },
    /// A text run.
    Text(Text),
    /// A nested render target's committed frame, composited at an offset.
    Composite {
        /// The nested target's committed commands.
        commands: Rc<Vec<DrawCommand>>,
        /// Top-left position of the nested target.
        position: ScreenPos,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_bounds_scale_with_content() {
        let short = Text::new("ab", ScreenPos::ZERO, 10.0);
        let long = Text::new("abcd", ScreenPos::ZERO, 10.0);

        assert!(long.bounds().width > short.bounds().width);
        assert_eq!(long.bounds().height, short.bounds().height);
    }

    #[test]
    fn test_text_builder() {
        let text = Text::new("fps: 60", ScreenPos::new(5.0, 5.0), 15.0)
            .with_color(Color::WHITE)
            .with_outline(Color::BLACK, 3.0)
            .with_alignment(Alignment::Center);

        assert_eq!(text.outline_thickness, 3.0);
        assert_eq!(text.alignment, Alignment::Center);
    }
}
