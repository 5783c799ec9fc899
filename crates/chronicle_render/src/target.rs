//! Double-buffered draw-command sink.

use std::rc::Rc;

use chronicle_core::{ScreenPos, ScreenRect, Size};

use crate::color::Color;
use crate::command::{DrawCommand, Image, Text};
use crate::error::{RenderError, RenderResult};

/// A render target that records draw commands.
///
/// Drawing is command recording: cheap, side-effect free, idempotent per
/// frame. Commands accumulate in the back buffer; [`RenderTarget::present`]
/// commits them as the new front buffer, which the window backend (or a
/// compositing parent target) consumes. Until the next `present`, the front
/// buffer keeps showing the last committed frame.
#[derive(Debug)]
pub struct RenderTarget {
    size: Size,
    back: Vec<DrawCommand>,
    front: Rc<Vec<DrawCommand>>,
    draw_calls: usize,
    frames_presented: u64,
}

impl RenderTarget {
    /// Creates a target of the given size.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidTargetSize`] if either dimension is
    /// not positive.
    pub fn new(size: Size) -> RenderResult<Self> {
        if !size.is_valid() {
            return Err(RenderError::InvalidTargetSize {
                width: size.width,
                height: size.height,
            });
        }

        Ok(Self {
            size,
            back: Vec::with_capacity(256),
            front: Rc::new(Vec::new()),
            draw_calls: 0,
            frames_presented: 0,
        })
    }

    /// Returns the target size.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Resizes the target. The current buffers keep their content.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Discards the back buffer and starts the frame with a clear.
    pub fn clear(&mut self, color: Color) {
        self.back.clear();
        self.back.push(DrawCommand::Clear { color });
    }

    /// Records an image blit.
    pub fn draw_image(&mut self, image: &Rc<Image>, position: ScreenPos) {
        self.draw_calls += 1;
        self.back.push(DrawCommand::Image {
            image: Rc::clone(image),
            position,
        });
    }

    /// Records a filled/outlined rectangle.
    pub fn draw_rect(&mut self, rect: ScreenRect, fill: Color, outline: Color, outline_width: f32) {
        self.draw_calls += 1;
        self.back.push(DrawCommand::Rect {
            rect,
            fill,
            outline,
            outline_width,
        });
    }

    /// Records a text run.
    pub fn draw_text(&mut self, text: Text) {
        self.draw_calls += 1;
        self.back.push(DrawCommand::Text(text));
    }

    /// Composites another target's committed frame at an offset.
    ///
    /// The nested target must have presented at least once for anything to
    /// appear; an uncommitted target composites as empty.
    pub fn draw_target(&mut self, other: &RenderTarget, position: ScreenPos) {
        self.draw_calls += 1;
        self.back.push(DrawCommand::Composite {
            commands: Rc::clone(&other.front),
            position,
        });
    }

    /// Commits the back buffer as the new front buffer.
    ///
    /// Resets the per-frame draw-call count.
    pub fn present(&mut self) {
        self.front = Rc::new(std::mem::take(&mut self.back));
        self.draw_calls = 0;
        self.frames_presented += 1;
    }

    /// Returns the committed (front) command list.
    #[must_use]
    pub fn front_commands(&self) -> &[DrawCommand] {
        &self.front
    }

    /// Returns the number of draw calls recorded since the last `present`.
    ///
    /// The redraw-coalescing contract counts these: an idle frame records
    /// zero.
    #[must_use]
    pub fn draw_call_count(&self) -> usize {
        self.draw_calls
    }

    /// Returns how many frames were committed over the target's lifetime.
    #[must_use]
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }
}
