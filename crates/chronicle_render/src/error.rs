//! Render error types.

use thiserror::Error;

/// Errors that can occur when setting up rendering.
///
/// Only setup is fallible. Per-frame operations report status through
/// return values and never unwind across the frame loop.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// The window backend is not open (failed to open, or already closed).
    #[error("window backend is not open")]
    WindowClosed,

    /// A render target was created with a degenerate size.
    #[error("invalid render target size {width}x{height}")]
    InvalidTargetSize {
        /// Requested width.
        width: f32,
        /// Requested height.
        height: f32,
    },
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
