//! # Chronicle Render
//!
//! Rendering for the chronicle engine, recorded rather than executed:
//! widgets and the world layer push [`DrawCommand`]s into a double-buffered
//! [`RenderTarget`]; `present` commits the back buffer, and a
//! [`WindowBackend`] (the external window/GPU collaborator) consumes the
//! committed list. This keeps every consumer - including tests - headless.
//!
//! Also here: the [`Camera`] (clamped world target, screen↔world
//! conversion through the current offset) and the [`AssetStore`] contract
//! for decoded images (misses degrade, never abort).

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod assets;
pub mod camera;
pub mod color;
pub mod command;
pub mod error;
pub mod target;
pub mod window;

pub use assets::{AssetStore, GraphicId, NullAssets, UiCiv, UiFileInfo, UiResolution};
pub use camera::Camera;
pub use color::Color;
pub use command::{Alignment, DrawCommand, Image, Text};
pub use error::{RenderError, RenderResult};
pub use target::RenderTarget;
pub use window::{HeadlessWindow, WindowBackend};
