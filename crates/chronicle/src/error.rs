//! Engine error types.

use thiserror::Error;

use crate::config::ConfigError;
use chronicle_render::RenderError;

/// Errors that abort engine setup.
///
/// Setup is the only fallible phase; once the loop runs, every per-frame
/// operation reports status through return values and recoverable problems
/// degrade with a logged warning.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The window/render backend failed.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// The configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for engine setup.
pub type EngineResult<T> = Result<T, EngineError>;
