//! # Chronicle
//!
//! The orchestration core of a 2D real-time-strategy engine: a
//! single-threaded cooperative frame loop that merges input handling,
//! simulation ticking, camera control, and layered rendering into one
//! deterministic per-frame pass.
//!
//! ## Per-frame order (part of the contract)
//!
//! 1. Rebind widgets if the active state was swapped
//! 2. Drain and dispatch input through the fixed-priority chain
//! 3. Tick the simulation (unless paused by a modal dialog or finished)
//! 4. Update every widget; each reports whether it changed
//! 5. Recompute the selection-drag rectangle
//! 6. Redraw the layered scene if anything changed, else yield the CPU
//!
//! Later stages assume earlier ones already observed and reacted to input;
//! the order must be preserved exactly.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod engine;
pub mod error;

pub use config::{CameraConfig, ConfigError, EngineConfig, UiConfig, WindowConfig};
pub use engine::{Engine, FrameOutcome};
pub use error::{EngineError, EngineResult};
