//! # Chronicle Core
//!
//! Shared foundation types for the chronicle engine:
//! - Injected time sources (monotonic clock, manual test clock)
//! - Screen- and map-space geometry with dimetric conversion
//! - Input events (immutable, claimed by at most one handler)
//! - Resource kinds displayed in the HUD
//!
//! ## Architecture Rules
//!
//! 1. **No hidden globals** - time is an injected capability, not a static
//! 2. **No GPU or OS dependencies** - every consumer can build headless
//! 3. **Plain-old-data geometry** - `repr(C)`, `Pod`, serde-friendly

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod geometry;
pub mod input;
pub mod resources;
pub mod time;

pub use geometry::{MapPos, ScreenPos, ScreenRect, Size};
pub use input::{InputEvent, Key, MouseButton};
pub use resources::ResourceKind;
pub use time::{Clock, GameClock, ManualClock, TimeMs};
