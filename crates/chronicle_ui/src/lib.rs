//! # Chronicle UI
//!
//! The HUD widget set. Every widget follows the same two-call contract:
//!
//! - `update(delta_ms) -> bool` - pure state refresh, value-diffed against
//!   what is currently displayed; true means "I need a redraw".
//! - `draw(&mut RenderTarget)` - records draw commands, cheap and
//!   idempotent within a frame.
//!
//! The engine ORs the update results of every widget (plus input and
//! simulation changes) into a single per-frame redraw decision; no widget
//! sets a global dirty flag. Input-capable widgets additionally implement
//! [`InputHandler`] and take part in the engine's fixed-priority chain.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod action_panel;
pub mod dialog;
pub mod icon_button;
pub mod map_view;
pub mod message_log;
pub mod minimap;
pub mod mouse_cursor;
pub mod number_label;
pub mod palette;
pub mod unit_info_panel;
pub mod widget;

pub use action_panel::ActionPanel;
pub use dialog::{Dialog, DialogChoice};
pub use icon_button::{IconButton, IconButtonType};
pub use map_view::MapView;
pub use message_log::MessageLog;
pub use minimap::Minimap;
pub use mouse_cursor::MouseCursor;
pub use number_label::NumberLabel;
pub use unit_info_panel::UnitInfoPanel;
pub use widget::{InputHandler, InputOutcome, Widget};
