//! # Chronicle Sim
//!
//! Contracts between the engine and the game-rule simulation. The
//! simulation itself (unit AI, pathing, combat, scenarios) lives outside
//! this workspace; everything here is the stable interface the frame loop
//! and the widgets program against:
//!
//! - [`GameState`]: tick, event consumption, world drawing, win/loss result
//! - [`UnitManager`]: hover/click first refusal, selection, entity sprites
//! - [`WorldMap`]: tile grid, pixel bounds, spatial entity queries
//! - [`PlayerView`]: read-only resource snapshots and visibility
//! - [`StateManager`]: the single active state, swappable mid-session

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod manager;
pub mod state;

pub use manager::StateManager;
pub use state::{
    CursorHint, EntityId, EntityRef, GameResult, GameState, PlayerId, PlayerView, SharedGameState,
    UnitAction, UnitManager, UnitSummary, VisibilityView, WorldMap, TILE_HEIGHT, TILE_WIDTH,
};
