//! Simulation-facing traits.

use std::cell::RefCell;
use std::rc::Rc;

use chronicle_core::{InputEvent, MapPos, ResourceKind, ScreenPos, ScreenRect, TimeMs};
use chronicle_render::{Camera, GraphicId, RenderTarget};

/// Width of one terrain tile in map pixels.
pub const TILE_WIDTH: f32 = 64.0;
/// Height of one terrain tile in screen pixels (dimetric half-height).
pub const TILE_HEIGHT: f32 = 32.0;

/// Outcome of a game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameResult {
    /// The game is still being played.
    #[default]
    Running,
    /// The human player won. Terminal.
    Won,
    /// The human player was defeated. Terminal.
    Lost,
}

/// Unique entity id within a game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u64);

/// Player id within a game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerId(pub u8);

/// A lightweight handle to an entity, as returned by spatial queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityRef {
    /// The entity.
    pub id: EntityId,
    /// Current map position.
    pub position: MapPos,
    /// Owning player.
    pub owner: PlayerId,
}

/// Commands a selected unit can take, shown as action-panel buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitAction {
    /// Attack-move.
    Attack,
    /// Halt current orders.
    Stop,
    /// Patrol between points.
    Patrol,
    /// Enter a garrisonable building.
    Garrison,
    /// Place a building foundation.
    Build,
}

/// Snapshot of one selected unit, for the info and action panels.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitSummary {
    /// The entity.
    pub entity: EntityId,
    /// Display name.
    pub name: String,
    /// Portrait graphic.
    pub icon: GraphicId,
    /// Current hit points.
    pub hp: u32,
    /// Maximum hit points.
    pub max_hp: u32,
    /// Actions the unit can take right now.
    pub actions: Vec<UnitAction>,
}

/// Cursor shape hinted by whatever is under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorHint {
    /// Plain pointer.
    #[default]
    Normal,
    /// Hovering something attackable.
    Attack,
    /// Hovering something interactable (gather, garrison, repair).
    Action,
}

/// Per-tile visibility as seen by one player.
pub trait VisibilityView {
    /// True once the tile has ever been revealed.
    fn is_explored(&self, col: u32, row: u32) -> bool;

    /// True while the tile is in line of sight right now.
    fn is_visible(&self, col: u32, row: u32) -> bool;
}

/// The world map: a tile grid with a pixel extent and spatial queries.
pub trait WorldMap {
    /// Number of tile columns.
    fn columns(&self) -> u32;

    /// Number of tile rows.
    fn rows(&self) -> u32;

    /// Map extent in map pixels; camera clamp bounds.
    fn pixel_size(&self) -> chronicle_core::Size;

    /// Terrain id of a tile.
    fn terrain_at(&self, col: u32, row: u32) -> u16;

    /// Entities within the inclusive tile window. An empty result is a
    /// plain no-op for callers, not an error.
    fn entities_between(&self, col0: u32, row0: u32, col1: u32, row1: u32) -> Vec<EntityRef>;
}

/// Read-only view of the human player.
pub trait PlayerView {
    /// Current stock of a resource.
    fn resources_available(&self, kind: ResourceKind) -> f32;

    /// Current consumption of a resource (used for population).
    fn resources_used(&self, kind: ResourceKind) -> f32;

    /// The player's visibility map.
    fn visibility(&self) -> Rc<dyn VisibilityView>;
}

/// The unit layer: selection, order first-refusal, sprite rendering.
///
/// Press/release handlers get first refusal before the engine starts or
/// finalizes a selection drag; a `true` return means the layer consumed
/// the event (e.g. to issue an order).
pub trait UnitManager {
    /// Forwards the hovered world position (cursor inside the world
    /// viewport, no drag active).
    fn on_mouse_move(&mut self, map_pos: MapPos);

    /// First refusal on a left press inside the world viewport.
    fn on_left_click(&mut self, pos: ScreenPos, camera: &Camera) -> bool;

    /// First refusal on a left release inside the world viewport.
    fn on_mouse_release(&mut self) -> bool;

    /// Context command on right release (move/attack/gather order).
    fn on_right_click(&mut self, pos: ScreenPos, camera: &Camera);

    /// Replaces the selection with the units inside a dragged screen rect.
    fn select_units(&mut self, rect: ScreenRect, camera: &Camera);

    /// Narrows the selection to a single entity (info-panel portrait click).
    fn select_entity(&mut self, id: EntityId);

    /// Snapshot of the current selection.
    fn selection(&self) -> Vec<UnitSummary>;

    /// Triggers an action for the current selection.
    fn trigger_action(&mut self, action: UnitAction);

    /// Cursor shape for whatever is currently hovered.
    fn cursor_hint(&self) -> CursorHint;

    /// Draws the sprites of the given visible entities.
    fn render(&self, target: &mut RenderTarget, visible: &[EntityRef]);
}

/// One running (or finished) game.
pub trait GameState {
    /// Advances the simulation to `now_ms`. Returns true if anything
    /// visible changed. Not called while a modal dialog is open or after
    /// the result left `Running`.
    fn update(&mut self, now_ms: TimeMs) -> bool;

    /// Offers an event the engine chain did not claim. Returns true if
    /// consumed.
    fn handle_event(&mut self, event: &InputEvent) -> bool;

    /// Draws state-specific content above the world layer.
    fn draw(&mut self, target: &mut RenderTarget);

    /// Win/loss outcome. Anything but `Running` is terminal for this state.
    fn result(&self) -> GameResult;

    /// The world map.
    fn map(&self) -> Rc<dyn WorldMap>;

    /// The unit layer.
    fn unit_manager(&self) -> Rc<RefCell<dyn UnitManager>>;

    /// The human player.
    fn human_player(&self) -> Rc<dyn PlayerView>;
}

/// Shared handle to a game state.
pub type SharedGameState = Rc<RefCell<dyn GameState>>;
