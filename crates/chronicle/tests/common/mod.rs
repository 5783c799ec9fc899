//! Recording fakes for driving the engine without a real simulation.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use chronicle::{Engine, EngineConfig};
use chronicle_core::{
    InputEvent, ManualClock, MapPos, ResourceKind, ScreenPos, ScreenRect, Size, TimeMs,
};
use chronicle_render::{Camera, DrawCommand, GraphicId, HeadlessWindow, NullAssets, RenderTarget};
use chronicle_sim::{
    CursorHint, EntityId, EntityRef, GameResult, GameState, PlayerView, SharedGameState,
    UnitAction, UnitManager, UnitSummary, VisibilityView, WorldMap,
};

pub struct OpenVisibility;

impl VisibilityView for OpenVisibility {
    fn is_explored(&self, _col: u32, _row: u32) -> bool {
        true
    }
    fn is_visible(&self, _col: u32, _row: u32) -> bool {
        true
    }
}

pub struct FakeMap {
    pub cols: u32,
    pub rows: u32,
    pub entities: RefCell<Vec<EntityRef>>,
    pub queries: Cell<usize>,
}

impl FakeMap {
    pub fn new(cols: u32, rows: u32) -> Self {
        Self {
            cols,
            rows,
            entities: RefCell::new(Vec::new()),
            queries: Cell::new(0),
        }
    }
}

impl WorldMap for FakeMap {
    fn columns(&self) -> u32 {
        self.cols
    }
    fn rows(&self) -> u32 {
        self.rows
    }
    fn pixel_size(&self) -> Size {
        Size::new(self.cols as f32 * 64.0, self.rows as f32 * 64.0)
    }
    fn terrain_at(&self, _col: u32, _row: u32) -> u16 {
        0
    }
    fn entities_between(&self, _c0: u32, _r0: u32, _c1: u32, _r1: u32) -> Vec<EntityRef> {
        self.queries.set(self.queries.get() + 1);
        self.entities.borrow().clone()
    }
}

pub struct FakePlayer {
    pub wood: Cell<f32>,
    pub population_used: Cell<f32>,
    pub population_cap: Cell<f32>,
}

impl FakePlayer {
    pub fn new() -> Self {
        Self {
            wood: Cell::new(100.0),
            population_used: Cell::new(4.0),
            population_cap: Cell::new(25.0),
        }
    }
}

impl PlayerView for FakePlayer {
    fn resources_available(&self, kind: ResourceKind) -> f32 {
        match kind {
            ResourceKind::Wood => self.wood.get(),
            ResourceKind::PopulationHeadroom => self.population_cap.get(),
            _ => 50.0,
        }
    }
    fn resources_used(&self, kind: ResourceKind) -> f32 {
        match kind {
            ResourceKind::PopulationHeadroom => self.population_used.get(),
            _ => 0.0,
        }
    }
    fn visibility(&self) -> Rc<dyn VisibilityView> {
        Rc::new(OpenVisibility)
    }
}

#[derive(Default)]
pub struct FakeUnits {
    pub claim_left_click: bool,
    pub claim_release: bool,
    pub left_clicks: Vec<ScreenPos>,
    pub releases: usize,
    pub right_clicks: Vec<ScreenPos>,
    pub hover_moves: Vec<MapPos>,
    pub selected_rects: Vec<ScreenRect>,
    pub narrowed: Vec<EntityId>,
    pub triggered: Vec<UnitAction>,
    pub selection: Vec<UnitSummary>,
    pub hint: CursorHint,
}

impl UnitManager for FakeUnits {
    fn on_mouse_move(&mut self, map_pos: MapPos) {
        self.hover_moves.push(map_pos);
    }
    fn on_left_click(&mut self, pos: ScreenPos, _camera: &Camera) -> bool {
        self.left_clicks.push(pos);
        self.claim_left_click
    }
    fn on_mouse_release(&mut self) -> bool {
        self.releases += 1;
        self.claim_release
    }
    fn on_right_click(&mut self, pos: ScreenPos, _camera: &Camera) {
        self.right_clicks.push(pos);
    }
    fn select_units(&mut self, rect: ScreenRect, _camera: &Camera) {
        self.selected_rects.push(rect);
    }
    fn select_entity(&mut self, id: EntityId) {
        self.narrowed.push(id);
    }
    fn selection(&self) -> Vec<UnitSummary> {
        self.selection.clone()
    }
    fn trigger_action(&mut self, action: UnitAction) {
        self.triggered.push(action);
    }
    fn cursor_hint(&self) -> CursorHint {
        self.hint
    }
    fn render(&self, target: &mut RenderTarget, visible: &[EntityRef]) {
        for entity in visible {
            let screen = entity.position.to_screen();
            target.draw_rect(
                ScreenRect::new(screen.x, screen.y, 4.0, 4.0),
                chronicle_render::Color::WHITE,
                chronicle_render::Color::TRANSPARENT,
                0.0,
            );
        }
    }
}

pub struct FakeState {
    pub map: Rc<FakeMap>,
    pub units: Rc<RefCell<FakeUnits>>,
    pub player: Rc<FakePlayer>,
    pub result: Cell<GameResult>,
    /// Result to switch to during the next `update` call.
    pub result_after_update: Cell<Option<GameResult>>,
    /// What `update` reports as its redraw flag.
    pub update_reports_change: Cell<bool>,
    pub updates: Cell<usize>,
    pub unclaimed_events: RefCell<Vec<InputEvent>>,
}

impl FakeState {
    pub fn new() -> Self {
        Self {
            map: Rc::new(FakeMap::new(32, 32)),
            units: Rc::new(RefCell::new(FakeUnits::default())),
            player: Rc::new(FakePlayer::new()),
            result: Cell::new(GameResult::Running),
            result_after_update: Cell::new(None),
            update_reports_change: Cell::new(false),
            updates: Cell::new(0),
            unclaimed_events: RefCell::new(Vec::new()),
        }
    }
}

impl GameState for FakeState {
    fn update(&mut self, _now_ms: TimeMs) -> bool {
        self.updates.set(self.updates.get() + 1);
        if let Some(result) = self.result_after_update.take() {
            self.result.set(result);
        }
        self.update_reports_change.get()
    }

    fn handle_event(&mut self, event: &InputEvent) -> bool {
        self.unclaimed_events.borrow_mut().push(*event);
        false
    }

    fn draw(&mut self, _target: &mut RenderTarget) {}

    fn result(&self) -> GameResult {
        self.result.get()
    }

    fn map(&self) -> Rc<dyn WorldMap> {
        self.map.clone()
    }

    fn unit_manager(&self) -> Rc<RefCell<dyn UnitManager>> {
        self.units.clone()
    }

    fn human_player(&self) -> Rc<dyn PlayerView> {
        self.player.clone()
    }
}

/// A throwaway unit summary for panel-driving tests.
pub fn summary(id: u64) -> UnitSummary {
    UnitSummary {
        entity: EntityId(id),
        name: format!("Unit {id}"),
        icon: GraphicId(1),
        hp: 30,
        max_hp: 40,
        actions: vec![UnitAction::Stop],
    }
}

pub struct Harness {
    pub engine: Engine<HeadlessWindow>,
    pub clock: Rc<ManualClock>,
    pub state: Rc<RefCell<FakeState>>,
}

/// Builds an engine over a fake state and a headless window.
pub fn harness() -> Harness {
    let config = EngineConfig::default();
    let clock = Rc::new(ManualClock::new());
    let state = Rc::new(RefCell::new(FakeState::new()));
    let shared: SharedGameState = state.clone();

    let window = HeadlessWindow::open(Size::new(config.window.width, config.window.height));
    let engine = Engine::setup(window, Rc::new(NullAssets), clock.clone(), config, shared)
        .expect("engine setup");

    Harness {
        engine,
        clock,
        state,
    }
}

/// True if any (possibly nested) command draws the given text.
pub fn frame_contains_text(commands: &[DrawCommand], needle: &str) -> bool {
    commands.iter().any(|command| match command {
        DrawCommand::Text(text) => text.content.contains(needle),
        DrawCommand::Composite { commands, .. } => frame_contains_text(commands, needle),
        _ => false,
    })
}
