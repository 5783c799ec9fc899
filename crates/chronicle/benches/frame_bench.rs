//! Frame-loop benchmarks: idle coalesced frames vs. input-driven redraws.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use criterion::{criterion_group, criterion_main, Criterion};

use chronicle::{Engine, EngineConfig};
use chronicle_core::{
    InputEvent, ManualClock, MapPos, MouseButton, ResourceKind, ScreenPos, ScreenRect, Size,
    TimeMs,
};
use chronicle_render::{Camera, HeadlessWindow, NullAssets, RenderTarget};
use chronicle_sim::{
    CursorHint, EntityId, EntityRef, GameResult, GameState, PlayerView, SharedGameState,
    UnitAction, UnitManager, UnitSummary, VisibilityView, WorldMap,
};

struct OpenVisibility;

impl VisibilityView for OpenVisibility {
    fn is_explored(&self, _col: u32, _row: u32) -> bool {
        true
    }
    fn is_visible(&self, _col: u32, _row: u32) -> bool {
        true
    }
}

struct BenchMap;

impl WorldMap for BenchMap {
    fn columns(&self) -> u32 {
        64
    }
    fn rows(&self) -> u32 {
        64
    }
    fn pixel_size(&self) -> Size {
        Size::new(64.0 * 64.0, 64.0 * 64.0)
    }
    fn terrain_at(&self, col: u32, row: u32) -> u16 {
        ((col + row) % 3) as u16
    }
    fn entities_between(&self, _c0: u32, _r0: u32, _c1: u32, _r1: u32) -> Vec<EntityRef> {
        Vec::new()
    }
}

struct BenchPlayer;

impl PlayerView for BenchPlayer {
    fn resources_available(&self, _kind: ResourceKind) -> f32 {
        100.0
    }
    fn resources_used(&self, _kind: ResourceKind) -> f32 {
        10.0
    }
    fn visibility(&self) -> Rc<dyn VisibilityView> {
        Rc::new(OpenVisibility)
    }
}

#[derive(Default)]
struct BenchUnits;

impl UnitManager for BenchUnits {
    fn on_mouse_move(&mut self, _map_pos: MapPos) {}
    fn on_left_click(&mut self, _pos: ScreenPos, _camera: &Camera) -> bool {
        false
    }
    fn on_mouse_release(&mut self) -> bool {
        false
    }
    fn on_right_click(&mut self, _pos: ScreenPos, _camera: &Camera) {}
    fn select_units(&mut self, _rect: ScreenRect, _camera: &Camera) {}
    fn select_entity(&mut self, _id: EntityId) {}
    fn selection(&self) -> Vec<UnitSummary> {
        Vec::new()
    }
    fn trigger_action(&mut self, _action: UnitAction) {}
    fn cursor_hint(&self) -> CursorHint {
        CursorHint::Normal
    }
    fn render(&self, _target: &mut RenderTarget, _visible: &[EntityRef]) {}
}

struct BenchState {
    map: Rc<BenchMap>,
    units: Rc<RefCell<BenchUnits>>,
    player: Rc<BenchPlayer>,
    changed: Cell<bool>,
}

impl GameState for BenchState {
    fn update(&mut self, _now_ms: TimeMs) -> bool {
        self.changed.get()
    }
    fn handle_event(&mut self, _event: &InputEvent) -> bool {
        false
    }
    fn draw(&mut self, _target: &mut RenderTarget) {}
    fn result(&self) -> GameResult {
        GameResult::Running
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

fn engine() -> (Engine<HeadlessWindow>, Rc<ManualClock>) {
    let config = EngineConfig::default();
    let clock = Rc::new(ManualClock::new());
    let window = HeadlessWindow::open(Size::new(config.window.width, config.window.height));
    let state: SharedGameState = Rc::new(RefCell::new(BenchState {
        map: Rc::new(BenchMap),
        units: Rc::new(RefCell::new(BenchUnits)),
        player: Rc::new(BenchPlayer),
        changed: Cell::new(false),
    }));

    let engine = Engine::setup(window, Rc::new(NullAssets), clock.clone(), config, state)
        .expect("engine setup");
    (engine, clock)
}

fn bench_idle_frame(c: &mut Criterion) {
    let (mut engine, clock) = engine();
    engine.run_frame();

    c.bench_function("idle_frame", |b| {
        b.iter(|| {
            clock.advance_ms(1);
            engine.run_frame()
        });
    });
}

fn bench_input_redraw(c: &mut Criterion) {
    let (mut engine, clock) = engine();
    engine.run_frame();
    let mut flip = false;

    c.bench_function("input_redraw_frame", |b| {
        b.iter(|| {
            flip = !flip;
            let x = if flip { 400.0 } else { 420.0 };
            engine.window_mut().push_events([InputEvent::MouseMove {
                position: ScreenPos::new(x, 300.0),
            }]);
            engine.window_mut().push_events([InputEvent::MouseRelease {
                button: MouseButton::Right,
                position: ScreenPos::new(x, 300.0),
            }]);
            clock.advance_ms(1);
            engine.run_frame()
        });
    });
}

criterion_group!(benches, bench_idle_frame, bench_input_redraw);
criterion_main!(benches);
