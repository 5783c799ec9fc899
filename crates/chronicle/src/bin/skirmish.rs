//! Headless demo: a tiny scripted skirmish.
//!
//! Builds a small seeded sample simulation, feeds the engine a scripted
//! input sequence (selection drag, key scroll, edge scroll, minimap click,
//! menu open/close, quit), and prints a frame summary. Everything runs
//! against the headless backend, so this works without a display.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use chronicle::{Engine, EngineConfig};
use chronicle_core::{
    GameClock, InputEvent, Key, MapPos, MouseButton, ResourceKind, ScreenPos, ScreenRect, Size,
    TimeMs,
};
use chronicle_render::{Camera, GraphicId, HeadlessWindow, NullAssets, RenderTarget};
use chronicle_sim::{
    CursorHint, EntityId, EntityRef, GameResult, GameState, PlayerId, PlayerView, SharedGameState,
    UnitAction, UnitManager, UnitSummary, VisibilityView, WorldMap, TILE_WIDTH,
};
use chronicle_ui::palette::player_color;

const MAP_TILES: u32 = 24;
const UNIT_COUNT: usize = 12;

struct OpenVisibility;

impl VisibilityView for OpenVisibility {
    fn is_explored(&self, _col: u32, _row: u32) -> bool {
        true
    }
    fn is_visible(&self, _col: u32, _row: u32) -> bool {
        true
    }
}

#[derive(Debug, Clone)]
struct DemoUnit {
    id: EntityId,
    position: MapPos,
    owner: PlayerId,
    hp: u32,
}

type SharedUnits = Rc<RefCell<Vec<DemoUnit>>>;

struct DemoMap {
    units: SharedUnits,
}

impl WorldMap for DemoMap {
    fn columns(&self) -> u32 {
        MAP_TILES
    }

    fn rows(&self) -> u32 {
        MAP_TILES
    }

    fn pixel_size(&self) -> Size {
        Size::new(MAP_TILES as f32 * TILE_WIDTH, MAP_TILES as f32 * TILE_WIDTH)
    }

    fn terrain_at(&self, col: u32, row: u32) -> u16 {
        // A few dirt patches and a river band through the grass.
        if row == MAP_TILES / 2 {
            3
        } else {
            ((col * 7 + row * 3) % 3) as u16
        }
    }

    fn entities_between(&self, col0: u32, row0: u32, col1: u32, row1: u32) -> Vec<EntityRef> {
        self.units
            .borrow()
            .iter()
            .filter(|unit| {
                let col = (unit.position.x / TILE_WIDTH) as u32;
                let row = (unit.position.y / TILE_WIDTH) as u32;
                col >= col0 && col <= col1 && row >= row0 && row <= row1
            })
            .map(|unit| EntityRef {
                id: unit.id,
                position: unit.position,
                owner: unit.owner,
            })
            .collect()
    }
}

struct DemoPlayer {
    wood: Cell<f32>,
    food: Cell<f32>,
    gold: Cell<f32>,
    stone: Cell<f32>,
    population: Cell<f32>,
}

impl DemoPlayer {
    fn new() -> Self {
        Self {
            wood: Cell::new(200.0),
            food: Cell::new(200.0),
            gold: Cell::new(100.0),
            stone: Cell::new(150.0),
            population: Cell::new(6.0),
        }
    }

    fn tick(&self, delta_ms: TimeMs) {
        // Villagers off-screen are busy.
        let gathered = delta_ms as f32 * 0.01;
        self.wood.set(self.wood.get() + gathered);
        self.food.set(self.food.get() + gathered * 0.8);
    }
}

impl PlayerView for DemoPlayer {
    fn resources_available(&self, kind: ResourceKind) -> f32 {
        match kind {
            ResourceKind::Wood => self.wood.get(),
            ResourceKind::Food => self.food.get(),
            ResourceKind::Gold => self.gold.get(),
            ResourceKind::Stone => self.stone.get(),
            ResourceKind::PopulationHeadroom => 25.0,
        }
    }

    fn resources_used(&self, kind: ResourceKind) -> f32 {
        match kind {
            ResourceKind::PopulationHeadroom => self.population.get(),
            _ => 0.0,
        }
    }

    fn visibility(&self) -> Rc<dyn VisibilityView> {
        Rc::new(OpenVisibility)
    }
}

struct DemoUnitLayer {
    units: SharedUnits,
    selected: Vec<EntityId>,
    hover: CursorHint,
}

impl DemoUnitLayer {
    fn summaries(&self) -> Vec<UnitSummary> {
        self.units
            .borrow()
            .iter()
            .filter(|unit| self.selected.contains(&unit.id))
            .map(|unit| UnitSummary {
                entity: unit.id,
                name: format!("Militia {}", unit.id.0),
                icon: GraphicId(60_000 + unit.id.0 as u32),
                hp: unit.hp,
                max_hp: 40,
                actions: vec![UnitAction::Attack, UnitAction::Stop, UnitAction::Patrol],
            })
            .collect()
    }
}

impl UnitManager for DemoUnitLayer {
    fn on_mouse_move(&mut self, map_pos: MapPos) {
        let hovering_enemy = self.units.borrow().iter().any(|unit| {
            unit.owner == PlayerId(2)
                && (unit.position.x - map_pos.x).abs() < TILE_WIDTH / 2.0
                && (unit.position.y - map_pos.y).abs() < TILE_WIDTH / 2.0
        });
        self.hover = if hovering_enemy {
            CursorHint::Attack
        } else {
            CursorHint::Normal
        };
    }

    fn on_left_click(&mut self, _pos: ScreenPos, _camera: &Camera) -> bool {
        // No pending order flow in the demo; let the engine start a drag.
        false
    }

    fn on_mouse_release(&mut self) -> bool {
        false
    }

    fn on_right_click(&mut self, pos: ScreenPos, camera: &Camera) {
        let destination = camera.absolute_map_pos(pos);
        tracing::info!(
            "ordered {} unit(s) to ({:.0}, {:.0})",
            self.selected.len(),
            destination.x,
            destination.y
        );
    }

    fn select_units(&mut self, rect: ScreenRect, camera: &Camera) {
        self.selected = self
            .units
            .borrow()
            .iter()
            .filter(|unit| {
                unit.owner == PlayerId(1) && rect.contains(camera.absolute_screen_pos(unit.position))
            })
            .map(|unit| unit.id)
            .collect();
        tracing::info!("selected {} unit(s)", self.selected.len());
    }

    fn select_entity(&mut self, id: EntityId) {
        self.selected = vec![id];
    }

    fn selection(&self) -> Vec<UnitSummary> {
        self.summaries()
    }

    fn trigger_action(&mut self, action: UnitAction) {
        tracing::info!("action {:?} for {} unit(s)", action, self.selected.len());
    }

    fn cursor_hint(&self) -> CursorHint {
        self.hover
    }

    fn render(&self, target: &mut RenderTarget, visible: &[EntityRef]) {
        for entity in visible {
            // Sprites are placeholders: a colored block per unit.
            let screen = entity.position.to_screen();
            target.draw_rect(
                ScreenRect::new(screen.x - 4.0, screen.y - 10.0, 8.0, 10.0),
                player_color(entity.owner),
                chronicle_render::Color::BLACK,
                1.0,
            );
        }
    }
}

struct DemoState {
    map: Rc<DemoMap>,
    unit_layer: Rc<RefCell<DemoUnitLayer>>,
    player: Rc<DemoPlayer>,
    units: SharedUnits,
    rng: StdRng,
    last_tick_ms: TimeMs,
}

impl DemoState {
    fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let extent = MAP_TILES as f32 * TILE_WIDTH;

        let units: Vec<DemoUnit> = (0..UNIT_COUNT)
            .map(|index| DemoUnit {
                id: EntityId(index as u64 + 1),
                position: MapPos::new(
                    rng.gen_range(0.2..0.8) * extent,
                    rng.gen_range(0.2..0.8) * extent,
                    0.0,
                ),
                owner: if index < UNIT_COUNT / 2 {
                    PlayerId(1)
                } else {
                    PlayerId(2)
                },
                hp: 40,
            })
            .collect();
        let units: SharedUnits = Rc::new(RefCell::new(units));

        Self {
            map: Rc::new(DemoMap {
                units: units.clone(),
            }),
            unit_layer: Rc::new(RefCell::new(DemoUnitLayer {
                units: units.clone(),
                selected: Vec::new(),
                hover: CursorHint::Normal,
            })),
            player: Rc::new(DemoPlayer::new()),
            units,
            rng,
            last_tick_ms: 0,
        }
    }
}

impl GameState for DemoState {
    fn update(&mut self, now_ms: TimeMs) -> bool {
        let delta = now_ms.saturating_sub(self.last_tick_ms);
        self.last_tick_ms = now_ms;
        if delta == 0 {
            return false;
        }

        self.player.tick(delta);

        let extent = MAP_TILES as f32 * TILE_WIDTH;
        let mut moved = false;
        for unit in self.units.borrow_mut().iter_mut() {
            let step = delta as f32 * 0.02;
            let jitter_x: f32 = self.rng.gen_range(-1.0..1.0);
            let jitter_y: f32 = self.rng.gen_range(-1.0..1.0);
            unit.position.x = (unit.position.x + jitter_x * step).clamp(0.0, extent);
            unit.position.y = (unit.position.y + jitter_y * step).clamp(0.0, extent);
            moved = true;
        }

        moved
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
        self.unit_layer.clone()
    }

    fn human_player(&self) -> Rc<dyn PlayerView> {
        self.player.clone()
    }
}

/// One input batch per frame.
fn scripted_input(window_size: Size) -> Vec<Vec<InputEvent>> {
    let left = MouseButton::Left;
    let center = ScreenPos::new(window_size.width / 2.0, 350.0);
    let menu_button = ScreenPos::new(window_size.width - 25.0, 25.0);
    let minimap = ScreenPos::new(window_size.width - 80.0, 900.0);

    vec![
        // Warm-up frame; the first redraw happens from the initial binds.
        vec![],
        // Jump the camera to the middle of the map from the minimap.
        vec![InputEvent::MousePress {
            button: left,
            position: minimap,
        }],
        vec![InputEvent::MouseMove { position: center }],
        // Drag a selection rectangle over the middle of the map.
        vec![InputEvent::MousePress {
            button: left,
            position: center,
        }],
        vec![InputEvent::MouseMove {
            position: ScreenPos::new(center.x + 300.0, center.y + 200.0),
        }],
        vec![InputEvent::MouseRelease {
            button: left,
            position: ScreenPos::new(center.x + 300.0, center.y + 200.0),
        }],
        // Context order for whatever was selected.
        vec![InputEvent::MouseRelease {
            button: MouseButton::Right,
            position: ScreenPos::new(center.x - 100.0, center.y - 60.0),
        }],
        // Nudge the camera with the keyboard, then by the screen edge.
        vec![InputEvent::KeyPress { key: Key::Right }],
        vec![InputEvent::KeyPress { key: Key::Up }],
        vec![InputEvent::MouseMove {
            position: ScreenPos::new(5.0, 300.0),
        }],
        vec![],
        vec![InputEvent::MouseMove { position: center }],
        // Open the menu, look at it, close it.
        vec![InputEvent::MousePress {
            button: left,
            position: menu_button,
        }],
        vec![InputEvent::MouseRelease {
            button: left,
            position: menu_button,
        }],
        vec![InputEvent::KeyPress { key: Key::Escape }],
        vec![InputEvent::Quit],
    ]
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = EngineConfig::default();
    let window_size = Size::new(config.window.width, config.window.height);
    let window = HeadlessWindow::with_script(window_size, scripted_input(window_size));

    let state: SharedGameState = Rc::new(RefCell::new(DemoState::new(0xC0FFEE)));
    let mut engine = match Engine::setup(
        window,
        Rc::new(NullAssets),
        Rc::new(GameClock::new()),
        config,
        state,
    ) {
        Ok(engine) => engine,
        Err(error) => {
            tracing::error!("engine setup failed: {error}");
            std::process::exit(1);
        }
    };

    engine.add_message("Welcome to the skirmish demo.");
    engine.run();

    println!("frames presented: {}", engine.window().frame_count());
    println!(
        "draw commands in last frame: {}",
        engine
            .window()
            .frames()
            .last()
            .map_or(0, std::vec::Vec::len)
    );
}
