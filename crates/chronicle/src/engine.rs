//! The frame-loop orchestrator.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use chronicle_core::{
    Clock, InputEvent, Key, MouseButton, ScreenPos, ScreenRect, Size, TimeMs,
};
use chronicle_render::{
    Alignment, AssetStore, Camera, Color, Image, RenderError, RenderTarget, Text, UiCiv,
    UiResolution, WindowBackend,
};
use chronicle_sim::{GameResult, SharedGameState, StateManager};
use chronicle_ui::{
    ActionPanel, Dialog, DialogChoice, IconButton, IconButtonType, InputHandler, MapView,
    MessageLog, Minimap, MouseCursor, NumberLabel, UnitInfoPanel, Widget,
};

use crate::config::EngineConfig;
use crate::error::EngineResult;

/// Graphic id of the first resource-label icon (wood); the rest follow.
const LABEL_GRAPHIC_BASE: u32 = 50_730;

/// What a single loop iteration did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Something changed; the scene was redrawn and presented.
    Redrawn,
    /// Nothing changed; the caller should yield the CPU.
    Idle,
}

/// The engine: frame loop, input dispatch, camera scrolling, selection
/// tracking, and redraw coalescing over a swappable game state.
pub struct Engine<W: WindowBackend> {
    window: W,
    target: RenderTarget,
    camera: Rc<RefCell<Camera>>,
    clock: Rc<dyn Clock>,
    assets: Rc<dyn AssetStore>,
    config: EngineConfig,

    state_manager: StateManager,
    bound_state: Option<SharedGameState>,

    map_view: MapView,
    minimap: Minimap,
    action_panel: ActionPanel,
    unit_info_panel: UnitInfoPanel,
    mouse_cursor: MouseCursor,
    buttons: Vec<IconButton>,
    wood_label: NumberLabel,
    food_label: NumberLabel,
    gold_label: NumberLabel,
    stone_label: NumberLabel,
    population_label: NumberLabel,
    message_log: MessageLog,
    ui_overlay: Option<Rc<Image>>,
    fps_text: Option<Text>,
    result_overlay: Option<Text>,

    dialog: Option<Dialog>,

    selecting: bool,
    selection_start: ScreenPos,
    selection_curr: ScreenPos,
    selection_rect: ScreenRect,
    mouse_position: ScreenPos,

    camera_delta_x: f32,
    camera_delta_y: f32,

    last_update_ms: TimeMs,
    fps_samples: u64,
    total_fps: f64,
}

impl<W: WindowBackend> Engine<W> {
    /// Wires the engine together: render target, camera, start screen, UI
    /// overlay (with progressive fallback), widgets, labels, and the
    /// initial game state.
    ///
    /// # Errors
    ///
    /// Fails if the window is not open or a render target cannot be
    /// created - the only unrecoverable problems. Missing assets degrade
    /// with a warning.
    pub fn setup(
        window: W,
        assets: Rc<dyn AssetStore>,
        clock: Rc<dyn Clock>,
        config: EngineConfig,
        initial_state: SharedGameState,
    ) -> EngineResult<Self> {
        if !window.is_open() {
            return Err(RenderError::WindowClosed.into());
        }

        let mut window = window;
        let mut target = RenderTarget::new(window.size())?;

        show_start_screen(&mut window, &mut target, assets.as_ref());

        let ui_overlay = load_ui_overlay(assets.as_ref());
        let mut size = window.size();
        if let Some(overlay) = &ui_overlay {
            size = overlay.size;
            if !size.is_valid() {
                tracing::warn!("ui overlay has no valid size");
                size = Size::new(640.0, 480.0);
            }
            window.resize(size);
            target.set_size(size);
        }

        // HUD band under the world viewport; clamped so tiny windows still
        // get a usable layout.
        let band_top = config.ui.world_viewport_height.min(size.height - 64.0);
        let band_height = size.height - band_top;
        let panel_height = (band_height - 16.0).max(32.0);
        let minimap_side = panel_height.min(size.width / 4.0).max(32.0);

        let camera = Rc::new(RefCell::new(Camera::new(Size::new(size.width, band_top))));

        let map_view = MapView::new(camera.clone(), assets.clone());
        let minimap = Minimap::new(
            ScreenRect::new(
                size.width - minimap_side - 8.0,
                band_top + 8.0,
                minimap_side,
                minimap_side,
            ),
            camera.clone(),
        )?;
        let action_panel = ActionPanel::new(
            ScreenRect::new(5.0, band_top + 8.0, 310.0, panel_height),
            assets.as_ref(),
        );
        let unit_info_panel = UnitInfoPanel::new(
            ScreenRect::new(325.0, band_top + 8.0, 340.0, panel_height),
            assets.clone(),
        );
        let mouse_cursor = MouseCursor::new(assets.as_ref());

        let make_label = |index: u32| {
            let icon = assets.image(chronicle_render::GraphicId(LABEL_GRAPHIC_BASE + index));
            let mut label = NumberLabel::new(icon);
            label.set_position(ScreenPos::new(75.0 + index as f32 * 77.0, 5.0));
            label
        };
        let wood_label = make_label(0);
        let food_label = make_label(1);
        let gold_label = make_label(2);
        let stone_label = make_label(3);
        let population_label = make_label(4);

        let buttons = load_top_buttons(size, assets.as_ref());

        let message_log = MessageLog::new(
            config.ui.message_lines,
            config.ui.message_timeout_ms,
            ScreenPos::new(5.0, 30.0),
        );

        let mut state_manager = StateManager::new();
        state_manager.set_active(initial_state);

        let last_update_ms = clock.now_ms();
        Ok(Self {
            window,
            target,
            camera,
            clock,
            assets,
            config,
            state_manager,
            bound_state: None,
            map_view,
            minimap,
            action_panel,
            unit_info_panel,
            mouse_cursor,
            buttons,
            wood_label,
            food_label,
            gold_label,
            stone_label,
            population_label,
            message_log,
            ui_overlay,
            fps_text: None,
            result_overlay: None,
            dialog: None,
            selecting: false,
            selection_start: ScreenPos::ZERO,
            selection_curr: ScreenPos::ZERO,
            selection_rect: ScreenRect::ZERO,
            mouse_position: ScreenPos::ZERO,
            camera_delta_x: 0.0,
            camera_delta_y: 0.0,
            last_update_ms,
            fps_samples: 0,
            total_fps: 0.0,
        })
    }

    /// Runs the frame loop until the window closes, then reports the
    /// average observed frame rate.
    pub fn run(&mut self) {
        tracing::debug!("starting engine loop");

        while self.window.is_open() {
            if self.run_frame() == FrameOutcome::Idle {
                // Voluntary CPU yield on quiet frames; not a frame-rate
                // guarantee.
                std::thread::sleep(Duration::from_millis(self.config.ui.idle_frame_ms));
            }
        }

        if self.fps_samples > 0 {
            tracing::debug!("avg fps: {:.1}", self.total_fps / self.fps_samples as f64);
        }
    }

    /// Executes one loop iteration: input, tick, widget updates, and - if
    /// anything changed - a full layered redraw.
    pub fn run_frame(&mut self) -> FrameOutcome {
        let Some(state) = self.state_manager.active_state() else {
            return FrameOutcome::Idle;
        };

        // Mandatory sync point: a swapped state means every state-derived
        // widget binding is stale until rebound.
        let stale = self
            .bound_state
            .as_ref()
            .map_or(true, |bound| !Rc::ptr_eq(bound, &state));
        if stale {
            self.rebind(state.clone());
        }

        let render_start = self.clock.now_ms();
        let mut updated = false;

        while let Some(event) = self.window.poll_event() {
            if event == InputEvent::Quit {
                self.window.close();
            }
            if let Some(position) = event.position() {
                self.mouse_position = position;
            }

            if !self.handle_event(&event, &state) {
                state.borrow_mut().handle_event(&event);
            }

            updated = true;
        }

        if self.dialog.is_none() && state.borrow().result() == GameResult::Running {
            updated = state.borrow_mut().update(self.clock.now_ms()) || updated;

            let result = state.borrow().result();
            if result != GameResult::Running {
                self.result_overlay = Some(self.make_result_overlay(result));
            }
        }

        updated = self.mouse_cursor.set_position(self.mouse_position) || updated;
        updated = self.update_ui(&state) || updated;

        if self.selecting {
            let rect = ScreenRect::from_corners(self.selection_start, self.selection_curr);
            if rect != self.selection_rect {
                self.selection_rect = rect;
                updated = true;
            }
        }

        if !updated {
            return FrameOutcome::Idle;
        }

        self.render_frame(&state);

        let render_time = self.clock.now_ms() - render_start;
        if render_time > 0 {
            self.fps_samples += 1;
            self.total_fps += 1000.0 / render_time as f64;
            self.fps_text = Some(self.make_fps_text(render_time));
        }

        self.window.present(self.target.front_commands());
        FrameOutcome::Redrawn
    }

    /// Appends a line to the on-screen message log.
    ///
    /// The message becomes visible with the next redraw and expires after
    /// the configured timeout.
    pub fn add_message(&mut self, message: impl Into<String>) {
        self.message_log.push(message);
    }

    /// Opens the in-game menu as a modal dialog.
    ///
    /// While the dialog is up it owns all input and the simulation is
    /// paused. A missing background image degrades to a plain panel.
    pub fn show_menu(&mut self) {
        let background = self
            .assets
            .ui_file("dlg_men.sin")
            .and_then(|info| self.assets.image(info.background_id));
        if background.is_none() {
            tracing::warn!("failed to load menu background");
        }

        tracing::debug!("showing menu");
        self.dialog = Some(Dialog::new(self.window.size(), background));
    }

    /// Swaps in a new active game state. Widgets are rebound at the top of
    /// the next frame.
    pub fn set_active_state(&mut self, state: SharedGameState) {
        self.state_manager.set_active(state);
    }

    /// Returns the window backend (for backends that expose inspection).
    #[must_use]
    pub fn window(&self) -> &W {
        &self.window
    }

    /// Returns the window backend mutably (for backends that take scripted
    /// input).
    pub fn window_mut(&mut self) -> &mut W {
        &mut self.window
    }

    /// Returns the render target.
    #[must_use]
    pub fn render_target(&self) -> &RenderTarget {
        &self.target
    }

    /// Returns the shared camera.
    #[must_use]
    pub fn camera(&self) -> Rc<RefCell<Camera>> {
        self.camera.clone()
    }

    /// True while a modal dialog owns the input.
    #[must_use]
    pub fn dialog_open(&self) -> bool {
        self.dialog.is_some()
    }

    /// True while a selection drag is in progress.
    #[must_use]
    pub fn is_selecting(&self) -> bool {
        self.selecting
    }

    /// The current selection-drag rectangle (zero when not selecting).
    #[must_use]
    pub fn selection_rect(&self) -> ScreenRect {
        self.selection_rect
    }

    // ------------------------------------------------------------------
    // Rebinding
    // ------------------------------------------------------------------

    fn rebind(&mut self, state: SharedGameState) {
        {
            let state_ref = state.borrow();
            let map = state_ref.map();
            let unit_manager = state_ref.unit_manager();
            let player = state_ref.human_player();
            let visibility = player.visibility();

            self.minimap.bind(map.clone(), visibility.clone());
            self.map_view.bind(map, visibility);
            self.action_panel.bind(unit_manager.clone(), player);
            self.unit_info_panel.bind(unit_manager);
        }

        // A fresh state starts with a clean slate: no stale overlay, drag,
        // or scroll velocity may leak across the swap.
        self.result_overlay = None;
        self.selecting = false;
        self.selection_rect = ScreenRect::ZERO;
        self.camera_delta_x = 0.0;
        self.camera_delta_y = 0.0;
        self.bound_state = Some(state);
    }

    // ------------------------------------------------------------------
    // Input dispatch
    // ------------------------------------------------------------------

    /// Routes one event through the fixed-priority chain. Returns true if
    /// a handler claimed it.
    fn handle_event(&mut self, event: &InputEvent, state: &SharedGameState) -> bool {
        // A modal dialog takes everything before any other handler.
        if self.dialog.is_some() {
            let choice = self
                .dialog
                .as_mut()
                .and_then(|dialog| dialog.handle_event(event));
            match choice {
                Some(DialogChoice::Cancel) => self.dialog = None,
                Some(DialogChoice::Quit) => self.window.close(),
                None => {}
            }
            return true;
        }

        let chain: [&mut dyn InputHandler; 3] = [
            &mut self.action_panel,
            &mut self.minimap,
            &mut self.unit_info_panel,
        ];
        for handler in chain {
            if handler.handle_input(event).is_claimed() {
                return true;
            }
        }

        if let InputEvent::KeyPress { key } = event {
            return self.handle_key_event(*key, state);
        }

        match *event {
            InputEvent::MouseMove { position } => self.handle_mouse_move(position, state),
            InputEvent::MousePress { button, position } => {
                self.handle_mouse_press(button, position, state)
            }
            InputEvent::MouseRelease { button, position } => {
                self.handle_mouse_release(button, position, state)
            }
            // Unhandled events are dropped silently.
            _ => false,
        }
    }

    fn handle_key_event(&mut self, key: Key, state: &SharedGameState) -> bool {
        let step = self.config.camera.key_step_px;
        let mut screen = self.camera.borrow().target_position().to_screen();

        match key {
            Key::Left => screen.x -= step,
            Key::Right => screen.x += step,
            // Screen y is inverted relative to map y.
            Key::Down => screen.y -= step,
            Key::Up => screen.y += step,
            _ => return false,
        }

        let bounds = state.borrow().map().pixel_size();
        self.camera
            .borrow_mut()
            .set_target_position(screen.to_map(), bounds);
        true
    }

    fn handle_mouse_move(&mut self, position: ScreenPos, state: &SharedGameState) -> bool {
        let mut handled = false;
        let window_size = self.window.size();
        let margin = self.config.camera.edge_margin_px;

        if position.x < margin {
            self.camera_delta_x = -1.0;
            handled = true;
        } else if position.x > window_size.width - margin {
            self.camera_delta_x = 1.0;
            handled = true;
        } else {
            self.camera_delta_x = 0.0;
        }

        if position.y < margin {
            self.camera_delta_y = 1.0;
            handled = true;
        } else if position.y > window_size.height - margin {
            self.camera_delta_y = -1.0;
            handled = true;
        } else {
            self.camera_delta_y = 0.0;
        }

        if position.y < self.config.ui.world_viewport_height {
            if self.selecting {
                self.selection_curr = position;
                handled = true;
            } else {
                let map_pos = self.camera.borrow().absolute_map_pos(position);
                let unit_manager = state.borrow().unit_manager();
                unit_manager.borrow_mut().on_mouse_move(map_pos);
            }
        }

        handled
    }

    fn handle_mouse_press(
        &mut self,
        button: MouseButton,
        position: ScreenPos,
        state: &SharedGameState,
    ) -> bool {
        let mut armed = false;
        for icon_button in &mut self.buttons {
            armed = icon_button.on_mouse_pressed(position) || armed;
        }
        if armed {
            return true;
        }

        if position.y < self.config.ui.world_viewport_height && button == MouseButton::Left {
            // The unit layer gets first refusal (it may start an order).
            let unit_manager = state.borrow().unit_manager();
            let claimed = unit_manager
                .borrow_mut()
                .on_left_click(position, &self.camera.borrow());
            if claimed {
                return true;
            }

            self.selection_start = position;
            self.selection_curr = position + ScreenPos::new(1.0, 1.0);
            self.selecting = true;
        }

        true
    }

    fn handle_mouse_release(
        &mut self,
        button: MouseButton,
        position: ScreenPos,
        state: &SharedGameState,
    ) -> bool {
        if position.y < self.config.ui.world_viewport_height && button == MouseButton::Left {
            let unit_manager = state.borrow().unit_manager();
            let claimed = unit_manager.borrow_mut().on_mouse_release();
            if claimed {
                return true;
            }
        }

        let mut clicked = None;
        for icon_button in &mut self.buttons {
            if icon_button.on_mouse_released(position) {
                clicked = Some(icon_button.button_type());
            }
        }
        if clicked == Some(IconButtonType::GameMenu) {
            self.show_menu();
        }
        if clicked.is_some() {
            return true;
        }

        if self.selecting && button == MouseButton::Left {
            let unit_manager = state.borrow().unit_manager();
            unit_manager
                .borrow_mut()
                .select_units(self.selection_rect, &self.camera.borrow());
            self.selection_rect = ScreenRect::ZERO;
            self.selecting = false;
            return true;
        }

        if button == MouseButton::Right {
            let unit_manager = state.borrow().unit_manager();
            unit_manager
                .borrow_mut()
                .on_right_click(position, &self.camera.borrow());
        }

        false
    }

    // ------------------------------------------------------------------
    // Per-frame updates
    // ------------------------------------------------------------------

    fn update_ui(&mut self, state: &SharedGameState) -> bool {
        let now = self.clock.now_ms();
        let delta = now - self.last_update_ms;
        let mut updated = false;

        {
            let state_ref = state.borrow();
            let player = state_ref.human_player();
            use chronicle_core::ResourceKind::*;

            updated = self
                .wood_label
                .set_value(player.resources_available(Wood) as i32)
                || updated;
            updated = self
                .food_label
                .set_value(player.resources_available(Food) as i32)
                || updated;
            updated = self
                .gold_label
                .set_value(player.resources_available(Gold) as i32)
                || updated;
            updated = self
                .stone_label
                .set_value(player.resources_available(Stone) as i32)
                || updated;
            updated = self
                .population_label
                .set_value(player.resources_used(PopulationHeadroom) as i32)
                || updated;
            updated = self
                .population_label
                .set_max_value(player.resources_available(PopulationHeadroom) as i32)
                || updated;

            let unit_manager = state_ref.unit_manager();
            let unit_manager = unit_manager.borrow();
            updated = self.mouse_cursor.update(&*unit_manager) || updated;
        }

        updated = self.map_view.update(delta) || updated;
        updated = self.update_camera(delta, state) || updated;
        updated = self.minimap.update(delta) || updated;
        updated = self.action_panel.update(delta) || updated;
        updated = self.unit_info_panel.update(delta) || updated;
        updated = self.message_log.update(delta) || updated;

        self.last_update_ms = now;
        updated
    }

    fn update_camera(&mut self, delta_ms: TimeMs, state: &SharedGameState) -> bool {
        if self.camera_delta_x == 0.0 && self.camera_delta_y == 0.0 {
            return false;
        }

        let speed = self.config.camera.edge_speed;
        let step_x = self.camera_delta_x * delta_ms as f32 * speed;
        let step_y = self.camera_delta_y * delta_ms as f32 * speed;

        let mut screen = self.camera.borrow().target_position().to_screen();
        screen.x += step_x;
        screen.y += step_y;

        let bounds = state.borrow().map().pixel_size();
        self.camera
            .borrow_mut()
            .set_target_position(screen.to_map(), bounds);

        // Keep an active drag anchored to world content while the camera
        // pans underneath it (screen y runs opposite to map y).
        if self.selecting {
            self.selection_start.x -= step_x;
            self.selection_start.y += step_y;
            self.selection_rect =
                ScreenRect::from_corners(self.selection_start, self.selection_curr);
        }

        true
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    fn render_frame(&mut self, state: &SharedGameState) {
        self.target.clear(Color::GRASS);

        self.map_view.draw(&mut self.target);

        if let Some((first_col, first_row, last_col, last_row)) = self.map_view.visible_tile_window()
        {
            let state_ref = state.borrow();
            let visible = state_ref
                .map()
                .entities_between(first_col, first_row, last_col, last_row);
            let unit_manager = state_ref.unit_manager();
            let unit_manager = unit_manager.borrow();
            unit_manager.render(&mut self.target, &visible);
        }

        state.borrow_mut().draw(&mut self.target);

        if let Some(dialog) = &mut self.dialog {
            dialog.draw(&mut self.target);
        }

        if state.borrow().result() != GameResult::Running {
            if let Some(overlay) = &self.result_overlay {
                self.target.draw_text(overlay.clone());
            }
        }

        self.draw_ui();

        self.target.present();
    }

    fn draw_ui(&mut self) {
        if self.selecting {
            self.target
                .draw_rect(self.selection_rect, Color::TRANSPARENT, Color::WHITE, 1.0);
        }

        if let Some(overlay) = &self.ui_overlay {
            self.target.draw_image(overlay, ScreenPos::ZERO);
        }

        for button in &mut self.buttons {
            button.draw(&mut self.target);
        }

        self.minimap.draw(&mut self.target);
        self.action_panel.draw(&mut self.target);
        self.unit_info_panel.draw(&mut self.target);

        self.wood_label.draw(&mut self.target);
        self.food_label.draw(&mut self.target);
        self.gold_label.draw(&mut self.target);
        self.stone_label.draw(&mut self.target);
        self.population_label.draw(&mut self.target);

        if let Some(fps) = &self.fps_text {
            self.target.draw_text(fps.clone());
        }

        self.message_log.draw(&mut self.target);

        // Cursor renders last, above every layer.
        self.mouse_cursor.draw(&mut self.target);
    }

    fn make_result_overlay(&self, result: GameResult) -> Text {
        let content = match result {
            GameResult::Won => "You won.",
            _ => "You were defeated.",
        };

        let window_size = self.window.size();
        let mut text = Text::new(content, ScreenPos::ZERO, 25.0)
            .with_color(Color::WHITE)
            .with_outline(Color::BLACK, 3.0)
            .with_alignment(Alignment::Center);
        let bounds = text.bounds();
        text.position = ScreenPos::new(
            window_size.width / 2.0,
            (window_size.height - bounds.height) / 2.0,
        );
        text
    }

    fn make_fps_text(&self, render_time_ms: TimeMs) -> Text {
        let window_size = self.window.size();
        Text::new(
            format!("fps: {}", 1000 / render_time_ms),
            ScreenPos::new(window_size.width - 75.0, window_size.height - 20.0),
            15.0,
        )
        .with_color(Color::WHITE)
    }
}

// ----------------------------------------------------------------------
// Setup helpers
// ----------------------------------------------------------------------

/// Draws the start-screen background once, before any state exists.
/// Missing art skips the screen with a warning.
fn show_start_screen<W: WindowBackend>(
    window: &mut W,
    target: &mut RenderTarget,
    assets: &dyn AssetStore,
) {
    let Some(info) = assets.ui_file("scrstart.sin") else {
        tracing::warn!("failed to load ui file for start screen");
        return;
    };
    let Some(image) = assets.image(info.background_id) else {
        tracing::warn!("failed to load background for start screen");
        return;
    };

    target.clear(Color::BLACK);
    target.draw_image(&image, ScreenPos::ZERO);
    target.present();
    window.present(target.front_commands());
}

/// Loads the full-screen UI overlay, progressively relaxing resolution and
/// civilization until something decodes.
fn load_ui_overlay(assets: &dyn AssetStore) -> Option<Rc<Image>> {
    if let Some(overlay) = assets.ui_overlay(UiResolution::Res1280x1024, UiCiv::Viking) {
        tracing::debug!("loaded ui overlay with size {:?}", overlay.size);
        return Some(overlay);
    }

    for resolution in UiResolution::FALLBACK_ORDER {
        for civ in UiCiv::FALLBACK_ORDER {
            if let Some(overlay) = assets.ui_overlay(resolution, civ) {
                tracing::warn!("loaded fallback ui overlay {:?} for {:?}", resolution, civ);
                return Some(overlay);
            }
        }
    }

    tracing::warn!("failed to load ui overlay");
    None
}

/// Builds the top button row, right-aligned from the window edge.
fn load_top_buttons(window_size: Size, assets: &dyn AssetStore) -> Vec<IconButton> {
    let mut buttons = Vec::with_capacity(IconButtonType::ALL.len());
    let mut x = window_size.width - 5.0;

    for button_type in IconButtonType::ALL {
        let mut button = IconButton::new(button_type, assets);
        x -= button.rect().width;
        button.set_position(ScreenPos::new(x, 5.0));
        buttons.push(button);
    }

    buttons
}
