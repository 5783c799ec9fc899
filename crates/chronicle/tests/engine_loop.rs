//! End-to-end frame-loop behavior over a fake simulation.

mod common;

use chronicle::FrameOutcome;
use chronicle_core::{InputEvent, Key, MouseButton, ScreenPos, ScreenRect};
use chronicle_render::WindowBackend;
use chronicle_sim::GameResult;
use chronicle_sim::WorldMap;

use common::{frame_contains_text, harness, summary};

fn press(x: f32, y: f32) -> InputEvent {
    InputEvent::MousePress {
        button: MouseButton::Left,
        position: ScreenPos::new(x, y),
    }
}

fn release(x: f32, y: f32) -> InputEvent {
    InputEvent::MouseRelease {
        button: MouseButton::Left,
        position: ScreenPos::new(x, y),
    }
}

fn mouse_move(x: f32, y: f32) -> InputEvent {
    InputEvent::MouseMove {
        position: ScreenPos::new(x, y),
    }
}

#[test]
fn test_first_frame_redraws_then_idles() {
    let mut harness = harness();

    // Fresh bindings, labels, and map view all want one paint.
    assert_eq!(harness.engine.run_frame(), FrameOutcome::Redrawn);
    assert_eq!(harness.engine.window().frame_count(), 1);

    // Nothing changed since: no input, no sim change, no widget change.
    harness.clock.advance_ms(16);
    assert_eq!(harness.engine.run_frame(), FrameOutcome::Idle);
    assert_eq!(harness.engine.window().frame_count(), 1);
    assert_eq!(harness.engine.render_target().draw_call_count(), 0);
}

#[test]
fn test_any_input_forces_redraw() {
    let mut harness = harness();
    harness.engine.run_frame();

    harness.clock.advance_ms(16);
    harness.engine.window_mut().push_events([mouse_move(400.0, 300.0)]);
    assert_eq!(harness.engine.run_frame(), FrameOutcome::Redrawn);
    assert_eq!(harness.engine.window().frame_count(), 2);
}

#[test]
fn test_sim_change_forces_redraw() {
    let mut harness = harness();
    harness.engine.run_frame();

    harness.state.borrow().update_reports_change.set(true);
    harness.clock.advance_ms(16);
    assert_eq!(harness.engine.run_frame(), FrameOutcome::Redrawn);
}

#[test]
fn test_dialog_claims_every_event() {
    let mut harness = harness();
    harness.engine.run_frame();

    harness.engine.show_menu();
    assert!(harness.engine.dialog_open());

    // World clicks, hovers, and key scrolling: the dialog takes them all.
    let camera_before = harness.engine.camera().borrow().target_position();
    harness.engine.window_mut().push_events([
        press(400.0, 300.0),
        mouse_move(410.0, 310.0),
        InputEvent::KeyPress { key: Key::Up },
        release(410.0, 310.0),
    ]);
    harness.clock.advance_ms(16);
    harness.engine.run_frame();

    let state = harness.state.borrow();
    assert!(state.unclaimed_events.borrow().is_empty());
    let units = state.units.borrow();
    assert!(units.left_clicks.is_empty());
    assert!(units.hover_moves.is_empty());
    assert_eq!(units.releases, 0);
    drop(units);
    drop(state);

    assert_eq!(
        harness.engine.camera().borrow().target_position(),
        camera_before
    );
    assert!(!harness.engine.is_selecting());
    assert!(harness.engine.dialog_open());
}

#[test]
fn test_dialog_pauses_simulation() {
    let mut harness = harness();
    harness.engine.run_frame();
    let ticks_before = harness.state.borrow().updates.get();

    harness.engine.show_menu();
    harness.clock.advance_ms(16);
    harness.engine.run_frame();
    harness.clock.advance_ms(16);
    harness.engine.run_frame();

    assert_eq!(harness.state.borrow().updates.get(), ticks_before);
}

#[test]
fn test_escape_dismisses_dialog() {
    let mut harness = harness();
    harness.engine.run_frame();
    harness.engine.show_menu();

    harness
        .engine
        .window_mut()
        .push_events([InputEvent::KeyPress { key: Key::Escape }]);
    harness.engine.run_frame();

    assert!(!harness.engine.dialog_open());
    // The dismissal itself still counted as a claimed event.
    assert!(harness.state.borrow().unclaimed_events.borrow().is_empty());
}

#[test]
fn test_selection_drag_lifecycle() {
    let mut harness = harness();
    harness.engine.run_frame();

    // Press in the world viewport with nothing under the cursor.
    harness.engine.window_mut().push_events([press(100.0, 100.0)]);
    harness.engine.run_frame();
    assert!(harness.engine.is_selecting());
    // A fresh drag starts one pixel wide.
    assert_eq!(
        harness.engine.selection_rect(),
        ScreenRect::new(100.0, 100.0, 1.0, 1.0)
    );

    harness.engine.window_mut().push_events([mouse_move(150.0, 140.0)]);
    harness.engine.run_frame();
    assert_eq!(
        harness.engine.selection_rect(),
        ScreenRect::new(100.0, 100.0, 50.0, 40.0)
    );

    harness.engine.window_mut().push_events([release(150.0, 140.0)]);
    harness.engine.run_frame();

    assert!(!harness.engine.is_selecting());
    assert_eq!(harness.engine.selection_rect(), ScreenRect::ZERO);
    let state = harness.state.borrow();
    let units = state.units.borrow();
    assert_eq!(
        units.selected_rects,
        vec![ScreenRect::new(100.0, 100.0, 50.0, 40.0)]
    );
}

#[test]
fn test_unit_layer_first_refusal_blocks_drag() {
    let mut harness = harness();
    harness.engine.run_frame();

    harness.state.borrow().units.borrow_mut().claim_left_click = true;
    harness.engine.window_mut().push_events([press(100.0, 100.0)]);
    harness.engine.run_frame();

    assert!(!harness.engine.is_selecting());
    assert_eq!(
        harness.state.borrow().units.borrow().left_clicks,
        vec![ScreenPos::new(100.0, 100.0)]
    );
}

#[test]
fn test_right_release_forwards_context_command() {
    let mut harness = harness();
    harness.engine.run_frame();

    harness.engine.window_mut().push_events([InputEvent::MouseRelease {
        button: MouseButton::Right,
        position: ScreenPos::new(320.0, 240.0),
    }]);
    harness.engine.run_frame();

    assert_eq!(
        harness.state.borrow().units.borrow().right_clicks,
        vec![ScreenPos::new(320.0, 240.0)]
    );
}

#[test]
fn test_hover_forwarded_when_not_dragging() {
    let mut harness = harness();
    harness.engine.run_frame();

    harness.engine.window_mut().push_events([mouse_move(400.0, 300.0)]);
    harness.engine.run_frame();

    assert_eq!(harness.state.borrow().units.borrow().hover_moves.len(), 1);
}

#[test]
fn test_camera_clamped_for_any_key_scroll() {
    let mut harness = harness();
    harness.engine.run_frame();

    let pixel_size = harness.state.borrow().map.pixel_size();
    for _ in 0..300 {
        harness
            .engine
            .window_mut()
            .push_events([InputEvent::KeyPress { key: Key::Left }]);
        harness.clock.advance_ms(4);
        harness.engine.run_frame();
    }

    let target = harness.engine.camera().borrow().target_position();
    assert!(target.x >= 0.0 && target.x <= pixel_size.width);
    assert!(target.y >= 0.0 && target.y <= pixel_size.height);
}

#[test]
fn test_edge_scroll_moves_and_clamps_camera() {
    let mut harness = harness();
    harness.engine.run_frame();

    // Park the cursor on the left edge and let many frames pass.
    harness.engine.window_mut().push_events([mouse_move(2.0, 300.0)]);
    harness.engine.run_frame();
    for _ in 0..200 {
        harness.clock.advance_ms(16);
        harness.engine.run_frame();
    }

    let pixel_size = harness.state.borrow().map.pixel_size();
    let target = harness.engine.camera().borrow().target_position();
    assert!(target.x >= 0.0 && target.x <= pixel_size.width);
    assert!(target.y >= 0.0 && target.y <= pixel_size.height);
}

#[test]
fn test_selection_anchored_while_camera_pans() {
    let mut harness = harness();
    harness.engine.run_frame();

    harness.engine.window_mut().push_events([press(100.0, 100.0)]);
    harness.engine.run_frame();

    // Drag onto the left scroll edge: the drag point follows the cursor
    // and the camera starts panning underneath.
    harness.engine.window_mut().push_events([mouse_move(5.0, 300.0)]);
    harness.engine.run_frame();

    harness.clock.advance_ms(16);
    harness.engine.run_frame();

    // One 16 ms tick at speed 1 px/ms shifts the anchor 16 px right
    // (camera moved 16 px left in screen space).
    assert_eq!(
        harness.engine.selection_rect(),
        ScreenRect::from_corners(ScreenPos::new(116.0, 100.0), ScreenPos::new(5.0, 300.0))
    );
}

#[test]
fn test_win_overlay_and_tick_stop() {
    let mut harness = harness();
    harness.engine.run_frame();

    harness.state.borrow().update_reports_change.set(true);
    harness
        .state
        .borrow()
        .result_after_update
        .set(Some(GameResult::Won));
    harness.clock.advance_ms(16);
    harness.engine.run_frame();

    let frames = harness.engine.window().frames();
    assert!(frame_contains_text(frames.last().unwrap(), "You won."));

    // The result is terminal: no further simulation ticks.
    let ticks = harness.state.borrow().updates.get();
    harness.clock.advance_ms(16);
    harness.engine.run_frame();
    assert_eq!(harness.state.borrow().updates.get(), ticks);
    assert!(!harness.engine.dialog_open());
}

#[test]
fn test_state_swap_rebinds_widgets() {
    let mut harness = harness();
    harness.engine.run_frame();

    let queries_a = harness.state.borrow().map.queries.get();
    assert!(queries_a > 0);

    // Swap in a second state with different resources; the next frame must
    // rebind and render entirely from it.
    let second = std::rc::Rc::new(std::cell::RefCell::new(common::FakeState::new()));
    second.borrow().player.wood.set(999.0);
    harness.engine.set_active_state(second.clone());

    harness.clock.advance_ms(16);
    assert_eq!(harness.engine.run_frame(), FrameOutcome::Redrawn);

    assert!(second.borrow().map.queries.get() > 0);
    let queries_a_after = harness.state.borrow().map.queries.get();

    harness.clock.advance_ms(16);
    harness.engine.run_frame();
    assert_eq!(harness.state.borrow().map.queries.get(), queries_a_after);

    let frames = harness.engine.window().frames();
    assert!(frame_contains_text(frames.last().unwrap(), "999"));
}

#[test]
fn test_panel_click_reaches_action_panel_before_world() {
    let mut harness = harness();
    harness.state.borrow().units.borrow_mut().selection = vec![summary(1)];
    harness.engine.run_frame();

    // A press inside the HUD band belongs to the panels, never the world.
    harness.engine.window_mut().push_events([press(50.0, 850.0)]);
    harness.engine.run_frame();

    assert!(!harness.engine.is_selecting());
    assert!(harness.state.borrow().units.borrow().left_clicks.is_empty());
}

#[test]
fn test_minimap_click_recenters_not_selects() {
    let mut harness = harness();
    harness.engine.run_frame();

    let minimap_center = {
        let rect = ScreenRect::new(1064.0, 808.0, 208.0, 208.0);
        rect.center()
    };
    harness
        .engine
        .window_mut()
        .push_events([press(minimap_center.x, minimap_center.y)]);
    harness.engine.run_frame();

    assert!(!harness.engine.is_selecting());
    let target = harness.engine.camera().borrow().target_position();
    let pixel_size = harness.state.borrow().map.pixel_size();
    assert!((target.x - pixel_size.width / 2.0).abs() < 16.0);
    assert!((target.y - pixel_size.height / 2.0).abs() < 16.0);
}

#[test]
fn test_quit_event_closes_window_and_run_exits() {
    let mut harness = harness();
    harness.engine.window_mut().push_events([InputEvent::Quit]);

    harness.engine.run();

    assert!(!harness.engine.window().is_open());
}

#[test]
fn test_message_rendered_until_evicted() {
    let mut harness = harness();
    harness.engine.add_message("wololo");
    harness.engine.run_frame();

    let frames = harness.engine.window().frames();
    assert!(frame_contains_text(frames.last().unwrap(), "wololo"));
}

#[test]
fn test_setup_fails_on_closed_window() {
    use chronicle_core::{GameClock, Size};
    use chronicle_render::{HeadlessWindow, NullAssets};
    use chronicle_sim::SharedGameState;

    let mut window = HeadlessWindow::open(Size::new(640.0, 480.0));
    window.close();

    let state: SharedGameState =
        std::rc::Rc::new(std::cell::RefCell::new(common::FakeState::new()));
    let result = chronicle::Engine::setup(
        window,
        std::rc::Rc::new(NullAssets),
        std::rc::Rc::new(GameClock::new()),
        chronicle::EngineConfig::default(),
        state,
    );

    assert!(result.is_err());
}
