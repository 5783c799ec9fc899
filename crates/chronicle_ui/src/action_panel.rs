//! Action panel: command buttons for the current selection.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use chronicle_core::{InputEvent, MouseButton, ResourceKind, ScreenRect, Size, TimeMs};
use chronicle_render::{AssetStore, Color, GraphicId, Image, RenderTarget};
use chronicle_sim::{PlayerView, UnitAction, UnitManager};

use crate::widget::{InputHandler, InputOutcome, Widget};

/// Graphic id for an action button icon.
fn action_graphic(action: UnitAction) -> GraphicId {
    match action {
        UnitAction::Attack => GraphicId(50_801),
        UnitAction::Stop => GraphicId(50_802),
        UnitAction::Patrol => GraphicId(50_803),
        UnitAction::Garrison => GraphicId(50_804),
        UnitAction::Build => GraphicId(50_805),
    }
}

/// The command-button panel in the lower-left HUD.
///
/// Buttons are derived from the first selected unit's available actions;
/// clicking one triggers the command on the unit layer. The panel
/// value-diffs the derived button list to decide whether it changed.
pub struct ActionPanel {
    rect: ScreenRect,
    unit_manager: Option<Rc<RefCell<dyn UnitManager>>>,
    player: Option<Rc<dyn PlayerView>>,
    icons: HashMap<UnitAction, Option<Rc<Image>>>,
    buttons: Vec<(UnitAction, ScreenRect)>,
    displayed: Vec<UnitAction>,
    build_disabled: bool,
}

impl ActionPanel {
    const BUTTON_SIZE: Size = Size::new(48.0, 48.0);
    const BUTTON_GAP: f32 = 6.0;
    const COLUMNS: usize = 5;

    /// Creates the panel, loading action icons from the asset store.
    #[must_use]
    pub fn new(rect: ScreenRect, assets: &dyn AssetStore) -> Self {
        let mut icons = HashMap::new();
        for action in [
            UnitAction::Attack,
            UnitAction::Stop,
            UnitAction::Patrol,
            UnitAction::Garrison,
            UnitAction::Build,
        ] {
            let icon = assets.image(action_graphic(action));
            if icon.is_none() {
                tracing::warn!("missing action icon for {:?}", action);
            }
            icons.insert(action, icon);
        }

        Self {
            rect,
            unit_manager: None,
            player: None,
            icons,
            buttons: Vec::new(),
            displayed: Vec::new(),
            build_disabled: false,
        }
    }

    /// Returns the panel's bounds.
    #[must_use]
    pub fn rect(&self) -> ScreenRect {
        self.rect
    }

    /// Rebinds the panel to a new state's unit layer and human player.
    pub fn bind(&mut self, unit_manager: Rc<RefCell<dyn UnitManager>>, player: Rc<dyn PlayerView>) {
        self.unit_manager = Some(unit_manager);
        self.player = Some(player);
        self.buttons.clear();
        self.displayed.clear();
        self.build_disabled = false;
    }

    fn layout_buttons(&mut self, actions: &[UnitAction]) {
        self.buttons.clear();
        for (index, action) in actions.iter().enumerate() {
            let col = index % Self::COLUMNS;
            let row = index / Self::COLUMNS;
            let rect = ScreenRect::new(
                self.rect.x + 8.0 + col as f32 * (Self::BUTTON_SIZE.width + Self::BUTTON_GAP),
                self.rect.y + 8.0 + row as f32 * (Self::BUTTON_SIZE.height + Self::BUTTON_GAP),
                Self::BUTTON_SIZE.width,
                Self::BUTTON_SIZE.height,
            );
            self.buttons.push((*action, rect));
        }
    }
}

impl Widget for ActionPanel {
    fn update(&mut self, _delta_ms: TimeMs) -> bool {
        let Some(unit_manager) = &self.unit_manager else {
            return false;
        };

        let actions = unit_manager
            .borrow()
            .selection()
            .first()
            .map(|summary| summary.actions.clone())
            .unwrap_or_default();

        // Out of population headroom: building is pointless, grey it out.
        let build_disabled = self.player.as_ref().map_or(false, |player| {
            player.resources_used(ResourceKind::PopulationHeadroom)
                >= player.resources_available(ResourceKind::PopulationHeadroom)
        });

        if actions == self.displayed && build_disabled == self.build_disabled {
            return false;
        }

        self.layout_buttons(&actions);
        self.displayed = actions;
        self.build_disabled = build_disabled;
        true
    }

    fn draw(&mut self, target: &mut RenderTarget) {
        if self.buttons.is_empty() {
            return;
        }

        target.draw_rect(
            self.rect,
            Color::rgba(0.1, 0.08, 0.05, 0.9),
            Color::GOLD,
            1.0,
        );

        for (action, rect) in &self.buttons {
            let disabled = self.build_disabled && *action == UnitAction::Build;
            match self.icons.get(action).and_then(Clone::clone) {
                Some(icon) if !disabled => target.draw_image(&icon, rect.top_left()),
                _ => {
                    let fill = if disabled {
                        Color::rgba(0.2, 0.2, 0.2, 1.0)
                    } else {
                        Color::rgba(0.3, 0.25, 0.15, 1.0)
                    };
                    target.draw_rect(*rect, fill, Color::GOLD, 1.0);
                }
            }
        }
    }
}

impl InputHandler for ActionPanel {
    fn handle_input(&mut self, event: &InputEvent) -> InputOutcome {
        match event {
            InputEvent::MousePress { position, .. } if self.rect.contains(*position) => {
                InputOutcome::Claimed
            }
            InputEvent::MouseRelease {
                button: MouseButton::Left,
                position,
            } if self.rect.contains(*position) => {
                let hit = self
                    .buttons
                    .iter()
                    .find(|(_, rect)| rect.contains(*position))
                    .map(|(action, _)| *action);
                if let (Some(action), Some(unit_manager)) = (hit, &self.unit_manager) {
                    if !(self.build_disabled && action == UnitAction::Build) {
                        unit_manager.borrow_mut().trigger_action(action);
                    }
                }
                InputOutcome::Claimed
            }
            InputEvent::MouseRelease { position, .. } if self.rect.contains(*position) => {
                InputOutcome::Claimed
            }
            _ => InputOutcome::Pass,
        }
    }
}
