//! Unit info panel: details for the current selection.

use std::cell::RefCell;
use std::rc::Rc;

use chronicle_core::{InputEvent, MouseButton, ScreenPos, ScreenRect, Size, TimeMs};
use chronicle_render::{AssetStore, Color, RenderTarget, Text};
use chronicle_sim::{EntityId, UnitManager, UnitSummary};

use crate::widget::{InputHandler, InputOutcome, Widget};

/// The selection-detail panel in the lower-middle HUD.
///
/// One selected unit shows name and hit points; several show a portrait
/// row, and clicking a portrait narrows the selection to that unit.
pub struct UnitInfoPanel {
    rect: ScreenRect,
    assets: Rc<dyn AssetStore>,
    unit_manager: Option<Rc<RefCell<dyn UnitManager>>>,
    displayed: Vec<UnitSummary>,
    portraits: Vec<(EntityId, ScreenRect)>,
}

impl UnitInfoPanel {
    const PORTRAIT_SIZE: Size = Size::new(36.0, 36.0);
    const PORTRAIT_GAP: f32 = 4.0;
    const COLUMNS: usize = 8;

    /// Creates the panel.
    #[must_use]
    pub fn new(rect: ScreenRect, assets: Rc<dyn AssetStore>) -> Self {
        Self {
            rect,
            assets,
            unit_manager: None,
            displayed: Vec::new(),
            portraits: Vec::new(),
        }
    }

    /// Returns the panel's bounds.
    #[must_use]
    pub fn rect(&self) -> ScreenRect {
        self.rect
    }

    /// Rebinds the panel to a new state's unit layer.
    pub fn bind(&mut self, unit_manager: Rc<RefCell<dyn UnitManager>>) {
        self.unit_manager = Some(unit_manager);
        self.displayed.clear();
        self.portraits.clear();
    }

    fn layout_portraits(&mut self) {
        self.portraits.clear();
        if self.displayed.len() < 2 {
            return;
        }

        for (index, summary) in self.displayed.iter().enumerate() {
            let col = index % Self::COLUMNS;
            let row = index / Self::COLUMNS;
            let rect = ScreenRect::new(
                self.rect.x + 8.0 + col as f32 * (Self::PORTRAIT_SIZE.width + Self::PORTRAIT_GAP),
                self.rect.y + 8.0 + row as f32 * (Self::PORTRAIT_SIZE.height + Self::PORTRAIT_GAP),
                Self::PORTRAIT_SIZE.width,
                Self::PORTRAIT_SIZE.height,
            );
            self.portraits.push((summary.entity, rect));
        }
    }
}

impl Widget for UnitInfoPanel {
    fn update(&mut self, _delta_ms: TimeMs) -> bool {
        let Some(unit_manager) = &self.unit_manager else {
            return false;
        };

        let selection = unit_manager.borrow().selection();
        if selection == self.displayed {
            return false;
        }

        self.displayed = selection;
        self.layout_portraits();
        true
    }

    fn draw(&mut self, target: &mut RenderTarget) {
        if self.displayed.is_empty() {
            return;
        }

        target.draw_rect(
            self.rect,
            Color::rgba(0.1, 0.08, 0.05, 0.9),
            Color::GOLD,
            1.0,
        );

        if let [only] = self.displayed.as_slice() {
            let portrait_pos = ScreenPos::new(self.rect.x + 8.0, self.rect.y + 8.0);
            if let Some(icon) = self.assets.image(only.icon) {
                target.draw_image(&icon, portrait_pos);
            }

            let text_x = portrait_pos.x + Self::PORTRAIT_SIZE.width + 8.0;
            target.draw_text(
                Text::new(only.name.clone(), ScreenPos::new(text_x, self.rect.y + 8.0), 14.0)
                    .with_color(Color::WHITE),
            );
            target.draw_text(
                Text::new(
                    format!("{}/{}", only.hp, only.max_hp),
                    ScreenPos::new(text_x, self.rect.y + 28.0),
                    12.0,
                )
                .with_color(Color::WHITE),
            );

            // Health bar under the portrait.
            let ratio = if only.max_hp > 0 {
                only.hp as f32 / only.max_hp as f32
            } else {
                0.0
            };
            let bar = ScreenRect::new(
                portrait_pos.x,
                portrait_pos.y + Self::PORTRAIT_SIZE.height + 4.0,
                Self::PORTRAIT_SIZE.width * ratio,
                4.0,
            );
            let color = if ratio > 0.5 {
                Color::rgb(0.1, 0.8, 0.1)
            } else {
                Color::rgb(0.8, 0.2, 0.1)
            };
            target.draw_rect(bar, color, Color::TRANSPARENT, 0.0);
            return;
        }

        for ((_, rect), summary) in self.portraits.iter().zip(&self.displayed) {
            match self.assets.image(summary.icon) {
                Some(icon) => target.draw_image(&icon, rect.top_left()),
                None => target.draw_rect(*rect, Color::rgba(0.3, 0.25, 0.15, 1.0), Color::GOLD, 1.0),
            }
        }
    }
}

impl InputHandler for UnitInfoPanel {
    fn handle_input(&mut self, event: &InputEvent) -> InputOutcome {
        match event {
            InputEvent::MousePress {
                button: MouseButton::Left,
                position,
            } if self.rect.contains(*position) => {
                let hit = self
                    .portraits
                    .iter()
                    .find(|(_, rect)| rect.contains(*position))
                    .map(|(id, _)| *id);
                if let (Some(id), Some(unit_manager)) = (hit, &self.unit_manager) {
                    unit_manager.borrow_mut().select_entity(id);
                }
                InputOutcome::Claimed
            }
            InputEvent::MousePress { position, .. } | InputEvent::MouseRelease { position, .. }
                if self.rect.contains(*position) =>
            {
                InputOutcome::Claimed
            }
            _ => InputOutcome::Pass,
        }
    }
}
