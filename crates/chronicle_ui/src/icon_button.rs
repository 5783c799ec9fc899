//! Top-row icon buttons.

use std::rc::Rc;

use chronicle_core::{ScreenPos, ScreenRect, Size};
use chronicle_render::{AssetStore, Color, GraphicId, Image, RenderTarget};

/// The buttons in the top-right HUD row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconButtonType {
    /// Opens the game menu dialog.
    GameMenu,
    /// Opens diplomacy.
    Diplomacy,
    /// Shows scenario objectives.
    Objectives,
    /// Opens the chat prompt.
    Chat,
}

impl IconButtonType {
    /// All button types, in row order (rightmost first).
    pub const ALL: [Self; 4] = [Self::GameMenu, Self::Diplomacy, Self::Objectives, Self::Chat];

    /// Graphic id of the button icon.
    #[must_use]
    const fn graphic(self) -> GraphicId {
        match self {
            Self::GameMenu => GraphicId(50_721),
            Self::Diplomacy => GraphicId(50_722),
            Self::Objectives => GraphicId(50_723),
            Self::Chat => GraphicId(50_724),
        }
    }
}

/// A press/release icon button.
///
/// Presses arm the button; a release inside the bounds while armed fires
/// it. Moving the cursor away before releasing disarms without firing.
#[derive(Debug)]
pub struct IconButton {
    button_type: IconButtonType,
    rect: ScreenRect,
    icon: Option<Rc<Image>>,
    pressed: bool,
}

impl IconButton {
    /// Fallback button size when the icon is missing.
    const DEFAULT_SIZE: Size = Size::new(40.0, 40.0);

    /// Creates a button, loading its icon from the asset store.
    ///
    /// A missing icon degrades to a plain rectangle.
    #[must_use]
    pub fn new(button_type: IconButtonType, assets: &dyn AssetStore) -> Self {
        let icon = assets.image(button_type.graphic());
        if icon.is_none() {
            tracing::warn!("missing icon for {:?} button", button_type);
        }

        let size = icon.as_ref().map_or(Self::DEFAULT_SIZE, |image| image.size);
        Self {
            button_type,
            rect: ScreenRect::from_pos_size(ScreenPos::ZERO, size),
            icon,
            pressed: false,
        }
    }

    /// Returns the button's type.
    #[must_use]
    pub fn button_type(&self) -> IconButtonType {
        self.button_type
    }

    /// Returns the button's bounds.
    #[must_use]
    pub fn rect(&self) -> ScreenRect {
        self.rect
    }

    /// Moves the button.
    pub fn set_position(&mut self, position: ScreenPos) {
        self.rect = ScreenRect::from_pos_size(position, self.rect.size());
    }

    /// Handles a mouse press. Returns true if the button became armed.
    pub fn on_mouse_pressed(&mut self, position: ScreenPos) -> bool {
        self.pressed = self.rect.contains(position);
        self.pressed
    }

    /// Handles a mouse release. Returns true if the button fired.
    pub fn on_mouse_released(&mut self, position: ScreenPos) -> bool {
        let fired = self.pressed && self.rect.contains(position);
        self.pressed = false;
        fired
    }

    /// Records the button's draw commands.
    pub fn draw(&mut self, target: &mut RenderTarget) {
        // Armed buttons render nudged down-right, the classic pressed look.
        let offset = if self.pressed { 1.0 } else { 0.0 };
        let position = ScreenPos::new(self.rect.x + offset, self.rect.y + offset);

        match &self.icon {
            Some(icon) => target.draw_image(icon, position),
            None => target.draw_rect(
                ScreenRect::from_pos_size(position, self.rect.size()),
                Color::rgba(0.2, 0.2, 0.2, 1.0),
                Color::GOLD,
                1.0,
            ),
        }
    }
}
