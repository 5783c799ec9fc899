//! Asset-store contract.
//!
//! The asset layer (SLP/palette/UI-file decoding) is an external
//! collaborator. It hands out decoded images by numeric id or symbolic
//! name; a miss returns `None` and is logged as a warning by the caller -
//! never fatal to the frame loop.

use std::rc::Rc;

use crate::command::Image;

/// Numeric id of a decoded graphic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GraphicId(pub u32);

/// Metadata parsed from a UI file (start screen, menu dialog, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiFileInfo {
    /// Graphic id of the background image.
    pub background_id: GraphicId,
    /// Palette id the background was decoded with.
    pub palette_id: u32,
}

/// UI overlay resolution variants, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiResolution {
    /// 1280x1024 overlay.
    Res1280x1024,
    /// 1024x768 overlay.
    Res1024x768,
    /// 800x600 overlay.
    Res800x600,
}

impl UiResolution {
    /// All resolutions in fallback order (highest first).
    pub const FALLBACK_ORDER: [Self; 3] = [Self::Res1280x1024, Self::Res1024x768, Self::Res800x600];
}

/// Civilization variants of the UI overlay art.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiCiv {
    /// Briton overlay set.
    Briton,
    /// Teuton overlay set.
    Teuton,
    /// Frankish overlay set.
    Frank,
    /// Japanese overlay set.
    Japanese,
    /// Chinese overlay set.
    Chinese,
    /// Byzantine overlay set.
    Byzantine,
    /// Persian overlay set.
    Persian,
    /// Saracen overlay set.
    Saracen,
    /// Turkish overlay set.
    Turkish,
    /// Viking overlay set.
    Viking,
    /// Mongol overlay set.
    Mongol,
    /// Celtic overlay set.
    Celtic,
    /// Spanish overlay set.
    Spanish,
    /// Aztec overlay set.
    Aztec,
    /// Mayan overlay set.
    Mayan,
    /// Hunnic overlay set.
    Hun,
    /// Korean overlay set.
    Korean,
}

impl UiCiv {
    /// All civilizations in fallback order.
    pub const FALLBACK_ORDER: [Self; 17] = [
        Self::Briton,
        Self::Teuton,
        Self::Frank,
        Self::Japanese,
        Self::Chinese,
        Self::Byzantine,
        Self::Persian,
        Self::Saracen,
        Self::Turkish,
        Self::Viking,
        Self::Mongol,
        Self::Celtic,
        Self::Spanish,
        Self::Aztec,
        Self::Mayan,
        Self::Hun,
        Self::Korean,
    ];
}

/// External asset provider.
///
/// Every lookup is optional: missing art degrades the feature that wanted
/// it, nothing more.
pub trait AssetStore {
    /// Returns the decoded image with the given graphic id.
    fn image(&self, id: GraphicId) -> Option<Rc<Image>>;

    /// Returns metadata for a UI file by symbolic name (e.g. `dlg_men.sin`).
    fn ui_file(&self, name: &str) -> Option<UiFileInfo>;

    /// Returns the full-screen UI overlay for a resolution/civ combination.
    fn ui_overlay(&self, resolution: UiResolution, civ: UiCiv) -> Option<Rc<Image>>;

    /// Returns the tile image for a terrain id.
    fn terrain_tile(&self, terrain: u16) -> Option<Rc<Image>>;
}

/// Asset store with no assets. Everything degrades to fallbacks.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAssets;

impl AssetStore for NullAssets {
    fn image(&self, _id: GraphicId) -> Option<Rc<Image>> {
        None
    }

    fn ui_file(&self, _name: &str) -> Option<UiFileInfo> {
        None
    }

    fn ui_overlay(&self, _resolution: UiResolution, _civ: UiCiv) -> Option<Rc<Image>> {
        None
    }

    fn terrain_tile(&self, _terrain: u16) -> Option<Rc<Image>> {
        None
    }
}
