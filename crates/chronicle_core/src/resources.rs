//! Resource kinds displayed in the HUD.

/// A stockpile resource tracked per player.
///
/// The HUD queries a read-only snapshot of each kind every frame and
/// value-diffs it against the last displayed amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Wood stockpile.
    Wood,
    /// Food stockpile.
    Food,
    /// Gold stockpile.
    Gold,
    /// Stone stockpile.
    Stone,
    /// Population headroom (used vs. available).
    PopulationHeadroom,
}

impl ResourceKind {
    /// All kinds, in HUD display order.
    pub const ALL: [Self; 5] = [
        Self::Wood,
        Self::Food,
        Self::Gold,
        Self::Stone,
        Self::PopulationHeadroom,
    ];
}
