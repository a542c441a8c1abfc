use serde::{Deserialize, Serialize};

use crate::autoscroll::AutoScrollConfig;

/// Coordinator-wide settings. Every field falls back to its default when
/// missing from a deserialized document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DndConfig {
    pub auto_scroll: AutoScrollConfig,
    /// Minimum share of the floating rect (`0.0..1.0`) that has to overlap a
    /// container before that container can own the drag.
    pub min_owner_overlap: f32,
}

impl DndConfig {
    pub fn auto_scroll(mut self, auto_scroll: AutoScrollConfig) -> Self {
        self.auto_scroll = auto_scroll;
        self
    }

    pub fn min_owner_overlap(mut self, fraction: f32) -> Self {
        self.min_owner_overlap = fraction.clamp(0.0, 1.0);
        self
    }
}
