use serde::{Deserialize, Serialize};

use crate::policy::SafeZones;

const OVERLAY_LAYER: &str = "text_overlay";
const OVERLAY_FONT: &str = "Inter-Bold";

/// Text overlay descriptor. Purely compositional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdOverlay {
    pub layer: String,
    pub font: String,
    pub safe_zone_check: bool,
    pub content: String,
    /// Margins the overlay keeps clear of
    pub position: SafeZones,
}

impl AdOverlay {
    pub fn new(content: impl Into<String>, position: SafeZones) -> Self {
        Self {
            layer: OVERLAY_LAYER.to_string(),
            font: OVERLAY_FONT.to_string(),
            safe_zone_check: true,
            content: content.into(),
            position,
        }
    }
}
