//! Color constants shared by the demo panels.

use egui::Color32;

/// Background colors for different layers
pub mod bg {
    use super::*;

    /// Side panel background - slightly lighter than the tree area
    pub const PANEL: Color32 = Color32::from_rgb(20, 22, 28);

    /// Main tree area background - darkest layer
    pub const CANVAS: Color32 = Color32::from_rgb(14, 17, 23);
}

/// Accent colors
pub mod accent {
    use super::*;

    /// Blue for expanded-key entries
    pub const BLUE: Color32 = Color32::from_rgb(59, 130, 246);

    /// Orange for the selection readout
    pub const ORANGE: Color32 = Color32::from_rgb(255, 149, 0);
}

/// Text colors at different emphasis levels
pub mod text {
    use super::*;

    /// Primary text - high contrast
    pub const PRIMARY: Color32 = Color32::from_rgb(240, 240, 245);

    /// Muted text - low contrast for less important info
    pub const MUTED: Color32 = Color32::from_rgb(120, 125, 135);
}
