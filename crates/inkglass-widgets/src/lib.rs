//! Styled egui components for the InkGlass control panel.
//!
//! - **Buttons**: toggle buttons for tools and modes, plain action buttons
//! - **Colors**: palette swatches and swatch rows
//! - **Layout**: section labels, separators, the panel frame

pub mod buttons;
pub mod colors;
pub mod layout;

pub use buttons::{ActionButton, ToggleButton};
pub use colors::{colors_match, swatch_row, ColorSwatch};
pub use layout::{panel_frame, section_label, separator};

/// Standard sizing constants used across widgets.
pub mod sizing {
    /// Small button size (color swatches)
    pub const SMALL: f32 = 20.0;
    /// Medium button size (tool buttons)
    pub const MEDIUM: f32 = 28.0;
    /// Button corner radius
    pub const CORNER_RADIUS: u8 = 4;
}

/// Standard colors used across widgets.
pub mod theme {
    use egui::Color32;

    /// Text color (dark gray)
    pub const TEXT: Color32 = Color32::from_rgb(60, 60, 60);
    /// Muted text color
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 120, 120);
    /// Border color
    pub const BORDER: Color32 = Color32::from_rgb(220, 220, 220);
    /// Selection/active color (blue)
    pub const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);
    /// Hover background
    pub const HOVER_BG: Color32 = Color32::from_rgb(235, 235, 235);
    /// Idle button background
    pub const BUTTON_BG: Color32 = Color32::from_rgb(245, 245, 245);
    /// Panel background
    pub const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(250, 250, 252, 250);
}
