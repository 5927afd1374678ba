//! Layout helpers for the control panel window.

use egui::{vec2, Frame, Margin, RichText, Sense, Ui};

use crate::theme;

/// Gap kept above and below a separator.
const SEPARATOR_GAP: f32 = 4.0;

/// A one pixel rule across the available width.
pub fn separator(ui: &mut Ui) {
    ui.add_space(SEPARATOR_GAP);
    let (rect, _) = ui.allocate_exact_size(vec2(ui.available_width(), 1.0), Sense::hover());
    ui.painter().rect_filled(rect, 0.0, theme::BORDER);
    ui.add_space(SEPARATOR_GAP);
}

/// Small uppercase heading above a group of controls.
pub fn section_label(ui: &mut Ui, text: &str) {
    ui.label(
        RichText::new(text.to_uppercase())
            .size(10.0)
            .strong()
            .color(theme::TEXT_MUTED),
    );
}

/// Frame filling the whole panel window.
pub fn panel_frame() -> Frame {
    Frame::new()
        .fill(theme::PANEL_BG)
        .inner_margin(Margin::same(10))
}
