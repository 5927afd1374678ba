//! Color swatches for the quick palette.

use egui::{vec2, Color32, CursorIcon, Rect, Sense, Stroke, Ui};

use crate::{sizing, theme};

/// Check if two colors match (ignoring alpha).
pub fn colors_match(a: Color32, b: Color32) -> bool {
    a.r() == b.r() && a.g() == b.g() && a.b() == b.b()
}

/// Ring color that stays visible on top of `fill`.
fn ring_color(fill: Color32) -> Color32 {
    let luma = 0.299 * f32::from(fill.r()) + 0.587 * f32::from(fill.g()) + 0.114 * f32::from(fill.b());
    if luma > 160.0 {
        Color32::from_gray(30)
    } else {
        Color32::WHITE
    }
}

/// A circular color swatch.
pub struct ColorSwatch<'a> {
    color: Color32,
    tooltip: &'a str,
    selected: bool,
}

impl<'a> ColorSwatch<'a> {
    pub fn new(color: Color32, tooltip: &'a str) -> Self {
        Self {
            color,
            tooltip,
            selected: false,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Show the swatch and return (clicked, rect).
    pub fn show(self, ui: &mut Ui) -> (bool, Rect) {
        let (rect, response) =
            ui.allocate_exact_size(vec2(sizing::SMALL, sizing::SMALL), Sense::click());

        if ui.is_rect_visible(rect) {
            let center = rect.center();
            let radius = sizing::SMALL / 2.0;
            ui.painter().circle_filled(center, radius, self.color);
            // Light colors need an outline against the panel.
            ui.painter()
                .circle_stroke(center, radius, Stroke::new(1.0, theme::BORDER));
            if self.selected {
                ui.painter().circle_stroke(
                    center,
                    radius - 3.0,
                    Stroke::new(2.0, ring_color(self.color)),
                );
            } else if response.hovered() {
                ui.painter()
                    .circle_stroke(center, radius, Stroke::new(2.0, theme::ACCENT));
            }
        }

        let clicked = response.clicked();
        response
            .on_hover_text(self.tooltip)
            .on_hover_cursor(CursorIcon::PointingHand);
        (clicked, rect)
    }
}

/// A horizontal row of swatches. Returns the index of the clicked swatch.
pub fn swatch_row(ui: &mut Ui, colors: &[(Color32, String)], current: Color32) -> Option<usize> {
    let mut clicked = None;
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 4.0;
        for (index, (color, tooltip)) in colors.iter().enumerate() {
            let swatch = ColorSwatch::new(*color, tooltip).selected(colors_match(*color, current));
            if swatch.show(ui).0 {
                clicked = Some(index);
            }
        }
    });
    clicked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colors_match_ignores_alpha() {
        let a = Color32::from_rgba_unmultiplied(10, 20, 30, 255);
        let b = Color32::from_rgba_unmultiplied(10, 20, 30, 255);
        assert!(colors_match(a, b));
        assert!(!colors_match(a, Color32::from_rgb(10, 20, 31)));
    }

    #[test]
    fn test_ring_contrasts_with_fill() {
        assert_eq!(ring_color(Color32::WHITE), Color32::from_gray(30));
        assert_eq!(ring_color(Color32::from_rgb(0x1a, 0x1a, 0x2e)), Color32::WHITE);
    }
}
