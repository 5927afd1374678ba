//! Text buttons for the control panel.

use egui::{vec2, Align2, Color32, CornerRadius, CursorIcon, FontId, Response, Sense, Ui};

use crate::{sizing, theme};

/// Horizontal padding added to the label width.
const LABEL_PADDING: f32 = 16.0;

/// A labelled button that stays highlighted while `selected`.
pub struct ToggleButton<'a> {
    label: &'a str,
    selected: bool,
    tooltip: Option<&'a str>,
    shortcut: Option<&'a str>,
    min_width: f32,
    height: f32,
}

impl<'a> ToggleButton<'a> {
    pub fn new(label: &'a str, selected: bool) -> Self {
        Self {
            label,
            selected,
            tooltip: None,
            shortcut: None,
            min_width: sizing::MEDIUM,
            height: sizing::MEDIUM,
        }
    }

    pub fn tooltip(mut self, tooltip: &'a str) -> Self {
        self.tooltip = Some(tooltip);
        self
    }

    /// Keyboard shortcut shown next to the tooltip.
    pub fn shortcut(mut self, shortcut: &'a str) -> Self {
        self.shortcut = Some(shortcut);
        self
    }

    pub fn min_width(mut self, width: f32) -> Self {
        self.min_width = width;
        self
    }

    /// Show the button and return true if clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let response = paint_label_button(
            ui,
            self.label,
            self.min_width,
            self.height,
            |hovered| match (self.selected, hovered) {
                (true, _) => (theme::ACCENT, Color32::WHITE),
                (false, true) => (theme::HOVER_BG, theme::TEXT),
                (false, false) => (theme::BUTTON_BG, theme::TEXT),
            },
        );

        let clicked = response.clicked();
        let response = match (self.tooltip, self.shortcut) {
            (Some(tooltip), Some(shortcut)) => response.on_hover_ui(|ui| {
                ui.horizontal(|ui| {
                    ui.label(tooltip);
                    ui.label(
                        egui::RichText::new(format!("({shortcut})"))
                            .color(theme::TEXT_MUTED)
                            .small(),
                    );
                });
            }),
            (Some(tooltip), None) => response.on_hover_text(tooltip),
            (None, Some(shortcut)) => response.on_hover_text(shortcut),
            (None, None) => response,
        };
        response.on_hover_cursor(CursorIcon::PointingHand);
        clicked
    }
}

/// A one-shot button that can be greyed out.
pub struct ActionButton<'a> {
    label: &'a str,
    enabled: bool,
    tooltip: Option<&'a str>,
}

impl<'a> ActionButton<'a> {
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            enabled: true,
            tooltip: None,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn tooltip(mut self, tooltip: &'a str) -> Self {
        self.tooltip = Some(tooltip);
        self
    }

    /// Show the button and return true if clicked while enabled.
    pub fn show(self, ui: &mut Ui) -> bool {
        let enabled = self.enabled;
        let response = paint_label_button(ui, self.label, sizing::MEDIUM, sizing::MEDIUM, |hovered| {
            match (enabled, hovered) {
                (false, _) => (theme::BUTTON_BG, Color32::from_gray(180)),
                (true, true) => (theme::HOVER_BG, theme::TEXT),
                (true, false) => (theme::BUTTON_BG, theme::TEXT),
            }
        });
        let clicked = enabled && response.clicked();
        let response = match self.tooltip {
            Some(tooltip) => response.on_hover_text(tooltip),
            None => response,
        };
        if enabled {
            response.on_hover_cursor(CursorIcon::PointingHand);
        }
        clicked
    }
}

/// Allocate a rounded button sized to its label. `colors` maps the hover
/// state to (background, text).
fn paint_label_button(
    ui: &mut Ui,
    label: &str,
    min_width: f32,
    height: f32,
    colors: impl Fn(bool) -> (Color32, Color32),
) -> Response {
    let font_id = FontId::proportional(12.0);
    let galley = ui
        .painter()
        .layout_no_wrap(label.to_string(), font_id.clone(), Color32::PLACEHOLDER);
    let width = (galley.size().x + LABEL_PADDING).max(min_width);

    let (rect, response) = ui.allocate_exact_size(vec2(width, height), Sense::click());
    if ui.is_rect_visible(rect) {
        let (bg, text) = colors(response.hovered());
        ui.painter()
            .rect_filled(rect, CornerRadius::same(sizing::CORNER_RADIUS), bg);
        ui.painter()
            .text(rect.center(), Align2::CENTER_CENTER, label, font_id, text);
    }
    response
}
