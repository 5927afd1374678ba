//! Control panel UI.

use egui::{Color32, Context, RichText, Vec2};
use inkglass_core::stroke::{MAX_WIDTH, MIN_WIDTH};
use inkglass_core::{
    BackgroundKind, Canvas, CanvasEvent, ShortcutRegistry, StrokeColor, ToolKind, DEFAULT_PALETTE,
};
use inkglass_widgets::{
    panel_frame, section_label, separator, swatch_row, theme, ActionButton, ToggleButton,
};

/// Actions the control panel can trigger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiAction {
    SetTool(ToolKind),
    SetColor(StrokeColor),
    SetWidth(f64),
    SetBackground(BackgroundKind),
    Undo,
    Redo,
    ClearPage,
    PrevPage,
    AddPage,
    NextPage,
    ToggleDesktopMode,
    ToggleShortcuts,
    Quit,
}

impl UiAction {
    /// Apply to the canvas. Returns `true` when the app should exit.
    pub fn apply(self, canvas: &mut Canvas, ui_state: &mut UiState) -> bool {
        match self {
            UiAction::SetTool(tool) => canvas.set_tool(tool),
            UiAction::SetColor(color) => canvas.set_color(color),
            UiAction::SetWidth(width) => canvas.set_width(width),
            UiAction::SetBackground(background) => canvas.set_background(background),
            UiAction::Undo => {
                canvas.undo();
            }
            UiAction::Redo => {
                canvas.redo();
            }
            UiAction::ClearPage => {
                canvas.clear_page();
            }
            UiAction::PrevPage => canvas.prev_page(),
            UiAction::AddPage => canvas.add_page(),
            UiAction::NextPage => canvas.next_page(),
            UiAction::ToggleDesktopMode => canvas.toggle_desktop_mode(),
            UiAction::ToggleShortcuts => ui_state.shortcuts_open = !ui_state.shortcuts_open,
            UiAction::Quit => return true,
        }
        false
    }
}

/// Panel state, mirrored from the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    pub tool: ToolKind,
    pub color: StrokeColor,
    pub width: f64,
    pub background: BackgroundKind,
    /// 1-based active page.
    pub current_page: usize,
    pub page_count: usize,
    pub desktop_mode: bool,
    pub can_undo: bool,
    pub can_redo: bool,
    pub shortcuts_open: bool,
}

impl UiState {
    pub fn from_canvas(canvas: &Canvas) -> Self {
        let session = canvas.session();
        let position = canvas.document().position();
        Self {
            tool: session.tool(),
            color: session.color(),
            width: session.width(),
            background: canvas.page().background(),
            current_page: position.current,
            page_count: position.total,
            desktop_mode: session.desktop_mode(),
            can_undo: canvas.page().can_undo(),
            can_redo: canvas.page().can_redo(),
            shortcuts_open: false,
        }
    }

    /// Mirror one canvas notification.
    pub fn apply(&mut self, event: &CanvasEvent) {
        match *event {
            CanvasEvent::PageChanged { current, total } => {
                self.current_page = current;
                self.page_count = total;
            }
            CanvasEvent::ToolChanged(tool) => self.tool = tool,
            CanvasEvent::ColorChanged(color) => self.color = color,
            CanvasEvent::WidthChanged(width) => self.width = width,
            CanvasEvent::BackgroundChanged(background) => self.background = background,
            CanvasEvent::DesktopModeChanged(enabled) => self.desktop_mode = enabled,
        }
    }

    /// Drain pending canvas events and refresh the history flags.
    pub fn sync(&mut self, canvas: &mut Canvas) {
        for event in canvas.take_events() {
            self.apply(&event);
        }
        // The page background travels with the page, not with an event.
        self.background = canvas.page().background();
        self.can_undo = canvas.page().can_undo();
        self.can_redo = canvas.page().can_redo();
    }
}

fn color32(color: StrokeColor) -> Color32 {
    Color32::from_rgb(color.r, color.g, color.b)
}

/// Render the control panel and return any triggered action.
pub fn render_toolbar(ctx: &Context, ui_state: &mut UiState) -> Option<UiAction> {
    let mut action = None;

    egui::CentralPanel::default()
        .frame(panel_frame())
        .show(ctx, |ui| {
            ui.spacing_mut().item_spacing = Vec2::new(4.0, 4.0);

            section_label(ui, "Tools");
            for row in ToolKind::ALL.chunks(3) {
                ui.horizontal(|ui| {
                    for &tool in row {
                        if ToggleButton::new(tool.name(), ui_state.tool == tool)
                            .shortcut(tool.shortcut_letter())
                            .min_width(60.0)
                            .show(ui)
                        {
                            action = Some(UiAction::SetTool(tool));
                        }
                    }
                });
            }

            separator(ui);
            section_label(ui, "Color");
            let palette: Vec<(Color32, String)> = DEFAULT_PALETTE
                .iter()
                .map(|&c| (color32(c), c.to_hex()))
                .collect();
            let current = color32(ui_state.color);
            for (offset, row) in palette.chunks(5).enumerate() {
                if let Some(index) = swatch_row(ui, row, current) {
                    action = Some(UiAction::SetColor(DEFAULT_PALETTE[offset * 5 + index]));
                }
            }

            separator(ui);
            section_label(ui, "Width");
            let mut width = ui_state.width;
            let slider = egui::Slider::new(&mut width, MIN_WIDTH..=MAX_WIDTH)
                .integer()
                .custom_formatter(|v, _| format!("{v:.0} px"));
            if ui.add(slider).changed() {
                action = Some(UiAction::SetWidth(width));
            }

            separator(ui);
            section_label(ui, "Background");
            let mut background = ui_state.background;
            egui::ComboBox::from_id_salt("background_kind")
                .selected_text(background.name())
                .width(160.0)
                .show_ui(ui, |ui| {
                    for kind in BackgroundKind::ALL {
                        ui.selectable_value(&mut background, kind, kind.name());
                    }
                });
            if background != ui_state.background {
                action = Some(UiAction::SetBackground(background));
            }

            separator(ui);
            ui.horizontal(|ui| {
                if ActionButton::new("Undo")
                    .enabled(ui_state.can_undo)
                    .tooltip("Ctrl+Z")
                    .show(ui)
                {
                    action = Some(UiAction::Undo);
                }
                if ActionButton::new("Redo")
                    .enabled(ui_state.can_redo)
                    .tooltip("Ctrl+Y")
                    .show(ui)
                {
                    action = Some(UiAction::Redo);
                }
                if ActionButton::new("Clear").tooltip("Ctrl+Delete").show(ui) {
                    action = Some(UiAction::ClearPage);
                }
            });

            separator(ui);
            section_label(ui, "Page");
            ui.horizontal(|ui| {
                if ActionButton::new("<")
                    .enabled(ui_state.current_page > 1)
                    .tooltip("Previous page (PageUp)")
                    .show(ui)
                {
                    action = Some(UiAction::PrevPage);
                }
                ui.label(
                    RichText::new(format!("{} / {}", ui_state.current_page, ui_state.page_count))
                        .color(theme::TEXT),
                );
                if ActionButton::new(">")
                    .enabled(ui_state.current_page < ui_state.page_count)
                    .tooltip("Next page (PageDown)")
                    .show(ui)
                {
                    action = Some(UiAction::NextPage);
                }
                if ActionButton::new("+").tooltip("New page (Ctrl+N)").show(ui) {
                    action = Some(UiAction::AddPage);
                }
            });

            separator(ui);
            ui.horizontal(|ui| {
                if ToggleButton::new("Desktop", ui_state.desktop_mode)
                    .tooltip("Let clicks reach the desktop")
                    .shortcut("F2")
                    .min_width(70.0)
                    .show(ui)
                {
                    action = Some(UiAction::ToggleDesktopMode);
                }
                if ToggleButton::new("Keys", ui_state.shortcuts_open)
                    .tooltip("Keyboard shortcuts")
                    .min_width(50.0)
                    .show(ui)
                {
                    action = Some(UiAction::ToggleShortcuts);
                }
                if ActionButton::new("Quit").show(ui) {
                    action = Some(UiAction::Quit);
                }
            });

            if ui_state.shortcuts_open {
                separator(ui);
                egui::ScrollArea::vertical().show(ui, |ui| {
                    for shortcut in ShortcutRegistry::all() {
                        ui.horizontal(|ui| {
                            ui.label(
                                RichText::new(shortcut.format())
                                    .monospace()
                                    .size(11.0)
                                    .color(theme::TEXT),
                            );
                            ui.label(
                                RichText::new(shortcut.description)
                                    .size(11.0)
                                    .color(theme::TEXT_MUTED),
                            );
                        });
                    }
                });
            }
        });

    action
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkglass_core::{MouseButton, PointerEvent};
    use kurbo::Point;

    fn draw_dot(canvas: &mut Canvas) {
        canvas.handle_pointer(PointerEvent::Down {
            position: Point::new(5.0, 5.0),
            button: MouseButton::Left,
        });
        canvas.handle_pointer(PointerEvent::Move {
            position: Point::new(25.0, 5.0),
        });
        canvas.handle_pointer(PointerEvent::Up {
            position: Point::new(25.0, 5.0),
            button: MouseButton::Left,
        });
    }

    #[test]
    fn test_state_mirrors_new_canvas() {
        let canvas = Canvas::new();
        let state = UiState::from_canvas(&canvas);
        assert_eq!(state.tool, ToolKind::Pen);
        assert_eq!((state.current_page, state.page_count), (1, 1));
        assert!(!state.can_undo && !state.can_redo);
    }

    #[test]
    fn test_events_keep_mirror_in_sync() {
        let mut canvas = Canvas::new();
        let mut state = UiState::from_canvas(&canvas);

        UiAction::SetTool(ToolKind::Eraser).apply(&mut canvas, &mut state);
        UiAction::AddPage.apply(&mut canvas, &mut state);
        UiAction::SetBackground(BackgroundKind::Dotted).apply(&mut canvas, &mut state);
        state.sync(&mut canvas);

        assert_eq!(state.tool, ToolKind::Eraser);
        assert_eq!(state.width, 25.0);
        assert_eq!((state.current_page, state.page_count), (2, 2));
        assert_eq!(state.background, BackgroundKind::Dotted);

        UiAction::PrevPage.apply(&mut canvas, &mut state);
        state.sync(&mut canvas);
        assert_eq!(state.current_page, 1);
        assert_eq!(state.background, BackgroundKind::None);
    }

    #[test]
    fn test_history_flags_follow_page() {
        let mut canvas = Canvas::new();
        let mut state = UiState::from_canvas(&canvas);
        draw_dot(&mut canvas);
        state.sync(&mut canvas);
        assert!(state.can_undo);

        UiAction::Undo.apply(&mut canvas, &mut state);
        state.sync(&mut canvas);
        assert!(canvas.page().is_empty());
        assert!(!state.can_undo && state.can_redo);
    }

    #[test]
    fn test_panel_only_actions() {
        let mut canvas = Canvas::new();
        let mut state = UiState::from_canvas(&canvas);

        assert!(!UiAction::ToggleShortcuts.apply(&mut canvas, &mut state));
        assert!(state.shortcuts_open);
        assert!(UiAction::Quit.apply(&mut canvas, &mut state));

        UiAction::ToggleDesktopMode.apply(&mut canvas, &mut state);
        state.sync(&mut canvas);
        assert!(state.desktop_mode);
    }

    #[test]
    fn test_width_action_is_clamped() {
        let mut canvas = Canvas::new();
        let mut state = UiState::from_canvas(&canvas);
        UiAction::SetWidth(200.0).apply(&mut canvas, &mut state);
        state.sync(&mut canvas);
        assert_eq!(state.width, MAX_WIDTH);
    }
}
