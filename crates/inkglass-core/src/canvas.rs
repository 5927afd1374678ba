//! Canvas: the single entry point hosts talk to.
//!
//! Owns the document, the live drawing session and the pointer controller.
//! Every change that alters the picture marks the canvas dirty, and changes
//! the control panel has to mirror are queued as [`CanvasEvent`]s.

use crate::controller::{InputController, Interaction};
use crate::document::{Document, PageChanged};
use crate::input::{Modifiers, PointerEvent};
use crate::page::{BackgroundKind, Page};
use crate::shortcuts::{self, Command, WIDTH_KEY_STEP};
use crate::stroke::StrokeColor;
use crate::tools::{DrawingSession, ToolKind};

/// Notification for the control panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasEvent {
    /// Active page moved or the page count changed. 1-based.
    PageChanged { current: usize, total: usize },
    ToolChanged(ToolKind),
    ColorChanged(StrokeColor),
    WidthChanged(f64),
    BackgroundChanged(BackgroundKind),
    DesktopModeChanged(bool),
}

impl From<PageChanged> for CanvasEvent {
    fn from(changed: PageChanged) -> Self {
        CanvasEvent::PageChanged {
            current: changed.current,
            total: changed.total,
        }
    }
}

/// Drawing surface state.
#[derive(Debug, Clone)]
pub struct Canvas {
    document: Document,
    session: DrawingSession,
    controller: InputController,
    events: Vec<CanvasEvent>,
    dirty: bool,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    pub fn new() -> Self {
        Self::with_session(DrawingSession::default(), BackgroundKind::default())
    }

    /// Create a canvas with restored settings and a first page using
    /// `background`.
    pub fn with_session(session: DrawingSession, background: BackgroundKind) -> Self {
        Self {
            document: Document::new(background),
            session,
            controller: InputController::new(),
            events: Vec::new(),
            dirty: true,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn session(&self) -> &DrawingSession {
        &self.session
    }

    pub fn controller(&self) -> &InputController {
        &self.controller
    }

    /// The active page.
    pub fn page(&self) -> &Page {
        self.document.page()
    }

    /// Returns whether a repaint is pending and clears the flag.
    pub fn take_repaint(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Drain queued control-panel events in emission order.
    pub fn take_events(&mut self) -> Vec<CanvasEvent> {
        std::mem::take(&mut self.events)
    }

    fn emit(&mut self, event: CanvasEvent) {
        self.events.push(event);
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Feed a pointer event. Wheel movement also adjusts the pen width.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Interaction {
        if let PointerEvent::Scroll { delta, .. } = event {
            if delta.y != 0.0 {
                self.adjust_width(shortcuts::scroll_width_delta(delta.y));
            }
        }
        let result = self
            .controller
            .handle(event, &self.session, self.document.page_mut());
        if result.repaint {
            self.mark_dirty();
        }
        result
    }

    /// Resolve and run a key press. Returns `true` when the key was bound.
    pub fn handle_key(&mut self, key: &str, modifiers: Modifiers) -> bool {
        match shortcuts::resolve(key, modifiers) {
            Some(command) => {
                log::debug!("Key {key:?} -> {command:?}");
                self.execute(command);
                true
            }
            None => false,
        }
    }

    pub fn execute(&mut self, command: Command) {
        match command {
            Command::Undo => {
                self.undo();
            }
            Command::Redo => {
                self.redo();
            }
            Command::ClearPage => {
                self.clear_page();
            }
            Command::QuickColor(index) => {
                if let Some(color) = self.session.quick_color(index) {
                    self.emit(CanvasEvent::ColorChanged(color));
                }
            }
            Command::WidenPen => self.adjust_width(WIDTH_KEY_STEP),
            Command::NarrowPen => self.adjust_width(-WIDTH_KEY_STEP),
            Command::AddPage => self.add_page(),
            Command::PrevPage => self.prev_page(),
            Command::NextPage => self.next_page(),
            Command::ToggleDesktopMode => self.toggle_desktop_mode(),
            Command::SelectTool(tool) => self.set_tool(tool),
        }
    }

    /// Select a tool. Width and opacity reset to the tool's defaults.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.session.set_tool(tool);
        self.emit(CanvasEvent::ToolChanged(tool));
        self.emit(CanvasEvent::WidthChanged(self.session.width()));
        self.mark_dirty();
    }

    pub fn set_color(&mut self, color: StrokeColor) {
        self.session.set_color(color);
        self.emit(CanvasEvent::ColorChanged(color));
    }

    pub fn set_width(&mut self, width: f64) {
        self.session.set_width(width);
        self.emit(CanvasEvent::WidthChanged(self.session.width()));
        self.mark_dirty();
    }

    fn adjust_width(&mut self, delta: f64) {
        self.set_width(self.session.width() + delta);
    }

    pub fn set_opacity(&mut self, opacity: f64) {
        self.session.set_opacity(opacity);
    }

    /// Change the background of the active page.
    pub fn set_background(&mut self, background: BackgroundKind) {
        self.document.set_background(background);
        self.emit(CanvasEvent::BackgroundChanged(background));
        self.mark_dirty();
    }

    /// Enable or disable click-through. Entering desktop mode ends any drag.
    pub fn set_desktop_mode(&mut self, enabled: bool) {
        if enabled {
            self.finish_interaction();
        }
        self.session.set_desktop_mode(enabled);
        log::info!("Desktop mode {}", if enabled { "on" } else { "off" });
        self.emit(CanvasEvent::DesktopModeChanged(enabled));
        self.mark_dirty();
    }

    pub fn toggle_desktop_mode(&mut self) {
        self.set_desktop_mode(!self.session.desktop_mode());
    }

    pub fn undo(&mut self) -> bool {
        let changed = self.document.page_mut().undo();
        if changed {
            self.mark_dirty();
        }
        changed
    }

    pub fn redo(&mut self) -> bool {
        let changed = self.document.page_mut().redo();
        if changed {
            self.mark_dirty();
        }
        changed
    }

    pub fn clear_page(&mut self) -> bool {
        let changed = self.document.page_mut().clear();
        if changed {
            self.mark_dirty();
        }
        changed
    }

    pub fn add_page(&mut self) {
        self.finish_interaction();
        let changed = self.document.add_page();
        self.page_changed(changed);
    }

    pub fn prev_page(&mut self) {
        self.finish_interaction();
        if let Some(changed) = self.document.prev_page() {
            self.page_changed(changed);
        }
    }

    pub fn next_page(&mut self) {
        self.finish_interaction();
        if let Some(changed) = self.document.next_page() {
            self.page_changed(changed);
        }
    }

    fn page_changed(&mut self, changed: PageChanged) {
        log::info!("Page {} / {}", changed.current, changed.total);
        self.emit(changed.into());
        self.mark_dirty();
    }

    /// Close a drag on the page it started on.
    fn finish_interaction(&mut self) {
        if !self.controller.is_active() {
            return;
        }
        let result = self.controller.finish(&self.session, self.document.page_mut());
        if result.repaint {
            self.mark_dirty();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MouseButton;
    use kurbo::{Point, Vec2};

    fn drag(canvas: &mut Canvas, from: Point, to: Point) {
        canvas.handle_pointer(PointerEvent::Down {
            position: from,
            button: MouseButton::Left,
        });
        canvas.handle_pointer(PointerEvent::Move { position: to });
        canvas.handle_pointer(PointerEvent::Up {
            position: to,
            button: MouseButton::Left,
        });
    }

    #[test]
    fn test_pages_keep_their_own_strokes() {
        let mut canvas = Canvas::new();
        drag(&mut canvas, Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        assert_eq!(canvas.page().len(), 1);

        canvas.add_page();
        assert!(canvas.page().is_empty());
        assert_eq!(
            canvas.take_events(),
            vec![CanvasEvent::PageChanged { current: 2, total: 2 }]
        );

        canvas.prev_page();
        assert_eq!(canvas.page().len(), 1);
        assert!(canvas.undo());
        assert!(canvas.page().is_empty());

        canvas.next_page();
        assert!(canvas.page().is_empty());
        assert!(!canvas.undo());
    }

    #[test]
    fn test_clamped_navigation_emits_nothing() {
        let mut canvas = Canvas::new();
        canvas.take_events();
        canvas.prev_page();
        canvas.next_page();
        assert!(canvas.take_events().is_empty());
    }

    #[test]
    fn test_page_switch_finishes_active_drag() {
        let mut canvas = Canvas::new();
        canvas.handle_pointer(PointerEvent::Down {
            position: Point::new(0.0, 0.0),
            button: MouseButton::Left,
        });
        canvas.handle_pointer(PointerEvent::Move {
            position: Point::new(20.0, 0.0),
        });
        canvas.add_page();
        assert!(!canvas.controller().is_active());
        assert!(canvas.page().is_empty());
        canvas.prev_page();
        assert_eq!(canvas.page().len(), 1);
    }

    #[test]
    fn test_set_tool_reports_default_width() {
        let mut canvas = Canvas::new();
        canvas.take_events();
        canvas.set_tool(ToolKind::Highlighter);
        assert_eq!(
            canvas.take_events(),
            vec![
                CanvasEvent::ToolChanged(ToolKind::Highlighter),
                CanvasEvent::WidthChanged(20.0),
            ]
        );
        assert!((canvas.session().opacity() - 0.35).abs() < f64::EPSILON);
    }

    #[test]
    fn test_keys_drive_commands() {
        let mut canvas = Canvas::new();
        assert!(canvas.handle_key("3", Modifiers::default()));
        assert_eq!(canvas.session().color(), crate::tools::DEFAULT_PALETTE[2]);

        assert!(canvas.handle_key("+", Modifiers::default()));
        assert!((canvas.session().width() - 5.0).abs() < f64::EPSILON);

        assert!(!canvas.handle_key("q", Modifiers::default()));
    }

    #[test]
    fn test_scroll_adjusts_width() {
        let mut canvas = Canvas::new();
        canvas.handle_pointer(PointerEvent::Scroll {
            position: Point::ZERO,
            delta: Vec2::new(0.0, 120.0),
        });
        assert!((canvas.session().width() - 5.0).abs() < 1e-9);
        canvas.handle_pointer(PointerEvent::Scroll {
            position: Point::ZERO,
            delta: Vec2::new(0.0, -600.0),
        });
        assert!((canvas.session().width() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_repaint_flag_is_taken_once() {
        let mut canvas = Canvas::new();
        assert!(canvas.take_repaint());
        assert!(!canvas.take_repaint());
        drag(&mut canvas, Point::new(0.0, 0.0), Point::new(5.0, 5.0));
        assert!(canvas.take_repaint());
        assert!(!canvas.take_repaint());
    }

    #[test]
    fn test_background_is_per_page() {
        let mut canvas = Canvas::new();
        canvas.set_background(BackgroundKind::Dotted);
        canvas.add_page();
        canvas.set_background(BackgroundKind::Lined);
        canvas.prev_page();
        assert_eq!(canvas.page().background(), BackgroundKind::Dotted);
    }

    #[test]
    fn test_desktop_mode_toggle() {
        let mut canvas = Canvas::new();
        canvas.take_events();
        canvas.execute(Command::ToggleDesktopMode);
        assert!(canvas.session().desktop_mode());
        assert_eq!(canvas.take_events(), vec![CanvasEvent::DesktopModeChanged(true)]);
        canvas.toggle_desktop_mode();
        assert!(!canvas.session().desktop_mode());
    }
}
