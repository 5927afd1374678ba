//! Tools and the drawing session that holds the live tool settings.

use crate::stroke::{StrokeColor, clamp_opacity, clamp_width};
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Pen,
    Highlighter,
    Chisel,
    Eraser,
    Line,
    Rectangle,
    Circle,
    Arrow,
    /// Lets pointer input pass through to the desktop.
    Cursor,
}

impl ToolKind {
    /// All tools in toolbar order.
    pub const ALL: [ToolKind; 9] = [
        ToolKind::Pen,
        ToolKind::Highlighter,
        ToolKind::Chisel,
        ToolKind::Eraser,
        ToolKind::Line,
        ToolKind::Rectangle,
        ToolKind::Circle,
        ToolKind::Arrow,
        ToolKind::Cursor,
    ];

    /// Tools that lay down a sampled point trail.
    pub fn is_freehand(self) -> bool {
        matches!(self, ToolKind::Pen | ToolKind::Highlighter | ToolKind::Chisel)
    }

    /// Tools that lay down a two-point shape.
    pub fn is_shape(self) -> bool {
        matches!(
            self,
            ToolKind::Line | ToolKind::Rectangle | ToolKind::Circle | ToolKind::Arrow
        )
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Pen => "Pen",
            ToolKind::Highlighter => "Highlighter",
            ToolKind::Chisel => "Chisel",
            ToolKind::Eraser => "Eraser",
            ToolKind::Line => "Line",
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Circle => "Circle",
            ToolKind::Arrow => "Arrow",
            ToolKind::Cursor => "Cursor",
        }
    }

    /// Uppercase letter that selects the tool from the keyboard.
    pub fn shortcut_letter(self) -> &'static str {
        match self {
            ToolKind::Pen => "P",
            ToolKind::Highlighter => "H",
            ToolKind::Chisel => "C",
            ToolKind::Eraser => "E",
            ToolKind::Line => "L",
            ToolKind::Rectangle => "R",
            ToolKind::Circle => "O",
            ToolKind::Arrow => "A",
            ToolKind::Cursor => "V",
        }
    }

    /// Tool selected by `letter`, in either case.
    pub fn from_shortcut_letter(letter: char) -> Option<ToolKind> {
        ToolKind::ALL.into_iter().find(|tool| {
            tool.shortcut_letter()
                .chars()
                .eq(std::iter::once(letter.to_ascii_uppercase()))
        })
    }

    /// Width and opacity applied when the tool is selected.
    pub fn defaults(self) -> ToolDefaults {
        match self {
            ToolKind::Highlighter => ToolDefaults::new(20.0, 0.35),
            ToolKind::Chisel => ToolDefaults::new(8.0, 1.0),
            ToolKind::Eraser => ToolDefaults::new(25.0, 1.0),
            _ => ToolDefaults::new(3.0, 1.0),
        }
    }
}

/// Per-tool starting width and opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolDefaults {
    pub width: f64,
    pub opacity: f64,
}

impl ToolDefaults {
    pub const fn new(width: f64, opacity: f64) -> Self {
        Self { width, opacity }
    }
}

/// Quick-select ink colors. Number keys 1-9 pick the first nine.
pub const DEFAULT_PALETTE: [StrokeColor; 10] = [
    StrokeColor::rgb(0x1a, 0x1a, 0x2e),
    StrokeColor::rgb(0xe9, 0x45, 0x60),
    StrokeColor::rgb(0x0f, 0x34, 0x60),
    StrokeColor::rgb(0x16, 0xc7, 0x9a),
    StrokeColor::rgb(0xf5, 0xa6, 0x23),
    StrokeColor::rgb(0x8b, 0x5c, 0xf6),
    StrokeColor::rgb(0xff, 0xff, 0xff),
    StrokeColor::rgb(0xf4, 0x72, 0xb6),
    StrokeColor::rgb(0x06, 0xb6, 0xd4),
    StrokeColor::rgb(0x84, 0xcc, 0x16),
];

/// Live drawing settings shared by the input controller and the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingSession {
    tool: ToolKind,
    color: StrokeColor,
    width: f64,
    opacity: f64,
    desktop_mode: bool,
}

impl Default for DrawingSession {
    fn default() -> Self {
        let tool = ToolKind::default();
        let defaults = tool.defaults();
        Self {
            tool,
            color: StrokeColor::DEFAULT,
            width: defaults.width,
            opacity: defaults.opacity,
            desktop_mode: false,
        }
    }
}

impl DrawingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn color(&self) -> StrokeColor {
        self.color
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Whether the overlay lets pointer input fall through to the desktop.
    pub fn desktop_mode(&self) -> bool {
        self.desktop_mode
    }

    /// Switch tools and reset width and opacity to the tool's defaults.
    pub fn set_tool(&mut self, tool: ToolKind) {
        let defaults = tool.defaults();
        self.tool = tool;
        self.width = defaults.width;
        self.opacity = defaults.opacity;
    }

    pub fn set_color(&mut self, color: StrokeColor) {
        self.color = color;
    }

    pub fn set_width(&mut self, width: f64) {
        self.width = clamp_width(width);
    }

    /// Nudge the width by `delta`, clamped.
    pub fn adjust_width(&mut self, delta: f64) {
        self.set_width(self.width + delta);
    }

    pub fn set_opacity(&mut self, opacity: f64) {
        self.opacity = clamp_opacity(opacity);
    }

    pub fn set_desktop_mode(&mut self, enabled: bool) {
        self.desktop_mode = enabled;
    }

    /// Select a palette color by index. Out-of-range indices are ignored.
    pub fn quick_color(&mut self, index: usize) -> Option<StrokeColor> {
        let color = *DEFAULT_PALETTE.get(index)?;
        self.color = color;
        Some(color)
    }
}
