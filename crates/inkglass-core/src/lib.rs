//! InkGlass Core Library
//!
//! Platform-agnostic drawing and paging engine for the InkGlass overlay:
//! strokes, pages with history, the pointer state machine, the eraser and
//! keyboard shortcut resolution. Nothing here touches a window or a GPU.

pub mod canvas;
pub mod controller;
pub mod document;
pub mod eraser;
pub mod input;
pub mod page;
pub mod shortcuts;
pub mod stroke;
pub mod tools;

pub use canvas::{Canvas, CanvasEvent};
pub use controller::{InputController, Interaction, ShapeDrag};
pub use document::{Document, PageChanged};
pub use input::{Modifiers, MouseButton, PointerEvent};
pub use page::{BackgroundKind, Page};
pub use shortcuts::{Command, Shortcut, ShortcutRegistry};
pub use stroke::{InProgressStroke, Stroke, StrokeColor, StrokeGeometry, StrokeId};
pub use tools::{DrawingSession, ToolDefaults, ToolKind, DEFAULT_PALETTE};
