//! InkGlass Render Library
//!
//! Turns canvas state into a backend-independent draw list and encodes it
//! for the GPU. The default backend uses Vello.

pub mod background;
pub mod draw_list;
mod frame;
mod renderer;
pub mod strokes;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use draw_list::{DrawList, LineStyle, Primitive};
pub use frame::{build_frame, PAGE_LABEL_SIZE, PREVIEW_OPACITY};
pub use renderer::{RenderContext, RenderResult, Renderer, RendererError};
pub use strokes::{render_stroke, RenderStrategy};

#[cfg(feature = "vello-renderer")]
pub use vello_impl::VelloRenderer;
