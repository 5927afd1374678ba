//! Vello-based renderer implementation.

use crate::draw_list::{DrawList, Primitive};
use crate::frame::build_frame;
use crate::renderer::{RenderContext, Renderer};
use kurbo::{Affine, Point};
use parley::layout::PositionedLayoutItem;
use parley::{FontContext, LayoutContext, StyleProperty};
use peniko::{Brush, Color, Fill};
use vello::Scene;

/// Vello-based renderer for GPU-accelerated 2D graphics.
pub struct VelloRenderer {
    /// The Vello scene being built.
    scene: Scene,
    /// Font context backed by the system font collection.
    font_cx: FontContext,
    /// Layout context for text rendering.
    layout_cx: LayoutContext<Brush>,
}

impl Default for VelloRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloRenderer {
    /// Create a new Vello renderer.
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            font_cx: FontContext::new(),
            layout_cx: LayoutContext::new(),
        }
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    /// Encode a draw list on top of the current scene.
    pub fn encode(&mut self, list: &DrawList, transform: Affine) {
        for primitive in list {
            match primitive {
                Primitive::Fill { path, color } => {
                    self.scene.fill(Fill::NonZero, transform, *color, None, path);
                }
                Primitive::Stroke { path, color, style } => {
                    self.scene
                        .stroke(&style.to_stroke(), transform, *color, None, path);
                }
                Primitive::Label {
                    text,
                    anchor,
                    size,
                    color,
                } => self.render_label(text, *anchor, *size, *color, transform),
            }
        }
    }

    /// Lay out one line of text and center it on `anchor`.
    fn render_label(&mut self, text: &str, anchor: Point, size: f32, color: Color, transform: Affine) {
        if text.is_empty() {
            return;
        }
        let brush = Brush::Solid(color);

        let mut builder = self.layout_cx.ranged_builder(&mut self.font_cx, text, 1.0, false);
        builder.push_default(StyleProperty::FontSize(size));
        builder.push_default(StyleProperty::Brush(brush.clone()));
        builder.push_default(StyleProperty::FontFamily(parley::FontFamily::Source(
            "system-ui, sans-serif".into(),
        )));
        let mut layout = builder.build(text);
        layout.break_all_lines(None);
        layout.align(None, parley::Alignment::Start, parley::AlignmentOptions::default());

        let origin = Point::new(
            anchor.x - f64::from(layout.width()) / 2.0,
            anchor.y - f64::from(layout.height()) / 2.0,
        );
        let text_transform = transform * Affine::translate(origin.to_vec2());

        let mut drawn = false;
        for line in layout.lines() {
            for item in line.items() {
                let PositionedLayoutItem::GlyphRun(glyph_run) = item else {
                    continue;
                };
                let mut x = glyph_run.offset();
                let y = glyph_run.baseline();
                let run = glyph_run.run();
                let glyphs: Vec<vello::Glyph> = glyph_run
                    .glyphs()
                    .map(|glyph| {
                        let gx = x + glyph.x;
                        let gy = y - glyph.y;
                        x += glyph.advance;
                        vello::Glyph {
                            id: glyph.id,
                            x: gx,
                            y: gy,
                        }
                    })
                    .collect();
                if glyphs.is_empty() {
                    continue;
                }
                drawn = true;
                self.scene
                    .draw_glyphs(run.font())
                    .brush(&brush)
                    .hint(true)
                    .transform(text_transform)
                    .font_size(run.font_size())
                    .normalized_coords(run.normalized_coords())
                    .draw(Fill::NonZero, glyphs.into_iter());
            }
        }
        if !drawn {
            log::warn!("No system font could render {text:?}");
        }
    }
}

impl Renderer for VelloRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.scene.reset();
        let list = build_frame(ctx);
        self.encode(&list, Affine::scale(ctx.scale_factor));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkglass_core::{BackgroundKind, Canvas};
    use kurbo::Size;

    #[test]
    fn test_renderer_creation() {
        let renderer = VelloRenderer::new();
        assert!(renderer.scene().encoding().is_empty());
    }

    #[test]
    fn test_build_scene_encodes_background() {
        let mut renderer = VelloRenderer::new();
        let mut canvas = Canvas::new();
        canvas.set_background(BackgroundKind::Grid);
        let ctx = RenderContext::new(&canvas, Size::new(800.0, 600.0));

        renderer.build_scene(&ctx);
        assert!(!renderer.scene().encoding().is_empty());
    }

    #[test]
    fn test_take_scene_leaves_empty_scene() {
        let mut renderer = VelloRenderer::new();
        let canvas = Canvas::new();
        renderer.build_scene(&RenderContext::new(&canvas, Size::new(100.0, 100.0)));
        let scene = renderer.take_scene();
        assert!(!scene.encoding().is_empty());
        assert!(renderer.scene().encoding().is_empty());
    }
}
