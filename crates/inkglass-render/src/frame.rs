//! Frame assembly: everything visible on the overlay, bottom to top.

use crate::background::{background_primitives, hit_shim_primitive};
use crate::draw_list::{DrawList, LineStyle};
use crate::renderer::RenderContext;
use crate::strokes::render_stroke;
use inkglass_core::{BackgroundKind, Canvas, Stroke, StrokeGeometry, ToolKind};
use kurbo::{Circle, Point, Rect, RoundedRect, Shape};
use peniko::Color;

/// Opacity multiplier for a shape still being dragged out.
pub const PREVIEW_OPACITY: f64 = 0.6;

/// Font size of the page indicator label.
pub const PAGE_LABEL_SIZE: f32 = 11.0;

const ERASER_RING: Color = Color::from_rgba8(200, 200, 200, 150);
const ERASER_RING_WIDTH: f64 = 1.5;
const PAGE_PILL: Color = Color::from_rgba8(0, 0, 0, 120);
/// Horizontal and vertical padding around the page label.
const PAGE_PILL_PADDING: (f64, f64) = (20.0, 10.0);
/// Gap between the page pill and the bottom edge.
const PAGE_PILL_MARGIN: f64 = 10.0;
/// Approximate glyph advance and line height, in ems.
const LABEL_ADVANCE: f64 = 0.6;
const LABEL_LINE_HEIGHT: f64 = 1.3;

const TOLERANCE: f64 = 0.1;

/// Build the draw list for the active page.
pub fn build_frame(ctx: &RenderContext) -> DrawList {
    let canvas = ctx.canvas;
    let page = canvas.page();
    let rect = ctx.surface_rect();
    let mut list = DrawList::new();

    if page.background() == BackgroundKind::None {
        list.push(hit_shim_primitive(rect));
    }
    list.append(background_primitives(rect, page.background()));

    for stroke in page.strokes() {
        render_stroke(stroke, &mut list);
    }

    if let Some(stroke) = canvas.controller().in_progress().and_then(|s| s.preview()) {
        render_stroke(&stroke, &mut list);
    }

    if let Some(preview) = shape_preview(canvas) {
        render_stroke(&preview, &mut list);
    }

    if let Some(center) = eraser_indicator(canvas) {
        let ring = Circle::new(center, canvas.session().width());
        let style = LineStyle::new(ERASER_RING_WIDTH)
            .with_dashes(&[4.0 * ERASER_RING_WIDTH, 2.0 * ERASER_RING_WIDTH]);
        list.stroke(ring.to_path(TOLERANCE), ERASER_RING, style);
    }

    let document = canvas.document();
    if document.page_count() > 1 {
        let position = document.position();
        page_indicator(
            &mut list,
            rect,
            &format!("{} / {}", position.current, position.total),
        );
    }

    list
}

/// The dragged shape drawn with live settings at reduced opacity.
fn shape_preview(canvas: &Canvas) -> Option<Stroke> {
    let drag = canvas.controller().shape_preview()?;
    let session = canvas.session();
    Some(Stroke::preview(
        StrokeGeometry::Shape {
            start: drag.start,
            end: drag.end,
        },
        session.color(),
        session.opacity() * PREVIEW_OPACITY,
        session.width(),
        drag.tool,
    ))
}

fn eraser_indicator(canvas: &Canvas) -> Option<Point> {
    let session = canvas.session();
    if session.tool() != ToolKind::Eraser || session.desktop_mode() {
        return None;
    }
    canvas.controller().pointer_position()
}

/// Rounded pill centered at the bottom with the label on top.
fn page_indicator(list: &mut DrawList, rect: Rect, text: &str) {
    let size = f64::from(PAGE_LABEL_SIZE);
    let width = text.chars().count() as f64 * size * LABEL_ADVANCE + PAGE_PILL_PADDING.0;
    let height = size * LABEL_LINE_HEIGHT + PAGE_PILL_PADDING.1;
    let x = rect.center().x - width / 2.0;
    let y = rect.y1 - height - PAGE_PILL_MARGIN;
    let pill = RoundedRect::new(x, y, x + width, y + height, height / 2.0);

    list.fill(pill.to_path(TOLERANCE), PAGE_PILL);
    list.label(text, pill.center(), PAGE_LABEL_SIZE, Color::WHITE);
}
