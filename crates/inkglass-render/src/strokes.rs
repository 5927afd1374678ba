//! Per-tool stroke rendering.
//!
//! A stroke's tool picks one [`RenderStrategy`]; each strategy turns the
//! stroke geometry into draw-list primitives.

use crate::draw_list::{DrawList, LineStyle};
use inkglass_core::{Stroke, StrokeGeometry, ToolKind};
use kurbo::{BezPath, Ellipse, Point, Rect, Shape, Vec2};

/// Fixed nib angle of the chisel pen.
pub const CHISEL_ANGLE_DEGREES: f64 = 45.0;
/// Nib half-width as a multiple of the stroke width.
pub const CHISEL_HALF_WIDTH: f64 = 0.7;
/// Shortest arrowhead.
pub const ARROW_MIN_HEAD: f64 = 15.0;
/// Arrowhead length per unit of stroke width.
pub const ARROW_HEAD_PER_WIDTH: f64 = 4.0;
/// Angle between the shaft and each back edge of the arrowhead.
pub const ARROW_HEAD_ANGLE_DEGREES: f64 = 150.0;

const TOLERANCE: f64 = 0.1;

/// How a stroke is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStrategy {
    /// Quadratic curves through sample midpoints.
    SmoothPen,
    /// Straight polyline with flat caps.
    Highlighter,
    /// Filled quads traced by a fixed-angle nib.
    Chisel,
    Line,
    Rectangle,
    Ellipse,
    Arrow,
}

impl RenderStrategy {
    /// Strategy for a stroke, or `None` when its tool draws nothing.
    pub fn for_stroke(stroke: &Stroke) -> Option<Self> {
        match stroke.geometry() {
            StrokeGeometry::Freehand(_) => Some(match stroke.tool() {
                ToolKind::Highlighter => RenderStrategy::Highlighter,
                ToolKind::Chisel => RenderStrategy::Chisel,
                _ => RenderStrategy::SmoothPen,
            }),
            StrokeGeometry::Shape { .. } => match stroke.tool() {
                ToolKind::Line => Some(RenderStrategy::Line),
                ToolKind::Rectangle => Some(RenderStrategy::Rectangle),
                ToolKind::Circle => Some(RenderStrategy::Ellipse),
                ToolKind::Arrow => Some(RenderStrategy::Arrow),
                _ => None,
            },
        }
    }
}

/// Append the primitives for one stroke.
pub fn render_stroke(stroke: &Stroke, list: &mut DrawList) {
    let Some(strategy) = RenderStrategy::for_stroke(stroke) else {
        return;
    };
    let color = stroke.color_with_opacity();
    let width = stroke.width();

    match (strategy, stroke.geometry()) {
        (RenderStrategy::SmoothPen, StrokeGeometry::Freehand(points)) => {
            if let Some(path) = pen_path(points) {
                list.stroke(path, color, LineStyle::round(width));
            }
        }
        (RenderStrategy::Highlighter, StrokeGeometry::Freehand(points)) => {
            if let Some(path) = polyline_path(points) {
                list.stroke(path, color, LineStyle::flat(width));
            }
        }
        (RenderStrategy::Chisel, StrokeGeometry::Freehand(points)) => {
            for quad in chisel_quads(points, width) {
                list.fill(polygon(&quad), color);
            }
        }
        (RenderStrategy::Line, StrokeGeometry::Shape { start, end }) => {
            list.stroke(segment(*start, *end), color, LineStyle::round(width));
        }
        (RenderStrategy::Rectangle, StrokeGeometry::Shape { start, end }) => {
            let rect = normalized_rect(*start, *end);
            list.stroke(rect.to_path(TOLERANCE), color, LineStyle::round(width));
        }
        (RenderStrategy::Ellipse, StrokeGeometry::Shape { start, end }) => {
            let ellipse = Ellipse::from_rect(normalized_rect(*start, *end));
            list.stroke(ellipse.to_path(TOLERANCE), color, LineStyle::round(width));
        }
        (RenderStrategy::Arrow, StrokeGeometry::Shape { start, end }) => {
            list.stroke(segment(*start, *end), color, LineStyle::round(width));
            let head = polygon(&arrow_head(*start, *end, width));
            list.fill(head.clone(), color);
            list.stroke(head, color, LineStyle::round(width));
        }
        _ => {}
    }
}

/// Smoothed pen path. Two points give a straight segment; otherwise each
/// interior sample is the control point of a quadratic ending at the
/// midpoint to the next sample, and the path ends on the last sample.
pub fn pen_path(points: &[Point]) -> Option<BezPath> {
    let (first, rest) = points.split_first()?;
    let last = *rest.last()?;
    let mut path = BezPath::new();
    path.move_to(*first);
    if rest.len() > 1 {
        for pair in points[1..].windows(2) {
            path.quad_to(pair[0], pair[0].midpoint(pair[1]));
        }
    }
    path.line_to(last);
    Some(path)
}

/// Straight segments through every sample.
pub fn polyline_path(points: &[Point]) -> Option<BezPath> {
    if points.len() < 2 {
        return None;
    }
    let mut path = BezPath::new();
    path.move_to(points[0]);
    for point in &points[1..] {
        path.line_to(*point);
    }
    Some(path)
}

/// One quad per consecutive pair of samples, offset along the nib axis
/// rather than perpendicular to the segment.
pub fn chisel_quads(points: &[Point], width: f64) -> Vec<[Point; 4]> {
    let half = width * CHISEL_HALF_WIDTH;
    let angle = CHISEL_ANGLE_DEGREES.to_radians();
    let nib = Vec2::new(angle.cos() * half, angle.sin() * half);
    points
        .windows(2)
        .map(|pair| {
            let (p1, p2) = (pair[0], pair[1]);
            [p1 - nib, p1 + nib, p2 + nib, p2 - nib]
        })
        .collect()
}

/// Axis-aligned box spanned by two corners, whatever the drag direction.
pub fn normalized_rect(start: Point, end: Point) -> Rect {
    Rect::from_points(start, end)
}

/// Arrowhead triangle `[tip, back_left, back_right]` at `end`.
pub fn arrow_head(start: Point, end: Point, width: f64) -> [Point; 3] {
    let angle = (end.y - start.y).atan2(end.x - start.x);
    let length = ARROW_MIN_HEAD.max(width * ARROW_HEAD_PER_WIDTH);
    let spread = ARROW_HEAD_ANGLE_DEGREES.to_radians();
    let back = |a: f64| end + Vec2::from_angle(a) * length;
    [end, back(angle + spread), back(angle - spread)]
}

fn segment(start: Point, end: Point) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(start);
    path.line_to(end);
    path
}

fn polygon(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    if let Some((first, rest)) = points.split_first() {
        path.move_to(*first);
        for point in rest {
            path.line_to(*point);
        }
        path.close_path();
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw_list::Primitive;
    use inkglass_core::StrokeColor;
    use kurbo::{Cap, Join, PathEl};

    fn close(a: Point, b: Point) -> bool {
        (a - b).hypot() < 1e-9
    }

    fn freehand(points: Vec<Point>, tool: ToolKind, width: f64) -> Stroke {
        Stroke::freehand(points, StrokeColor::DEFAULT, 1.0, width, tool).unwrap()
    }

    #[test]
    fn test_strategy_per_tool() {
        let pts = vec![Point::ZERO, Point::new(1.0, 1.0)];
        let pen = freehand(pts.clone(), ToolKind::Pen, 3.0);
        let hl = freehand(pts.clone(), ToolKind::Highlighter, 3.0);
        let chisel = freehand(pts, ToolKind::Chisel, 3.0);
        assert_eq!(RenderStrategy::for_stroke(&pen), Some(RenderStrategy::SmoothPen));
        assert_eq!(RenderStrategy::for_stroke(&hl), Some(RenderStrategy::Highlighter));
        assert_eq!(RenderStrategy::for_stroke(&chisel), Some(RenderStrategy::Chisel));

        let circle = Stroke::shape(
            Point::ZERO,
            Point::new(5.0, 5.0),
            StrokeColor::DEFAULT,
            1.0,
            3.0,
            ToolKind::Circle,
        );
        assert_eq!(RenderStrategy::for_stroke(&circle), Some(RenderStrategy::Ellipse));
    }

    #[test]
    fn test_pen_two_points_is_straight() {
        let path = pen_path(&[Point::ZERO, Point::new(10.0, 0.0)]).unwrap();
        assert_eq!(
            path.elements(),
            &[PathEl::MoveTo(Point::ZERO), PathEl::LineTo(Point::new(10.0, 0.0))]
        );
    }

    #[test]
    fn test_pen_quads_through_midpoints() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(20.0, 10.0),
            Point::new(30.0, 10.0),
        ];
        let path = pen_path(&pts).unwrap();
        assert_eq!(
            path.elements(),
            &[
                PathEl::MoveTo(pts[0]),
                PathEl::QuadTo(pts[1], Point::new(15.0, 5.0)),
                PathEl::QuadTo(pts[2], Point::new(25.0, 10.0)),
                PathEl::LineTo(pts[3]),
            ]
        );
        assert!(pen_path(&pts[..1]).is_none());
    }

    #[test]
    fn test_highlighter_is_flat_polyline() {
        let stroke = freehand(
            vec![Point::ZERO, Point::new(5.0, 0.0), Point::new(5.0, 5.0)],
            ToolKind::Highlighter,
            20.0,
        );
        let mut list = DrawList::new();
        render_stroke(&stroke, &mut list);
        match &list.primitives()[0] {
            Primitive::Stroke { path, style, .. } => {
                assert_eq!(style.cap, Cap::Butt);
                assert_eq!(style.join, Join::Bevel);
                assert!(path.elements().iter().all(|el| !matches!(el, PathEl::QuadTo(..))));
                assert_eq!(path.elements().len(), 3);
            }
            other => panic!("expected stroke, got {other:?}"),
        }
    }

    fn shape_path(tool: ToolKind, start: Point, end: Point) -> BezPath {
        let stroke = Stroke::shape(start, end, StrokeColor::DEFAULT, 1.0, 3.0, tool);
        let mut list = DrawList::new();
        render_stroke(&stroke, &mut list);
        match &list.primitives()[0] {
            Primitive::Stroke { path, .. } => path.clone(),
            other => panic!("expected stroke, got {other:?}"),
        }
    }

    #[test]
    fn test_box_shapes_ignore_drag_direction() {
        let a = Point::new(50.0, 50.0);
        let b = Point::new(200.0, 200.0);
        for tool in [ToolKind::Rectangle, ToolKind::Circle] {
            let forward = shape_path(tool, a, b);
            let backward = shape_path(tool, b, a);
            assert_eq!(forward.elements(), backward.elements(), "{tool:?}");
        }
        let bbox = shape_path(ToolKind::Rectangle, b, a).bounding_box();
        assert!(close(Point::new(bbox.x0, bbox.y0), a));
        assert!(close(Point::new(bbox.x1, bbox.y1), b));
    }

    #[test]
    fn test_chisel_nib_ignores_direction() {
        let quads = chisel_quads(
            &[Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)],
            10.0,
        );
        assert_eq!(quads.len(), 2);
        let d = 45f64.to_radians().cos() * 7.0;
        assert!(close(quads[0][0], Point::new(-d, -d)));
        assert!(close(quads[0][1], Point::new(d, d)));
        assert!(close(quads[0][2], Point::new(10.0 + d, d)));
        assert!(close(quads[0][3], Point::new(10.0 - d, -d)));
        // Same offset on the vertical segment.
        assert!(close(quads[1][1] - Point::new(10.0, 0.0).to_vec2(), Point::new(d, d)));
    }

    #[test]
    fn test_chisel_renders_filled_quads() {
        let stroke = freehand(
            vec![Point::ZERO, Point::new(4.0, 0.0), Point::new(8.0, 3.0)],
            ToolKind::Chisel,
            8.0,
        );
        let mut list = DrawList::new();
        render_stroke(&stroke, &mut list);
        assert_eq!(list.len(), 2);
        assert!(list.iter().all(|p| matches!(p, Primitive::Fill { .. })));
    }

    #[test]
    fn test_normalized_rect_any_direction() {
        let a = normalized_rect(Point::new(200.0, 200.0), Point::new(50.0, 50.0));
        let b = normalized_rect(Point::new(50.0, 50.0), Point::new(200.0, 200.0));
        assert_eq!(a, Rect::new(50.0, 50.0, 200.0, 200.0));
        assert_eq!(a, b);
    }

    #[test]
    fn test_arrow_head_geometry() {
        let end = Point::new(100.0, 0.0);
        let [tip, left, right] = arrow_head(Point::ZERO, end, 5.0);
        assert_eq!(tip, end);
        assert!(((left - end).hypot() - 20.0).abs() < 1e-9);
        assert!(((right - end).hypot() - 20.0).abs() < 1e-9);
        assert!(((left - end).atan2().to_degrees() - 150.0).abs() < 1e-9);
        assert!(((right - end).atan2().to_degrees() + 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_arrow_head_minimum_length() {
        let end = Point::new(0.0, 50.0);
        let [_, left, _] = arrow_head(Point::ZERO, end, 1.0);
        assert!(((left - end).hypot() - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_arrow_draws_shaft_and_head() {
        let arrow = Stroke::shape(
            Point::ZERO,
            Point::new(100.0, 0.0),
            StrokeColor::DEFAULT,
            1.0,
            5.0,
            ToolKind::Arrow,
        );
        let mut list = DrawList::new();
        render_stroke(&arrow, &mut list);
        assert_eq!(list.len(), 3);
        assert!(matches!(list.primitives()[1], Primitive::Fill { .. }));
    }
}
