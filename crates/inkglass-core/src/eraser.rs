//! Proximity hit-testing for the stroke eraser.
//!
//! Erasing always removes whole strokes. Shapes use a coarse test against
//! the midpoint of their two corners; freehand strokes are hit when any
//! sample lies inside the eraser radius.

use crate::stroke::{Stroke, StrokeGeometry};
use kurbo::Point;

/// Whether an erase at `point` with `radius` removes `stroke`.
pub fn stroke_hit(stroke: &Stroke, point: Point, radius: f64) -> bool {
    match stroke.geometry() {
        StrokeGeometry::Shape { start, end } => {
            start.midpoint(*end).distance(point) <= radius * 2.0
        }
        StrokeGeometry::Freehand(points) => points.iter().any(|p| p.distance(point) < radius),
    }
}

/// Strokes that survive an erase, or `None` when nothing was hit.
pub fn surviving_strokes(strokes: &[Stroke], point: Point, radius: f64) -> Option<Vec<Stroke>> {
    if !strokes.iter().any(|s| stroke_hit(s, point, radius)) {
        return None;
    }
    Some(
        strokes
            .iter()
            .filter(|s| !stroke_hit(s, point, radius))
            .cloned()
            .collect(),
    )
}
