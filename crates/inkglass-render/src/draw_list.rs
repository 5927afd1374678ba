//! Backend-independent drawing primitives.
//!
//! Everything the overlay paints goes through a [`DrawList`] first, so the
//! geometry of a frame can be inspected without a GPU.

use kurbo::{BezPath, Cap, Join, PathEl, Point};
use peniko::Color;

/// Outline settings for a stroked path.
#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    pub width: f64,
    pub cap: Cap,
    pub join: Join,
    /// Dash pattern in path units. Empty for a solid line.
    pub dash: Vec<f64>,
}

impl LineStyle {
    /// Solid line with butt caps and miter joins.
    pub fn new(width: f64) -> Self {
        Self {
            width,
            cap: Cap::Butt,
            join: Join::Miter,
            dash: Vec::new(),
        }
    }

    /// Solid line with round caps and joins.
    pub fn round(width: f64) -> Self {
        Self {
            cap: Cap::Round,
            join: Join::Round,
            ..Self::new(width)
        }
    }

    /// Solid line with flat caps and bevel joins.
    pub fn flat(width: f64) -> Self {
        Self {
            cap: Cap::Butt,
            join: Join::Bevel,
            ..Self::new(width)
        }
    }

    pub fn with_dashes(mut self, dash: &[f64]) -> Self {
        self.dash = dash.to_vec();
        self
    }

    pub fn is_dashed(&self) -> bool {
        !self.dash.is_empty()
    }

    /// Convert to a kurbo stroke for encoding.
    pub fn to_stroke(&self) -> kurbo::Stroke {
        kurbo::Stroke::new(self.width)
            .with_caps(self.cap)
            .with_join(self.join)
            .with_dashes(0.0, &self.dash)
    }
}

/// One paint operation.
#[derive(Debug, Clone)]
pub enum Primitive {
    /// Outline a path.
    Stroke {
        path: BezPath,
        color: Color,
        style: LineStyle,
    },
    /// Fill a path with the non-zero rule.
    Fill { path: BezPath, color: Color },
    /// Single-line text centered on `anchor`.
    Label {
        text: String,
        anchor: Point,
        size: f32,
        color: Color,
    },
}

impl Primitive {
    /// Number of subpaths in this primitive's path (zero for labels).
    pub fn subpath_count(&self) -> usize {
        match self {
            Primitive::Stroke { path, .. } | Primitive::Fill { path, .. } => path
                .elements()
                .iter()
                .filter(|el| matches!(el, PathEl::MoveTo(_)))
                .count(),
            Primitive::Label { .. } => 0,
        }
    }
}

/// Primitives in paint order.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    items: Vec<Primitive>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.items.push(primitive);
    }

    pub fn stroke(&mut self, path: BezPath, color: Color, style: LineStyle) {
        self.push(Primitive::Stroke { path, color, style });
    }

    pub fn fill(&mut self, path: BezPath, color: Color) {
        self.push(Primitive::Fill { path, color });
    }

    pub fn label(&mut self, text: impl Into<String>, anchor: Point, size: f32, color: Color) {
        self.push(Primitive::Label {
            text: text.into(),
            anchor,
            size,
            color,
        });
    }

    /// Append all primitives of `other` after this list's.
    pub fn append(&mut self, other: DrawList) {
        self.items.extend(other.items);
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &Primitive> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a DrawList {
    type Item = &'a Primitive;
    type IntoIter = std::slice::Iter<'a, Primitive>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_style_presets() {
        let round = LineStyle::round(4.0);
        assert_eq!(round.cap, Cap::Round);
        assert_eq!(round.join, Join::Round);
        assert!(!round.is_dashed());

        let flat = LineStyle::flat(20.0);
        assert_eq!(flat.cap, Cap::Butt);
        assert_eq!(flat.join, Join::Bevel);
    }

    #[test]
    fn test_to_stroke_carries_dashes() {
        let stroke = LineStyle::new(1.5).with_dashes(&[6.0, 3.0]).to_stroke();
        assert_eq!(stroke.width, 1.5);
        assert_eq!(stroke.dash_pattern.as_slice(), &[6.0, 3.0]);
    }

    #[test]
    fn test_subpath_count() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((1.0, 0.0));
        path.move_to((0.0, 1.0));
        path.line_to((1.0, 1.0));
        let mut list = DrawList::new();
        list.stroke(path, Color::BLACK, LineStyle::new(1.0));
        list.label("1 / 2", Point::ZERO, 11.0, Color::WHITE);
        assert_eq!(list.len(), 2);
        assert_eq!(list.primitives()[0].subpath_count(), 2);
        assert_eq!(list.primitives()[1].subpath_count(), 0);
    }
}
