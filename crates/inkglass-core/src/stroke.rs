//! Stroke model: committed marks and the stroke under construction.

use crate::tools::{DrawingSession, ToolKind};
use kurbo::Point;
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for strokes.
pub type StrokeId = Uuid;

/// Thinnest allowed stroke width.
pub const MIN_WIDTH: f64 = 1.0;
/// Widest allowed stroke width.
pub const MAX_WIDTH: f64 = 80.0;

/// Share of the previous sample kept when a raw pointer position arrives.
pub const SMOOTHING_FACTOR: f64 = 0.3;

/// Clamp a stroke width into `[MIN_WIDTH, MAX_WIDTH]`.
pub fn clamp_width(width: f64) -> f64 {
    if width.is_nan() {
        return MIN_WIDTH;
    }
    width.clamp(MIN_WIDTH, MAX_WIDTH)
}

/// Clamp an opacity into `[0, 1]`.
pub fn clamp_opacity(opacity: f64) -> f64 {
    if opacity.is_nan() {
        return 1.0;
    }
    opacity.clamp(0.0, 1.0)
}

/// Errors produced when parsing a `#rrggbb` color.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("Color must start with '#': {0}")]
    MissingHash(String),
    #[error("Expected 6 hex digits, got {0}")]
    InvalidLength(usize),
    #[error("Invalid hex digits in color: {0}")]
    InvalidHex(String),
}

/// Opaque RGB stroke color. Opacity is carried separately by strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StrokeColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl StrokeColor {
    /// Ink color used when nothing else was chosen (`#1a1a2e`).
    pub const DEFAULT: Self = Self::rgb(0x1a, 0x1a, 0x2e);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Format as `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Combine with an opacity in `[0, 1]` into a paint color.
    pub fn with_opacity(self, opacity: f64) -> Color {
        let alpha = (clamp_opacity(opacity) * 255.0).round() as u8;
        Color::from_rgba8(self.r, self.g, self.b, alpha)
    }
}

impl Default for StrokeColor {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for StrokeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for StrokeColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(s.to_string()))?;
        if hex.len() != 6 {
            return Err(ColorParseError::InvalidLength(hex.len()));
        }
        let channel = |range: std::ops::Range<usize>| {
            hex.get(range)
                .and_then(|digits| u8::from_str_radix(digits, 16).ok())
                .ok_or_else(|| ColorParseError::InvalidHex(s.to_string()))
        };
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl TryFrom<String> for StrokeColor {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StrokeColor> for String {
    fn from(color: StrokeColor) -> Self {
        color.to_hex()
    }
}

/// What a stroke is made of. A stroke is either a point trail or a
/// parametrized shape, never both.
#[derive(Debug, Clone, PartialEq)]
pub enum StrokeGeometry {
    /// Sampled pointer trail (at least two points once committed).
    Freehand(Vec<Point>),
    /// Shape spanned by the press and release positions.
    Shape { start: Point, end: Point },
}

/// A committed mark on a page. Strokes are immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    id: StrokeId,
    geometry: StrokeGeometry,
    color: StrokeColor,
    opacity: f64,
    width: f64,
    tool: ToolKind,
}

impl Stroke {
    /// Build a freehand stroke. Returns `None` for fewer than two points.
    pub fn freehand(
        points: Vec<Point>,
        color: StrokeColor,
        opacity: f64,
        width: f64,
        tool: ToolKind,
    ) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        Some(Self::build(
            Uuid::new_v4(),
            StrokeGeometry::Freehand(points),
            color,
            opacity,
            width,
            tool,
        ))
    }

    /// Build a shape stroke from its two defining corners.
    pub fn shape(
        start: Point,
        end: Point,
        color: StrokeColor,
        opacity: f64,
        width: f64,
        tool: ToolKind,
    ) -> Self {
        Self::build(
            Uuid::new_v4(),
            StrokeGeometry::Shape { start, end },
            color,
            opacity,
            width,
            tool,
        )
    }

    /// Transient stroke used only for drawing previews (nil id).
    pub fn preview(
        geometry: StrokeGeometry,
        color: StrokeColor,
        opacity: f64,
        width: f64,
        tool: ToolKind,
    ) -> Self {
        Self::build(Uuid::nil(), geometry, color, opacity, width, tool)
    }

    fn build(
        id: StrokeId,
        geometry: StrokeGeometry,
        color: StrokeColor,
        opacity: f64,
        width: f64,
        tool: ToolKind,
    ) -> Self {
        Self {
            id,
            geometry,
            color,
            opacity: clamp_opacity(opacity),
            width: clamp_width(width),
            tool,
        }
    }

    pub fn id(&self) -> StrokeId {
        self.id
    }

    pub fn geometry(&self) -> &StrokeGeometry {
        &self.geometry
    }

    pub fn color(&self) -> StrokeColor {
        self.color
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    /// Sample points of a freehand stroke (empty for shapes).
    pub fn points(&self) -> &[Point] {
        match &self.geometry {
            StrokeGeometry::Freehand(points) => points,
            StrokeGeometry::Shape { .. } => &[],
        }
    }

    /// Start and end of a shape stroke.
    pub fn endpoints(&self) -> Option<(Point, Point)> {
        match self.geometry {
            StrokeGeometry::Shape { start, end } => Some((start, end)),
            StrokeGeometry::Freehand(_) => None,
        }
    }

    pub fn is_shape(&self) -> bool {
        matches!(self.geometry, StrokeGeometry::Shape { .. })
    }

    /// Color with this stroke's opacity folded into the alpha channel.
    pub fn color_with_opacity(&self) -> Color {
        self.color.with_opacity(self.opacity)
    }
}

/// The freehand stroke currently following the pointer.
///
/// Color, width, opacity and tool are captured by value when the stroke
/// begins, so later session changes never alter it.
#[derive(Debug, Clone, PartialEq)]
pub struct InProgressStroke {
    points: Vec<Point>,
    color: StrokeColor,
    opacity: f64,
    width: f64,
    tool: ToolKind,
}

impl InProgressStroke {
    /// Start a stroke at the pointer-down position.
    pub fn begin(start: Point, session: &DrawingSession) -> Self {
        Self {
            points: vec![start],
            color: session.color(),
            opacity: session.opacity(),
            width: session.width(),
            tool: session.tool(),
        }
    }

    /// Append a low-pass filtered sample, moving 70% of the way from the last
    /// stored point toward `raw`. Returns the stored point.
    pub fn push_smoothed(&mut self, raw: Point) -> Point {
        let smoothed = match self.points.last() {
            Some(prev) => prev.lerp(raw, 1.0 - SMOOTHING_FACTOR),
            None => raw,
        };
        self.points.push(smoothed);
        smoothed
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    /// Snapshot for rendering. `None` until there are two points.
    pub fn preview(&self) -> Option<Stroke> {
        if self.points.len() < 2 {
            return None;
        }
        Some(Stroke::preview(
            StrokeGeometry::Freehand(self.points.clone()),
            self.color,
            self.opacity,
            self.width,
            self.tool,
        ))
    }

    /// Turn into a committed stroke, or `None` when too short to keep.
    pub fn finish(self) -> Option<Stroke> {
        Stroke::freehand(self.points, self.color, self.opacity, self.width, self.tool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> DrawingSession {
        DrawingSession::default()
    }

    #[test]
    fn test_width_clamping() {
        assert!((clamp_width(0.2) - MIN_WIDTH).abs() < f64::EPSILON);
        assert!((clamp_width(500.0) - MAX_WIDTH).abs() < f64::EPSILON);
        assert!((clamp_width(12.5) - 12.5).abs() < f64::EPSILON);
        assert!((clamp_width(f64::NAN) - MIN_WIDTH).abs() < f64::EPSILON);
    }

    #[test]
    fn test_freehand_needs_two_points() {
        let one = Stroke::freehand(
            vec![Point::new(1.0, 1.0)],
            StrokeColor::DEFAULT,
            1.0,
            3.0,
            ToolKind::Pen,
        );
        assert!(one.is_none());

        let two = Stroke::freehand(
            vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0)],
            StrokeColor::DEFAULT,
            1.0,
            3.0,
            ToolKind::Pen,
        );
        assert!(two.is_some());
    }

    #[test]
    fn test_stroke_width_is_clamped_on_build() {
        let stroke = Stroke::shape(
            Point::ZERO,
            Point::new(10.0, 10.0),
            StrokeColor::DEFAULT,
            1.0,
            200.0,
            ToolKind::Line,
        );
        assert!((stroke.width() - MAX_WIDTH).abs() < f64::EPSILON);
        assert!(stroke.is_shape());
        assert!(stroke.points().is_empty());
    }

    #[test]
    fn test_smoothing_moves_seventy_percent() {
        let mut stroke = InProgressStroke::begin(Point::new(0.0, 0.0), &session());
        let p = stroke.push_smoothed(Point::new(10.0, 20.0));
        assert!((p.x - 7.0).abs() < 1e-9);
        assert!((p.y - 14.0).abs() < 1e-9);
    }

    #[test]
    fn test_smoothing_converges_without_overshoot() {
        let target = Point::new(100.0, -50.0);
        let mut stroke = InProgressStroke::begin(Point::new(0.0, 0.0), &session());
        let mut last_dist = stroke.points()[0].distance(target);
        for _ in 0..30 {
            let p = stroke.push_smoothed(target);
            let dist = p.distance(target);
            assert!(dist < last_dist || dist < 1e-9);
            assert!(p.x <= target.x + 1e-9);
            assert!(p.y >= target.y - 1e-9);
            last_dist = dist;
        }
        assert!(last_dist < 1e-9);
    }

    #[test]
    fn test_in_progress_captures_color_by_value() {
        let mut session = session();
        let mut stroke = InProgressStroke::begin(Point::ZERO, &session);
        session.set_color(StrokeColor::rgb(255, 0, 0));
        stroke.push_smoothed(Point::new(5.0, 5.0));
        let committed = stroke.finish().expect("two points");
        assert_eq!(committed.color(), StrokeColor::DEFAULT);
    }

    #[test]
    fn test_color_hex_parsing() {
        let color: StrokeColor = "#e94560".parse().unwrap();
        assert_eq!(color, StrokeColor::rgb(0xe9, 0x45, 0x60));
        assert_eq!(color.to_hex(), "#e94560");

        assert_eq!(
            "e94560".parse::<StrokeColor>(),
            Err(ColorParseError::MissingHash("e94560".to_string()))
        );
        assert_eq!("#fff".parse::<StrokeColor>(), Err(ColorParseError::InvalidLength(3)));
        assert!("#zzzzzz".parse::<StrokeColor>().is_err());
    }

    #[test]
    fn test_color_serializes_as_hex() {
        let json = serde_json::to_string(&StrokeColor::rgb(1, 2, 3)).unwrap();
        assert_eq!(json, "\"#010203\"");
        let back: StrokeColor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, StrokeColor::rgb(1, 2, 3));
    }

    #[test]
    fn test_color_with_opacity_alpha() {
        let rgba = StrokeColor::rgb(10, 20, 30).with_opacity(0.35).to_rgba8();
        assert_eq!((rgba.r, rgba.g, rgba.b), (10, 20, 30));
        assert_eq!(rgba.a, 89);
    }
}
