//! Page background patterns.
//!
//! Each pattern is a pure function of the surface rectangle. Lines of the
//! same style are batched into one path.

use crate::draw_list::{DrawList, LineStyle, Primitive};
use inkglass_core::BackgroundKind;
use kurbo::{BezPath, Ellipse, Point, Rect, Shape};
use peniko::Color;

pub const WHITE_FILL: Color = Color::from_rgb8(0xf8, 0xf9, 0xfa);

pub const GRID_FILL: Color = Color::from_rgb8(0xff, 0xff, 0xff);
pub const GRID_MINOR: Color = Color::from_rgb8(0xd0, 0xd4, 0xdc);
pub const GRID_MAJOR: Color = Color::from_rgb8(0xa8, 0xaf, 0xc0);
pub const GRID_SPACING: f64 = 40.0;
/// Every n-th grid line is drawn heavier.
pub const GRID_MAJOR_EVERY: usize = 5;

pub const LINED_FILL: Color = Color::from_rgb8(0xff, 0xfe, 0xf5);
pub const LINED_RULE: Color = Color::from_rgb8(0xc8, 0xd8, 0xe8);
pub const LINED_MARGIN: Color = Color::from_rgb8(0xe8, 0xa0, 0xa0);
pub const LINED_SPACING: f64 = 36.0;
pub const LINED_TOP: f64 = 60.0;
pub const LINED_MARGIN_X: f64 = 80.0;

pub const DOTTED_FILL: Color = Color::from_rgb8(0xfa, 0xfa, 0xfa);
pub const DOT_COLOR: Color = Color::from_rgb8(0xc0, 0xc4, 0xcc);
pub const DOT_SPACING: f64 = 30.0;

pub const BLACKBOARD_FILL: Color = Color::from_rgb8(0x1a, 0x3a, 0x2a);
pub const CHALK_TEXTURE: Color = Color::from_rgba8(255, 255, 255, 8);
pub const CHALK_SPACING: f64 = 3.0;
pub const FRAME_OUTER: Color = Color::from_rgb8(0x5c, 0x3a, 0x1e);
pub const FRAME_INNER: Color = Color::from_rgb8(0x8b, 0x69, 0x14);

/// Tolerance for flattening curves into path elements.
const TOLERANCE: f64 = 0.1;

/// Primitives for `kind` covering `rect`. Empty for [`BackgroundKind::None`].
pub fn background_primitives(rect: Rect, kind: BackgroundKind) -> DrawList {
    let mut list = DrawList::new();
    match kind {
        BackgroundKind::None => {}
        BackgroundKind::White => list.fill(rect.to_path(TOLERANCE), WHITE_FILL),
        BackgroundKind::Grid => {
            list.fill(rect.to_path(TOLERANCE), GRID_FILL);
            list.stroke(grid_path(rect, 1), GRID_MINOR, LineStyle::new(0.8));
            list.stroke(grid_path(rect, GRID_MAJOR_EVERY), GRID_MAJOR, LineStyle::new(1.5));
        }
        BackgroundKind::Lined => {
            list.fill(rect.to_path(TOLERANCE), LINED_FILL);
            let mut margin = BezPath::new();
            vertical(&mut margin, rect, rect.x0 + LINED_MARGIN_X);
            list.stroke(margin, LINED_MARGIN, LineStyle::new(1.2));
            list.stroke(
                horizontal_rules(rect, rect.y0 + LINED_TOP, LINED_SPACING),
                LINED_RULE,
                LineStyle::new(1.0),
            );
        }
        BackgroundKind::Dotted => {
            list.fill(rect.to_path(TOLERANCE), DOTTED_FILL);
            list.fill(dot_lattice(rect), DOT_COLOR);
        }
        BackgroundKind::Blackboard => {
            list.fill(rect.to_path(TOLERANCE), BLACKBOARD_FILL);
            list.stroke(
                horizontal_rules(rect, rect.y0, CHALK_SPACING),
                CHALK_TEXTURE,
                LineStyle::new(0.5),
            );
            list.stroke(rect.inset(-4.0).to_path(TOLERANCE), FRAME_OUTER, LineStyle::new(8.0));
            list.stroke(rect.inset(-10.0).to_path(TOLERANCE), FRAME_INNER, LineStyle::new(2.0));
        }
    }
    list
}

/// Practically invisible full-rect fill. Some platforms do not deliver
/// pointer events over fully transparent pixels.
pub fn hit_shim_primitive(rect: Rect) -> Primitive {
    Primitive::Fill {
        path: rect.to_path(TOLERANCE),
        color: Color::from_rgba8(0, 0, 0, 1),
    }
}

fn vertical(path: &mut BezPath, rect: Rect, x: f64) {
    path.move_to(Point::new(x, rect.y0));
    path.line_to(Point::new(x, rect.y1));
}

fn horizontal(path: &mut BezPath, rect: Rect, y: f64) {
    path.move_to(Point::new(rect.x0, y));
    path.line_to(Point::new(rect.x1, y));
}

/// Grid lines from the top-left corner, keeping every `every`-th line.
fn grid_path(rect: Rect, every: usize) -> BezPath {
    let mut path = BezPath::new();
    let mut x = rect.x0;
    let mut i = 0;
    while x <= rect.x1 {
        if i % every == 0 {
            vertical(&mut path, rect, x);
        }
        x += GRID_SPACING;
        i += 1;
    }
    let mut y = rect.y0;
    let mut i = 0;
    while y <= rect.y1 {
        if i % every == 0 {
            horizontal(&mut path, rect, y);
        }
        y += GRID_SPACING;
        i += 1;
    }
    path
}

fn horizontal_rules(rect: Rect, start: f64, spacing: f64) -> BezPath {
    let mut path = BezPath::new();
    let mut y = start;
    while y <= rect.y1 {
        horizontal(&mut path, rect, y);
        y += spacing;
    }
    path
}

/// Dots three units across, inset one spacing from the top-left edges.
fn dot_lattice(rect: Rect) -> BezPath {
    let mut path = BezPath::new();
    let mut x = rect.x0 + DOT_SPACING;
    while x <= rect.x1 {
        let mut y = rect.y0 + DOT_SPACING;
        while y <= rect.y1 {
            let dot = Ellipse::from_rect(Rect::new(x - 1.0, y - 1.0, x + 2.0, y + 2.0));
            path.extend(dot.path_elements(TOLERANCE));
            y += DOT_SPACING;
        }
        x += DOT_SPACING;
    }
    path
}
