//! Badge outlines.

use resvg::tiny_skia::{Path, PathBuilder, Rect};

use crate::metrics::BadgeShape;

/// Control point distance for approximating a quarter circle with one
/// cubic Bezier segment, as a fraction of the radius.
const KAPPA: f32 = 0.552_284_8;

/// Builds a closed rounded-rectangle outline.
///
/// The path runs clockwise from the end of the top-left corner: four
/// straight sides joined by four quarter-arc corners. `radius` is clamped
/// to half the shorter side, where the outline becomes a circle (or a
/// stadium for non-square rects). A zero radius gives a plain rectangle.
///
/// Returns `None` for empty or non-finite rects.
pub fn rounded_rect(x: f32, y: f32, width: f32, height: f32, radius: f32) -> Option<Path> {
    if !(width > 0.0 && height > 0.0) {
        return None;
    }
    let rect = Rect::from_xywh(x, y, width, height)?;
    let r = radius.clamp(0.0, width.min(height) / 2.0);
    if r <= 0.0 {
        return Some(PathBuilder::from_rect(rect));
    }

    let (right, bottom) = (x + width, y + height);
    let k = r * KAPPA;

    let mut pb = PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(right - r, y);
    pb.cubic_to(right - r + k, y, right, y + r - k, right, y + r);
    pb.line_to(right, bottom - r);
    pb.cubic_to(right, bottom - r + k, right - r + k, bottom, right - r, bottom);
    pb.line_to(x + r, bottom);
    pb.cubic_to(x + r - k, bottom, x, bottom - r + k, x, bottom - r);
    pb.line_to(x, y + r);
    pb.cubic_to(x, y + r - k, x + r - k, y, x + r, y);
    pb.close();
    pb.finish()
}

impl BadgeShape {
    /// Returns the outline path, or `None` when the badge has no area.
    pub fn to_path(&self) -> Option<Path> {
        match *self {
            Self::Circle { radius, .. } if !(radius > 0.0) => None,
            Self::Circle { cx, cy, radius } => PathBuilder::from_circle(cx, cy, radius),
            Self::RoundedRect { x, y, side, corner_radius } => {
                rounded_rect(x, y, side, side, corner_radius)
            }
        }
    }
}
