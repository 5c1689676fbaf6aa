//! Per-platform drawing constants and the layout derived from them.
//!
//! The three tray variants share one drawing routine; everything that
//! differs between them lives in a [`PlatformMetrics`] table. All
//! fractions are relative to the effective (physical) icon size.

use crate::config::{IconConfig, MAX_RADIUS, Platform};

/// Font size and baseline offset for one numeral tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextTier {
    /// Font size as a fraction of the icon size.
    pub font_fraction: f32,
    /// Baseline distance below the icon center, as a fraction of the icon
    /// size. Numerals have no true vertical centering, so each tier is
    /// nudged down by a hand-tuned amount.
    pub baseline_fraction: f32,
}

/// Drawing constants for one platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformMetrics {
    /// Inset of the badge from every icon edge.
    pub padding_fraction: f32,
    /// Insets the badge by the stroke width instead of `padding_fraction`.
    pub padding_from_stroke: bool,
    /// Minimum stroke width in pixels.
    pub stroke_floor: f32,
    /// Stroke width as a fraction of the icon size, before the floor.
    pub stroke_fraction: f32,
    /// Whether the configured corner radius is used at all. When false the
    /// badge is always a square.
    pub honours_radius: bool,
    /// Whether the maximal radius draws a true circle rather than a rounded
    /// rectangle with half-side corners.
    pub circle_at_max_radius: bool,
    /// Whether numerals are drawn in a bold face.
    pub bold_text: bool,
    /// Counts 1 to 9.
    pub single_digit: TextTier,
    /// Counts 10 to 99.
    pub double_digit: TextTier,
    /// Counts above 99 and the activity dot.
    pub overflow: TextTier,
}

pub const MAC_METRICS: PlatformMetrics = PlatformMetrics {
    padding_fraction: 0.15,
    padding_from_stroke: false,
    stroke_floor: 1.0,
    stroke_fraction: 0.05,
    honours_radius: true,
    circle_at_max_radius: false,
    bold_text: false,
    single_digit: TextTier { font_fraction: 0.6, baseline_fraction: 0.2 },
    double_digit: TextTier { font_fraction: 0.52, baseline_fraction: 0.17 },
    overflow: TextTier { font_fraction: 0.8, baseline_fraction: 0.22 },
};

pub const WINDOWS_METRICS: PlatformMetrics = PlatformMetrics {
    padding_fraction: 0.15,
    padding_from_stroke: true,
    stroke_floor: 2.0,
    stroke_fraction: 0.15,
    honours_radius: false,
    circle_at_max_radius: false,
    bold_text: true,
    single_digit: TextTier { font_fraction: 0.7, baseline_fraction: 0.25 },
    double_digit: TextTier { font_fraction: 0.55, baseline_fraction: 0.17 },
    overflow: TextTier { font_fraction: 0.8, baseline_fraction: 0.23 },
};

pub const LINUX_METRICS: PlatformMetrics = PlatformMetrics {
    padding_fraction: 0.15,
    padding_from_stroke: false,
    stroke_floor: 1.0,
    stroke_fraction: 0.05,
    honours_radius: true,
    circle_at_max_radius: true,
    bold_text: false,
    single_digit: TextTier { font_fraction: 0.6, baseline_fraction: 0.2 },
    double_digit: TextTier { font_fraction: 0.52, baseline_fraction: 0.17 },
    overflow: TextTier { font_fraction: 0.8, baseline_fraction: 0.21 },
};

/// Mail glyph edge as a fraction of the icon size.
pub const GLYPH_FRACTION: f32 = 0.5;

/// Mail glyph edge when the `thick` hint is set.
pub const THICK_GLYPH_FRACTION: f32 = 1.0;

impl Platform {
    /// Returns the drawing constants for this platform.
    pub fn metrics(&self) -> &'static PlatformMetrics {
        match self {
            Self::Mac => &MAC_METRICS,
            Self::Windows => &WINDOWS_METRICS,
            Self::Linux => &LINUX_METRICS,
        }
    }
}

// ============================================================================
// Count tiers
// ============================================================================

/// Which numeral size range an unread count falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountTier {
    /// 1 to 9.
    Single,
    /// 10 to 99.
    Double,
    /// Anything above 99; the exact value is not shown.
    Overflow,
}

impl CountTier {
    /// Highest count shown as a numeral.
    pub const DISPLAY_LIMIT: u32 = 99;

    /// Returns the tier for `count`, or `None` when there is nothing unread.
    pub fn for_count(count: u32) -> Option<Self> {
        match count {
            0 => None,
            1..=9 => Some(Self::Single),
            10..=Self::DISPLAY_LIMIT => Some(Self::Double),
            _ => Some(Self::Overflow),
        }
    }

    pub fn text_tier(&self, metrics: &PlatformMetrics) -> TextTier {
        match self {
            Self::Single => metrics.single_digit,
            Self::Double => metrics.double_digit,
            Self::Overflow => metrics.overflow,
        }
    }
}

// ============================================================================
// Layout
// ============================================================================

/// The outline of the badge in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BadgeShape {
    Circle { cx: f32, cy: f32, radius: f32 },
    RoundedRect { x: f32, y: f32, side: f32, corner_radius: f32 },
}

/// Pixel geometry for one render, derived from a config and its
/// platform's metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BadgeLayout {
    /// Edge of the square surface in physical pixels.
    pub size: u32,
    pub padding: f32,
    pub stroke_width: f32,
    /// Horizontal anchor and vertical reference for centered content.
    pub center: f32,
    pub shape: BadgeShape,
    /// Origin shift applied to every drawing operation. Half a pixel when
    /// the pixel ratio is not an even multiple, so strokes land on pixel
    /// boundaries.
    pub origin_offset: f32,
}

impl BadgeLayout {
    pub fn new(config: &IconConfig, metrics: &PlatformMetrics) -> Self {
        let size = config.pixel_size();
        let s = size as f32;
        let radius = config.active_style().radius;

        let stroke_width = metrics.stroke_floor.max((s * metrics.stroke_fraction).round());
        let padding = if metrics.padding_from_stroke {
            stroke_width
        } else {
            (s * metrics.padding_fraction).floor()
        };
        let center = (s / 2.0).round();
        let side = (s - 2.0 * padding).max(0.0);

        let shape = if metrics.honours_radius
            && metrics.circle_at_max_radius
            && radius >= MAX_RADIUS
        {
            BadgeShape::Circle {
                cx: center,
                cy: center,
                radius: (s / 2.0 - padding).max(0.0),
            }
        } else {
            let corner_radius = if metrics.honours_radius {
                (s * (radius as f32 / 10.0)).round().min(side / 2.0)
            } else {
                0.0
            };
            BadgeShape::RoundedRect {
                x: padding,
                y: padding,
                side,
                corner_radius,
            }
        };

        let origin_offset = if config.pixel_ratio % 2.0 != 0.0 { 0.5 } else { 0.0 };

        Self {
            size,
            padding,
            stroke_width,
            center,
            shape,
            origin_offset,
        }
    }

    /// Font size in pixels for a count tier.
    pub fn font_size(&self, tier: TextTier) -> f32 {
        (self.size as f32 * tier.font_fraction).round()
    }

    /// Baseline y coordinate for a count tier.
    pub fn baseline(&self, tier: TextTier) -> f32 {
        (self.center + self.size as f32 * tier.baseline_fraction).round()
    }

    /// Edge length and top-left offset of the mail glyph.
    pub fn glyph_box(&self, thick: bool) -> (f32, f32) {
        let fraction = if thick { THICK_GLYPH_FRACTION } else { GLYPH_FRACTION };
        let edge = self.size as f32 * fraction;
        (edge, (self.size as f32 - edge) / 2.0)
    }
}
