//! Composes the tray icon from a config.
//!
//! There is one drawing routine for every platform. It takes the
//! platform's [`PlatformMetrics`](crate::metrics::PlatformMetrics) and
//! runs the same steps:
//!
//! 1. Derive the [`BadgeLayout`] from the effective pixel size.
//! 2. Stroke the badge with the active foreground, then fill it with the
//!    active background.
//! 3. Draw the content: the unread count, the activity marker, or the mail
//!    glyph, chosen by [`BadgeContent::for_config`].
//!
//! # Example
//!
//! ```no_run
//! use mailtray_icon::{IconComposer, IconConfig, Platform};
//!
//! let composer = IconComposer::new();
//! let config = IconConfig::new(Platform::Mac).with_unread_count(5);
//! let icon = composer.compose(&config).unwrap();
//! let png = icon.to_png().unwrap();
//! ```

use std::borrow::Cow;

use resvg::tiny_skia::{FillRule, Paint, Pixmap, Stroke, Transform};

use crate::config::{BadgeStyle, IconConfig, TraySettings};
use crate::error::{ComposeError, Result};
use crate::glyph::{MAIL_SVG, MailGlyph};
use crate::icon::RenderedIcon;
use crate::metrics::{BadgeLayout, CountTier};
use crate::text::{MARKER, SvgTextPainter, TextPainter, TextRun};

// ============================================================================
// BadgeContent
// ============================================================================

/// What is drawn inside the badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeContent {
    /// The unread count as a numeral, 1 to 99.
    Count(u32),
    /// The bullet marker, for counts above 99 or when the count is hidden.
    Marker,
    /// The mail glyph, when nothing is unread.
    MailGlyph,
}

impl BadgeContent {
    /// Selects the content for a config.
    pub fn for_config(config: &IconConfig) -> Self {
        match CountTier::for_count(config.unread_count) {
            None => Self::MailGlyph,
            Some(CountTier::Overflow) => Self::Marker,
            Some(_) if !config.show_unread_count => Self::Marker,
            Some(_) => Self::Count(config.unread_count),
        }
    }

    /// The numeral tier used to size and place text content.
    fn tier(&self) -> Option<CountTier> {
        match self {
            Self::Count(count) => CountTier::for_count(*count),
            Self::Marker => Some(CountTier::Overflow),
            Self::MailGlyph => None,
        }
    }
}

// ============================================================================
// IconComposer
// ============================================================================

/// Renders tray icons.
///
/// The composer owns only read-only resources (the text painter and the
/// glyph markup), so one instance can serve any number of renders,
/// including from several threads at once.
pub struct IconComposer {
    text: Box<dyn TextPainter>,
    glyph_svg: Cow<'static, str>,
}

impl IconComposer {
    /// Creates a composer that draws text with the system fonts.
    pub fn new() -> Self {
        Self::with_text_painter(SvgTextPainter::system())
    }

    /// Creates a composer with a custom text painter.
    pub fn with_text_painter(painter: impl TextPainter + 'static) -> Self {
        Self {
            text: Box::new(painter),
            glyph_svg: Cow::Borrowed(MAIL_SVG),
        }
    }

    /// Replaces the mail glyph markup.
    ///
    /// The markup's `fill="#000000"` attributes are recolored to the active
    /// foreground. Markup that fails to parse is reported as
    /// [`ComposeError::AssetDecode`] by the renders that need the glyph.
    pub fn with_glyph_svg(mut self, svg: impl Into<String>) -> Self {
        self.glyph_svg = Cow::Owned(svg.into());
        self
    }

    /// Renders the icon described by `config`.
    pub fn compose(&self, config: &IconConfig) -> Result<RenderedIcon> {
        config.validate()?;

        let metrics = config.platform.metrics();
        let layout = BadgeLayout::new(config, metrics);
        let style = config.active_style();
        let content = BadgeContent::for_config(config);

        log::debug!(
            "composing {} tray icon: {}px, unread={}, content={:?}",
            config.platform,
            layout.size,
            config.unread_count,
            content
        );

        let mut pixmap = Pixmap::new(layout.size, layout.size).ok_or(ComposeError::Surface {
            width: layout.size,
            height: layout.size,
        })?;
        let base = Transform::from_translate(layout.origin_offset, layout.origin_offset);

        draw_badge(&mut pixmap, &layout, &style, base);

        match content.tier() {
            None => {
                let glyph = MailGlyph::decode(&self.glyph_svg, style.foreground)?;
                let (edge, offset) = layout.glyph_box(config.thick);
                glyph.draw(&mut pixmap.as_mut(), offset, offset, edge, base);
            }
            Some(tier) => {
                let text = match content {
                    BadgeContent::Count(count) => Cow::Owned(count.to_string()),
                    _ => Cow::Borrowed(MARKER),
                };
                let tier = tier.text_tier(metrics);
                let run = TextRun {
                    text: &text,
                    font_size: layout.font_size(tier),
                    bold: metrics.bold_text,
                    color: style.foreground,
                    anchor_x: layout.center,
                    baseline_y: layout.baseline(tier),
                };
                self.text.paint(&mut pixmap.as_mut(), &run, base)?;
            }
        }

        Ok(RenderedIcon::from_pixmap(&pixmap, config.pixel_ratio))
    }

    /// Merges `settings` over the defaults and renders the result.
    pub fn compose_settings(&self, settings: &TraySettings) -> Result<RenderedIcon> {
        self.compose(&IconConfig::from_settings(settings)?)
    }
}

impl Default for IconComposer {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders `config` with a fresh default composer.
///
/// Loading the system fonts dominates the cost of this call; keep an
/// [`IconComposer`] around when rendering repeatedly.
pub fn compose(config: &IconConfig) -> Result<RenderedIcon> {
    IconComposer::new().compose(config)
}

/// Strokes the badge outline with the foreground, then fills it with the
/// background. Only the outer half of the stroke stays visible.
fn draw_badge(pixmap: &mut Pixmap, layout: &BadgeLayout, style: &BadgeStyle, base: Transform) {
    let Some(path) = layout.shape.to_path() else {
        log::trace!("badge has no area at {}px, skipping", layout.size);
        return;
    };

    let mut paint = Paint {
        anti_alias: true,
        ..Paint::default()
    };

    paint.set_color(style.foreground.to_skia());
    let stroke = Stroke {
        width: layout.stroke_width,
        ..Stroke::default()
    };
    pixmap.stroke_path(&path, &paint, &stroke, base, None);

    // The fill covers the inner half of the stroke.
    paint.set_color(style.background.to_skia());
    pixmap.fill_path(&path, &paint, FillRule::Winding, base, None);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::config::Platform;
    use crate::metrics::BadgeShape;
    use resvg::tiny_skia::PixmapMut;
    use resvg::usvg::fontdb;
    use std::sync::{Arc, Mutex};

    /// Records every run instead of drawing it.
    #[derive(Clone, Default)]
    struct RecordingPainter {
        runs: Arc<Mutex<Vec<(String, f32, f32, f32, bool)>>>,
    }

    impl RecordingPainter {
        fn runs(&self) -> Vec<(String, f32, f32, f32, bool)> {
            self.runs.lock().unwrap().clone()
        }
    }

    impl TextPainter for RecordingPainter {
        fn paint(&self, _: &mut PixmapMut<'_>, run: &TextRun<'_>, _: Transform) -> Result<()> {
            self.runs.lock().unwrap().push((
                run.text.to_string(),
                run.font_size,
                run.anchor_x,
                run.baseline_y,
                run.bold,
            ));
            Ok(())
        }
    }

    fn composer() -> (IconComposer, RecordingPainter) {
        let painter = RecordingPainter::default();
        (IconComposer::with_text_painter(painter.clone()), painter)
    }

    #[test]
    fn content_selection() {
        let config = IconConfig::new(Platform::Mac);
        assert_eq!(BadgeContent::for_config(&config), BadgeContent::MailGlyph);

        let config = config.with_unread_count(42);
        assert_eq!(BadgeContent::for_config(&config), BadgeContent::Count(42));

        let hidden = config.clone().with_show_unread_count(false);
        assert_eq!(BadgeContent::for_config(&hidden), BadgeContent::Marker);

        let overflow = config.with_unread_count(100);
        assert_eq!(BadgeContent::for_config(&overflow), BadgeContent::Marker);
    }

    #[test]
    fn mac_single_digit_example() {
        let (composer, painter) = composer();
        let config = IconConfig::new(Platform::Mac)
            .with_unread_count(5)
            .with_unread_colors(Color::BLACK, Color::WHITE)
            .with_unread_radius(5);

        let icon = composer.compose(&config).unwrap();

        assert_eq!(icon.dimensions().width, 100);
        assert_eq!(icon.dimensions().height, 100);
        assert_eq!(painter.runs(), vec![("5".to_string(), 60.0, 50.0, 70.0, false)]);

        // The outer half of the stroke sits above the badge edge at y = 15.5,
        // the middle is background, and the corners stay empty.
        assert_eq!(icon.pixel(50, 14), Some([0, 0, 0, 255]));
        assert_eq!(icon.pixel(50, 50), Some([255, 255, 255, 255]));
        assert_eq!(icon.pixel(16, 16).map(|p| p[3]), Some(0));
        assert_eq!(icon.pixel(0, 0).map(|p| p[3]), Some(0));
    }

    #[test]
    fn count_tiers() {
        let (composer, painter) = composer();
        for count in [1, 9, 10, 99, 100, 5000] {
            let config = IconConfig::new(Platform::Linux).with_unread_count(count);
            composer.compose(&config).unwrap();
        }

        let runs: Vec<_> = painter
            .runs()
            .into_iter()
            .map(|(text, size, _, baseline, _)| (text, size, baseline))
            .collect();
        assert_eq!(
            runs,
            vec![
                ("1".to_string(), 60.0, 70.0),
                ("9".to_string(), 60.0, 70.0),
                ("10".to_string(), 52.0, 67.0),
                ("99".to_string(), 52.0, 67.0),
                (MARKER.to_string(), 80.0, 71.0),
                (MARKER.to_string(), 80.0, 71.0),
            ]
        );
    }

    #[test]
    fn overflow_counts_render_identically() {
        let (composer, _) = composer();
        let config = IconConfig::new(Platform::Mac).with_unread_count(100);
        let a = composer.compose(&config).unwrap();
        let b = composer.compose(&config.with_unread_count(5000)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn hidden_count_draws_the_marker() {
        let (composer, painter) = composer();
        for count in [1, 50, 1000] {
            let config = IconConfig::new(Platform::Mac)
                .with_unread_count(count)
                .with_show_unread_count(false);
            composer.compose(&config).unwrap();
        }
        assert!(painter.runs().iter().all(|(text, size, ..)| text == MARKER && *size == 80.0));
        assert_eq!(painter.runs().len(), 3);
    }

    #[test]
    fn nothing_unread_draws_the_glyph_in_the_read_color() {
        let (composer, painter) = composer();
        let read = Color::rgb(0xC8, 0x20, 0x18);
        let config = IconConfig::new(Platform::Mac)
            .with_read_colors(read, Color::rgb(1, 2, 3))
            .with_unread_colors(Color::BLACK, Color::WHITE);

        let icon = composer.compose(&config).unwrap();

        assert!(painter.runs().is_empty());
        assert_eq!(icon.pixel(22, 50), Some([1, 2, 3, 255]));
        assert_eq!(icon.pixel(46, 60), Some([0xC8, 0x20, 0x18, 255]));
    }

    #[test]
    fn unread_state_uses_unread_colors() {
        let (composer, _) = composer();
        let config = IconConfig::new(Platform::Mac)
            .with_read_colors(Color::BLACK, Color::rgb(1, 2, 3))
            .with_unread_colors(Color::BLACK, Color::rgb(7, 8, 9))
            .with_unread_count(1);

        let icon = composer.compose(&config).unwrap();
        assert_eq!(icon.pixel(22, 50), Some([7, 8, 9, 255]));
    }

    #[test]
    fn square_corners_at_zero_radius() {
        let (composer, _) = composer();
        let config = IconConfig::new(Platform::Linux)
            .with_unread_count(3)
            .with_unread_colors(Color::BLACK, Color::WHITE)
            .with_unread_radius(0);
        let icon = composer.compose(&config).unwrap();
        assert_eq!(icon.pixel(14, 14), Some([0, 0, 0, 255]));
        assert_eq!(icon.pixel(10, 10).map(|p| p[3]), Some(0));

        let rounded = composer.compose(&config.with_unread_radius(2)).unwrap();
        assert_eq!(rounded.pixel(14, 14).map(|p| p[3]), Some(0));
    }

    #[test]
    fn background_covers_the_inner_half_of_the_stroke() {
        let (composer, _) = composer();
        let config = IconConfig::new(Platform::Linux)
            .with_unread_count(3)
            .with_unread_colors(Color::BLACK, Color::WHITE)
            .with_unread_radius(0);
        let icon = composer.compose(&config).unwrap();

        // Badge edge at 15.5, stroke from 13 to 18.
        assert_eq!(icon.pixel(13, 50), Some([0, 0, 0, 255]));
        assert_eq!(icon.pixel(14, 50), Some([0, 0, 0, 255]));
        assert_eq!(icon.pixel(16, 50), Some([255, 255, 255, 255]));
        assert_eq!(icon.pixel(17, 50), Some([255, 255, 255, 255]));
    }

    #[test]
    fn missing_fonts_fail_the_render() {
        let painter = SvgTextPainter::with_fontdb(Arc::new(fontdb::Database::new()));
        let composer = IconComposer::with_text_painter(painter);

        for count in [5, 7, 500] {
            let config = IconConfig::new(Platform::Mac).with_unread_count(count);
            assert!(matches!(composer.compose(&config), Err(ComposeError::Text(_))));
        }

        // The glyph needs no fonts.
        assert!(composer.compose(&IconConfig::new(Platform::Mac)).is_ok());
    }

    #[test]
    fn max_radius_rounded_rect_matches_a_circle() {
        let layout = BadgeLayout::new(
            &IconConfig::new(Platform::Linux),
            Platform::Linux.metrics(),
        );
        let BadgeShape::Circle { cx, radius, .. } = layout.shape else {
            panic!("linux draws a circle at max radius");
        };
        let style = IconConfig::new(Platform::Linux).active_style();
        let base = Transform::from_translate(0.5, 0.5);

        let mut circle = Pixmap::new(100, 100).unwrap();
        draw_badge(&mut circle, &layout, &style, base);

        let side = radius * 2.0;
        let as_rect = BadgeLayout {
            shape: BadgeShape::RoundedRect {
                x: cx - radius,
                y: cx - radius,
                side,
                corner_radius: radius,
            },
            ..layout
        };
        let mut rect = Pixmap::new(100, 100).unwrap();
        draw_badge(&mut rect, &as_rect, &style, base);

        let differing = circle
            .pixels()
            .iter()
            .zip(rect.pixels())
            .filter(|(a, b)| {
                let d = |x: u8, y: u8| x.abs_diff(y) > 32;
                d(a.red(), b.red()) || d(a.green(), b.green()) || d(a.alpha(), b.alpha())
            })
            .count();
        assert!(differing <= 100, "{differing} pixels differ");
    }

    #[test]
    fn windows_uses_bold_text_and_square_badge() {
        let (composer, painter) = composer();
        let config = IconConfig::new(Platform::Windows)
            .with_unread_count(7)
            .with_unread_colors(Color::BLACK, Color::WHITE);
        let icon = composer.compose(&config).unwrap();

        assert_eq!(painter.runs(), vec![("7".to_string(), 70.0, 50.0, 75.0, true)]);
        assert_eq!(icon.pixel(10, 10), Some([0, 0, 0, 255]));
        assert_eq!(icon.pixel(17, 17), Some([255, 255, 255, 255]));
    }

    #[test]
    fn even_pixel_ratio_doubles_the_surface() {
        let (composer, painter) = composer();
        let config = IconConfig::new(Platform::Mac)
            .with_size(16)
            .with_pixel_ratio(2.0)
            .with_unread_count(3);
        let icon = composer.compose(&config).unwrap();

        assert_eq!(icon.dimensions().width, 32);
        assert_eq!(icon.logical_size(), (16.0, 16.0));
        assert_eq!(painter.runs()[0].1, 19.0);
    }

    #[test]
    fn composition_is_deterministic() {
        let (composer, _) = composer();
        for config in [
            IconConfig::new(Platform::Mac),
            IconConfig::new(Platform::Windows).with_unread_count(12),
            IconConfig::new(Platform::Linux).with_read_radius(3).with_pixel_ratio(1.5),
        ] {
            assert_eq!(
                composer.compose(&config).unwrap(),
                composer.compose(&config).unwrap()
            );
        }
    }

    #[test]
    fn unsupported_platform_produces_no_surface() {
        let (composer, painter) = composer();
        let settings = TraySettings {
            platform: Some("freebsd".into()),
            unread_count: Some(3),
            ..Default::default()
        };
        assert_eq!(
            composer.compose_settings(&settings),
            Err(ComposeError::UnsupportedPlatform("freebsd".into()))
        );
        assert!(painter.runs().is_empty());
    }

    #[test]
    fn broken_glyph_fails_only_when_needed() {
        let (composer, _) = composer();
        let composer = composer.with_glyph_svg("<not-svg");

        let read = IconConfig::new(Platform::Linux);
        assert!(matches!(
            composer.compose(&read),
            Err(ComposeError::AssetDecode(_))
        ));

        let unread = read.with_unread_count(2);
        assert!(composer.compose(&unread).is_ok());
    }

    #[test]
    fn invalid_config_is_rejected_before_drawing() {
        let (composer, _) = composer();
        let config = IconConfig::new(Platform::Mac).with_size(0);
        assert!(matches!(
            composer.compose(&config),
            Err(ComposeError::InvalidConfig(_))
        ));
    }

    #[test]
    fn text_painter_errors_propagate() {
        struct Failing;
        impl TextPainter for Failing {
            fn paint(&self, _: &mut PixmapMut<'_>, _: &TextRun<'_>, _: Transform) -> Result<()> {
                Err(ComposeError::Text("no layout".into()))
            }
        }

        let composer = IconComposer::with_text_painter(Failing);
        let config = IconConfig::new(Platform::Mac).with_unread_count(1);
        assert_eq!(
            composer.compose(&config),
            Err(ComposeError::Text("no layout".into()))
        );
    }
}
