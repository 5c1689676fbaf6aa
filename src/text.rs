//! Drawing unread counts and the activity marker.
//!
//! Text is the one part of the icon that depends on the environment: which
//! fonts are installed decides the exact pixels. The composer therefore
//! draws text through the [`TextPainter`] trait. [`SvgTextPainter`] is the
//! default and lays text out with usvg against a font database; tests swap
//! in a painter that does not touch fonts at all.

use std::sync::Arc;

use resvg::tiny_skia::{PixmapMut, Transform};
use resvg::usvg::{Options, Tree, fontdb};

use crate::color::Color;
use crate::error::{ComposeError, Result};

/// The bullet drawn for counts above the display limit and for unread
/// activity when the count is hidden.
pub const MARKER: &str = "\u{25CF}";

/// Font families tried in order. Numerals were tuned against Helvetica.
pub const DEFAULT_FAMILIES: &str = "Helvetica, Arial, 'Liberation Sans', 'DejaVu Sans', sans-serif";

/// A single horizontally centered line of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun<'a> {
    pub text: &'a str,
    /// Font size in pixels.
    pub font_size: f32,
    pub bold: bool,
    pub color: Color,
    /// X coordinate the text is centered on.
    pub anchor_x: f32,
    /// Y coordinate of the alphabetic baseline.
    pub baseline_y: f32,
}

/// Draws text runs onto a surface.
///
/// A run that cannot be drawn is an error, never a silent no-op.
///
/// `base` is the surface origin transform; implementations must apply it
/// to everything they draw.
pub trait TextPainter: Send + Sync {
    fn paint(&self, target: &mut PixmapMut<'_>, run: &TextRun<'_>, base: Transform) -> Result<()>;
}

// ============================================================================
// SvgTextPainter
// ============================================================================

/// Lays text out as an SVG `<text>` element and renders it with resvg.
#[derive(Clone)]
pub struct SvgTextPainter {
    fontdb: Arc<fontdb::Database>,
    families: String,
}

impl SvgTextPainter {
    /// Creates a painter backed by the fonts installed on this system.
    pub fn system() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        if db.len() == 0 {
            log::warn!("no system fonts found; rendering unread counts will fail");
        } else {
            log::debug!("loaded {} system font faces", db.len());
        }
        Self::with_fontdb(Arc::new(db))
    }

    /// Creates a painter backed by a single font file, for output that does
    /// not depend on installed fonts.
    pub fn from_font_data(data: Vec<u8>) -> Self {
        let mut db = fontdb::Database::new();
        db.load_font_data(data);
        let family = db
            .faces()
            .next()
            .and_then(|face| face.families.first())
            .map(|(name, _)| format!("'{name}'"));

        let painter = Self::with_fontdb(Arc::new(db));
        match family {
            Some(family) => painter.with_families(family),
            None => painter,
        }
    }

    /// Creates a painter backed by an existing font database.
    pub fn with_fontdb(fontdb: Arc<fontdb::Database>) -> Self {
        Self {
            fontdb,
            families: DEFAULT_FAMILIES.to_string(),
        }
    }

    /// Overrides the CSS font-family list.
    pub fn with_families(mut self, families: impl Into<String>) -> Self {
        self.families = families.into();
        self
    }

    /// Builds the SVG document for one run on a `width` x `height` canvas.
    fn markup(&self, run: &TextRun<'_>, width: u32, height: u32) -> String {
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}"><text x="{x}" y="{y}" font-family="{families}" font-size="{size}" font-weight="{weight}" text-anchor="middle" {fill}>{text}</text></svg>"#,
            x = run.anchor_x,
            y = run.baseline_y,
            families = self.families,
            size = run.font_size,
            weight = if run.bold { "bold" } else { "normal" },
            fill = run.color.to_svg_fill(),
            text = escape(run.text),
        )
    }
}

impl Default for SvgTextPainter {
    fn default() -> Self {
        Self::system()
    }
}

impl TextPainter for SvgTextPainter {
    fn paint(&self, target: &mut PixmapMut<'_>, run: &TextRun<'_>, base: Transform) -> Result<()> {
        let markup = self.markup(run, target.width(), target.height());
        let options = Options {
            fontdb: Arc::clone(&self.fontdb),
            ..Options::default()
        };
        let tree =
            Tree::from_str(&markup, &options).map_err(|e| ComposeError::Text(e.to_string()))?;

        // usvg drops text it has no font for instead of failing.
        if !tree.root().has_children() {
            return Err(ComposeError::Text(format!("no font could render {:?}", run.text)));
        }

        resvg::render(&tree, base, target);
        Ok(())
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use resvg::tiny_skia::Pixmap;

    fn run(text: &str) -> TextRun<'_> {
        TextRun {
            text,
            font_size: 60.0,
            bold: false,
            color: Color::BLACK,
            anchor_x: 50.0,
            baseline_y: 70.0,
        }
    }

    #[test]
    fn markup_centers_on_the_anchor() {
        let painter = SvgTextPainter::with_fontdb(Arc::new(fontdb::Database::new()));
        let svg = painter.markup(&run("5"), 100, 100);

        assert!(svg.contains(r#"x="50""#));
        assert!(svg.contains(r#"y="70""#));
        assert!(svg.contains(r#"font-size="60""#));
        assert!(svg.contains(r#"text-anchor="middle""#));
        assert!(svg.contains(r#"font-weight="normal""#));
        assert!(svg.contains(r##"fill="#000000""##));
        assert!(svg.contains(">5</text>"));
    }

    #[test]
    fn markup_uses_bold_weight_and_escapes() {
        let painter = SvgTextPainter::with_fontdb(Arc::new(fontdb::Database::new()))
            .with_families("Arial");
        let mut r = run("<&>");
        r.bold = true;
        let svg = painter.markup(&r, 32, 32);

        assert!(svg.contains(r#"font-weight="bold""#));
        assert!(svg.contains(r#"font-family="Arial""#));
        assert!(svg.contains("&lt;&amp;&gt;"));
    }

    #[test]
    fn painting_without_fonts_is_an_error() {
        let painter = SvgTextPainter::with_fontdb(Arc::new(fontdb::Database::new()));
        let mut pixmap = Pixmap::new(100, 100).unwrap();

        for text in ["5", "42", MARKER] {
            let result = painter.paint(&mut pixmap.as_mut(), &run(text), Transform::identity());
            assert_eq!(
                result,
                Err(ComposeError::Text(format!("no font could render {text:?}")))
            );
        }
        assert!(pixmap.pixels().iter().all(|p| p.alpha() == 0));
    }
}
