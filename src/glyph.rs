//! The mail glyph shown when nothing is unread.
//!
//! The glyph is an SVG silhouette whose `fill="#000000"` attribute is the
//! only part that changes: it is swapped for the active foreground color
//! before the markup is parsed with usvg and rasterized with resvg.

use resvg::tiny_skia::{PixmapMut, Transform};
use resvg::usvg::{Options, Tree};

use crate::color::Color;
use crate::error::{ComposeError, Result};

/// The embedded mail silhouette.
pub const MAIL_SVG: &str = include_str!("../assets/mail.svg");

/// The fill attribute that recoloring replaces.
pub const PLACEHOLDER_FILL: &str = r##"fill="#000000""##;

/// Replaces every placeholder fill in `svg` with `color`.
///
/// Other fills (`none`, explicit colors) are left alone.
pub fn recolor(svg: &str, color: Color) -> String {
    svg.replace(PLACEHOLDER_FILL, &color.to_svg_fill())
}

/// A decoded, recolored glyph ready to be drawn.
pub struct MailGlyph {
    tree: Tree,
}

impl MailGlyph {
    /// Recolors and parses glyph markup.
    ///
    /// Fails with [`ComposeError::AssetDecode`] if the markup is not a
    /// usable SVG document.
    pub fn decode(svg: &str, color: Color) -> Result<Self> {
        let markup = recolor(svg, color);
        let tree = Tree::from_str(&markup, &Options::default())
            .map_err(|e| ComposeError::AssetDecode(e.to_string()))?;

        log::trace!(
            "decoded mail glyph ({}x{})",
            tree.size().width(),
            tree.size().height()
        );
        Ok(Self { tree })
    }

    /// Draws the glyph stretched over the square at (`x`, `y`) with edge
    /// `edge`, after applying `base` (the surface origin shift).
    pub fn draw(&self, target: &mut PixmapMut<'_>, x: f32, y: f32, edge: f32, base: Transform) {
        let size = self.tree.size();
        let transform = base
            .pre_translate(x, y)
            .pre_scale(edge / size.width(), edge / size.height());
        resvg::render(&self.tree, transform, target);
    }
}
