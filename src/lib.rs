//! mailtray-icon: unread-mail tray icon rendering
//!
//! This crate draws the system-tray icon of a desktop mail client: a
//! circular or rounded-square badge that shows the unread count, an
//! activity marker, or a mail glyph, with per-platform tweaks for macOS,
//! Windows and Linux trays.
//!
//! # Example
//!
//! ```no_run
//! use mailtray_icon::{Color, IconComposer, IconConfig, Platform};
//!
//! let composer = IconComposer::new();
//!
//! let config = IconConfig::new(Platform::Mac)
//!     .with_pixel_ratio(2.0)
//!     .with_size(16)
//!     .with_unread_count(5)
//!     .with_unread_colors(Color::BLACK, Color::WHITE);
//!
//! let icon = composer.compose(&config).unwrap();
//! let png = icon.to_png().unwrap();
//! ```
//!
//! # Settings
//!
//! Settings coming from an editor or a settings store are usually partial.
//! Merge them over the defaults with [`IconConfig::from_settings`]:
//!
//! ```
//! use mailtray_icon::{ComposeError, IconConfig, TraySettings};
//!
//! let settings = TraySettings::from_json(r##"{ "readColor": "#336699", "platform": "win32" }"##).unwrap();
//! let config = IconConfig::from_settings(&settings).unwrap();
//! assert!(config.thick);
//!
//! let settings = TraySettings::from_json(r#"{ "platform": "freebsd" }"#).unwrap();
//! assert!(matches!(
//!     IconConfig::from_settings(&settings),
//!     Err(ComposeError::UnsupportedPlatform(_))
//! ));
//! ```

mod color;
mod composer;
mod config;
mod error;
mod glyph;
mod icon;
mod metrics;
mod shape;
mod text;

pub use color::Color;
pub use composer::{BadgeContent, IconComposer, compose};
pub use config::{BadgeStyle, IconConfig, MAX_PIXEL_SIZE, MAX_RADIUS, Platform, TraySettings};
pub use error::{ComposeError, Result};
pub use glyph::{MAIL_SVG, MailGlyph, PLACEHOLDER_FILL, recolor};
pub use icon::{RenderedIcon, SizePx};
pub use metrics::{
    BadgeLayout, BadgeShape, CountTier, GLYPH_FRACTION, LINUX_METRICS, MAC_METRICS,
    PlatformMetrics, THICK_GLYPH_FRACTION, TextTier, WINDOWS_METRICS,
};
pub use shape::rounded_rect;
pub use text::{DEFAULT_FAMILIES, MARKER, SvgTextPainter, TextPainter, TextRun};

/// Re-export of the drawing backend, for implementing [`TextPainter`].
pub use resvg::tiny_skia;
