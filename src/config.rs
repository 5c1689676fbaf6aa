//! Tray icon configuration.
//!
//! Callers hand over a [`TraySettings`] record in which every field is
//! optional, the shape the settings store and editor work with. It is merged
//! with the defaults into a fully populated, immutable [`IconConfig`] by a
//! pure function; the caller's record is never touched.
//!
//! # Example
//!
//! ```
//! use mailtray_icon::{IconConfig, Platform, TraySettings};
//!
//! let settings = TraySettings::from_json(r##"{ "unreadCount": 3, "platform": "linux" }"##).unwrap();
//! let config = IconConfig::from_settings(&settings).unwrap();
//!
//! assert_eq!(config.platform, Platform::Linux);
//! assert_eq!(config.unread_count, 3);
//! assert_eq!(config.size, 100);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{ComposeError, Result};

/// Highest accepted corner-rounding value. At this value the badge is
/// fully round.
pub const MAX_RADIUS: u8 = 5;

/// Largest effective (physical) icon edge, in pixels.
pub const MAX_PIXEL_SIZE: u32 = 4096;

// ============================================================================
// Platform
// ============================================================================

/// The desktop platform whose tray conventions the icon follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Platform {
    Mac,
    Windows,
    Linux,
}

impl Platform {
    /// Returns the platform this binary was built for.
    ///
    /// Fails with [`ComposeError::UnsupportedPlatform`] on anything other
    /// than macOS, Windows or Linux.
    pub fn current() -> Result<Self> {
        std::env::consts::OS.parse()
    }

    /// Stable lowercase name, as used in settings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mac => "mac",
            Self::Windows => "windows",
            Self::Linux => "linux",
        }
    }
}

impl FromStr for Platform {
    type Err = ComposeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mac" | "macos" | "darwin" => Ok(Self::Mac),
            "windows" | "win32" => Ok(Self::Windows),
            "linux" => Ok(Self::Linux),
            _ => Err(ComposeError::UnsupportedPlatform(s.to_string())),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// TraySettings
// ============================================================================

/// Partial tray icon settings, as stored by the settings editor.
///
/// Unset fields fall back to the defaults documented on [`IconConfig`].
///
/// # JSON Format
///
/// ```json
/// {
///   "unreadCount": 12,
///   "showUnreadCount": true,
///   "unreadColor": "rgba(0, 0, 0, 1)",
///   "readColor": "#C82018",
///   "unreadRadius": 5,
///   "platform": "darwin"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct TraySettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pixel_ratio: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unread_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_unread_count: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unread_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unread_background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unread_radius: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_radius: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thick: Option<bool>,
    /// Platform name; `mac`/`macos`/`darwin`, `windows`/`win32` or `linux`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

impl TraySettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes the settings to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the settings to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes settings from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// ============================================================================
// IconConfig
// ============================================================================

/// Foreground, background and corner rounding for one read state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeStyle {
    pub foreground: Color,
    pub background: Color,
    /// Corner rounding, 0 (square) to [`MAX_RADIUS`] (round).
    pub radius: u8,
}

/// Fully populated configuration for a single render.
///
/// Defaults, as applied by [`IconConfig::new`] and [`IconConfig::from_settings`]:
///
/// | field | default |
/// |---|---|
/// | `pixel_ratio` | 1.0 |
/// | `unread_count` | 0 |
/// | `show_unread_count` | true |
/// | `unread_color` | `#000000` |
/// | `read_color` | `#C82018` |
/// | backgrounds | `#FFFFFF` |
/// | radii | 5 |
/// | `size` | 100 |
/// | `thick` | true on Windows only |
#[derive(Debug, Clone, PartialEq)]
pub struct IconConfig {
    pub pixel_ratio: f32,
    pub unread_count: u32,
    pub show_unread_count: bool,
    pub unread_color: Color,
    pub read_color: Color,
    pub unread_background_color: Color,
    pub read_background_color: Color,
    pub unread_radius: u8,
    pub read_radius: u8,
    /// Logical edge length before scaling by `pixel_ratio`.
    pub size: u32,
    /// Draws the mail glyph at full icon size instead of half.
    pub thick: bool,
    pub platform: Platform,
}

impl IconConfig {
    /// Creates a config with all defaults for the given platform.
    pub fn new(platform: Platform) -> Self {
        Self {
            pixel_ratio: 1.0,
            unread_count: 0,
            show_unread_count: true,
            unread_color: Color::BLACK,
            read_color: Color::rgb(0xC8, 0x20, 0x18),
            unread_background_color: Color::WHITE,
            read_background_color: Color::WHITE,
            unread_radius: MAX_RADIUS,
            read_radius: MAX_RADIUS,
            size: 100,
            thick: platform == Platform::Windows,
            platform,
        }
    }

    /// Merges partial settings over the defaults and validates the result.
    ///
    /// A missing platform resolves to [`Platform::current`].
    pub fn from_settings(settings: &TraySettings) -> Result<Self> {
        let platform = match settings.platform.as_deref() {
            Some(name) => name.parse()?,
            None => Platform::current()?,
        };

        let defaults = Self::new(platform);
        let color = |value: &Option<String>, fallback: Color| -> Result<Color> {
            value.as_deref().map_or(Ok(fallback), str::parse::<Color>)
        };

        let config = Self {
            pixel_ratio: settings.pixel_ratio.unwrap_or(defaults.pixel_ratio),
            unread_count: settings.unread_count.unwrap_or(defaults.unread_count),
            show_unread_count: settings
                .show_unread_count
                .unwrap_or(defaults.show_unread_count),
            unread_color: color(&settings.unread_color, defaults.unread_color)?,
            read_color: color(&settings.read_color, defaults.read_color)?,
            unread_background_color: color(
                &settings.unread_background_color,
                defaults.unread_background_color,
            )?,
            read_background_color: color(
                &settings.read_background_color,
                defaults.read_background_color,
            )?,
            unread_radius: settings.unread_radius.unwrap_or(defaults.unread_radius),
            read_radius: settings.read_radius.unwrap_or(defaults.read_radius),
            size: settings.size.unwrap_or(defaults.size),
            thick: settings.thick.unwrap_or(defaults.thick),
            platform,
        };

        config.validate()?;
        Ok(config)
    }

    /// Exports this config as a fully specified settings record.
    pub fn to_settings(&self) -> TraySettings {
        TraySettings {
            pixel_ratio: Some(self.pixel_ratio),
            unread_count: Some(self.unread_count),
            show_unread_count: Some(self.show_unread_count),
            unread_color: Some(self.unread_color.to_string()),
            read_color: Some(self.read_color.to_string()),
            unread_background_color: Some(self.unread_background_color.to_string()),
            read_background_color: Some(self.read_background_color.to_string()),
            unread_radius: Some(self.unread_radius),
            read_radius: Some(self.read_radius),
            size: Some(self.size),
            thick: Some(self.thick),
            platform: Some(self.platform.to_string()),
        }
    }

    /// Checks value ranges. Called by [`from_settings`](Self::from_settings)
    /// and by the composer before drawing.
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(ComposeError::InvalidConfig("size must be positive".into()));
        }
        if !self.pixel_ratio.is_finite() || self.pixel_ratio <= 0.0 {
            return Err(ComposeError::InvalidConfig(format!(
                "pixel ratio must be a positive number, got {}",
                self.pixel_ratio
            )));
        }
        for (name, radius) in [
            ("unread radius", self.unread_radius),
            ("read radius", self.read_radius),
        ] {
            if radius > MAX_RADIUS {
                return Err(ComposeError::InvalidConfig(format!(
                    "{name} must be between 0 and {MAX_RADIUS}, got {radius}"
                )));
            }
        }
        let pixel_size = self.size as f32 * self.pixel_ratio;
        if pixel_size.round() < 1.0 || pixel_size > MAX_PIXEL_SIZE as f32 {
            return Err(ComposeError::InvalidConfig(format!(
                "effective icon size {pixel_size} is outside 1..={MAX_PIXEL_SIZE}"
            )));
        }
        Ok(())
    }

    /// Edge length of the rendered surface in physical pixels.
    pub fn pixel_size(&self) -> u32 {
        (self.size as f32 * self.pixel_ratio).round() as u32
    }

    /// True when there is at least one unread item.
    pub fn has_unread(&self) -> bool {
        self.unread_count > 0
    }

    /// Returns the style of the current read state. Exactly one of the
    /// unread/read pairs is active, chosen by `unread_count > 0`.
    pub fn active_style(&self) -> BadgeStyle {
        if self.has_unread() {
            BadgeStyle {
                foreground: self.unread_color,
                background: self.unread_background_color,
                radius: self.unread_radius,
            }
        } else {
            BadgeStyle {
                foreground: self.read_color,
                background: self.read_background_color,
                radius: self.read_radius,
            }
        }
    }

    pub fn with_pixel_ratio(mut self, pixel_ratio: f32) -> Self {
        self.pixel_ratio = pixel_ratio;
        self
    }

    pub fn with_unread_count(mut self, unread_count: u32) -> Self {
        self.unread_count = unread_count;
        self
    }

    pub fn with_show_unread_count(mut self, show: bool) -> Self {
        self.show_unread_count = show;
        self
    }

    pub fn with_unread_colors(mut self, foreground: Color, background: Color) -> Self {
        self.unread_color = foreground;
        self.unread_background_color = background;
        self
    }

    pub fn with_read_colors(mut self, foreground: Color, background: Color) -> Self {
        self.read_color = foreground;
        self.read_background_color = background;
        self
    }

    pub fn with_unread_radius(mut self, radius: u8) -> Self {
        self.unread_radius = radius;
        self
    }

    pub fn with_read_radius(mut self, radius: u8) -> Self {
        self.read_radius = radius;
        self
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    pub fn with_thick(mut self, thick: bool) -> Self {
        self.thick = thick;
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
