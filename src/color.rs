//! RGBA colors as they appear in tray settings.
//!
//! The settings editor stores colors as CSS strings, either hex
//! (`#C82018`, `#000`) or the `rgba(r, g, b, a)` form produced by its
//! color picker. [`Color`] parses both, prints the same forms back, and
//! converts to the drawing backend.

use std::fmt;
use std::str::FromStr;

use palette::{Srgb, Srgba};
use resvg::tiny_skia;

use crate::error::ComposeError;

/// A straight-alpha sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(Srgba<u8>);

impl Color {
    pub const BLACK: Self = Self::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Self = Self::rgb(0xFF, 0xFF, 0xFF);

    /// Creates an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 0xFF)
    }

    /// Creates a color with an explicit alpha channel.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(Srgba::new(r, g, b, a))
    }

    pub fn red(&self) -> u8 {
        self.0.red
    }

    pub fn green(&self) -> u8 {
        self.0.green
    }

    pub fn blue(&self) -> u8 {
        self.0.blue
    }

    pub fn alpha(&self) -> u8 {
        self.0.alpha
    }

    /// Returns true if the alpha channel is fully opaque.
    pub fn is_opaque(&self) -> bool {
        self.alpha() == 0xFF
    }

    /// Returns the color as `#rrggbb`, dropping alpha.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red(), self.green(), self.blue())
    }

    /// Converts to the drawing backend's color type.
    pub fn to_skia(&self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.red(), self.green(), self.blue(), self.alpha())
    }

    /// SVG presentation attributes that paint a shape with this color.
    ///
    /// SVG hex colors carry no alpha, so translucent colors get an extra
    /// `fill-opacity` attribute.
    pub fn to_svg_fill(&self) -> String {
        if self.is_opaque() {
            format!(r#"fill="{}""#, self.to_hex())
        } else {
            format!(
                r#"fill="{}" fill-opacity="{:.3}""#,
                self.to_hex(),
                self.alpha() as f32 / 255.0
            )
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl FromStr for Color {
    type Err = ComposeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || ComposeError::InvalidColor(s.to_string());

        if trimmed.eq_ignore_ascii_case("transparent") {
            return Ok(Self::rgba(0, 0, 0, 0));
        }

        if let Some(hex) = trimmed.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(invalid);
        }

        let lower = trimmed.to_ascii_lowercase();
        if let Some(args) = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_functional(args).ok_or_else(invalid);
        }

        Err(invalid())
    }
}

/// Parses `rgb`, `rrggbb` and `rrggbbaa` hex digits (no leading `#`).
fn parse_hex(hex: &str) -> Option<Color> {
    match hex.len() {
        3 | 6 => {
            let rgb: Srgb<u8> = hex.parse().ok()?;
            Some(Color::rgb(rgb.red, rgb.green, rgb.blue))
        }
        8 => {
            let rgb: Srgb<u8> = hex.get(..6)?.parse().ok()?;
            let alpha = u8::from_str_radix(hex.get(6..)?, 16).ok()?;
            Some(Color::rgba(rgb.red, rgb.green, rgb.blue, alpha))
        }
        _ => None,
    }
}

/// Parses the argument list of `rgb(...)` / `rgba(...)`.
///
/// Channels are 0-255 integers, alpha is a 0.0-1.0 fraction.
fn parse_functional(args: &str) -> Option<Color> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    let channel = |s: &str| -> Option<u8> {
        let v: f32 = s.parse().ok()?;
        Some(v.round().clamp(0.0, 255.0) as u8)
    };

    match parts.as_slice() {
        [r, g, b] => Some(Color::rgb(channel(r)?, channel(g)?, channel(b)?)),
        [r, g, b, a] => {
            let a: f32 = a.parse().ok()?;
            if !a.is_finite() {
                return None;
            }
            let a = (a.clamp(0.0, 1.0) * 255.0).round() as u8;
            Some(Color::rgba(channel(r)?, channel(g)?, channel(b)?, a))
        }
        _ => None,
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "{}", self.to_hex().to_uppercase())
        } else {
            write!(
                f,
                "rgba({}, {}, {}, {})",
                self.red(),
                self.green(),
                self.blue(),
                self.alpha() as f32 / 255.0
            )
        }
    }
}
