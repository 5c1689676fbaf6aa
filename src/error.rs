//! Error types for icon composition.

use thiserror::Error;

/// Errors that can occur while building a config or composing an icon.
///
/// Every failure is reported to the caller. Nothing is retried and no
/// partial surface is ever returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComposeError {
    /// The platform name is not one of mac, windows or linux.
    #[error("unsupported platform: {0:?}")]
    UnsupportedPlatform(String),

    /// A settings value is out of range.
    #[error("invalid icon config: {0}")]
    InvalidConfig(String),

    /// A color string could not be parsed.
    #[error("invalid color: {0:?}")]
    InvalidColor(String),

    /// The mail glyph asset could not be decoded.
    #[error("failed to decode glyph asset: {0}")]
    AssetDecode(String),

    /// A numeral or marker could not be laid out.
    #[error("failed to lay out text: {0}")]
    Text(String),

    /// The drawing surface could not be allocated.
    #[error("failed to allocate a {width}x{height} drawing surface")]
    Surface { width: u32, height: u32 },

    /// The rendered surface could not be encoded.
    #[error("failed to encode icon: {0}")]
    Encode(String),
}

/// Result alias used throughout the crate.
pub type Result<T, E = ComposeError> = std::result::Result<T, E>;
