//! Renders a tray icon to a PNG file.
//!
//! Settings are read from an optional JSON file in the settings-store
//! format; command line flags override individual fields.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use mailtray_icon::{IconComposer, IconConfig, Platform, SvgTextPainter, TraySettings};

#[derive(Debug, Parser)]
#[command(about = "Render an unread-mail tray icon as PNG")]
struct Args {
    /// JSON settings file (camelCase keys, e.g. `unreadColor`).
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Tray variant to draw. Defaults to the host platform.
    #[arg(long, value_enum)]
    platform: Option<Platform>,

    /// Number of unread items.
    #[arg(long)]
    unread: Option<u32>,

    /// Draw the activity marker instead of the unread count.
    #[arg(long)]
    hide_count: bool,

    /// Logical icon size in pixels.
    #[arg(long)]
    size: Option<u32>,

    /// Display scale factor.
    #[arg(long)]
    pixel_ratio: Option<f32>,

    /// Font file for numerals, instead of the system fonts.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Print the merged settings as JSON and exit.
    #[arg(long)]
    print_settings: bool,

    /// Output PNG path.
    #[arg(short, long, default_value = "tray-icon.png")]
    output: PathBuf,
}

impl Args {
    fn settings(&self) -> Result<TraySettings> {
        let mut settings = match &self.settings {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                TraySettings::from_json(&json)
                    .with_context(|| format!("failed to parse {}", path.display()))?
            }
            None => TraySettings::new(),
        };

        if let Some(platform) = self.platform {
            settings.platform = Some(platform.to_string());
        }
        if let Some(unread) = self.unread {
            settings.unread_count = Some(unread);
        }
        if self.hide_count {
            settings.show_unread_count = Some(false);
        }
        if let Some(size) = self.size {
            settings.size = Some(size);
        }
        if let Some(pixel_ratio) = self.pixel_ratio {
            settings.pixel_ratio = Some(pixel_ratio);
        }
        Ok(settings)
    }

    fn composer(&self) -> Result<IconComposer> {
        let painter = match &self.font {
            Some(path) => {
                let data = std::fs::read(path)
                    .with_context(|| format!("failed to read font {}", path.display()))?;
                SvgTextPainter::from_font_data(data)
            }
            None => SvgTextPainter::system(),
        };
        Ok(IconComposer::with_text_painter(painter))
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = IconConfig::from_settings(&args.settings()?)?;

    if args.print_settings {
        println!("{}", config.to_settings().to_json_pretty()?);
        return Ok(());
    }

    let icon = args.composer()?.compose(&config)?;
    std::fs::write(&args.output, icon.to_png()?)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    let size = icon.dimensions();
    log::info!(
        "wrote {} ({}x{} @{}x, {})",
        args.output.display(),
        size.width,
        size.height,
        icon.pixel_ratio(),
        config.platform
    );

    Ok(())
}
