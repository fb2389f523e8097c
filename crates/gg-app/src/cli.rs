use std::path::PathBuf;

use clap::Parser;

/// glyphgrid — interactive image-to-ASCII-art engine.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Image to convert (PNG, JPEG, BMP, GIF).
    pub image: PathBuf,

    /// TOML config file. Missing file means defaults.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Initial character set (overrides the config).
    #[arg(long)]
    pub charset: Option<String>,

    /// Initial resolution in tile-columns (overrides the config).
    #[arg(long)]
    pub resolution: Option<u32>,

    /// Rounding policy: lower, higher, abs.
    #[arg(long)]
    pub round: Option<String>,

    /// Output target: console, html.
    #[arg(long)]
    pub output: Option<String>,

    /// Destination file for HTML output.
    #[arg(long)]
    pub html_out: Option<PathBuf>,

    /// Font family declared in HTML output.
    #[arg(long)]
    pub font_family: Option<String>,

    /// TTF/OTF font for glyph scoring. Default: built-in bitmap rasterizer.
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Log level: error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
