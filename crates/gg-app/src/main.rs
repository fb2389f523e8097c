use std::io::{BufReader, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use gg_core::config::{EngineConfig, OutputTarget};
use gg_core::rounding::RoundMethod;
use gg_image::decode::decode_image;
use gg_match::matcher::CharMatcher;
use gg_match::raster::{BitmapRasterizer, FontRasterizer, GlyphRasterizer};

pub mod cli;
pub mod engine;
pub mod session;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    let config = resolve_config(&cli)?;

    // Image decode failure is fatal for the session.
    let image = Arc::new(decode_image(&cli.image)?);

    let rasterizer: Box<dyn GlyphRasterizer> = match &config.font_path {
        Some(path) => {
            let data = std::fs::read(path)
                .with_context(|| format!("failed to read font {}", path.display()))?;
            Box::new(FontRasterizer::new(data)?)
        }
        None => Box::new(BitmapRasterizer),
    };

    let chars: Vec<char> = config.charset.chars().collect();
    let matcher = CharMatcher::new(&chars, rasterizer)
        .context("initial charset must not be empty")?;

    let engine = engine::Engine::new(image, matcher, config.resolution, config.round)
        .context("initial resolution rejected")?;
    log::info!(
        "resolution bounds [{}, {}], starting at {} (rounding: {})",
        engine.min_resolution(),
        engine.max_resolution(),
        engine.resolution(),
        engine.round_method()
    );

    let stdout = std::io::stdout();
    let mut session = session::Session::new(
        engine,
        config.output,
        config.html_path,
        config.font_family,
        stdout.lock(),
    );
    session.run_loop(BufReader::new(std::io::stdin()))?;
    writeln!(std::io::stdout())?;
    Ok(())
}

/// Loads the config file, then layers CLI overrides on top, the way
/// explicit flags always beat file contents.
fn resolve_config(cli: &cli::Cli) -> Result<EngineConfig> {
    let mut config = EngineConfig::load(&cli.config)?;

    if let Some(ref charset) = cli.charset {
        config.charset.clone_from(charset);
    }
    if let Some(resolution) = cli.resolution {
        config.resolution = resolution;
    }
    if let Some(ref round) = cli.round {
        match round.parse::<RoundMethod>() {
            Ok(method) => config.round = method,
            Err(_) => log::warn!("unknown rounding method {round:?}, keeping {}", config.round),
        }
    }
    if let Some(ref output) = cli.output {
        config.output = match output.as_str() {
            "console" => OutputTarget::Console,
            "html" => OutputTarget::Html,
            other => {
                log::warn!("unknown output target {other:?}, keeping the default");
                config.output
            }
        };
    }
    if let Some(ref path) = cli.html_out {
        config.html_path = path.display().to_string();
    }
    if let Some(ref family) = cli.font_family {
        config.font_family.clone_from(family);
    }
    if let Some(ref font) = cli.font {
        config.font_path = Some(font.clone());
    }
    Ok(config)
}
