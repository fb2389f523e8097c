use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::charset::CHARSET_DIGITS;
use crate::rounding::RoundMethod;

/// Where a finished conversion is written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputTarget {
    /// Print the character grid to stdout.
    #[default]
    Console,
    /// Write a standalone HTML page.
    Html,
}

/// Engine configuration, sérialisable en TOML. Chaque champ a une valeur
/// par défaut saine.
///
/// # Example
/// ```
/// use gg_core::config::EngineConfig;
/// let config = EngineConfig::default();
/// assert_eq!(config.resolution, 2);
/// assert_eq!(config.charset, "0123456789");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Initial character set, one brightness level per distinct char.
    pub charset: String,
    /// Initial number of tile-columns per conversion.
    pub resolution: u32,
    /// Rounding policy for brightness matching.
    pub round: RoundMethod,
    /// Output target for `asciiArt`.
    pub output: OutputTarget,
    /// Destination file for HTML output.
    pub html_path: String,
    /// Font family declared in the HTML output.
    pub font_family: String,
    /// Optional TTF/OTF file for font-based glyph scoring. When absent the
    /// built-in bitmap rasterizer is used.
    pub font_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            charset: CHARSET_DIGITS.to_owned(),
            resolution: 2,
            round: RoundMethod::Nearest,
            output: OutputTarget::Console,
            html_path: "out.html".to_owned(),
            font_family: "Courier New".to_owned(),
            font_path: None,
        }
    }
}

impl EngineConfig {
    /// Loads a TOML config file. A missing file yields the defaults; an
    /// unreadable or malformed file is an error.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("config {} absent, using defaults", path.display());
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_historical_session() {
        let config = EngineConfig::default();
        assert_eq!(config.charset, "0123456789");
        assert_eq!(config.resolution, 2);
        assert_eq!(config.round, RoundMethod::Nearest);
        assert_eq!(config.output, OutputTarget::Console);
        assert_eq!(config.html_path, "out.html");
        assert_eq!(config.font_family, "Courier New");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = EngineConfig::load(Path::new("definitely/not/here.toml")).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn partial_toml_fills_remaining_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "charset = \" .:#@\"\nround = \"higher\"").unwrap();
        let config = EngineConfig::load(file.path()).unwrap();
        assert_eq!(config.charset, " .:#@");
        assert_eq!(config.round, RoundMethod::Higher);
        assert_eq!(config.resolution, 2);
    }

    #[test]
    fn toml_round_trips() {
        let config = EngineConfig::default();
        let raw = toml::to_string(&config).unwrap();
        let back: EngineConfig = toml::from_str(&raw).unwrap();
        assert_eq!(back, config);
    }
}
