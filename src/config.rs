// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Optional `quote.toml` configuration for branding, numbering, and assets.
//!
//! Every key has a default equal to the built-in quote layout, so the file is
//! only needed to override something. A missing file is not an error.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Environment variable that overrides the configuration file location.
pub const CONFIG_ENV_VAR: &str = "QUOTEPACK_CONFIG";
/// Configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "quote.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Font files used for Turkish glyph coverage.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FontConfig {
    pub regular: PathBuf,
    pub bold: PathBuf,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            regular: PathBuf::from("DejaVuSans.ttf"),
            bold: PathBuf::from("DejaVuSans-Bold.ttf"),
        }
    }
}

/// Quote layout and asset settings.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct QuoteConfig {
    /// Company name lines printed at the top of the document.
    pub brand_lines: Vec<String>,
    /// Document title printed under the brand.
    pub title: String,
    /// Prefix of the generated quote number.
    pub quote_prefix: String,
    /// Stem of the suggested output file name.
    pub file_stem: String,
    /// Boilerplate notes printed under the table.
    pub notes: Vec<String>,
    /// Logo file names tried in order for the watermark.
    pub logo_candidates: Vec<String>,
    /// Directory that relative font and logo paths are resolved against.
    pub assets_dir: PathBuf,
    pub fonts: FontConfig,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            brand_lines: vec![
                "BULDUMLAR BİBER & BAHARAT".to_string(),
                "ENTEGRE TESİSLERİ".to_string(),
            ],
            title: "FİYAT TEKLİFİ".to_string(),
            quote_prefix: "BLD".to_string(),
            file_stem: "quote".to_string(),
            notes: vec![
                "Fiyatlar Türk Lirası cinsindendir.".to_string(),
                "Fiyatlar kilogram ve belirtilen ambalaj bazında verilmiştir.".to_string(),
                "Minimum sipariş miktarları için ayrıca bilgi verilecektir.".to_string(),
                "Teslim süresi sipariş onayından sonra belirlenecektir.".to_string(),
            ],
            logo_candidates: ["logo.png", "logo.jpg", "logo.jpeg", "Logo.png", "LOGO.png"]
                .into_iter()
                .map(String::from)
                .collect(),
            assets_dir: PathBuf::from("."),
            fonts: FontConfig::default(),
        }
    }
}

impl QuoteConfig {
    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!("Loading configuration from {:?}", path);
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}

/// Load the configuration from `$QUOTEPACK_CONFIG` or `./quote.toml`.
///
/// Falls back to defaults when the file is absent or invalid; invalid files
/// are reported in the log rather than aborting start-up.
pub fn load_or_default() -> QuoteConfig {
    let path = std::env::var_os(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    load_from(&path)
}

fn load_from(path: &Path) -> QuoteConfig {
    match QuoteConfig::load(path) {
        Ok(config) => {
            info!("Loaded configuration from {:?}", path);
            config
        }
        Err(ConfigError::Read { source, .. })
            if source.kind() == std::io::ErrorKind::NotFound =>
        {
            info!("No configuration file at {:?}; using defaults", path);
            QuoteConfig::default()
        }
        Err(err) => {
            warn!("{err}; using defaults");
            QuoteConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = QuoteConfig::parse("").unwrap();
        assert_eq!(config, QuoteConfig::default());
        assert_eq!(config.logo_candidates[0], "logo.png");
        assert_eq!(config.fonts.bold, PathBuf::from("DejaVuSans-Bold.ttf"));
    }

    #[test]
    fn partial_file_overrides_only_given_keys() {
        let config = QuoteConfig::parse(
            r#"
            quote_prefix = "ACME"
            notes = ["Prices valid for 7 days."]

            [fonts]
            regular = "fonts/Regular.ttf"
            "#,
        )
        .unwrap();

        assert_eq!(config.quote_prefix, "ACME");
        assert_eq!(config.notes, vec!["Prices valid for 7 days."]);
        assert_eq!(config.fonts.regular, PathBuf::from("fonts/Regular.ttf"));
        assert_eq!(config.fonts.bold, FontConfig::default().bold);
        assert_eq!(config.title, QuoteConfig::default().title);
    }

    #[test]
    fn load_reports_parse_errors() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("quote.toml");
        fs::write(&path, "quote_prefix = [").unwrap();

        let err = QuoteConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn load_from_falls_back_when_missing_or_invalid() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(
            load_from(&tmp.path().join("absent.toml")),
            QuoteConfig::default()
        );

        let bad = tmp.path().join("bad.toml");
        fs::write(&bad, "title = 5").unwrap();
        assert_eq!(load_from(&bad), QuoteConfig::default());
    }

    #[test]
    fn load_from_reads_valid_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("quote.toml");
        fs::write(&path, "title = \"PRICE QUOTE\"\nfile_stem = \"offer\"\n").unwrap();

        let config = load_from(&path);
        assert_eq!(config.title, "PRICE QUOTE");
        assert_eq!(config.file_stem, "offer");
    }
}
