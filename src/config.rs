// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Jason Ish

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::layout::CellMetrics;
use crate::render::Font;
use crate::style::Palette;

const DEFAULT_BLINK_INTERVAL_MS: u64 = 500;

/// Everything a [`crate::ConsoleView`] needs that is not content.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub cells: CellMetrics,
    pub blink_interval_ms: u64,
    pub font: Font,
    pub palette: Palette,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            cells: CellMetrics::default(),
            blink_interval_ms: DEFAULT_BLINK_INTERVAL_MS,
            font: Font::default(),
            palette: Palette::default(),
        }
    }
}

impl ViewConfig {
    /// `<config dir>/conview/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("conview").join("config.toml"))
    }

    /// Load from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.cells.cell_width == 0 || self.cells.cell_height == 0 {
            return Err(Error::InvalidConfig(
                "cell_width and cell_height must be greater than zero".to_string(),
            ));
        }
        if !self.cells.row_height_factor.is_finite() || self.cells.row_height_factor <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "row_height_factor must be a positive number, got {}",
                self.cells.row_height_factor
            )));
        }
        if self.blink_interval_ms == 0 {
            return Err(Error::InvalidConfig(
                "blink_interval_ms must be greater than zero".to_string(),
            ));
        }
        if !(self.font.size > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "font size must be positive, got {}",
                self.font.size
            )));
        }
        Ok(())
    }

    pub fn blink_interval(&self) -> Duration {
        Duration::from_millis(self.blink_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::ColorRef;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ViewConfig::load(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, ViewConfig::default());
        assert_eq!(config.blink_interval(), Duration::from_millis(500));
        assert_eq!(config.palette.background, ColorRef::BLACK);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r##"
blink_interval_ms = 250

[cells]
cell_width = 8

[palette]
text = "#ffffff"
prompt = "cyan"
"##,
        )
        .unwrap();

        let config = ViewConfig::load(&path).unwrap();
        assert_eq!(config.blink_interval_ms, 250);
        assert_eq!(config.cells.cell_width, 8);
        assert_eq!(config.cells.cell_height, 12);
        assert_eq!(config.palette.text, ColorRef::WHITE);
        assert_eq!(config.palette.prompt, ColorRef::CYAN);
        assert_eq!(config.palette.cursor, ColorRef::LIME);
        assert_eq!(config.font.family, "Courier New");
    }

    #[test]
    fn test_bad_color_is_a_content_error() {
        let err = ViewConfig::parse("[palette]\ntext = \"#12\"\n").unwrap_err();
        assert!(err.is_config_content());
    }

    #[test]
    fn test_zero_cell_width_rejected() {
        let err = ViewConfig::parse("[cells]\ncell_width = 0\n").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_zero_blink_rejected() {
        let err = ViewConfig::parse("blink_interval_ms = 0\n").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_unreadable_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory exists but cannot be read as a file.
        let err = ViewConfig::load(dir.path()).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_config_content());
    }
}
