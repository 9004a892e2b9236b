//! `sharpcraft.toml`. Every key is optional.
//!
//! ```toml
//! [scan]
//! timeout_secs = 60
//! max_complexity = 10
//! workers = 0          # 0: half the cores
//!
//! [convert]
//! convert_strings = false
//! strict = false
//! identifier_map = { OldName = "NewName" }
//!
//! [parser]
//! preprocessor_symbols = ["DEBUG"]
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::application::converter::ConvertOptions;

pub const CONFIG_FILE: &str = "sharpcraft.toml";

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub scan: ScanConfig,
    pub convert: ConvertOptions,
    pub parser: ParserConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScanConfig {
    pub timeout_secs: u64,
    pub max_complexity: usize,
    pub workers: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig { timeout_secs: 60, max_complexity: 10, workers: 0 }
    }
}

impl ScanConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ParserConfig {
    pub preprocessor_symbols: Vec<String>,
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Invalid sharpcraft configuration")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::from_toml(&text).with_context(|| format!("In {}", path.display()))?;
        debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// The explicit file if given, else `./sharpcraft.toml` when present,
    /// else defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None if Path::new(CONFIG_FILE).is_file() => Self::load(Path::new(CONFIG_FILE)),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.scan.timeout(), Duration::from_secs(60));
        assert_eq!(config.scan.max_complexity, 10);
    }

    #[test]
    fn every_section_is_read() {
        let config = Config::from_toml(
            r#"
[scan]
timeout_secs = 5
workers = 2

[convert]
strict = true
identifier_map = { Foo = "Bar" }

[parser]
preprocessor_symbols = ["DEBUG", "TRACE"]
"#,
        )
        .unwrap();
        assert_eq!(config.scan, ScanConfig { timeout_secs: 5, max_complexity: 10, workers: 2 });
        assert!(config.convert.strict);
        assert!(!config.convert.convert_strings);
        assert_eq!(config.convert.identifier_map.get("Foo").map(String::as_str), Some("Bar"));
        assert_eq!(config.parser.preprocessor_symbols, vec!["DEBUG", "TRACE"]);
    }

    #[test]
    fn unknown_types_are_rejected() {
        assert!(Config::from_toml("[scan]\ntimeout_secs = \"soon\"").is_err());
    }

    #[test]
    fn load_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[scan]\nmax_complexity = 3\n").unwrap();
        assert_eq!(Config::load(&path).unwrap().scan.max_complexity, 3);

        let missing = dir.path().join("nope.toml");
        let err = Config::load(&missing).unwrap_err();
        assert!(format!("{err:#}").contains("nope.toml"));
    }
}
