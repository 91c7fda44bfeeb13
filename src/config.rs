use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::analyzers::bucket::Thresholds;
use crate::parser::DEFAULT_DELIMITER;

/// Run settings. Every field has a default, so a config file only needs the
/// keys it wants to change:
/// ```json
/// {
///   "input": "data/rollercoasters.csv",
///   "low_threshold": 12.5
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub input: PathBuf,
    pub delimiter: char,
    pub low_threshold: f64,
    pub high_threshold: f64,
}

impl Default for Settings {
    fn default() -> Self {
        let thresholds = Thresholds::default();
        Settings {
            input: PathBuf::from("rollercoasters.csv"),
            delimiter: DEFAULT_DELIMITER,
            low_threshold: thresholds.low,
            high_threshold: thresholds.high,
        }
    }
}

impl Settings {
    /// Loads settings from a JSON file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config '{}'", path.display()))?;
        let settings: Settings = serde_json::from_str(&content)
            .with_context(|| format!("invalid config '{}'", path.display()))?;
        settings.validate()
    }

    /// Applies `COASTER_*` environment variables on top of `self`.
    pub fn from_env(self) -> Result<Self> {
        self.overlay(|key| std::env::var(key).ok())
    }

    fn overlay(mut self, var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(input) = var("COASTER_CSV") {
            self.input = PathBuf::from(input);
        }
        if let Some(delimiter) = var("COASTER_DELIMITER") {
            self.delimiter = parse_delimiter(&delimiter)?;
        }
        if let Some(low) = var("COASTER_LOW_THRESHOLD") {
            self.low_threshold = low
                .trim()
                .parse()
                .with_context(|| format!("COASTER_LOW_THRESHOLD is not a number: '{low}'"))?;
        }
        if let Some(high) = var("COASTER_HIGH_THRESHOLD") {
            self.high_threshold = high
                .trim()
                .parse()
                .with_context(|| format!("COASTER_HIGH_THRESHOLD is not a number: '{high}'"))?;
        }
        self.validate()
    }

    fn validate(self) -> Result<Self> {
        if !self.delimiter.is_ascii() {
            bail!("delimiter {:?} must be a single ASCII character", self.delimiter);
        }
        if self.low_threshold > self.high_threshold {
            bail!(
                "low threshold {} is above high threshold {}",
                self.low_threshold,
                self.high_threshold
            );
        }
        Ok(self)
    }

    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            low: self.low_threshold,
            high: self.high_threshold,
        }
    }
}

/// Accepts exactly one character, with `\t` spelled out for tabs.
pub fn parse_delimiter(raw: &str) -> Result<char> {
    if raw == "\\t" {
        return Ok('\t');
    }

    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => bail!("delimiter must be a single character, got '{raw}'"),
    }
}
