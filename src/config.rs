//! Generator configuration
//!
//! An optional TOML file supplies answer defaults and output settings:
//!
//! ```toml
//! [defaults]
//! methods = ["get", "post"]
//! class_package = "com.example.webscripts"
//!
//! [output]
//! locales = ["en", "fr"]
//! overwrite = false
//! ```
//!
//! Keys under `[defaults]` are question names. They replace the built-in
//! defaults but never a value given on the command line.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::filters::RawValue;
use crate::{paths, questions, render};

/// Configuration for webscript-gen
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: BTreeMap<String, DefaultValue>,
    #[serde(default)]
    pub output: OutputSection,
}

/// A default answer: text, or a list for multi-select questions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Text(String),
    List(Vec<String>),
}

impl From<&DefaultValue> for RawValue {
    fn from(value: &DefaultValue) -> Self {
        match value {
            DefaultValue::Text(text) => RawValue::Text(text.clone()),
            DefaultValue::List(items) => RawValue::List(items.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSection {
    /// Locales to write property files for; `en` is the unsuffixed base file
    #[serde(default = "default_locales")]
    pub locales: Vec<String>,
    /// Replace files that already exist in the output directory
    #[serde(default)]
    pub overwrite: bool,
}

fn default_locales() -> Vec<String> {
    render::LOCALES.iter().map(|l| l.to_string()).collect()
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            locales: default_locales(),
            overwrite: false,
        }
    }
}

impl Config {
    /// Load configuration
    ///
    /// An explicit path must exist. Without one the project config in `dir`
    /// is tried, then the user config; if neither exists the defaults apply.
    /// Returns the file the config came from, if any.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            let config = Self::load_from(path)?;
            return Ok((config, Some(path.to_path_buf())));
        }

        for candidate in paths::config_candidates(dir) {
            if candidate.exists() {
                let config = Self::load_from(&candidate)?;
                return Ok((config, Some(candidate)));
            }
        }

        Ok((Self::default(), None))
    }

    /// Load and validate a config file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Default answer for a question, if configured
    pub fn default_for(&self, name: &str) -> Option<RawValue> {
        self.defaults.get(name).map(RawValue::from)
    }

    fn validate(&self) -> Result<()> {
        let catalogue = questions::catalogue();
        for name in self.defaults.keys() {
            if !catalogue.iter().any(|q| q.name == name.as_str()) {
                anyhow::bail!(
                    "Unknown question '{}' in [defaults]. Known questions: {}",
                    name,
                    catalogue
                        .iter()
                        .map(|q| q.name)
                        .collect::<Vec<_>>()
                        .join(", ")
                );
            }
        }

        if self.output.locales.is_empty() {
            anyhow::bail!("[output] locales cannot be empty");
        }
        for locale in &self.output.locales {
            if !render::LOCALES.contains(&locale.as_str()) {
                anyhow::bail!(
                    "Unsupported locale '{}'. Supported: {}",
                    locale,
                    render::LOCALES.join(", ")
                );
            }
        }

        Ok(())
    }
}
