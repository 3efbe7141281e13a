//! XML configuration support.
//! - Loads optional settings from config.xml (quick_xml + serde).
//! - A missing file means "no overrides"; a malformed file or unknown field is an error.
//!
//! Example:
//! <config>
//!   <source>/home/me/Downloads</source>
//!   <dest>/home/me/Sorted</dest>
//!   <mode>watch</mode>
//!   <stability_interval_ms>750</stability_interval_ms>
//! </config>

use anyhow::{Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use super::paths::default_config_path;
use super::types::{Config, LogLevel, Mode};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
pub struct XmlConfig {
    pub source: Option<String>,
    pub dest: Option<String>,
    pub mode: Option<String>,
    pub dry_run: Option<bool>,
    pub recursive: Option<bool>,
    pub log_level: Option<String>,
    pub log_file: Option<String>,
    #[serde(default, deserialize_with = "de_u64_trimmed_opt")]
    pub stability_interval_ms: Option<u64>,
    #[serde(default, deserialize_with = "de_u64_trimmed_opt")]
    pub stability_attempts: Option<u64>,
    pub lock_files: Option<bool>,
    pub follow_new_dirs: Option<bool>,
}

// Custom deserializer that trims surrounding whitespace for optional u64
fn de_u64_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<u64>().map(Some).map_err(serde::de::Error::custom),
    }
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl XmlConfig {
    /// Overlay the values present in the file onto `cfg`.
    pub fn apply(&self, cfg: &mut Config) -> Result<()> {
        if let Some(s) = non_empty(&self.source) {
            cfg.source = PathBuf::from(s);
        }
        if let Some(d) = non_empty(&self.dest) {
            cfg.dest = PathBuf::from(d);
        }
        if let Some(m) = non_empty(&self.mode) {
            cfg.mode = m.parse::<Mode>()?;
        }
        if let Some(v) = self.dry_run {
            cfg.dry_run = v;
        }
        if let Some(v) = self.recursive {
            cfg.recursive = v;
        }
        if let Some(l) = non_empty(&self.log_level) {
            cfg.log_level = l.parse::<LogLevel>().map_err(anyhow::Error::msg)?;
        }
        if let Some(f) = non_empty(&self.log_file) {
            cfg.log_file = Some(PathBuf::from(f));
        }
        if let Some(ms) = self.stability_interval_ms {
            cfg.stability.interval = Duration::from_millis(ms);
        }
        if let Some(n) = self.stability_attempts {
            cfg.stability.max_attempts = u32::try_from(n).unwrap_or(u32::MAX);
        }
        if let Some(v) = self.lock_files {
            cfg.lock_files = v;
        }
        if let Some(v) = self.follow_new_dirs {
            cfg.follow_new_dirs = v;
        }
        Ok(())
    }
}

/// Parse a config file at an explicit path.
pub fn load_config_from_xml_path(path: &Path) -> Result<XmlConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    from_xml_str(&contents).with_context(|| format!("parse config xml '{}'", path.display()))
}

/// Load the config file at the default location, if one exists.
pub fn load_config_from_xml() -> Result<Option<(PathBuf, XmlConfig)>> {
    let Some(path) = default_config_path() else {
        return Ok(None);
    };
    if !path.exists() {
        debug!(path = %path.display(), "no config file; using defaults");
        return Ok(None);
    }
    let parsed = load_config_from_xml_path(&path)?;
    debug!(path = %path.display(), "loaded config file");
    Ok(Some((path, parsed)))
}
