//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - Mode selects one-shot scanning or continuous watching.
//! - LogLevel represents verbosity with simple parsing helpers.

use clap::ValueEnum;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::errors::OrganizerError;
use crate::fs_ops::StabilityPolicy;

use super::{DEST_DEFAULT, SOURCE_DEFAULT};

/// How the source directory is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Mode {
    /// Walk the source tree once and exit.
    #[default]
    Once,
    /// Subscribe to change notifications and run until interrupted.
    Watch,
}

impl FromStr for Mode {
    type Err = OrganizerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "once" => Ok(Mode::Once),
            "watch" => Ok(Mode::Watch),
            _ => Err(OrganizerError::InvalidMode(s.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Once => "once",
            Mode::Watch => "watch",
        })
    }
}

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory scanned or watched for new files
    pub source: PathBuf,
    /// Root of the category folders; never treated as input
    pub dest: PathBuf,
    pub mode: Mode,
    /// If true, report actions but do not modify the filesystem
    pub dry_run: bool,
    /// Descend into subdirectories of the source
    pub recursive: bool,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    pub stability: StabilityPolicy,
    /// Also require that no advisory lock is held on the file
    pub lock_files: bool,
    /// Watch mode: subscribe directories created after startup
    pub follow_new_dirs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: PathBuf::from(SOURCE_DEFAULT),
            dest: PathBuf::from(DEST_DEFAULT),
            mode: Mode::Once,
            dry_run: false,
            recursive: true,
            log_level: LogLevel::Normal,
            log_file: None,
            stability: StabilityPolicy::default(),
            lock_files: false,
            follow_new_dirs: false,
        }
    }
}

impl Config {
    /// Construct a Config with explicit directories; other fields use defaults.
    pub fn new(source: impl Into<PathBuf>, dest: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
            ..Default::default()
        }
    }
}
