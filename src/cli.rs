//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - Flags override values from the XML config file, which override built-in defaults.
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, ValueHint};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{Config, LogLevel, Mode};

/// Sort files into category folders by extension.
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Move files into category folders (Images, Documents, ...) once or continuously"
)]
pub struct Args {
    /// Source directory to search (default: current directory).
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub source: Option<PathBuf>,

    /// Destination directory (default: ./organized).
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub dest: Option<PathBuf>,

    /// once: scan and exit; watch: keep running and sort new files.
    #[arg(long, value_enum)]
    pub mode: Option<Mode>,

    /// Dry run: report moves without touching the filesystem.
    #[arg(long)]
    pub dry: bool,

    /// Do not descend into subdirectories.
    #[arg(long)]
    pub no_recursive: bool,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Also write logs to this file.
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON.
    #[arg(long)]
    pub json: bool,

    /// Print where the config file is looked up, then exit.
    #[arg(long)]
    pub print_config: bool,

    /// Milliseconds between size polls when waiting for a file to settle.
    #[arg(long, value_name = "MS")]
    pub stability_interval_ms: Option<u64>,

    /// Size polls before a file is skipped as still changing.
    #[arg(long, value_name = "N")]
    pub stability_attempts: Option<u32>,

    /// Also skip files another process holds an advisory lock on.
    #[arg(long)]
    pub lock: bool,

    /// Watch mode: also watch directories created after startup.
    #[arg(long)]
    pub follow_new_dirs: bool,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(s) = &self.source {
            cfg.source = s.clone();
        }
        if let Some(d) = &self.dest {
            cfg.dest = d.clone();
        }
        if let Some(m) = self.mode {
            cfg.mode = m;
        }
        if self.dry {
            cfg.dry_run = true;
        }
        if self.no_recursive {
            cfg.recursive = false;
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(f) = &self.log_file {
            cfg.log_file = Some(f.clone());
        }
        if let Some(ms) = self.stability_interval_ms {
            cfg.stability.interval = Duration::from_millis(ms);
        }
        if let Some(n) = self.stability_attempts {
            cfg.stability.max_attempts = n;
        }
        if self.lock {
            cfg.lock_files = true;
        }
        if self.follow_new_dirs {
            cfg.follow_new_dirs = true;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
