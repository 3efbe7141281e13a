//! Setup validation.
//! Verifies the source directory, creates the destination when missing, and rewrites both
//! to canonical absolute paths so later containment checks are component-wise.

use std::fs;
use std::path::Path;
use tracing::{debug, error, info};

use crate::errors::OrganizerError;
use crate::utils::normalize;

use super::types::Config;

impl Config {
    /// Validate and normalize `source`/`dest`. Every error here is fatal to the run.
    pub fn prepare(&mut self) -> Result<(), OrganizerError> {
        ensure_source_dir(&self.source)?;
        ensure_dest_dir(&self.dest, self.dry_run)?;

        self.source = normalize(&self.source);
        self.dest = normalize(&self.dest);

        if self.source == self.dest {
            error!(path = %self.source.display(), "source and destination are the same directory");
            return Err(OrganizerError::SameSourceAndDest(self.source.clone()));
        }

        info!(
            source = %self.source.display(),
            dest = %self.dest.display(),
            mode = %self.mode,
            recursive = self.recursive,
            dry_run = self.dry_run,
            "Config validated"
        );
        Ok(())
    }
}

/// Source must exist, be a directory, and be listable.
fn ensure_source_dir(path: &Path) -> Result<(), OrganizerError> {
    let meta = match fs::metadata(path) {
        Ok(m) => m,
        Err(_) => {
            error!("Source directory does not exist: {}", path.display());
            return Err(OrganizerError::SourceMissing(path.to_path_buf()));
        }
    };
    if !meta.is_dir() {
        error!("Source path is not a directory: {}", path.display());
        return Err(OrganizerError::SourceNotDirectory(path.to_path_buf()));
    }
    fs::read_dir(path).map_err(|source| OrganizerError::SourceUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("source readable: {}", path.display());
    Ok(())
}

/// Destination is created if missing (not in dry runs); an existing non-directory is rejected.
fn ensure_dest_dir(path: &Path, dry_run: bool) -> Result<(), OrganizerError> {
    if path.exists() {
        if !path.is_dir() {
            error!("Destination exists but isn't a directory: {}", path.display());
            return Err(OrganizerError::DestinationNotDirectory(path.to_path_buf()));
        }
        return Ok(());
    }
    if dry_run {
        info!(action = "mkdir -p", path = %path.display(), "dry-run");
        return Ok(());
    }
    fs::create_dir_all(path).map_err(|source| OrganizerError::DestinationUncreatable {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Created destination directory: {}", path.display());
    Ok(())
}
