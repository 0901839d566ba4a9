//! Timestamped single-file backups and tarball restore points.
//!
//! Backups live flat in one directory. File names embed a
//! `YYYYMMDD_HHMMSS` stamp, so name order is chronological order.

use crate::error::{AppError, Result};
use crate::tweaks::{shell_quote, TweakCommand};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const RESTORE_POINT_PREFIX: &str = "system_backup_";
const RESTORE_POINT_SUFFIX: &str = ".tar.gz";

fn stamp() -> String {
    Local::now().format(STAMP_FORMAT).to_string()
}

pub struct BackupStore {
    dir: PathBuf,
}

impl BackupStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Copies `source` to `<dir>/<name>.backup_<stamp>`.
    ///
    /// Returns `Ok(None)` without doing anything when `source` does not exist.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Backup` when the copy fails.
    pub fn backup_file(&self, source: &Path) -> Result<Option<PathBuf>> {
        if !source.exists() {
            debug!("Nothing to back up at {}", source.display());
            return Ok(None);
        }
        let name = source
            .file_name()
            .ok_or_else(|| AppError::backup(source, "path has no file name"))?
            .to_string_lossy();

        let target = self.dir.join(format!("{}.backup_{}", name, stamp()));
        fs::copy(source, &target).map_err(|e| AppError::backup(source, e))?;
        info!("Backed up {} to {}", source.display(), target.display());
        Ok(Some(target))
    }

    /// Newest backup of a file named `file_name`, if any.
    pub fn latest_backup(&self, file_name: &str) -> Result<Option<PathBuf>> {
        let prefix = format!("{}.backup_", file_name);
        Ok(self.sorted_entries(|name| name.starts_with(&prefix))?.pop())
    }

    /// Copies a backup over `dest`, byte for byte.
    pub fn restore_file(backup: &Path, dest: &Path) -> Result<()> {
        fs::copy(backup, dest)?;
        info!("Restored {} from {}", dest.display(), backup.display());
        Ok(())
    }

    /// Path for a new restore point archive.
    pub fn new_restore_point_path(&self) -> PathBuf {
        self.dir.join(format!(
            "{}{}{}",
            RESTORE_POINT_PREFIX,
            stamp(),
            RESTORE_POINT_SUFFIX
        ))
    }

    /// Existing restore points, newest first.
    pub fn restore_points(&self) -> Result<Vec<PathBuf>> {
        let mut points = self.sorted_entries(|name| {
            name.starts_with(RESTORE_POINT_PREFIX) && name.ends_with(RESTORE_POINT_SUFFIX)
        })?;
        points.reverse();
        Ok(points)
    }

    /// `tar` line archiving `members` into `archive`.
    pub fn archive_command(archive: &Path, members: &[PathBuf]) -> TweakCommand {
        let members: Vec<String> = members.iter().map(|m| shell_quote(m)).collect();
        TweakCommand::root(format!(
            "tar -czf {} {}",
            shell_quote(archive),
            members.join(" ")
        ))
    }

    /// `tar` line unpacking a restore point back to its absolute locations.
    pub fn extract_command(archive: &Path) -> TweakCommand {
        TweakCommand::root(format!("tar -xzf {} -C /", shell_quote(archive)))
    }

    /// Regular files in the backup directory whose names pass `keep`, sorted by name.
    fn sorted_entries(&self, keep: impl Fn(&str) -> bool) -> Result<Vec<PathBuf>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if keep(&entry.file_name().to_string_lossy()) {
                entries.push(entry.path());
            }
        }
        entries.sort();
        Ok(entries)
    }
}
