use crate::error::{AppError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable overriding the configuration directory.
pub const CONFIG_DIR_ENV: &str = "WEXTWEAKS_CONFIG_DIR";

/// Name of the plain-text log inside the configuration directory.
pub const LOG_FILE_NAME: &str = "wextweaks.log";

/// Every file and directory the tool reads or writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub home: PathBuf,
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
    pub log_file: PathBuf,
    pub backup_dir: PathBuf,
    pub game_scripts_dir: PathBuf,
    pub wine_env_file: PathBuf,
    pub wineprefix: PathBuf,
    pub gamemode_ini: PathBuf,
    pub sysctl_conf: PathBuf,
    /// Copy of the sysctl block before it is appended as root. Lives in the
    /// user-owned configuration directory, never in a shared temp dir.
    pub sysctl_staging: PathBuf,
    pub fstab: PathBuf,
    pub proc_dir: PathBuf,
}

impl AppPaths {
    /// Lays out all paths from a home directory and a configuration directory.
    /// System files point at their usual locations under `/etc` and `/proc`.
    pub fn new(home: &Path, config_dir: &Path) -> Self {
        Self {
            home: home.to_path_buf(),
            config_dir: config_dir.to_path_buf(),
            config_file: config_dir.join("config.json"),
            log_file: config_dir.join(LOG_FILE_NAME),
            backup_dir: config_dir.join("backups"),
            game_scripts_dir: config_dir.join("game_optimizations"),
            wine_env_file: config_dir.join("wine_optimizations.sh"),
            wineprefix: home.join(".wine_wextweaks"),
            gamemode_ini: home.join(".config").join("gamemode.ini"),
            sysctl_conf: PathBuf::from("/etc/sysctl.conf"),
            sysctl_staging: config_dir.join("sysctl_tweaks.conf"),
            fstab: PathBuf::from("/etc/fstab"),
            proc_dir: PathBuf::from("/proc"),
        }
    }

    /// Resolves paths for the current user.
    ///
    /// The configuration directory is `config_dir` when given (the CLI flag,
    /// which clap also fills from `WEXTWEAKS_CONFIG_DIR`), otherwise
    /// `~/.config/wextweaks`. A relative directory is anchored at the current
    /// working directory, since restore points are extracted relative to `/`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Cli` if the home directory cannot be determined and
    /// `AppError::Io` if a relative directory cannot be anchored.
    pub fn resolve(config_dir: Option<PathBuf>) -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| AppError::Cli("Could not determine the home directory".to_string()))?;
        let config_dir = match config_dir {
            Some(dir) if dir.is_relative() => std::env::current_dir()?.join(dir),
            Some(dir) => dir,
            None => home.join(".config").join("wextweaks"),
        };
        Ok(Self::new(&home, &config_dir))
    }

    /// Creates the configuration and backup directories.
    pub fn ensure_dirs(&self) -> Result<()> {
        fs::create_dir_all(&self.config_dir)?;
        fs::create_dir_all(&self.backup_dir)?;
        debug!("Using configuration directory {}", self.config_dir.display());
        Ok(())
    }

    /// The fixed list of files captured in a restore point.
    pub fn restore_point_members(&self) -> Vec<PathBuf> {
        vec![
            self.sysctl_conf.clone(),
            self.fstab.clone(),
            self.home.join(".bashrc"),
            self.home.join(".profile"),
            self.gamemode_ini.clone(),
            self.config_file.clone(),
        ]
    }
}
