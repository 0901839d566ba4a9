use super::{menu, render, report};
use crate::error::{AppError, Result};
use crate::models::{
    DesktopEnvironment, DistroProfile, TweakState, FULL_OPTIMIZATION, OS_RELEASE_PATH,
};
use crate::storage::{AppPaths, BackupStore, ConfigStore, CONFIG_DIR_ENV};
use crate::system::{
    detect_root_fs, probe_hardware, with_privilege, ShellRunner, SystemShell,
};
use crate::tweaks::{
    append_file_command, cleanup_commands, desktop_commands, filesystem_commands,
    gaming_packages, install_command, shell_quote, sysctl_reload_command, wine_env_script,
    TweakCommand, GAMEMODE_INI, GAME_SCRIPTS, SYSCTL_TWEAKS,
};
use clap::{Args, Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Number of history rows shown in the system report.
const HISTORY_ROWS: usize = 5;

/// Interactive Linux optimizer for gaming and desktop performance
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run a single action and exit instead of showing the menu
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory for saved state, logs and backups (default: ~/.config/wextweaks)
    #[arg(long, global = true, env = CONFIG_DIR_ENV)]
    pub config_dir: Option<PathBuf>,

    /// os-release file used to detect the distribution
    #[arg(long, global = true, default_value = OS_RELEASE_PATH)]
    pub os_release: PathBuf,

    /// Answer yes to confirmation prompts
    #[arg(short, long, global = true)]
    pub yes: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run every optimization in sequence
    Full,

    /// Install gaming packages (Steam, Wine, GameMode, MangoHud, ...)
    Packages,

    /// Write the GameMode config and per-game launch scripts
    Gamemode,

    /// Apply sysctl and filesystem tuning
    System,

    /// Tune the running desktop environment (GNOME, KDE, Xfce)
    Desktop,

    /// Remove package caches, temp files and old logs
    Clean,

    /// Archive the current configuration files into a restore point
    RestorePoint,

    /// Show hardware details and optimization status
    Info,

    /// Undo tweaks and reset the saved state
    Restore(RestoreArgs),
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreArgs {
    /// Restore point archive to extract back into place
    #[arg(long)]
    pub from: Option<PathBuf>,
}

/// CLI application
pub struct App<R: ShellRunner> {
    runner: R,
    distro: DistroProfile,
    paths: AppPaths,
    store: ConfigStore,
    backups: BackupStore,
    state: TweakState,
}

impl App<SystemShell> {
    /// Builds the application against the real host: probes sudo and
    /// detects the distribution from `os_release`.
    pub async fn new(paths: AppPaths, os_release: &Path) -> Result<Self> {
        let runner = SystemShell::detect().await;
        let distro = DistroProfile::detect(os_release);
        info!(
            "Detected {} {} (package manager: {})",
            distro.name, distro.version, distro.package_manager
        );
        Ok(Self::with_runner(runner, distro, paths))
    }
}

impl<R: ShellRunner> App<R> {
    /// Creates the application with an explicit runner, loading saved state.
    pub fn with_runner(runner: R, distro: DistroProfile, paths: AppPaths) -> Self {
        let store = ConfigStore::new(&paths.config_file);
        let backups = BackupStore::new(&paths.backup_dir);
        let state = store.load();
        Self {
            runner,
            distro,
            paths,
            store,
            backups,
            state,
        }
    }

    pub fn distro(&self) -> &DistroProfile {
        &self.distro
    }

    #[cfg(test)]
    pub fn state(&self) -> &TweakState {
        &self.state
    }

    pub fn has_sudo(&self) -> bool {
        self.runner.has_sudo()
    }

    pub fn restore_points(&self) -> Result<Vec<PathBuf>> {
        self.backups.restore_points()
    }

    #[cfg(test)]
    pub fn runner_for_tests(&self) -> &R {
        &self.runner
    }

    /// Run one action.
    pub async fn run_command(&mut self, command: Commands) -> Result<()> {
        debug!("Running command {:?}", command);
        match command {
            Commands::Full => self.full_optimization().await?,
            Commands::Packages => self.install_gaming_packages().await,
            Commands::Gamemode => self.setup_gamemode().await,
            Commands::System => {
                self.optimize_sysctl().await;
                self.optimize_filesystem().await;
            },
            Commands::Desktop => {
                let raw = std::env::var("XDG_CURRENT_DESKTOP").unwrap_or_default();
                self.optimize_desktop(&raw).await;
            },
            Commands::Clean => self.clean_system().await,
            Commands::RestorePoint => {
                self.create_restore_point().await?;
            },
            Commands::Info => self.system_info().await,
            Commands::Restore(args) => self.restore_settings(args.from.as_deref()).await?,
        }
        Ok(())
    }

    fn save_state(&mut self) {
        if let Err(e) = self.store.save(&mut self.state) {
            report::error(format!(
                "Could not save settings to {}: {}",
                self.store.path().display(),
                e
            ));
        }
    }

    /// Executes one catalog command, reporting progress and failure.
    ///
    /// Returns `true` on exit status 0. Failures are reported, never raised.
    pub async fn run_tweak(&self, command: &TweakCommand, description: &str) -> bool {
        if !description.is_empty() {
            report::info(format!("Running: {}", description));
        }

        let line = with_privilege(&command.line, command.privileged, self.runner.has_sudo());
        match self.runner.run_line(&line).await {
            Ok(output) if output.success() => {
                if !description.is_empty() {
                    report::success(format!("Done: {}", description));
                }
                true
            },
            Ok(output) => {
                let code = output
                    .code
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "signal".to_string());
                report::error(format!("Failed (exit {}): {}", code, description));
                let stderr = output.stderr.trim();
                if !stderr.is_empty() {
                    let details: String = stderr.chars().take(200).collect();
                    report::warning(format!("Details: {}", details));
                }
                false
            },
            Err(AppError::CommandTimeout { .. }) => {
                report::error(format!("Timed out: {}", description));
                false
            },
            Err(e) => {
                report::error(format!("Could not run command: {}", e));
                false
            },
        }
    }

    /// Installs `packages` with the distro's package manager.
    ///
    /// An empty list succeeds without running anything. An unknown package
    /// manager is reported and counts as failure.
    pub async fn install_packages(&self, packages: &[&str], description: &str) -> bool {
        if packages.is_empty() {
            return true;
        }
        match install_command(self.distro.package_manager, packages) {
            Ok(line) => self.run_tweak(&TweakCommand::root(line), description).await,
            Err(e) => {
                report::error(e.to_string());
                false
            },
        }
    }

    /// Creates a timestamped copy of `path` in the backup directory.
    fn backup(&self, path: &Path) {
        match self.backups.backup_file(path) {
            Ok(Some(copy)) => report::info(format!("Created backup: {}", copy.display())),
            Ok(None) => {},
            Err(e) => report::error(format!("Could not create backup: {}", e)),
        }
    }

    /// Writes `contents` to `path`, creating parent directories, optionally
    /// marking the file executable.
    fn write_file(path: &Path, contents: &str, executable: bool) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)?;
        if executable {
            fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
        }
        Ok(())
    }

    /// Writes `contents` to a freshly created file at `path`.
    ///
    /// Whatever already sits at `path` is unlinked first, so a symlink is
    /// replaced rather than followed.
    fn stage_file(path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        match fs::remove_file(path) {
            Ok(()) => debug!("Replaced stale staging file {}", path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {},
            Err(e) => return Err(e.into()),
        }
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .mode(0o600)
            .open(path)?;
        file.write_all(contents.as_bytes())?;
        Ok(())
    }

    pub async fn full_optimization(&mut self) -> Result<()> {
        const STEPS: u64 = 7;

        let pb = ProgressBar::new(STEPS);
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("=>-"),
        );

        let step = |name: &'static str| {
            pb.println(format!("\n{}", format!("▶ {}...", name).blue()));
            pb.set_message(name);
        };

        step("Installing gaming packages");
        self.install_gaming_packages().await;
        pb.inc(1);

        step("Configuring GameMode");
        self.setup_gamemode().await;
        pb.inc(1);

        step("Tuning system parameters");
        self.optimize_sysctl().await;
        pb.inc(1);

        step("Tuning the filesystem");
        self.optimize_filesystem().await;
        pb.inc(1);

        step("Configuring Wine/Proton");
        self.setup_wine_proton().await;
        pb.inc(1);

        step("Cleaning the system");
        self.clean_system().await;
        pb.inc(1);

        step("Tuning the desktop");
        let raw = std::env::var("XDG_CURRENT_DESKTOP").unwrap_or_default();
        self.optimize_desktop(&raw).await;
        pb.inc(1);

        pb.finish_with_message("done");

        println!("{}", "\n✅ Optimization complete!".green());
        println!("{}", "💡 Tips:".yellow());
        println!("  • Reboot to apply every change");
        println!("  • Launch games with: gamemoderun %command%");
        println!("  • Check your graphics driver settings");

        self.state.record_optimization(FULL_OPTIMIZATION);
        self.save_state();
        Ok(())
    }

    pub async fn install_gaming_packages(&mut self) {
        report::install("Installing gaming packages...");

        let candidates = gaming_packages(self.distro.package_manager);
        let pending = self.state.pending_packages(&candidates);

        if pending.is_empty() {
            report::success("All gaming packages are already installed");
            return;
        }

        if self.install_packages(&pending, "Gaming packages").await {
            self.state.mark_installed(&pending);
            self.save_state();
        }
    }

    pub async fn setup_gamemode(&mut self) {
        report::info("Configuring GameMode...");

        if !self
            .run_tweak(&TweakCommand::user("which gamemoded"), "Checking for GameMode")
            .await
        {
            self.install_packages(&["gamemode"], "Installing GameMode").await;
        }

        self.backup(&self.paths.gamemode_ini);
        match Self::write_file(&self.paths.gamemode_ini, GAMEMODE_INI, false) {
            Ok(()) => report::success("GameMode configuration written"),
            Err(e) => report::error(format!("Could not write GameMode config: {}", e)),
        }

        self.write_game_scripts();

        self.state.gamemode_enabled = true;
        self.save_state();
    }

    /// Writes the per-game launch scripts.
    fn write_game_scripts(&self) {
        let dir = &self.paths.game_scripts_dir;
        let result = GAME_SCRIPTS
            .iter()
            .try_for_each(|(name, body)| Self::write_file(&dir.join(name), body, true));

        match result {
            Ok(()) => report::success("Per-game launch scripts created"),
            Err(e) => report::error(format!("Could not write game scripts: {}", e)),
        }
    }

    pub async fn optimize_sysctl(&mut self) {
        report::info("Tuning sysctl...");

        self.backup(&self.paths.sysctl_conf);

        if let Err(e) = Self::stage_file(&self.paths.sysctl_staging, SYSCTL_TWEAKS) {
            report::error(format!("Could not stage sysctl tweaks: {}", e));
            return;
        }

        let append = append_file_command(&self.paths.sysctl_staging, &self.paths.sysctl_conf);
        self.run_tweak(&append, "Appending sysctl tweaks").await;
        self.run_tweak(&sysctl_reload_command(), "Applying sysctl settings")
            .await;
        report::success("sysctl tuned");
    }

    pub async fn optimize_filesystem(&self) {
        report::info("Tuning the filesystem...");

        let fs_type = detect_root_fs(&self.runner).await;
        let description = format!("Optimizing {}", fs_type);
        for command in filesystem_commands(&fs_type, &self.paths.sysctl_conf, &self.paths.fstab) {
            self.run_tweak(&command, &description).await;
        }
    }

    pub async fn setup_wine_proton(&mut self) {
        report::info("Configuring Wine/Proton...");

        let prefix = self.paths.wineprefix.clone();
        let env_file = self.paths.wine_env_file.clone();

        if let Err(e) = Self::write_file(&env_file, &wine_env_script(&prefix), true) {
            report::error(format!("Could not configure Wine: {}", e));
            return;
        }

        if !prefix.exists() {
            let boot = format!(". {} && wine wineboot", shell_quote(&env_file));
            self.run_tweak(&TweakCommand::user(boot), "Creating wineprefix")
                .await;
        }

        let winetricks = format!(
            "WINEPREFIX={} winetricks corefonts vcrun2019 vcrun2015",
            shell_quote(&prefix)
        );
        self.run_tweak(&TweakCommand::user(winetricks), "Installing Wine components")
            .await;

        self.state.wine_optimized = true;
        self.save_state();
        report::success("Wine optimized");
    }

    pub async fn clean_system(&self) {
        report::info("Cleaning the system...");

        for command in cleanup_commands(self.distro.package_manager, &self.paths.home) {
            self.run_tweak(&command, "System cleanup").await;
        }

        report::success("System cleaned");
    }

    /// Applies the settings for the desktop named by `xdg_current_desktop`.
    pub async fn optimize_desktop(&self, xdg_current_desktop: &str) {
        report::info("Tuning the desktop...");

        let desktop = DesktopEnvironment::from_xdg(xdg_current_desktop);
        let Some(commands) = desktop_commands(&desktop) else {
            report::warning(format!("Unknown desktop environment: {}", desktop));
            return;
        };

        report::info(format!("Tuning {}...", desktop));
        for line in commands {
            let preview: String = line.chars().take(50).collect();
            self.run_tweak(
                &TweakCommand::user(*line),
                &format!("{} setting: {}...", desktop, preview),
            )
            .await;
        }
    }

    pub async fn system_info(&self) {
        menu::print_heading("📊 SYSTEM INFORMATION");

        let hardware = probe_hardware(&self.runner, &self.paths.proc_dir).await;
        println!("{}", render::hardware_table(&hardware));

        println!("{}", "\n⚡ OPTIMIZATION STATUS".yellow());
        println!("{}", render::status_table(&self.state));

        if let Some(history) = render::history_table(&self.state, HISTORY_ROWS) {
            println!("{}", "\n📅 RECENT OPTIMIZATIONS".yellow());
            println!("{}", history);
        }

        println!("{}", "\n💡 TIPS".green());
        println!("  • Launch games through: gamemoderun %command%");
        println!("  • Keep your graphics drivers up to date");
        println!("  • Use Proton for Steam games");
        println!("  • Monitor FPS with MangoHud: mangohud %command%");
    }

    /// Archives the existing restore-point members into a new tarball.
    ///
    /// Returns the archive path, or `None` when nothing was archived.
    pub async fn create_restore_point(&self) -> Result<Option<PathBuf>> {
        report::info("Creating restore point...");

        let members: Vec<PathBuf> = self
            .paths
            .restore_point_members()
            .into_iter()
            .filter(|p| p.exists())
            .collect();

        if members.is_empty() {
            report::warning("No files to back up");
            return Ok(None);
        }

        let archive = self.backups.new_restore_point_path();
        let command = BackupStore::archive_command(&archive, &members);
        if self.run_tweak(&command, "Archiving configuration files").await {
            report::success(format!("Restore point created: {}", archive.display()));
            Ok(Some(archive))
        } else {
            report::error("Could not create restore point");
            Ok(None)
        }
    }

    /// Undoes the tweaks.
    ///
    /// With a restore point the archive is extracted back into place and the
    /// saved state is reloaded from it. Without one, the newest sysctl backup
    /// is copied back, the GameMode config is removed, and the saved state is
    /// reset to defaults.
    pub async fn restore_settings(&mut self, restore_point: Option<&Path>) -> Result<()> {
        if let Some(archive) = restore_point {
            if !archive.is_file() {
                return Err(AppError::backup(archive, "restore point not found"));
            }
            let command = BackupStore::extract_command(archive);
            if self.run_tweak(&command, "Extracting restore point").await {
                self.run_tweak(&sysctl_reload_command(), "Applying sysctl settings")
                    .await;
                self.state = self.store.load();
                report::success(format!("Restored from {}", archive.display()));
            }
            return Ok(());
        }

        self.restore_sysctl().await;

        let gamemode_ini = &self.paths.gamemode_ini;
        if gamemode_ini.exists() {
            match fs::remove_file(gamemode_ini) {
                Ok(()) => report::success("GameMode config removed"),
                Err(e) => report::error(format!("Could not remove GameMode config: {}", e)),
            }
        }

        self.state = TweakState::reset();
        self.save_state();

        report::success("Settings restored");
        Ok(())
    }

    /// Copies the newest sysctl backup over the live file and reloads it.
    async fn restore_sysctl(&self) {
        let target = &self.paths.sysctl_conf;
        let name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let backup = match self.backups.latest_backup(&name) {
            Ok(Some(backup)) => backup,
            Ok(None) => {
                report::info(format!("No sysctl backup in {}", self.backups.dir().display()));
                return;
            },
            Err(e) => {
                report::error(format!("Could not list backups: {}", e));
                return;
            },
        };

        let restored = match BackupStore::restore_file(&backup, target) {
            Ok(()) => {
                report::success(format!("Restored {}", target.display()));
                true
            },
            Err(e) if e.is_permission_denied() => {
                let copy = TweakCommand::root(format!(
                    "cp {} {}",
                    shell_quote(&backup),
                    shell_quote(target)
                ));
                self.run_tweak(&copy, "Restoring sysctl").await
            },
            Err(e) => {
                report::error(format!("Could not restore sysctl: {}", e));
                false
            },
        };

        if restored {
            self.run_tweak(&sysctl_reload_command(), "Applying sysctl settings")
                .await;
        }
    }
}
