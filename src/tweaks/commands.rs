//! Shell command tables.

use super::{shell_quote, TweakCommand, WRITEBACK_SYSCTLS};
use crate::models::{DesktopEnvironment, FsType, PackageManager};
use std::path::Path;

const GNOME_COMMANDS: [&str; 8] = [
    // Animations
    "gsettings set org.gnome.desktop.interface enable-animations false",
    "gsettings set org.gnome.desktop.interface enable-hot-corners false",
    "gsettings set org.gnome.shell.app-switcher current-workspace-only true",
    "gsettings set org.gnome.desktop.search-providers disable-external true",
    // Window management
    "gsettings set org.gnome.mutter center-new-windows true",
    "gsettings set org.gnome.mutter dynamic-workspaces false",
    "gsettings set org.gnome.shell disable-user-extensions false",
    r#"gsettings set org.gnome.mutter experimental-features '["kms-modifiers"]'"#,
];

const KDE_COMMANDS: [&str; 6] = [
    "kwriteconfig5 --file kwinrc --group Compositing --key Enabled false",
    "kwriteconfig5 --file kwinrc --group Plugins --key blurEnabled false",
    "kwriteconfig5 --file kwinrc --group Plugins --key slideEnabled false",
    "kwriteconfig5 --file kwinrc --group Compositing --key GLCore true",
    "kwriteconfig5 --file kwinrc --group Compositing --key OpenGLIsUnsafe false",
    // Reload KWin so the settings apply
    "qdbus org.kde.KWin /KWin reconfigure",
];

const XFCE_COMMANDS: [&str; 4] = [
    "xfconf-query -c xfwm4 -p /general/use_compositing -s false",
    "xfconf-query -c xfce4-panel -p /panels/panel-1/leave-opacity -s 1",
    "xfconf-query -c xfwm4 -p /general/box_move -s false",
    "xfconf-query -c xfwm4 -p /general/box_resize -s false",
];

/// Settings-tool commands for a desktop, or `None` when it is not supported.
/// All of them run as the current user.
pub fn desktop_commands(desktop: &DesktopEnvironment) -> Option<&'static [&'static str]> {
    match desktop {
        DesktopEnvironment::Gnome => Some(&GNOME_COMMANDS),
        DesktopEnvironment::Kde => Some(&KDE_COMMANDS),
        DesktopEnvironment::Xfce => Some(&XFCE_COMMANDS),
        DesktopEnvironment::Other(_) => None,
    }
}

/// Appends a line to a root-owned file.
pub fn append_line_command(line: &str, target: &Path) -> TweakCommand {
    TweakCommand::root(format!(
        "sh -c \"echo '{}' >> {}\"",
        line,
        shell_quote(target)
    ))
}

/// Appends the contents of `source` to a root-owned file.
pub fn append_file_command(source: &Path, target: &Path) -> TweakCommand {
    TweakCommand::root(format!(
        "sh -c \"cat {} >> {}\"",
        shell_quote(source),
        shell_quote(target)
    ))
}

pub fn sysctl_reload_command() -> TweakCommand {
    TweakCommand::root("sysctl -p")
}

/// Commands tuning the root filesystem, followed by the writeback sysctls
/// that apply to every filesystem.
pub fn filesystem_commands(fs: &FsType, sysctl_conf: &Path, fstab: &Path) -> Vec<TweakCommand> {
    let mut commands = match fs {
        FsType::Ext(_) => vec![
            TweakCommand::root("tune2fs -O dir_index /dev/root 2>/dev/null"),
            TweakCommand::root("tune2fs -O has_journal /dev/root 2>/dev/null"),
            TweakCommand::root(format!(
                "sed -i 's/relatime/noatime/g' {}",
                shell_quote(fstab)
            )),
        ],
        FsType::Btrfs => vec![TweakCommand::root(
            "btrfs filesystem defrag -r / 2>/dev/null",
        )],
        FsType::Xfs => vec![TweakCommand::root("xfs_fsr / 2>/dev/null")],
        FsType::Other(_) => Vec::new(),
    };

    commands.extend(
        WRITEBACK_SYSCTLS
            .iter()
            .map(|line| append_line_command(line, sysctl_conf)),
    );
    commands
}

/// Package cache cleanup for the given manager, followed by user caches,
/// temp files, trash and old logs.
pub fn cleanup_commands(pm: PackageManager, home: &Path) -> Vec<TweakCommand> {
    let mut commands = match pm {
        PackageManager::Apt => vec![
            TweakCommand::root("apt-get autoremove -y"),
            TweakCommand::root("apt-get autoclean -y"),
            TweakCommand::root("apt-get clean -y"),
            TweakCommand::root("rm -rf /var/cache/apt/archives/*"),
            TweakCommand::root("journalctl --vacuum-time=7d"),
        ],
        PackageManager::Pacman => vec![
            TweakCommand::root("pacman -Sc --noconfirm"),
            TweakCommand::root("pacman -Rns $(pacman -Qtdq) --noconfirm 2>/dev/null || true"),
            TweakCommand::root("rm -f /var/cache/pacman/pkg/*"),
        ],
        PackageManager::Dnf => vec![
            TweakCommand::root("dnf autoremove -y"),
            TweakCommand::root("dnf clean all"),
            TweakCommand::root("rm -rf /var/cache/dnf/*"),
        ],
        _ => Vec::new(),
    };

    let home = shell_quote(home);
    commands.extend([
        TweakCommand::user(format!("rm -rf {}/.cache/*", home)),
        TweakCommand::user(format!("rm -rf {}/.thumbnails/*", home)),
        TweakCommand::user("rm -rf /tmp/* 2>/dev/null || true"),
        TweakCommand::user(format!("rm -rf {}/.local/share/Trash/*", home)),
        TweakCommand::root("find /var/log -type f -name '*.log' -mtime +30 -delete"),
        TweakCommand::root("find /var/log -type f -name '*.gz' -delete"),
        TweakCommand::root("systemd-tmpfiles --clean"),
    ]);
    commands
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desktop_lookup() {
        assert_eq!(desktop_commands(&DesktopEnvironment::Gnome).unwrap().len(), 8);
        assert_eq!(
            desktop_commands(&DesktopEnvironment::Kde).unwrap().last(),
            Some(&"qdbus org.kde.KWin /KWin reconfigure")
        );
        assert!(desktop_commands(&DesktopEnvironment::Xfce)
            .unwrap()
            .iter()
            .all(|c| c.starts_with("xfconf-query")));
        assert!(desktop_commands(&DesktopEnvironment::Other("sway".into())).is_none());
    }

    #[test]
    fn ext_filesystem_gets_tune2fs_and_noatime() {
        let commands = filesystem_commands(
            &FsType::Ext("ext4".into()),
            Path::new("/etc/sysctl.conf"),
            Path::new("/etc/fstab"),
        );
        assert_eq!(commands.len(), 5);
        assert!(commands[0].line.starts_with("tune2fs -O dir_index"));
        assert_eq!(commands[2].line, "sed -i 's/relatime/noatime/g' /etc/fstab");
        assert_eq!(
            commands[3].line,
            "sh -c \"echo 'vm.dirty_writeback_centisecs = 1500' >> /etc/sysctl.conf\""
        );
        assert!(commands.iter().all(|c| c.privileged));
    }

    #[test]
    fn unknown_filesystem_only_gets_writeback_sysctls() {
        let commands = filesystem_commands(
            &FsType::Other("zfs".into()),
            Path::new("/etc/sysctl.conf"),
            Path::new("/etc/fstab"),
        );
        assert_eq!(commands.len(), WRITEBACK_SYSCTLS.len());
    }

    #[test]
    fn btrfs_and_xfs_have_one_specific_command() {
        let sysctl = Path::new("/etc/sysctl.conf");
        let fstab = Path::new("/etc/fstab");
        assert!(filesystem_commands(&FsType::Btrfs, sysctl, fstab)[0]
            .line
            .starts_with("btrfs filesystem defrag"));
        assert!(filesystem_commands(&FsType::Xfs, sysctl, fstab)[0]
            .line
            .starts_with("xfs_fsr"));
    }

    #[test]
    fn cleanup_depends_on_package_manager() {
        let home = Path::new("/home/gamer");
        let apt = cleanup_commands(PackageManager::Apt, home);
        let zypper = cleanup_commands(PackageManager::Zypper, home);

        assert_eq!(apt.len(), 5 + 7);
        assert_eq!(zypper.len(), 7);
        assert_eq!(apt[0], TweakCommand::root("apt-get autoremove -y"));
        assert!(zypper
            .iter()
            .any(|c| c == &TweakCommand::user("rm -rf /home/gamer/.cache/*")));
    }

    #[test]
    fn append_file_quotes_paths() {
        let cmd = append_file_command(Path::new("/tmp/my tweaks.conf"), Path::new("/etc/sysctl.conf"));
        assert_eq!(cmd.line, "sh -c \"cat '/tmp/my tweaks.conf' >> /etc/sysctl.conf\"");
        assert!(cmd.privileged);
    }
}
