//! Distribution profile detected from `/etc/os-release`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Default location of the os-release file on systemd-era distributions.
pub const OS_RELEASE_PATH: &str = "/etc/os-release";

/// Package manager family used to install and clean packages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Apt,
    Pacman,
    Dnf,
    Zypper,
    Emerge,
    Unknown,
}

impl PackageManager {
    /// Maps an os-release `ID` to the package manager it ships with.
    pub fn for_distro_id(id: &str) -> Self {
        match id {
            "ubuntu" | "debian" | "linuxmint" | "pop" => PackageManager::Apt,
            "arch" | "manjaro" | "endeavouros" => PackageManager::Pacman,
            "fedora" | "centos" | "rhel" | "rocky" => PackageManager::Dnf,
            "opensuse" | "suse" => PackageManager::Zypper,
            "gentoo" => PackageManager::Emerge,
            _ => PackageManager::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PackageManager::Apt => "apt",
            PackageManager::Pacman => "pacman",
            PackageManager::Dnf => "dnf",
            PackageManager::Zypper => "zypper",
            PackageManager::Emerge => "emerge",
            PackageManager::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable description of the host distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistroProfile {
    pub name: String,
    pub version: String,
    pub id: String,
    pub package_manager: PackageManager,
}

impl Default for DistroProfile {
    fn default() -> Self {
        Self {
            name: "Unknown".to_string(),
            version: "Unknown".to_string(),
            id: "unknown".to_string(),
            package_manager: PackageManager::Unknown,
        }
    }
}

impl DistroProfile {
    /// Parses the `KEY=value` contents of an os-release file.
    ///
    /// Only `NAME`, `VERSION_ID` and `ID` are read. Values are trimmed and
    /// stripped of surrounding double quotes; absent keys keep their defaults.
    pub fn parse(contents: &str) -> Self {
        let mut profile = Self::default();

        for line in contents.lines() {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim().trim_matches('"').to_string();
            match key {
                "NAME" => profile.name = value,
                "VERSION_ID" => profile.version = value,
                "ID" => profile.id = value,
                _ => {},
            }
        }

        profile.package_manager = PackageManager::for_distro_id(&profile.id);
        profile
    }

    /// Reads and parses the os-release file at `path`.
    ///
    /// A missing or unreadable file yields the `Unknown` profile rather than an error.
    pub fn detect(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => {
                let profile = Self::parse(&contents);
                debug!(
                    "Detected distro '{}' {} (id={}, pm={})",
                    profile.name, profile.version, profile.id, profile.package_manager
                );
                profile
            },
            Err(e) => {
                warn!("Could not read {}: {}", path.display(), e);
                Self::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const UBUNTU: &str = r#"PRETTY_NAME="Ubuntu 22.04.4 LTS"
NAME="Ubuntu"
VERSION_ID="22.04"
VERSION="22.04.4 LTS (Jammy Jellyfish)"
ID=ubuntu
ID_LIKE=debian
"#;

    #[test]
    fn parses_ubuntu_os_release() {
        let profile = DistroProfile::parse(UBUNTU);
        assert_eq!(profile.name, "Ubuntu");
        assert_eq!(profile.version, "22.04");
        assert_eq!(profile.id, "ubuntu");
        assert_eq!(profile.package_manager, PackageManager::Apt);
    }

    #[test]
    fn missing_keys_keep_defaults() {
        let profile = DistroProfile::parse("ID=arch\n# comment\ngarbage line\n");
        assert_eq!(profile.name, "Unknown");
        assert_eq!(profile.version, "Unknown");
        assert_eq!(profile.package_manager, PackageManager::Pacman);
    }

    #[test]
    fn missing_file_yields_unknown_profile() {
        let profile = DistroProfile::detect(Path::new("/nonexistent/os-release"));
        assert_eq!(profile, DistroProfile::default());
    }

    #[rstest]
    #[case("debian", PackageManager::Apt)]
    #[case("linuxmint", PackageManager::Apt)]
    #[case("pop", PackageManager::Apt)]
    #[case("manjaro", PackageManager::Pacman)]
    #[case("endeavouros", PackageManager::Pacman)]
    #[case("fedora", PackageManager::Dnf)]
    #[case("rocky", PackageManager::Dnf)]
    #[case("opensuse", PackageManager::Zypper)]
    #[case("gentoo", PackageManager::Emerge)]
    #[case("nixos", PackageManager::Unknown)]
    #[case("", PackageManager::Unknown)]
    fn maps_distro_id_to_package_manager(#[case] id: &str, #[case] expected: PackageManager) {
        assert_eq!(PackageManager::for_distro_id(id), expected);
    }
}
