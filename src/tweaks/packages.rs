use crate::error::{AppError, Result};
use crate::models::PackageManager;

/// Gaming packages requested on every distribution.
pub const COMMON_GAMING_PACKAGES: [&str; 11] = [
    "gamemode",
    "mangohud",
    "vkbasalt",
    "goverlay",
    "lutris",
    "steam",
    "wine",
    "winetricks",
    "vulkan-tools",
    "mesa-utils",
    "glxinfo",
];

const APT_EXTRAS: [&str; 6] = [
    "ubuntu-restricted-extras",
    "libavcodec-extra",
    "vulkan-utils",
    "mesa-vulkan-drivers",
    "lib32-mesa-vulkan-drivers",
    "lib32-vulkan-icd-loader",
];

const PACMAN_EXTRAS: [&str; 6] = [
    "lib32-gamemode",
    "lib32-mangohud",
    "vulkan-radeon",
    "lib32-vulkan-radeon",
    "vulkan-intel",
    "lib32-vulkan-intel",
];

const DNF_EXTRAS: [&str; 5] = [
    "vulkan",
    "vulkan-loader",
    "mesa-vulkan-drivers",
    "mesa-dri-drivers",
    "ffmpeg-libs",
];

/// Distro-specific additions to [`COMMON_GAMING_PACKAGES`].
pub fn distro_gaming_packages(pm: PackageManager) -> &'static [&'static str] {
    match pm {
        PackageManager::Apt => &APT_EXTRAS,
        PackageManager::Pacman => &PACMAN_EXTRAS,
        PackageManager::Dnf => &DNF_EXTRAS,
        _ => &[],
    }
}

/// Full gaming package list for a package manager, common packages first.
pub fn gaming_packages(pm: PackageManager) -> Vec<&'static str> {
    COMMON_GAMING_PACKAGES
        .iter()
        .chain(distro_gaming_packages(pm))
        .copied()
        .collect()
}

/// Builds the non-interactive install line for `packages`.
///
/// # Errors
///
/// Returns `AppError::UnknownPackageManager` when `pm` is `Unknown`.
pub fn install_command(pm: PackageManager, packages: &[&str]) -> Result<String> {
    let prefix = match pm {
        PackageManager::Apt => "apt-get install -y",
        PackageManager::Pacman => "pacman -S --noconfirm",
        PackageManager::Dnf => "dnf install -y",
        PackageManager::Zypper => "zypper install -y",
        PackageManager::Emerge => "emerge -av",
        PackageManager::Unknown => {
            return Err(AppError::UnknownPackageManager(pm.to_string()));
        },
    };
    Ok(format!("{} {}", prefix, packages.join(" ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(PackageManager::Apt, "apt-get install -y steam wine")]
    #[case(PackageManager::Pacman, "pacman -S --noconfirm steam wine")]
    #[case(PackageManager::Dnf, "dnf install -y steam wine")]
    #[case(PackageManager::Zypper, "zypper install -y steam wine")]
    #[case(PackageManager::Emerge, "emerge -av steam wine")]
    fn builds_install_command(#[case] pm: PackageManager, #[case] expected: &str) {
        assert_eq!(install_command(pm, &["steam", "wine"]).unwrap(), expected);
    }

    #[test]
    fn unknown_package_manager_is_rejected() {
        let err = install_command(PackageManager::Unknown, &["steam"]).unwrap_err();
        assert!(matches!(err, AppError::UnknownPackageManager(ref pm) if pm == "unknown"));
    }

    #[test]
    fn gaming_packages_append_distro_extras() {
        let apt = gaming_packages(PackageManager::Apt);
        assert_eq!(apt.len(), COMMON_GAMING_PACKAGES.len() + APT_EXTRAS.len());
        assert_eq!(apt[0], "gamemode");
        assert!(apt.contains(&"mesa-vulkan-drivers"));

        let zypper = gaming_packages(PackageManager::Zypper);
        assert_eq!(zypper, COMMON_GAMING_PACKAGES.to_vec());
    }
}
