//! Host facts used to pick a tweak set or to render the system report:
//! desktop environment, root filesystem type, and hardware summaries parsed
//! from `/proc` and `df`.

use std::fmt;

/// Desktop environment family as reported by `XDG_CURRENT_DESKTOP`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesktopEnvironment {
    Gnome,
    Kde,
    Xfce,
    /// Anything else; holds the lower-cased raw value.
    Other(String),
}

impl DesktopEnvironment {
    /// Classifies a raw `XDG_CURRENT_DESKTOP` value by substring, case-insensitively.
    ///
    /// Ubuntu's session reports `ubuntu:GNOME`, so `ubuntu` also means GNOME.
    pub fn from_xdg(value: &str) -> Self {
        let value = value.to_lowercase();
        if value.contains("gnome") || value.contains("ubuntu") {
            DesktopEnvironment::Gnome
        } else if value.contains("kde") || value.contains("plasma") {
            DesktopEnvironment::Kde
        } else if value.contains("xfce") {
            DesktopEnvironment::Xfce
        } else {
            DesktopEnvironment::Other(value)
        }
    }
}

impl fmt::Display for DesktopEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DesktopEnvironment::Gnome => f.write_str("GNOME"),
            DesktopEnvironment::Kde => f.write_str("KDE Plasma"),
            DesktopEnvironment::Xfce => f.write_str("Xfce"),
            DesktopEnvironment::Other(raw) => f.write_str(raw),
        }
    }
}

/// Root filesystem family, from `findmnt -n -o FSTYPE /`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsType {
    /// ext2, ext3 or ext4
    Ext(String),
    Btrfs,
    Xfs,
    Other(String),
}

impl FsType {
    /// Parses `findmnt` output; empty output falls back to ext4.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "" => FsType::Ext("ext4".to_string()),
            name @ ("ext2" | "ext3" | "ext4") => FsType::Ext(name.to_string()),
            "btrfs" => FsType::Btrfs,
            "xfs" => FsType::Xfs,
            other => FsType::Other(other.to_string()),
        }
    }
}

impl Default for FsType {
    fn default() -> Self {
        FsType::Ext("ext4".to_string())
    }
}

impl fmt::Display for FsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FsType::Ext(name) | FsType::Other(name) => f.write_str(name),
            FsType::Btrfs => f.write_str("btrfs"),
            FsType::Xfs => f.write_str("xfs"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuInfo {
    pub model: String,
    pub cores: usize,
}

impl CpuInfo {
    /// Parses `/proc/cpuinfo`. The model comes from the first `model name`
    /// line; cores are counted from `processor` lines.
    pub fn parse(cpuinfo: &str) -> Self {
        let mut model = None;
        let mut cores = 0;

        for line in cpuinfo.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            match key.trim() {
                "processor" => cores += 1,
                "model name" if model.is_none() => model = Some(value.trim().to_string()),
                _ => {},
            }
        }

        Self {
            model: model.unwrap_or_else(|| "Unknown".to_string()),
            cores,
        }
    }
}

/// Memory usage in megabytes, computed as `MemTotal - MemFree`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemoryUsage {
    pub total_mb: u64,
    pub used_mb: u64,
}

impl MemoryUsage {
    /// Parses `/proc/meminfo`; `None` unless both `MemTotal` and `MemFree` are present.
    pub fn parse(meminfo: &str) -> Option<Self> {
        let field = |name: &str| -> Option<u64> {
            meminfo.lines().find_map(|line| {
                let rest = line.strip_prefix(name)?.strip_prefix(':')?;
                rest.split_whitespace().next()?.parse().ok()
            })
        };

        let total_mb = field("MemTotal")? / 1024;
        let free_mb = field("MemFree")? / 1024;
        if total_mb == 0 {
            return None;
        }

        Some(Self {
            total_mb,
            used_mb: total_mb.saturating_sub(free_mb),
        })
    }

    pub fn usage_percent(&self) -> f64 {
        self.used_mb as f64 / self.total_mb as f64 * 100.0
    }
}

/// Root filesystem usage as printed by `df -h /`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskUsage {
    pub size: String,
    pub used: String,
    pub percent: String,
}

impl DiskUsage {
    /// Parses the second line of `df -h /` output.
    pub fn parse(df_output: &str) -> Option<Self> {
        let line = df_output.trim().lines().nth(1)?;
        let cols: Vec<&str> = line.split_whitespace().collect();
        if cols.len() < 5 {
            return None;
        }
        Some(Self {
            size: cols[1].to_string(),
            used: cols[2].to_string(),
            percent: cols[4].to_string(),
        })
    }
}

/// Everything the system report shows about the machine. Each probe is
/// optional; failures leave the field empty.
#[derive(Debug, Clone, Default)]
pub struct HardwareInfo {
    pub cpu: Option<CpuInfo>,
    pub memory: Option<MemoryUsage>,
    pub disk: Option<DiskUsage>,
    pub gpu: Option<String>,
}
