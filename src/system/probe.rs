//! Best-effort host probes. Every probe swallows its own failures and
//! reports `None` (or a default) instead of an error.

use super::ShellRunner;
use crate::models::{CpuInfo, DiskUsage, FsType, HardwareInfo, MemoryUsage};
use std::path::Path;
use tracing::debug;

/// Runs `line` and returns trimmed stdout when it exits 0 with output.
async fn capture<R: ShellRunner>(runner: &R, line: &str) -> Option<String> {
    match runner.run_line(line).await {
        Ok(output) if output.success() => {
            let stdout = output.stdout.trim();
            (!stdout.is_empty()).then(|| stdout.to_string())
        },
        Ok(output) => {
            debug!("probe '{}' exited with {:?}", line, output.code);
            None
        },
        Err(e) => {
            debug!("probe '{}' failed: {}", line, e);
            None
        },
    }
}

/// Root filesystem type, falling back to ext4 when `findmnt` is unavailable.
pub async fn detect_root_fs<R: ShellRunner>(runner: &R) -> FsType {
    match runner.run_line("findmnt -n -o FSTYPE /").await {
        Ok(output) => FsType::parse(&output.stdout),
        Err(e) => {
            debug!("findmnt failed: {}", e);
            FsType::default()
        },
    }
}

/// GPU name: NVIDIA via `nvidia-smi`, else the first AMD then Intel VGA line from `lspci`.
pub async fn detect_gpu<R: ShellRunner>(runner: &R) -> Option<String> {
    if let Some(name) = capture(runner, "nvidia-smi --query-gpu=name --format=csv,noheader").await {
        return Some(format!("NVIDIA {}", name));
    }
    if let Some(line) = capture(runner, "lspci | grep -i vga | grep -i amd").await {
        return Some(line);
    }
    capture(runner, "lspci | grep -i vga | grep -i intel").await
}

/// Collects the hardware summary shown in the system report.
///
/// `proc_dir` is normally `/proc`.
pub async fn probe_hardware<R: ShellRunner>(runner: &R, proc_dir: &Path) -> HardwareInfo {
    let cpu = std::fs::read_to_string(proc_dir.join("cpuinfo"))
        .ok()
        .map(|s| CpuInfo::parse(&s));
    let memory = std::fs::read_to_string(proc_dir.join("meminfo"))
        .ok()
        .and_then(|s| MemoryUsage::parse(&s));
    let disk = capture(runner, "df -h /")
        .await
        .and_then(|s| DiskUsage::parse(&s));
    let gpu = detect_gpu(runner).await;

    HardwareInfo {
        cpu,
        memory,
        disk,
        gpu,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::{CommandOutput, MockShell};

    #[tokio::test]
    async fn root_fs_from_findmnt() {
        let shell = MockShell::new();
        shell.respond("findmnt", CommandOutput::ok("btrfs\n"));
        assert_eq!(detect_root_fs(&shell).await, FsType::Btrfs);
    }

    #[tokio::test]
    async fn root_fs_defaults_to_ext4_on_timeout() {
        let shell = MockShell::new();
        shell.time_out("findmnt");
        assert_eq!(detect_root_fs(&shell).await, FsType::Ext("ext4".into()));
    }

    #[tokio::test]
    async fn gpu_prefers_nvidia() {
        let shell = MockShell::new();
        shell.respond("nvidia-smi", CommandOutput::ok("GeForce RTX 3080\n"));
        assert_eq!(detect_gpu(&shell).await.as_deref(), Some("NVIDIA GeForce RTX 3080"));
        assert_eq!(shell.lines().len(), 1);
    }

    #[tokio::test]
    async fn gpu_falls_back_to_lspci_intel() {
        let shell = MockShell::new();
        shell.fail("nvidia-smi", 127, "not found");
        shell.fail("grep -i amd", 1, "");
        shell.respond(
            "grep -i intel",
            CommandOutput::ok("00:02.0 VGA compatible controller: Intel Corporation UHD Graphics 620\n"),
        );
        assert_eq!(
            detect_gpu(&shell).await.as_deref(),
            Some("00:02.0 VGA compatible controller: Intel Corporation UHD Graphics 620")
        );
    }

    #[tokio::test]
    async fn hardware_probe_skips_missing_sources() {
        let shell = MockShell::new();
        shell.fail("nvidia-smi", 127, "");
        shell.fail("lspci", 1, "");
        shell.respond(
            "df -h /",
            CommandOutput::ok("Filesystem Size Used Avail Use% Mounted on\n/dev/sda1 100G 40G 60G 40% /\n"),
        );

        let info = probe_hardware(&shell, Path::new("/nonexistent-proc")).await;
        assert!(info.cpu.is_none());
        assert!(info.memory.is_none());
        assert!(info.gpu.is_none());
        assert_eq!(info.disk.unwrap().percent, "40%");
    }
}
