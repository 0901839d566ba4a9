//! Static file contents written by the tweak handlers.

use std::path::Path;

/// `~/.config/gamemode.ini`
pub const GAMEMODE_INI: &str = r#"[general]
# Delay before applying optimizations (ms)
start_delay=0

# Process niceness adjustment
renice=10

# Do not propagate gamescope settings to child processes
apply_gamescope_to_children=0

# Keep the screensaver from kicking in while playing
desktop_phosphor_disable=0
inhibit_screensaver=1

# CPU governor while a game is running
desiredgov=performance

# GPU clocks
gpu_frequency=maximum

# Soft real-time scheduling
softrealtime=auto

[filter]
# Applications GameMode is enabled for
whitelist=steam
whitelist=lutris
whitelist=wine
whitelist=proton
"#;

/// Launch environment for Counter-Strike.
pub const CSGO_SCRIPT: &str = r#"#!/bin/bash
# Counter-Strike launch tweaks
export __GL_SHADER_DISK_CACHE_SKIP_CLEANUP=1
export MANGOHUD=1
export VKBASALT_ENABLE=1
# Low-latency PulseAudio
export PULSE_LATENCY_MSEC=30
"#;

/// Launch environment for Dota 2.
pub const DOTA2_SCRIPT: &str = r#"#!/bin/bash
# Dota 2 launch tweaks
export __GL_THREADED_OPTIMIZATIONS=1
export __GL_SYNC_TO_VBLANK=0
# Prefer the radeonsi Mesa driver
export MESA_LOADER_DRIVER_OVERRIDE=radeonsi
"#;

/// Per-game scripts written into the game optimizations directory.
pub const GAME_SCRIPTS: [(&str, &str); 2] = [("csgo.sh", CSGO_SCRIPT), ("dota2.sh", DOTA2_SCRIPT)];

/// Block appended to `/etc/sysctl.conf`.
pub const SYSCTL_TWEAKS: &str = r#"# WexTweaks gaming and performance tuning

# Larger TCP/IP buffers
net.core.rmem_max = 134217728
net.core.wmem_max = 134217728
net.ipv4.tcp_rmem = 4096 87380 134217728
net.ipv4.tcp_wmem = 4096 65536 134217728

# No TCP slow start after idle
net.ipv4.tcp_slow_start_after_idle = 0

# TCP window scaling
net.ipv4.tcp_window_scaling = 1

# Larger accept queue
net.core.somaxconn = 65535

# Larger receive backlog
net.core.netdev_max_backlog = 5000

# Low latency networking
net.ipv4.tcp_low_latency = 1
net.ipv4.tcp_timestamps = 0
net.ipv4.tcp_sack = 0

# File descriptor limits
fs.file-max = 2097152
fs.nr_open = 2097152

# Memory and swap
vm.swappiness = 10
vm.vfs_cache_pressure = 50
vm.dirty_ratio = 10
vm.dirty_background_ratio = 5

# Reserved huge pages
vm.nr_hugepages = 8

# Shared memory segments
kernel.shmmax = 68719476736
kernel.shmall = 4294967296

# Writeback interval
vm.dirty_writeback_centisecs = 1500

# SSD writeback thresholds
vm.dirty_background_bytes = 16777216
vm.dirty_bytes = 50331648
"#;

/// Lines appended to sysctl.conf by the filesystem pass, regardless of fs type.
pub const WRITEBACK_SYSCTLS: [&str; 2] = [
    "vm.dirty_writeback_centisecs = 1500",
    "vm.dirty_expire_centisecs = 3000",
];

/// Shell environment for the dedicated Wine prefix.
pub fn wine_env_script(wineprefix: &Path) -> String {
    let prefix = wineprefix.display();
    format!(
        r#"
# Dedicated wineprefix
export WINEPREFIX="{prefix}"

# 64-bit prefix
export WINEARCH="win64"

# Wine performance
export WINEDEBUG="-all"
export STAGING_SHARED_MEMORY=1
export STAGING_WRITECOPY=1

# Command stream multithreading
export CSMT=enabled

# OpenGL shader cache
export __GL_SHADER_DISK_CACHE=1
export __GL_SHADER_DISK_CACHE_PATH="{prefix}/shadercache"
export __GL_SHADER_DISK_CACHE_SKIP_CLEANUP=1

# CPU topology detection
export WINE_CPU_TOPOLOGY=auto

# Low-latency PulseAudio
export PULSE_LATENCY_MSEC=30
"#
    )
}
