//! Table rendering for the system report.

use crate::models::{HardwareInfo, TweakState};
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Hardware rows; probes that came back empty are left out.
pub fn hardware_table(info: &HardwareInfo) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Component", "Details"]);

    if let Some(cpu) = &info.cpu {
        table.add_row(vec!["CPU".to_string(), cpu.model.clone()]);
        table.add_row(vec!["Cores".to_string(), cpu.cores.to_string()]);
    }
    if let Some(mem) = &info.memory {
        table.add_row(vec![
            "Memory".to_string(),
            format!(
                "{} MB / {} MB ({:.1}%)",
                mem.used_mb,
                mem.total_mb,
                mem.usage_percent()
            ),
        ]);
    }
    if let Some(disk) = &info.disk {
        table.add_row(vec![
            "Disk (/)".to_string(),
            format!("{} used of {} ({})", disk.used, disk.size, disk.percent),
        ]);
    }
    if let Some(gpu) = &info.gpu {
        table.add_row(vec!["GPU".to_string(), gpu.clone()]);
    }
    table
}

fn flag_cell(on: bool, yes: &str, no: &str) -> Cell {
    if on {
        Cell::new(yes).fg(Color::Green)
    } else {
        Cell::new(no).fg(Color::Red)
    }
}

/// Optimization status flags and counters.
pub fn status_table(state: &TweakState) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Optimization", "Status"]);
    table.add_row(vec![
        Cell::new("GameMode"),
        flag_cell(state.gamemode_enabled, "Enabled", "Disabled"),
    ]);
    table.add_row(vec![
        Cell::new("Wine optimized"),
        flag_cell(state.wine_optimized, "Yes", "No"),
    ]);
    table.add_row(vec![
        Cell::new("Installed packages"),
        Cell::new(state.installed_packages.len()),
    ]);
    if let Some(last_run) = &state.last_run {
        table.add_row(vec![Cell::new("Last run"), Cell::new(last_run)]);
    }
    table
}

/// The last `limit` optimization records, or `None` when there are none.
pub fn history_table(state: &TweakState, limit: usize) -> Option<Table> {
    let recent = state.recent_optimizations(limit);
    if recent.is_empty() {
        return None;
    }
    let mut table = new_table();
    table.set_header(vec!["Time", "Type"]);
    for record in recent {
        table.add_row(vec![record.time.clone(), record.kind.clone()]);
    }
    Some(table)
}
