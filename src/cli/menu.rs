//! The interactive main menu, banner, and the prompts the menu loop needs.

use super::{Commands, RestoreArgs};
use crate::error::Result;
use crate::models::DistroProfile;
use colored::*;
use dialoguer::{theme::ColorfulTheme, Confirm, FuzzySelect, Input, Select};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Menu entries as `(key, title, description)`, in display order.
pub const MENU: [(&str, &str, &str); 10] = [
    ("1", "🚀 Full optimization", "Everything for gaming in one go"),
    ("2", "📦 Install gaming packages", "Steam, Wine, GameMode and friends"),
    ("3", "🎮 Configure GameMode", "Daemon config and per-game scripts"),
    ("4", "⚡ Optimize system", "sysctl and filesystem"),
    ("5", "🖥️  Optimize desktop", "GNOME, KDE, Xfce"),
    ("6", "🧹 Clean system", "Package caches, temp files, old logs"),
    ("7", "💾 Create restore point", "Archive the current configuration"),
    ("8", "📊 System information", "Hardware and optimization status"),
    ("9", "↺ Restore settings", "Undo tweaks and reset saved state"),
    ("0", "🚪 Exit", "Quit WexTweaks"),
];

/// Shown when a selection maps to no action.
pub const INVALID_CHOICE: &str = "Invalid choice!";

/// What a menu key asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    Run(Commands),
    Exit,
}

/// Maps a numeric menu key to its action; `None` for anything else.
pub fn action_for_key(key: &str) -> Option<MenuAction> {
    let command = match key.trim() {
        "1" => Commands::Full,
        "2" => Commands::Packages,
        "3" => Commands::Gamemode,
        "4" => Commands::System,
        "5" => Commands::Desktop,
        "6" => Commands::Clean,
        "7" => Commands::RestorePoint,
        "8" => Commands::Info,
        "9" => Commands::Restore(RestoreArgs::default()),
        "0" => return Some(MenuAction::Exit),
        _ => return None,
    };
    Some(MenuAction::Run(command))
}

/// Action for the entry at `index` in [`MENU`].
pub fn action_for_index(index: usize) -> Option<MenuAction> {
    MENU.get(index).and_then(|(key, _, _)| action_for_key(key))
}

pub fn clear_screen() {
    if std::io::stdout().is_terminal() {
        print!("\x1B[2J\x1B[1;1H");
    }
}

fn rule() -> ColoredString {
    "=".repeat(64).blue()
}

pub fn print_banner(distro: &DistroProfile, user: &str) {
    clear_screen();
    println!("{}", "╔══════════════════════════════════════════════════════════════╗".blue());
    println!(
        "{}{}{}",
        "║".blue(),
        "              ⚡ WEXTWEAKS LINUX OPTIMIZER v1.0 ⚡             ".yellow(),
        "║".blue()
    );
    println!(
        "{}{}{}",
        "║".blue(),
        "        Linux tuning for gaming and desktop performance       ".cyan(),
        "║".blue()
    );
    println!("{}", "╚══════════════════════════════════════════════════════════════╝".blue());
    println!();
    println!(
        "{} {}",
        "Distribution:".yellow(),
        format!("{} {}", distro.name, distro.version).white()
    );
    println!("{} {}", "Architecture:".yellow(), std::env::consts::ARCH.white());
    println!("{} {}", "User:".yellow(), user.white());
    println!("{}", rule());
}

pub fn print_heading(title: &str) {
    println!("{}", title.yellow().bold());
    println!("{}", rule());
}

/// Explains what a full optimization run will do.
pub fn print_full_plan() {
    print_heading("🚀 FULL LINUX OPTIMIZATION");
    println!("{}", "This will:".white());
    println!("  1. 📦 Install gaming packages and utilities");
    println!("  2. 🎮 Configure GameMode and per-game tweaks");
    println!("  3. ⚡ Tune kernel parameters and the filesystem");
    println!("  4. 🍷 Configure Wine/Proton");
    println!("  5. 🧹 Clean up the system");
    println!("  6. 🖥️  Tune the desktop environment");
    println!("{}", "\n⚠️  Some steps need sudo".red());
}

/// Explains what restoring settings will undo.
pub fn print_restore_plan() {
    print_heading("↺ RESTORE SETTINGS");
    println!("{}", "⚠️  Tweaks will be rolled back".red());
    println!("{}", "This will:".white());
    println!("  1. Restore the newest sysctl.conf backup");
    println!("  2. Remove the GameMode configuration");
    println!("  3. Reset the saved optimization state");
    println!("  (or extract a restore point, if you pick one)");
}

/// Shows the menu and waits for a choice. Esc or Ctrl+C counts as exit; a
/// selection with no action prints [`INVALID_CHOICE`] and asks again.
pub fn prompt_menu(has_sudo: bool) -> Result<MenuAction> {
    if !has_sudo {
        println!(
            "{}",
            "⚠️  No passwordless sudo! Some tweaks will fail.".red()
        );
    }

    let labels: Vec<String> = MENU
        .iter()
        .map(|(key, title, desc)| format!("[{}] {}  ({})", key, title, desc))
        .collect();

    loop {
        let selection = FuzzySelect::with_theme(&ColorfulTheme::default())
            .with_prompt("Choose an action (0-9)")
            .items(&labels)
            .default(0)
            .interact_opt()?;

        let Some(index) = selection else {
            return Ok(MenuAction::Exit);
        };
        match action_for_index(index) {
            Some(action) => return Ok(action),
            None => println!("{}", INVALID_CHOICE.red()),
        }
    }
}

pub fn confirm(prompt: &str) -> Result<bool> {
    let answer = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact_opt()?;
    Ok(answer.unwrap_or(false))
}

pub fn pause(prompt: &str) -> Result<()> {
    Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    Ok(())
}

/// Lets the user pick one of the existing restore points, or none.
pub fn prompt_restore_point(points: &[PathBuf]) -> Result<Option<PathBuf>> {
    if points.is_empty() {
        return Ok(None);
    }

    let mut items = vec!["Don't extract a restore point".to_string()];
    items.extend(points.iter().map(|p| {
        p.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| p.display().to_string())
    }));

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Extract a restore point as well?")
        .items(&items)
        .default(0)
        .interact_opt()?;

    Ok(match selection {
        Some(i) if i > 0 => Some(points[i - 1].clone()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", Commands::Full)]
    #[case("2", Commands::Packages)]
    #[case("3", Commands::Gamemode)]
    #[case("4", Commands::System)]
    #[case(" 5 ", Commands::Desktop)]
    #[case("6", Commands::Clean)]
    #[case("7", Commands::RestorePoint)]
    #[case("8", Commands::Info)]
    #[case("9", Commands::Restore(RestoreArgs::default()))]
    fn numeric_keys_map_to_commands(#[case] key: &str, #[case] expected: Commands) {
        assert_eq!(action_for_key(key), Some(MenuAction::Run(expected)));
    }

    #[rstest]
    #[case("10")]
    #[case("a")]
    #[case("")]
    #[case("-1")]
    fn invalid_keys_are_rejected(#[case] key: &str) {
        assert_eq!(action_for_key(key), None);
    }

    #[test]
    fn zero_exits() {
        assert_eq!(action_for_key("0"), Some(MenuAction::Exit));
    }

    #[test]
    fn out_of_range_index_is_invalid() {
        assert_eq!(action_for_index(0), Some(MenuAction::Run(Commands::Full)));
        assert_eq!(action_for_index(MENU.len() - 1), Some(MenuAction::Exit));
        assert_eq!(action_for_index(MENU.len()), None);
    }

    #[test]
    fn every_menu_entry_has_an_action() {
        for (key, _, _) in MENU {
            assert!(action_for_key(key).is_some(), "key {} has no action", key);
        }
    }
}
