mod cli;
mod error;
mod models;
mod storage;
mod system;
#[cfg(test)]
mod test_support;
mod tweaks;

use clap::Parser;
use cli::menu::{self, MenuAction};
use cli::{App, Cli, Commands};
use colored::*;
use error::{AppError, Result};
use storage::{AppPaths, LOG_FILE_NAME};
use system::SystemShell;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Refuses to run anywhere but Linux.
fn ensure_linux(os: &str) -> Result<()> {
    if os == "linux" {
        Ok(())
    } else {
        Err(AppError::UnsupportedPlatform(os.to_string()))
    }
}

/// Console logging stays off unless `RUST_LOG` asks for it, since every
/// action already prints its own status lines. The file log always records
/// info and above.
fn init_logging(paths: &AppPaths) -> WorkerGuard {
    let file_appender = tracing_appender::rolling::never(&paths.config_dir, LOG_FILE_NAME);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let console = fmt::layer().with_writer(std::io::stderr).with_filter(
        EnvFilter::builder()
            .with_default_directive(LevelFilter::OFF.into())
            .from_env_lossy(),
    );
    let file = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(false)
        .with_timer(ChronoLocal::new("[%H:%M:%S]".to_string()))
        .with_filter(LevelFilter::INFO);

    tracing_subscriber::registry().with(console).with(file).init();
    guard
}

fn current_user() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("LOGNAME"))
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Runs one action, asking first where the action is disruptive.
async fn execute(app: &mut App<SystemShell>, command: Commands, assume_yes: bool) -> Result<()> {
    let command = match command {
        Commands::Full => {
            menu::print_full_plan();
            if !assume_yes && !menu::confirm("Start the full optimization?")? {
                println!("{}", "Cancelled.".yellow());
                return Ok(());
            }
            Commands::Full
        },
        Commands::Restore(mut args) => {
            menu::print_restore_plan();
            if !assume_yes && !menu::confirm("Continue?")? {
                println!("{}", "Cancelled.".yellow());
                return Ok(());
            }
            if args.from.is_none() && !assume_yes {
                args.from = menu::prompt_restore_point(&app.restore_points()?)?;
            }
            Commands::Restore(args)
        },
        other => other,
    };
    app.run_command(command).await
}

async fn interactive(app: &mut App<SystemShell>, assume_yes: bool) -> Result<()> {
    let user = current_user();

    loop {
        menu::print_banner(app.distro(), &user);

        let action = menu::prompt_menu(app.has_sudo())?;
        println!("\n---\n");

        let command = match action {
            MenuAction::Run(command) => command,
            MenuAction::Exit => {
                println!("{}", "👋 Goodbye! Happy gaming!".green());
                break;
            },
        };

        if let Err(e) = execute(app, command, assume_yes).await {
            error!("Command execution failed: {:?}", e);
            println!(
                "{} {}",
                "Error executing command:".red(),
                e.to_string().red()
            );
        }

        println!("\n---\n");
        menu::pause("Press Enter to return to the menu")?;
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = ensure_linux(std::env::consts::OS) {
        println!("{}", e.to_string().red());
        return Err(e);
    }

    let paths = AppPaths::resolve(cli.config_dir.clone())?;
    if let Err(e) = paths.ensure_dirs() {
        println!(
            "{} {}",
            "Error: Could not create the configuration directory:".red(),
            e
        );
        return Err(e);
    }
    let _guard = init_logging(&paths);

    info!("Starting WexTweaks...");

    let mut app = match App::new(paths, &cli.os_release).await {
        Ok(app) => {
            info!(distro = %app.distro().name, "Application initialized successfully.");
            app
        },
        Err(e) => {
            error!("Failed to initialize application: {:?}", e);
            println!(
                "{}",
                "Error: Failed to initialize application. Check logs.".red()
            );
            return Err(e);
        },
    };

    match cli.command {
        Some(command) => execute(&mut app, command, cli.yes).await,
        None => interactive(&mut app, cli.yes).await,
    }
}
