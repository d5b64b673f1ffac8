mod app;
mod cli;
mod commands;
mod config;
mod data;
mod input;
mod logging;
mod theme;
mod ui;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::warn;

use cli::{Cli, Commands};
use config::{config_path, ensure_dirs, LogLevel, UserConfig};
use logging::LogMode;

fn main() -> Result<()> {
    color_eyre::install()?;
    let dirs_result = ensure_dirs();

    let cli = Cli::parse();
    let (mut config, config_error) = UserConfig::load_or_default(&config_path());
    config.merge_with_args(
        cli.appearance.as_deref(),
        cli.refresh_ms,
        cli.icons.as_deref(),
    );

    let log_level_override = cli.log_level.as_deref().map(LogLevel::from_str);
    let _guard = logging::init(
        config.log_level,
        log_mode(cli.command.as_ref()),
        log_level_override,
    );

    if let Err(e) = dirs_result {
        warn!(error = %e, "Failed to create config directory");
    }
    if let Some(e) = config_error {
        warn!(error = %e, "Using default config");
    }

    let glyphs = config.icons;
    match cli.command {
        Some(Commands::Report {
            samples,
            interval,
            compact,
        }) => commands::report::run(samples, interval, compact, glyphs),
        Some(Commands::Devices { json }) => commands::devices::run(json, glyphs),
        Some(Commands::Watch { interval }) => commands::watch::run(interval, glyphs),
        Some(Commands::Config { path, reset, edit }) => commands::config::run(path, reset, edit),
        Some(Commands::Ui) | None => app::run_tui(config),
    }
}

/// The TUI owns the terminal, so it logs to a file; everything else logs
/// to stderr.
fn log_mode(command: Option<&Commands>) -> LogMode {
    match command {
        Some(Commands::Ui) | None => LogMode::File,
        Some(_) => LogMode::Stderr,
    }
}
