use std::io;

use tracing_subscriber::EnvFilter;
use weekplan::storage::config::Config;

mod cli;
use cli::{CliMode, parse_cli_mode, run_week_mode};
mod tui;
use tui::run_tui;

#[tokio::main]
async fn main() -> Result<(), io::Error> {
    setup_logging();

    let cli_mode = match parse_cli_mode() {
        Ok(mode) => mode,
        Err(err) => {
            eprintln!("Error: {}", err);
            println!("{}", cli::usage());
            return Ok(());
        }
    };

    let config = Config::load_or_create().unwrap_or_else(|e| {
        tracing::error!("Failed to load config, using defaults: {}", e);
        Config::default()
    });

    match cli_mode {
        CliMode::Week(date) => {
            if let Err(e) = run_week_mode(&config, date).await {
                eprintln!("Error: {:#}", e);
                tracing::error!("Week printout failed: {:#}", e);
            }
            Ok(())
        }
        CliMode::Interactive => run_tui(config).await,
    }
}

fn setup_logging() {
    let log_dir = Config::config_dir();

    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = tracing_appender::rolling::daily(log_dir, "weekplan.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .init();

    std::mem::forget(_guard);

    tracing::info!("weekplan started");
}
