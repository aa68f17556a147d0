//! src/main.rs
//!
//! Entrypoint: install error reporting, parse configuration, route logs to a
//! file (the terminal belongs to the UI), then delegate to `app::run()`.

mod app;
mod color;
mod config;
mod error;
mod gesture;
mod input;
mod layout;
mod net;
mod panels;
mod prices;
mod ui;

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use tracing_subscriber::EnvFilter;

fn init_tracing(path: &Path) -> color_eyre::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("opening log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("spot_board=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .init();
    Ok(())
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let settings = config::Cli::parse().into_settings()?;
    init_tracing(&settings.log_file)?;
    app::run(settings)
}
