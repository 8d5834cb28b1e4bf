//! machdash library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod session;
pub mod source;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use std::path::Path;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config, config_path: &Path) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli, cfg, config_path),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg, config_path),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::HashPassword { .. } => cli::commands::hash_password::handle(&cli.command),
        Commands::Dashboard { .. } => cli::commands::dashboard::handle(cli, cfg),
        Commands::Machines => cli::commands::machines::handle(cli, cfg),
        Commands::Months { .. } => cli::commands::months::handle(cli, cfg),
        Commands::Export { .. } => cli::commands::export::handle(cli, cfg),
        Commands::Shell => cli::commands::shell::handle(cli, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // configuration is loaded once, then command-line overrides apply
    let config_path = Config::resolve_path(cli.config.as_deref());
    let mut cfg = Config::load_from(&config_path)?;

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }
    if let Some(source) = &cli.source {
        cfg.workbook_url = source.clone();
    }

    dispatch(&cli, &cfg, &config_path)
}
