use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use std::path::Path;

/// Handle the `init` command
///
/// This initializes:
///  - the configuration file (kept when it already exists)
///  - the SQLite audit database and its `log` table
pub fn handle(cli: &Cli, cfg: &Config, config_path: &Path) -> AppResult<()> {
    println!("⚙️  Initializing machdash…");

    if config_path.exists() {
        println!("📄 Config file : {} (kept)", config_path.display());
    } else {
        cfg.save_to(config_path)?;
        println!("📄 Config file : {}", config_path.display());
    }
    println!("🗄️  Database   : {}", cfg.database);

    let pool = DbPool::new(&cfg.database)?;
    println!("✅ Database initialized at {}", cfg.database);

    ttlog_quiet(
        &pool.conn,
        "init",
        &cfg.database,
        &format!("Database initialized at {}", cfg.database),
    );

    if cfg.users.is_empty() {
        println!(
            "🔐 No users configured yet: run `machdash hash-password` and add the hash under `users` in {}",
            config_path.display()
        );
    }
    if cli.source.is_none() && cfg.workbook_url.trim().is_empty() {
        println!("📎 Set `workbook_url` in the configuration or pass --source.");
    }

    println!("🎉 machdash initialization completed!");
    Ok(())
}
