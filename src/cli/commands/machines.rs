use crate::cli::commands::{open_session, warn_skipped_rows};
use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::logic::Core;
use crate::errors::AppResult;
use crate::ui::dashboard::render_fleet;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let mut session = open_session(cli, cfg)?;
    let dataset = session.dataset()?;
    warn_skipped_rows(dataset.skipped_maintenance_rows);

    println!("{}", render_fleet(&Core::fleet(dataset)));
    Ok(())
}
