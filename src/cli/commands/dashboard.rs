use crate::cli::commands::{open_session, query_from, warn_skipped_rows};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::logic::Core;
use crate::errors::AppResult;
use crate::ui::dashboard::render;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Dashboard { filter } = &cli.command {
        let query = query_from(filter)?;

        let mut session = open_session(cli, cfg)?;
        let dataset = session.dataset()?;
        warn_skipped_rows(dataset.skipped_maintenance_rows);

        let view = Core::build_dashboard(dataset, &query)?;
        println!("{}", render(&view));
    }
    Ok(())
}
