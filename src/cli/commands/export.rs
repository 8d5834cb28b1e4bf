use crate::cli::commands::{open_session, query_from, warn_skipped_rows};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::logic::Core;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use std::io;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        filter,
        force,
    } = &cli.command
    {
        let query = query_from(filter)?;

        let mut session = open_session(cli, cfg)?;
        let dataset = session.dataset()?;
        warn_skipped_rows(dataset.skipped_maintenance_rows);

        let view = Core::build_dashboard(dataset, &query)?;

        let stdin = io::stdin();
        let path = ExportLogic::export(&view, *format, file, *force, &mut stdin.lock())?;

        session.audit(
            "export",
            &path.display().to_string(),
            &format!(
                "{} export of machine {} ({})",
                format.as_str(),
                view.machine_id,
                view.month.map(|m| m.to_string()).unwrap_or_else(|| "--".into())
            ),
        );
    }
    Ok(())
}
