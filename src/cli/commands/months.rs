use crate::cli::commands::open_session;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::filter;
use crate::core::logic::Core;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::warning;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Months { machine } = &cli.command {
        let mut session = open_session(cli, cfg)?;
        let dataset = session.dataset()?;

        let machine_id = match machine {
            Some(m) if dataset.has_machine(m.trim()) => m.trim().to_string(),
            Some(m) => return Err(AppError::UnknownMachine(m.clone())),
            None => Core::default_machine(dataset)?,
        };

        let months = filter::available_months(&dataset.operations_for(&machine_id));
        if months.is_empty() {
            warning(format!("No dated records for machine {machine_id}"));
            return Ok(());
        }

        println!("📅 Months with data for machine {machine_id}:");
        for m in months {
            println!("   {m}  ({} {})", m.name(), m.year);
        }
    }
    Ok(())
}
