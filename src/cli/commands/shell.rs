//! Interactive session: one login and one fetch, then any number of renders
//! over the memoized workbook.

use crate::cli::commands::{open_session, warn_skipped_rows};
use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::filter::{self, SiteSelection};
use crate::core::logic::{Core, DashboardQuery};
use crate::errors::{AppError, AppResult};
use crate::export::{ExportFormat, ExportLogic};
use crate::models::Month;
use crate::session::Session;
use crate::ui::dashboard::{render, render_fleet};
use crate::ui::messages::{error, info, success, warning};
use clap::ValueEnum;
use std::io::{self, BufRead, Write};

const HELP: &str = "\
Commands:
  show                      render the dashboard
  machine <ID>              select a machine (month and work-sites reset)
  month <YYYY-MM>           select a month
  toggle <SITE>             check/uncheck a work-site
  sites                     list the work-sites of the current selection
  months                    list the months with data for the machine
  machines                  maintenance overview of the fleet
  export <FORMAT> <FILE>    export the current view (csv, json, xlsx, pdf)
  refresh                   drop the cached workbook and fetch it again
  help                      this text
  quit                      leave the session";

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let mut session = open_session(cli, cfg)?;
    success(format!("Logged in as {}", session.user()));
    info(format!("Data source: {}", session.source_key()));

    let stdin = io::stdin();
    run(&mut session, &mut stdin.lock())
}

enum Step {
    Continue,
    Quit,
}

/// Read-eval loop. Data source failures end the session; everything else is
/// reported and the loop goes on.
pub fn run<R: BufRead>(session: &mut Session, input: &mut R) -> AppResult<()> {
    let mut query = DashboardQuery::default();

    let dataset = session.dataset()?;
    warn_skipped_rows(dataset.skipped_maintenance_rows);
    println!("{}", render(&Core::build_dashboard(dataset, &query)?));
    info("Type `help` for the list of commands.");

    loop {
        print!("machdash> ");
        io::stdout().flush().ok();

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            println!();
            break;
        }

        match execute(session, &mut query, line.trim(), input) {
            Ok(Step::Continue) => {}
            Ok(Step::Quit) => break,
            Err(e) if e.ends_session() => return Err(e),
            Err(e) => error(e),
        }
    }

    info("Session closed.");
    Ok(())
}

fn execute<R: BufRead>(
    session: &mut Session,
    query: &mut DashboardQuery,
    line: &str,
    input: &mut R,
) -> AppResult<Step> {
    let (cmd, arg) = match line.split_once(char::is_whitespace) {
        Some((c, a)) => (c, a.trim()),
        None => (line, ""),
    };

    match cmd.to_ascii_lowercase().as_str() {
        "" => {}
        "quit" | "exit" | "q" => return Ok(Step::Quit),
        "help" | "?" => println!("{HELP}"),
        "show" => show(session, query)?,
        "machine" => {
            if arg.is_empty() {
                warning("Usage: machine <ID>");
                return Ok(Step::Continue);
            }
            if !session.dataset()?.has_machine(arg) {
                return Err(AppError::UnknownMachine(arg.to_string()));
            }
            query.machine = Some(arg.to_string());
            query.month = None;
            query.sites = SiteSelection::all();
            show(session, query)?;
        }
        "month" => {
            query.month = Some(arg.parse::<Month>()?);
            show(session, query)?;
        }
        "toggle" => {
            if arg.is_empty() {
                warning("Usage: toggle <SITE>");
                return Ok(Step::Continue);
            }
            let checked = query.sites.toggle(arg);
            info(format!(
                "{arg}: {}",
                if checked { "checked" } else { "unchecked" }
            ));
            show(session, query)?;
        }
        "sites" => {
            let view = Core::build_dashboard(session.dataset()?, query)?;
            if view.sites.is_empty() {
                warning("No work-sites for the current machine and month");
            }
            for s in &view.sites {
                println!("  [{}] {}", if s.checked { "x" } else { " " }, s.site);
            }
        }
        "months" => {
            let dataset = session.dataset()?;
            let machine = match &query.machine {
                Some(m) => m.clone(),
                None => Core::default_machine(dataset)?,
            };
            for m in filter::available_months(&dataset.operations_for(&machine)) {
                println!("  {m}");
            }
        }
        "machines" => println!("{}", render_fleet(&Core::fleet(session.dataset()?))),
        "export" => {
            let mut parts = arg.split_whitespace();
            let (Some(format), Some(file)) = (parts.next(), parts.next()) else {
                warning("Usage: export <csv|json|xlsx|pdf> <FILE>");
                return Ok(Step::Continue);
            };
            let format = ExportFormat::from_str(format, true)
                .map_err(|_| AppError::InvalidExportFormat(format.to_string()))?;

            let view = Core::build_dashboard(session.dataset()?, query)?;
            let path = ExportLogic::export(&view, format, file, false, input)?;
            session.audit(
                "export",
                &path.display().to_string(),
                &format!("{} export of machine {}", format.as_str(), view.machine_id),
            );
        }
        "refresh" => {
            let dataset = session.refresh()?;
            warn_skipped_rows(dataset.skipped_maintenance_rows);
            let fetched_at = session
                .cache()
                .get(session.source_key())
                .map(|e| e.fetched_at.format("%H:%M:%S").to_string())
                .unwrap_or_default();
            success(format!("Workbook reloaded at {fetched_at}"));
            show(session, query)?;
        }
        other => warning(format!("Unknown command '{other}', type `help`")),
    }

    Ok(Step::Continue)
}

fn show(session: &mut Session, query: &DashboardQuery) -> AppResult<()> {
    let view = Core::build_dashboard(session.dataset()?, query)?;
    println!("{}", render(&view));
    Ok(())
}
