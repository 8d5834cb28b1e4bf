pub mod config;
pub mod dashboard;
pub mod export;
pub mod hash_password;
pub mod init;
pub mod log;
pub mod machines;
pub mod months;
pub mod shell;

use crate::cli::parser::{Cli, FilterArgs};
use crate::config::Config;
use crate::core::filter::SiteSelection;
use crate::core::logic::DashboardQuery;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::Month;
use crate::session::{CredentialGate, Session};
use crate::source;
use crate::ui::messages::warning;
use std::env;
use std::io::{self, BufRead, Write};

pub const USER_ENV: &str = "MACHDASH_USER";
pub const PASSWORD_ENV: &str = "MACHDASH_PASSWORD";

/// Log in and open the configured data source.
///
/// Credentials come from `--user`/`--password`, then the environment, then
/// a prompt on stdin.
pub fn open_session(cli: &Cli, cfg: &Config) -> AppResult<Session> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    let username = credential(cli.user.as_deref(), USER_ENV, "Username", &mut input)?;
    let password = credential(cli.password.as_deref(), PASSWORD_ENV, "Password", &mut input)?;

    // rejected logins are audited too, so the pool comes first
    let audit = DbPool::new(&cfg.database)?;
    let gate = CredentialGate::new(&cfg.users);
    let source = source::open(cfg.workbook_location()?, cfg.fetch_timeout())?;

    Session::login(
        &gate,
        &username,
        &password,
        source,
        cfg.sheets.clone(),
        Some(audit),
    )
}

fn credential<R: BufRead>(
    given: Option<&str>,
    env_var: &str,
    prompt: &str,
    input: &mut R,
) -> AppResult<String> {
    if let Some(v) = given {
        return Ok(v.to_string());
    }
    if let Ok(v) = env::var(env_var)
        && !v.is_empty()
    {
        return Ok(v);
    }

    print!("{prompt}: ");
    io::stdout().flush().ok();

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(AppError::InvalidCredentials);
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Turn `--machine/--month/--exclude-site` into a query.
pub fn query_from(filter: &FilterArgs) -> AppResult<DashboardQuery> {
    let month = filter
        .month
        .as_deref()
        .map(str::parse::<Month>)
        .transpose()?;

    Ok(DashboardQuery {
        machine: filter.machine.clone(),
        month,
        sites: SiteSelection::excluding(filter.exclude_site.iter()),
    })
}

/// Warn once per load about maintenance rows that could not be used.
pub fn warn_skipped_rows(skipped: usize) {
    if skipped > 0 {
        warning(format!(
            "{skipped} maintenance row(s) skipped for missing values"
        ));
    }
}
