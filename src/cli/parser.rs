use crate::export::ExportFormat;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for machdash
/// Heavy-machinery dashboard over a shared operations workbook
#[derive(Parser)]
#[command(
    name = "machdash",
    version = env!("CARGO_PKG_VERSION"),
    about = "Machinery dashboard: maintenance status, fuel consumption and throughput per machine and month",
    long_about = None
)]
pub struct Cli {
    /// Use another configuration file
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<String>,

    /// Override audit database path (useful for tests or custom DB)
    #[arg(global = true, long = "db", value_name = "FILE")]
    pub db: Option<String>,

    /// Override workbook location (http(s) URL, file:// URL or local path)
    #[arg(global = true, long = "source", value_name = "LOCATION")]
    pub source: Option<String>,

    /// Username (falls back to $MACHDASH_USER, then a prompt)
    #[arg(global = true, long = "user")]
    pub user: Option<String>,

    /// Password (falls back to $MACHDASH_PASSWORD, then a prompt)
    #[arg(global = true, long = "password")]
    pub password: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Machine / month / work-site choice shared by `dashboard` and `export`.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Machine id (default: first machine in natural order)
    #[arg(long, short = 'm')]
    pub machine: Option<String>,

    /// Month as YYYY-MM (default: latest month with data)
    #[arg(long, value_name = "YYYY-MM")]
    pub month: Option<String>,

    /// Uncheck a work-site (repeatable)
    #[arg(long = "exclude-site", value_name = "SITE")]
    pub exclude_site: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration file and the audit database
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Hash a password for the `users` list of the configuration
    HashPassword {
        /// Password to hash (read from stdin when omitted)
        password: Option<String>,
    },

    /// Show the dashboard for one machine and month
    Dashboard {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Maintenance overview of every machine
    Machines,

    /// List the months with data for a machine
    Months {
        #[arg(long, short = 'm')]
        machine: Option<String>,
    },

    /// Export the daily series of one dashboard render
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[command(flatten)]
        filter: FilterArgs,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Interactive session: one login, one fetch, many renders
    Shell,
}
