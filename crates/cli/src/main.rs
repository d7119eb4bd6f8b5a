// opsgrid CLI - dashboard tables from a shared worksheet, headless

mod auth;
mod check;
mod exit_codes;
mod fetch;
mod render;
mod tables;
mod util;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use opsgrid_engine::LayoutError;
use opsgrid_io::SourceError;

use exit_codes::{
    EXIT_ERROR, EXIT_LAYOUT_INVALID, EXIT_LAYOUT_PARSE, EXIT_SOURCE_DECODE, EXIT_SOURCE_HTTP,
    EXIT_SOURCE_IO, EXIT_SUCCESS, EXIT_UNKNOWN_TABLE, EXIT_USAGE,
};

#[derive(Parser)]
#[command(name = "opsgrid")]
#[command(about = "Team dashboard tables from a shared worksheet (headless)")]
#[command(version)]
struct Cli {
    /// Layout config file
    #[arg(
        long,
        global = true,
        default_value = "opsgrid.toml",
        env = "OPSGRID_CONFIG",
        value_name = "PATH"
    )]
    config: PathBuf,

    /// Read the grid from a local CSV export, overriding [source]
    #[arg(long, global = true, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Fetch the grid from a published-sheet CSV URL, overriding [source]
    #[arg(long, global = true, value_name = "URL", conflicts_with = "input")]
    url: Option<String>,

    /// Suppress notices and progress on stderr
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one ranking block, sorted best-first
    #[command(after_help = "\
Examples:
  opsgrid ranking diamond
  opsgrid ranking diamond --format json
  opsgrid --input board.csv ranking response_time --format csv")]
    Ranking {
        /// Block name from the layout's [rankings] tables
        name: String,

        /// Output format
        #[arg(long, short = 'f', value_enum, default_value_t)]
        format: Format,
    },

    /// Print one evolution block, melted to (operator, metric, period, value)
    #[command(after_help = "\
Examples:
  opsgrid series evolution
  opsgrid series evolution --format csv > evolution.csv")]
    Series {
        /// Block name from the layout's [series] tables
        name: String,

        /// Output format
        #[arg(long, short = 'f', value_enum, default_value_t)]
        format: Format,
    },

    /// Print one count block, melted to (operator, period, count)
    #[command(after_help = "\
Examples:
  opsgrid counts daily
  opsgrid counts daily --format json")]
    Counts {
        /// Block name from the layout's [counts] tables
        name: String,

        /// Output format
        #[arg(long, short = 'f', value_enum, default_value_t)]
        format: Format,
    },

    /// Print one duration strip as per-period elapsed times
    #[command(after_help = "\
Examples:
  opsgrid durations team_time
  opsgrid durations team_time --format csv")]
    Durations {
        /// Block name from the layout's [durations] tables
        name: String,

        /// Output format
        #[arg(long, short = 'f', value_enum, default_value_t)]
        format: Format,
    },

    /// Print the header-keyed summary rollup
    #[command(after_help = "\
Examples:
  opsgrid summary
  opsgrid summary --format json")]
    Summary {
        /// Output format
        #[arg(long, short = 'f', value_enum, default_value_t)]
        format: Format,
    },

    /// Derive every configured table from one snapshot
    #[command(after_help = "\
Examples:
  opsgrid board
  opsgrid board --json > board.json")]
    Board {
        /// Emit the full board as JSON instead of text tables
        #[arg(long)]
        json: bool,
    },

    /// Validate the layout and report drift against the live grid
    #[command(after_help = "\
Examples:
  opsgrid check
  opsgrid --input board.csv check
Exit codes:
  0  layout valid, grid in range
  3  drift found (details on stdout)")]
    Check,

    /// Store a dashboard session for scoped table views
    #[command(after_help = "\
Examples:
  opsgrid login erika
  echo \"$OPS_PASSWORD\" | opsgrid login bruno
  opsgrid login bruno --password swordfish   # visible in shell history")]
    Login {
        /// Username from the layout's [users] tables
        username: String,

        /// Password (read from stdin when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Remove the stored session
    Logout,

    /// Show the stored session
    Whoami {
        /// Emit JSON instead of one line of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Copy, Clone, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    #[default]
    Table,
    Json,
    Csv,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError {
            code,
            message,
            hint,
        }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let Cli {
        config,
        input,
        url,
        quiet,
        command,
    } = cli;
    let input = input.as_deref();
    let url = url.as_deref();

    match command {
        Commands::Ranking { name, format } => {
            let mut ctx = tables::table_ctx(&config, input, url, quiet)?;
            tables::cmd_ranking(&mut ctx, &name, format)
        }
        Commands::Series { name, format } => {
            let mut ctx = tables::table_ctx(&config, input, url, quiet)?;
            tables::cmd_series(&mut ctx, &name, format)
        }
        Commands::Counts { name, format } => {
            let mut ctx = tables::table_ctx(&config, input, url, quiet)?;
            tables::cmd_counts(&mut ctx, &name, format)
        }
        Commands::Durations { name, format } => {
            let mut ctx = tables::table_ctx(&config, input, url, quiet)?;
            tables::cmd_durations(&mut ctx, &name, format)
        }
        Commands::Summary { format } => {
            let mut ctx = tables::table_ctx(&config, input, url, quiet)?;
            tables::cmd_summary(&mut ctx, format)
        }
        Commands::Board { json } => {
            let mut ctx = tables::table_ctx(&config, input, url, quiet)?;
            tables::cmd_board(&mut ctx, json)
        }
        Commands::Check => check::cmd_check(&config, input, url, quiet),
        Commands::Login { username, password } => {
            let layout = tables::load_layout(&config)?;
            auth::cmd_login(&layout, &username, password, quiet)
        }
        Commands::Logout => auth::cmd_logout(quiet),
        Commands::Whoami { json } => auth::cmd_whoami(json),
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_USAGE,
            message: msg.into(),
            hint: None,
        }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_ERROR,
            message: msg.into(),
            hint: None,
        }
    }

    /// Map a layout error to its exit code, hinting the known names
    /// when a table lookup missed.
    pub fn layout(err: LayoutError) -> Self {
        let code = match &err {
            LayoutError::Parse(_) => EXIT_LAYOUT_PARSE,
            LayoutError::Validation(_) => EXIT_LAYOUT_INVALID,
            LayoutError::UnknownTable { .. } => EXIT_UNKNOWN_TABLE,
        };
        let hint = match &err {
            LayoutError::UnknownTable { kind, known, .. } if known.is_empty() => {
                Some(format!("the layout declares no {kind} blocks"))
            }
            LayoutError::UnknownTable { kind, known, .. } => {
                Some(format!("configured {kind} blocks: {}", known.join(", ")))
            }
            _ => None,
        };
        Self {
            code,
            message: err.to_string(),
            hint,
        }
    }

    /// Map a source error to its exit code.
    pub fn source(err: SourceError) -> Self {
        let code = match &err {
            SourceError::Io(_) => EXIT_SOURCE_IO,
            SourceError::Http(_) => EXIT_SOURCE_HTTP,
            SourceError::Csv(_) => EXIT_SOURCE_DECODE,
        };
        Self {
            code,
            message: err.to_string(),
            hint: None,
        }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
