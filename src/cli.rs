//! CLI module containing the main entry point logic.
//!
//! Flags are parsed once here and handed to the rest of the crate as a
//! [`RunOptions`] value; no other module reads process-wide state.

use crate::config::{Config, scripts_dir_name_from_env};
use crate::error::{Result, ScriptyError};
use crate::executor::{self, ListMode};
use crate::scripts::{self, ScriptRecord};
use crate::{locator, resolver};
use clap::{CommandFactory, Parser as ClapParser};
use log::debug;
use std::io::Write;
use std::path::Path;

const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable holding the log filter.
pub const LOG_ENV_VAR: &str = "SCRIPTY_LOG";

/// CLI arguments for scripty.
#[derive(ClapParser, Debug)]
#[command(name = "scripty")]
#[command(version = PKG_VERSION)]
#[command(about = "Run the scripts in the nearest scripts directory by name", long_about = None)]
#[command(override_usage = "scripty [options | <script_name> [args...]]")]
struct Cli {
    /// Script to run, with or without its .sh/.py suffix, followed by its arguments
    #[arg(value_name = "SCRIPT_NAME", trailing_var_arg = true)]
    command: Vec<String>,

    /// Print all available scripts (in machine readable format)
    #[arg(short, long)]
    list: bool,

    /// Print all available scripts (with docstring, if available)
    #[arg(short, long)]
    detail: bool,

    /// Fail instead of picking the first script when a name is ambiguous
    #[arg(long)]
    strict: bool,
}

impl Cli {
    fn list_mode(&self) -> ListMode {
        if self.detail {
            ListMode::Detailed
        } else if self.list {
            ListMode::Names
        } else {
            ListMode::Off
        }
    }
}

/// Everything the discovery and dispatch stages need to know about the invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub list: ListMode,
    pub strict: bool,
    /// Directory name the upward search looks for.
    pub scripts_dir_name: String,
}

impl RunOptions {
    /// Whether errors for a missing scripts root should be silent.
    #[must_use]
    pub fn is_listing(&self) -> bool {
        self.list != ListMode::Off
    }
}

/// Find and enumerate the scripts visible from `start_dir`.
///
/// # Errors
///
/// Propagates failures of the locate, config and enumerate stages.
pub fn discover(start_dir: &Path, options: &RunOptions) -> Result<Vec<ScriptRecord>> {
    let marker = locator::locate(start_dir, &options.scripts_dir_name)?;
    let config = Config::resolve(&marker)?;
    debug!("enumerating {}", config.scripts_dir.display());
    scripts::enumerate(&config.scripts_dir)
}

/// List scripts or run the one named by `command[0]` with the rest as arguments.
///
/// Listing output goes to `out`; a truncation warning goes to stderr.
///
/// # Errors
///
/// Any [`ScriptyError`]; all of them end the invocation.
pub fn run<W: Write>(
    start_dir: &Path,
    command: &[String],
    options: &RunOptions,
    out: &mut W,
) -> Result<()> {
    let records = discover(start_dir, options)?;

    if options.is_listing() {
        if let Some(name) = executor::list_scripts(&records, options.list, out)? {
            eprintln!("{}", executor::truncation_warning(&name));
        }
        return Ok(());
    }

    let Some((name, args)) = command.split_first() else {
        return Ok(());
    };

    let record = resolver::resolve(&records, name, options.strict)?;
    executor::run_script(record, args)
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or(LOG_ENV_VAR, "warn"))
        .format_timestamp(None)
        .init();
}

/// Print `error` unless the invocation is a listing that found no scripts root, then exit.
fn exit_with_error(error: &ScriptyError, options: &RunOptions) -> ! {
    // Listing output is consumed by other programs; stay quiet.
    let silent = options.is_listing() && matches!(error, ScriptyError::RootNotFound { .. });
    if silent {
        std::process::exit(error.exit_code());
    }
    crate::fatal_error(error)
}

/// Main CLI logic.
pub fn run_cli() {
    init_logging();
    let cli = Cli::parse();

    let options = RunOptions {
        list: cli.list_mode(),
        strict: cli.strict,
        scripts_dir_name: scripts_dir_name_from_env(),
    };

    // Nothing to run and nothing to list: show usage
    if cli.command.is_empty() && !options.is_listing() {
        if let Err(e) = Cli::command().print_help() {
            crate::fatal_error(&ScriptyError::Output(e));
        }
        return;
    }

    let start_dir = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => exit_with_error(&ScriptyError::CurrentDir(e), &options),
    };

    let stdout = std::io::stdout();
    if let Err(e) = run(&start_dir, &cli.command, &options, &mut stdout.lock()) {
        exit_with_error(&e, &options);
    }
}
