//! Script listing and execution.

use crate::describe::describe;
use crate::error::{Result, ScriptyError};
use crate::scripts::ScriptRecord;
use log::debug;
use std::ffi::OsString;
use std::io::Write;
use std::process::{Command, Stdio};

/// Column width for names in the detailed listing.
pub const NAME_COLUMN_WIDTH: usize = 25;

/// How scripts are listed when no script is being run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListMode {
    /// Not listing; a script name is expected.
    #[default]
    Off,
    /// One name per line, for scripts and completions.
    Names,
    /// Names with the description from each script's leading comment.
    Detailed,
}

/// Write the listing for `records` to `out`.
///
/// Returns the last name that had to be truncated to fit the detailed
/// listing's name column, if any.
///
/// # Errors
///
/// Fails if a script cannot be read for its description or `out` cannot be
/// written to.
pub fn list_scripts<W: Write>(
    records: &[ScriptRecord],
    mode: ListMode,
    out: &mut W,
) -> Result<Option<String>> {
    if mode == ListMode::Off {
        return Ok(None);
    }

    let mut truncated = None;

    for record in records {
        let written = if mode == ListMode::Detailed {
            let description = describe(&record.path)?;
            if record.name.chars().count() > NAME_COLUMN_WIDTH {
                truncated = Some(record.name.clone());
            }
            writeln!(
                out,
                "{:<width$.width$} {}",
                record.name,
                description,
                width = NAME_COLUMN_WIDTH
            )
        } else {
            writeln!(out, "{}", record.name)
        };
        written.map_err(ScriptyError::Output)?;
    }

    Ok(truncated)
}

/// Warning printed after a detailed listing that cut a name short.
#[must_use]
pub fn truncation_warning(name: &str) -> String {
    format!("'{name}' truncated for readability! Use 'scripty -l' instead.")
}

/// Argument vector for running `record`: its path followed by `args`.
#[must_use]
pub fn command_line(record: &ScriptRecord, args: &[String]) -> Vec<OsString> {
    std::iter::once(record.path.clone().into_os_string())
        .chain(args.iter().map(OsString::from))
        .collect()
}

/// Run `record` with `args` on the caller's terminal and wait for it.
///
/// # Errors
///
/// [`ScriptyError::Spawn`] if the script cannot be started, or
/// [`ScriptyError::ExecutionFailed`] if it exits unsuccessfully.
pub fn run_script(record: &ScriptRecord, args: &[String]) -> Result<()> {
    let argv = command_line(record, args);
    debug!("running {argv:?}");

    let status = Command::new(&argv[0])
        .args(&argv[1..])
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|source| ScriptyError::Spawn {
            path: record.path.clone(),
            source,
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(ScriptyError::ExecutionFailed {
            path: record.path.clone(),
            status,
        })
    }
}
