//! One-line script descriptions
//!
//! Takes the first comment line after any shebang and blank lines.
//! Only that single line is used; this is not a docstring parser.

use crate::error::{Result, ScriptyError};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// How many leading blank or shebang lines are skipped before giving up.
pub const DESCRIPTION_LOOKAHEAD: usize = 20;

fn is_ignored_header_line(line: &str) -> bool {
    line.trim().is_empty() || line.starts_with("#!")
}

/// Extract the description from an already-read first portion of a script.
#[must_use]
pub fn description_from_lines<I>(lines: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let mut lines = lines.into_iter();
    let mut current = lines.next().unwrap_or_default();

    let mut skipped = 0;
    while skipped < DESCRIPTION_LOOKAHEAD && is_ignored_header_line(&current) {
        current = lines.next().unwrap_or_default();
        skipped += 1;
    }

    if !current.starts_with('#') {
        return String::new();
    }

    current
        .trim_start_matches(['#', ' '])
        .trim_end_matches(' ')
        .to_string()
}

/// Read the description of the script at `path`.
///
/// Returns an empty string when the script has no leading comment.
///
/// # Errors
///
/// Returns [`ScriptyError::ScriptRead`] if the file cannot be opened or read.
pub fn describe(path: &Path) -> Result<String> {
    let read_error = |source| ScriptyError::ScriptRead {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(read_error)?;
    let lines = BufReader::new(file)
        .split(b'\n')
        .take(DESCRIPTION_LOOKAHEAD + 1)
        .map(|line| {
            line.map(|bytes| {
                let text = String::from_utf8_lossy(&bytes);
                text.strip_suffix('\r').unwrap_or(&*text).to_string()
            })
        })
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(read_error)?;

    Ok(description_from_lines(lines))
}
