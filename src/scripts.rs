//! Script enumeration.

use crate::error::{Result, ScriptyError};
use log::{debug, trace};
use std::fs;
use std::path::{Path, PathBuf};

/// Suffixes stripped from file names to form script names, highest priority first.
pub const SUFFIX_WHITELIST: &[&str] = &[".sh", ".py"];

/// One runnable script under the scripts root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRecord {
    /// File name without its whitelisted suffix.
    pub name: String,
    /// The stripped suffix, or empty.
    pub suffix: String,
    /// Absolute path to the file.
    pub path: PathBuf,
}

impl ScriptRecord {
    /// Build a record for the script at `path`.
    ///
    /// `path` is kept as given; only the name and suffix go through a lossy
    /// UTF-8 conversion.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let (name, suffix) = split_suffix(&file_name);
        Self {
            name: name.to_string(),
            suffix: suffix.to_string(),
            path,
        }
    }

    /// Build a record for `file_name` inside `dir`.
    #[must_use]
    pub fn from_file_name(dir: &Path, file_name: &str) -> Self {
        Self::new(dir.join(file_name))
    }
}

/// Split off the first whitelisted suffix `file_name` ends with.
#[must_use]
pub fn split_suffix(file_name: &str) -> (&str, &str) {
    SUFFIX_WHITELIST
        .iter()
        .find_map(|suffix| {
            file_name
                .strip_suffix(suffix)
                .map(|name| (name, *suffix))
        })
        .unwrap_or((file_name, ""))
}

/// Recursively list every script below `root`.
///
/// Entries are visited in file-name order; a subdirectory's scripts appear
/// where the subdirectory itself sorts.
///
/// # Errors
///
/// Returns [`ScriptyError::DirRead`] if `root` or any directory below it
/// cannot be listed.
pub fn enumerate(root: &Path) -> Result<Vec<ScriptRecord>> {
    let mut records = Vec::new();
    collect(root, &mut records)?;
    debug!("{} scripts under {}", records.len(), root.display());
    Ok(records)
}

fn collect(dir: &Path, records: &mut Vec<ScriptRecord>) -> Result<()> {
    let dir_read_error = |source| ScriptyError::DirRead {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(dir)
        .map_err(dir_read_error)?
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(dir_read_error)?;
    entries.sort_by_key(fs::DirEntry::file_name);

    for entry in entries {
        let path = entry.path();
        // Follow symlinks so a linked script counts as a file.
        let Ok(metadata) = fs::metadata(&path) else {
            trace!("skipping dangling entry {}", path.display());
            continue;
        };

        if metadata.is_dir() {
            collect(&path, records)?;
        } else if metadata.is_file() {
            let record = ScriptRecord::new(path);
            trace!("{} -> {}", record.path.display(), record.name);
            records.push(record);
        } else {
            trace!("skipping special file {}", path.display());
        }
    }

    Ok(())
}
