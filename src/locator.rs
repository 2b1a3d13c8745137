//! Upward search for the scripts root.
//!
//! Starting from a directory, each ancestor is checked for a `.scripty.json`
//! config file or a scripts directory, in that order. The first hit ends the
//! search; reaching the filesystem root without a hit is an error.

use crate::error::{Result, ScriptyError};
use log::{debug, trace};
use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the config file that marks a scripts root.
pub const CONFIG_FILE_NAME: &str = ".scripty.json";

/// What the upward search found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker {
    /// Path to a `.scripty.json` file.
    ConfigFile(PathBuf),
    /// Path to a scripts directory found without a config file.
    ScriptsDir(PathBuf),
}

/// List the entry names of `dir`, treating any listing error as an empty directory.
///
/// This is the only place the upward search tolerates I/O failures.
#[must_use]
pub fn read_dir_permissive(dir: &Path) -> Vec<OsString> {
    match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.file_name())
            .collect(),
        Err(e) => {
            debug!("ignoring unreadable directory {}: {}", dir.display(), e);
            Vec::new()
        }
    }
}

/// Check a single directory for a marker.
fn marker_in(dir: &Path, scripts_dir_name: &str) -> Option<Marker> {
    let names = read_dir_permissive(dir);

    if names.iter().any(|name| name == CONFIG_FILE_NAME) {
        return Some(Marker::ConfigFile(dir.join(CONFIG_FILE_NAME)));
    }

    if names.iter().any(|name| name == scripts_dir_name) {
        let candidate = dir.join(scripts_dir_name);
        if candidate.is_dir() {
            return Some(Marker::ScriptsDir(candidate));
        }
        trace!("{} is not a directory, skipping", candidate.display());
    }

    None
}

/// Walk upward from `start` until a marker is found.
///
/// # Errors
///
/// Returns [`ScriptyError::RootNotFound`] once the filesystem root has been
/// checked without finding a marker.
pub fn locate(start: &Path, scripts_dir_name: &str) -> Result<Marker> {
    let mut current_dir = fs::canonicalize(start).unwrap_or_else(|_| start.to_path_buf());
    let mut visited = HashSet::new();

    loop {
        if !visited.insert(current_dir.clone()) {
            break;
        }

        trace!("looking for markers in {}", current_dir.display());
        if let Some(marker) = marker_in(&current_dir, scripts_dir_name) {
            debug!("found {:?}", marker);
            return Ok(marker);
        }

        match current_dir.parent() {
            Some(parent) => current_dir = parent.to_path_buf(),
            None => break, // Reached root
        }
    }

    Err(ScriptyError::RootNotFound {
        dir_name: scripts_dir_name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use tempfile::TempDir;

    // Unique enough that no ancestor of the temp dir will contain it.
    const TEST_DIR_NAME: &str = "scripty-locator-test-scripts";

    fn nested(root: &Path, depth: usize) -> PathBuf {
        let mut dir = root.to_path_buf();
        for i in 0..depth {
            dir.push(format!("level{i}"));
        }
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_finds_scripts_dir_at_any_depth() {
        for depth in 0..4 {
            let temp_dir = TempDir::new().unwrap();
            let root = fs::canonicalize(temp_dir.path()).unwrap();
            fs::create_dir(root.join(TEST_DIR_NAME)).unwrap();
            let start = nested(&root, depth);

            let marker = locate(&start, TEST_DIR_NAME).unwrap();
            assert_eq!(marker, Marker::ScriptsDir(root.join(TEST_DIR_NAME)));
        }
    }

    #[test]
    fn test_finds_config_file_above_start() {
        let temp_dir = TempDir::new().unwrap();
        let root = fs::canonicalize(temp_dir.path()).unwrap();
        fs::write(root.join(CONFIG_FILE_NAME), "{}").unwrap();
        let start = nested(&root, 2);

        let marker = locate(&start, TEST_DIR_NAME).unwrap();
        assert_eq!(marker, Marker::ConfigFile(root.join(CONFIG_FILE_NAME)));
    }

    #[test]
    fn test_config_file_wins_at_same_level() {
        let temp_dir = TempDir::new().unwrap();
        let root = fs::canonicalize(temp_dir.path()).unwrap();
        fs::create_dir(root.join(TEST_DIR_NAME)).unwrap();
        fs::write(root.join(CONFIG_FILE_NAME), "{}").unwrap();

        let marker = locate(&root, TEST_DIR_NAME).unwrap();
        assert!(matches!(marker, Marker::ConfigFile(_)));
    }

    #[test]
    fn test_nearest_marker_wins() {
        let temp_dir = TempDir::new().unwrap();
        let root = fs::canonicalize(temp_dir.path()).unwrap();
        fs::write(root.join(CONFIG_FILE_NAME), "{}").unwrap();
        let inner = nested(&root, 1);
        fs::create_dir(inner.join(TEST_DIR_NAME)).unwrap();

        let marker = locate(&inner, TEST_DIR_NAME).unwrap();
        assert_eq!(marker, Marker::ScriptsDir(inner.join(TEST_DIR_NAME)));
    }

    #[test]
    fn test_plain_file_with_scripts_name_is_not_a_marker() {
        let temp_dir = TempDir::new().unwrap();
        let root = fs::canonicalize(temp_dir.path()).unwrap();
        let inner = nested(&root, 1);
        fs::write(inner.join(TEST_DIR_NAME), "not a dir").unwrap();
        fs::create_dir(root.join(TEST_DIR_NAME)).unwrap();

        let marker = locate(&inner, TEST_DIR_NAME).unwrap();
        assert_eq!(marker, Marker::ScriptsDir(root.join(TEST_DIR_NAME)));
    }

    #[test]
    fn test_not_found_reports_dir_name() {
        let temp_dir = TempDir::new().unwrap();
        let err = locate(temp_dir.path(), "scripty-no-such-marker-anywhere").unwrap_err();
        assert!(matches!(
            err,
            ScriptyError::RootNotFound { ref dir_name } if dir_name == "scripty-no-such-marker-anywhere"
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_ancestor_does_not_stop_search() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let root = fs::canonicalize(temp_dir.path()).unwrap();
        fs::create_dir(root.join(TEST_DIR_NAME)).unwrap();
        let locked = root.join("locked");
        let start = locked.join("child");
        fs::create_dir_all(&start).unwrap();

        // Traversable but not listable.
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o311)).unwrap();
        let result = locate(&start, TEST_DIR_NAME);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(result.unwrap(), Marker::ScriptsDir(root.join(TEST_DIR_NAME)));
    }

    #[test]
    fn test_unreadable_dir_lists_as_empty() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("gone");
        assert!(read_dir_permissive(&missing).is_empty());
    }
}
