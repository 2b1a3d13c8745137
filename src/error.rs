//! Error type shared by every stage of a scripty invocation.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

#[derive(thiserror::Error, Debug)]
pub enum ScriptyError {
    #[error("can't read current directory: {0}")]
    CurrentDir(#[source] io::Error),

    #[error("No config file or scripty dir '{dir_name}' found")]
    RootNotFound { dir_name: String },

    #[error("can't read dir: {}", path.display())]
    DirRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("can't read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed config file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Can't read scriptsDir from {}", path.display())]
    ConfigMissingField { path: PathBuf },

    #[error("can't read script {}: {source}", path.display())]
    ScriptRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("argument not found in scripts: {0}")]
    ScriptNotFound(String),

    #[error("'{name}' matches more than one script: {}", display_paths(paths))]
    DuplicateScript { name: String, paths: Vec<PathBuf> },

    #[error("can't start {}: {source}", path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} failed: {status}", path.display())]
    ExecutionFailed { path: PathBuf, status: ExitStatus },

    #[error("can't write output: {0}")]
    Output(#[source] io::Error),
}

pub type Result<T> = std::result::Result<T, ScriptyError>;

impl ScriptyError {
    /// Process exit status for this error.
    ///
    /// A failed script hands its own exit code through; everything else is 1.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ExecutionFailed { status, .. } => match status.code() {
                Some(code) if code != 0 => code,
                _ => 1,
            },
            _ => 1,
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
