//! # scripty
//!
//! Finds the nearest `scripts` directory (or `.scripty.json`) above the
//! current directory and runs its scripts as commands.
//!
//! ## Usage
//!
//! - List scripts: `scripty -l`
//! - List scripts with descriptions: `scripty -d`
//! - Run a script: `scripty deploy`, `scripty deploy.sh --env prod`
//!
//! Set `SCRIPTY_DIR` to search for a directory other than `scripts`.

/// Entry point for the CLI tool.
fn main() {
    scripty::cli::run_cli();
}
