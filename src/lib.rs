//! # scripty
//!
//! Run the scripts in a project's `scripts` directory by name, from anywhere
//! inside the project.

pub mod cli;
pub mod config;
pub mod describe;
pub mod error;
pub mod executor;
pub mod locator;
pub mod resolver;
pub mod scripts;

pub use error::{Result, ScriptyError};

/// Print an error message and exit with the error's status.
pub fn fatal_error(error: &ScriptyError) -> ! {
    eprintln!("scripty: {error}");
    std::process::exit(error.exit_code());
}
