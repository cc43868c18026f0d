//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: strategy or config error (unknown strategy, bad params, invalid session)
//! - 11: I/O error (config read, trace write)
//! - 12: input error (malformed JSON flags or files)
//! - 13: serialization error

use std::fmt;
use stroll_core::StrollError;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
#[derive(Debug)]
pub enum CliError {
    /// A strategy or configuration error.
    Config(StrollError),
    /// An I/O error (file read, trace write).
    Io(String),
    /// A user input error (bad JSON in a flag or file, missing strategy).
    Input(String),
    /// A serialization error (JSON output failure).
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(e) => write!(f, "{e}"),
            CliError::Io(msg) | CliError::Input(msg) | CliError::Serialization(msg) => {
                write!(f, "{msg}")
            }
        }
    }
}

impl From<StrollError> for CliError {
    fn from(e: StrollError) -> Self {
        match e {
            StrollError::Io(msg) => CliError::Io(msg),
            other => CliError::Config(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}
