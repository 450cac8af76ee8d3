//! Error handling for the dorts application.
//! Defines custom error types and results used throughout the application.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Custom error types for dorts operations.
///
/// Every variant is fatal for a run: skip conditions (disabled entry, missing
/// template) are not errors and never appear here.
#[derive(Error, Debug)]
pub enum DortsError {
    /// The configuration file could not be read
    #[error("Failed to read config file {}: {source}.", .path.display())]
    ConfigReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid TOML or holds unsupported value types
    #[error("Failed to parse config file {}: {source}", .path.display())]
    ConfigParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The configuration tree has the wrong shape
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// An entry lacks its mandatory `path` key
    #[error("Entry `{entry}' does not have mandatory `path' key.")]
    MissingPath { entry: String },

    /// A template file exists but could not be read
    #[error("Failed to read template {}: {source}.", .path.display())]
    TemplateReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Represents errors that occur while parsing or executing a template
    #[error("Template error in {name}: {source}")]
    TemplateError {
        name: String,
        #[source]
        source: minijinja::Error,
    },

    /// The rendered output could not be written to its destination
    #[error("Failed to write {}: {source}.", .path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The external query command could not be started
    #[error("Failed to run query command `{command}': {source}.")]
    CommandFailed {
        command: String,
        #[source]
        source: io::Error,
    },

    /// The external query command ran but reported failure
    #[error("Query command `{command}' exited with {status}.")]
    CommandNonZeroExit { command: String, status: ExitStatus },

    /// A lookup pattern is not a valid regular expression
    #[error("Invalid lookup pattern `{pattern}': {source}.")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A lookup pattern did not capture anything in the query output
    #[error("No match for pattern `{pattern}' in query output.")]
    NoMatch { pattern: String },

    #[error("Failed to resolve home directory.")]
    HomeDirectoryNotFound,
}

/// Convenience type alias for Results with DortsError as the error type.
pub type DortsResult<T> = Result<T, DortsError>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: DortsError) -> ! {
    eprintln!("{}", err);
    std::process::exit(1);
}
