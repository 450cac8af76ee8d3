//! Dorts renders dotfiles from templates.
//! A single `dorts.toml` holds a `common` table of shared variables and one
//! table per entry; each entry's `<name>.tmpl` is rendered with the merged
//! variables and written to the entry's `path`.

/// Command-line interface module for the dorts application
pub mod cli;

/// Configuration directory resolution, parsing and validation
pub mod config;

/// Common constants: file names, environment variables, reserved keys
pub mod constants;

/// Environment variable lookups
pub mod env;

/// Error types and handling for the dorts application
pub mod error;

/// Template functions querying the X resource database
pub mod functions;

/// Logger setup for the binary
pub mod logger;

/// Home directory substitution in destination paths
pub mod path;

/// Core batch processing: skip rules, rendering and writing
pub mod processor;

/// Template rendering functionality
pub mod renderer;

/// Variable scopes and their precedence rules
pub mod scope;
