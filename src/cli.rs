//! Command-line interface implementation for dorts.
//! Provides argument parsing using clap.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments structure for dorts.
#[derive(Parser, Debug)]
#[command(author, version, about = "dorts: render dotfiles from templates", long_about = None)]
pub struct Args {
    /// Configuration directory holding dorts.toml and the *.tmpl files.
    /// Overrides DORTS_DIR and the XDG default.
    #[arg(short, long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Render every enabled entry and print the result instead of writing files
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With clap's default error handling for invalid arguments
pub fn get_args() -> Args {
    Args::parse()
}
