//! Dorts' main application entry point.
//! Handles command-line argument parsing and runs one full batch over the
//! configured entries.

use std::sync::Arc;

use dorts::{
    cli::{get_args, Args},
    config::load_config,
    env::ProcessEnv,
    error::{default_error_handler, DortsResult},
    functions::{CommandQuery, ResourceFunctions},
    logger::init_logger,
    processor::{EntryOutcome, Processor},
    renderer::MiniJinjaRenderer,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Resolves the config directory and loads `dorts.toml`
/// 2. Sets up the renderer with the resource lookup functions
/// 3. Processes every entry in order, aborting on the first fatal error
fn run(args: Args) -> DortsResult<()> {
    let context = load_config(args.config_dir.as_deref(), &ProcessEnv)?;

    let functions = ResourceFunctions::new(Arc::new(CommandQuery::xrdb()));
    let renderer = MiniJinjaRenderer::with_functions(&functions);

    let result = Processor::new(&renderer, &context, args.dry_run).run();

    for report in &result.entries {
        if let EntryOutcome::DryRun { output, content } = &report.outcome {
            println!("==> {} ({})", report.name, output.display());
            print!("{content}");
        }
    }

    let (rendered, skipped) = (result.rendered(), result.skipped());
    result.into_result()?;

    log::info!("Done: {} rendered, {} skipped.", rendered, skipped);
    Ok(())
}
