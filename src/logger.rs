/// Initializes the global logger.
///
/// `Info` by default so skipped entries are reported, `Debug` when verbose.
/// `RUST_LOG` takes precedence when set.
pub fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .parse_default_env()
        .init();
}
