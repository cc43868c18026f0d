use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "stroll=info,warn";
const VERBOSE_FILTER: &str = "stroll=debug,warn";

/// Installs the stderr subscriber. `--verbose` wins over `RUST_LOG`.
pub fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}
