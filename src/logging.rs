use tracing_subscriber::EnvFilter;

/// Installs the stderr subscriber used by the command line tool.
///
/// `RUST_LOG` wins unless `verbose` asks for debug output explicitly.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
