use tracing_subscriber::EnvFilter;

/// Default filter directive for a `-v` count.
///
/// 0 keeps only warnings, 1 adds run summaries, 2 or more adds per-file and
/// per-identifier classification detail.
#[must_use]
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the `-v` count.
///
/// Logs go to stderr so report output on stdout stays machine-readable.
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    // A subscriber may already be installed when running under a test harness.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
