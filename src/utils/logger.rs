//! Console diagnostics for the `antidotv` binary.

use tracing_subscriber::fmt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set. Dependencies only report warnings.
pub fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "antidotv=debug,warn"
    } else {
        "antidotv=info,warn"
    }
}

/// Installs the global subscriber. Progress goes to stderr, leaving stdout
/// free for the files being inspected.
pub fn init_cli_logger(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time()
                .compact(),
        )
        .init();
}
