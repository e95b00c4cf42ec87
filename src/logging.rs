//! Tracing initialization

use tracing_subscriber::{EnvFilter, prelude::*};

/// Default filter when `RUST_LOG` is unset
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "awscli_bundle=debug"
    } else {
        "awscli_bundle=warn"
    }
}

/// Initialize tracing on stderr. Call once at process startup.
///
/// `RUST_LOG` takes precedence over `--verbose`.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
