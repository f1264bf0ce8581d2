//! Diagnostic logging setup.
//!
//! Logs go to stderr so stdout stays reserved for the report.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::VerbosityLevel;

static INIT: Once = Once::new();

/// Default filter directive for a verbosity level; `RUST_LOG` overrides it
pub fn default_filter(verbosity: VerbosityLevel) -> &'static str {
    match verbosity {
        VerbosityLevel::Verbose => "debug",
        VerbosityLevel::Normal | VerbosityLevel::Quiet => "warn",
    }
}

/// Initialize tracing - safe to call multiple times
pub fn init_tracing(verbosity: VerbosityLevel) {
    INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .with(env_filter)
            .init();

        tracing::debug!(?verbosity, "Tracing initialized");
    });
}
