//! Logging setup for binaries and tests that drive pagination.

use std::sync::Once;
use tracing::Span;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

///
/// LogFormat
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

/// Install the global subscriber once per process.
///
/// Levels come from `RUST_LOG` (default `info`); `pagemark_core=debug` shows
/// per-request advice and boundary fallbacks. Later calls are no-ops, as is
/// the first call when another subscriber is already installed.
pub fn init_logging(format: LogFormat) {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let installed = match format {
            LogFormat::Json => tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .try_init(),
            LogFormat::Pretty => tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .try_init(),
        };

        if installed.is_err() {
            tracing::debug!("global subscriber already installed; keeping it");
        }
    });
}

/// Span for one page request; `resumed` is set when a token was supplied.
#[must_use]
pub fn page_span(page_size: u32, resumed: bool) -> Span {
    tracing::info_span!("page", page_size, resumed)
}
