//! Tracing and logging infrastructure.
//!
//! The library itself only emits `tracing` events and spans. Applications, like the bundled
//! command line tool, install a subscriber once at startup via [`setup_tracing`].
//!
//! # Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `RUST_LOG` | Console log filter (e.g., `info`, `wasabi_id=trace`) | `info` |
//!
//! # Output
//!
//! Logs are written to stderr, so that generated identifiers on stdout stay untouched:
//! ```text
//! DEBUG wasabi_id::sampler: Round 1 ended with 3 of 4 symbols. Requesting another 7 bytes... [generate{alphabet=10 size=4}]
//! ```
//!
//! With the `pretty_logs` feature, the level is colored.

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

mod format;

pub use format::ConsoleLogFormat;

/// Initializes the tracing subscriber, filtering by `RUST_LOG` or `info` if it is unset.
///
/// # Panics
///
/// Panics if a global subscriber has already been installed.
pub fn setup_tracing() {
    setup_tracing_with_default("info");
}

/// Initializes the tracing subscriber, filtering by `RUST_LOG` or the given directives if it is
/// unset.
///
/// # Panics
///
/// Panics if a global subscriber has already been installed.
pub fn setup_tracing_with_default(default_filter: &str) {
    Registry::default()
        .with(setup_console_layer(default_filter, std::io::stderr))
        .init();

    tracing::info!("Tracing initialized successfully [reporting to stderr]");
}

/// Creates the console layer. Escape codes are only emitted with the `pretty_logs` feature.
fn setup_console_layer<W>(
    default_filter: &str,
    writer: W,
) -> Box<dyn Layer<Registry> + Send + Sync + 'static>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt::layer()
        .with_ansi(cfg!(feature = "pretty_logs"))
        .with_writer(writer)
        .event_format(ConsoleLogFormat)
        .with_filter(filter)
        .boxed()
}
