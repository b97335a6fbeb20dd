//! Logging setup using the `tracing` ecosystem.
//!
//! Diagnostics and progress lines go to stdout. `--verbose` enables the
//! per-file progress lines; otherwise only warnings are shown unless
//! `RUST_LOG` says otherwise.

use std::io::IsTerminal;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global subscriber. Call once, before any logging.
pub fn init_logger(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("extdoc=info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("extdoc=warn"))
    };

    let stdout = std::io::stdout();
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(false)
        .with_level(true)
        .with_ansi(stdout.is_terminal())
        .without_time()
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
