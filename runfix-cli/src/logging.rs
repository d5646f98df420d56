//! Tracing setup for the CLI.
//!
//! Logs go to stderr so stdout stays parseable with `--output json`.
//! `RUNFIX_LOG` takes precedence over `RUST_LOG`; default is WARN.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "runfix_core=warn,runfix=warn";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env("RUNFIX_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

pub fn init(use_color: bool) {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(use_color)
                .with_target(true)
                .without_time()
                .compact(),
        )
        .init();
}
