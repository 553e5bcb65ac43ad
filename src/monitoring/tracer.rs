/*!
 * Structured Tracing
 * Subscriber setup and per-run spans using the tracing crate
 */

use crate::core::config::{env_flag, ENV_TRACE_JSON};
use tracing::{info, span, Level, Span};
use tracing_subscriber::{fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - SIM_TRACE_JSON: Enable JSON output (default: false)
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let use_json = env_flag(ENV_TRACE_JSON, false);

    let registry = tracing_subscriber::registry().with(env_filter);

    // try_init: a second call (tests, embedding) keeps the first subscriber
    if use_json {
        let _ = registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_writer(std::io::stderr),
            )
            .try_init();
        info!("Structured tracing initialized with JSON output");
    } else {
        let _ = registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_span_events(FmtSpan::CLOSE)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init();
        info!("Structured tracing initialized");
    }
}

/// Span covering one scheduling run
pub fn span_run(run_id: Uuid, processes: usize) -> Span {
    span!(Level::INFO, "schedule", run_id = %run_id, processes = processes)
}
