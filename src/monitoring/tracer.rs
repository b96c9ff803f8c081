/*!
 * Structured Tracing
 * Subscriber setup and run-level spans using the tracing crate
 *
 * Features:
 * - Run ID generation for correlating every event of one simulation
 * - JSON-formatted logs for structured parsing
 * - Compact human-readable output for development
 */

use crate::scheduler::Policy;
use tracing::{info, info_span, Span};
use tracing_subscriber::{fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

/// Environment variable switching the subscriber to JSON output
pub const TRACE_JSON_ENV: &str = "PROBSCHED_TRACE_JSON";

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - PROBSCHED_TRACE_JSON: Enable JSON output (default: false)
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var(TRACE_JSON_ENV)
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_span_events(FmtSpan::CLOSE)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    };

    if installed.is_ok() {
        info!(json = use_json, "Structured tracing initialized");
    }
}

/// Generate a unique run ID for event correlation
pub fn generate_run_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span wrapping one simulation run
pub fn simulation_span(policy: Policy, records: usize) -> Span {
    info_span!(
        "simulation",
        run_id = %generate_run_id(),
        policy = policy.as_str(),
        records = records,
    )
}
