/*!
 * Tracing
 * Structured logging for both demo programs using the tracing crate
 *
 * Logs always go to stderr; stdout is reserved for the programs' own
 * diagnostic lines so they can be asserted on.
 */

use std::time::Instant;
use tracing::{debug, info, span, warn, Level};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};
use uuid::Uuid;

/// Default filter when RUST_LOG is unset
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: warn)
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_tracing(json: bool) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_line_number(true)
                    .with_file(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_line_number(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()
    };

    if installed.is_ok() {
        debug!(json, "Structured tracing initialized");
    }
}

/// Generate a unique trace ID for run correlation
pub fn generate_trace_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span covering one execution of a demo program
pub struct RunSpan {
    span: tracing::Span,
    start: Instant,
    trace_id: String,
}

impl RunSpan {
    pub fn new(program: &'static str) -> Self {
        let trace_id = generate_trace_id();

        let span = span!(
            Level::INFO,
            "run",
            trace_id = %trace_id,
            program = program,
            pid = std::process::id(),
            result = tracing::field::Empty,
            error = tracing::field::Empty,
        );

        Self {
            span,
            start: Instant::now(),
            trace_id,
        }
    }

    /// Get the trace ID for this run
    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    /// Enter the span context
    pub fn enter(&self) -> tracing::span::Entered<'_> {
        self.span.enter()
    }

    /// Record a successful outcome
    pub fn record_success(&self) {
        self.span.record("result", "success");
    }

    /// Record an error
    pub fn record_error(&self, error: &dyn std::error::Error) {
        self.span.record("error", tracing::field::display(error));
        self.span.record("result", "error");
    }
}

impl Drop for RunSpan {
    fn drop(&mut self) {
        let _entered = self.span.enter();
        let elapsed = self.start.elapsed();
        if self.span.is_disabled() {
            return;
        }
        if elapsed.as_secs() > 5 {
            warn!(elapsed_ms = elapsed.as_millis() as u64, "run took longer than expected");
        } else {
            info!(elapsed_ms = elapsed.as_millis() as u64, "run finished");
        }
    }
}
