/*!
 * Structured Tracing
 * Subscriber setup and per-command spans using the tracing crate
 */

use crate::core::limits::TRACE_JSON_ENV;
use std::time::Instant;
use tracing::{debug, span, warn, Level, Span};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Initialize structured tracing on stderr
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - PRM_TRACE_JSON: Enable JSON output (default: false)
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var(TRACE_JSON_ENV)
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_current_span(true)
                    .with_span_list(true),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()
    };

    if result.is_ok() {
        debug!(json = use_json, "structured tracing initialized");
    }
}

/// Span covering one script command
pub struct CommandSpan {
    span: Span,
    start: Instant,
    line: usize,
}

impl CommandSpan {
    pub fn new(line: usize, command: &str) -> Self {
        let span = span!(
            Level::DEBUG,
            "command",
            line = line,
            command = command,
            result = tracing::field::Empty,
            running = tracing::field::Empty,
            error = tracing::field::Empty,
            duration_us = tracing::field::Empty,
        );

        Self {
            span,
            start: Instant::now(),
            line,
        }
    }

    /// Enter the span context
    pub fn enter(&self) -> tracing::span::Entered<'_> {
        self.span.enter()
    }

    pub fn record_running(&self, running: &str) {
        self.span.record("result", "ok");
        self.span.record("running", running);
    }

    pub fn record_error(&self, error: &str) {
        self.span.record("result", "error");
        self.span.record("error", error);
    }
}

impl Drop for CommandSpan {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        self.span.record("duration_us", duration.as_micros() as u64);

        let _entered = self.span.enter();
        if duration.as_millis() > 10 {
            warn!(
                line = self.line,
                duration_ms = duration.as_millis() as u64,
                slow = true,
                "slow command"
            );
        }
    }
}
