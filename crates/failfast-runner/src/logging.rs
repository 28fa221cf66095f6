use std::fmt::Display;

use tracing::{info, warn};

use crate::context::Context;
use crate::observer::Observer;

/// Trace identifier reported when the context carries none.
pub const UNKNOWN_TRACE_ID: &str = "unknown";

/// Observer that logs one line per executed step.
///
/// Lines have the form `✓[trace] label` on success and
/// `✗[trace] label: error` on failure. They are emitted through `tracing`
/// under the `failfast::step` target: successes at `INFO`, failures at
/// `WARN`, with `trace_id` and `label` attached as fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingObserver;

impl LoggingObserver {
    /// Create a new logging observer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Format the line logged for a step outcome.
    #[must_use]
    pub fn render<E>(ctx: &Context, error: Option<&E>, label: &str) -> String
    where
        E: Display + ?Sized,
    {
        render_with(ctx.trace_id().unwrap_or(UNKNOWN_TRACE_ID), error, label)
    }
}

fn render_with<E>(trace_id: &str, error: Option<&E>, label: &str) -> String
where
    E: Display + ?Sized,
{
    match error {
        None => format!("✓[{trace_id}] {label}"),
        Some(error) => format!("✗[{trace_id}] {label}: {error}"),
    }
}

impl<E> Observer<E> for LoggingObserver
where
    E: Display,
{
    fn observe(&self, ctx: &Context, error: Option<&E>, label: &str) {
        let trace_id = ctx.trace_id().unwrap_or(UNKNOWN_TRACE_ID);
        let line = render_with(trace_id, error, label);
        if error.is_some() {
            warn!(target: "failfast::step", trace_id, label, "{line}");
        } else {
            info!(target: "failfast::step", trace_id, label, "{line}");
        }
    }
}
