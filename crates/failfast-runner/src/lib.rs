//! Fail-fast sequential step runner.
//!
//! Steps share a single [`ErrorSlot`]. Once a step fails, every later step
//! that uses the same slot is skipped and the first error is kept exactly as
//! the step returned it. Each step carries a label that is handed to
//! [`Observer`]s after the step runs; the label never ends up in the error.
//!
//! ```
//! use failfast_runner::{BoundRunner, Context, ErrorSlot, LoggingObserver};
//!
//! let ctx = Context::new().with_trace_id("req-123");
//! let run: BoundRunner<&str> =
//!     BoundRunner::new(ctx, Vec::new()).with_observer(LoggingObserver::new());
//!
//! let mut slot = ErrorSlot::new();
//! run.run(&mut slot, "validate input", |_| Ok(()));
//! run.run(&mut slot, "fetch data", |_| Err("fetch failed"));
//! run.run(&mut slot, "save result", |_| unreachable!("skipped after failure"));
//!
//! assert_eq!(slot.into_result(), Err("fetch failed"));
//! ```

mod context;
mod journal;
mod logging;
mod metrics;
mod observer;
mod runner;
mod slot;
mod step;
#[cfg(test)]
mod test_support;

pub use context::{Context, trace_id};
pub use journal::{StepJournal, StepRecord, StepStatus};
pub use logging::{LoggingObserver, UNKNOWN_TRACE_ID};
pub use metrics::{LabelCounts, StepMetrics};
pub use observer::Observer;
pub use runner::{BoundRunner, bind_runner};
pub use slot::ErrorSlot;
pub use step::run_step;
