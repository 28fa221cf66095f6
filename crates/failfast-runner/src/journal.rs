use std::fmt::Display;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use crate::context::Context;
use crate::observer::Observer;

/// Outcome of an executed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StepStatus {
    /// The step completed without error.
    Succeeded,
    /// The step returned an error.
    Failed,
}

/// Record of one executed step.
#[derive(Debug, Clone)]
pub struct StepRecord {
    /// Label the step ran under.
    pub label: String,
    /// Whether the step succeeded.
    pub status: StepStatus,
    /// Display text of the step's error, for failed steps.
    pub error: Option<String>,
    /// When the observer was notified.
    pub recorded_at: Instant,
}

/// Observer that keeps a journal of every executed step.
///
/// Skipped steps never reach observers, so they never appear here. Register
/// it by reference with [`run_step`](crate::run_step), or wrap it in an `Arc`
/// to share it with a [`BoundRunner`](crate::BoundRunner) and still read it
/// afterwards.
#[derive(Debug, Default)]
pub struct StepJournal {
    records: Mutex<Vec<StepRecord>>,
}

impl StepJournal {
    /// Create an empty journal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<StepRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of all records, in notification order.
    #[must_use]
    pub fn records(&self) -> Vec<StepRecord> {
        self.lock().clone()
    }

    /// Number of recorded steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// One line per recorded step, for display.
    #[must_use]
    pub fn summary(&self) -> String {
        let records = self.lock();
        let mut lines = Vec::with_capacity(records.len());
        for record in records.iter() {
            let line = match (&record.status, &record.error) {
                (StepStatus::Failed, Some(error)) => format!("✗ {}: {error}", record.label),
                (StepStatus::Failed, None) => format!("✗ {}", record.label),
                (StepStatus::Succeeded, _) => format!("✓ {}", record.label),
            };
            lines.push(line);
        }
        lines.join("\n")
    }
}

impl<E> Observer<E> for StepJournal
where
    E: Display,
{
    fn observe(&self, _ctx: &Context, error: Option<&E>, label: &str) {
        let status = if error.is_some() {
            StepStatus::Failed
        } else {
            StepStatus::Succeeded
        };
        self.lock().push(StepRecord {
            label: label.to_string(),
            status,
            error: error.map(ToString::to_string),
            recorded_at: Instant::now(),
        });
    }
}
