use std::sync::{Mutex, MutexGuard, PoisonError};

use indexmap::IndexMap;

use crate::context::Context;
use crate::observer::Observer;

/// Success and failure counts for one label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LabelCounts {
    pub succeeded: u64,
    pub failed: u64,
}

impl LabelCounts {
    /// Total number of executions.
    #[must_use]
    pub fn executed(&self) -> u64 {
        self.succeeded + self.failed
    }
}

/// Observer counting executed steps per label.
///
/// Labels are kept in the order they were first seen.
#[derive(Debug, Default)]
pub struct StepMetrics {
    counts: Mutex<IndexMap<String, LabelCounts>>,
}

impl StepMetrics {
    /// Create a metrics observer with no counts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, IndexMap<String, LabelCounts>> {
        self.counts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Counts for `label`, or `None` if no step with that label has run.
    #[must_use]
    pub fn counts(&self, label: &str) -> Option<LabelCounts> {
        self.lock().get(label).copied()
    }

    /// Counts summed over every label.
    #[must_use]
    pub fn totals(&self) -> LabelCounts {
        self.lock()
            .values()
            .fold(LabelCounts::default(), |acc, counts| LabelCounts {
                succeeded: acc.succeeded + counts.succeeded,
                failed: acc.failed + counts.failed,
            })
    }

    /// Labels seen so far, in first-seen order.
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }
}

impl<E> Observer<E> for StepMetrics {
    fn observe(&self, _ctx: &Context, error: Option<&E>, label: &str) {
        let mut counts = self.lock();
        let entry = counts.entry(label.to_string()).or_default();
        if error.is_some() {
            entry.failed += 1;
        } else {
            entry.succeeded += 1;
        }
    }
}
