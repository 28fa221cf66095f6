use tracing::debug;

use crate::context::Context;
use crate::observer::Observer;
use crate::slot::ErrorSlot;

/// Run one step against a shared error slot.
///
/// If `slot` already holds an error the step is skipped: `operation` is not
/// called and no observer is notified. Otherwise `operation` runs with `ctx`,
/// every observer is notified in slice order, and a returned error is stored
/// in `slot` exactly as `operation` produced it.
///
/// `label` is only passed to observers. It never becomes part of the error.
///
/// ```
/// use failfast_runner::{Context, ErrorSlot, run_step};
///
/// let ctx = Context::new();
/// let mut slot = ErrorSlot::new();
/// let mut saved = false;
///
/// run_step(&ctx, &mut slot, "parse", |_| "x1".parse::<u32>().map(drop), &[]);
/// run_step(&ctx, &mut slot, "save", |_| {
///     saved = true;
///     Ok(())
/// }, &[]);
///
/// assert!(slot.is_failed());
/// assert!(!saved);
/// ```
pub fn run_step<E, F>(
    ctx: &Context,
    slot: &mut ErrorSlot<E>,
    label: &str,
    operation: F,
    observers: &[&dyn Observer<E>],
) where
    F: FnOnce(&Context) -> Result<(), E>,
{
    execute(ctx, slot, label, operation, observers.iter().copied());
}

pub(crate) fn execute<'o, E, F, O, I>(
    ctx: &Context,
    slot: &mut ErrorSlot<E>,
    label: &str,
    operation: F,
    observers: I,
) where
    F: FnOnce(&Context) -> Result<(), E>,
    O: Observer<E> + ?Sized + 'o,
    I: IntoIterator<Item = &'o O>,
{
    if slot.is_failed() {
        debug!(label, "skipping step after earlier failure");
        return;
    }

    let result = operation(ctx);
    let error = result.err();

    for observer in observers {
        observer.observe(ctx, error.as_ref(), label);
    }

    if let Some(error) = error {
        slot.record(error);
    }
}
