use std::sync::Arc;

use crate::context::Context;

/// Side-channel notified after every step that actually runs.
///
/// Observers see the execution context, the step's error (`None` on success),
/// and the step's label. They get a shared borrow of the error, so they
/// cannot change what the [`ErrorSlot`](crate::ErrorSlot) ends up holding or
/// what later observers see.
///
/// Any `Fn(&Context, Option<&E>, &str)` closure is an observer:
///
/// ```
/// use failfast_runner::{Context, ErrorSlot, run_step};
///
/// let print = |_: &Context, error: Option<&String>, label: &str| match error {
///     None => println!("ok {label}"),
///     Some(error) => println!("failed {label}: {error}"),
/// };
///
/// let mut slot: ErrorSlot<String> = ErrorSlot::new();
/// run_step(&Context::new(), &mut slot, "load", |_| Ok(()), &[&print]);
/// assert!(!slot.is_failed());
/// ```
pub trait Observer<E> {
    /// Called once for a step that ran, after the step completed.
    fn observe(&self, ctx: &Context, error: Option<&E>, label: &str);
}

impl<E, F> Observer<E> for F
where
    F: Fn(&Context, Option<&E>, &str),
{
    fn observe(&self, ctx: &Context, error: Option<&E>, label: &str) {
        self(ctx, error, label);
    }
}

impl<E, T> Observer<E> for Arc<T>
where
    T: Observer<E> + ?Sized,
{
    fn observe(&self, ctx: &Context, error: Option<&E>, label: &str) {
        (**self).observe(ctx, error, label);
    }
}
