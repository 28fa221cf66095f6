use std::fmt;

use crate::context::Context;
use crate::observer::Observer;
use crate::slot::ErrorSlot;
use crate::step;

/// A step runner with its context and observers fixed up front.
///
/// Binding once per workflow removes the need to repeat the context and
/// observer list at every call site. The runner holds no other state: whether
/// an earlier step failed lives entirely in the [`ErrorSlot`] passed to
/// [`BoundRunner::run`], so one runner can drive any number of independent
/// workflows.
pub struct BoundRunner<E> {
    ctx: Context,
    observers: Vec<Box<dyn Observer<E>>>,
}

impl<E> BoundRunner<E> {
    /// Bind `ctx` and `observers`. Observers are notified in vector order.
    #[must_use]
    pub fn new(ctx: Context, observers: Vec<Box<dyn Observer<E>>>) -> Self {
        Self { ctx, observers }
    }

    /// Append an observer, notified after all previously added ones.
    #[must_use]
    pub fn with_observer<O>(mut self, observer: O) -> Self
    where
        O: Observer<E> + 'static,
    {
        self.observers.push(Box::new(observer));
        self
    }

    /// Run one step with the bound context and observers.
    ///
    /// Same contract as [`run_step`](crate::run_step).
    pub fn run<F>(&self, slot: &mut ErrorSlot<E>, label: &str, operation: F)
    where
        F: FnOnce(&Context) -> Result<(), E>,
    {
        step::execute(
            &self.ctx,
            slot,
            label,
            operation,
            self.observers.iter().map(|observer| &**observer),
        );
    }

    /// The bound context.
    #[must_use]
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Number of bound observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

impl<E> fmt::Debug for BoundRunner<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundRunner")
            .field("ctx", &self.ctx)
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// Free-function form of [`BoundRunner::new`].
#[must_use]
pub fn bind_runner<E>(ctx: Context, observers: Vec<Box<dyn Observer<E>>>) -> BoundRunner<E> {
    BoundRunner::new(ctx, observers)
}
