/// Shared error cell for one workflow.
///
/// A slot starts empty and holds at most one error: the first one any step
/// produced. Nothing in this crate overwrites, clears, or wraps a stored
/// error. To start a new workflow, create a new slot.
#[derive(Debug)]
pub struct ErrorSlot<E> {
    error: Option<E>,
}

impl<E> ErrorSlot<E> {
    /// Create an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self { error: None }
    }

    /// Create a slot that already holds `error`. Every step run against it
    /// is skipped.
    #[must_use]
    pub fn with_error(error: E) -> Self {
        Self { error: Some(error) }
    }

    /// Whether a step has already failed.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }

    /// The first error recorded, if any.
    #[must_use]
    pub fn error(&self) -> Option<&E> {
        self.error.as_ref()
    }

    /// Consume the slot, returning the recorded error.
    #[must_use]
    pub fn into_inner(self) -> Option<E> {
        self.error
    }

    /// Consume the slot, turning it into the workflow's outcome.
    ///
    /// # Errors
    ///
    /// Returns the first error any step recorded.
    pub fn into_result(self) -> Result<(), E> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Store `error` if the slot is still empty. A slot that already holds an
    /// error keeps it.
    pub(crate) fn record(&mut self, error: E) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }
}

impl<E> Default for ErrorSlot<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> From<ErrorSlot<E>> for Option<E> {
    fn from(slot: ErrorSlot<E>) -> Self {
        slot.into_inner()
    }
}
