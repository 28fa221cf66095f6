use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Execution context handed to every step and observer.
///
/// The context is an opaque bag holding at most one value per Rust type.
/// Values are stored behind `Arc`, so cloning a context is cheap and clones
/// share the stored values.
#[derive(Clone, Default)]
pub struct Context {
    values: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

/// Private key type for the trace identifier. Nothing outside this module can
/// name it, so no other value can collide with it.
#[derive(Debug, Clone)]
struct TraceId(String);

impl Context {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a context that also holds `value`, replacing any earlier value
    /// of the same type.
    #[must_use]
    pub fn with<T>(mut self, value: T) -> Self
    where
        T: Any + Send + Sync,
    {
        self.values.insert(TypeId::of::<T>(), Arc::new(value));
        self
    }

    /// Look up the value stored for type `T`.
    #[must_use]
    pub fn get<T>(&self) -> Option<&T>
    where
        T: Any + Send + Sync,
    {
        self.values
            .get(&TypeId::of::<T>())
            .and_then(|value| value.downcast_ref::<T>())
    }

    /// Return a context carrying the given trace identifier.
    #[must_use]
    pub fn with_trace_id(self, id: impl Into<String>) -> Self {
        self.with(TraceId(id.into()))
    }

    /// The trace identifier, if one was attached with [`Context::with_trace_id`].
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.get::<TraceId>().map(|id| id.0.as_str())
    }
}

/// Free-function form of [`Context::trace_id`].
#[must_use]
pub fn trace_id(ctx: &Context) -> Option<&str> {
    ctx.trace_id()
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("values", &self.values.len())
            .field("trace_id", &self.trace_id())
            .finish()
    }
}
