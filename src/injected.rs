//! Deferred-access wrapper over the process-wide [`main`](crate::main)
//! container.

use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::container_error::ResolveError;

/// A value holder that resolves its capability on first access.
///
/// The first call to [`get`](Injected::get) resolves `T` from the
/// [`main`](crate::main) container and caches the resolved `Arc` locally for
/// the rest of the wrapper's lifetime, independent of the registration's
/// lifecycle policy: a `PerRequest` capability is still constructed only once
/// per wrapper. A failed resolution does not poison the wrapper; a later
/// call retries.
///
/// # Examples
///
/// ```
/// use capability_container::{main, Injected};
///
/// struct Logger {
///     level: String,
/// }
///
/// main::register_shared(|_| Logger {
///     level: "info".to_string(),
/// });
///
/// let logger: Injected<Logger> = Injected::new();
/// assert_eq!(logger.get().unwrap().level, "info");
/// # main::remove_all();
/// ```
pub struct Injected<T> {
    slot: OnceCell<Arc<T>>,
}

impl<T: Send + Sync + 'static> Injected<T> {
    /// Creates an empty wrapper; nothing is resolved until the first
    /// [`get`](Injected::get).
    pub const fn new() -> Self {
        Injected {
            slot: OnceCell::new(),
        }
    }

    /// Returns the wrapped value, resolving it from the `main` container on
    /// first access.
    ///
    /// # Errors
    ///
    /// [`ResolveError::Unregistered`] when the capability was never
    /// registered, exactly as [`Container::resolve`](crate::Container::resolve)
    /// fails.
    pub fn get(&self) -> Result<Arc<T>, ResolveError> {
        self.slot
            .get_or_try_init(crate::main::resolve::<T>)
            .cloned()
    }

    /// Whether the wrapper has already resolved and cached its value.
    pub fn is_resolved(&self) -> bool {
        self.slot.get().is_some()
    }
}

impl<T: Send + Sync + 'static> Default for Injected<T> {
    fn default() -> Self {
        Injected::new()
    }
}

impl<T: Send + Sync + 'static> std::fmt::Debug for Injected<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Injected")
            .field("capability", &std::any::type_name::<T>())
            .field("resolved", &self.is_resolved())
            .finish()
    }
}
