//! The resolution container: identity-keyed registry with lazy instantiation.
//!
//! A [`Container`] maps capability identities (`TypeId`s) to
//! [`Registration`] entries and serves [`resolve`](Container::resolve)
//! requests by either reusing a cached `Shared` instance or invoking the
//! entry's construction function.
//!
//! # Examples
//!
//! ```
//! use capability_container::{Container, Registration};
//!
//! struct Greeter {
//!     greeting: String,
//! }
//!
//! let container = Container::new();
//! container.register(Registration::shared(|_| Greeter {
//!     greeting: "hello".to_string(),
//! }));
//!
//! let greeter = container.resolve::<Greeter>().unwrap();
//! assert_eq!(greeter.greeting, "hello");
//! ```
//!
//! # Concurrency
//!
//! Map access is serialized through a mutex with poison recovery, so the
//! container is memory-safe to share across threads. The lock is released
//! while a construction function runs so constructors can resolve nested
//! capabilities without deadlocking. The trade-off: the exactly-once
//! construction guarantee for `Shared` entries holds only when first
//! resolutions are not concurrent. Intended usage is write-once, read-many:
//! register and first-resolve at the composition root, resolve freely from
//! any thread afterwards. Concurrent first resolutions still agree on a
//! single shared instance because cache write-back is first-writer-wins.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::{debug, trace, warn};

use crate::container_error::ResolveError;
use crate::container_event::ContainerEvent;
use crate::registration::{Constructor, Lifecycle, Registration};

/// Type alias for the user-supplied trace callback.
///
/// The callback receives a reference to a [`ContainerEvent`] every time the
/// container is interacted with. It must be thread-safe because containers
/// are shared across threads.
pub type TraceCallback = dyn Fn(&ContainerEvent) + Send + Sync + 'static;

/// Identity-keyed registry of [`Registration`] entries.
///
/// One entry per capability; a later registration for the same capability
/// replaces the earlier one. Construct independent containers with
/// [`Container::new`] for test isolation, or use the process-wide
/// [`main`](crate::main) container.
pub struct Container {
    entries: Mutex<HashMap<TypeId, Registration>>,
    trace: Mutex<Option<Arc<TraceCallback>>>,
}

impl Container {
    /// Creates an empty container.
    pub fn new() -> Self {
        Container {
            entries: Mutex::new(HashMap::new()),
            trace: Mutex::new(None),
        }
    }

    /// Inserts or replaces the entry under its capability identity.
    ///
    /// Last write wins: an earlier entry for the same capability is
    /// discarded, along with any cached `Shared` instance. No disposal hook
    /// runs for the discarded instance; cleanup is the registrant's
    /// responsibility. The replacement is surfaced through the trace
    /// callback (`replaced` flag) and a warning log so configuration
    /// mistakes don't pass silently.
    pub fn register(&self, entry: Registration) {
        let type_name = entry.type_name();
        let previous = self
            .entries
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .insert(entry.key(), entry);

        match &previous {
            Some(old) if old.is_instantiated() => {
                warn!(type_name, "replaced registration, discarding cached shared instance");
            }
            Some(_) => {
                warn!(type_name, "replaced existing registration");
            }
            None => {
                debug!(type_name, "registered capability");
            }
        }

        self.emit_event(&ContainerEvent::Register {
            type_name,
            replaced: previous.is_some(),
        });
    }

    /// Registers a capability with the [`Lifecycle::Shared`] policy.
    ///
    /// Convenience wrapper over [`register`](Container::register).
    pub fn register_shared<T, F>(&self, constructor: F)
    where
        T: Send + Sync + 'static,
        F: Fn(&Container) -> T + Send + Sync + 'static,
    {
        self.register(Registration::shared(constructor));
    }

    /// Registers a capability with the [`Lifecycle::PerRequest`] policy.
    ///
    /// Convenience wrapper over [`register`](Container::register).
    pub fn register_per_request<T, F>(&self, constructor: F)
    where
        T: Send + Sync + 'static,
        F: Fn(&Container) -> T + Send + Sync + 'static,
    {
        self.register(Registration::new(constructor));
    }

    /// Resolves the capability `T`.
    ///
    /// Looks up the entry for `T`'s identity and applies its lifecycle
    /// policy: a `Shared` entry with a cached instance short-circuits and
    /// returns it; otherwise the construction function is invoked with this
    /// container as its only collaborator (so it can resolve its own nested
    /// capabilities) and, for `Shared` entries, the result is stored back
    /// into the entry's cache slot.
    ///
    /// A panic inside the construction function propagates to the caller
    /// untouched; the container never retries.
    ///
    /// # Errors
    ///
    /// [`ResolveError::Unregistered`] when no entry exists for `T`.
    pub fn resolve<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, ResolveError> {
        let key = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();

        // Lifecycle check strictly precedes construction. Pull what we need
        // out of the entry so the lock is not held while the constructor runs.
        let constructor: Constructor;
        let lifecycle: Lifecycle;
        {
            let entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
            let Some(entry) = entries.get(&key) else {
                drop(entries);
                self.emit_event(&ContainerEvent::Resolve {
                    type_name,
                    found: false,
                    reused: false,
                });
                return Err(ResolveError::Unregistered { type_name });
            };

            if entry.lifecycle() == Lifecycle::Shared {
                if let Some(cached) = entry.cached().cloned() {
                    drop(entries);
                    trace!(type_name, "resolved cached shared instance");
                    self.emit_event(&ContainerEvent::Resolve {
                        type_name,
                        found: true,
                        reused: true,
                    });
                    return downcast::<T>(cached, type_name);
                }
            }

            constructor = Arc::clone(entry.constructor());
            lifecycle = entry.lifecycle();
        }

        let mut instance = constructor(self);

        if lifecycle == Lifecycle::Shared {
            let mut entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
            if let Some(entry) = entries.get_mut(&key) {
                // Only touch the slot if the entry was not replaced while the
                // constructor ran; a racing re-registration wins.
                if Arc::ptr_eq(entry.constructor(), &constructor) {
                    match entry.cached() {
                        // Another resolution won the race to instantiate;
                        // agree on its instance and drop ours.
                        Some(existing) => instance = Arc::clone(existing),
                        None => entry.cache(Arc::clone(&instance)),
                    }
                }
            }
        }

        trace!(type_name, "resolved freshly constructed instance");
        self.emit_event(&ContainerEvent::Resolve {
            type_name,
            found: true,
            reused: false,
        });
        downcast::<T>(instance, type_name)
    }

    /// Checks whether an entry is registered for the capability `T`.
    pub fn contains<T: Send + Sync + 'static>(&self) -> bool {
        let type_name = std::any::type_name::<T>();
        let found = self
            .entries
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .contains_key(&TypeId::of::<T>());

        self.emit_event(&ContainerEvent::Contains { type_name, found });

        found
    }

    /// Removes every registration entry.
    ///
    /// Subsequent resolutions behave as if nothing was ever registered.
    /// Already-resolved `Arc<T>` instances held by callers remain valid.
    pub fn remove_all(&self) {
        self.entries
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clear();

        debug!("removed all registrations");
        self.emit_event(&ContainerEvent::RemoveAll {});
    }

    /// Sets a trace callback invoked on every container interaction.
    ///
    /// The callback runs outside the container's locks, so it may inspect
    /// or operate on this container. Operations performed inside the
    /// callback emit events of their own, so a callback that reacts to
    /// every event with another container call must take care not to
    /// recurse without bound.
    pub fn set_trace_callback(&self, callback: impl Fn(&ContainerEvent) + Send + Sync + 'static) {
        let mut guard = self.trace.lock().unwrap_or_else(|p| p.into_inner());
        *guard = Some(Arc::new(callback));
    }

    /// Clears the trace callback (disables event emission).
    pub fn clear_trace_callback(&self) {
        let mut guard = self.trace.lock().unwrap_or_else(|p| p.into_inner());
        *guard = None;
    }

    /// Emits an event through the current callback, if one is set.
    ///
    /// The callback is cloned out of the trace slot and invoked with no
    /// lock held, so callbacks may re-enter the container.
    fn emit_event(&self, event: &ContainerEvent) {
        let callback = {
            let guard = self.trace.lock().unwrap_or_else(|p| p.into_inner());
            guard.as_ref().map(Arc::clone)
        };
        if let Some(callback) = callback {
            callback(event);
        }
    }
}

impl Default for Container {
    fn default() -> Self {
        Container::new()
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let len = self
            .entries
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .len();
        f.debug_struct("Container").field("entries", &len).finish()
    }
}

fn downcast<T: Send + Sync + 'static>(
    instance: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
) -> Result<Arc<T>, ResolveError> {
    instance
        .downcast::<T>()
        .map_err(|_| ResolveError::TypeMismatch { type_name })
}
