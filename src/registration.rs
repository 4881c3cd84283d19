//! Registration entries: the binding between a capability and its constructor.
//!
//! A [`Registration`] pairs one capability identity (the `TypeId` of the
//! requested type) with one construction function and one [`Lifecycle`]. The
//! entry also carries the mutable cache slot that `Shared` resolution fills on
//! first use. Entries are built here and handed to
//! [`Container::register`](crate::Container::register); after that the
//! container owns them exclusively.

use std::any::{Any, TypeId};
use std::sync::Arc;

use crate::Container;

/// Type-erased construction function stored inside a [`Registration`].
///
/// The container passes itself as the single argument so constructors can
/// resolve their own nested capabilities.
pub(crate) type Constructor = Arc<dyn Fn(&Container) -> Arc<dyn Any + Send + Sync> + Send + Sync>;

/// Decides whether a resolved instance is cached and reused.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Lifecycle {
    /// Construct at most once; every resolution returns the same instance.
    Shared,
    /// Construct a fresh instance on every resolution.
    #[default]
    PerRequest,
}

/// An immutable capability binding plus the mutable cache slot.
///
/// The identity is derived from the constructor's return type, so two
/// registrations for the same capability always collide on the same key and
/// registrations for distinct capabilities never do.
///
/// # Examples
///
/// ```
/// use capability_container::{Container, Lifecycle, Registration};
///
/// struct Clock;
///
/// let container = Container::new();
/// container.register(Registration::new(|_| Clock).with_lifecycle(Lifecycle::Shared));
/// assert!(container.contains::<Clock>());
/// ```
pub struct Registration {
    key: TypeId,
    type_name: &'static str,
    lifecycle: Lifecycle,
    constructor: Constructor,
    cached: Option<Arc<dyn Any + Send + Sync>>,
}

impl Registration {
    /// Creates an entry with the default [`Lifecycle::PerRequest`] policy.
    ///
    /// The constructor receives the resolving container and may call
    /// [`Container::resolve`] on it for its own dependencies.
    pub fn new<T, F>(constructor: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&Container) -> T + Send + Sync + 'static,
    {
        let constructor: Constructor =
            Arc::new(move |container: &Container| -> Arc<dyn Any + Send + Sync> {
                Arc::new(constructor(container))
            });
        Registration {
            key: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            lifecycle: Lifecycle::default(),
            constructor,
            cached: None,
        }
    }

    /// Creates an entry with the [`Lifecycle::Shared`] policy.
    pub fn shared<T, F>(constructor: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&Container) -> T + Send + Sync + 'static,
    {
        Registration::new(constructor).with_lifecycle(Lifecycle::Shared)
    }

    /// Overrides the lifecycle policy.
    pub fn with_lifecycle(mut self, lifecycle: Lifecycle) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    /// The lifecycle policy this entry was registered with.
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Human-readable name of the capability, for errors, events and logs.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub(crate) fn key(&self) -> TypeId {
        self.key
    }

    pub(crate) fn constructor(&self) -> &Constructor {
        &self.constructor
    }

    pub(crate) fn cached(&self) -> Option<&Arc<dyn Any + Send + Sync>> {
        self.cached.as_ref()
    }

    pub(crate) fn cache(&mut self, instance: Arc<dyn Any + Send + Sync>) {
        self.cached = Some(instance);
    }

    /// Whether a `Shared` instance has been constructed and cached.
    pub fn is_instantiated(&self) -> bool {
        self.cached.is_some()
    }
}
