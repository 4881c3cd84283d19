//! Macro for defining named process-wide containers.

/// Defines a module holding a static [`Container`](crate::Container) with
/// ergonomic free functions.
///
/// The crate defines its default container with `define_container!(main)`;
/// use this macro to carve out further isolated containers, e.g. one per
/// subsystem. Each generated container is completely independent.
///
/// # Examples
///
/// ```rust
/// use capability_container::define_container;
/// use std::sync::Arc;
///
/// define_container!(storage);
/// define_container!(network);
///
/// storage::register_shared(|_| "postgres://localhost".to_string());
/// network::register_shared(|_| 8080u16);
///
/// // No interference between containers
/// let url: Arc<String> = storage::resolve().unwrap();
/// assert_eq!(&**url, "postgres://localhost");
/// assert!(!network::contains::<String>());
/// ```
#[macro_export]
macro_rules! define_container {
    ($name:ident) => {
        pub mod $name {
            use ::std::sync::{Arc, LazyLock};

            static CONTAINER: LazyLock<$crate::Container> = LazyLock::new($crate::Container::new);

            /// Direct access to the underlying container, e.g. for
            /// installing entries collected by a `ContainerBuilder`.
            pub fn container() -> &'static $crate::Container {
                &CONTAINER
            }

            /// Insert or replace a registration entry.
            pub fn register(entry: $crate::Registration) {
                CONTAINER.register(entry);
            }

            /// Register a capability with the `Shared` lifecycle.
            pub fn register_shared<T, F>(constructor: F)
            where
                T: Send + Sync + 'static,
                F: Fn(&$crate::Container) -> T + Send + Sync + 'static,
            {
                CONTAINER.register_shared(constructor);
            }

            /// Register a capability with the `PerRequest` lifecycle.
            pub fn register_per_request<T, F>(constructor: F)
            where
                T: Send + Sync + 'static,
                F: Fn(&$crate::Container) -> T + Send + Sync + 'static,
            {
                CONTAINER.register_per_request(constructor);
            }

            /// Resolve a capability from the container.
            pub fn resolve<T: Send + Sync + 'static>() -> Result<Arc<T>, $crate::ResolveError> {
                CONTAINER.resolve::<T>()
            }

            /// Check whether a capability is registered.
            pub fn contains<T: Send + Sync + 'static>() -> bool {
                CONTAINER.contains::<T>()
            }

            /// Remove every registration entry.
            pub fn remove_all() {
                CONTAINER.remove_all();
            }

            /// Set a trace callback for container operations.
            pub fn set_trace_callback(
                callback: impl Fn(&$crate::ContainerEvent) + Send + Sync + 'static,
            ) {
                CONTAINER.set_trace_callback(callback);
            }

            /// Clear the trace callback.
            pub fn clear_trace_callback() {
                CONTAINER.clear_trace_callback();
            }
        }
    };
}
