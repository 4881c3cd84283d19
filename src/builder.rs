//! Ordered bulk registration.

use crate::container::Container;
use crate::registration::Registration;

/// Collects registration entries and applies them to a container in order.
///
/// Entries are applied strictly in the order they were added, so a later
/// entry for a duplicate capability wins, exactly as sequential
/// [`Container::register`] calls would behave.
///
/// # Examples
///
/// ```
/// use capability_container::ContainerBuilder;
///
/// struct Cache {
///     size: usize,
/// }
///
/// let container = ContainerBuilder::new()
///     .register_shared(|_| Cache { size: 16 })
///     .register_shared(|_| Cache { size: 64 }) // later entry wins
///     .build();
///
/// assert_eq!(container.resolve::<Cache>().unwrap().size, 64);
/// ```
#[derive(Default)]
pub struct ContainerBuilder {
    registrations: Vec<Registration>,
}

impl ContainerBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        ContainerBuilder {
            registrations: Vec::new(),
        }
    }

    /// Appends a pre-built registration entry.
    pub fn register(mut self, entry: Registration) -> Self {
        self.registrations.push(entry);
        self
    }

    /// Appends a `Shared` registration for the constructor's return type.
    pub fn register_shared<T, F>(self, constructor: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&Container) -> T + Send + Sync + 'static,
    {
        self.register(Registration::shared(constructor))
    }

    /// Appends a `PerRequest` registration for the constructor's return type.
    pub fn register_per_request<T, F>(self, constructor: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&Container) -> T + Send + Sync + 'static,
    {
        self.register(Registration::new(constructor))
    }

    /// Applies all collected entries, in order, to an existing container.
    pub fn install(self, container: &Container) {
        for entry in self.registrations {
            container.register(entry);
        }
    }

    /// Builds a fresh container populated with the collected entries.
    pub fn build(self) -> Container {
        let container = Container::new();
        self.install(&container);
        container
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Lifecycle;

    struct Port(u16);

    #[test]
    fn test_build_applies_entries_in_order() {
        let container = ContainerBuilder::new()
            .register(Registration::new(|_| Port(1)).with_lifecycle(Lifecycle::Shared))
            .register(Registration::shared(|_| Port(2)))
            .build();

        assert_eq!(container.resolve::<Port>().unwrap().0, 2);
    }

    #[test]
    fn test_install_into_existing_container() {
        let container = Container::new();
        container.register_shared(|_| Port(1));

        ContainerBuilder::new()
            .register_shared(|_| Port(9))
            .install(&container);

        assert_eq!(container.resolve::<Port>().unwrap().0, 9);
    }

    #[test]
    fn test_empty_builder_builds_empty_container() {
        let container = ContainerBuilder::new().build();
        assert!(!container.contains::<Port>());
    }
}
