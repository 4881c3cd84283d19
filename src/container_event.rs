/// Events emitted by a container during operations.
///
/// These events are passed to the trace callback set via
/// [`Container::set_trace_callback`](crate::Container::set_trace_callback).
/// The `Clone` derive allows callbacks to store or forward events if needed.
///
/// # Examples
///
/// ```rust
/// use capability_container::ContainerEvent;
///
/// let event = ContainerEvent::Register { type_name: "i32", replaced: false };
/// println!("{:?}", event);
/// ```
#[derive(Debug, Clone)]
pub enum ContainerEvent {
    /// A registration entry was inserted.
    Register {
        /// The capability name of the registered entry.
        type_name: &'static str,
        /// Whether an earlier entry for the same capability was discarded.
        replaced: bool,
    },

    /// A capability was resolved.
    Resolve {
        /// The capability name that was requested.
        type_name: &'static str,
        /// Whether a registration entry existed for the capability.
        found: bool,
        /// Whether a cached `Shared` instance was returned instead of
        /// invoking the construction function.
        reused: bool,
    },

    /// A registration probe was performed.
    Contains {
        /// The capability name that was checked.
        type_name: &'static str,
        /// Whether the capability is registered.
        found: bool,
    },

    /// Every registration entry was removed.
    RemoveAll {},
}

impl std::fmt::Display for ContainerEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContainerEvent::Register {
                type_name,
                replaced,
            } => {
                write!(f, "register {{ type_name: {type_name}, replaced: {replaced} }}")
            }
            ContainerEvent::Resolve {
                type_name,
                found,
                reused,
            } => {
                write!(
                    f,
                    "resolve {{ type_name: {type_name}, found: {found}, reused: {reused} }}"
                )
            }
            ContainerEvent::Contains { type_name, found } => {
                write!(f, "contains {{ type_name: {type_name}, found: {found} }}")
            }
            ContainerEvent::RemoveAll {} => write!(f, "removing all registrations"),
        }
    }
}
