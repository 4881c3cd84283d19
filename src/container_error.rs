use thiserror::Error;

/// Errors returned by [`Container::resolve`](crate::Container::resolve).
///
/// Resolution failures are recoverable results, never process aborts, so
/// callers (tests in particular) can probe registration state safely.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// No entry is registered for the requested capability.
    #[error("no registration for capability: {type_name}")]
    Unregistered {
        /// Name of the capability that was requested.
        type_name: &'static str,
    },

    /// The stored instance did not downcast to the requested capability.
    ///
    /// Unreachable through the typed registration API; kept so the
    /// type-erased storage never has to panic.
    #[error("registered instance does not match requested capability: {type_name}")]
    TypeMismatch {
        /// Name of the capability that was requested.
        type_name: &'static str,
    },
}
