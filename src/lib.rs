//! # Capability Container
//!
//! A minimal dependency-resolution container: a registry mapping a requested
//! capability (a type identity) to a concrete implementation, deciding at
//! resolution time whether to reuse a cached instance or construct a fresh
//! one. Code depends on abstract capabilities without statically wiring
//! concrete implementations, which enables test substitution and deferred
//! construction.
//!
//! ## Quick Start
//!
//! ```rust
//! use capability_container::{main, Injected};
//!
//! struct Settings {
//!     verbose: bool,
//! }
//!
//! // Register a capability with a construction function
//! main::register_shared(|_| Settings { verbose: true });
//!
//! // Resolve it anywhere
//! let settings = main::resolve::<Settings>().unwrap();
//! assert!(settings.verbose);
//!
//! // Or defer resolution until first access
//! let lazy: Injected<Settings> = Injected::new();
//! assert!(lazy.get().unwrap().verbose);
//! # main::remove_all();
//! ```
//!
//! ## Lifecycles
//!
//! Every registration carries a [`Lifecycle`]: `Shared` constructs at most
//! once and returns the same instance on every resolution, `PerRequest`
//! (the default) constructs a fresh instance every time. Construction
//! functions receive the container and can resolve their own dependencies
//! from it.
//!
//! ## Containers
//!
//! - [`main`] — the process-wide default container, empty at startup, reset
//!   via `main::remove_all()` (tests re-register after that).
//! - [`Container::new`] — independent containers for test isolation.
//! - [`define_container!`] — further named process-wide containers.
//!
//! ## Main types
//!
//! - [`Container`] — register/resolve/contains/remove_all
//! - [`Registration`] — a capability binding with its [`Lifecycle`]
//! - [`ContainerBuilder`] — ordered bulk registration
//! - [`Injected`] — resolve-on-first-access wrapper over [`main`]
//! - [`ContainerEvent`] — trace-callback events for observability

mod builder;
mod container;
mod container_error;
mod container_event;
mod injected;
mod macros;
mod registration;

pub use builder::ContainerBuilder;
pub use container::{Container, TraceCallback};
pub use container_error::ResolveError;
pub use container_event::ContainerEvent;
pub use injected::Injected;
pub use registration::{Lifecycle, Registration};

crate::define_container!(main);
