//! Integration tests for the process-wide `main` container.
//!
//! NOTE: All tests use #[serial] because they share the same `main`
//! container. Running them in parallel would cause interference.

use capability_container::{main, ContainerBuilder, Registration, ResolveError};
use serial_test::serial;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq)]
struct AppConfig {
    database_url: String,
    max_connections: u32,
}

#[test]
#[serial]
fn test_main_register_and_resolve() {
    main::remove_all();

    main::register_shared(|_| AppConfig {
        database_url: "postgresql://localhost/mydb".to_string(),
        max_connections: 100,
    });

    let config: Arc<AppConfig> = main::resolve().unwrap();
    assert_eq!(config.database_url, "postgresql://localhost/mydb");
    assert_eq!(config.max_connections, 100);

    main::remove_all();
}

#[test]
#[serial]
fn test_main_starts_empty_after_remove_all() {
    main::remove_all();

    assert!(!main::contains::<AppConfig>());
    let result: Result<Arc<AppConfig>, _> = main::resolve();
    assert_eq!(
        result.unwrap_err(),
        ResolveError::Unregistered {
            type_name: std::any::type_name::<AppConfig>()
        }
    );
}

#[test]
#[serial]
fn test_main_test_substitution() {
    main::remove_all();

    // Production wiring
    main::register_shared(|_| AppConfig {
        database_url: "postgresql://prod".to_string(),
        max_connections: 100,
    });

    // A test replaces the whole wiring
    main::remove_all();
    main::register_shared(|_| AppConfig {
        database_url: "sqlite://memory".to_string(),
        max_connections: 1,
    });

    let config: Arc<AppConfig> = main::resolve().unwrap();
    assert_eq!(config.database_url, "sqlite://memory");

    main::remove_all();
}

#[test]
#[serial]
fn test_main_accepts_prebuilt_entries() {
    main::remove_all();

    main::register(Registration::shared(|_| AppConfig {
        database_url: "postgresql://localhost".to_string(),
        max_connections: 8,
    }));

    assert!(main::contains::<AppConfig>());
    main::remove_all();
}

#[test]
#[serial]
fn test_builder_installs_into_main() {
    main::remove_all();

    ContainerBuilder::new()
        .register_shared(|_| AppConfig {
            database_url: "one".to_string(),
            max_connections: 1,
        })
        .register_shared(|_| AppConfig {
            database_url: "two".to_string(),
            max_connections: 2,
        })
        .install(main::container());

    // Later entry for the duplicate capability wins
    let config: Arc<AppConfig> = main::resolve().unwrap();
    assert_eq!(config.database_url, "two");

    main::remove_all();
}

#[test]
#[serial]
fn test_main_nested_resolution() {
    struct Service {
        config: Arc<AppConfig>,
    }

    main::remove_all();

    main::register_shared(|_| AppConfig {
        database_url: "postgresql://localhost".to_string(),
        max_connections: 4,
    });
    main::register_per_request(|c| Service {
        config: c.resolve::<AppConfig>().unwrap(),
    });

    let service: Arc<Service> = main::resolve().unwrap();
    let config: Arc<AppConfig> = main::resolve().unwrap();
    assert!(Arc::ptr_eq(&service.config, &config));

    main::remove_all();
}
