//! Integration tests for construction functions that resolve their own
//! dependencies from the container passed to them.

use capability_container::{Container, ContainerBuilder};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

struct Config {
    url: String,
}

struct Pool {
    config: Arc<Config>,
}

struct Repository {
    pool: Arc<Pool>,
}

#[test]
fn test_constructor_resolves_registered_dependency() {
    let container = Container::new();
    container.register_shared(|_| Config {
        url: "postgres://localhost".to_string(),
    });
    container.register_shared(|c| Pool {
        config: c.resolve::<Config>().unwrap(),
    });

    let pool = container.resolve::<Pool>().unwrap();
    assert_eq!(pool.config.url, "postgres://localhost");
}

#[test]
fn test_nested_dependency_respects_shared_lifecycle() {
    let container = Container::new();
    container.register_shared(|_| Config {
        url: "postgres://localhost".to_string(),
    });
    container.register_per_request(|c| Pool {
        config: c.resolve::<Config>().unwrap(),
    });

    let pool_a = container.resolve::<Pool>().unwrap();
    let pool_b = container.resolve::<Pool>().unwrap();

    // Fresh pools, but both hold the one shared config
    assert!(!Arc::ptr_eq(&pool_a, &pool_b));
    assert!(Arc::ptr_eq(&pool_a.config, &pool_b.config));
}

#[test]
fn test_nested_dependency_respects_per_request_lifecycle() {
    let calls = Arc::new(AtomicU32::new(0));
    let calls_clone = calls.clone();

    let container = Container::new();
    container.register_per_request(move |_| {
        calls_clone.fetch_add(1, Ordering::SeqCst);
        Config {
            url: "fresh".to_string(),
        }
    });
    container.register_per_request(|c| Pool {
        config: c.resolve::<Config>().unwrap(),
    });

    let _ = container.resolve::<Pool>().unwrap();
    let _ = container.resolve::<Pool>().unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_two_level_nesting() {
    let container = ContainerBuilder::new()
        .register_shared(|_| Config {
            url: "postgres://localhost".to_string(),
        })
        .register_shared(|c: &Container| Pool {
            config: c.resolve::<Config>().unwrap(),
        })
        .register_per_request(|c: &Container| Repository {
            pool: c.resolve::<Pool>().unwrap(),
        })
        .build();

    let repo = container.resolve::<Repository>().unwrap();
    let pool = container.resolve::<Pool>().unwrap();

    assert!(Arc::ptr_eq(&repo.pool, &pool));
    assert_eq!(repo.pool.config.url, "postgres://localhost");
}

#[test]
fn test_constructor_sees_current_registration() {
    struct Label(String);
    struct Banner(String);

    let container = Container::new();
    container.register_shared(|_| Label("old".to_string()));
    container.register_per_request(|c| Banner(c.resolve::<Label>().unwrap().0.clone()));

    // Re-register the dependency before the dependent first resolves
    container.register_shared(|_| Label("new".to_string()));

    let banner = container.resolve::<Banner>().unwrap();
    assert_eq!(banner.0, "new");
}

#[test]
fn test_constructor_can_handle_missing_dependency_gracefully() {
    struct Fallback {
        url: String,
    }

    let container = Container::new();
    container.register_per_request(|c| Fallback {
        url: c
            .resolve::<Config>()
            .map(|config| config.url.clone())
            .unwrap_or_else(|_| "sqlite://memory".to_string()),
    });

    let fallback = container.resolve::<Fallback>().unwrap();
    assert_eq!(fallback.url, "sqlite://memory");
}
