use bean_framework::testing::FactoryProbe;
use bean_framework::{LifecycleState, LiteralOverrides};
use bean_recipe::config::parse_overrides;
use bean_recipe::lifecycle::{AppContext, SharedContainer};
use bean_recipe::model::{AuditLog, Settings, UserService};

/// Full end-to-end test of the sample graph, cycle included.
#[test]
fn test_service_graph_resolves() {
    let mut context = AppContext::new(LiteralOverrides::new()).expect("graph should register");
    let services = context.start().expect("graph should resolve");

    {
        let settings = services.settings.read();
        assert_eq!(settings.service_name, "bean-recipe");
        assert_eq!(settings.port, 8080);
        assert!(!settings.verbose);
        assert_eq!(settings.sample_rate, 0.25);
    }

    let database = services.database.read();
    assert_eq!(database.pool_size, 8);
    assert!(database
        .settings
        .get()
        .is_some_and(|settings| settings.ptr_eq(&services.settings)));

    // UserService -> AuditLog -> UserService closes on the same instances
    let users = services.users.read();
    assert!(users.db.get().is_some_and(|db| db.ptr_eq(&services.database)));
    assert!(users.audit.get().is_some_and(|audit| audit.ptr_eq(&services.audit)));
    assert!(services
        .audit
        .read()
        .users
        .get()
        .is_some_and(|users| users.ptr_eq(&services.users)));
}

#[test]
fn test_services_work_together() {
    let mut context = AppContext::new(LiteralOverrides::new()).unwrap();
    let services = context.start().unwrap();

    let greeting = services.users.read().register_user("alice");
    assert_eq!(greeting, "Welcome, alice!");

    let audit = services.audit.read();
    assert_eq!(audit.entries(), ["registered alice in postgres://localhost/recipes"]);
    assert_eq!(audit.capacity, 128);
}

#[test]
fn test_overrides_reach_the_graph() {
    let overrides = parse_overrides(
        r#"{"settings": {"port": "9090", "verbose": "true"}, "userService": {"greeting": "Hi"}}"#,
    )
    .unwrap();
    let mut context = AppContext::new(overrides).unwrap();
    let services = context.start().unwrap();

    assert_eq!(services.settings.read().port, 9090);
    assert!(services.settings.read().verbose);
    assert_eq!(services.settings.read().bind_address(), "0.0.0.0:9090");
    assert_eq!(services.users.read().register_user("bob"), "Hi, bob!");
}

#[test]
fn test_bad_override_keeps_zero_value() {
    let overrides = LiteralOverrides::new().with("settings", "port", "not-a-port");
    let mut context = AppContext::new(overrides).unwrap();
    let services = context.start().unwrap();
    assert_eq!(services.settings.read().port, 0);
}

#[tokio::test]
async fn test_concurrent_resolution_creates_one_instance() {
    let probe = FactoryProbe::new();
    let shared = SharedContainer::default();
    shared
        .register("settings", probe.wrap(Settings::default))
        .await
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let shared = shared.clone();
        handles.push(tokio::spawn(async move {
            shared.get::<Settings>("settings").await
        }));
    }

    let mut resolved = Vec::new();
    for handle in handles {
        let loaded = handle.await.expect("task should not panic").expect("settings should resolve");
        assert!(loaded.is_complete());
        resolved.push(loaded.into_inner());
    }

    assert_eq!(probe.calls(), 1);
    assert!(resolved.iter().all(|settings| settings.ptr_eq(&resolved[0])));
    assert_eq!(resolved[0].read().port, 8080);
    assert_eq!(shared.state("settings").await, LifecycleState::Created);
}

#[tokio::test]
async fn test_shared_container_resolves_the_cycle() {
    let mut container = AppContext::new(LiteralOverrides::new())
        .unwrap()
        .into_container();
    // Resolve part of the graph before sharing it
    let _audit = container.get::<AuditLog>("auditLog").unwrap();
    let shared = SharedContainer::new(container);

    let users = shared.get::<UserService>("userService").await.unwrap();
    assert!(users.is_complete());
    let audit = shared.get::<AuditLog>("auditLog").await.unwrap().into_inner();
    assert!(audit
        .read()
        .users
        .get()
        .is_some_and(|u| u.ptr_eq(users.get())));

    let missing = shared.get_by_name("cache").await;
    assert!(missing.is_err());
}
