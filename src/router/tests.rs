use super::{EndpointResolver, RouteDef, RouteOutcome, Router};
use crate::errors::RegisterError;
use http::Method;

fn matched<T>(outcome: RouteOutcome<T>) -> super::RouteMatch<T> {
    match outcome {
        RouteOutcome::Match(m) => m,
        other => panic!("expected a match, got {:?}", kind(&other)),
    }
}

fn kind<T>(outcome: &RouteOutcome<T>) -> &'static str {
    match outcome {
        RouteOutcome::Match(_) => "Match",
        RouteOutcome::NotFound => "NotFound",
        RouteOutcome::NotAllowed => "NotAllowed",
    }
}

#[test]
fn get_registers_an_implicit_head_alias() {
    let mut router = Router::new();
    router.add(RouteDef::get("/pets"), "list_pets").unwrap();

    let get = matched(router.route(&Method::GET, "/pets", ""));
    let head = matched(router.route(&Method::HEAD, "/pets", ""));
    assert_eq!(*get.endpoint, "list_pets");
    // Two independent route entries sharing one endpoint handle.
    assert!(std::sync::Arc::ptr_eq(&get.endpoint, &head.endpoint));
}

#[test]
fn explicit_head_route_survives_a_later_get() {
    let mut router = Router::new();
    router
        .add(RouteDef::new(Method::HEAD, "/pets"), "head_pets")
        .unwrap();
    router.add(RouteDef::get("/pets"), "list_pets").unwrap();

    let head = matched(router.route(&Method::HEAD, "/pets", ""));
    assert_eq!(*head.endpoint, "head_pets");
}

#[test]
fn explicit_head_registered_after_get_replaces_the_alias() {
    let mut router = Router::new();
    router.add(RouteDef::get("/pets"), "list_pets").unwrap();
    router
        .add(RouteDef::new(Method::HEAD, "/pets"), "head_pets")
        .unwrap();

    let head = matched(router.route(&Method::HEAD, "/pets", ""));
    assert_eq!(*head.endpoint, "head_pets");
    let get = matched(router.route(&Method::GET, "/pets", ""));
    assert_eq!(*get.endpoint, "list_pets");

    // The alias is gone, so a second explicit HEAD is a real collision.
    let err = router
        .add(RouteDef::new(Method::HEAD, "/pets"), "again")
        .unwrap_err();
    assert!(matches!(err, RegisterError::DuplicateRoute { .. }));
}

#[test]
fn explicit_head_after_get_replaces_the_alias_for_captured_paths() {
    let mut router = Router::new();
    router.add(RouteDef::get("/pets/:id"), "get_pet").unwrap();
    router
        .add(RouteDef::new(Method::HEAD, "/pets/:id"), "head_pet")
        .unwrap();

    let head = matched(router.route(&Method::HEAD, "/pets/9", ""));
    assert_eq!(*head.endpoint, "head_pet");
    assert_eq!(head.param("id"), Some("9"));
    let get = matched(router.route(&Method::GET, "/pets/9", ""));
    assert_eq!(*get.endpoint, "get_pet");
}

#[test]
fn duplicate_registration_is_an_error() {
    let mut router = Router::new();
    router.add(RouteDef::get("/pets"), "a").unwrap();
    let err = router.add(RouteDef::get("/pets"), "b").unwrap_err();
    assert!(matches!(err, RegisterError::DuplicateRoute { .. }));

    router.add(RouteDef::get("/pets/:id"), "a").unwrap();
    let err = router.add(RouteDef::get("/pets/:id"), "b").unwrap_err();
    assert!(matches!(err, RegisterError::DuplicateRoute { .. }));
}

#[test]
fn glob_routes_allow_repeated_registration_in_order() {
    let mut router = Router::new();
    router.add(RouteDef::get("/files/*rest"), "first").unwrap();
    router.add(RouteDef::get("/files/*rest"), "second").unwrap();

    let m = matched(router.route(&Method::GET, "/files/a", ""));
    assert_eq!(*m.endpoint, "first");
}

#[test]
fn scope_is_restored_after_a_failed_block() {
    let mut router = Router::new();
    router.add(RouteDef::get("/dup"), "outer").unwrap();

    let result = router.scope("inner", |r| {
        r.add(RouteDef::get("/ok"), "ok")?;
        // Compilation failure aborts the block partway through.
        r.add(RouteDef::get("/bad/*x/tail"), "bad")
    });
    assert!(result.is_err());

    // Registrations after the failed block land at the root again.
    router.add(RouteDef::get("/after"), "after").unwrap();
    assert!(matches!(
        router.route(&Method::GET, "/after", ""),
        RouteOutcome::Match(_)
    ));
    assert!(matches!(
        router.route(&Method::GET, "/inner/ok", ""),
        RouteOutcome::Match(_)
    ));
}

#[test]
fn resolver_transforms_declared_destinations() {
    struct Prefixer;
    impl EndpointResolver<String> for Prefixer {
        fn resolve(&self, path: &str, to: String) -> String {
            format!("{}#{}", path, to)
        }
    }

    let mut router = Router::new();
    router.set_resolver(Prefixer);
    router
        .add(RouteDef::get("/pets"), "list".to_string())
        .unwrap();

    let m = matched(router.route(&Method::GET, "/pets", ""));
    assert_eq!(*m.endpoint, "/pets#list");
}

#[test]
fn query_parameters_ride_along_without_shadowing_captures() {
    let mut router = Router::new();
    router.add(RouteDef::get("/pets/:id"), "get_pet").unwrap();

    let m = matched(router.route(&Method::GET, "/pets/7", "id=999&limit=10"));
    assert_eq!(m.param("id"), Some("7"));
    assert_eq!(m.param("limit"), Some("10"));

    let merged = m.params_map();
    assert_eq!(merged.get("id").map(String::as_str), Some("7"));
    assert_eq!(merged.get("limit").map(String::as_str), Some("10"));
}

#[test]
fn not_allowed_only_when_another_method_matches() {
    let mut router = Router::new();
    router.add(RouteDef::get("/widgets"), "list").unwrap();

    assert!(matches!(
        router.route(&Method::POST, "/widgets", ""),
        RouteOutcome::NotAllowed
    ));
    assert!(matches!(
        router.route(&Method::POST, "/gadgets", ""),
        RouteOutcome::NotFound
    ));
}
