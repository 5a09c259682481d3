use http::Method;
use trailhead::{RouteDef, RouteMatch, RouteOutcome, Router};

fn example_router() -> Router<&'static str> {
    let mut router = Router::new();
    router.add(RouteDef::get("/"), "root").unwrap();
    router.add(RouteDef::get("/users"), "list_users").unwrap();
    router.add(RouteDef::get("/users/new"), "new_user").unwrap();
    router
        .add(RouteDef::get("/users/:id").name("user"), "get_user")
        .unwrap();
    router
        .add(
            RouteDef::get("/orders/:id").constraint("id", r"\d+"),
            "get_order",
        )
        .unwrap();
    router
        .add(RouteDef::get("/orders/:slug"), "get_order_by_slug")
        .unwrap();
    router
        .add(RouteDef::get("/files/*path"), "serve_file")
        .unwrap();
    router.add(RouteDef::post("/widgets"), "make_widget").unwrap();
    router
}

fn assert_match(
    router: &Router<&'static str>,
    method: Method,
    path: &str,
    expected: &str,
) -> RouteMatch<&'static str> {
    match router.route(&method, path, "") {
        RouteOutcome::Match(m) => {
            assert_eq!(
                *m.endpoint, expected,
                "endpoint mismatch for {} {}",
                method, path
            );
            m
        }
        other => panic!("expected {} {} to match, got {:?}", method, path, kind(&other)),
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
fn test_fixed_path_matches_exactly_with_no_captures() {
    let router = example_router();
    let m = assert_match(&router, Method::GET, "/users", "list_users");
    assert!(m.path_params.is_empty());
    assert!(m.query_params.is_empty());
    assert!(m.mount.is_none());
}

#[test]
fn test_root_path_matches() {
    let router = example_router();
    assert_match(&router, Method::GET, "/", "root");
}

#[test]
fn test_single_capture_binds_the_segment() {
    let router = example_router();
    let m = assert_match(&router, Method::GET, "/users/42", "get_user");
    assert_eq!(m.param("id"), Some("42"));
}

#[test]
fn test_literal_segment_beats_capture() {
    let router = example_router();
    assert_match(&router, Method::GET, "/users/new", "new_user");
    assert_match(&router, Method::GET, "/users/other", "get_user");
}

#[test]
fn test_constraint_failure_falls_through_to_sibling_capture() {
    let router = example_router();
    assert_match(&router, Method::GET, "/orders/123", "get_order");
    let m = assert_match(&router, Method::GET, "/orders/widget-a", "get_order_by_slug");
    assert_eq!(m.param("slug"), Some("widget-a"));
}

#[test]
fn test_glob_captures_the_remaining_segments_joined() {
    let router = example_router();
    let m = assert_match(&router, Method::GET, "/files/a/b/c", "serve_file");
    assert_eq!(m.param("path"), Some("a/b/c"));
}

#[test]
fn test_glob_matches_zero_segments_as_empty() {
    let router = example_router();
    let m = assert_match(&router, Method::GET, "/files", "serve_file");
    assert_eq!(m.param("path"), Some(""));
}

#[test]
fn test_unknown_path_is_not_found() {
    let router = example_router();
    assert!(matches!(
        router.route(&Method::GET, "/nowhere", ""),
        RouteOutcome::NotFound
    ));
}

#[test]
fn test_wrong_method_on_known_path_is_not_allowed() {
    let router = example_router();
    assert!(matches!(
        router.route(&Method::GET, "/widgets", ""),
        RouteOutcome::NotAllowed
    ));
    assert!(matches!(
        router.route(&Method::PUT, "/users/42", ""),
        RouteOutcome::NotAllowed
    ));
}

#[test]
fn test_head_is_served_for_get_routes() {
    let router = example_router();
    assert_match(&router, Method::HEAD, "/users", "list_users");
    assert_match(&router, Method::HEAD, "/users/42", "get_user");
}

#[test]
fn test_query_params_merge_with_path_winning() {
    let router = example_router();
    let m = match router.route(&Method::GET, "/users/42", "id=999&page=2") {
        RouteOutcome::Match(m) => m,
        other => panic!("expected a match, got {:?}", kind(&other)),
    };
    assert_eq!(m.param("id"), Some("42"));
    assert_eq!(m.param("page"), Some("2"));

    let merged = m.params_map();
    assert_eq!(merged.get("id").map(String::as_str), Some("42"));
    assert_eq!(merged.get("page").map(String::as_str), Some("2"));
}

#[test]
fn test_scopes_compose_path_and_name_prefixes() {
    let mut router: Router<&'static str> = Router::new();
    router
        .scope("backend", |r| {
            r.scope("admin", |r| {
                r.add(RouteDef::get("/cats").name("cats"), "list_cats")
            })
        })
        .unwrap();

    assert_match(&router, Method::GET, "/backend/admin/cats", "list_cats");
    assert_eq!(router.path("backend_admin_cats", &[]).unwrap(), "/backend/admin/cats");
}

#[test]
fn test_expand_then_match_round_trip() {
    let router = example_router();
    let path = router.path("user", &[("id", "42")]).unwrap();
    assert_eq!(path, "/users/42");
    let m = assert_match(&router, Method::GET, &path, "get_user");
    assert_eq!(m.param("id"), Some("42"));
}
