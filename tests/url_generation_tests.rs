use trailhead::errors::UrlError;
use trailhead::{RouteDef, Router, UrlGenerator};

fn example_router() -> Router<&'static str> {
    let mut router = Router::with_base_url("https://example.org");
    router
        .add(RouteDef::get("/login").name("login"), "login")
        .unwrap();
    router
        .add(RouteDef::get("/books/:id").name("book"), "get_book")
        .unwrap();
    router
        .add(
            RouteDef::get("/docs/*path").name("doc"),
            "serve_doc",
        )
        .unwrap();
    router
}

#[test]
fn test_path_for_fixed_route() {
    let router = example_router();
    assert_eq!(router.path("login", &[]).unwrap(), "/login");
}

#[test]
fn test_path_substitutes_variables() {
    let router = example_router();
    assert_eq!(router.path("book", &[("id", "7")]).unwrap(), "/books/7");
}

#[test]
fn test_leftover_variables_become_a_query_string() {
    let router = example_router();
    let path = router
        .path("login", &[("return_to", "/dashboard"), ("theme", "dark")])
        .unwrap();
    assert_eq!(path, "/login?return_to=%2Fdashboard&theme=dark");
}

#[test]
fn test_url_prepends_the_base_url() {
    let router = example_router();
    assert_eq!(
        router.url("book", &[("id", "7")]).unwrap(),
        "https://example.org/books/7"
    );
}

#[test]
fn test_default_base_url_is_localhost() {
    let mut router: Router<&'static str> = Router::new();
    router
        .add(RouteDef::get("/ping").name("ping"), "ping")
        .unwrap();
    assert_eq!(router.url("ping", &[]).unwrap(), "http://localhost/ping");
}

#[test]
fn test_glob_expansion_keeps_slashes() {
    let router = example_router();
    assert_eq!(
        router.path("doc", &[("path", "guides/intro")]).unwrap(),
        "/docs/guides/intro"
    );
}

#[test]
fn test_variable_values_are_percent_encoded() {
    let router = example_router();
    assert_eq!(
        router.path("book", &[("id", "a b")]).unwrap(),
        "/books/a%20b"
    );
}

#[test]
fn test_unknown_name_is_an_error() {
    let router = example_router();
    let err = router.path("missing", &[]).unwrap_err();
    assert!(matches!(err, UrlError::UnknownRoute { .. }));
}

#[test]
fn test_missing_variable_names_the_route() {
    let router = example_router();
    let err = router.path("book", &[]).unwrap_err();
    match err {
        UrlError::Expansion { name, .. } => assert_eq!(name, "book"),
        other => panic!("expected an expansion error, got {other}"),
    }
}

#[test]
fn test_last_registration_wins_for_a_reused_name() {
    let mut router: Router<&'static str> = Router::new();
    router
        .add(RouteDef::get("/v1/things/:id").name("thing"), "v1")
        .unwrap();
    router
        .add(RouteDef::get("/v2/things/:id").name("thing"), "v2")
        .unwrap();
    assert_eq!(
        router.path("thing", &[("id", "9")]).unwrap(),
        "/v2/things/9"
    );
}

#[test]
fn test_generator_is_usable_standalone() {
    use trailhead::SegmentPattern;

    let mut urls = UrlGenerator::default();
    let pattern = SegmentPattern::compile("/teams/:slug", &[]).unwrap();
    urls.add("team".to_string(), pattern);
    assert_eq!(
        urls.url("team", &[("slug", "red")]).unwrap(),
        "http://localhost/teams/red"
    );
}
