use admin_kernel::prelude::*;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use axum::routing::get;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tower::ServiceExt;

#[derive(Debug)]
struct CountingHook {
    name: &'static str,
    runs: Arc<AtomicUsize>,
}

impl BeforeServing for CountingHook {
    fn name(&self) -> &str {
        self.name
    }

    fn run(&self, _app: &HostApp) -> Result<(), HostError> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Debug)]
struct FailingHook;

impl BeforeServing for FailingHook {
    fn name(&self) -> &str {
        "failing"
    }

    fn run(&self, _app: &HostApp) -> Result<(), HostError> {
        let err: Box<dyn std::error::Error + Send + Sync> = "schema missing".into();
        Err(err.into())
    }
}

async fn get_body(router: axum::Router, uri: &str) -> (StatusCode, String) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn blueprint_routes_are_nested_under_prefix() {
    let mut app = HostApp::new("test");
    let mut bp = Blueprint::new("admin", "/admin");
    bp.route("/users", get(|| async { "users" })).unwrap();
    app.register_blueprint(bp).unwrap();

    let router = app.into_router().unwrap();
    let (status, body) = get_body(router.clone(), "/admin/users").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "users");

    let (status, _) = get_body(router, "/health").await;
    assert_eq!(status, StatusCode::OK);
}

#[test]
fn blueprint_names_register_once() {
    let mut app = HostApp::new("test");
    app.register_blueprint(Blueprint::new("admin", "/admin")).unwrap();

    let err = app.register_blueprint(Blueprint::new("admin", "/other")).unwrap_err();
    assert!(matches!(err, HostError::DuplicateBlueprint { .. }));
    assert_eq!(app.blueprints().collect::<Vec<_>>(), ["admin"]);
}

#[test]
fn prefix_over_a_system_route_is_rejected() {
    let mut app = HostApp::new("test");
    let mut bp = Blueprint::new("admin", "/health");
    bp.route("/", get(|| async { "index" })).unwrap();

    let err = app.register_blueprint(bp).unwrap_err();
    assert!(matches!(err, HostError::DuplicateRoute { .. }));
    assert!(err.to_string().contains("/health"), "unexpected message: {err}");
    assert_eq!(app.blueprints().count(), 0);
}

#[test]
fn root_blueprint_cannot_shadow_system_routes() {
    let mut app = HostApp::new("test");
    let mut bp = Blueprint::new("admin", "/");
    bp.route("/", get(|| async { "index" })).unwrap();
    bp.route("/health", get(|| async { "shadow" })).unwrap();

    let err = app.register_blueprint(bp).unwrap_err();
    assert!(matches!(err, HostError::DuplicateRoute { .. }));
}

#[tokio::test]
async fn blueprints_sharing_a_prefix_must_not_overlap() {
    let mut app = HostApp::new("test");
    let mut first = Blueprint::new("first", "/admin");
    first.route("/users", get(|| async { "users" })).unwrap();
    app.register_blueprint(first).unwrap();

    let mut clash = Blueprint::new("clash", "/admin");
    clash.route("/users", get(|| async { "again" })).unwrap();
    assert!(matches!(app.register_blueprint(clash), Err(HostError::DuplicateRoute { .. })));

    let mut second = Blueprint::new("second", "/admin");
    second.route("/groups", get(|| async { "groups" })).unwrap();
    app.register_blueprint(second).unwrap();

    let router = app.into_router().unwrap();
    assert_eq!(get_body(router.clone(), "/admin/users").await.1, "users");
    assert_eq!(get_body(router, "/admin/groups").await.1, "groups");
}

#[test]
fn prefix_with_parameter_syntax_is_rejected() {
    let mut app = HostApp::new("test");
    let err = app.register_blueprint(Blueprint::new("admin", "/{tenant}")).unwrap_err();
    assert!(matches!(err, HostError::InvalidRoute { .. }));
}

#[test]
fn hooks_run_once_in_order() {
    let runs = Arc::new(AtomicUsize::new(0));
    let mut app = HostApp::new("test");
    app.before_serving(CountingHook { name: "first", runs: Arc::clone(&runs) });
    app.before_serving(CountingHook { name: "second", runs: Arc::clone(&runs) });

    assert!(!app.is_finalized());
    app.finalize_before_serving().unwrap();
    app.finalize_before_serving().unwrap();

    assert!(app.is_finalized());
    assert_eq!(runs.load(Ordering::SeqCst), 2);
}

#[test]
fn failing_hook_stops_startup_and_names_the_hook() {
    let runs = Arc::new(AtomicUsize::new(0));
    let mut app = HostApp::new("test");
    app.before_serving(FailingHook);
    app.before_serving(CountingHook { name: "after", runs: Arc::clone(&runs) });

    let err = app.into_router().unwrap_err();
    assert!(err.to_string().contains("(failing)"), "unexpected message: {err}");
    assert_eq!(runs.load(Ordering::SeqCst), 0);
}

#[test]
fn config_and_extensions_are_host_owned() {
    let mut app = HostApp::with_config("test", [("ADMINISTRATION_APPNAME", "Preset")].into_iter().collect());
    app.extensions_mut().insert("marker", 7_u32);

    assert_eq!(app.config().get_str("ADMINISTRATION_APPNAME"), Some("Preset"));
    assert_eq!(app.extensions().get::<u32>("marker"), Some(&7));
}
