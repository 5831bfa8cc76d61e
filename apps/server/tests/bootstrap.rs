use admin_kernel::config::load_config;
use admin_panel::{ResourceViewConfig, ResourceViewFactory};
use admin_server::{Server, ServerSettings};
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use std::io::Write;
use tower::ServiceExt;

const SETTINGS: &str = r#"
[app]
ADMINISTRATION_APPNAME = "Acme Admin"

[entry_points."invenio_administration.views"]
users_ui = "users"

[[views]]
name = "users"
title = "Users"
schema = "user"

[schemas.user]
type = "object"
"#;

async fn get_json(server: &Server, uri: &str) -> (StatusCode, Value) {
    let response = server
        .router()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn configured_views_are_served() {
    let settings: ServerSettings = toml::from_str(SETTINGS).unwrap();
    let server = Server::builder().settings(settings).build().unwrap();

    assert_eq!(server.admin().extension_names(), ["users-ui"]);
    assert!(server.admin().schemas_bound());

    let (status, page) = get_json(&server, "/administration/users").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["title"], "Users");
    assert_eq!(page["schema"], json!({ "type": "object" }));

    let (status, page) = get_json(&server, "/administration").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["title"], "Acme Admin");
}

#[test]
fn missing_schema_aborts_build() {
    let mut settings: ServerSettings = toml::from_str(SETTINGS).unwrap();
    settings.schemas.clear();

    let err = Server::builder().settings(settings).build().unwrap_err();
    assert!(format!("{err:#}").contains("schema 'user' is not registered"), "unexpected: {err:#}");
}

#[test]
fn manifest_entry_without_factory_aborts_build() {
    let mut settings: ServerSettings = toml::from_str(SETTINGS).unwrap();
    settings.views.clear();

    let err = Server::builder().settings(settings).build().unwrap_err();
    assert!(format!("{err:#}").contains("no factory provided for 'users'"), "unexpected: {err:#}");
}

#[test]
fn compiled_in_views_register_alongside_config() {
    let settings: ServerSettings = toml::from_str(SETTINGS).unwrap();
    let reports = ResourceViewFactory::new(ResourceViewConfig::builder().name("reports").build());

    let server = Server::builder().settings(settings).register("reports_ext", reports).build().unwrap();
    assert_eq!(server.admin().extension_names(), ["reports-ext", "users-ui"]);
}

#[test]
fn settings_load_from_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(SETTINGS.as_bytes()).unwrap();

    let settings: ServerSettings = load_config(Some(file.path())).unwrap();
    assert_eq!(settings.app.get_str("ADMINISTRATION_APPNAME"), Some("Acme Admin"));
    assert_eq!(settings.views.len(), 1);
    assert_eq!(settings.server.port, 5000);
    assert!(settings.logging.console);
}
