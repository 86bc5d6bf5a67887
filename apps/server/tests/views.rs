mod common;

use axum::http::{Method, StatusCode, header};
use snakeeyes_domain::constants::DEFAULT_GREETING;

#[tokio::test]
async fn home_page() {
    let response = common::client().get("/").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, DEFAULT_GREETING);
    assert!(
        response
            .headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("text/html"))
    );
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let response = common::client().get("/nope").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn home_page_only_answers_get() {
    let response = common::client().request(Method::POST, "/").await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
}

#[test]
fn testing_overrides_are_applied() {
    let app = common::app();
    assert!(!app.config().debug);
    assert!(app.config().testing);
    assert_eq!(app.settings().get_bool("DEBUG"), Some(false));
    assert_eq!(app.blueprints().collect::<Vec<_>>(), vec!["page"]);
}

#[test]
fn fixture_sees_only_base_settings_and_overrides() {
    let keys = common::app().settings().keys().collect::<Vec<_>>();
    assert_eq!(keys, vec!["DEBUG", "LOG_LEVEL", "SERVER_NAME", "TESTING"]);
    assert_eq!(common::app().settings().get("HELLO"), None);
}
