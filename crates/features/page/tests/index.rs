use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use snakeeyes_domain::constants::DEFAULT_GREETING;
use snakeeyes_kernel::config::Settings;
use snakeeyes_kernel::server::{AppState, BlueprintRegistry};
use tower::ServiceExt;

async fn get_index(settings: Settings) -> (StatusCode, Option<String>, String) {
    let mut registry = BlueprintRegistry::new();
    registry.register(snakeeyes_page::blueprint()).expect("register page");
    let router = registry.into_router().with_state(AppState::new(settings).expect("state"));

    let response = router
        .oneshot(Request::get("/").body(Body::empty()).expect("request"))
        .await
        .expect("infallible");

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    (status, content_type, String::from_utf8(body.to_vec()).expect("utf-8"))
}

#[tokio::test]
async fn index_serves_default_greeting() {
    let (status, content_type, body) = get_index(Settings::new()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, DEFAULT_GREETING);
    assert!(content_type.is_some_and(|ct| ct.starts_with("text/html")));
}

#[tokio::test]
async fn index_serves_configured_greeting() {
    let (status, _, body) = get_index(Settings::new().with("HELLO", "<h1>Howdy</h1>")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "<h1>Howdy</h1>");
}

#[test]
fn blueprint_exposes_single_root_route() {
    let bp = snakeeyes_page::blueprint();
    assert_eq!(bp.name(), "page");
    assert_eq!(bp.prefix(), None);
    assert_eq!(bp.paths().collect::<Vec<_>>(), vec!["/"]);
}
