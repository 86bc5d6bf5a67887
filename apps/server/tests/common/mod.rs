//! Shared test fixtures: one application per test binary, one client per test.
#![allow(dead_code, unreachable_pub)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use snakeeyes_kernel::config::Settings;
use snakeeyes_server::Application;
use std::sync::LazyLock;
use tower::ServiceExt;

/// Built once per test binary with testing overrides, then shared read-only.
///
/// Only the embedded base settings and the overrides apply: the shell's
/// `SNAKEEYES_*` variables and any local `instance/settings.toml` are ignored.
static APP: LazyLock<Application> = LazyLock::new(|| {
    let params = Settings::new().with("DEBUG", false).with("TESTING", true);
    Application::builder()
        .without_instance()
        .without_environment()
        .overrides(params)
        .build()
        .expect("test application should build")
});

pub fn app() -> &'static Application {
    &APP
}

/// A fresh client over the shared application.
pub fn client() -> TestClient {
    TestClient::new(app().router())
}

/// Drives a router in-process, without binding a socket.
#[derive(Debug, Clone)]
pub struct TestClient {
    router: Router,
}

#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestClient {
    pub const fn new(router: Router) -> Self {
        Self { router }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri).await
    }

    pub async fn request(&self, method: Method, uri: &str) -> TestResponse {
        let request =
            Request::builder().method(method).uri(uri).body(Body::empty()).expect("valid request");
        let response = self.router.clone().oneshot(request).await.expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("readable body");
        TestResponse { status, headers, body: String::from_utf8_lossy(&bytes).into_owned() }
    }
}
