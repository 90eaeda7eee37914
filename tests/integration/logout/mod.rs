//! Logout integration tests
//!
//! The browser session must end no matter what the backend does.

use axum::http::StatusCode;
use wiremock::{
    matchers::{header, method, path},
    Mock, ResponseTemplate,
};

use crate::common::*;

fn assert_logged_out(response: &axum::response::Response) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(response).as_deref(), Some("/"));

    let cleared = session_cookie(response);
    assert_eq!(cleared.value(), "");
    assert_eq!(cleared.path(), Some("/"));
    assert_eq!(cleared.max_age(), Some(time::Duration::ZERO));
}

#[tokio::test]
async fn test_logout_notifies_backend_with_token() {
    let app = TestApp::new().await;
    app.mock_whoami(ResponseTemplate::new(200).set_body_json(identity_body()))
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/logout"))
        .and(header("cookie", "access_token=abc123"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.backend)
        .await;

    let response = app
        .send(form_post("/logout", "", Some("access_token=abc123")))
        .await
        .unwrap();

    assert_logged_out(&response);
}

#[tokio::test]
async fn test_logout_with_backend_down_still_clears_cookie() {
    let mut app = TestApp::new().await;
    app.config.api_url = format!("http://127.0.0.1:{}/api/v1", closed_port());

    let response = app
        .send(form_post("/logout", "", Some("access_token=abc123")))
        .await
        .unwrap();

    assert_logged_out(&response);
}

#[tokio::test]
async fn test_logout_with_backend_error_still_clears_cookie() {
    let app = TestApp::new().await;
    app.mock_whoami(ResponseTemplate::new(200).set_body_json(identity_body()))
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/logout"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&app.backend)
        .await;

    let response = app
        .send(form_post("/logout", "", Some("access_token=abc123")))
        .await
        .unwrap();

    assert_logged_out(&response);
}

#[tokio::test]
async fn test_logout_in_production_clears_with_secure_attributes() {
    let app = TestApp::production().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/logout"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.backend)
        .await;

    let response = app.send(form_post("/logout", "", None)).await.unwrap();

    assert_logged_out(&response);
    assert_eq!(session_cookie(&response).secure(), Some(true));
}
