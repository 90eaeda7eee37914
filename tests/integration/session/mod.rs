//! Session resolution integration tests
//!
//! Every request passes through the resolver; these check what identity
//! downstream handlers see and what happens to the browser cookie.

use axum::http::StatusCode;
use serde_json::Value;
use wiremock::{
    matchers::{header, method, path},
    Mock, ResponseTemplate,
};

use crate::common::*;

mod test_identity_resolution {
    use super::*;

    #[tokio::test]
    async fn test_valid_session_exposes_identity() {
        let app = TestApp::new().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/auth/me"))
            .and(header("cookie", "access_token=abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(identity_body()))
            .expect(1)
            .mount(&app.backend)
            .await;

        let response = app
            .send(get("/session", Some("theme=dark; access_token=abc123")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(set_cookies(&response).is_empty());
        let body = body_json(response).await;
        assert_eq!(body["user"], identity_body());
    }

    #[tokio::test]
    async fn test_missing_cookie_is_anonymous_without_backend_call() {
        let app = TestApp::new().await;
        app.forbid_call("GET", "/auth/me").await;

        let response = app.send(get("/session", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["user"], Value::Null);
    }

    #[tokio::test]
    async fn test_health_check_passes_through_resolver() {
        let app = TestApp::new().await;
        app.mock_whoami(ResponseTemplate::new(200).set_body_json(identity_body()))
            .await;

        let response = app
            .send(get("/health", Some("access_token=abc123")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"OK");
    }
}

mod test_rejected_sessions {
    use super::*;

    #[tokio::test]
    async fn test_rejected_token_is_cleared() {
        let app = TestApp::new().await;
        app.mock_whoami(ResponseTemplate::new(401)).await;

        let response = app
            .send(get("/session", Some("access_token=expired")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let cleared = session_cookie(&response);
        assert_eq!(cleared.value(), "");
        assert_eq!(cleared.path(), Some("/"));
        assert_eq!(cleared.max_age(), Some(time::Duration::ZERO));

        let body = body_json(response).await;
        assert_eq!(body["user"], Value::Null);
    }

    #[tokio::test]
    async fn test_any_non_success_status_counts_as_rejection() {
        for status in [403, 404, 500] {
            let app = TestApp::new().await;
            app.mock_whoami(ResponseTemplate::new(status)).await;

            let response = app
                .send(get("/session", Some("access_token=whatever")))
                .await
                .unwrap();

            assert_eq!(session_cookie(&response).value(), "", "status {status}");
        }
    }

    #[tokio::test]
    async fn test_production_clear_is_secure() {
        let app = TestApp::production().await;
        app.mock_whoami(ResponseTemplate::new(401)).await;

        let response = app
            .send(get("/session", Some("access_token=expired")))
            .await
            .unwrap();

        assert_eq!(session_cookie(&response).secure(), Some(true));
    }
}

mod test_auth_outage {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_backend_degrades_to_anonymous() {
        let mut app = TestApp::new().await;
        app.config.api_url = format!("http://127.0.0.1:{}/api/v1", closed_port());

        let response = app
            .send(get("/session", Some("access_token=abc123")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(set_cookies(&response).is_empty(), "cookie must survive an outage");
        let body = body_json(response).await;
        assert_eq!(body["user"], Value::Null);
    }

    #[tokio::test]
    async fn test_slow_backend_times_out_to_anonymous() {
        let mut app = TestApp::new().await;
        app.config.backend_timeout_secs = 1;
        app.mock_whoami(
            ResponseTemplate::new(200)
                .set_body_json(identity_body())
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .await;

        let response = app
            .send(get("/session", Some("access_token=abc123")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(set_cookies(&response).is_empty());
        let body = body_json(response).await;
        assert_eq!(body["user"], Value::Null);
    }

    #[tokio::test]
    async fn test_garbled_identity_degrades_to_anonymous() {
        let app = TestApp::new().await;
        app.mock_whoami(ResponseTemplate::new(200).set_body_string("{\"id\": 42}"))
            .await;

        let response = app
            .send(get("/session", Some("access_token=abc123")))
            .await
            .unwrap();

        assert!(set_cookies(&response).is_empty());
        let body = body_json(response).await;
        assert_eq!(body["user"], Value::Null);
    }
}
