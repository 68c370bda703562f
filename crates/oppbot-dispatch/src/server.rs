//! HTTP surface: the events endpoint Slack delivers to, plus a health route.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use oppbot_core::events::classify;

use crate::dispatcher::Dispatcher;

pub const HEALTH_TEXT: &str = "Slack event server is running!";

/// Build the router. `events_path` is where Slack posts event payloads.
pub fn router(dispatcher: Arc<Dispatcher>, events_path: &str) -> Router {
    Router::new()
        .route("/", get(health))
        .route(
            events_path,
            post(handle_events).fallback(method_not_allowed),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(dispatcher)
}

async fn health() -> &'static str {
    HEALTH_TEXT
}

async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(serde_json::json!({ "error": "Method not allowed" })),
    )
        .into_response()
}

async fn handle_events(State(dispatcher): State<Arc<Dispatcher>>, body: Bytes) -> Response {
    let payload: serde_json::Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "rejecting malformed event body");
            return (StatusCode::BAD_REQUEST, "Bad Request").into_response();
        }
    };

    let event = match classify(&payload) {
        Ok(event) => event,
        Err(e) => {
            error!(error = %e, "error handling event");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response();
        }
    };

    let outcome = dispatcher.dispatch(event).await;
    (StatusCode::OK, outcome.ack.body().to_string()).into_response()
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;
    use crate::testing::{context_with, MockGateway, MockSummaries};

    fn app(gateway: Arc<MockGateway>) -> Router {
        let ctx = context_with(gateway, Arc::new(MockSummaries::returning(None)), |_| {});
        router(Arc::new(Dispatcher::new(Arc::new(ctx))), "/slack/events")
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/slack/events")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, String) {
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_handshake_echoes_challenge_verbatim() {
        let gateway = Arc::new(MockGateway::new());
        let challenge = "3eZbrw1aBm2rZgRNFdxV2595E9CY3gmdALWMmHkvFXO7tYXAYM8P";
        let body = format!(r#"{{"type":"url_verification","token":"t","challenge":"{challenge}"}}"#);

        let (status, text) = send(app(gateway.clone()), post_json(&body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(text, challenge);
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_channel_created_announces() {
        let gateway = Arc::new(MockGateway::new());
        let body = r#"{"type":"event_callback","event":{"type":"channel_created","channel":{"id":"C9","name":"OppAcme"}}}"#;

        let (status, text) = send(app(gateway.clone()), post_json(body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(text, "Event received");
        assert_eq!(gateway.joins(), vec!["C9".to_string()]);
        assert_eq!(gateway.posts().len(), 1);
    }

    #[tokio::test]
    async fn test_unrelated_payload_takes_no_action() {
        let gateway = Arc::new(MockGateway::new());

        let (status, text) = send(app(gateway.clone()), post_json(r#"{"type":"other"}"#)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(text, "No action taken");
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_non_post_is_rejected() {
        for method in [Method::GET, Method::PUT, Method::DELETE] {
            let gateway = Arc::new(MockGateway::new());
            let req = Request::builder()
                .method(method.clone())
                .uri("/slack/events")
                .body(Body::empty())
                .unwrap();

            let (status, text) = send(app(gateway.clone()), req).await;

            assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{method}");
            assert!(text.contains("Method not allowed"));
            assert!(gateway.calls().is_empty());
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let gateway = Arc::new(MockGateway::new());

        let (status, _) = send(app(gateway.clone()), post_json("{not json")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_classifier_fault_is_internal_error() {
        let gateway = Arc::new(MockGateway::new());
        let body = r#"{"type":"event_callback","event":{"type":"channel_created"}}"#;

        let (status, text) = send(app(gateway.clone()), post_json(body)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(text, "Internal Server Error");
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_health() {
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let (status, text) = send(app(Arc::new(MockGateway::new())), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(text, HEALTH_TEXT);
    }

    #[tokio::test]
    async fn test_custom_events_path() {
        let ctx = context_with(
            Arc::new(MockGateway::new()),
            Arc::new(MockSummaries::returning(None)),
            |_| {},
        );
        let app = router(Arc::new(Dispatcher::new(Arc::new(ctx))), "/hooks/slack");
        let req = Request::builder()
            .method(Method::POST)
            .uri("/hooks/slack")
            .body(Body::from(r#"{"type":"url_verification","challenge":"xyz"}"#))
            .unwrap();

        let (status, text) = send(app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(text, "xyz");
    }
}
