use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;

use crate::rpc::dispatcher::Dispatcher;

/// `/healthz` plus the dispatch endpoint at `POST /rpc`.
pub fn build_app(dispatcher: Dispatcher) -> Router {
    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .route("/rpc", post(rpc))
        .with_state(dispatcher)
}

/// Raw body in, envelope out.
///
/// The body is handed to the dispatcher untouched, so malformed JSON comes
/// back as a ParseError envelope instead of a transport-level 400. A
/// notification has no reply and maps to 204.
async fn rpc(State(dispatcher): State<Dispatcher>, body: String) -> Response {
    match dispatcher.dispatch(&body).await {
        Some(reply) => ([(header::CONTENT_TYPE, "application/json")], reply).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use hyper::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    const BODY_LIMIT: usize = 1024 * 1024;

    fn app() -> Router {
        build_app(Dispatcher::new(crate::rpc::methods::build_registry()))
    }

    #[tokio::test]
    async fn healthz_returns_ok() {
        let req = Request::builder()
            .method("GET")
            .uri("/healthz")
            .body(Body::empty())
            .unwrap();
        let resp = app().oneshot(req).await.unwrap();
        assert!(resp.status().is_success());
    }

    #[tokio::test]
    async fn rpc_call_returns_envelope() {
        let req = Request::builder()
            .method("POST")
            .uri("/rpc")
            .header("content-type", "application/json")
            .body(Body::from(
                r#"{"jsonrpc":"2.0","method":"add","params":[2,3],"id":1}"#,
            ))
            .unwrap();
        let resp = app().oneshot(req).await.unwrap();
        assert!(resp.status().is_success());
        let bytes = to_bytes(resp.into_body(), BODY_LIMIT).await.unwrap();
        let v: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(v["result"], 5);
    }

    #[tokio::test]
    async fn notification_maps_to_no_content() {
        let req = Request::builder()
            .method("POST")
            .uri("/rpc")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"jsonrpc":"2.0","method":"add","params":[2,3]}"#))
            .unwrap();
        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }
}
