//! Axum routes for the mentor HTTP server.
//!
//! # Routes
//!
//! - `GET  /health`      Liveness probe
//! - `GET  /api/modes`   Mode catalog for clients
//! - `POST /api/mentor`  `{mode, messages}` to `{answer}` or `{error}`

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State, rejection::BytesRejection},
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::Instrument;

use crate::config::Config;
use crate::error::{MentorError, Result};
use crate::mentor::GroqMentor;
use crate::models::AnswerResponse;
use crate::modes;
use crate::transport::{GroqTransport, Transport};
use crate::validation::InputValidator;

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub transport: Arc<dyn Transport>,
    validator: Arc<InputValidator>,
}

impl AppState {
    pub fn new(config: Arc<Config>, transport: Arc<dyn Transport>) -> Self {
        Self {
            config,
            transport,
            validator: Arc::new(InputValidator::new()),
        }
    }

    /// State backed by the real Groq endpoint from configuration
    pub fn from_config(config: Arc<Config>) -> Self {
        let transport = Arc::new(GroqTransport::new(config.groq.api_url.clone()));
        Self::new(config, transport)
    }
}

/// Largest accepted `/api/mentor` body. Clients resend the whole history on
/// every turn, so this sits well above axum's 2 MB default.
pub const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// Build the axum router with all routes.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/modes", get(modes_handler))
        .route("/api/mentor", post(mentor_handler))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": state.config.server.name,
        "version": state.config.server.version,
    }))
}

async fn modes_handler() -> impl IntoResponse {
    Json(modes::catalog())
}

async fn mentor_handler(
    State(state): State<AppState>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<Json<AnswerResponse>> {
    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("mentor", %request_id);

    match answer(&state, body).instrument(span.clone()).await {
        Ok(answer) => Ok(Json(AnswerResponse { answer })),
        Err(e) => {
            span.in_scope(|| {
                if e.is_client_error() {
                    tracing::warn!(status = %e.status_code(), "Rejected mentor request: {}", e);
                } else {
                    tracing::error!(status = %e.status_code(), "Error in /api/mentor: {}", e);
                }
            });
            Err(e)
        }
    }
}

async fn answer(
    state: &AppState,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<String> {
    // Credential first: no parsing and no provider call without it
    let api_key = state.config.groq.require_api_key()?;

    // Unreadable or oversized bodies still get the `{error}` shape
    let body = body.map_err(|e| MentorError::InvalidBody(e.body_text()))?;
    let request = state.validator.validate_body(&body)?;
    if let Some(requested) = &request.fallback_from {
        tracing::warn!(
            "Unknown mode '{}' requested, defaulting to {}",
            requested,
            request.mode
        );
    }

    let mentor = GroqMentor::new(Arc::clone(&state.transport), &state.config.groq);
    mentor.reply(api_key, request.mode, &request.messages).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GroqResponse, Role};
    use crate::modes::MentorMode;
    use crate::transport::MockTransport;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn config_with_key(key: Option<&str>) -> Arc<Config> {
        let mut cfg = Config::default();
        cfg.groq.api_key = key.map(str::to_string);
        Arc::new(cfg)
    }

    fn app(key: Option<&str>, transport: MockTransport) -> Router {
        app_router(AppState::new(config_with_key(key), Arc::new(transport)))
    }

    fn post_mentor(body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/mentor")
            .header("Content-Type", "application/json")
            .body(body.into())
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn safe_qa_scenario_returns_answer() {
        let mut transport = MockTransport::new();
        transport
            .expect_chat()
            .withf(|key, req| {
                key == "gsk_test"
                    && req.messages.len() == 2
                    && req.messages[0].content.contains(MentorMode::SafeQa.instructions())
                    && req.messages[1].content == "What does a junior analyst do?"
            })
            .times(1)
            .returning(|_, _| Ok(GroqResponse::from_text("They support senior analysts...")));

        let body = json!({
            "mode": "safe_qa",
            "messages": [{"role": "user", "content": "What does a junior analyst do?"}]
        });
        let response = app(Some("gsk_test"), transport)
            .oneshot(post_mentor(body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            json!({"answer": "They support senior analysts..."})
        );
    }

    #[tokio::test]
    async fn empty_messages_is_bad_request_without_provider_call() {
        let mut transport = MockTransport::new();
        transport.expect_chat().never();

        let body = json!({"mode": "safe_qa", "messages": []});
        let response = app(Some("gsk_test"), transport)
            .oneshot(post_mentor(body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["error"],
            "Missing 'mode' or 'messages' in request body"
        );
    }

    #[tokio::test]
    async fn missing_mode_is_bad_request() {
        let mut transport = MockTransport::new();
        transport.expect_chat().never();

        let body = json!({"messages": [{"role": "user", "content": "hi"}]});
        let response = app(Some("gsk_test"), transport)
            .oneshot(post_mentor(body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_credential_is_server_error_without_provider_call() {
        let mut transport = MockTransport::new();
        transport.expect_chat().times(0);

        let body = json!({
            "mode": "safe_qa",
            "messages": [{"role": "user", "content": "hi"}]
        });
        let response = app(None, transport)
            .oneshot(post_mentor(body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = json_body(response).await;
        assert!(json["error"].as_str().unwrap().contains("GROQ_API_KEY"));
    }

    #[tokio::test]
    async fn credential_is_checked_before_body() {
        let mut transport = MockTransport::new();
        transport.expect_chat().never();

        let response = app(None, transport)
            .oneshot(post_mentor("not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let mut transport = MockTransport::new();
        transport.expect_chat().never();

        let response = app(Some("gsk_test"), transport)
            .oneshot(post_mentor("{\"mode\": "))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert!(json["error"].as_str().unwrap().starts_with("Invalid JSON body"));
    }

    fn long_history(turns: usize, turn_len: usize) -> Value {
        let messages: Vec<Value> = (0..turns)
            .map(|i| {
                let role = if i % 2 == 0 { "user" } else { "assistant" };
                json!({"role": role, "content": "x".repeat(turn_len)})
            })
            .collect();
        json!({"mode": "pm_simulator", "messages": messages})
    }

    #[tokio::test]
    async fn long_history_above_default_limit_is_accepted() {
        let mut transport = MockTransport::new();
        transport
            .expect_chat()
            .withf(|_, req| req.messages.len() == 302)
            .times(1)
            .returning(|_, _| Ok(GroqResponse::from_text("ok")));

        // ~2.4 MB, past axum's 2 MB default
        let body = long_history(301, 8_000).to_string();
        assert!(body.len() > 2 * 1024 * 1024);

        let response = app(Some("gsk_test"), transport)
            .oneshot(post_mentor(body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn oversized_body_is_json_bad_request() {
        let mut transport = MockTransport::new();
        transport.expect_chat().never();

        let body = long_history(2, MAX_BODY_BYTES).to_string();
        let response = app(Some("gsk_test"), transport)
            .oneshot(post_mentor(body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert!(json["error"].as_str().unwrap().starts_with("Invalid JSON body"));
    }

    #[tokio::test]
    async fn oversized_body_without_credential_reports_credential() {
        let mut transport = MockTransport::new();
        transport.expect_chat().never();

        let body = long_history(2, MAX_BODY_BYTES).to_string();
        let response = app(None, transport)
            .oneshot(post_mentor(body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = json_body(response).await;
        assert!(json["error"].as_str().unwrap().contains("GROQ_API_KEY"));
    }

    #[tokio::test]
    async fn provider_error_is_server_error_with_message() {
        let mut transport = MockTransport::new();
        transport
            .expect_chat()
            .times(1)
            .returning(|_, _| Err(MentorError::Provider("Groq API error (429): quota".into())));

        let body = json!({
            "mode": "workflow_helper",
            "messages": [{"role": "user", "content": "3 models due today"}]
        });
        let response = app(Some("gsk_test"), transport)
            .oneshot(post_mentor(body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response).await,
            json!({"error": "Groq API error (429): quota"})
        );
    }

    #[tokio::test]
    async fn each_mode_sends_only_its_own_instructions() {
        for mode in MentorMode::ALL {
            let mut transport = MockTransport::new();
            transport
                .expect_chat()
                .withf(move |_, req| {
                    let system = &req.messages[0];
                    system.role == Role::System
                        && system.content.contains(mode.instructions())
                        && MentorMode::ALL
                            .iter()
                            .filter(|m| **m != mode)
                            .all(|m| !system.content.contains(m.instructions()))
                })
                .times(1)
                .returning(|_, _| Ok(GroqResponse::from_text("ok")));

            let body = json!({
                "mode": mode.id(),
                "messages": [{"role": "user", "content": "hello"}]
            });
            let response = app(Some("gsk_test"), transport)
                .oneshot(post_mentor(body.to_string()))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "mode {mode}");
        }
    }

    #[tokio::test]
    async fn unknown_mode_uses_default_instructions() {
        let mut transport = MockTransport::new();
        transport
            .expect_chat()
            .withf(|_, req| req.messages[0].content.contains(MentorMode::SafeQa.instructions()))
            .times(1)
            .returning(|_, _| Ok(GroqResponse::from_text("ok")));

        let body = json!({
            "mode": "stock_picker",
            "messages": [{"role": "user", "content": "hello"}]
        });
        let response = app(Some("gsk_test"), transport)
            .oneshot(post_mentor(body.to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn health_and_modes_endpoints() {
        let router = app(None, MockTransport::new());

        let response = router
            .clone()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], "analyst-mentor");

        let response = router
            .oneshot(Request::builder().uri("/api/modes").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json.as_array().unwrap().len(), 4);
        assert_eq!(json[1]["id"], "pm_simulator");
    }
}
