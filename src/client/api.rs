use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

use crate::models::MentorRequest;

/// What the chat client shows when a turn fails
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    /// The server's own `error` string, shown as-is
    #[error("{0}")]
    Server(String),

    #[error("Request failed")]
    RequestFailed,

    #[error("Network error")]
    Network,
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait MentorApi: Send + Sync {
    async fn ask(&self, req: &MentorRequest) -> Result<String, ClientError>;
}

/// Talks to `POST /api/mentor` over HTTP
pub struct HttpMentorApi {
    client: Client,
    endpoint: String,
}

impl HttpMentorApi {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl MentorApi for HttpMentorApi {
    async fn ask(&self, req: &MentorRequest) -> Result<String, ClientError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(req)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Mentor request to {} failed: {}", self.endpoint, e);
                ClientError::Network
            })?;

        let status = response.status();
        let body: Value = response.json().await.map_err(|e| {
            tracing::error!("Mentor response was not JSON ({}): {}", status, e);
            ClientError::Network
        })?;

        if !status.is_success() {
            return Err(body
                .get("error")
                .and_then(Value::as_str)
                .map(|e| ClientError::Server(e.to_string()))
                .unwrap_or(ClientError::RequestFailed));
        }

        body.get("answer")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(ClientError::RequestFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::{ChatMessage, GroqResponse};
    use crate::modes::MentorMode;
    use crate::server::{AppState, app_router};
    use crate::transport::MockTransport;
    use axum::{Router, http::StatusCode, routing::post};
    use std::sync::Arc;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/api/mentor")
    }

    fn mentor_app(key: Option<&str>, transport: MockTransport) -> Router {
        let mut cfg = Config::default();
        cfg.groq.api_key = key.map(str::to_string);
        app_router(AppState::new(Arc::new(cfg), Arc::new(transport)))
    }

    fn request(text: &str) -> MentorRequest {
        MentorRequest {
            mode: MentorMode::SafeQa,
            messages: vec![ChatMessage::user(text)],
        }
    }

    #[tokio::test]
    async fn answer_from_live_server() {
        let mut transport = MockTransport::new();
        transport
            .expect_chat()
            .times(1)
            .returning(|_, _| Ok(GroqResponse::from_text("They support senior analysts...")));
        let endpoint = serve(mentor_app(Some("gsk_test"), transport)).await;

        let api = HttpMentorApi::new(endpoint);
        let answer = api.ask(&request("What does a junior analyst do?")).await;
        assert_eq!(answer, Ok("They support senior analysts...".to_string()));
    }

    #[tokio::test]
    async fn server_error_string_is_passed_through() {
        let mut transport = MockTransport::new();
        transport.expect_chat().never();
        let endpoint = serve(mentor_app(None, transport)).await;

        let api = HttpMentorApi::new(endpoint);
        let err = api.ask(&request("hi")).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "GROQ_API_KEY is not set. Check your .env.local file."
        );
    }

    #[tokio::test]
    async fn error_without_message_reads_request_failed() {
        let router = Router::new().route(
            "/api/mentor",
            post(|| async { (StatusCode::BAD_GATEWAY, axum::Json(serde_json::json!({}))) }),
        );
        let endpoint = serve(router).await;

        let err = HttpMentorApi::new(endpoint)
            .ask(&request("hi"))
            .await
            .unwrap_err();
        assert_eq!(err, ClientError::RequestFailed);
        assert_eq!(err.to_string(), "Request failed");
    }

    #[tokio::test]
    async fn unreachable_server_is_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = HttpMentorApi::new(format!("http://{addr}/api/mentor"))
            .ask(&request("hi"))
            .await
            .unwrap_err();
        assert_eq!(err, ClientError::Network);
    }
}
