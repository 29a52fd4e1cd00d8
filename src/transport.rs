use async_trait::async_trait;
use reqwest::Client;

#[cfg(test)]
use mockall::automock;

use crate::error::{MentorError, Result};
use crate::models::{GroqRequest, GroqResponse};

/// Outbound chat-completion call to the generation provider.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn chat(&self, api_key: &str, req: &GroqRequest) -> Result<GroqResponse>;
}

/// Groq's OpenAI-compatible chat completions endpoint. One attempt per call.
pub struct GroqTransport {
    client: Client,
    api_url: String,
}

impl GroqTransport {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into(),
        }
    }
}

#[async_trait]
impl Transport for GroqTransport {
    async fn chat(&self, api_key: &str, req: &GroqRequest) -> Result<GroqResponse> {
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(req)
            .send()
            .await
            .map_err(|e| MentorError::Provider(format!("Failed to send request to Groq API: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(MentorError::Provider(format!(
                "Groq API error ({status}): {body}"
            )));
        }

        response.json().await.map_err(|e| {
            MentorError::Provider(format!("Failed to parse Groq API response: {e}"))
        })
    }
}
