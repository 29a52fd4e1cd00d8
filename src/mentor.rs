use std::sync::Arc;

use crate::config::GroqConfig;
use crate::error::{MentorError, Result};
use crate::models::{ChatMessage, GroqRequest};
use crate::modes::MentorMode;
use crate::prompt;
use crate::transport::Transport;

/// Turns a mode and a conversation into one Groq completion.
pub struct GroqMentor {
    tx: Arc<dyn Transport>,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl GroqMentor {
    pub fn new(tx: Arc<dyn Transport>, cfg: &GroqConfig) -> Self {
        Self {
            tx,
            model: cfg.model.clone(),
            temperature: cfg.temperature,
            max_tokens: cfg.max_tokens,
        }
    }

    pub fn request_for(&self, mode: MentorMode, history: &[ChatMessage]) -> GroqRequest {
        GroqRequest {
            model: self.model.clone(),
            messages: prompt::build_messages(mode, history),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    /// Ask the provider for the next assistant turn. Exactly one call, no retry.
    pub async fn reply(
        &self,
        api_key: &str,
        mode: MentorMode,
        history: &[ChatMessage],
    ) -> Result<String> {
        tracing::info!(
            %mode,
            turns = history.len(),
            model = %self.model,
            "Requesting mentor reply from Groq"
        );

        let request = self.request_for(mode, history);
        let groq_response = self.tx.chat(api_key, &request).await?;

        groq_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| MentorError::Provider("Groq API returned empty choices".to_string()))
    }
}
