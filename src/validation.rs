use serde_json::Value;

use crate::error::{MentorError, Result};
use crate::models::{ChatMessage, Role};
use crate::modes::{MentorMode, ModeError};

const MISSING_FIELDS: &str = "Missing 'mode' or 'messages' in request body";

/// A mentor request that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub mode: MentorMode,
    /// Set when the requested mode id was unknown and the default was used
    pub fallback_from: Option<String>,
    pub messages: Vec<ChatMessage>,
}

/// Checks raw request bodies for the mentor endpoint
#[derive(Debug, Default)]
pub struct InputValidator;

impl InputValidator {
    pub fn new() -> Self {
        Self
    }

    /// Parse and validate a raw body. Only client errors are returned.
    pub fn validate_body(&self, body: &[u8]) -> Result<ValidatedRequest> {
        let value: Value =
            serde_json::from_slice(body).map_err(|e| MentorError::InvalidBody(e.to_string()))?;
        let obj = value
            .as_object()
            .ok_or_else(|| MentorError::InvalidBody("expected a JSON object".to_string()))?;

        let mode_raw = obj
            .get("mode")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .ok_or_else(|| MentorError::Validation(MISSING_FIELDS.to_string()))?;

        let turns = obj
            .get("messages")
            .and_then(Value::as_array)
            .filter(|a| !a.is_empty())
            .ok_or_else(|| MentorError::Validation(MISSING_FIELDS.to_string()))?;

        let messages = turns
            .iter()
            .enumerate()
            .map(|(i, turn)| self.validate_turn(i, turn))
            .collect::<Result<Vec<_>>>()?;

        let (mode, fallback_from) = self.resolve_mode(mode_raw);

        Ok(ValidatedRequest {
            mode,
            fallback_from,
            messages,
        })
    }

    fn validate_turn(&self, index: usize, turn: &Value) -> Result<ChatMessage> {
        let message: ChatMessage = serde_json::from_value(turn.clone()).map_err(|_| {
            MentorError::Validation(format!(
                "messages[{index}] must be an object with 'role' and string 'content'"
            ))
        })?;

        if message.role == Role::System {
            return Err(MentorError::Validation(format!(
                "messages[{index}].role must be 'user' or 'assistant'"
            )));
        }

        Ok(message)
    }

    /// Unknown ids fall back to the default mode
    fn resolve_mode(&self, raw: &str) -> (MentorMode, Option<String>) {
        match raw.parse::<MentorMode>() {
            Ok(mode) => (mode, None),
            Err(ModeError::InvalidMode { .. }) | Err(ModeError::EmptyModeName) => {
                (MentorMode::default(), Some(raw.to_string()))
            }
        }
    }
}
