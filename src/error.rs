use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::models::ErrorBody;

/// Error type shared by the mentor handler, the Groq transport and the chat client.
#[derive(Debug, Error)]
pub enum MentorError {
    /// Request body was missing required fields or carried malformed turns.
    #[error("{0}")]
    Validation(String),

    /// Request body could not be parsed as a JSON object.
    #[error("Invalid JSON body: {0}")]
    InvalidBody(String),

    /// The provider credential is absent from the environment.
    #[error("{var} is not set. Check your .env.local file.")]
    MissingCredential { var: &'static str },

    #[error("Configuration error: {0}")]
    Config(String),

    /// The generation provider rejected the request or returned nothing usable.
    #[error("{0}")]
    Provider(String),
}

pub type Result<T> = std::result::Result<T, MentorError>;

impl MentorError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            MentorError::Validation(_) | MentorError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            MentorError::MissingCredential { .. }
            | MentorError::Config(_)
            | MentorError::Provider(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// True for failures caused by the caller rather than the server.
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

impl IntoResponse for MentorError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
