//! HTTP-facing errors.
//!
//! Provider failures are logged with their cause and answered with a fixed
//! plain-text message, so upstream details never reach the browser.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::core::llm::LLMError;
use crate::core::tts::TTSError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Error generating content")]
    ContentGeneration(#[source] LLMError),

    #[error("Error generating audio")]
    AudioGeneration(#[source] TTSError),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<LLMError> for AppError {
    fn from(e: LLMError) -> Self {
        Self::ContentGeneration(e)
    }
}

impl From<TTSError> for AppError {
    fn from(e: TTSError) -> Self {
        Self::AudioGeneration(e)
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::ContentGeneration(cause) => error!(error = %cause, "{}", self),
            AppError::AudioGeneration(cause) => error!(error = %cause, "{}", self),
        }

        (self.status_code(), self.to_string()).into_response()
    }
}
