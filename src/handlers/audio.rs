//! `POST /generate-audio`

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::info;

use super::lenient_json;
use crate::errors::AppResult;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct GenerateAudioRequest {
    #[serde(default)]
    pub text: Option<String>,
}

/// Synthesize text and return the complete WAV file
pub async fn generate_audio(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> AppResult<Response> {
    let request: GenerateAudioRequest = lenient_json(&body);

    info!(
        provider = state.speech_synthesizer.provider_name(),
        text_len = request.text.as_deref().map(str::len),
        "Audio generation requested"
    );

    let audio = state
        .speech_synthesizer
        .synthesize(request.text.as_deref())
        .await?;

    Ok(([(header::CONTENT_TYPE, audio.content_type)], audio.data).into_response())
}
