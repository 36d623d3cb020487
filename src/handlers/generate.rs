//! `POST /api/generate-content`

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
pub struct GenerateContentRequest {
    #[serde(default)]
    pub transcript: Option<String>,
}

/// Forward a transcript to the completion provider.
///
/// On success the provider's JSON body is returned byte for byte. Any failure
/// becomes a 500 with a plain-text message.
pub async fn generate_content(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> AppResult<Response> {
    let request: GenerateContentRequest = lenient_json(&body);

    info!(
        provider = state.text_generator.provider_name(),
        transcript_len = request.transcript.as_deref().map(str::len),
        "Content generation requested"
    );

    let completion = state
        .text_generator
        .generate(request.transcript.as_deref())
        .await?;

    Ok((
        [(header::CONTENT_TYPE, "application/json")],
        completion.body,
    )
        .into_response())
}
