//! Voice endpoint: uploaded audio transcribed, then answered like chat

use std::sync::Arc;

use axum::Router;
use axum::extract::{Multipart, State};
use axum::response::Json;
use axum::routing::post;
use serde::Serialize;

use super::{ApiError, ApiState, read_upload};
use crate::Error;

/// Build voice router
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/voice", post(voice_chat))
        .with_state(state)
}

/// Voice response: the transcript plus the generated answer
#[derive(Debug, Serialize)]
pub struct VoiceResponse {
    pub transcript: String,
    pub response: String,
}

/// Answer a spoken query
///
/// Transcription failures are client errors: the upload could not be
/// turned into a usable query, so no generation is attempted.
async fn voice_chat(
    State(state): State<Arc<ApiState>>,
    mut multipart: Multipart,
) -> Result<Json<VoiceResponse>, ApiError> {
    let audio = read_upload(&mut multipart).await?;
    if audio.is_empty() {
        return Err(Error::Validation("empty audio upload".to_string()).into());
    }

    let groq = state.generation()?;
    let transcript = groq
        .transcribe(audio, "audio.wav", &state.stt_model)
        .await?;

    if transcript.trim().is_empty() {
        return Err(Error::Validation("could not transcribe speech from upload".to_string()).into());
    }

    let answer = state.answer(&transcript).await?;

    Ok(Json(VoiceResponse {
        transcript,
        response: answer.reply,
    }))
}
