//! Image analysis endpoint
//!
//! The uploaded image is re-encoded to JPEG and base64-embedded in a fixed
//! analysis instruction. This path carries no retrieval augmentation; the
//! instruction text itself is the whole user prompt.

use std::sync::Arc;

use axum::Router;
use axum::extract::{Multipart, State};
use axum::response::Json;
use axum::routing::post;
use serde::Serialize;

use super::{ApiError, ApiState, read_upload};
use crate::persona::PESTBOT_SYSTEM_PROMPT;
use crate::{Error, media, prompt};

/// Build image router
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/image", post(analyze_image))
        .with_state(state)
}

/// Image analysis response
#[derive(Debug, Serialize)]
pub struct ImageResponse {
    pub response: String,
}

/// Analyze an uploaded crop image
async fn analyze_image(
    State(state): State<Arc<ApiState>>,
    mut multipart: Multipart,
) -> Result<Json<ImageResponse>, ApiError> {
    let data = read_upload(&mut multipart).await?;
    if data.is_empty() {
        return Err(Error::Validation("empty image upload".to_string()).into());
    }

    let jpeg = media::to_jpeg(&data)?;
    let encoded = media::encode_base64(&jpeg);

    let groq = state.generation()?;
    let image_prompt = prompt::build_image_prompt(&encoded);
    let response = groq
        .chat(&state.llm_model, PESTBOT_SYSTEM_PROMPT, &image_prompt)
        .await?;

    Ok(Json(ImageResponse { response }))
}
