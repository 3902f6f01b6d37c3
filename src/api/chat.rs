//! Chat endpoint: text query with retrieval augmentation

use std::sync::Arc;

use axum::extract::{Form, FromRequest, Json, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::routing::post;
use axum::Router;
use serde::{Deserialize, Serialize};

use super::{ApiError, ApiState};
use crate::Error;

/// Build chat router
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new().route("/chat", post(chat)).with_state(state)
}

/// Canonical query payload, accepted as JSON or urlencoded form
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub prompt: String,
}

/// Chat response
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// Answer a text query
async fn chat(
    State(state): State<Arc<ApiState>>,
    request: Request,
) -> Result<Json<ChatResponse>, ApiError> {
    let prompt = extract_prompt(request).await?;
    let answer = state.answer(&prompt).await?;
    Ok(Json(ChatResponse { reply: answer.reply }))
}

/// Normalize the request body into one canonical query string
///
/// Clients send either a JSON body or an urlencoded form; both carry the
/// same logical `prompt` field.
async fn extract_prompt(request: Request) -> Result<String, Error> {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if content_type.starts_with("application/json") {
        let Json(body): Json<ChatRequest> = Json::from_request(request, &())
            .await
            .map_err(|e| Error::Validation(format!("invalid JSON body: {e}")))?;
        Ok(body.prompt)
    } else {
        let Form(body): Form<ChatRequest> = Form::from_request(request, &())
            .await
            .map_err(|e| Error::Validation(format!("invalid form body: {e}")))?;
        Ok(body.prompt)
    }
}
