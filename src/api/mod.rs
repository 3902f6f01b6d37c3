//! HTTP API server for the Pest Bot gateway

pub mod chat;
pub mod health;
pub mod image;
pub mod voice;

use std::sync::Arc;

use axum::Router;
use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::groq::GroqClient;
use crate::knowledge::KnowledgeBase;
use crate::persona::PESTBOT_SYSTEM_PROMPT;
use crate::{Error, Result, prompt};

/// Shared state for API handlers
///
/// Built once at startup; the knowledge base is never mutated afterwards,
/// so concurrent requests read it without locking.
pub struct ApiState {
    pub knowledge: KnowledgeBase,
    /// Generation/transcription client. `None` only in router tests.
    pub groq: Option<GroqClient>,
    pub llm_model: String,
    pub stt_model: String,
    pub retrieval_limit: usize,
}

/// Answer produced by the query pipeline
#[derive(Debug)]
pub struct Answer {
    /// Generated answer text, trimmed
    pub reply: String,
    /// Retrieved context string the answer was grounded on
    pub context: String,
}

impl ApiState {
    /// Build handler state from resolved configuration
    #[must_use]
    pub fn from_config(config: &Config, knowledge: KnowledgeBase) -> Self {
        Self {
            knowledge,
            groq: Some(GroqClient::new(config.groq_api_key.clone())),
            llm_model: config.llm_model.clone(),
            stt_model: config.stt_model.clone(),
            retrieval_limit: config.retrieval_limit,
        }
    }

    /// Single typed entry point for a normalized text query
    ///
    /// Validates the query, runs the retrieval scan, assembles the final
    /// prompt, and delegates to the generation call.
    ///
    /// # Errors
    ///
    /// `Error::Validation` for an empty query, `Error::Config` when no
    /// generation client is configured, `Error::Generation` on external
    /// call failure.
    pub async fn answer(&self, query: &str) -> Result<Answer> {
        if query.trim().is_empty() {
            return Err(Error::Validation("empty query".to_string()));
        }

        let groq = self.generation()?;
        let context = self.knowledge.retrieve(query, self.retrieval_limit);
        let final_prompt = prompt::build_final_prompt(query, &context);
        let reply = groq
            .chat(&self.llm_model, PESTBOT_SYSTEM_PROMPT, &final_prompt)
            .await?;

        Ok(Answer { reply, context })
    }

    /// Access the generation client or report it unconfigured
    pub(crate) fn generation(&self) -> Result<&GroqClient> {
        self.groq
            .as_ref()
            .ok_or_else(|| Error::Config("generation client not configured".to_string()))
    }
}

/// Request-boundary error wrapper
///
/// Converts the error taxonomy into a structured JSON failure response so
/// a failed generation is always distinguishable from a successful answer.
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            error: ErrorBody,
        }

        #[derive(Serialize)]
        struct ErrorBody {
            code: &'static str,
            message: String,
        }

        let (status, code) = match &self.0 {
            Error::Validation(_) | Error::Image(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            Error::Transcription(_) => (StatusCode::BAD_REQUEST, "transcription_failed"),
            Error::Generation(_) => (StatusCode::INTERNAL_SERVER_ERROR, "generation_failed"),
            Error::Config(_) => (StatusCode::SERVICE_UNAVAILABLE, "not_configured"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };
        let message = self.0.to_string();

        (status, Json(ErrorResponse { error: ErrorBody { code, message } })).into_response()
    }
}

/// Pull the first uploaded file field out of a multipart body
pub(crate) async fn read_upload(multipart: &mut Multipart) -> Result<Vec<u8>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::Validation(format!("malformed multipart body: {e}")))?
    {
        if field.file_name().is_some() || field.name() == Some("file") {
            let data = field
                .bytes()
                .await
                .map_err(|e| Error::Validation(format!("unreadable upload: {e}")))?;
            return Ok(data.to_vec());
        }
    }

    Err(Error::Validation("missing file upload".to_string()))
}

/// API server
pub struct ApiServer {
    state: Arc<ApiState>,
    port: u16,
}

impl ApiServer {
    /// Create a server for the given state and port
    #[must_use]
    pub fn new(state: Arc<ApiState>, port: u16) -> Self {
        Self { state, port }
    }

    /// Build the router with all routes
    #[must_use]
    pub fn router(state: Arc<ApiState>) -> Router {
        // CORS layer for cross-origin requests from app frontends
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .merge(chat::router(state.clone()))
            .merge(image::router(state.clone()))
            .merge(voice::router(state))
            .merge(health::router())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the API server
    ///
    /// # Errors
    ///
    /// Returns error if the server fails to bind or run
    pub async fn run(self) -> Result<()> {
        let addr = format!("0.0.0.0:{}", self.port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| Error::Config(format!("failed to bind API server: {e}")))?;

        tracing::info!(port = self.port, "API server listening");

        axum::serve(listener, Self::router(self.state))
            .await
            .map_err(|e| Error::Config(format!("API server error: {e}")))?;

        Ok(())
    }
}
