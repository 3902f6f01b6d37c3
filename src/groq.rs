//! Groq API client for chat completions and audio transcription
//!
//! Wire format is OpenAI-compatible. The client is treated as an opaque
//! capability: no retries, no fallback content; failures surface to the
//! caller as generation or transcription errors.

use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

const API_BASE: &str = "https://api.groq.com/openai/v1";

/// Groq API client
#[derive(Debug, Clone)]
pub struct GroqClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GroqClient {
    /// Create a client against the public Groq endpoint
    #[must_use]
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, API_BASE.to_string())
    }

    /// Create a client with a custom base URL (tests point this at a mock)
    #[must_use]
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
        }
    }

    /// Send the persona and final prompt, returning the generated answer
    ///
    /// # Errors
    ///
    /// Returns `Error::Generation` on any request, status, or decode failure.
    pub async fn chat(&self, model: &str, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: model.to_string(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: system_prompt.to_string(),
                },
                Message {
                    role: "user".to_string(),
                    content: user_prompt.to_string(),
                },
            ],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Generation(format!("Groq request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Generation(format!("Groq API error: {status} - {body}")));
        }

        let result: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| Error::Generation(format!("failed to parse Groq response: {e}")))?;

        let answer = result
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| Error::Generation("Groq response contained no choices".to_string()))?;

        Ok(answer.trim().to_string())
    }

    /// Transcribe uploaded audio via the Groq audio-transcriptions endpoint
    ///
    /// # Errors
    ///
    /// Returns `Error::Transcription` on any request, status, or decode failure.
    pub async fn transcribe(&self, audio: Vec<u8>, filename: &str, model: &str) -> Result<String> {
        let part = Part::bytes(audio).file_name(filename.to_string());
        let form = Form::new()
            .text("model", model.to_string())
            .part("file", part);

        let response = self
            .client
            .post(format!("{}/audio/transcriptions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::Transcription(format!("transcription request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Transcription(format!(
                "transcription API error: {status} - {body}"
            )));
        }

        let result: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| Error::Transcription(format!("failed to parse transcription response: {e}")))?;

        Ok(result.text)
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct TranscriptionResponse {
    text: String,
}
