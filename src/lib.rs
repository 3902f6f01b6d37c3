//! Pest Bot Gateway - retrieval-augmented relay for agricultural pest queries
//!
//! This library provides the core functionality for the gateway:
//! - Knowledge base loading (CSV/TXT reference files flattened into lines)
//! - Naive keyword retrieval over the loaded lines
//! - Prompt assembly (persona + question + retrieved context)
//! - Delegation to the Groq API for generation and transcription
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 Clients                      │
//! │     /chat     │    /image    │    /voice    │
//! └──────────────────────┬──────────────────────┘
//!                        │
//! ┌──────────────────────▼──────────────────────┐
//! │             Pest Bot Gateway                 │
//! │  Knowledge Base │ Retrieval │ Prompt │ Media │
//! └──────────────────────┬──────────────────────┘
//!                        │
//! ┌──────────────────────▼──────────────────────┐
//! │          Groq API (OpenAI-compatible)        │
//! │    chat completions  │  audio transcription  │
//! └─────────────────────────────────────────────┘
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod groq;
pub mod knowledge;
pub mod media;
pub mod persona;
pub mod prompt;

pub use config::Config;
pub use error::{Error, Result};
pub use groq::GroqClient;
pub use knowledge::KnowledgeBase;
pub use persona::PESTBOT_SYSTEM_PROMPT;
