//! Configuration management for the Pest Bot gateway

pub mod file;

use std::path::{Path, PathBuf};

use crate::{Error, Result};

const DEFAULT_LLM_MODEL: &str = "llama-3.1-8b-instant";
const DEFAULT_STT_MODEL: &str = "whisper-large-v3";
const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_RETRIEVAL_LIMIT: usize = 5;
const DEFAULT_PORT: u16 = 8000;

/// Local credential fallback for deployments that cannot set `GROQ_API_KEY`
const DEFAULT_KEY_FILE: &str = "config/groq_key.txt";

/// Gateway configuration, resolved once at startup (env > toml > default)
#[derive(Debug, Clone)]
pub struct Config {
    /// Groq API key; the process refuses to start without one
    pub groq_api_key: String,

    /// Directory holding CSV/TXT reference files
    pub data_dir: PathBuf,

    /// Chat completion model identifier
    pub llm_model: String,

    /// Transcription model identifier
    pub stt_model: String,

    /// Max knowledge lines injected per query
    pub retrieval_limit: usize,

    /// Port for the HTTP API
    pub port: u16,
}

impl Config {
    /// Load configuration from environment, optional TOML file, and defaults
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if no Groq API key can be resolved.
    pub fn load() -> Result<Self> {
        Self::load_with_options(None, None)
    }

    /// Load configuration with explicit CLI overrides
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if no Groq API key can be resolved.
    pub fn load_with_options(data_dir: Option<PathBuf>, port: Option<u16>) -> Result<Self> {
        let fc = file::load_config_file();

        let key_file = fc
            .llm
            .key_file
            .clone()
            .unwrap_or_else(|| DEFAULT_KEY_FILE.to_string());
        let groq_api_key =
            resolve_api_key(std::env::var("GROQ_API_KEY").ok(), Path::new(&key_file))?;

        let data_dir = data_dir
            .or_else(|| std::env::var("PESTBOT_DATA_DIR").ok().map(PathBuf::from))
            .or_else(|| fc.knowledge.dir.clone().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let llm_model = std::env::var("PESTBOT_LLM_MODEL")
            .ok()
            .or(fc.llm.model)
            .unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string());

        let stt_model = std::env::var("PESTBOT_STT_MODEL")
            .ok()
            .or(fc.voice.stt_model)
            .unwrap_or_else(|| DEFAULT_STT_MODEL.to_string());

        let retrieval_limit = std::env::var("PESTBOT_RETRIEVAL_LIMIT")
            .ok()
            .and_then(|s| s.parse().ok())
            .or(fc.knowledge.retrieval_limit)
            .unwrap_or(DEFAULT_RETRIEVAL_LIMIT);

        let port = port
            .or_else(|| {
                std::env::var("PESTBOT_PORT")
                    .or_else(|_| std::env::var("PORT"))
                    .ok()
                    .and_then(|s| s.parse().ok())
            })
            .or(fc.server.port)
            .unwrap_or(DEFAULT_PORT);

        Ok(Self {
            groq_api_key,
            data_dir,
            llm_model,
            stt_model,
            retrieval_limit,
            port,
        })
    }
}

/// Resolve the Groq credential: env value first, then the local key file
fn resolve_api_key(env_value: Option<String>, key_file: &Path) -> Result<String> {
    if let Some(key) = env_value {
        let key = key.trim().to_string();
        if !key.is_empty() {
            return Ok(key);
        }
    }

    match std::fs::read_to_string(key_file) {
        Ok(contents) if !contents.trim().is_empty() => Ok(contents.trim().to_string()),
        _ => Err(Error::Config(format!(
            "Groq API key not found: set GROQ_API_KEY or add {}",
            key_file.display()
        ))),
    }
}
