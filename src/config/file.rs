//! TOML configuration file loading
//!
//! Supports `pestbot.toml` in the working directory or
//! `~/.config/pestbot/config.toml` as a persistent config source.
//! All fields are optional — the file is a partial overlay on top of defaults.

use std::path::PathBuf;

use serde::Deserialize;

/// Top-level TOML configuration file schema
#[derive(Debug, Default, Deserialize)]
pub struct PestbotConfigFile {
    /// LLM configuration
    #[serde(default)]
    pub llm: LlmFileConfig,

    /// Voice/transcription configuration
    #[serde(default)]
    pub voice: VoiceFileConfig,

    /// Knowledge base configuration
    #[serde(default)]
    pub knowledge: KnowledgeFileConfig,

    /// Server/runtime configuration
    #[serde(default)]
    pub server: ServerFileConfig,
}

/// LLM-related configuration
#[derive(Debug, Default, Deserialize)]
pub struct LlmFileConfig {
    /// Model identifier (e.g. "llama-3.1-8b-instant")
    pub model: Option<String>,

    /// Path to a local file holding the Groq API key
    pub key_file: Option<String>,
}

/// Voice/transcription configuration
#[derive(Debug, Default, Deserialize)]
pub struct VoiceFileConfig {
    /// STT model (e.g. "whisper-large-v3")
    pub stt_model: Option<String>,
}

/// Knowledge base configuration
#[derive(Debug, Default, Deserialize)]
pub struct KnowledgeFileConfig {
    /// Directory of CSV/TXT reference files
    pub dir: Option<String>,

    /// Max knowledge lines injected per query
    pub retrieval_limit: Option<usize>,
}

/// Server/runtime configuration
#[derive(Debug, Default, Deserialize)]
pub struct ServerFileConfig {
    /// API server port
    pub port: Option<u16>,
}

/// Load the TOML config file from the first path that exists
///
/// Returns `PestbotConfigFile::default()` if no file exists or it can't be parsed.
pub fn load_config_file() -> PestbotConfigFile {
    let Some(path) = config_file_path() else {
        return PestbotConfigFile::default();
    };

    match std::fs::read_to_string(&path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config file");
                config
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to parse config file, using defaults"
                );
                PestbotConfigFile::default()
            }
        },
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to read config file"
            );
            PestbotConfigFile::default()
        }
    }
}

/// Return the first existing config file path
///
/// Checks `pestbot.toml` in the working directory, then
/// `~/.config/pestbot/config.toml`.
pub fn config_file_path() -> Option<PathBuf> {
    let local = PathBuf::from("pestbot.toml");
    if local.exists() {
        return Some(local);
    }

    directories::BaseDirs::new()
        .map(|d| d.config_dir().join("pestbot").join("config.toml"))
        .filter(|p| p.exists())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_parses() {
        let config: PestbotConfigFile = toml::from_str(
            r#"
            [llm]
            model = "llama-3.3-70b-versatile"

            [knowledge]
            retrieval_limit = 8
            "#,
        )
        .unwrap();

        assert_eq!(config.llm.model.as_deref(), Some("llama-3.3-70b-versatile"));
        assert_eq!(config.knowledge.retrieval_limit, Some(8));
        assert!(config.server.port.is_none());
        assert!(config.voice.stt_model.is_none());
    }

    #[test]
    fn test_empty_file_parses() {
        let config: PestbotConfigFile = toml::from_str("").unwrap();
        assert!(config.llm.model.is_none());
        assert!(config.knowledge.dir.is_none());
    }
}
