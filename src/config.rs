//! Configuration loading and management for tldw.
//!
//! Settings come from `tldw.toml`; API keys are resolved from the environment
//! first and a local TOML secret store second.

use crate::creativity::CreativityLevel;
use crate::speech::Voice;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment / secret-store key for the completion service.
pub const COMPLETION_API_KEY: &str = "TOGETHER_API_KEY";
/// Environment / secret-store key for the speech service.
pub const SPEECH_API_KEY: &str = "OPENAI_API_KEY";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("missing required API key: {0}")]
    MissingApiKey(String),
}

/// Completion service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    /// Base URL of an OpenAI-compatible chat completions API
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// Transport timeout for a single completion call
    pub timeout_secs: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.together.xyz/v1".to_string(),
            model: "meta-llama/Meta-Llama-3.1-8B-Instruct-Turbo".to_string(),
            timeout_secs: 120,
        }
    }
}

/// Text-to-speech configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    pub base_url: String,
    pub model: String,
    /// Scratch directory, wiped before every synthesis call
    pub scratch_dir: PathBuf,
    pub timeout_secs: u64,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "tts-1".to_string(),
            scratch_dir: PathBuf::from("audio_temp"),
            timeout_secs: 120,
        }
    }
}

/// Per-interaction defaults, overridable from the command line
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    pub creativity: CreativityLevel,
    pub enable_tts: bool,
    pub voice: Voice,
    /// Extracted text beyond this many characters is dropped before summarising
    pub max_source_chars: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            creativity: CreativityLevel::default(),
            enable_tts: false,
            voice: Voice::default(),
            max_source_chars: 100_000,
        }
    }
}

/// Location of the local secret store
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SecretsConfig {
    pub path: Option<PathBuf>,
}

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub completion: CompletionConfig,
    pub speech: SpeechConfig,
    pub summary: SummaryConfig,
    pub secrets: SecretsConfig,
}

impl Config {
    /// Load configuration from the default location (tldw.toml in cwd or home).
    ///
    /// A missing file is not an error: every setting has a default.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::find_config_file() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let local_config = PathBuf::from("tldw.toml");
        if local_config.exists() {
            return Some(local_config);
        }

        dirs::home_dir()
            .map(|home| home.join(".config").join("tldw").join("tldw.toml"))
            .filter(|path| path.exists())
    }

    /// Open the secret store this configuration points at
    pub fn secret_store(&self) -> Result<SecretStore, ConfigError> {
        let path = self.secrets.path.clone().or_else(|| {
            dirs::home_dir().map(|home| home.join(".config").join("tldw").join("secrets.toml"))
        });

        match path {
            Some(path) if path.exists() => SecretStore::load_from(&path),
            _ => Ok(SecretStore::default()),
        }
    }
}

/// Flat `KEY = "value"` TOML file holding API keys.
#[derive(Debug, Clone, Default)]
pub struct SecretStore {
    values: HashMap<String, String>,
}

impl SecretStore {
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let values: HashMap<String, String> = toml::from_str(&content)?;
        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl FromIterator<(String, String)> for SecretStore {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Resolve an API key: process environment first, then the secret store.
///
/// Empty values count as absent.
pub fn resolve_secret(key: &str, store: &SecretStore) -> Result<String, ConfigError> {
    if let Ok(value) = std::env::var(key) {
        if !value.trim().is_empty() {
            return Ok(value);
        }
    }

    store
        .get(key)
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
        .ok_or_else(|| ConfigError::MissingApiKey(key.to_string()))
}
