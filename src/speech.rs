//! Text-to-speech collaborator.

use clap::ValueEnum;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SynthesisError {
    #[error("text-to-speech is not configured")]
    NotConfigured,
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Synthesizer voices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Voice {
    #[default]
    Alloy,
    Echo,
    Fable,
    Onyx,
    Nova,
    Shimmer,
}

impl Voice {
    pub const ALL: [Voice; 6] = [
        Voice::Alloy,
        Voice::Echo,
        Voice::Fable,
        Voice::Onyx,
        Voice::Nova,
        Voice::Shimmer,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Voice::Alloy => "alloy",
            Voice::Echo => "echo",
            Voice::Fable => "fable",
            Voice::Onyx => "onyx",
            Voice::Nova => "nova",
            Voice::Shimmer => "shimmer",
        }
    }
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Converts text into a single audio file and returns its path.
pub trait SpeechSynthesizer {
    fn synthesize(
        &self,
        text: &str,
        voice: Voice,
    ) -> impl Future<Output = Result<PathBuf, SynthesisError>>;
}

/// Stand-in used when text-to-speech is switched off.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSpeech;

impl SpeechSynthesizer for NoSpeech {
    async fn synthesize(&self, _text: &str, _voice: Voice) -> Result<PathBuf, SynthesisError> {
        Err(SynthesisError::NotConfigured)
    }
}

impl<S: SpeechSynthesizer> SpeechSynthesizer for Option<S> {
    async fn synthesize(&self, text: &str, voice: Voice) -> Result<PathBuf, SynthesisError> {
        match self {
            Some(speech) => speech.synthesize(text, voice).await,
            None => Err(SynthesisError::NotConfigured),
        }
    }
}

/// OpenAI `/audio/speech` client writing mp3 files into a scratch directory.
#[derive(Debug, Clone)]
pub struct OpenAiSpeech {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    scratch_dir: PathBuf,
}

impl OpenAiSpeech {
    pub fn new(
        api_key: impl Into<String>,
        scratch_dir: impl Into<PathBuf>,
        timeout: Duration,
    ) -> Result<Self, SynthesisError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: "https://api.openai.com/v1".into(),
            model: "tts-1".into(),
            scratch_dir: scratch_dir.into(),
        })
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

impl SpeechSynthesizer for OpenAiSpeech {
    #[tracing::instrument(skip(self, text), fields(chars = text.len()))]
    async fn synthesize(&self, text: &str, voice: Voice) -> Result<PathBuf, SynthesisError> {
        reset_scratch_dir(&self.scratch_dir).await?;

        let body = serde_json::json!({
            "model": self.model,
            "voice": voice.as_str(),
            "input": text,
            "response_format": "mp3"
        });

        let resp = self
            .client
            .post(format!("{}/audio/speech", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(SynthesisError::Api { status, message });
        }

        let audio = resp.bytes().await?;
        let path = self
            .scratch_dir
            .join(format!("{}.mp3", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, &audio).await?;

        tracing::info!(path = %path.display(), bytes = audio.len(), "Audio written");
        Ok(path)
    }
}

/// Remove any artifacts of a previous interaction and recreate the directory
pub async fn reset_scratch_dir(dir: &Path) -> Result<(), SynthesisError> {
    match tokio::fs::remove_dir_all(dir).await {
        Ok(()) => tracing::debug!(path = %dir.display(), "Cleared scratch directory"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }
    tokio::fs::create_dir_all(dir).await?;
    Ok(())
}
