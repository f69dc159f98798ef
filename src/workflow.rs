//! One user interaction: validate, classify, extract, summarise, speak, grade.

pub mod builder;

use crate::completion::CompletionClient;
use crate::config::SummaryConfig;
use crate::content::{truncate_chars, ContentClassifier, ContentType, SourceDocument};
use crate::creativity::CreativityLevel;
use crate::extract::{DocumentLoader, ExtractionError};
use crate::grader::{GradeError, GroundingGrader};
use crate::input::{validate_url, InputError};
use crate::pipeline::{SummarizationPipeline, SummarizeError};
use crate::speech::{SpeechSynthesizer, SynthesisError, Voice};
use crate::summary::{GradingVerdict, SummaryResult};
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The stage an interaction failed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Input,
    Classification,
    Extraction,
    Summarization,
    Grading,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Input => "input",
            Stage::Classification => "classification",
            Stage::Extraction => "extraction",
            Stage::Summarization => "summarisation",
            Stage::Grading => "grading",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("input rejected: {0}")]
    InvalidInput(#[from] InputError),
    #[error("classification failed: could not determine the content type of {url}")]
    UnknownContentType { url: String },
    #[error("extraction failed: {0}")]
    Extraction(#[from] ExtractionError),
    #[error("summarisation failed: {0}")]
    Summarization(#[from] SummarizeError),
    #[error("grading failed: {0}")]
    Grading(#[from] GradeError),
}

impl WorkflowError {
    pub fn stage(&self) -> Stage {
        match self {
            WorkflowError::InvalidInput(_) => Stage::Input,
            WorkflowError::UnknownContentType { .. } => Stage::Classification,
            WorkflowError::Extraction(_) => Stage::Extraction,
            WorkflowError::Summarization(_) => Stage::Summarization,
            WorkflowError::Grading(_) => Stage::Grading,
        }
    }
}

/// Per-interaction choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InteractionOptions {
    pub creativity: CreativityLevel,
    /// `Some` when text-to-speech is enabled
    pub voice: Option<Voice>,
}

impl InteractionOptions {
    pub fn from_config(config: &SummaryConfig) -> Self {
        Self {
            creativity: config.creativity,
            voice: config.enable_tts.then_some(config.voice),
        }
    }
}

/// What became of the optional audio rendition
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AudioOutcome {
    Disabled,
    Ready {
        path: PathBuf,
    },
    Failed {
        #[serde(serialize_with = "serialize_display")]
        error: SynthesisError,
    },
}

impl AudioOutcome {
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            AudioOutcome::Ready { path } => Some(path),
            _ => None,
        }
    }
}

fn serialize_display<T: fmt::Display, S: Serializer>(value: &T, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(value)
}

/// Everything an interaction produced
#[derive(Debug, Serialize)]
pub struct Report {
    pub url: String,
    pub content_type: ContentType,
    pub summary: SummaryResult,
    pub verdict: GradingVerdict,
    pub audio: AudioOutcome,
    pub generated_at: DateTime<Utc>,
}

/// Drives one interaction through every stage, in order.
#[derive(Debug)]
pub struct Workflow<C, E, L, S> {
    pub(crate) classifier: C,
    pub(crate) loader: E,
    pub(crate) completion: L,
    pub(crate) speech: S,
    pub(crate) max_source_chars: usize,
}

impl<C, E, L, S> Workflow<C, E, L, S>
where
    C: ContentClassifier,
    E: DocumentLoader,
    L: CompletionClient,
    S: SpeechSynthesizer,
{
    /// Validate and classify `input`, then extract its text.
    #[tracing::instrument(skip(self))]
    pub async fn acquire(&self, input: &str) -> Result<SourceDocument, WorkflowError> {
        let url = validate_url(input)
            .inspect_err(|e| tracing::warn!(error = %e, "Refusing to proceed"))?;

        let content_type = self.classifier.classify(&url).await;
        tracing::info!(%content_type, "Content classified");
        if content_type == ContentType::Unknown {
            return Err(WorkflowError::UnknownContentType { url });
        }

        let text = self
            .loader
            .load(&url, content_type)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to extract content"))?;
        let text = truncate_chars(text, self.max_source_chars);

        SourceDocument::new(url.clone(), content_type, text)
            .map_err(|_| WorkflowError::UnknownContentType { url })
    }

    /// Run the whole interaction.
    ///
    /// Synthesis failures are recorded in the report instead of aborting it.
    #[tracing::instrument(skip(self, options))]
    pub async fn run(
        &self,
        input: &str,
        options: &InteractionOptions,
    ) -> Result<Report, WorkflowError> {
        let document = self.acquire(input).await?;

        let pipeline = SummarizationPipeline::new(&self.completion);
        let summary = pipeline
            .summarize(&document, options.creativity.temperature())
            .await?;

        let audio = match options.voice {
            None => AudioOutcome::Disabled,
            Some(voice) => match self.speech.synthesize(summary.summary_text(), voice).await {
                Ok(path) => AudioOutcome::Ready { path },
                Err(error) => {
                    tracing::warn!(%error, "Speech synthesis failed, continuing without audio");
                    AudioOutcome::Failed { error }
                }
            },
        };

        let grader = GroundingGrader::new(&self.completion);
        let verdict = grader.grade(&summary).await?;

        Ok(Report {
            url: document.url().to_string(),
            content_type: document.content_type(),
            summary,
            verdict,
            audio,
            generated_at: Utc::now(),
        })
    }
}
