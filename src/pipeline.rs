//! Summarisation: source document in, summary paired with its source out.

use crate::completion::{CompletionClient, CompletionError};
use crate::content::SourceDocument;
use crate::creativity::Temperature;
use crate::prompt::build_summary_prompt;
use crate::summary::SummaryResult;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SummarizeError {
    #[error("extracted text is empty, nothing to summarise")]
    EmptySource,
    #[error("completion service failed: {0}")]
    CompletionService(#[from] CompletionError),
}

/// Runs the summarisation pass against a completion client.
///
/// One outbound call per `summarize`, no retries.
#[derive(Debug, Clone)]
pub struct SummarizationPipeline<L> {
    client: L,
}

impl<L: CompletionClient> SummarizationPipeline<L> {
    pub fn new(client: L) -> Self {
        Self { client }
    }

    #[tracing::instrument(skip_all, fields(url = %document.url(), chars = document.text().len()))]
    pub async fn summarize(
        &self,
        document: &SourceDocument,
        temperature: Temperature,
    ) -> Result<SummaryResult, SummarizeError> {
        // The prompt builder refuses blank text, before any outbound call
        let prompt =
            build_summary_prompt(document.text()).map_err(|_| SummarizeError::EmptySource)?;
        let summary_text = self
            .client
            .complete(&prompt, temperature)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to summarise content"))?;

        tracing::info!(summary_chars = summary_text.len(), "Summary generated");
        Ok(SummaryResult::new(document.text().to_string(), summary_text))
    }
}
