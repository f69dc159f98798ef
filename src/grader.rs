//! Grounding grader: a second completion pass that checks the summary
//! against the text it was generated from.

use crate::completion::{CompletionClient, CompletionError};
use crate::creativity::Temperature;
use crate::prompt::build_grading_prompt;
use crate::summary::{BinaryScore, GradingVerdict, SummaryResult};
use serde::Deserialize;
use thiserror::Error;

/// The evaluator runs deterministically regardless of the creativity setting
const GRADING_TEMPERATURE: Temperature = Temperature::ZERO;

#[derive(Error, Debug)]
pub enum GradeError {
    #[error("completion service failed: {0}")]
    CompletionService(#[from] CompletionError),
    #[error("grader response has no binary_score/explanation verdict: {response}")]
    Parse { response: String },
}

#[derive(Debug, Deserialize)]
struct RawVerdict {
    binary_score: String,
    explanation: String,
}

#[derive(Debug, Clone)]
pub struct GroundingGrader<L> {
    client: L,
}

impl<L: CompletionClient> GroundingGrader<L> {
    pub fn new(client: L) -> Self {
        Self { client }
    }

    /// Grade a summary against its own source text. One outbound call, no retries.
    #[tracing::instrument(skip_all)]
    pub async fn grade(&self, result: &SummaryResult) -> Result<GradingVerdict, GradeError> {
        let prompt = build_grading_prompt(result);
        let response = self
            .client
            .complete(&prompt, GRADING_TEMPERATURE)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to grade summary"))?;

        let verdict = parse_verdict(&response)
            .inspect_err(|_| tracing::warn!(%response, "Unparseable grader response"))?;
        tracing::info!(score = %verdict.binary_score, "Summary graded");
        Ok(verdict)
    }
}

/// Find the verdict object in a possibly discursive response.
///
/// The reasoning comes first, so the last JSON object carrying both fields
/// wins and everything before it is kept as the reasoning. A missing object
/// or a score other than yes/no is an error.
pub fn parse_verdict(response: &str) -> Result<GradingVerdict, GradeError> {
    let (start, raw) = response
        .match_indices('{')
        .filter_map(|(start, _)| {
            serde_json::Deserializer::from_str(&response[start..])
                .into_iter::<RawVerdict>()
                .next()
                .and_then(Result::ok)
                .map(|raw| (start, raw))
        })
        .last()
        .ok_or_else(|| GradeError::Parse {
            response: response.to_string(),
        })?;

    let binary_score =
        BinaryScore::from_answer(&raw.binary_score).ok_or_else(|| GradeError::Parse {
            response: response.to_string(),
        })?;

    Ok(GradingVerdict {
        binary_score,
        explanation: raw.explanation.trim().to_string(),
        reasoning: strip_opening_fence(&response[..start]).to_string(),
    })
}

/// Drop a markdown fence opened right before the verdict object
fn strip_opening_fence(text: &str) -> &str {
    let trimmed = text.trim_end();
    trimmed
        .strip_suffix("```json")
        .or_else(|| trimmed.strip_suffix("```"))
        .unwrap_or(trimmed)
        .trim()
}
