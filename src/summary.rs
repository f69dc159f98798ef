//! Summary and grading results - the two artifacts of an interaction.

use serde::Serialize;
use std::fmt;

/// A generated summary together with the exact text it was generated from.
///
/// Only [`SummarizationPipeline::summarize`](crate::pipeline::SummarizationPipeline::summarize)
/// creates one, so the pair handed to the grader always belongs together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryResult {
    source_text: String,
    summary_text: String,
}

impl SummaryResult {
    pub(crate) fn new(source_text: String, summary_text: String) -> Self {
        Self {
            source_text,
            summary_text,
        }
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn summary_text(&self) -> &str {
        &self.summary_text
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryScore {
    Grounded,
    NotGrounded,
}

impl BinaryScore {
    /// Map the grader's `yes`/`no` answer; anything else is not a score.
    pub fn from_answer(answer: &str) -> Option<Self> {
        match answer.trim().to_ascii_lowercase().as_str() {
            "yes" => Some(BinaryScore::Grounded),
            "no" => Some(BinaryScore::NotGrounded),
            _ => None,
        }
    }
}

impl fmt::Display for BinaryScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinaryScore::Grounded => f.write_str("grounded"),
            BinaryScore::NotGrounded => f.write_str("not grounded"),
        }
    }
}

/// The grounding grader's decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GradingVerdict {
    pub binary_score: BinaryScore,
    pub explanation: String,
    /// Step-by-step reasoning the grader wrote before stating the verdict
    pub reasoning: String,
}

impl GradingVerdict {
    pub fn is_grounded(&self) -> bool {
        self.binary_score == BinaryScore::Grounded
    }
}
