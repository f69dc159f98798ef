//! Instruction payloads for the summarisation and grading passes.

use crate::summary::SummaryResult;
use thiserror::Error;

const SUMMARY_TEMPLATE: &str = include_str!("./prompts/summary.txt");
const GRADING_TEMPLATE: &str = include_str!("./prompts/grading.txt");

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PromptError {
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
}

/// A complete instruction block, ready to send to the completion service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPayload(String);

impl PromptPayload {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Build the summarisation instructions around `source_text`.
pub fn build_summary_prompt(source_text: &str) -> Result<PromptPayload, PromptError> {
    if source_text.trim().is_empty() {
        return Err(PromptError::InvalidInput("source text is empty"));
    }

    Ok(PromptPayload(render(
        SUMMARY_TEMPLATE,
        &[("transcript", source_text)],
    )))
}

/// Build the grounding-check instructions: FACTS is the source text, ANSWER the summary.
pub fn build_grading_prompt(result: &SummaryResult) -> PromptPayload {
    PromptPayload(render(
        GRADING_TEMPLATE,
        &[
            ("documents", result.source_text()),
            ("generation", result.summary_text()),
        ],
    ))
}

/// Substitute `{name}` placeholders in the template only, never inside values.
fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let extra: usize = vars.iter().map(|(_, value)| value.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;

    loop {
        let next = vars
            .iter()
            .filter_map(|(name, value)| {
                let placeholder = format!("{{{name}}}");
                rest.find(&placeholder)
                    .map(|at| (at, placeholder.len(), *value))
            })
            .min_by_key(|(at, _, _)| *at);

        match next {
            Some((at, len, value)) => {
                out.push_str(&rest[..at]);
                out.push_str(value);
                rest = &rest[at + len..];
            }
            None => {
                out.push_str(rest);
                return out;
            }
        }
    }
}
