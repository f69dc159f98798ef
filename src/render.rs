//! Terminal rendering of an interaction's report.

use crate::workflow::{AudioOutcome, Report, WorkflowError};
use colored::Colorize;
use std::fmt::Write;

/// Human-readable report: summary, grading verdict, audio, optional source.
pub fn render_report(report: &Report, show_source: bool) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== {} ({}) ===\n", report.url, report.content_type);
    let _ = writeln!(out, "{}", report.summary.summary_text().trim());

    match &report.audio {
        AudioOutcome::Disabled => {}
        AudioOutcome::Ready { path } => {
            let _ = writeln!(out, "\n🔊 Audio: {}", path.display());
        }
        AudioOutcome::Failed { error } => {
            let _ = writeln!(
                out,
                "\n{} {}",
                "⚠️  Audio unavailable (synthesis failed):".yellow(),
                error
            );
        }
    }

    if show_source {
        let _ = writeln!(out, "\n{}\n", "─".repeat(40));
        let _ = writeln!(out, "{}", report.summary.source_text().trim());
    }

    let _ = writeln!(out, "\n### Hallucination Grader\n");
    if !report.verdict.reasoning.is_empty() {
        let _ = writeln!(out, "{}\n", report.verdict.reasoning);
    }
    let score = if report.verdict.is_grounded() {
        format!("✅ {}", report.verdict.binary_score).green()
    } else {
        format!("❌ {}", report.verdict.binary_score).red()
    };
    let _ = writeln!(out, "Verdict: {}", score.bold());
    let _ = writeln!(out, "{}", report.verdict.explanation);

    out
}

/// Machine-readable report
pub fn render_json(report: &Report) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

/// One-line failure message naming the stage that failed
pub fn render_error(error: &WorkflowError) -> String {
    format!("{} {}", format!("[{}]", error.stage()).red().bold(), error)
}
