//! PDF extraction: download the document, then read its text layer.

use super::{get_checked, ExtractionError, Extractor};
use reqwest::Client;

#[derive(Debug, Clone)]
pub struct PdfExtractor {
    client: Client,
}

impl PdfExtractor {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl Extractor for PdfExtractor {
    #[tracing::instrument(skip(self))]
    async fn extract(&self, url: &str) -> Result<String, ExtractionError> {
        let bytes = get_checked(&self.client, url).await?.bytes().await?;
        tracing::debug!(bytes = bytes.len(), "Downloaded PDF");

        // pdf-extract is CPU bound; keep it off the async workers
        let text = tokio::task::spawn_blocking(move || pdf_text(&bytes))
            .await
            .map_err(|e| ExtractionError::PdfError(e.to_string()))??;

        Ok(normalize_pdf_text(&text))
    }
}

fn pdf_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    pdf_extract::extract_text_from_mem(bytes)
        .inspect_err(|e| tracing::error!(error = %e, "Failed to read PDF text layer"))
        .map_err(|e| ExtractionError::PdfError(e.to_string()))
}

/// Collapse the ragged line breaks pdf-extract produces into paragraphs.
///
/// Single newlines become spaces, blank lines separate paragraphs and form
/// feeds (page breaks) are treated as blank lines.
fn normalize_pdf_text(raw: &str) -> String {
    raw.replace('\u{c}', "\n\n")
        .split("\n\n")
        .map(|paragraph| paragraph.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|paragraph| !paragraph.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}
