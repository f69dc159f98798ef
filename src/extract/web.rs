//! HTML page extraction.
//!
//! Uses reqwest for fetching and scraper for HTML parsing.

use super::{get_checked, ExtractionError, Extractor};
use reqwest::Client;
use scraper::{Html, Selector};

/// Containers tried, in order, before falling back to the whole body
const MAIN_SELECTORS: [&str; 5] = ["article", "main", "[role='main']", ".content", "#content"];

/// Blocks shorter than this are navigation crumbs, not prose
const MIN_BLOCK_CHARS: usize = 20;

#[derive(Debug, Clone)]
pub struct WebPageExtractor {
    client: Client,
}

impl WebPageExtractor {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl Extractor for WebPageExtractor {
    #[tracing::instrument(skip(self))]
    async fn extract(&self, url: &str) -> Result<String, ExtractionError> {
        let html = get_checked(&self.client, url).await?.text().await?;
        let document = Html::parse_document(&html);

        let mut text = String::new();
        if let Some(title) = extract_title(&document) {
            text.push_str(&title);
            text.push_str("\n\n");
        }
        text.push_str(&extract_text(&document));

        tracing::debug!(chars = text.len(), "Extracted web page");
        Ok(text)
    }
}

/// Extract the page title from <title> or <h1>
pub fn extract_title(document: &Html) -> Option<String> {
    ["title", "h1"].into_iter().find_map(|tag| {
        let selector = Selector::parse(tag).ok()?;
        let element = document.select(&selector).next()?;
        let title = element.text().collect::<String>();
        let title = title.trim();
        (!title.is_empty()).then(|| title.to_string())
    })
}

/// Extract readable text, preferring the main content area
pub fn extract_text(document: &Html) -> String {
    for selector_str in MAIN_SELECTORS {
        if let Ok(selector) = Selector::parse(selector_str) {
            if let Some(element) = document.select(&selector).next() {
                let text = extract_text_from_element(&Html::parse_fragment(&element.html()));
                if !text.trim().is_empty() {
                    return text;
                }
            }
        }
    }

    // Fall back to the body; script and style never match the block selector
    extract_text_from_element(document)
}

/// Extract text from paragraphs, headings and list items
fn extract_text_from_element(document: &Html) -> String {
    let Ok(content_selector) = Selector::parse("p, h1, h2, h3, h4, h5, h6, li") else {
        return String::new();
    };

    document
        .select(&content_selector)
        .map(|element| {
            element
                .text()
                .flat_map(str::split_whitespace)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|block| block.len() > MIN_BLOCK_CHARS)
        .collect::<Vec<_>>()
        .join("\n\n")
}
