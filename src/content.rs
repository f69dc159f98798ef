//! Content-type classification and the extracted source document.
//!
//! Classification is a heuristic: a HEAD request is sent and the declared
//! `Content-Type` header decides which extractor handles the URL.

use reqwest::Client;
use serde::Serialize;
use std::fmt;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Media-type marker used for video links
const VIDEO_MARKER: &str = "video/x-youtube-vid";

const PROBE_TIMEOUT: Duration = Duration::from_secs(15);

/// User-Agent string sent by every outbound fetch
pub(crate) const USER_AGENT: &str = concat!("tldw/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    WebPage,
    PdfDocument,
    VideoTranscript,
    Unknown,
}

impl ContentType {
    /// Map a declared media type (e.g. `text/html; charset=utf-8`).
    pub fn from_media_type(media_type: &str) -> Self {
        let media_type = media_type.to_ascii_lowercase();
        if media_type.contains("text/html") {
            ContentType::WebPage
        } else if media_type.contains("application/pdf") {
            ContentType::PdfDocument
        } else if media_type.contains(VIDEO_MARKER) {
            ContentType::VideoTranscript
        } else {
            ContentType::Unknown
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ContentType::WebPage => "web page",
            ContentType::PdfDocument => "PDF document",
            ContentType::VideoTranscript => "video transcript",
            ContentType::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// Decides which kind of content a URL points at.
///
/// Implementations never fail: anything inconclusive is `ContentType::Unknown`.
pub trait ContentClassifier {
    fn classify(&self, url: &str) -> impl Future<Output = ContentType>;
}

/// Classifier backed by a HEAD request.
#[derive(Debug, Clone)]
pub struct HttpClassifier {
    client: Client,
}

impl HttpClassifier {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(PROBE_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }
}

impl ContentClassifier for HttpClassifier {
    #[tracing::instrument(skip(self))]
    async fn classify(&self, url: &str) -> ContentType {
        let response = match self.client.head(url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Content-type probe failed");
                return ContentType::Unknown;
            }
        };

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(ContentType::from_media_type)
            .unwrap_or(ContentType::Unknown);

        tracing::debug!(status = %response.status(), %content_type, "Classified URL");
        content_type
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DocumentError {
    #[error("cannot build a document for content of unknown type")]
    UnknownContentType,
}

/// Text extracted from a classified URL.
///
/// Immutable once built. Empty text is representable so that the
/// summarisation stage can refuse it before any completion call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceDocument {
    url: String,
    content_type: ContentType,
    text: String,
}

impl SourceDocument {
    pub fn new(
        url: impl Into<String>,
        content_type: ContentType,
        text: impl Into<String>,
    ) -> Result<Self, DocumentError> {
        if content_type == ContentType::Unknown {
            return Err(DocumentError::UnknownContentType);
        }

        Ok(Self {
            url: url.into(),
            content_type,
            text: text.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Cut `text` to at most `max_chars` characters on a char boundary.
///
/// Returns the input unchanged when it already fits.
pub fn truncate_chars(text: String, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => {
            tracing::warn!(
                original_chars = text.chars().count(),
                max_chars,
                "Source text truncated"
            );
            text[..byte_index].to_string()
        }
        None => text,
    }
}
