//! Extractors turning a URL into plain text, one per content type.

pub mod pdf;
pub mod transcript;
pub mod web;

pub use pdf::PdfExtractor;
pub use transcript::TranscriptExtractor;
pub use web::WebPageExtractor;

use crate::content::ContentType;
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Default timeout for extraction requests
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("failed to fetch URL: {0}")]
    FetchError(#[from] reqwest::Error),
    #[error("server answered {status} for {url}")]
    HttpStatus { status: u16, url: String },
    #[error("failed to read PDF: {0}")]
    PdfError(String),
    #[error("no transcript available: {0}")]
    NoTranscript(String),
    #[error("no extractor for content of type {0}")]
    Unsupported(ContentType),
}

/// Converts the content behind a URL into plain text.
pub trait Extractor {
    fn extract(&self, url: &str) -> impl Future<Output = Result<String, ExtractionError>>;
}

/// Routes a classified URL to the extractor for its content type.
pub trait DocumentLoader {
    fn load(
        &self,
        url: &str,
        content_type: ContentType,
    ) -> impl Future<Output = Result<String, ExtractionError>>;
}

/// One extractor per content type.
#[derive(Debug, Clone)]
pub struct ExtractorSet<W, P, V> {
    pub web: W,
    pub pdf: P,
    pub video: V,
}

impl ExtractorSet<WebPageExtractor, PdfExtractor, TranscriptExtractor> {
    /// The network-backed extractors sharing one HTTP client
    pub fn http() -> Result<Self, reqwest::Error> {
        let client = create_client()?;
        Ok(Self {
            web: WebPageExtractor::new(client.clone()),
            pdf: PdfExtractor::new(client.clone()),
            video: TranscriptExtractor::new(client),
        })
    }
}

impl<W, P, V> DocumentLoader for ExtractorSet<W, P, V>
where
    W: Extractor,
    P: Extractor,
    V: Extractor,
{
    async fn load(&self, url: &str, content_type: ContentType) -> Result<String, ExtractionError> {
        match content_type {
            ContentType::WebPage => self.web.extract(url).await,
            ContentType::PdfDocument => self.pdf.extract(url).await,
            ContentType::VideoTranscript => self.video.extract(url).await,
            ContentType::Unknown => Err(ExtractionError::Unsupported(content_type)),
        }
    }
}

/// Create a configured HTTP client for extraction
pub fn create_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(crate::content::USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()
}

/// GET `url` and fail on non-success statuses.
pub(crate) async fn get_checked(
    client: &Client,
    url: &str,
) -> Result<reqwest::Response, ExtractionError> {
    let response = client
        .get(url)
        .send()
        .await
        .inspect_err(|e| tracing::error!(error = %e, url, "Failed to make http request"))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ExtractionError::HttpStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    Ok(response)
}
