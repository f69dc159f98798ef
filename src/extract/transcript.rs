//! Video transcript extraction from YouTube caption tracks.
//!
//! The watch page embeds a `captionTracks` JSON array; the chosen track's
//! `baseUrl` serves the captions as `<transcript><text ..>..</text></transcript>`.

use super::{get_checked, ExtractionError, Extractor};
use reqwest::{Client, Url};
use scraper::{Html, Selector};
use serde::Deserialize;

const CAPTION_TRACKS_KEY: &str = "\"captionTracks\":";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTrack {
    pub base_url: String,
    #[serde(default)]
    pub language_code: String,
    /// `asr` for auto-generated captions
    #[serde(default)]
    pub kind: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TranscriptExtractor {
    client: Client,
    base_url: String,
}

impl TranscriptExtractor {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: "https://www.youtube.com".into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    async fn fetch_watch_page(&self, video_id: &str) -> Result<String, ExtractionError> {
        let response = self
            .client
            .get(format!("{}/watch?v={video_id}", self.base_url))
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ExtractionError::HttpStatus {
                status: response.status().as_u16(),
                url: response.url().to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

impl Extractor for TranscriptExtractor {
    #[tracing::instrument(skip(self))]
    async fn extract(&self, url: &str) -> Result<String, ExtractionError> {
        let video_id = video_id(url)
            .ok_or_else(|| ExtractionError::NoTranscript(format!("no video id in {url}")))?;

        let page = self.fetch_watch_page(&video_id).await?;
        let tracks = caption_tracks(&page);
        let track = select_track(&tracks).ok_or_else(|| {
            ExtractionError::NoTranscript(format!("video {video_id} has no captions"))
        })?;
        tracing::debug!(
            language = %track.language_code,
            generated = track.kind.is_some(),
            "Selected caption track"
        );

        let captions = get_checked(&self.client, &track.base_url)
            .await?
            .text()
            .await?;
        Ok(parse_captions(&captions))
    }
}

/// Pull the video id out of watch, short-link, shorts and embed URLs
pub fn video_id(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?.trim_start_matches("www.");

    let id = if host == "youtu.be" {
        parsed.path_segments()?.next().map(str::to_string)
    } else if host == "youtube.com" || host.ends_with(".youtube.com") {
        let mut segments = parsed.path_segments()?;
        match segments.next() {
            Some("watch") => parsed
                .query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.into_owned()),
            Some("shorts") | Some("embed") | Some("live") => segments.next().map(str::to_string),
            _ => None,
        }
    } else {
        None
    };

    id.filter(|id| !id.is_empty())
}

/// Parse the `captionTracks` array embedded in a watch page.
pub fn caption_tracks(page: &str) -> Vec<CaptionTrack> {
    let Some(start) = page.find(CAPTION_TRACKS_KEY) else {
        return Vec::new();
    };

    let json = &page[start + CAPTION_TRACKS_KEY.len()..];
    serde_json::Deserializer::from_str(json)
        .into_iter::<Vec<CaptionTrack>>()
        .next()
        .and_then(Result::ok)
        .unwrap_or_default()
}

/// English captions first, human-written before auto-generated.
pub fn select_track(tracks: &[CaptionTrack]) -> Option<&CaptionTrack> {
    let english = |track: &&CaptionTrack| track.language_code.starts_with("en");
    let manual = |track: &&CaptionTrack| track.kind.as_deref() != Some("asr");

    tracks
        .iter()
        .filter(english)
        .find(manual)
        .or_else(|| tracks.iter().find(english))
        .or_else(|| tracks.first())
}

/// Join the caption lines of a timedtext document into one block of text
pub fn parse_captions(xml: &str) -> String {
    let fragment = Html::parse_fragment(xml);
    let Ok(selector) = Selector::parse("text") else {
        return String::new();
    };

    fragment
        .select(&selector)
        .map(|line| decode_entities(&line.text().collect::<String>()))
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Caption text is often escaped twice; undo the second layer.
fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    Html::parse_fragment(text)
        .root_element()
        .text()
        .collect()
}
