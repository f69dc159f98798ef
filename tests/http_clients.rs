use std::time::Duration;
use tldw::extract::{create_client, PdfExtractor, TranscriptExtractor, WebPageExtractor};
use tldw::{
    ChatCompletionsClient, CompletionClient, CompletionError, ContentClassifier, ContentType,
    CreativityLevel, ExtractionError, Extractor, HttpClassifier, OpenAiSpeech, SpeechSynthesizer,
    SynthesisError, Voice,
};
use wiremock::{
    matchers::{body_partial_json, header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

const TIMEOUT: Duration = Duration::from_secs(5);

// ─── Classification ──────────────────────────────────────────────────────────

async fn classify_with_header(content_type: Option<&str>) -> ContentType {
    let mock_server = MockServer::start().await;

    let mut response = ResponseTemplate::new(200);
    if let Some(content_type) = content_type {
        response = response.insert_header("Content-Type", content_type);
    }
    Mock::given(method("HEAD"))
        .and(path("/resource"))
        .respond_with(response)
        .expect(1)
        .mount(&mock_server)
        .await;

    let classifier = HttpClassifier::new().unwrap();
    classifier
        .classify(&format!("{}/resource", mock_server.uri()))
        .await
}

#[tokio::test]
async fn test_html_is_a_web_page() {
    assert_eq!(
        classify_with_header(Some("text/html; charset=utf-8")).await,
        ContentType::WebPage
    );
}

#[tokio::test]
async fn test_pdf_is_a_pdf_document() {
    assert_eq!(
        classify_with_header(Some("application/pdf")).await,
        ContentType::PdfDocument
    );
}

#[tokio::test]
async fn test_video_marker_is_a_transcript() {
    assert_eq!(
        classify_with_header(Some("video/x-youtube-vid")).await,
        ContentType::VideoTranscript
    );
}

#[tokio::test]
async fn test_other_or_missing_types_are_unknown() {
    assert_eq!(
        classify_with_header(Some("application/json")).await,
        ContentType::Unknown
    );
    assert_eq!(classify_with_header(None).await, ContentType::Unknown);
}

#[tokio::test]
async fn test_network_failure_is_unknown() {
    let mock_server = MockServer::start().await;
    let url = format!("{}/gone", mock_server.uri());
    drop(mock_server);

    let classifier = HttpClassifier::new().unwrap();
    assert_eq!(classifier.classify(&url).await, ContentType::Unknown);
}

// ─── Completion ──────────────────────────────────────────────────────────────

fn completion_client(uri: &str) -> ChatCompletionsClient {
    ChatCompletionsClient::new("test-key", "test-model", TIMEOUT)
        .unwrap()
        .with_base_url(uri)
}

fn prompt() -> tldw::PromptPayload {
    tldw::prompt::build_summary_prompt("Quarterly revenue grew 12%.").unwrap()
}

#[tokio::test]
async fn test_completion_sends_model_temperature_and_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(serde_json::json!({
            "model": "test-model",
            "temperature": 0.5,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "cmpl-1",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": "Revenue grew 12%." },
                "finish_reason": "stop"
            }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = completion_client(&mock_server.uri());
    let temperature = CreativityLevel::new(5).unwrap().temperature();
    let text = client.complete(&prompt(), temperature).await.unwrap();

    assert_eq!(text, "Revenue grew 12%.");
}

#[tokio::test]
async fn test_completion_api_error_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = completion_client(&mock_server.uri());
    let result = client
        .complete(&prompt(), CreativityLevel::default().temperature())
        .await;

    match result {
        Err(CompletionError::Api { status, message }) => {
            assert_eq!(status, 429);
            assert_eq!(message, "rate limited");
        }
        other => panic!("expected an API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_completion_without_content_is_malformed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })),
        )
        .mount(&mock_server)
        .await;

    let client = completion_client(&mock_server.uri());
    let result = client
        .complete(&prompt(), CreativityLevel::default().temperature())
        .await;
    assert!(matches!(result, Err(CompletionError::Malformed(_))));
}

// ─── Extraction ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_web_page_extraction() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/article"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(
                    "<html><head><title>Results</title></head><body><main>\
                     <p>Quarterly revenue grew 12% year over year.</p></main></body></html>",
                )
                .insert_header("Content-Type", "text/html; charset=utf-8"),
        )
        .mount(&mock_server)
        .await;

    let extractor = WebPageExtractor::new(create_client().unwrap());
    let text = extractor
        .extract(&format!("{}/article", mock_server.uri()))
        .await
        .unwrap();

    assert_eq!(text, "Results\n\nQuarterly revenue grew 12% year over year.");
}

#[tokio::test]
async fn test_web_page_404_is_an_extraction_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let extractor = WebPageExtractor::new(create_client().unwrap());
    let result = extractor
        .extract(&format!("{}/missing", mock_server.uri()))
        .await;

    assert!(matches!(
        result,
        Err(ExtractionError::HttpStatus { status: 404, .. })
    ));
}

#[tokio::test]
async fn test_pdf_that_is_not_a_pdf_is_an_extraction_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/paper.pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(b"<html>not a pdf</html>".to_vec())
                .insert_header("Content-Type", "application/pdf"),
        )
        .mount(&mock_server)
        .await;

    let extractor = PdfExtractor::new(create_client().unwrap());
    let result = extractor
        .extract(&format!("{}/paper.pdf", mock_server.uri()))
        .await;

    assert!(matches!(result, Err(ExtractionError::PdfError(_))));
}

#[tokio::test]
async fn test_transcript_extraction_follows_caption_track() {
    let mock_server = MockServer::start().await;
    let captions_url = format!("{}/api/timedtext?v=abc123&lang=en", mock_server.uri());

    let watch_page = format!(
        r#"<html><script>var ytInitialPlayerResponse = {{"captions":{{"playerCaptionsTracklistRenderer":{{"captionTracks":[{{"baseUrl":"{captions_url}","languageCode":"en"}}]}}}}}};</script></html>"#
    );

    Mock::given(method("GET"))
        .and(path("/watch"))
        .and(query_param("v", "abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_string(watch_page))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/timedtext"))
        .and(query_param("lang", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<?xml version="1.0" encoding="utf-8" ?><transcript><text start="0" dur="2">Quarterly revenue</text><text start="2" dur="2">grew 12%.</text></transcript>"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let extractor = TranscriptExtractor::new(create_client().unwrap())
        .with_base_url(mock_server.uri());
    let text = extractor
        .extract("https://www.youtube.com/watch?v=abc123")
        .await
        .unwrap();

    assert_eq!(text, "Quarterly revenue grew 12%.");
}

#[tokio::test]
async fn test_video_without_captions() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/watch"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&mock_server)
        .await;

    let extractor = TranscriptExtractor::new(create_client().unwrap())
        .with_base_url(mock_server.uri());
    let result = extractor.extract("https://youtu.be/abc123").await;

    assert!(matches!(result, Err(ExtractionError::NoTranscript(_))));
}

// ─── Speech ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_speech_writes_one_fresh_mp3() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/audio/speech"))
        .and(header("authorization", "Bearer speech-key"))
        .and(body_partial_json(serde_json::json!({
            "model": "tts-1",
            "voice": "echo",
            "input": "Revenue grew 12%.",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ID3fake-mp3".to_vec()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let root = tempfile::tempdir().unwrap();
    let scratch = root.path().join("audio_temp");
    std::fs::create_dir_all(&scratch).unwrap();
    std::fs::write(scratch.join("previous.mp3"), b"stale").unwrap();

    let speech = OpenAiSpeech::new("speech-key", &scratch, TIMEOUT)
        .unwrap()
        .with_base_url(mock_server.uri());
    let path = speech
        .synthesize("Revenue grew 12%.", Voice::Echo)
        .await
        .unwrap();

    assert_eq!(path.parent(), Some(scratch.as_path()));
    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("mp3"));
    assert_eq!(std::fs::read(&path).unwrap(), b"ID3fake-mp3");
    assert!(!scratch.join("previous.mp3").exists());
    assert_eq!(std::fs::read_dir(&scratch).unwrap().count(), 1);
}

#[tokio::test]
async fn test_speech_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/audio/speech"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&mock_server)
        .await;

    let root = tempfile::tempdir().unwrap();
    let speech = OpenAiSpeech::new("wrong", root.path().join("audio_temp"), TIMEOUT)
        .unwrap()
        .with_base_url(mock_server.uri());
    let result = speech.synthesize("text", Voice::Alloy).await;

    assert!(matches!(
        result,
        Err(SynthesisError::Api { status: 401, .. })
    ));
}
