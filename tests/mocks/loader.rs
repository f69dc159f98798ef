use std::sync::{Arc, Mutex};
use tldw::{ContentType, DocumentLoader, ExtractionError};

#[derive(Clone)]
pub struct MockLoader {
    pub text: String,
    pub calls: Arc<Mutex<Vec<(String, ContentType)>>>,
    pub fail_with: Option<String>,
}

impl MockLoader {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            text: String::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }
}

impl DocumentLoader for MockLoader {
    async fn load(&self, url: &str, content_type: ContentType) -> Result<String, ExtractionError> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), content_type));
        if let Some(ref msg) = self.fail_with {
            return Err(ExtractionError::NoTranscript(msg.clone()));
        }
        Ok(self.text.clone())
    }
}
