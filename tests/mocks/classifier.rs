use std::sync::{Arc, Mutex};
use tldw::{ContentClassifier, ContentType};

#[derive(Clone)]
pub struct MockClassifier {
    pub content_type: ContentType,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockClassifier {
    pub fn new(content_type: ContentType) -> Self {
        Self {
            content_type,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Behaves like a probe whose request never got a response
    pub fn unreachable() -> Self {
        Self::new(ContentType::Unknown)
    }
}

impl ContentClassifier for MockClassifier {
    async fn classify(&self, url: &str) -> ContentType {
        self.calls.lock().unwrap().push(url.to_string());
        self.content_type
    }
}
