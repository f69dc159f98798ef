use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tldw::{SpeechSynthesizer, SynthesisError, Voice};

#[derive(Clone)]
pub struct MockSpeech {
    pub calls: Arc<Mutex<Vec<(String, Voice)>>>,
    pub fail_with: Option<u16>,
}

impl MockSpeech {
    pub fn working() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(status),
        }
    }
}

impl SpeechSynthesizer for MockSpeech {
    async fn synthesize(&self, text: &str, voice: Voice) -> Result<PathBuf, SynthesisError> {
        self.calls.lock().unwrap().push((text.to_string(), voice));
        match self.fail_with {
            Some(status) => Err(SynthesisError::Api {
                status,
                message: "speech service unavailable".into(),
            }),
            None => Ok(PathBuf::from("audio_temp/summary.mp3")),
        }
    }
}
