use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tldw::{CompletionClient, CompletionError, PromptPayload, Temperature};

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionCall {
    pub prompt: String,
    pub temperature: f64,
}

/// Answers completion calls from a script, in order
#[derive(Clone)]
pub struct MockCompletion {
    pub responses: Arc<Mutex<VecDeque<Result<String, String>>>>,
    pub calls: Arc<Mutex<Vec<CompletionCall>>>,
}

impl MockCompletion {
    pub fn new(responses: Vec<Result<&str, &str>>) -> Self {
        let responses = responses
            .into_iter()
            .map(|r| r.map(str::to_string).map_err(str::to_string))
            .collect();
        Self {
            responses: Arc::new(Mutex::new(responses)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A summary followed by a grader response
    pub fn summary_then_verdict(summary: &str, verdict: &str) -> Self {
        Self::new(vec![Ok(summary), Ok(verdict)])
    }
}

impl CompletionClient for MockCompletion {
    async fn complete(
        &self,
        prompt: &PromptPayload,
        temperature: Temperature,
    ) -> Result<String, CompletionError> {
        self.calls.lock().unwrap().push(CompletionCall {
            prompt: prompt.as_str().to_string(),
            temperature: temperature.value(),
        });

        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(CompletionError::Api {
                status: 429,
                message,
            }),
            None => Err(CompletionError::Malformed("no scripted response".into())),
        }
    }
}
