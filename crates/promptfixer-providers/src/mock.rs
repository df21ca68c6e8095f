//! Mock backend for offline use and testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use promptfixer_core::error::BackendError;
use promptfixer_core::model::PromptRequest;
use promptfixer_core::traits::PromptBackend;

const DEFAULT_FEEDBACK: &str = "Clear intent, but the prompt leaves the model guessing.\n\
Score: 6/10\n\
- Specify the target audience\n\
- Give an example of the desired output\n\
- State the expected length and format";

/// A scripted backend that never touches the network.
///
/// Score feedback is chosen by prompt substring; rewrites and runs echo the
/// prompt with the tone applied.
pub struct MockBackend {
    /// Map of prompt substring → scoring feedback.
    feedback: HashMap<String, String>,
    default_feedback: String,
    fail: bool,
    call_count: AtomicU32,
    last_request: Mutex<Option<PromptRequest>>,
}

impl MockBackend {
    pub fn new(feedback: HashMap<String, String>) -> Self {
        Self {
            feedback,
            default_feedback: DEFAULT_FEEDBACK.to_string(),
            fail: false,
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// A mock that returns the same feedback for every prompt.
    pub fn with_fixed_feedback(feedback: &str) -> Self {
        Self {
            default_feedback: feedback.to_string(),
            ..Self::new(HashMap::new())
        }
    }

    /// A mock whose every call fails with a network error.
    pub fn unreachable() -> Self {
        Self {
            fail: true,
            ..Self::new(HashMap::new())
        }
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    pub fn last_request(&self) -> Option<PromptRequest> {
        self.last_request.lock().ok().and_then(|r| r.clone())
    }

    fn record(&self, request: &PromptRequest) -> anyhow::Result<()> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }
        if self.fail {
            return Err(BackendError::NetworkError("mock backend is unreachable".into()).into());
        }
        Ok(())
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new(HashMap::new())
    }
}

#[async_trait]
impl PromptBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    async fn score(&self, request: &PromptRequest) -> anyhow::Result<String> {
        self.record(request)?;
        let feedback = self
            .feedback
            .iter()
            .find(|(key, _)| request.prompt.contains(key.as_str()))
            .map(|(_, v)| v.clone())
            .unwrap_or_else(|| self.default_feedback.clone());
        Ok(feedback)
    }

    async fn rewrite(&self, request: &PromptRequest) -> anyhow::Result<String> {
        self.record(request)?;
        Ok(format!(
            "[{}] {}\n\nBe specific about audience, format, and length.",
            request.mode, request.prompt
        ))
    }

    async fn run(&self, request: &PromptRequest) -> anyhow::Result<String> {
        self.record(request)?;
        Ok(format!("Mock {} response to: {}", request.mode, request.prompt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptfixer_core::model::ToneMode;

    #[tokio::test]
    async fn fixed_feedback() {
        let backend = MockBackend::with_fixed_feedback("Heading\n9/10\n- Nothing to add");
        let request = PromptRequest::new("anything", ToneMode::Creative);

        let feedback = backend.score(&request).await.unwrap();
        assert_eq!(feedback, "Heading\n9/10\n- Nothing to add");
        assert_eq!(backend.call_count(), 1);
        assert_eq!(backend.last_request(), Some(request));
    }

    #[tokio::test]
    async fn feedback_by_prompt_substring() {
        let mut feedback = HashMap::new();
        feedback.insert("poem".to_string(), "Poem review\nScore: 8".to_string());
        let backend = MockBackend::new(feedback);

        let poem = PromptRequest::new("Write a poem about rust", ToneMode::Creative);
        assert_eq!(backend.score(&poem).await.unwrap(), "Poem review\nScore: 8");

        let other = PromptRequest::new("Summarise this", ToneMode::Academic);
        assert_eq!(backend.score(&other).await.unwrap(), DEFAULT_FEEDBACK);
        assert_eq!(backend.call_count(), 2);
    }

    #[tokio::test]
    async fn rewrite_and_run_echo_tone() {
        let backend = MockBackend::default();
        let request = PromptRequest::new("Explain DNS", ToneMode::Technical);

        let rewritten = backend.rewrite(&request).await.unwrap();
        assert!(rewritten.starts_with("[Technical] Explain DNS"));
        let output = backend.run(&request).await.unwrap();
        assert_eq!(output, "Mock Technical response to: Explain DNS");
    }

    #[tokio::test]
    async fn unreachable_fails_every_call() {
        let backend = MockBackend::unreachable();
        let request = PromptRequest::new("Explain DNS", ToneMode::Technical);

        let err = backend.score(&request).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BackendError>(),
            Some(BackendError::NetworkError(_))
        ));
        assert!(backend.run(&request).await.is_err());
        assert_eq!(backend.call_count(), 2);
    }
}
