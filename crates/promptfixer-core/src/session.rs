//! Prompt session controller.
//!
//! A session holds the prompt being worked on, the chosen tone, and the
//! results of the analyze / rewrite / run actions. Each action validates the
//! prompt, calls the backend, stores the result, and emits a notification.
//! When the backend fails and demo fallback is enabled, canned demo content
//! is stored instead so the caller always has something to show.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::demo::{demo_output, demo_rewrite, demo_scoring};
use crate::error::{BackendError, SessionError};
use crate::feedback::parse_feedback;
use crate::model::{OutputData, OutputTab, PromptRequest, ToneMode};
use crate::traits::{Notification, Notifier, PromptBackend};

/// Maximum prompt length accepted by default, in characters.
pub const DEFAULT_MAX_PROMPT_LEN: usize = 1000;

/// The three user-triggered backend actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Analyze,
    Rewrite,
    Run,
}

impl Action {
    pub(crate) fn empty_prompt_message(&self) -> &'static str {
        match self {
            Action::Analyze => "Please enter a prompt to analyze",
            Action::Rewrite => "Please enter a prompt to rewrite",
            Action::Run => "Please enter a prompt or rewrite one first",
        }
    }

    fn success_message(&self) -> &'static str {
        match self {
            Action::Analyze => "Prompt analyzed successfully",
            Action::Rewrite => "Prompt rewritten successfully",
            Action::Run => "Prompt executed successfully",
        }
    }

    fn demo_message(&self) -> &'static str {
        match self {
            Action::Analyze => "Showing mock analysis results",
            Action::Rewrite => "Showing mock rewrite results",
            Action::Run => "Showing mock AI output",
        }
    }

    /// The result panel this action populates.
    pub fn tab(&self) -> OutputTab {
        match self {
            Action::Analyze => OutputTab::Scoring,
            Action::Rewrite => OutputTab::Rewritten,
            Action::Run => OutputTab::Output,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Analyze => write!(f, "analyze"),
            Action::Rewrite => write!(f, "rewrite"),
            Action::Run => write!(f, "run"),
        }
    }
}

/// Session behaviour knobs.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Substitute demo content when the backend fails.
    pub demo_fallback: bool,
    /// Reject prompts longer than this many characters.
    pub max_prompt_len: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            demo_fallback: true,
            max_prompt_len: DEFAULT_MAX_PROMPT_LEN,
        }
    }
}

/// What a completed action produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub action: Action,
    /// `true` when the stored result is demo content rather than a backend reply.
    pub demo: bool,
}

/// Interactive state for one prompt.
///
/// Actions take `&mut self`, so a session never has more than one request
/// in flight.
pub struct PromptSession<'a> {
    backend: &'a dyn PromptBackend,
    notifier: &'a dyn Notifier,
    options: SessionOptions,
    prompt: String,
    tone: ToneMode,
    output: OutputData,
    active_tab: OutputTab,
}

impl<'a> PromptSession<'a> {
    pub fn new(
        backend: &'a dyn PromptBackend,
        notifier: &'a dyn Notifier,
        options: SessionOptions,
    ) -> Self {
        Self {
            backend,
            notifier,
            options,
            prompt: String::new(),
            tone: ToneMode::default(),
            output: OutputData::default(),
            active_tab: OutputTab::default(),
        }
    }

    /// Replace the prompt. Results from a different prompt are discarded.
    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        let prompt = prompt.into();
        if prompt != self.prompt {
            self.output = OutputData::default();
            self.active_tab = OutputTab::default();
        }
        self.prompt = prompt;
    }

    pub fn set_tone(&mut self, tone: ToneMode) {
        self.tone = tone;
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn tone(&self) -> ToneMode {
        self.tone
    }

    pub fn output(&self) -> &OutputData {
        &self.output
    }

    pub fn active_tab(&self) -> OutputTab {
        self.active_tab
    }

    /// Score the current prompt and store the parsed analysis.
    #[tracing::instrument(skip(self), fields(backend = self.backend.name(), tone = %self.tone))]
    pub async fn analyze(&mut self) -> Result<ActionOutcome, SessionError> {
        let request = self.request_for(Action::Analyze, &self.prompt, true)?;
        let (scoring, demo) = match self.backend.score(&request).await {
            Ok(feedback) => (parse_feedback(&feedback), false),
            Err(e) => {
                self.fall_back(Action::Analyze, e)?;
                (demo_scoring(), true)
            }
        };
        tracing::debug!(score = scoring.score, demo, "analysis stored");
        self.output.scoring = Some(scoring);
        Ok(self.finish(Action::Analyze, demo))
    }

    /// Rewrite the current prompt in the selected tone.
    #[tracing::instrument(skip(self), fields(backend = self.backend.name(), tone = %self.tone))]
    pub async fn rewrite(&mut self) -> Result<ActionOutcome, SessionError> {
        let request = self.request_for(Action::Rewrite, &self.prompt, true)?;
        let (rewritten, demo) = match self.backend.rewrite(&request).await {
            Ok(text) => (text, false),
            Err(e) => {
                self.fall_back(Action::Rewrite, e)?;
                (demo_rewrite(&request.prompt, request.mode), true)
            }
        };
        self.output.rewritten_prompt = Some(rewritten);
        Ok(self.finish(Action::Rewrite, demo))
    }

    /// Execute the rewritten prompt, or the original one if there is no rewrite.
    #[tracing::instrument(skip(self), fields(backend = self.backend.name(), tone = %self.tone))]
    pub async fn run(&mut self) -> Result<ActionOutcome, SessionError> {
        // Rewrites come from the backend and are not subject to the input limit.
        let request = match self.output.rewritten_prompt.as_deref() {
            Some(rewritten) if !rewritten.is_empty() => {
                self.request_for(Action::Run, rewritten, false)?
            }
            _ => self.request_for(Action::Run, &self.prompt, true)?,
        };
        let (output, demo) = match self.backend.run(&request).await {
            Ok(text) => (text, false),
            Err(e) => {
                self.fall_back(Action::Run, e)?;
                (demo_output(&request.prompt, request.mode), true)
            }
        };
        self.output.ai_output = Some(output);
        Ok(self.finish(Action::Run, demo))
    }

    fn request_for(
        &self,
        action: Action,
        prompt: &str,
        limit_length: bool,
    ) -> Result<PromptRequest, SessionError> {
        if prompt.trim().is_empty() {
            let err = SessionError::EmptyPrompt(action);
            self.notifier.notify(&Notification::error(err.to_string()));
            return Err(err);
        }

        let len = prompt.chars().count();
        if limit_length && len > self.options.max_prompt_len {
            let err = SessionError::PromptTooLong {
                len,
                max: self.options.max_prompt_len,
            };
            self.notifier.notify(&Notification::error(err.to_string()));
            return Err(err);
        }

        Ok(PromptRequest::new(prompt, self.tone))
    }

    fn fall_back(&self, action: Action, error: anyhow::Error) -> Result<(), SessionError> {
        let hint = backend_hint(&error);
        if self.options.demo_fallback {
            tracing::warn!(
                hint = hint.as_deref(),
                "backend failed to {action} prompt, using demo content: {error:#}"
            );
            return Ok(());
        }
        let err = SessionError::Backend {
            action,
            cause: error,
        };
        let message = match hint {
            Some(hint) => format!("{err}; {hint}"),
            None => err.to_string(),
        };
        self.notifier.notify(&Notification::error(message));
        Err(err)
    }

    fn finish(&mut self, action: Action, demo: bool) -> ActionOutcome {
        self.active_tab = action.tab();
        let notification = if demo {
            Notification::success("Demo Mode", action.demo_message())
        } else {
            Notification::success("Success", action.success_message())
        };
        self.notifier.notify(&notification);
        ActionOutcome { action, demo }
    }
}

/// What the user can do about a backend failure, if anything specific.
fn backend_hint(error: &anyhow::Error) -> Option<String> {
    let backend_error = error.downcast_ref::<BackendError>()?;
    if backend_error.is_permanent() {
        return Some("check the backend URL and API key".to_string());
    }
    backend_error
        .retry_after_ms()
        .map(|ms| format!("retry in {}s", ms.div_ceil(1000)))
}
