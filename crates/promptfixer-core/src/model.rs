//! Core data model types for promptfixer.
//!
//! These are the types shared by the parser, the session controller, the
//! backends, and the CLI.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Structured result extracted from scoring feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringResult {
    /// Extracted score. Conceptually 0..=10 but never clamped here.
    pub score: i64,
    /// Improvement suggestions in order of appearance. Never empty.
    pub suggestions: Vec<String>,
}

impl ScoringResult {
    /// Classify the score for display.
    pub fn band(&self) -> ScoreBand {
        ScoreBand::for_score(self.score)
    }
}

/// Display classification of a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Strong,
    Fair,
    Weak,
}

impl ScoreBand {
    pub fn for_score(score: i64) -> Self {
        if score >= 8 {
            ScoreBand::Strong
        } else if score >= 6 {
            ScoreBand::Fair
        } else {
            ScoreBand::Weak
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreBand::Strong => write!(f, "strong"),
            ScoreBand::Fair => write!(f, "fair"),
            ScoreBand::Weak => write!(f, "weak"),
        }
    }
}

/// Clamp a raw score onto the visual 0..=10 scale.
pub fn display_score(score: i64) -> u8 {
    score.clamp(0, 10) as u8
}

/// Rewriting style forwarded to the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToneMode {
    #[default]
    Creative,
    Academic,
    Technical,
}

impl ToneMode {
    pub const ALL: [ToneMode; 3] = [ToneMode::Creative, ToneMode::Academic, ToneMode::Technical];

    /// Short description of the style.
    pub fn description(&self) -> &'static str {
        match self {
            ToneMode::Creative => "Imaginative and engaging",
            ToneMode::Academic => "Formal and research-focused",
            ToneMode::Technical => "Precise and detailed",
        }
    }
}

impl fmt::Display for ToneMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToneMode::Creative => write!(f, "Creative"),
            ToneMode::Academic => write!(f, "Academic"),
            ToneMode::Technical => write!(f, "Technical"),
        }
    }
}

impl FromStr for ToneMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "creative" => Ok(ToneMode::Creative),
            "academic" => Ok(ToneMode::Academic),
            "technical" => Ok(ToneMode::Technical),
            other => Err(format!("unknown tone mode: {other}")),
        }
    }
}

/// JSON body sent to every backend endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptRequest {
    pub prompt: String,
    pub mode: ToneMode,
}

impl PromptRequest {
    pub fn new(prompt: impl Into<String>, mode: ToneMode) -> Self {
        Self {
            prompt: prompt.into(),
            mode,
        }
    }
}

/// Results accumulated over one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputData {
    #[serde(default)]
    pub scoring: Option<ScoringResult>,
    #[serde(default)]
    pub rewritten_prompt: Option<String>,
    #[serde(default)]
    pub ai_output: Option<String>,
}

impl OutputData {
    pub fn is_empty(&self) -> bool {
        self.scoring.is_none() && self.rewritten_prompt.is_none() && self.ai_output.is_none()
    }
}

/// The result panel populated by the most recent action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputTab {
    #[default]
    Scoring,
    Rewritten,
    Output,
}

impl fmt::Display for OutputTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputTab::Scoring => write!(f, "Analysis"),
            OutputTab::Rewritten => write!(f, "Rewrite"),
            OutputTab::Output => write!(f, "AI Output"),
        }
    }
}
