//! Canned results shown when the backend is unreachable.

use rand::Rng;

use crate::model::{ScoringResult, ToneMode};

pub const DEMO_SUGGESTIONS: [&str; 3] = [
    "Add more specific context to improve clarity",
    "Consider including examples for better results",
    "The tone could be more engaging for the target audience",
];

/// A plausible-looking analysis with a score in 6..=9.
pub fn demo_scoring() -> ScoringResult {
    ScoringResult {
        score: rand::rng().random_range(6..=9),
        suggestions: DEMO_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn demo_rewrite(prompt: &str, tone: ToneMode) -> String {
    format!(
        "Enhanced {} version: {prompt}\n\n\
         Please provide a comprehensive response that includes specific examples, \
         detailed explanations, and actionable insights. Structure your answer with \
         clear headings and bullet points where appropriate.",
        tone.to_string().to_lowercase()
    )
}

pub fn demo_output(prompt: &str, tone: ToneMode) -> String {
    format!(
        "Here's a {} response to your prompt:\n\n{prompt}\n\n\
         This is a demonstration of how the AI would respond to your optimized prompt. \
         The actual implementation would connect to OpenAI's API to generate real \
         responses based on your requirements.",
        tone.to_string().to_lowercase()
    )
}
