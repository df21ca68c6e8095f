//! Terminal rendering for session results.

use anyhow::Result;
use serde::Serialize;

use promptfixer_core::model::{display_score, OutputData, ScoringResult, ToneMode};
use promptfixer_core::session::{Action, ActionOutcome, PromptSession};

use crate::commands::OutputFormat;

#[derive(Serialize)]
struct SessionReport<'a> {
    tone: ToneMode,
    outcomes: &'a [ActionOutcome],
    #[serde(flatten)]
    output: &'a OutputData,
}

pub fn print_session(
    session: &PromptSession<'_>,
    outcomes: &[ActionOutcome],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let report = SessionReport {
                tone: session.tone(),
                outcomes,
                output: session.output(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            let output = session.output();
            for (i, outcome) in outcomes.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                let demo = if outcome.demo { " [demo]" } else { "" };
                println!("== {}{demo} ==", outcome.action.tab());
                match outcome.action {
                    Action::Analyze => {
                        if let Some(scoring) = &output.scoring {
                            print!("{}", scoring_text(scoring));
                        }
                    }
                    Action::Rewrite => {
                        if let Some(text) = &output.rewritten_prompt {
                            println!("{text}");
                        }
                    }
                    Action::Run => {
                        if let Some(text) = &output.ai_output {
                            println!("{text}");
                        }
                    }
                }
            }
        }
    }
    Ok(())
}

pub fn print_scoring(scoring: &ScoringResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(scoring)?),
        OutputFormat::Text => print!("{}", scoring_text(scoring)),
    }
    Ok(())
}

/// Score line, a ten-cell bar, and the numbered suggestions.
pub fn scoring_text(scoring: &ScoringResult) -> String {
    let filled = display_score(scoring.score) as usize;
    let mut out = format!(
        "Score: {}/10 ({})\n[{}{}]\nSuggestions:\n",
        scoring.score,
        scoring.band(),
        "#".repeat(filled),
        "-".repeat(10 - filled),
    );
    for (i, suggestion) in scoring.suggestions.iter().enumerate() {
        out.push_str(&format!("  {}. {suggestion}\n", i + 1));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoring_text_layout() {
        let scoring = ScoringResult {
            score: 7,
            suggestions: vec!["Add examples".into(), "Be more specific".into()],
        };
        assert_eq!(
            scoring_text(&scoring),
            "Score: 7/10 (fair)\n[#######---]\nSuggestions:\n  1. Add examples\n  2. Be more specific\n"
        );
    }

    #[test]
    fn scoring_bar_is_clamped() {
        let high = ScoringResult {
            score: 42,
            suggestions: vec!["x".into()],
        };
        assert!(scoring_text(&high).contains("Score: 42/10 (strong)\n[##########]"));

        let low = ScoringResult {
            score: -4,
            suggestions: vec!["x".into()],
        };
        assert!(scoring_text(&low).contains("[----------]"));
    }
}
