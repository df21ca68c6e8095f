//! promptfixer-core — Feedback parsing, data model, and session logic.
//!
//! This crate defines the data model, the scoring-feedback parser, the
//! backend and notification traits, and the prompt session controller that
//! the rest of promptfixer builds on.

pub mod demo;
pub mod error;
pub mod feedback;
pub mod model;
pub mod session;
pub mod traits;

pub use feedback::{parse_feedback, FALLBACK_SUGGESTION};
pub use model::{OutputData, OutputTab, PromptRequest, ScoreBand, ScoringResult, ToneMode};
