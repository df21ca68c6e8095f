//! Scoring feedback parser.
//!
//! Turns the free-form text returned by the scoring endpoint into a
//! [`ScoringResult`]. Parsing never fails: missing data is replaced by a
//! default score and a single generic suggestion.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::ScoringResult;

/// Score used when no recognised score pattern is present.
pub const DEFAULT_SCORE: i64 = 5;

/// Maximum number of suggestions kept from the feedback.
pub const MAX_SUGGESTIONS: usize = 3;

/// Suggestion used when none can be extracted.
pub const FALLBACK_SUGGESTION: &str =
    "Review the feedback above for specific improvement recommendations";

// Digits are ASCII only, and a `-` directly after a digit is a range
// separator rather than a sign.
static SLASH_OR_OUT_OF_TEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[^0-9])(-?[0-9]+)\s*(?:/\s*10|out\s+of\s+10)").expect("valid regex")
});

static LABELED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:score|rating)\s*:\s*(-?[0-9]+)").expect("valid regex"));

static UNLABELED_OUT_OF_TEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:^|[^0-9])(-?[0-9]+)\s+out\s+of\s+10").expect("valid regex"));

/// A line that only restates the score, e.g. `8/10` or `Score: 7`.
static SCORE_ONLY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:(?:score|rating)\s*:\s*-?[0-9]+(?:\s*(?:/\s*10|out\s+of\s+10))?|-?[0-9]+\s*(?:/\s*10|out\s+of\s+10))[.!]?$",
    )
    .expect("valid regex")
});

type ScoreMatcher = fn(&str) -> Option<i64>;

/// Score matchers in priority order. The first one that yields a value wins.
const SCORE_MATCHERS: &[(&str, ScoreMatcher)] = &[
    ("slash_or_out_of_ten", match_slash_or_out_of_ten),
    ("labeled", match_labeled),
    ("unlabeled_out_of_ten", match_unlabeled_out_of_ten),
];

fn first_capture(re: &Regex, text: &str) -> Option<i64> {
    re.captures(text)?.get(1)?.as_str().parse().ok()
}

fn match_slash_or_out_of_ten(text: &str) -> Option<i64> {
    first_capture(&SLASH_OR_OUT_OF_TEN, text)
}

fn match_labeled(text: &str) -> Option<i64> {
    first_capture(&LABELED, text)
}

// Anything this accepts is already accepted by `match_slash_or_out_of_ten`;
// it stays as the last explicit format before the default.
fn match_unlabeled_out_of_ten(text: &str) -> Option<i64> {
    first_capture(&UNLABELED_OUT_OF_TEN, text)
}

/// Extract the score from the whole feedback text.
pub fn extract_score(feedback: &str) -> i64 {
    for (name, matcher) in SCORE_MATCHERS {
        if let Some(score) = matcher(feedback) {
            tracing::debug!(matcher = *name, score, "score extracted");
            return score;
        }
    }
    tracing::debug!(score = DEFAULT_SCORE, "no score pattern found, using default");
    DEFAULT_SCORE
}

/// Remove one leading `-` bullet marker and surrounding whitespace.
fn strip_bullet(line: &str) -> &str {
    let line = line.trim_start();
    line.strip_prefix('-').unwrap_or(line).trim()
}

fn is_score_only_line(line: &str) -> bool {
    SCORE_ONLY_LINE.is_match(strip_bullet(line))
}

/// Extract up to [`MAX_SUGGESTIONS`] suggestions, falling back to
/// [`FALLBACK_SUGGESTION`] when there are none.
///
/// The first non-blank line is treated as a heading and skipped, as are
/// lines that only restate the score.
pub fn extract_suggestions(feedback: &str) -> Vec<String> {
    let suggestions: Vec<String> = feedback
        .lines()
        .filter(|line| !line.trim().is_empty())
        .skip(1)
        .filter(|line| !is_score_only_line(line))
        .take(MAX_SUGGESTIONS)
        .map(strip_bullet)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if suggestions.is_empty() {
        vec![FALLBACK_SUGGESTION.to_string()]
    } else {
        suggestions
    }
}

/// Parse scoring feedback into a [`ScoringResult`].
pub fn parse_feedback(feedback: &str) -> ScoringResult {
    ScoringResult {
        score: extract_score(feedback),
        suggestions: extract_suggestions(feedback),
    }
}
