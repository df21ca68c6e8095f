//! CLI integration tests using assert_cmd.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn promptfixer() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("promptfixer").unwrap()
}

/// Write a config selecting the scripted mock backend.
fn mock_config(dir: &TempDir, feedback: Option<&str>) -> PathBuf {
    let path = dir.path().join("promptfixer.toml");
    let mut content = String::from("[backend]\ntype = \"mock\"\n");
    if let Some(text) = feedback {
        content.push_str(&format!("feedback = {}\n", toml_string(text)));
    }
    std::fs::write(&path, content).unwrap();
    path
}

/// Write a config pointing at a port nothing listens on.
fn unreachable_config(dir: &TempDir, demo_fallback: bool) -> PathBuf {
    let path = dir.path().join("promptfixer.toml");
    std::fs::write(
        &path,
        format!(
            "demo_fallback = {demo_fallback}\n[backend]\ntype = \"http\"\nbase_url = \"http://127.0.0.1:1\"\ntimeout_secs = 5\n"
        ),
    )
    .unwrap();
    path
}

fn toml_string(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n"))
}

#[test]
fn parse_from_file() {
    let dir = TempDir::new().unwrap();
    let feedback = dir.path().join("feedback.txt");
    std::fs::write(
        &feedback,
        "Great prompt!\n8/10\n- Add examples\n- Be more specific\n",
    )
    .unwrap();

    promptfixer()
        .arg("parse")
        .arg("--file")
        .arg(&feedback)
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 8/10 (strong)"))
        .stdout(predicate::str::contains("1. Add examples"))
        .stdout(predicate::str::contains("2. Be more specific"));
}

#[test]
fn parse_from_stdin_as_json() {
    let output = promptfixer()
        .arg("parse")
        .arg("--format")
        .arg("json")
        .write_stdin("Score: 7\nSuggestion one\nSuggestion two\nSuggestion three\nSuggestion four")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["score"], 7);
    assert_eq!(
        value["suggestions"],
        serde_json::json!(["Suggestion one", "Suggestion two", "Suggestion three"])
    );
}

#[test]
fn parse_empty_input_uses_defaults() {
    promptfixer()
        .arg("parse")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 5/10"))
        .stdout(predicate::str::contains(
            "Review the feedback above for specific improvement recommendations",
        ));
}

#[test]
fn parse_nonexistent_file() {
    promptfixer()
        .arg("parse")
        .arg("--file")
        .arg("no_such_feedback.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn analyze_with_mock_backend() {
    let dir = TempDir::new().unwrap();
    let config = mock_config(&dir, Some("Review\nRating: 9/10\n- Mention the audience"));

    promptfixer()
        .arg("analyze")
        .arg("--config")
        .arg(&config)
        .arg("--prompt")
        .arg("Write a blog intro about AI in marketing")
        .assert()
        .success()
        .stdout(predicate::str::contains("== Analysis =="))
        .stdout(predicate::str::contains("Score: 9/10"))
        .stdout(predicate::str::contains("1. Mention the audience"))
        .stderr(predicate::str::contains("Prompt analyzed successfully"));
}

#[test]
fn rewrite_uses_requested_tone() {
    let dir = TempDir::new().unwrap();
    let config = mock_config(&dir, None);

    promptfixer()
        .arg("rewrite")
        .arg("--config")
        .arg(&config)
        .arg("--tone")
        .arg("academic")
        .arg("--prompt")
        .arg("Explain DNS")
        .assert()
        .success()
        .stdout(predicate::str::contains("[Academic] Explain DNS"));
}

#[test]
fn fix_runs_all_three_actions_as_json() {
    let dir = TempDir::new().unwrap();
    let config = mock_config(&dir, None);

    let output = promptfixer()
        .arg("fix")
        .arg("--config")
        .arg(&config)
        .arg("--tone")
        .arg("technical")
        .arg("--format")
        .arg("json")
        .write_stdin("Explain DNS\n")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["tone"], "Technical");
    assert_eq!(value["outcomes"].as_array().unwrap().len(), 3);
    assert_eq!(value["scoring"]["score"], 6);
    let output = value["ai_output"].as_str().unwrap();
    assert!(output.starts_with("Mock Technical response to: [Technical] Explain DNS"));
}

#[test]
fn blank_prompt_fails() {
    let dir = TempDir::new().unwrap();
    let config = mock_config(&dir, None);

    promptfixer()
        .arg("analyze")
        .arg("--config")
        .arg(&config)
        .arg("--prompt")
        .arg("   ")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter a prompt to analyze"));
}

#[test]
fn unreachable_backend_falls_back_to_demo() {
    let dir = TempDir::new().unwrap();
    let config = unreachable_config(&dir, true);

    promptfixer()
        .arg("run")
        .arg("--config")
        .arg(&config)
        .arg("--prompt")
        .arg("Explain DNS")
        .assert()
        .success()
        .stdout(predicate::str::contains("[demo]"))
        .stdout(predicate::str::contains("Here's a creative response to your prompt:"))
        .stderr(predicate::str::contains("Showing mock AI output"));
}

#[test]
fn unreachable_backend_without_fallback_fails() {
    let dir = TempDir::new().unwrap();
    let config = unreachable_config(&dir, false);

    promptfixer()
        .arg("analyze")
        .arg("--config")
        .arg(&config)
        .arg("--prompt")
        .arg("Explain DNS")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to analyze prompt"));
}

#[test]
fn unknown_tone_is_rejected() {
    promptfixer()
        .arg("analyze")
        .arg("--tone")
        .arg("casual")
        .arg("--prompt")
        .arg("hi")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown tone mode"));
}

#[test]
fn tones_lists_all_modes() {
    promptfixer()
        .arg("tones")
        .assert()
        .success()
        .stdout(predicate::str::contains("Creative"))
        .stdout(predicate::str::contains("Formal and research-focused"))
        .stdout(predicate::str::contains("Technical"));
}

#[test]
fn init_creates_config() {
    let dir = TempDir::new().unwrap();

    promptfixer()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created promptfixer.toml"));

    assert!(dir.path().join("promptfixer.toml").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    promptfixer()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    promptfixer()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn help_output() {
    promptfixer()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Score, rewrite, and run natural-language prompts",
        ));
}

#[test]
fn version_output() {
    promptfixer()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("promptfixer"));
}
