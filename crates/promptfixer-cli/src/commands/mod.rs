//! Subcommand implementations and the input handling they share.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use promptfixer_core::model::ToneMode;
use promptfixer_core::traits::{Notification, NotificationKind, Notifier};

pub mod action;
pub mod init;
pub mod parse;
pub mod tones;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Inputs shared by every backend action.
#[derive(Debug, Args)]
pub struct PromptArgs {
    /// Prompt text (reads stdin if neither --prompt nor --file is given)
    #[arg(long, conflicts_with = "file")]
    pub prompt: Option<String>,

    /// File containing the prompt
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Rewriting tone: creative, academic, technical
    #[arg(long)]
    pub tone: Option<ToneMode>,

    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output format: text, json
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl PromptArgs {
    pub fn read_prompt(&self) -> Result<String> {
        match (&self.prompt, &self.file) {
            (Some(text), _) => Ok(text.clone()),
            (None, Some(path)) => read_file(path),
            (None, None) => read_stdin(),
        }
    }
}

pub fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

pub fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("failed to read stdin")?;
    Ok(buf)
}

/// Prints success notifications to stderr.
///
/// Error notifications are skipped: the failing command already reports
/// them through its exit path.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, n: &Notification) {
        if n.kind == NotificationKind::Success {
            eprintln!("{}: {}", n.title, n.message);
        }
    }
}
