//! The `promptfixer analyze|rewrite|run|fix` commands.

use anyhow::Result;

use promptfixer_core::session::{ActionOutcome, PromptSession};
use promptfixer_providers::config::load_config_from;
use promptfixer_providers::create_backend;

use super::{ConsoleNotifier, PromptArgs};
use crate::render;

#[derive(Clone, Copy)]
enum Step {
    Analyze,
    Rewrite,
    Run,
}

pub async fn analyze(args: PromptArgs) -> Result<()> {
    execute(args, &[Step::Analyze]).await
}

pub async fn rewrite(args: PromptArgs) -> Result<()> {
    execute(args, &[Step::Rewrite]).await
}

pub async fn run(args: PromptArgs, rewrite_first: bool) -> Result<()> {
    if rewrite_first {
        execute(args, &[Step::Rewrite, Step::Run]).await
    } else {
        execute(args, &[Step::Run]).await
    }
}

pub async fn fix(args: PromptArgs) -> Result<()> {
    execute(args, &[Step::Analyze, Step::Rewrite, Step::Run]).await
}

async fn execute(args: PromptArgs, steps: &[Step]) -> Result<()> {
    let config = load_config_from(args.config.as_deref())?;
    let prompt = args.read_prompt()?;
    let backend = create_backend(&config.backend)?;
    let notifier = ConsoleNotifier;

    tracing::debug!(backend = backend.name(), ?config, "starting session");

    let mut session = PromptSession::new(backend.as_ref(), &notifier, config.session_options());
    session.set_prompt(prompt.trim_end_matches(['\r', '\n']));
    session.set_tone(args.tone.unwrap_or(config.default_tone));

    let mut outcomes: Vec<ActionOutcome> = Vec::with_capacity(steps.len());
    for step in steps {
        let outcome = match step {
            Step::Analyze => session.analyze().await?,
            Step::Rewrite => session.rewrite().await?,
            Step::Run => session.run().await?,
        };
        outcomes.push(outcome);
    }

    render::print_session(&session, &outcomes, args.format)
}
