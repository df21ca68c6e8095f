//! promptfixer CLI — analyze, rewrite, and run prompts from the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod render;

use commands::{OutputFormat, PromptArgs};

#[derive(Parser)]
#[command(
    name = "promptfixer",
    version,
    about = "Score, rewrite, and run natural-language prompts"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze and score a prompt
    Analyze {
        #[command(flatten)]
        args: PromptArgs,
    },

    /// Rewrite a prompt in the chosen tone
    Rewrite {
        #[command(flatten)]
        args: PromptArgs,
    },

    /// Run a prompt against the AI backend
    Run {
        #[command(flatten)]
        args: PromptArgs,

        /// Rewrite the prompt first and run the rewritten version
        #[arg(long)]
        rewrite_first: bool,
    },

    /// Analyze, rewrite, then run the rewritten prompt
    Fix {
        #[command(flatten)]
        args: PromptArgs,
    },

    /// Parse scoring feedback text offline
    Parse {
        /// File containing the feedback (reads stdin if omitted)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List available tone modes
    Tones,

    /// Create a starter config file
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("promptfixer=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze { args } => commands::action::analyze(args).await,
        Commands::Rewrite { args } => commands::action::rewrite(args).await,
        Commands::Run {
            args,
            rewrite_first,
        } => commands::action::run(args, rewrite_first).await,
        Commands::Fix { args } => commands::action::fix(args).await,
        Commands::Parse { file, format } => commands::parse::execute(file, format),
        Commands::Tones => commands::tones::execute(),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
