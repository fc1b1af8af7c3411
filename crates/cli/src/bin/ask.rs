use std::path::PathBuf;
use std::sync::Arc;

use ai_client::{ChatClient, ChatClientConfig};
use anyhow::{Context, Result};
use clap::Parser;
use qa_core::{EnvCredentials, Pipeline};

/// Ask a language model a question from the command line.
///
/// The question is lowercased, stripped of punctuation and wrapped in a short
/// prompt before being sent. The API key is read from `XAI_API_KEY` (or the
/// variable named by `api_key_env` in the settings file).
#[derive(Debug, Parser)]
#[command(
    name = "ask",
    author,
    version,
    about = "LLM Q&A from the command line",
    long_about = None
)]
struct Args {
    /// Question text (read from stdin when omitted)
    #[arg(short = 'q', long = "question")]
    question: Option<String>,

    /// Model identifier (defaults to the configured model)
    #[arg(short = 'm', long = "model")]
    model: Option<String>,

    /// Path to a JSON settings file (defaults to ./ask.json when present)
    #[arg(short = 's', long = "settings")]
    settings: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init("warn", logger::Target::Stderr);

    let settings = settings_loader::load(args.settings.as_ref())?;
    let model = qa_core::resolve_model(args.model.as_deref(), &settings.model);

    let client = ChatClient::new(ChatClientConfig {
        base_url: settings.base_url.clone(),
        timeout: settings.timeout(),
    })
    .context("Failed to initialize completion client")?;
    let credentials = EnvCredentials::new(settings.api_key_env.clone());

    let pipeline = Pipeline::new(Arc::new(client), Arc::new(credentials))
        .with_system_prompt(settings.system_prompt.clone());

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let outcome = cli::run(
        &pipeline,
        args.question,
        &model,
        stdin.lock(),
        stdout.lock(),
    )?;

    std::process::exit(outcome.exit_code());
}
