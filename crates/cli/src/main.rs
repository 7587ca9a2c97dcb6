mod cli;
mod config;
mod repl;
mod status;
mod terminal;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;

use manualqa_core::Config;
use manualqa_index::{read_meta, BuildOutcome, IndexBuilder};
use manualqa_ingest::{create_embedder, fingerprint_sources};
use manualqa_rag::{Assistant, Transcript};

use crate::cli::{CliArgs, Command};
use crate::repl::ReplInput;
use crate::terminal::Terminal;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();
    let config = config::load(&args)?;
    let terminal = Terminal::new();

    match args.command() {
        Command::Ingest => ingest(&config, &terminal).await,
        Command::Ask { k, question } => {
            let k = config::resolve_k(k, &config);
            ask(&config, &terminal, &question.join(" "), k).await
        }
        Command::Chat { k } => chat(&config, &terminal, config::resolve_k(k, &config)).await,
        Command::Status => status(&config, &terminal),
    }
}

async fn ingest(config: &Config, terminal: &Terminal) -> Result<()> {
    let embedder = create_embedder(config).context("failed to create embedder")?;
    let outcome = IndexBuilder::from_config(config)
        .ensure(embedder)
        .await
        .context("failed to build index")?;
    match outcome {
        BuildOutcome::Built { chunks, manuals } => terminal.print_info(&format!(
            "Indexed {} chunks from {} manuals into {}",
            chunks,
            manuals,
            config.paths.index_dir.display()
        )),
        BuildOutcome::Reused => terminal.print_info(&format!(
            "Index already present at {}; nothing to do",
            config.paths.index_dir.display()
        )),
    }
}

async fn open(config: &Config, terminal: &Terminal) -> Result<Assistant> {
    let spinner = terminal.start_spinner("Loading index")?;
    let opened = Assistant::open(config).await;
    spinner.stop();
    let (assistant, outcome) = opened.context("failed to prepare the assistant")?;
    if let BuildOutcome::Built { chunks, manuals } = outcome {
        terminal.print_info(&format!("Indexed {} chunks from {} manuals", chunks, manuals))?;
    }
    Ok(assistant)
}

async fn ask(config: &Config, terminal: &Terminal, question: &str, k: usize) -> Result<()> {
    let assistant = open(config, terminal).await?;
    let answer = assistant
        .answer(question, k)
        .await
        .context("failed to answer question")?;
    terminal.print_answer(&answer.text, &answer.sources)
}

async fn chat(config: &Config, terminal: &Terminal, mut k: usize) -> Result<()> {
    let assistant = open(config, terminal).await?;
    terminal.print_banner(
        assistant.retriever().index().len(),
        &assistant.retriever().index().meta().model,
        k,
    )?;

    let mut transcript = Transcript::new();
    loop {
        let line = match terminal.read_input()? {
            Some(line) => line,
            None => break,
        };

        match repl::parse(&line) {
            ReplInput::Empty => continue,
            ReplInput::Exit => break,
            ReplInput::History => terminal.print_transcript(&transcript)?,
            ReplInput::SetK(new_k) => {
                k = new_k;
                terminal.print_info(&format!("k = {}", k))?;
            }
            ReplInput::Invalid(msg) => terminal.print_error(&msg)?,
            ReplInput::Question(question) => {
                let spinner = terminal.start_spinner("Thinking")?;
                let result = assistant.ask(&mut transcript, &question, k).await;
                spinner.stop();
                match result {
                    Ok(answer) => terminal.print_answer(&answer.text, &answer.sources)?,
                    Err(e) => {
                        error!(error = %e, "Question failed");
                        terminal.print_error(&format!("{:#}", e))?;
                    }
                }
            }
        }
    }

    terminal.print_info(&format!("Goodbye. {} questions answered.", transcript.len()))
}

fn status(config: &Config, terminal: &Terminal) -> Result<()> {
    let meta = read_meta(&config.paths.index_dir)
        .with_context(|| format!("cannot read index at {}", config.paths.index_dir.display()))?;
    let current = fingerprint_sources(&config.paths.pdf_dir)
        .with_context(|| format!("cannot scan {}", config.paths.pdf_dir.display()))?;
    let changes = status::diff_sources(&meta.manuals, &current);
    terminal.print_status(&meta, &changes)
}
