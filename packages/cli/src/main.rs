use std::path::PathBuf;
use std::time::Duration;

use ai_client::{CompletionClient, Provider};
use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use enrichment::{
    read_contacts, top_leads, BatchConfig, BatchRunner, CsvCheckpoint, HttpProfileFetcher,
    HttpTextFetcher, RecordEnricher,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Score a batch of leads from a contact export.
#[derive(Parser, Debug)]
#[command(name = "leadscore", about = "Enrich and score a CSV of business contacts")]
struct Args {
    /// Input CSV of contacts to score.
    input: PathBuf,

    /// Description of the sender and their product, used to personalize
    /// the outreach messages.
    #[arg(long, conflicts_with = "sender_context_file")]
    sender_context: Option<String>,

    /// Read the sender context from a file instead.
    #[arg(long)]
    sender_context_file: Option<PathBuf>,

    /// LLM backend: openai, anthropic, or local.
    #[arg(long, default_value = "openai")]
    provider: String,

    /// Output CSV, also used for intermediate checkpoints.
    #[arg(long, default_value = "lead_scores.csv")]
    output: PathBuf,

    /// Persist a checkpoint after every N contacts.
    #[arg(long, default_value_t = 10)]
    checkpoint_every: usize,

    /// Seconds to wait between contacts.
    #[arg(long, default_value_t = 1)]
    pacing_secs: u64,
}

impl Args {
    fn sender_context(&self) -> Result<String> {
        if let Some(context) = &self.sender_context {
            return Ok(context.clone());
        }
        if let Some(path) = &self.sender_context_file {
            return std::fs::read_to_string(path)
                .with_context(|| format!("failed to read sender context from {}", path.display()));
        }
        anyhow::bail!("either --sender-context or --sender-context-file is required")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,enrichment=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let sender_context = args.sender_context()?;

    let provider: Provider = args.provider.parse()?;
    let client = CompletionClient::from_env(provider)
        .with_context(|| format!("failed to configure {provider} client"))?;

    let contacts = read_contacts(&args.input)
        .with_context(|| format!("failed to read contacts from {}", args.input.display()))?;
    tracing::info!(
        contacts = contacts.len(),
        provider = %provider,
        output = %args.output.display(),
        "starting lead scoring batch"
    );

    let enricher = RecordEnricher::new(
        HttpTextFetcher::new(),
        HttpProfileFetcher::from_env().context("profile API configuration missing")?,
        client,
    );
    let runner = BatchRunner::new(
        enricher,
        CsvCheckpoint::new(&args.output),
        BatchConfig::new()
            .with_checkpoint_every(args.checkpoint_every)
            .with_pacing(Duration::from_secs(args.pacing_secs)),
    );

    let results = runner.run(&contacts, &sender_context).await?;

    println!();
    println!("{}", "Top leads".bright_cyan().bold());
    for lead in top_leads(&results, 5) {
        println!(
            "  {} {}  {}",
            format!("[{}]", lead.result.score).bright_yellow(),
            lead.result.name.bright_green(),
            lead.result.reasoning.dimmed()
        );
    }
    println!();
    println!(
        "{} {}",
        "Results written to".bright_blue(),
        args.output.display()
    );

    Ok(())
}
