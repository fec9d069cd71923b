use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::*;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use wayfarer_core::{AssistantConfig, ChatSession, GeminiChat};
use wayfarer_hotels::{HotelSearchAdapter, SerpApiClient};

mod app;
mod cli;
mod marker;
mod output;
mod prompt;

use crate::cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before anything reads the environment
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut config = AssistantConfig::load().context("Failed to load configuration")?;
    if let Some(model) = args.model.clone() {
        config.model_name = Some(model);
    }

    let filter = config.log_level.clone().unwrap_or_else(|| "warn".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&filter).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    // The model credential is the one fatal startup requirement; the search
    // credential is checked per tool call.
    if config.google_api_key.is_none() {
        eprintln!(
            "{}",
            "GOOGLE_API_KEY is missing. Set it in the environment or in ~/.config/wayfarer/config.toml."
                .red()
        );
        bail!("GOOGLE_API_KEY is missing");
    }

    let system_prompt = config
        .system_prompt
        .clone()
        .unwrap_or_else(|| prompt::SYSTEM_PROMPT.to_string());

    let chat = GeminiChat::new(&config)
        .context("Failed to initialize Gemini client")?
        .with_system_prompt(system_prompt);

    let transport = Arc::new(SerpApiClient::new().context("Failed to initialize search client")?);
    let adapter = HotelSearchAdapter::new(transport, config.serp_api_key.clone());

    let mut session = ChatSession::new();
    info!(
        session_id = %session.id(),
        model = chat.model_name(),
        "Starting travel assistant"
    );

    if let Some(prompt_text) = args.prompt.clone() {
        if args.interactive {
            bail!("Pass either a prompt or --interactive, not both");
        }
        app::run_single_query(&chat, &mut session, &adapter, prompt_text).await?;
    } else {
        app::run_interactive_chat(&chat, &mut session, &adapter).await?;
    }

    Ok(())
}
