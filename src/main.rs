mod bot;
mod cli;
mod config;
mod data;
mod error;
mod model;
mod scheduler;
mod service;
mod startup;
mod state;

use clap::Parser;
use dioxus_logger::tracing;

use crate::{
    cli::{Cli, Command},
    config::Config,
    error::AppError,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dioxus_logger::init(tracing::Level::INFO)
        .map_err(|e| AppError::InternalError(format!("Failed to initialize logger: {}", e)))?;

    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Run) {
        Command::FilterCorpus { input, output } => {
            cli::filter_corpus(&input, &output)?;
            Ok(())
        }
        Command::Run => run().await,
    }
}

async fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    let state = startup::build_state(config).await?;

    let (bot_client, discord_http) = bot::start::init_bot(state.clone()).await?;

    // Start scheduled broadcasts in a separate task
    let scheduler_state = state.clone();
    tokio::spawn(async move {
        if let Err(e) = scheduler::broadcast::start_scheduler(scheduler_state, discord_http).await
        {
            tracing::error!("Broadcast scheduler error: {}", e);
        }
    });

    bot::start::start_bot(bot_client).await
}
