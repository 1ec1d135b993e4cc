//! Usersearch CLI - debounced account search
//!
//! This binary wires stdin into the reactive search pipeline: every
//! line is treated as the full current text of the search field, and
//! settled results are rendered as they arrive.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use usersearch_client::create_search_provider;
use usersearch_core::config::Config;
use usersearch_core::ObservableState;
use usersearch_pipeline::{spawn_pipeline, PipelineHandle};

#[derive(Parser)]
#[command(name = "usersearch")]
#[command(about = "Debounced account search against a user search API")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    let provider = create_search_provider(&config.search)?;
    let PipelineHandle {
        input,
        state,
        debouncer,
        session,
    } = spawn_pipeline(&config.pipeline, provider);

    // Render every published snapshot until the session drops its sender
    let mut snapshots = state;
    let renderer = tokio::spawn(async move {
        while snapshots.changed().await.is_ok() {
            render(&snapshots.borrow_and_update().clone());
        }
    });

    println!("Type a username fragment and press enter (ctrl-d to quit).");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        if input.send(line).await.is_err() {
            break;
        }
    }

    // Closing the input winds the pipeline down in order
    drop(input);
    debouncer.await.context("Debouncer task failed")?;
    session.await.context("Session task failed")?;
    renderer.await.context("Renderer task failed")?;

    Ok(())
}

/// Initialize logging system
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "usersearch={level},usersearch_core={level},usersearch_client={level},usersearch_pipeline={level}"
        ))
        .with_writer(std::io::stderr)
        .init();
}

/// Render one observable state snapshot
fn render(state: &ObservableState) {
    if state.is_loading {
        println!("Searching for '{}'...", state.current_search_term);
        return;
    }

    if let Some(message) = state.error_message() {
        println!("{message}");
        return;
    }

    for account in state.user_list() {
        match account.avatar_url() {
            Some(avatar) => println!("{:>12}  {}  <{avatar}>", account.id, account.display_name),
            None => println!("{:>12}  {}", account.id, account.display_name),
        }
    }
}
