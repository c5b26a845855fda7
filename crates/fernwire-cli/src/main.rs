//! Fernwire command-line driver.
//!
//! # Usage
//!
//! ```bash
//! # Replay a recorded session and print a summary
//! fernwire session.jsonl
//!
//! # Answer authorization prompts from stdin, load chats once ready
//! fernwire session.jsonl --config fernwire.toml --prompt --chats 50
//! ```

use std::{path::PathBuf, sync::Arc, time::Duration};

use clap::Parser;
use fernwire_cli::{ReplayBackend, SessionOptions, Summary, config, session};
use fernwire_client::Client;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Fernwire client driver
#[derive(Parser, Debug)]
#[command(name = "fernwire")]
#[command(about = "Drive a Fernwire client session and report its state")]
#[command(version)]
struct Args {
    /// Recorded session, one JSON message per line
    recording: PathBuf,

    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Answer authorization prompts from stdin
    #[arg(long)]
    prompt: bool,

    /// Chats to request once authorized
    #[arg(long, default_value = "0")]
    chats: i32,

    /// Pause between replayed messages, in milliseconds
    #[arg(long, default_value = "0")]
    delay_ms: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = config::load(args.config.as_deref())?;
    tracing::info!(recording = %args.recording.display(), ?config, "fernwire starting");

    let backend =
        ReplayBackend::open(&args.recording)?.with_delay(Duration::from_millis(args.delay_ms));
    let mut client = Client::start(Arc::new(backend), config)?;

    let answers = args.prompt.then(|| BufReader::new(tokio::io::stdin()).lines());
    let options = SessionOptions { chat_limit: args.chats };
    let summary = session::run(&mut client, answers, &options).await?;
    client.shutdown();

    print_summary(&summary);

    Ok(())
}

/// The summary is the program's output; logs go to stderr.
#[allow(clippy::print_stdout)]
fn print_summary(summary: &Summary) {
    println!("{summary}");
}
