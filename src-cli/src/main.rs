//! JsPrettier - format JavaScript files through Prettier
//!
//! Command-line host for the format command: it plays the editor's part,
//! loading a file into a buffer, running the command and writing the result.

mod cli;
mod commands;

use clap::Parser;
use cli::Cli;
use formatter::{status_channel, StatusMessage};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    tracing::debug!(file = %cli.file.display(), "starting js-prettier");

    let (notifier, mut status_line) = status_channel();

    // Status messages are shown as they arrive, independently of the command
    let status_printer = tokio::spawn(async move {
        while let Some(StatusMessage(message)) = status_line.recv().await {
            eprintln!("{}", message);
        }
    });

    let ok = tokio::task::spawn_blocking(move || commands::format_file(&cli, notifier)).await??;
    status_printer.await?;

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
