use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use chatcli::{Commands, Container, ContainerConfig, Router};

#[derive(Parser)]
#[command(name = "chatcli")]
#[command(author, version, about)]
#[command(
    long_about = "ChatCLI is a command-line tool to send messages to and receive responses from a chat API."
)]
struct Cli {
    /// Log the outbound payload and the raw response body
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Base URL of the chat API (overrides OPENAI_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Model identifier (overrides OPENAI_MODEL)
    #[arg(long, global = true)]
    model: Option<String>,

    /// Request timeout in seconds
    #[arg(
        long,
        global = true,
        default_value = "30",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(cli.verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let container = Container::new(ContainerConfig {
        base_url: cli.base_url,
        model: cli.model,
        timeout: Some(Duration::from_secs(cli.timeout)),
    })?;
    let router = Router::new(&container);

    let output = router.route(cli.command).await?;
    println!("{}", output);

    Ok(())
}

/// Payload and response bodies are logged at DEBUG, so they only show with `--verbose`.
fn log_level(verbose: bool) -> Level {
    if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    }
}
