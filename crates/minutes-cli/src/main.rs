//! Minutes CLI - structured knowledge extraction from meeting transcripts.

use clap::Parser;
use minutes_cli::{commands, Cli, Command, Config};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> minutes_cli::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load();

    match cli.command {
        Command::Process(args) => commands::execute_process(args, &config).await?,
    }

    Ok(())
}
