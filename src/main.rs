use clap::Parser;
use tracing_subscriber::EnvFilter;

use socialnet::app::App;
use socialnet::cli;
use socialnet::config::{Cli, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging; stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse CLI args and load config
    let cli = Cli::parse();
    let config = Config::load(&cli)?;
    tracing::debug!("API base URL: {}", config.api.base_url);

    let app = App::from_config(&config)?;
    cli::run(&app, cli.command).await
}
