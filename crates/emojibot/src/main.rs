//! emojibot binary.

use clap::Parser;
use emojibot::{AppConfig, Cli, Commands, ObservabilityConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::from_file(&cli.config)?;

    let observability = ObservabilityConfig::default()
        .with_logging(config.logging())
        .with_verbose(cli.verbose);
    emojibot::init(&observability)?;

    match cli.command {
        Commands::Run => emojibot::run(&config).await?,
        Commands::Check => {
            emojibot::check(&config).await?;
        }
    }

    Ok(())
}
