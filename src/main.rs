use clap::Parser;
use remove_meetings::cli::Cli;
use remove_meetings::startup;
use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Exits with status 2 on bad arguments, before any network call
    let cli = Cli::parse();

    // Initialize logging
    startup::init_logging(cli.verbose)?;

    info!("Starting remove-meetings");

    // Load configuration
    let config = startup::load_config()?;

    startup::run(cli, config).await?;
    Ok(())
}
