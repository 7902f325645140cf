use crate::cli::{Cli, Command};
use crate::components::google_calendar::{Authenticator, GoogleCalendarClient, TokenStore};
use crate::components::StdConsole;
use crate::config::{ClientSecret, Config};
use crate::error::{AppResult, Error};
use crate::workflow::{self, RunOutcome};
use chrono::Utc;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Default log filter for the given `-v` count
pub fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info,reqwest=warn,hyper=warn",
        _ => "debug,reqwest=warn,hyper=warn",
    }
}

/// Initialize logging on stderr with environment-based configuration
pub fn init_logging(verbosity: u8) -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity))),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Config(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load the application config
pub fn load_config() -> miette::Result<Config> {
    match Config::load() {
        Ok(config) => Ok(config),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Authenticate, then list calendars or run the removal workflow
pub async fn run(cli: Cli, config: Config) -> AppResult<()> {
    let command = cli.resolve(&config.defaults)?;
    let secret = ClientSecret::load(&config.client_secret_path)?;
    debug!("Loaded client secret from {}", config.client_secret_path.display());

    let mut console = StdConsole::new();
    let authenticator = Authenticator::new(secret, TokenStore::new(&config.token_path))
        .with_open_browser(cli.open_browser);

    let token = authenticator.authenticate(&mut console).await.inspect_err(|e| {
        error!("Authentication failed: {}", e);
    })?;

    let api = GoogleCalendarClient::new(&config.api_base_url);

    match command {
        Command::ListCalendars => {
            let count = workflow::list_calendars(&api, &token.access_token, &mut console).await?;
            info!("Listed {} calendars", count);
        }
        Command::Remove(run) => {
            let outcome =
                workflow::run_removal(&run, &api, &token.access_token, &mut console, Utc::now())
                    .await?;
            match outcome {
                RunOutcome::Removed(report) => info!(
                    deleted = report.deleted(),
                    failed = report.failed(),
                    skipped = report.skipped(),
                    "Removal finished"
                ),
                other => info!("Run finished: {:?}", other),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_levels() {
        assert_eq!(default_filter(0), "warn");
        assert!(default_filter(1).starts_with("info"));
        assert!(default_filter(5).starts_with("debug"));
        assert!(EnvFilter::try_new(default_filter(2)).is_ok());
    }
}
