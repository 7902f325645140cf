use miette::Diagnostic;
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(remove_meetings::config),
        help("check client_secret.json and the command line arguments")
    )]
    Config(String),

    #[error("Authorization error: {0}")]
    #[diagnostic(
        code(remove_meetings::auth),
        help("delete the cached token file to restart the authorization flow")
    )]
    Auth(String),

    #[error("Google Calendar API error: {0}")]
    #[diagnostic(code(remove_meetings::google_calendar))]
    GoogleCalendar(String),

    #[error("Console error: {0}")]
    #[diagnostic(code(remove_meetings::console))]
    Console(String),

    #[error(transparent)]
    #[diagnostic(code(remove_meetings::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(remove_meetings::serialization))]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type AppResult<T> = Result<T, Error>;

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create authorization errors
pub fn auth_error(message: &str) -> Error {
    Error::Auth(message.to_string())
}

/// Helper to create Google Calendar errors
pub fn google_calendar_error(message: &str) -> Error {
    Error::GoogleCalendar(message.to_string())
}

/// Helper to create console errors
pub fn console_error(message: &str) -> Error {
    Error::Console(message.to_string())
}
