use crate::error::{config_error, AppResult};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default calendar to search
pub const DEFAULT_CALENDAR_ID: &str = "primary";
/// Default number of events requested from the search
pub const DEFAULT_MAX_RESULTS: u32 = 10;
/// Largest page the events search accepts
pub const MAX_RESULTS_LIMIT: u32 = 2500;
/// Google Calendar REST endpoint
pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/calendar/v3";
/// Google OAuth2 endpoints used when the client secret omits them
pub const DEFAULT_AUTH_URI: &str = "https://accounts.google.com/o/oauth2/auth";
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

const DEFAULT_CLIENT_SECRET_FILE: &str = "client_secret.json";
const DEFAULT_DEFAULTS_FILE: &str = "remove_meetings.toml";
const TOKEN_DIR: &str = ".credentials";
const TOKEN_FILE: &str = "remove-meetings.json";

/// Defaults for search arguments, overridable from `remove_meetings.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub calendar_id: String,
    pub max_results: u32,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            calendar_id: DEFAULT_CALENDAR_ID.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl Defaults {
    /// Load defaults from a TOML file, falling back to built-ins when it is absent or broken
    pub fn load_from(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => {
                debug!("No defaults file at {}", path.display());
                return Self::default();
            }
        };

        match toml::from_str::<Defaults>(&content) {
            Ok(defaults) => defaults,
            Err(e) => {
                warn!("Ignoring malformed {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

/// Process configuration resolved from the environment
#[derive(Debug, Clone)]
pub struct Config {
    /// Provider-issued OAuth client descriptor
    pub client_secret_path: PathBuf,
    /// Cached token location
    pub token_path: PathBuf,
    /// Calendar REST API base URL
    pub api_base_url: String,
    /// Search defaults
    pub defaults: Defaults,
}

impl Config {
    /// Load configuration from environment and the optional defaults file
    pub fn load() -> AppResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let client_secret_path = env::var("REMOVE_MEETINGS_CLIENT_SECRET")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CLIENT_SECRET_FILE));

        let token_path = match env::var("REMOVE_MEETINGS_TOKEN_PATH") {
            Ok(path) => PathBuf::from(path),
            Err(_) => default_token_path(|key| env::var(key).ok())?,
        };

        let api_base_url = env::var("GOOGLE_CALENDAR_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

        let defaults = Defaults::load_from(Path::new(DEFAULT_DEFAULTS_FILE));

        Ok(Config {
            client_secret_path,
            token_path,
            api_base_url,
            defaults,
        })
    }
}

/// Token cache path under the user's home directory
pub fn default_token_path<F>(lookup: F) -> AppResult<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    let home = ["HOME", "HOMEPATH", "USERPROFILE"]
        .iter()
        .filter_map(|key| lookup(key))
        .find(|value| !value.is_empty())
        .ok_or_else(|| config_error("Cannot locate home directory for the token cache"))?;

    Ok(PathBuf::from(home).join(TOKEN_DIR).join(TOKEN_FILE))
}

/// OAuth client details from `client_secret.json`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientSecret {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default)]
    pub redirect_uris: Vec<String>,
    #[serde(default = "default_auth_uri")]
    pub auth_uri: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_auth_uri() -> String {
    DEFAULT_AUTH_URI.to_string()
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

#[derive(Deserialize)]
struct ClientSecretFile {
    installed: Option<ClientSecret>,
    web: Option<ClientSecret>,
}

impl ClientSecret {
    /// Read and parse the client secret file; any failure is a configuration error
    pub fn load(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            config_error(&format!(
                "Error loading client secret file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::parse(&content)
    }

    /// Parse an `installed` or `web` client descriptor
    pub fn parse(content: &str) -> AppResult<Self> {
        let file: ClientSecretFile = serde_json::from_str(content)
            .map_err(|e| config_error(&format!("Malformed client secret file: {}", e)))?;

        let secret = file
            .installed
            .or(file.web)
            .ok_or_else(|| config_error("Client secret has neither 'installed' nor 'web' section"))?;

        if secret.redirect_uris.is_empty() {
            return Err(config_error("Client secret lists no redirect URIs"));
        }

        Ok(secret)
    }

    /// Redirect URI used for the authorization code exchange
    pub fn redirect_uri(&self) -> AppResult<&str> {
        self.redirect_uris
            .first()
            .map(String::as_str)
            .ok_or_else(|| config_error("Client secret lists no redirect URIs"))
    }
}

/// Arguments for one removal run, fixed for the process lifetime
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub query: String,
    pub max_results: u32,
    pub calendar_id: String,
    pub list: bool,
    pub simulated: bool,
    pub expand_recurring: bool,
}

impl RunConfig {
    /// Build a run configuration, rejecting a blank query
    pub fn new(query: &str, max_results: u32, calendar_id: &str) -> AppResult<Self> {
        let query = query.trim();
        if query.is_empty() {
            return Err(config_error("The meeting name to search for must not be empty"));
        }
        if !(1..=MAX_RESULTS_LIMIT).contains(&max_results) {
            return Err(config_error(&format!(
                "max_results must be between 1 and {}, got {}",
                MAX_RESULTS_LIMIT, max_results
            )));
        }
        if calendar_id.trim().is_empty() {
            return Err(config_error("Calendar id must not be empty"));
        }

        Ok(Self {
            query: query.to_string(),
            max_results,
            calendar_id: calendar_id.to_string(),
            list: false,
            simulated: false,
            expand_recurring: false,
        })
    }

    pub fn with_list(mut self, list: bool) -> Self {
        self.list = list;
        self
    }

    pub fn with_simulated(mut self, simulated: bool) -> Self {
        self.simulated = simulated;
        self
    }

    pub fn with_expand_recurring(mut self, expand_recurring: bool) -> Self {
        self.expand_recurring = expand_recurring;
        self
    }
}
