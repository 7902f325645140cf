use crate::error::AppResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Seconds before the recorded expiry at which a token is already treated as stale
const EXPIRY_SKEW_SECS: i64 = 60;

/// Cached OAuth credential
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Expiry as unix seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    /// Expiry as unix milliseconds, written by older token caches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

impl AuthToken {
    /// Expiry in unix seconds, from whichever field the cache carries
    pub fn expiry(&self) -> Option<i64> {
        self.expires_at.or(self.expiry_date.map(|ms| ms / 1000))
    }

    /// Whether the token can no longer be used at `now`; unknown expiry is not expired
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expiry() {
            Some(expiry) => expiry - EXPIRY_SKEW_SECS <= now.timestamp(),
            None => false,
        }
    }
}

/// Token endpoint response for both the code exchange and the refresh grant
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
}

impl TokenResponse {
    /// Convert to a cacheable token, keeping `previous_refresh` when the provider omits one
    pub fn into_token(self, now: DateTime<Utc>, previous_refresh: Option<String>) -> AuthToken {
        let expires_in = self.expires_in.unwrap_or(3600);
        AuthToken {
            access_token: self.access_token,
            refresh_token: self.refresh_token.or(previous_refresh),
            expires_at: Some(now.timestamp() + expires_in),
            expiry_date: None,
            scope: self.scope,
            token_type: self.token_type,
        }
    }
}

/// File-backed store for the single cached token
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the cached token; a missing or unparsable file yields `None`
    pub fn load(&self) -> AppResult<Option<AuthToken>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<AuthToken>(&content) {
            Ok(token) => Ok(Some(token)),
            Err(e) => {
                warn!("Ignoring unreadable token cache {}: {}", self.path.display(), e);
                Ok(None)
            }
        }
    }

    /// Overwrite the cached token
    pub fn save(&self, token: &AuthToken) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(token)?;

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path)?;

        // mode() only applies on creation; tighten a pre-existing file too
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))?;
        }

        file.write_all(json.as_bytes())?;

        info!("Token stored to {}", self.path.display());
        Ok(())
    }
}
