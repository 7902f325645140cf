use super::token::{AuthToken, TokenResponse, TokenStore};
use crate::components::console::Console;
use crate::config::ClientSecret;
use crate::error::{auth_error, AppResult};
use chrono::Utc;
use reqwest::Client;
use tracing::{debug, error, info, warn};
use url::Url;

/// Full read/write access is needed to delete events
pub const CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar";

/// Build the consent URL the user visits to obtain an authorization code
pub fn authorization_url(secret: &ClientSecret, state: &str) -> AppResult<Url> {
    let redirect_uri = secret.redirect_uri()?;
    let mut url = Url::parse(&secret.auth_uri)
        .map_err(|e| auth_error(&format!("Invalid auth_uri in client secret: {}", e)))?;

    url.query_pairs_mut()
        .append_pair("client_id", &secret.client_id)
        .append_pair("redirect_uri", redirect_uri)
        .append_pair("response_type", "code")
        .append_pair("access_type", "offline")
        .append_pair("scope", CALENDAR_SCOPE)
        .append_pair("state", state);

    Ok(url)
}

/// Authorization code entered by the user, with the `state` echoed by a pasted redirect URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationCode {
    pub code: String,
    pub state: Option<String>,
}

impl AuthorizationCode {
    /// Reject a redirect whose `state` is not the one sent in the consent URL
    pub fn verify_state(&self, expected: &str) -> AppResult<()> {
        match self.state.as_deref() {
            Some(state) if state != expected => Err(auth_error(
                "Authorization response state does not match the request",
            )),
            _ => Ok(()),
        }
    }
}

/// Accept either the bare code or the whole redirect URL the browser landed on
pub fn extract_code(input: &str) -> Option<AuthorizationCode> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if input.contains("code=") {
        let query = input.split_once('?').map(|(_, q)| q).unwrap_or(input);
        let mut code = None;
        let mut state = None;
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "code" => code = Some(value.into_owned()),
                "state" => state = Some(value.into_owned()),
                _ => {}
            }
        }
        return code
            .filter(|code| !code.is_empty())
            .map(|code| AuthorizationCode { code, state });
    }

    Some(AuthorizationCode {
        code: input.to_string(),
        state: None,
    })
}

/// Obtains a usable access credential from the cache or the authorization-code flow
pub struct Authenticator {
    secret: ClientSecret,
    store: TokenStore,
    client: Client,
    open_browser: bool,
}

impl Authenticator {
    pub fn new(secret: ClientSecret, store: TokenStore) -> Self {
        Self {
            secret,
            store,
            client: Client::new(),
            open_browser: false,
        }
    }

    /// Also try to open the consent page in a browser
    pub fn with_open_browser(mut self, open_browser: bool) -> Self {
        self.open_browser = open_browser;
        self
    }

    /// Get a valid token: cached, refreshed, or freshly authorized
    pub async fn authenticate<C: Console + ?Sized>(&self, console: &mut C) -> AppResult<AuthToken> {
        if let Some(token) = self.store.load()? {
            let now = Utc::now();
            if token.expiry().is_none() {
                warn!("Cached token has no expiry information, using it as is");
                return Ok(token);
            }
            if !token.is_expired(now) {
                debug!("Using cached token from {}", self.store.path().display());
                return Ok(token);
            }

            match token.refresh_token.as_deref() {
                Some(refresh_token) => match self.refresh(refresh_token).await {
                    Ok(refreshed) => {
                        self.store.save(&refreshed)?;
                        return Ok(refreshed);
                    }
                    Err(e) => warn!("Token refresh failed, authorization required: {}", e),
                },
                None => info!("Cached token expired and has no refresh token"),
            }
        }

        self.authorize_interactively(console).await
    }

    /// Exchange a refresh token for a new access token
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<AuthToken> {
        let params = [
            ("client_id", self.secret.client_id.as_str()),
            ("client_secret", self.secret.client_secret.as_str()),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ];

        let response = self.request_token(&params).await?;
        info!("Access token refreshed");
        Ok(response.into_token(Utc::now(), Some(refresh_token.to_string())))
    }

    /// Exchange an authorization code for a token
    pub async fn exchange_code(&self, code: &str) -> AppResult<AuthToken> {
        let params = [
            ("client_id", self.secret.client_id.as_str()),
            ("client_secret", self.secret.client_secret.as_str()),
            ("code", code),
            ("redirect_uri", self.secret.redirect_uri()?),
            ("grant_type", "authorization_code"),
        ];

        let response = self.request_token(&params).await?;
        Ok(response.into_token(Utc::now(), None))
    }

    async fn authorize_interactively<C: Console + ?Sized>(
        &self,
        console: &mut C,
    ) -> AppResult<AuthToken> {
        let state = uuid::Uuid::new_v4().to_string();
        let auth_url = authorization_url(&self.secret, &state)?;

        console
            .say(&format!("Authorize this app by visiting this url: {}", auth_url))
            .await?;

        if self.open_browser {
            if let Err(e) = webbrowser::open(auth_url.as_str()) {
                warn!("Could not open a browser: {}", e);
            }
        }

        let input = console.read_line("Enter the code from that page here: ").await?;
        let code = extract_code(&input).ok_or_else(|| auth_error("No authorization code entered"))?;
        code.verify_state(&state).inspect_err(|e| {
            error!("{}", e);
        })?;

        let token = self.exchange_code(&code.code).await.inspect_err(|e| {
            error!("Error while trying to retrieve access token: {}", e);
        })?;

        self.store.save(&token)?;
        console
            .say(&format!("Token stored to {}", self.store.path().display()))
            .await?;

        Ok(token)
    }

    async fn request_token(&self, params: &[(&str, &str)]) -> AppResult<TokenResponse> {
        let response = self
            .client
            .post(&self.secret.token_uri)
            .form(params)
            .send()
            .await
            .map_err(|e| auth_error(&format!("Failed to reach token endpoint: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(auth_error(&format!(
                "Token request rejected: HTTP {} - {}",
                status, error_body
            )));
        }

        response
            .json::<TokenResponse>()
            .await
            .map_err(|e| auth_error(&format!("Failed to parse token response: {}", e)))
    }
}
