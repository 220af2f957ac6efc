//! Google OAuth 2.0 authorization-code flow.

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::auth::SessionUser;
use crate::config::AppConfig;

const AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";
const SCOPES: &str = "openid profile email";

#[derive(Debug, Error)]
pub enum OAuthError {
    #[error("Google login is not configured")]
    NotConfigured,
    #[error("Provider returned an error: {0}")]
    Denied(String),
    #[error("Missing authorization code")]
    MissingCode,
    #[error("OAuth state mismatch")]
    StateMismatch,
    #[error(transparent)]
    Url(#[from] url::ParseError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct UserInfo {
    sub: String,
    name: Option<String>,
    email: Option<String>,
    picture: Option<String>,
}

impl From<UserInfo> for SessionUser {
    fn from(info: UserInfo) -> Self {
        let name = info
            .name
            .or_else(|| info.email.clone())
            .unwrap_or_else(|| info.sub.clone());
        Self {
            id: info.sub,
            name,
            email: info.email,
            photo: info.picture,
        }
    }
}

pub struct GoogleOAuth<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    callback_url: &'a str,
    http: &'a reqwest::Client,
}

impl<'a> GoogleOAuth<'a> {
    pub fn from_config(config: &'a AppConfig, http: &'a reqwest::Client) -> Result<Self, OAuthError> {
        match (&config.oauth.google_client_id, &config.oauth.google_client_secret) {
            (Some(client_id), Some(client_secret)) => Ok(Self {
                client_id,
                client_secret,
                callback_url: &config.oauth.google_callback_url,
                http,
            }),
            _ => Err(OAuthError::NotConfigured),
        }
    }

    /// Consent screen URL carrying `state` for CSRF protection.
    pub fn authorize_url(&self, state: &str) -> Result<Url, OAuthError> {
        Ok(Url::parse_with_params(
            AUTHORIZE_URL,
            &[
                ("client_id", self.client_id),
                ("redirect_uri", self.callback_url),
                ("response_type", "code"),
                ("scope", SCOPES),
                ("state", state),
            ],
        )?)
    }

    /// Exchange the callback `code` for the user's identity.
    pub async fn authenticate(&self, code: &str) -> Result<SessionUser, OAuthError> {
        let access_token = self.exchange_code(code).await?;
        self.fetch_user(&access_token).await
    }

    async fn exchange_code(&self, code: &str) -> Result<String, OAuthError> {
        let token: TokenResponse = self
            .http
            .post(TOKEN_URL)
            .form(&[
                ("code", code),
                ("client_id", self.client_id),
                ("client_secret", self.client_secret),
                ("redirect_uri", self.callback_url),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(token.access_token)
    }

    async fn fetch_user(&self, access_token: &str) -> Result<SessionUser, OAuthError> {
        let info: UserInfo = self
            .http
            .get(USERINFO_URL)
            .bearer_auth(access_token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(info.into())
    }
}
