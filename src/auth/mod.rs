pub mod google;

use axum::http::{header, HeaderMap};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SecurityConfig;

pub const SESSION_COOKIE: &str = "session";
pub const OAUTH_STATE_COOKIE: &str = "oauth_state";

/// Identity of the logged-in user, as returned by `GET /profile`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub photo: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    /// Claims for `user` that expire `expiry_hours` from now.
    pub fn new(user: &SessionUser, expiry_hours: u64) -> Result<Self, SessionError> {
        let now = Utc::now();
        let exp = i64::try_from(expiry_hours)
            .ok()
            .and_then(Duration::try_hours)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or(SessionError::InvalidExpiry(expiry_hours))?
            .timestamp();

        Ok(Self {
            sub: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            photo: user.photo.clone(),
            exp,
            iat: now.timestamp(),
        })
    }
}

impl From<Claims> for SessionUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            name: claims.name,
            email: claims.email,
            photo: claims.photo,
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session secret not configured")]
    MissingSecret,
    #[error("Session lifetime of {0} hours is out of range")]
    InvalidExpiry(u64),
    #[error("Invalid session token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

/// Sign a session token for `user`.
pub fn issue_session_token(user: &SessionUser, security: &SecurityConfig) -> Result<String, SessionError> {
    encode_claims(&Claims::new(user, security.session_expiry_hours)?, &security.session_secret)
}

pub fn encode_claims(claims: &Claims, secret: &str) -> Result<String, SessionError> {
    if secret.is_empty() {
        return Err(SessionError::MissingSecret);
    }
    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    Ok(encode(&Header::default(), claims, &encoding_key)?)
}

/// Verify signature and expiry, then recover the identity.
pub fn decode_session_token(token: &str, secret: &str) -> Result<SessionUser, SessionError> {
    if secret.is_empty() {
        return Err(SessionError::MissingSecret);
    }
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let token_data = decode::<Claims>(token, &decoding_key, &Validation::default())?;
    Ok(token_data.claims.into())
}

/// `Set-Cookie` value carrying a session token.
pub fn session_cookie(token: &str, security: &SecurityConfig) -> String {
    build_cookie(
        SESSION_COOKIE,
        token,
        security.session_expiry_hours.saturating_mul(3600),
        security.secure_cookies,
    )
}

/// Short-lived cookie holding the OAuth `state` parameter.
pub fn oauth_state_cookie(value: &str, security: &SecurityConfig) -> String {
    build_cookie(OAUTH_STATE_COOKIE, value, 600, security.secure_cookies)
}

/// `Set-Cookie` value that makes the browser drop `name`.
pub fn expired_cookie(name: &str) -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", name)
}

fn build_cookie(name: &str, value: &str, max_age_secs: u64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        name, value, max_age_secs
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Value of cookie `name` from the request's `Cookie` headers.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}
