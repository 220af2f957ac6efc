// handlers/auth/google.rs - GET /auth/google and GET /auth/google/callback

use axum::{
    extract::{Query, State},
    http::{header::SET_COOKIE, HeaderMap},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::auth::google::{GoogleOAuth, OAuthError};
use crate::auth::{
    cookie_value, expired_cookie, issue_session_token, oauth_state_cookie, session_cookie, OAUTH_STATE_COOKIE,
};
use crate::error::ApiError;
use crate::state::AppState;

/// Where a freshly logged-in browser lands.
const AFTER_LOGIN: &str = "/dashboard";
const AFTER_FAILURE: &str = "/";

/// GET /auth/google - redirect to Google's consent screen
pub async fn google_login(State(state): State<AppState>) -> Result<Response, ApiError> {
    let google = GoogleOAuth::from_config(&state.config, &state.http)
        .map_err(|e| ApiError::service_unavailable(e.to_string()))?;

    let csrf = uuid::Uuid::new_v4().simple().to_string();
    let url = google.authorize_url(&csrf).map_err(|e| {
        tracing::error!("Failed to build Google consent URL: {}", e);
        ApiError::internal_server_error("Failed to start Google login")
    })?;

    Ok((
        AppendHeaders([(SET_COOKIE, oauth_state_cookie(&csrf, &state.config.security))]),
        Redirect::to(url.as_str()),
    )
        .into_response())
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// GET /auth/google/callback - finish the login and start a session
pub async fn google_callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<CallbackQuery>,
) -> Response {
    let clear_state = expired_cookie(OAUTH_STATE_COOKIE);

    match complete_login(&state, &headers, query).await {
        Ok(session) => (
            AppendHeaders([(SET_COOKIE, session), (SET_COOKIE, clear_state)]),
            Redirect::to(AFTER_LOGIN),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!("Google login failed: {}", e);
            (AppendHeaders([(SET_COOKIE, clear_state)]), Redirect::to(AFTER_FAILURE)).into_response()
        }
    }
}

/// Returns the `Set-Cookie` value for the new session.
async fn complete_login(state: &AppState, headers: &HeaderMap, query: CallbackQuery) -> Result<String, LoginError> {
    if let Some(error) = query.error {
        return Err(OAuthError::Denied(error).into());
    }

    let expected = cookie_value(headers, OAUTH_STATE_COOKIE);
    match (expected.as_deref(), query.state.as_deref()) {
        (Some(expected), Some(actual)) if !expected.is_empty() && expected == actual => {}
        _ => return Err(OAuthError::StateMismatch.into()),
    }

    let code = query.code.ok_or(OAuthError::MissingCode)?;
    let google = GoogleOAuth::from_config(&state.config, &state.http)?;
    let user = google.authenticate(&code).await?;

    tracing::info!("Google login for {}", user.id);
    let token = issue_session_token(&user, &state.config.security)?;
    Ok(session_cookie(&token, &state.config.security))
}

#[derive(Debug, thiserror::Error)]
enum LoginError {
    #[error(transparent)]
    OAuth(#[from] OAuthError),
    #[error(transparent)]
    Session(#[from] crate::auth::SessionError),
}
