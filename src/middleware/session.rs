use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{cookie_value, decode_session_token, SessionUser, SESSION_COOKIE};
use crate::error::ApiError;
use crate::state::AppState;

/// Rejects requests without a valid session and injects the `SessionUser`.
///
/// Browsers carry the token in the `session` cookie; API clients may send it
/// as a Bearer token instead.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = session_user(&state, request.headers()).ok_or_else(|| ApiError::unauthorized("Not authenticated"))?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Injects the `SessionUser` when the request carries a valid session and
/// lets every request through; handlers decide what an anonymous caller gets.
pub async fn load_session(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    if let Some(user) = session_user(&state, request.headers()) {
        request.extensions_mut().insert(user);
    }
    next.run(request).await
}

fn session_user(state: &AppState, headers: &HeaderMap) -> Option<SessionUser> {
    let token = extract_session_token(headers)?;

    decode_session_token(&token, &state.config.security.session_secret)
        .map_err(|e| tracing::debug!("Rejected session token: {}", e))
        .ok()
}

fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string);

    bearer.or_else(|| cookie_value(headers, SESSION_COOKIE).filter(|token| !token.is_empty()))
}
