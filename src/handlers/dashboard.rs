// handlers/dashboard.rs - GET /dashboard and GET /auth/dashboard
//
// Both sit behind middleware::load_session, so the user extension is present
// only for callers with a valid session.

use axum::{
    response::{Html, IntoResponse, Json, Redirect, Response},
    Extension,
};
use serde_json::{json, Value};

use crate::auth::SessionUser;
use crate::error::ApiError;

const DASHBOARD_PAGE: &str = r#"<!doctype html>
<html>
  <head><title>Dashboard</title></head>
  <body>
    <h1>Dashboard</h1>
    <a href="/profile">Profile</a>
    <a href="/auth/logout">Logout</a>
  </body>
</html>
"#;

/// Browser landing page after login; anonymous visitors go to `/login`.
pub async fn dashboard_page(user: Option<Extension<SessionUser>>) -> Response {
    match user {
        Some(_) => Html(DASHBOARD_PAGE).into_response(),
        None => Redirect::to("/login").into_response(),
    }
}

pub async fn dashboard(user: Option<Extension<SessionUser>>) -> Result<Json<Value>, ApiError> {
    let Extension(user) = user.ok_or_else(|| ApiError::unauthorized("Unauthorized"))?;
    Ok(Json(json!({
        "message": "Welcome to your dashboard!",
        "user": user,
    })))
}
