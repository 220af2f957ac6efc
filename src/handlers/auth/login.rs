// handlers/auth/login.rs - GET /login and GET /auth/logout

use axum::{
    http::header::SET_COOKIE,
    response::{AppendHeaders, Html, IntoResponse, Redirect},
};

use crate::auth::{expired_cookie, SESSION_COOKIE};

const LOGIN_PAGE: &str = r#"<!doctype html>
<html>
  <head><title>Login</title></head>
  <body><a href="/auth/google">Login with Google</a></body>
</html>
"#;

pub async fn login_page() -> Html<&'static str> {
    Html(LOGIN_PAGE)
}

/// Drops the session cookie and sends the browser home.
pub async fn logout() -> impl IntoResponse {
    (
        AppendHeaders([(SET_COOKIE, expired_cookie(SESSION_COOKIE))]),
        Redirect::to("/"),
    )
}
