// handlers/profile.rs - GET /profile handler

use axum::{response::Json, Extension};

use crate::auth::SessionUser;

/// Current session identity. `require_session` answers 401 before this runs
/// when there is no valid session.
pub async fn profile(Extension(user): Extension<SessionUser>) -> Json<SessionUser> {
    Json(user)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};

    use crate::auth::{issue_session_token, SessionUser};
    use crate::testing::{memory_app, send, send_request, test_config};

    fn user() -> SessionUser {
        SessionUser {
            id: "108".into(),
            name: "Grace Hopper".into(),
            email: Some("grace@example.com".into()),
            photo: Some("https://example.com/grace.png".into()),
        }
    }

    fn token() -> String {
        issue_session_token(&user(), &test_config().security).unwrap()
    }

    async fn get_profile(header: Option<(header::HeaderName, String)>) -> (StatusCode, Value) {
        let mut builder = Request::builder().uri("/profile");
        if let Some((name, value)) = header {
            builder = builder.header(name, value);
        }
        let (status, _, body) = send_request(&memory_app(), builder.body(Body::empty()).unwrap()).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn anonymous_requests_are_unauthorized() {
        let (status, body) = send(&memory_app(), Method::GET, "/profile", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Not authenticated");
    }

    #[tokio::test]
    async fn session_cookie_returns_identity() {
        let (status, body) = get_profile(Some((header::COOKIE, format!("session={}", token())))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "id": "108",
                "name": "Grace Hopper",
                "email": "grace@example.com",
                "photo": "https://example.com/grace.png"
            })
        );
    }

    #[tokio::test]
    async fn bearer_token_returns_identity() {
        let (status, body) = get_profile(Some((header::AUTHORIZATION, format!("Bearer {}", token())))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Grace Hopper");
    }

    #[tokio::test]
    async fn forged_tokens_are_unauthorized() {
        let mut security = test_config().security;
        security.session_secret = "someone-else".into();
        let forged = issue_session_token(&user(), &security).unwrap();

        let (status, _) = get_profile(Some((header::COOKIE, format!("session={}", forged)))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
