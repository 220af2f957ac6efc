use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::SecurityConfig;
use crate::database::models::{Contact, Movie};
use crate::handlers::{auth, dashboard, profile, resource, service};
use crate::middleware::{load_session, require_session};
use crate::state::AppState;

/// Full HTTP surface of the service.
pub fn app(state: AppState) -> Router {
    let router = Router::new()
        // Public
        .route("/", get(service::root))
        .route("/health", get(service::health))
        // Collections
        .merge(resource::routes::<Contact>())
        .merge(resource::routes::<Movie>())
        // Browser login flow
        .merge(auth_routes())
        // Session aware
        .merge(dashboard_routes(state.clone()))
        // Session required
        .merge(protected_routes(state.clone()))
        .layer(TraceLayer::new_for_http());

    let router = match cors_layer(&state.config.security) {
        Some(cors) => router.layer(cors),
        None => router,
    };

    router.with_state(state)
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page))
        .route("/auth/google", get(auth::google_login))
        .route("/auth/google/callback", get(auth::google_callback))
        .route("/auth/logout", get(auth::logout))
}

fn dashboard_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard::dashboard_page))
        .route("/auth/dashboard", get(dashboard::dashboard))
        .route_layer(middleware::from_fn_with_state(state, load_session))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/profile", get(profile::profile))
        .route_layer(middleware::from_fn_with_state(state, require_session))
}

fn cors_layer(security: &SecurityConfig) -> Option<CorsLayer> {
    if !security.enable_cors {
        return None;
    }
    if security.cors_origins.is_empty() {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
            .allow_credentials(true),
    )
}
