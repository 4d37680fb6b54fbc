use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, post, put},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::state::SharedState;

pub mod auth;
mod cases;
mod clients;
mod dashboard;
mod error;
mod observability;
mod types;
mod validation;

pub use error::ApiError;
pub use types::*;

pub async fn router(state: Arc<SharedState>) -> Router {
    let (cors_origins, secure_cookies, session_minutes) = {
        let server = &state.config.server;
        (
            server.cors_allowed_origins.clone(),
            server.secure_cookies,
            server.session_minutes,
        )
    };

    let protected_routes = create_protected_router();

    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            session_minutes,
        )));

    let api_router = Router::new()
        .merge(protected_routes)
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .layer(session_layer)
        .with_state(state);

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}

fn create_protected_router() -> Router<Arc<SharedState>> {
    Router::new()
        .route("/auth/me", get(auth::get_current_user))
        .route("/dashboard", get(dashboard::get_dashboard))
        .route("/clients", get(clients::list_clients))
        .route("/clients", post(clients::create_client))
        .route("/clients/{id}", get(clients::get_client))
        .route("/clients/{id}", put(clients::update_client))
        .route("/cases", get(cases::list_cases))
        .route("/cases", post(cases::create_case))
        .route("/cases/{id}", get(cases::get_case))
        .route("/cases/{id}", put(cases::update_case))
        .route("/metrics", get(observability::get_metrics))
        .route_layer(middleware::from_fn(auth::auth_middleware))
}
