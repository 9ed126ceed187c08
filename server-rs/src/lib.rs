//! Server-side permission gate for the school club portal.
//!
//! The portal's data lives in an external document store. This service holds
//! no records of its own: callers send the actor's token plus the records a
//! mutation touches, and get back either a decision or the patched records to
//! write.

use axum::{
    http::HeaderValue,
    middleware as axum_mw,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod authz;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use middleware::rate_limit::RateLimiter;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub rate_limiter: RateLimiter,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let rate_limiter =
            RateLimiter::new(config.rate_limit.max_requests, config.rate_limit.window_secs);
        Self {
            config: Arc::new(config),
            rate_limiter,
        }
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let parsed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if parsed.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(parsed))
    }
}

pub fn build_router(state: AppState) -> Router {
    // --- Permission questions (anonymous callers allowed) ---
    let authz_routes = Router::new()
        .route("/capabilities", get(routes::authz::capabilities))
        .route("/check", post(routes::authz::check))
        .layer(axum_mw::from_fn_with_state(
            state.clone(),
            middleware::auth::optional_auth,
        ));

    // --- Record provisioning (called by the registration hook) ---
    let provisioning_routes = Router::new()
        .route("/provision", post(routes::users::provision))
        .route("/normalize", post(routes::users::normalize));

    // --- Authenticated mutations ---
    let user_routes = Router::new()
        .route("/:id/role", post(routes::users::change_role))
        .route("/:id/badges", post(routes::users::grant_badge))
        .layer(axum_mw::from_fn_with_state(
            state.clone(),
            middleware::auth::authenticate,
        ));

    let club_routes = Router::new()
        .route("/:id/kick", post(routes::clubs::kick_member))
        .layer(axum_mw::from_fn_with_state(
            state.clone(),
            middleware::auth::authenticate,
        ));

    let content_routes = Router::new()
        .route("/announcements", post(routes::content::publish_announcement))
        .route("/events", post(routes::content::plan_event))
        .layer(axum_mw::from_fn_with_state(
            state.clone(),
            middleware::auth::authenticate,
        ));

    let admin_routes = Router::new()
        .route("/clubs", post(routes::clubs::create_club))
        .route("/clubs/:id/delete", post(routes::clubs::delete_club))
        .layer(axum_mw::from_fn(middleware::admin::require_admin_panel))
        .layer(axum_mw::from_fn_with_state(
            state.clone(),
            middleware::auth::authenticate,
        ));

    // --- Compose full API ---
    let api = Router::new()
        .nest("/authz", authz_routes)
        .nest("/users", provisioning_routes.merge(user_routes))
        .nest("/clubs", club_routes)
        .nest("/admin", admin_routes)
        .merge(content_routes);

    Router::new()
        .nest("/api/v1", api)
        .route("/health", get(routes::health::health))
        // Global middleware
        .layer(axum_mw::from_fn_with_state(
            state.clone(),
            middleware::rate_limit::rate_limit,
        ))
        .layer(CompressionLayer::new())
        .layer(cors_layer(&state.config.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
