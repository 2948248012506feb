pub mod auth;
pub mod messages;
pub mod users;
pub mod state;
pub mod middleware;

pub use state::AppState;
pub use middleware::RateLimiter;

use axum::{
    Router,
    routing::{get, post, put},
    middleware as axum_middleware,
};
use tower_http::{
    cors::CorsLayer,
    trace::TraceLayer,
    timeout::TimeoutLayer,
};
use std::sync::Arc;
use std::time::Duration;
use serde::Serialize;

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

pub fn create_router(state: AppState, rate_limiter: Arc<RateLimiter>) -> Router {
    let request_timeout = Duration::from_secs(state.config.request_timeout_secs);

    // Every route in here sits behind the session guard; the handlers rely
    // on the identity it injects
    let protected = Router::new()
        .route("/api/auth/update-profile", put(auth::update_profile))
        .route("/api/auth/check", get(auth::check_auth))
        .route("/api/messages/users", get(messages::get_users_for_sidebar))
        .route("/api/messages/:id", get(messages::get_messages))
        .route("/api/messages/send/:id", post(messages::send_message))
        .route("/api/users/:id/profile", get(users::get_user_profile))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_session,
        ));

    Router::new()
        // Health check
        .route("/api/health", get(health))

        // Authentication endpoints that issue or clear credentials
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))

        .merge(protected)

        // Add rate limiting middleware
        .layer(axum_middleware::from_fn(move |req, next| {
            let limiter = rate_limiter.clone();
            middleware::rate_limit_middleware(limiter, req, next)
        }))
        // Add request timeout
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> axum::Json<HealthResponse> {
    axum::Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
