use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use sqlx::{Pool, Sqlite};
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::api::state::AppState;
use crate::db::{SessionRepository, UserRepository, UserProfile};
use crate::error::{AppError, AuthError};

/// Pulls the session token out of the `Authorization` header.
/// `Ok(None)` means no credential was sent at all; a header that is present
/// but not `Bearer <token>` shaped is an invalid credential.
pub fn bearer_token(headers: &HeaderMap) -> Result<Option<&str>, AuthError> {
    let header = match headers.get(header::AUTHORIZATION) {
        Some(value) => value,
        None => return Ok(None),
    };

    let value = header.to_str().map_err(|_| AuthError::InvalidCredential)?;
    let token = value
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidCredential)?;

    Ok(Some(token))
}

/// Session verifier: resolves a token to the user it identifies, or fails
/// with one of the four auth failure modes. Read-only.
pub async fn resolve_session(
    db: &Pool<Sqlite>,
    token: Option<&str>,
) -> Result<UserProfile, AppError> {
    let token = token.ok_or(AuthError::MissingCredential)?;

    let session = SessionRepository::get_by_token(db, token)
        .await?
        .ok_or(AuthError::InvalidCredential)?;

    if session.expires_at <= chrono::Utc::now().timestamp() {
        return Err(AuthError::ExpiredCredential.into());
    }

    let user = UserRepository::get_profile(db, &session.user_id)
        .await?
        .ok_or(AuthError::UnknownSubject)?;

    Ok(user)
}

/// Route guard - runs the session verifier in front of a handler and makes
/// the resolved identity available to it. On failure the handler never runs.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers())?;
    let user = resolve_session(&state.db, token).await?;

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Simple in-memory rate limiter
/// Tracks requests per IP address and enforces limits
#[derive(Clone)]
pub struct RateLimiter {
    // IP -> (count, window_start)
    state: Arc<Mutex<HashMap<IpAddr, (u32, Instant)>>>,
    max_requests: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            state: Arc::new(Mutex::new(HashMap::new())),
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }

    pub async fn check(&self, ip: IpAddr) -> bool {
        let mut state = self.state.lock().await;
        let now = Instant::now();

        let entry = state.entry(ip).or_insert((0, now));

        // Reset if window expired
        if now.duration_since(entry.1) > self.window {
            *entry = (1, now);
            return true;
        }

        // Check if under limit
        if entry.0 < self.max_requests {
            entry.0 += 1;
            true
        } else {
            false
        }
    }

    /// Periodic cleanup of old entries
    pub async fn cleanup(&self) {
        let mut state = self.state.lock().await;
        let now = Instant::now();
        state.retain(|_, (_, time)| now.duration_since(*time) <= self.window * 2);
    }
}

/// Rate limiting middleware
pub async fn rate_limit_middleware(
    limiter: Arc<RateLimiter>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extract IP address from connection info
    let ip = request
        .extensions()
        .get::<std::net::SocketAddr>()
        .map(|addr| addr.ip())
        .unwrap_or(IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)));

    if !limiter.check(ip).await {
        return Err(AppError::RateLimited);
    }

    Ok(next.run(request).await)
}
