use axum::{
    extract::State,
    http::HeaderMap,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::api::middleware::bearer_token;
use crate::api::state::AppState;
use crate::crypto::{generate_salt, hash_password, verify_password};
use crate::db::{SessionRepository, UserProfile, UserRepository};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub profile_pic: Option<String>,
    pub about: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub expires_at: i64,
    pub user: UserProfile,
}

/// Validate and normalize an email address used as the login key
fn validate_email(email: &str) -> Result<String, AppError> {
    let trimmed = email.trim();

    if trimmed.len() < 3 || trimmed.len() > 254 {
        return Err(AppError::Validation("A valid email is required".to_string()));
    }

    // Enough to reject obvious junk; deliverability is the client's problem
    let (local, domain) = trimmed
        .split_once('@')
        .ok_or_else(|| AppError::Validation("A valid email is required".to_string()))?;
    if local.is_empty() || domain.is_empty() {
        return Err(AppError::Validation("A valid email is required".to_string()));
    }

    Ok(trimmed.to_lowercase())
}

fn validate_full_name(full_name: &str) -> Result<String, AppError> {
    let trimmed = full_name.trim();

    if trimmed.is_empty() {
        return Err(AppError::Validation("Full name is required".to_string()));
    }
    if trimmed.len() > 100 {
        return Err(AppError::Validation("Full name must be at most 100 characters".to_string()));
    }

    Ok(trimmed.to_string())
}

/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let email = validate_email(&req.email)?;
    let full_name = validate_full_name(&req.full_name)?;

    if req.password.len() < 6 {
        return Err(AppError::Validation("Password must be at least 6 characters".to_string()));
    }

    // Check if the email is taken
    if UserRepository::get_by_email(&state.db, &email).await?.is_some() {
        return Err(AppError::Conflict("Email already exists".to_string()));
    }

    // Generate salt and hash password
    let salt = generate_salt();
    let password_hash = hash_password(&req.password, &salt)?;

    let user = UserRepository::create(
        &state.db,
        email,
        full_name,
        &password_hash,
        &salt,
    ).await?;

    let session = SessionRepository::create(
        &state.db,
        user.id.clone(),
        state.config.session_expiry_hours,
    ).await?;

    Ok(Json(AuthResponse {
        token: session.token,
        expires_at: session.expires_at,
        user,
    }))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let email = req.email.trim().to_lowercase();

    // Unknown email and wrong password answer identically
    let user = UserRepository::get_by_email(&state.db, &email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    let stored_hash: [u8; 32] = user.password_hash
        .as_slice()
        .try_into()
        .map_err(|_| AppError::Internal("Invalid stored hash".to_string()))?;

    if !verify_password(&req.password, &stored_hash, &user.password_salt)? {
        return Err(AppError::InvalidCredentials);
    }

    let session = SessionRepository::create(
        &state.db,
        user.id.clone(),
        state.config.session_expiry_hours,
    ).await?;

    Ok(Json(AuthResponse {
        token: session.token,
        expires_at: session.expires_at,
        user: user.into(),
    }))
}

/// POST /api/auth/logout
///
/// Unguarded: with a token it invalidates that session, without one it is a
/// no-op. Either way the client ends up logged out.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, AppError> {
    if let Some(token) = bearer_token(&headers).ok().flatten() {
        SessionRepository::delete(&state.db, token).await?;
    }

    Ok(Json(serde_json::json!({"message": "logged out"})))
}

/// PUT /api/auth/update-profile (requires auth)
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<UserProfile>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<UserProfile>, AppError> {
    if req.full_name.is_none() && req.profile_pic.is_none() && req.about.is_none() {
        return Err(AppError::Validation("Nothing to update".to_string()));
    }

    let full_name = match req.full_name.as_deref() {
        Some(name) => Some(validate_full_name(name)?),
        None => None,
    };

    let updated = UserRepository::update_profile(
        &state.db,
        &user.id,
        full_name.as_deref(),
        req.profile_pic.as_deref(),
        req.about.as_deref(),
    )
    .await?
    .ok_or(AppError::NotFound("user"))?;

    Ok(Json(updated))
}

/// GET /api/auth/check (requires auth via middleware)
///
/// Returns the identity the route guard resolved, verbatim. Clients use it
/// to restore a session on reload.
pub async fn check_auth(
    Extension(user): Extension<UserProfile>,
) -> Json<UserProfile> {
    Json(user)
}
