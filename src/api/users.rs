use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::api::state::AppState;
use crate::db::UserRepository;
use crate::error::AppError;

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub full_name: String,
    pub profile_pic: String,
    pub about: String,
    pub created_at: i64,
}

/// GET /api/users/:id/profile (requires auth)
pub async fn get_user_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ProfileResponse>, AppError> {
    let user = UserRepository::get_profile(&state.db, &user_id)
        .await?
        .ok_or(AppError::NotFound("user"))?;

    Ok(Json(ProfileResponse {
        full_name: user.full_name,
        profile_pic: if user.profile_pic.is_empty() {
            "/default-avatar.png".to_string()
        } else {
            user.profile_pic
        },
        about: if user.about.is_empty() {
            "No bio available".to_string()
        } else {
            user.about
        },
        created_at: user.created_at,
    }))
}
