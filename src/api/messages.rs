use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::api::state::AppState;
use crate::db::{Message, MessageRepository, UserProfile, UserRepository};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

/// GET /api/messages/users (requires auth)
///
/// The sidebar: every user the caller could message, i.e. everyone but
/// themselves.
pub async fn get_users_for_sidebar(
    State(state): State<AppState>,
    Extension(me): Extension<UserProfile>,
) -> Result<Json<Vec<UserProfile>>, AppError> {
    let users = UserRepository::list_others(&state.db, &me.id).await?;

    Ok(Json(users))
}

/// GET /api/messages/:id (requires auth)
///
/// Full thread between the caller and the peer, oldest first. Either party
/// sees the same sequence; an unknown peer simply has no messages.
pub async fn get_messages(
    State(state): State<AppState>,
    Extension(me): Extension<UserProfile>,
    Path(peer_id): Path<String>,
) -> Result<Json<Vec<Message>>, AppError> {
    let messages = MessageRepository::get_conversation(&state.db, &me.id, &peer_id).await?;

    Ok(Json(messages))
}

/// POST /api/messages/send/:id (requires auth)
pub async fn send_message(
    State(state): State<AppState>,
    Extension(me): Extension<UserProfile>,
    Path(recipient_id): Path<String>,
    Json(req): Json<SendMessageRequest>,
) -> Result<Json<Message>, AppError> {
    // Validate content before touching storage
    let content = req.content.trim();
    if content.is_empty() {
        return Err(AppError::Validation("Message content must not be empty".to_string()));
    }
    if content.len() > 4096 {
        return Err(AppError::Validation("Message must be at most 4096 characters".to_string()));
    }

    // The recipient must exist before anything is persisted
    UserRepository::get_profile(&state.db, &recipient_id)
        .await?
        .ok_or(AppError::NotFound("recipient"))?;

    let message = MessageRepository::create(
        &state.db,
        me.id.clone(),
        recipient_id,
        content.to_string(),
    ).await?;

    Ok(Json(message))
}
