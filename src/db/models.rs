use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row including the stored credential. Deliberately does not
/// derive `Serialize`: this type must never cross the response boundary.
/// Only the login path reads it; everything else works on [`UserProfile`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub password_hash: Vec<u8>,
    pub password_salt: Vec<u8>,
    pub profile_pic: String,
    pub about: String,
    pub created_at: i64,
}

/// Public projection of a user, safe to serialize into any response.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub profile_pic: String,
    pub about: String,
    pub created_at: i64,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        UserProfile {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            profile_pic: user.profile_pic,
            about: user.about,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: String,
    pub user_id: String,
    pub token: String,
    pub expires_at: i64,
    pub created_at: i64,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
    pub created_at: i64,
}
