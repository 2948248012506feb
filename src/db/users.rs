use sqlx::{Pool, Sqlite};
use uuid::Uuid;
use crate::db::models::{User, UserProfile};
use crate::error::AppError;

pub struct UserRepository;

impl UserRepository {
    pub async fn create(
        pool: &Pool<Sqlite>,
        email: String,
        full_name: String,
        password_hash: &[u8; 32],
        password_salt: &[u8; 32],
    ) -> Result<UserProfile, AppError> {
        let id = Uuid::new_v4().to_string();
        let created_at = chrono::Utc::now().timestamp();

        let user = sqlx::query_as::<_, UserProfile>(
            r#"
INSERT INTO users (id, email, full_name, password_hash, password_salt, created_at)
VALUES (?, ?, ?, ?, ?, ?)
RETURNING id, email, full_name, profile_pic, about, created_at
            "#,
        )
        .bind(&id)
        .bind(&email)
        .bind(&full_name)
        .bind(password_hash.as_slice())
        .bind(password_salt.as_slice())
        .bind(created_at)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Credential-bearing lookup, for the login path only.
    pub async fn get_by_email(
        pool: &Pool<Sqlite>,
        email: &str,
    ) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE email = ?"
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    pub async fn get_profile(
        pool: &Pool<Sqlite>,
        id: &str,
    ) -> Result<Option<UserProfile>, AppError> {
        let user = sqlx::query_as::<_, UserProfile>(
            "SELECT id, email, full_name, profile_pic, about, created_at FROM users WHERE id = ?"
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Everyone except the caller, in a stable order for the sidebar.
    pub async fn list_others(
        pool: &Pool<Sqlite>,
        caller_id: &str,
    ) -> Result<Vec<UserProfile>, AppError> {
        let users = sqlx::query_as::<_, UserProfile>(
            r#"
SELECT id, email, full_name, profile_pic, about, created_at
FROM users
WHERE id != ?
ORDER BY full_name, id
            "#,
        )
        .bind(caller_id)
        .fetch_all(pool)
        .await?;

        Ok(users)
    }

    /// Applies only the provided fields; absent fields keep their value.
    pub async fn update_profile(
        pool: &Pool<Sqlite>,
        id: &str,
        full_name: Option<&str>,
        profile_pic: Option<&str>,
        about: Option<&str>,
    ) -> Result<Option<UserProfile>, AppError> {
        let user = sqlx::query_as::<_, UserProfile>(
            r#"
UPDATE users
SET full_name = COALESCE(?, full_name),
    profile_pic = COALESCE(?, profile_pic),
    about = COALESCE(?, about)
WHERE id = ?
RETURNING id, email, full_name, profile_pic, about, created_at
            "#,
        )
        .bind(full_name)
        .bind(profile_pic)
        .bind(about)
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }
}
