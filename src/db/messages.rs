use sqlx::{Pool, Sqlite};
use uuid::Uuid;
use crate::db::models::Message;
use crate::error::AppError;

pub struct MessageRepository;

impl MessageRepository {
    pub async fn create(
        pool: &Pool<Sqlite>,
        sender_id: String,
        receiver_id: String,
        content: String,
    ) -> Result<Message, AppError> {
        let id = Uuid::new_v4().to_string();
        let created_at = chrono::Utc::now().timestamp();

        let message = sqlx::query_as::<_, Message>(
            r#"
INSERT INTO messages (id, sender_id, receiver_id, content, created_at)
VALUES (?, ?, ?, ?, ?)
RETURNING *
            "#,
        )
        .bind(&id)
        .bind(&sender_id)
        .bind(&receiver_id)
        .bind(&content)
        .bind(created_at)
        .fetch_one(pool)
        .await?;

        Ok(message)
    }

    /// Both directions of a two-party thread, oldest first. The rowid
    /// tiebreak keeps same-second messages in insertion order.
    pub async fn get_conversation(
        pool: &Pool<Sqlite>,
        user_a: &str,
        user_b: &str,
    ) -> Result<Vec<Message>, AppError> {
        let messages = sqlx::query_as::<_, Message>(
            r#"
SELECT id, sender_id, receiver_id, content, created_at
FROM messages
WHERE (sender_id = ?1 AND receiver_id = ?2)
   OR (sender_id = ?2 AND receiver_id = ?1)
ORDER BY created_at ASC, rowid ASC
            "#,
        )
        .bind(user_a)
        .bind(user_b)
        .fetch_all(pool)
        .await?;

        Ok(messages)
    }
}
