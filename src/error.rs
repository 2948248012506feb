use thiserror::Error;

/// Session verification failure modes. Kept distinct internally so callers
/// and tests can tell them apart; outwardly they all collapse into the same
/// generic 401 so responses never reveal which check failed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("no session token provided")]
    MissingCredential,

    #[error("unknown or malformed session token")]
    InvalidCredential,

    #[error("session expired")]
    ExpiredCredential,

    #[error("session subject no longer exists")]
    UnknownSubject,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("unauthorized")]
    Unauthorized(#[from] AuthError),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(String),

    #[error("too many requests")]
    RateLimited,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("cryptography error: {0}")]
    Crypto(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

// Axum IntoResponse implementation for HTTP errors
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Unauthorized(reason) => {
                // Log the real reason, answer with the generic one
                tracing::warn!("auth rejected: {}", reason);
                (StatusCode::UNAUTHORIZED, "unauthorized".to_string())
            }
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "invalid credentials".to_string())
            }
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::RateLimited => {
                (StatusCode::TOO_MANY_REQUESTS, "too many requests".to_string())
            }
            AppError::Database(_)
            | AppError::Crypto(_)
            | AppError::Config(_)
            | AppError::Internal(_) => {
                tracing::error!("request failed: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        let body = serde_json::json!({
            "message": message,
        });

        (status, axum::Json(body)).into_response()
    }
}
