use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Authentication credentials were not provided or are invalid")]
    Unauthorized,
    #[error("{0}")]
    Forbidden(String),
    #[error("No tenant associated with this user")]
    NoTenant,
    #[error("{0}")]
    Validation(String),
    #[error("Internal server error")]
    Internal,
}

impl AppError {
    fn is_unique_violation(err: &sqlx::Error) -> bool {
        // 2067 = SQLite unique constraint, 23505 = PostgreSQL unique violation
        err.as_database_error()
            .and_then(|db| db.code())
            .is_some_and(|code| code == "2067" || code == "23505")
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Database(e) if Self::is_unique_violation(e) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) | AppError::NoTenant => StatusCode::FORBIDDEN,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Database(e) if status == StatusCode::CONFLICT => {
                warn!("Unique constraint violated: {}", e);
                "Resource already exists (duplicate entry)".to_string()
            }
            AppError::Database(e) => {
                error!("Database error: {:?}", e);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
