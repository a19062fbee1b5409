//! Ошибки уровня HTTP и их отображение в коды ответа.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::repositories::RepoError;
use crate::seating::SeatLayoutError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    SeatLayout(#[from] SeatLayoutError),

    #[error(transparent)]
    Repo(#[from] RepoError),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::SeatLayout(SeatLayoutError::InvalidIdentifier(_)) => StatusCode::BAD_REQUEST,
            // Нет кинотеатра или не прочитали билеты - схему не отдаём вовсе
            AppError::SeatLayout(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Repo(RepoError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Repo(RepoError::Conflict(_)) => StatusCode::CONFLICT,
            AppError::Repo(RepoError::Database(_)) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            tracing::error!("request failed: {}", self);
            match &self {
                AppError::SeatLayout(SeatLayoutError::CinemaResolutionFailed { .. }) => {
                    "Failed to resolve cinema for showtime".to_string()
                }
                AppError::SeatLayout(SeatLayoutError::BookingFetchFailed { .. }) => {
                    "Failed to fetch booked seats".to_string()
                }
                _ => "Internal server error".to_string(),
            }
        } else {
            self.to_string()
        };
        (status, message).into_response()
    }
}
