use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};

use crate::libs::models::{ErrorBody, ValidationError};
use crate::libs::storage::storage_traits::StoreError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Не все поля заполнены")]
    MissingFields(#[from] ValidationError),

    #[error("Не все поля заполнены")]
    MalformedPayload(String),

    #[error("Ошибка сервера")]
    Storage(#[from] StoreError),

    #[error("Ошибка сервера")]
    Worker(#[from] tokio::task::JoinError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::MissingFields(err) => {
                warn!("Rejected letter: {err}");
                StatusCode::BAD_REQUEST
            }
            AppError::MalformedPayload(reason) => {
                warn!("Rejected letter payload: {reason}");
                StatusCode::BAD_REQUEST
            }
            AppError::Storage(err) => {
                error!("Storage failure: {err}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Worker(err) => {
                error!("Storage worker failed: {err}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Failed to open storage: {0}")]
    Storage(#[from] StoreError),
    #[error("Failed to bind listener: {0}")]
    Io(#[from] std::io::Error),
}
