use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::{db::StoreError, services::question_service::SelectError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Select(#[from] SelectError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

// Convert AppError to an HTTP response
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Store(StoreError::StorageUnavailable { .. }) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Storage unavailable".into())
            }
            AppError::Store(StoreError::Csv(_)) | AppError::Store(StoreError::Json(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Storage unavailable".into())
            }
            AppError::Store(StoreError::InvalidRow { .. })
            | AppError::Store(StoreError::SchemaMismatch(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, self.to_string())
            }
            AppError::Store(StoreError::DuplicateNr(_)) | AppError::Store(StoreError::NrExhausted) => {
                (StatusCode::CONFLICT, self.to_string())
            }
            AppError::Select(SelectError::EmptyResultSet) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Select(SelectError::InvalidCount(_)) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".into()),
        };

        tracing::error!(?self);
        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

pub type Result<T> = std::result::Result<T, AppError>;
