use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::{ErrorResponse, FieldError};
use crate::services::EpisodeError;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    ValidationError {
        message: String,
        fields: Vec<FieldError>,
    },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::ValidationError { message, fields } => {
                write!(f, "Validation error: {}", message)?;
                for field in fields {
                    write!(f, "; {}: {}", field.field, field.message)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorResponse::new(msg)),
            ApiError::ValidationError { message, fields } => {
                tracing::debug!(?fields, "Rejected request: {}", message);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::with_fields(message, fields),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<EpisodeError> for ApiError {
    fn from(err: EpisodeError) -> Self {
        match err {
            EpisodeError::NotFound(_) => ApiError::NotFound(err.to_string()),
        }
    }
}

impl ApiError {
    pub fn invalid_fields(fields: Vec<FieldError>) -> Self {
        ApiError::ValidationError {
            message: "Validation failed".to_string(),
            fields,
        }
    }
}
