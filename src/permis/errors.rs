//! # Permis Errors
//!
//! Error taxonomy for the record service and its HTTP mapping.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Result type for record operations
pub type PermisResult<T> = Result<T, PermisError>;

const INVALID_ID: &str = "ID invalide";
const MISSING_FIELDS: &str = "Tous les champs obligatoires doivent être remplis";

/// Record service errors
#[derive(Debug, Error)]
pub enum PermisError {
    /// Malformed or missing input (client fault)
    #[error("{0}")]
    Validation(String),

    /// No record with this id
    #[error("Permis non trouvé")]
    NotFound(i32),

    /// Underlying database failure. The message never carries the cause.
    #[error("Erreur serveur")]
    Storage(#[source] sqlx::Error),

    /// Request body could not be read (e.g. over the size limit)
    #[error("{message}")]
    Body { status: StatusCode, message: String },
}

impl PermisError {
    pub fn invalid_id() -> Self {
        PermisError::Validation(INVALID_ID.to_string())
    }

    /// Validation error naming the offending fields
    pub fn missing_fields(fields: &[&str]) -> Self {
        if fields.is_empty() {
            PermisError::Validation(MISSING_FIELDS.to_string())
        } else {
            PermisError::Validation(format!("{}: {}", MISSING_FIELDS, fields.join(", ")))
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            PermisError::Validation(_) => StatusCode::BAD_REQUEST,
            PermisError::NotFound(_) => StatusCode::NOT_FOUND,
            PermisError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            PermisError::Body { status, .. } => *status,
        }
    }
}

/// Malformed payloads are client input errors (400). Failures to read the
/// body keep the status the extractor chose.
impl From<JsonRejection> for PermisError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(_)
            | JsonRejection::JsonSyntaxError(_)
            | JsonRejection::MissingJsonContentType(_) => {
                PermisError::Validation(rejection.body_text())
            }
            other => PermisError::Body {
                status: other.status(),
                message: other.body_text(),
            },
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<PermisError> for ErrorResponse {
    fn from(err: PermisError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

impl IntoResponse for PermisError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}
