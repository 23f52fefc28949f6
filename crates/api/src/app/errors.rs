//! Error translation: every failure leaving a handler goes through here.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use backoffice_core::{ServiceError, StoreError};
use backoffice_parties::repository::{CUSTOMERS_NATIONAL_ID_KEY, DOCUMENTS_TYPE_NUMBER_KEY};

const INVALID_PARAMETER: &str = "Invalid Parameter";
const DUPLICATE_ENTRY: &str = "Duplicate Entry";
const RESOURCE_NOT_FOUND: &str = "Resource Not Found";
const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

const CONVERSION_MESSAGE: &str = "Failed to convert data.";
const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred.";
const MISSING_REFERENCE_MESSAGE: &str = "referenced record does not exist";

/// Payload returned for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub code: u16,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorBody {
    fn new(status: StatusCode, title: &str, message: impl Into<String>) -> Self {
        Self {
            code: status.as_u16(),
            title: title.to_string(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Boundary error for handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Body, query or path could not be parsed.
    #[error("rejected request: {0}")]
    Rejected(String),

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Rejected(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Rejected(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Rejected(rejection.body_text())
    }
}

/// Map a service failure to its status and payload.
pub fn translate(err: &ServiceError) -> (StatusCode, ErrorBody) {
    let (status, title, message) = match err {
        ServiceError::Validation(msg) => (StatusCode::BAD_REQUEST, INVALID_PARAMETER, msg.clone()),
        ServiceError::Duplicate(msg) => (StatusCode::BAD_REQUEST, DUPLICATE_ENTRY, msg.clone()),
        ServiceError::NotFound(msg) => (StatusCode::NOT_FOUND, RESOURCE_NOT_FOUND, msg.clone()),
        ServiceError::Store(StoreError::UniqueViolation { constraint }) => (
            StatusCode::BAD_REQUEST,
            DUPLICATE_ENTRY,
            unique_violation_message(constraint).to_string(),
        ),
        ServiceError::Store(StoreError::ForeignKeyViolation { .. }) => (
            StatusCode::BAD_REQUEST,
            INVALID_PARAMETER,
            MISSING_REFERENCE_MESSAGE.to_string(),
        ),
        ServiceError::Conversion(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            INTERNAL_SERVER_ERROR,
            CONVERSION_MESSAGE.to_string(),
        ),
        ServiceError::Customer(msg) | ServiceError::Document(msg) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            INTERNAL_SERVER_ERROR,
            msg.clone(),
        ),
        ServiceError::Store(StoreError::Unavailable(_)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            INTERNAL_SERVER_ERROR,
            UNEXPECTED_MESSAGE.to_string(),
        ),
    };
    (status, ErrorBody::new(status, title, message))
}

fn unique_violation_message(constraint: &str) -> &'static str {
    match constraint {
        CUSTOMERS_NATIONAL_ID_KEY => "This national identifier is already registered.",
        DOCUMENTS_TYPE_NUMBER_KEY => "Document already saved.",
        _ => "A record with the same unique key already exists.",
    }
}

impl ApiError {
    pub fn status_and_body(&self) -> (StatusCode, ErrorBody) {
        match self {
            ApiError::Service(err) => translate(err),
            ApiError::Rejected(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody::new(StatusCode::BAD_REQUEST, INVALID_PARAMETER, msg.clone()),
            ),
            ApiError::Unexpected(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_SERVER_ERROR,
                    UNEXPECTED_MESSAGE,
                ),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        if status.is_server_error() {
            tracing::error!(error = ?self, status = status.as_u16(), "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }
        (status, Json(body)).into_response()
    }
}
