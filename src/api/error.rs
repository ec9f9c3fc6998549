//! HTTP error mapping to RFC-9457 Problem Details.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::domain::DomainError;

/// RFC-9457 Problem Details body for API errors.
#[derive(Debug, Serialize, ToSchema)]
pub struct Problem {
    /// A URI reference that identifies the problem type.
    #[serde(rename = "type")]
    pub type_uri: String,
    /// A short, human-readable summary of the problem type.
    pub title: String,
    /// The HTTP status code.
    pub status: u16,
    /// A human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Problem {
    pub fn new(status: StatusCode, title: impl Into<String>) -> Self {
        Self {
            type_uri: format!("https://httpstatuses.io/{}", status.as_u16()),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
        }
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// Maps domain failures to stable HTTP responses. Internal errors are
/// logged server-side and surfaced as `500` without leaking details.
pub fn map_domain_error(error: DomainError) -> Problem {
    match error {
        DomainError::NotFound { resource, id } => {
            Problem::new(StatusCode::NOT_FOUND, "Not Found")
                .with_detail(format!("{resource} with id '{id}' was not found"))
        }

        DomainError::Conflict { .. } => {
            Problem::new(StatusCode::CONFLICT, "Conflict").with_detail(error.to_string())
        }

        DomainError::Validation(message) => {
            Problem::new(StatusCode::BAD_REQUEST, "Validation Error").with_detail(message)
        }

        DomainError::Internal(err) => {
            error!("Internal error: {err}");
            Problem::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        }
    }
}
