use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wire contract for every failed request.
///
/// Built once by the classifier from an [`AppError`] and never mutated
/// afterwards. `status` is always one of the enumerated codes the classifier
/// produces (400, 401, 404, 500).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<BTreeMap<String, Vec<String>>>,
}

impl ErrorBody {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            message: message.into(),
            details: None,
        }
    }

    /// The generic 500 body. The panic recovery layer responds with this
    /// directly; the original diagnostic stays in the server logs.
    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "We encountered an error while processing your request.",
        )
    }
}

impl IntoResponse for ErrorBody {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("bad request: {0}")]
    BadRequest(anyhow::Error),

    #[error("not found")]
    NotFound,

    #[error("unauthorized")]
    Unauthorized,

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),

    #[error("configuration error: {0}")]
    Config(anyhow::Error),
}

impl AppError {
    /// Map a failure onto the fixed wire contract.
    ///
    /// Pure and synchronous; the match is exhaustive so no failure kind can
    /// skip classification. Not-found and internal bodies are generic and
    /// never carry identifiers or diagnostics.
    pub fn classify(&self) -> ErrorBody {
        match self {
            AppError::Validation(errors) => ErrorBody {
                status: StatusCode::BAD_REQUEST.as_u16(),
                message: "There is some problem with the data you submitted.".to_string(),
                details: Some(validation_details(errors)),
            },
            AppError::BadRequest(err) => ErrorBody::new(StatusCode::BAD_REQUEST, err.to_string()),
            AppError::NotFound => ErrorBody::new(
                StatusCode::NOT_FOUND,
                "The requested resource was not found.",
            ),
            AppError::Unauthorized => ErrorBody::new(
                StatusCode::UNAUTHORIZED,
                "You are not authenticated to perform the requested action.",
            ),
            AppError::Internal(_) | AppError::Config(_) => ErrorBody::internal(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = self.classify();
        // 500s are always server-logged with the original cause; 4xx are not.
        if body.status == StatusCode::INTERNAL_SERVER_ERROR.as_u16() {
            tracing::error!(error = %self, "request failed with internal error");
        }
        body.into_response()
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(anyhow::Error::new(err))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(anyhow::Error::new(err))
    }
}

fn validation_details(errors: &validator::ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .iter()
        .map(|(field, field_errors)| {
            let messages = field_errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}
