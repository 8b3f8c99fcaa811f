//! Application error kinds and their HTTP mapping.
//!
//! Every failure in a request ends up as an [`AppError`], and
//! [`AppError::into_response`] is the only place that turns one into an HTTP
//! response. The set of kinds is closed; anything that does not fit one of the
//! fixed kinds is carried as [`AppError::Other`] and answered with `400` and
//! its literal text.
//!
//! # Mapping
//!
//! | kind                 | status | message                   |
//! |----------------------|--------|---------------------------|
//! | `BadRequest`         | 400    | `Bad Request`             |
//! | `TokenParse`         | 400    | `Cannot Read JWT Payload` |
//! | `InvalidSignature`   | 400    | `Invalid JWT Signature`   |
//! | `TokenExpired`       | 400    | `Invalid JWT Signature`   |
//! | `Unauthorized`       | 401    | `JWT Token Is Required`   |
//! | `NotFound`           | 404    | `Page Not Found`          |
//! | `MethodNotAllowed`   | 405    | `Method Not Allowed`      |
//! | `Internal`           | 500    | error text                |
//! | `Other`              | 400    | error text                |

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::response::{ErrorResponse, Message, Meta};

/// Error kinds produced by handlers, middleware and the service layer.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("bad request")]
    BadRequest,

    #[error("cannot parse JWT payload")]
    TokenParse,

    #[error("JWT signature mismatch")]
    InvalidSignature,

    /// Expired tokens are answered like a signature mismatch (400), not 401.
    #[error("JWT token has expired")]
    TokenExpired,

    #[error("JWT token is required")]
    Unauthorized,

    #[error("resource not found")]
    NotFound,

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("{0}")]
    Internal(#[source] anyhow::Error),

    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Wraps an arbitrary cause as an internal (500) error.
    pub fn internal(cause: impl Into<anyhow::Error>) -> Self {
        Self::Internal(cause.into())
    }

    /// Builds a 400 error answered with the given text.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }

    /// Maps a legacy string identifier (`"400"`, `"401-Expired"`, ...) onto its kind.
    ///
    /// Unknown identifiers become [`AppError::Other`] carrying the identifier
    /// itself. `"500"` keeps its text as the cause, so the message is `500`.
    pub fn from_identifier(identifier: &str) -> Self {
        match identifier {
            "400" => Self::BadRequest,
            "400-Token-Parse" => Self::TokenParse,
            "400-Signature" => Self::InvalidSignature,
            "401-Expired" => Self::TokenExpired,
            "401" => Self::Unauthorized,
            "404" => Self::NotFound,
            "405" => Self::MethodNotAllowed,
            "500" => Self::Internal(anyhow::anyhow!("500")),
            other => Self::Other(other.to_string()),
        }
    }

    /// HTTP status this error is answered with.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest
            | Self::TokenParse
            | Self::InvalidSignature
            | Self::TokenExpired
            | Self::Other(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message placed under `meta.message.errors`.
    pub fn message(&self) -> String {
        match self {
            Self::BadRequest => "Bad Request".to_string(),
            Self::TokenParse => "Cannot Read JWT Payload".to_string(),
            Self::InvalidSignature | Self::TokenExpired => "Invalid JWT Signature".to_string(),
            Self::Unauthorized => "JWT Token Is Required".to_string(),
            Self::NotFound => "Page Not Found".to_string(),
            Self::MethodNotAllowed => "Method Not Allowed".to_string(),
            Self::Internal(cause) => cause.to_string(),
            Self::Other(text) => text.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            Self::Internal(cause) => tracing::error!(error = ?cause, "Request failed"),
            Self::Other(text) => tracing::warn!(status = status.as_u16(), error = %text, "Request rejected"),
            kind => tracing::debug!(status = status.as_u16(), error = %kind, "Request rejected"),
        }

        let body = ErrorResponse::empty(Meta::new(status, Message::errors(self.message())));

        (status, axum::Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return Self::Other(format!(
                "Unique constraint violation: {}",
                db.constraint().unwrap_or("unknown")
            ));
        }

        match e {
            sqlx::Error::RowNotFound => Self::NotFound,
            other => Self::Internal(anyhow::Error::new(other).context("Database error")),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        Self::Other(e.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        Self::Other(e.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Other(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::Other(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Other(rejection.body_text())
    }
}
