use axum::http::StatusCode;
use thiserror::Error;

pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Failure of a single UI action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GlueError {
    /// A required field was blank or malformed; no request was sent.
    #[error("{0}")]
    Validation(String),
    /// Transport failure or a body that is not the expected JSON.
    #[error("request failed: {0}")]
    Request(String),
}

impl GlueError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn request(err: impl std::fmt::Display) -> Self {
        Self::Request(err.to_string())
    }
}

impl From<reqwest::Error> for GlueError {
    fn from(err: reqwest::Error) -> Self {
        Self::request(err)
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
