use crate::types::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("Query parameter 'q' is required. Use /search?q=your_query")]
    Missing,
    #[error("Query phrase must be at least 3 characters long.")]
    TooShort,
}

/// Failures that abort a whole scan
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("timed out fetching archive page")]
    Timeout,
    #[error("{0}")]
    Connection(String),
    #[error("archive page returned HTTP {0}")]
    Status(u16),
    #[error("no paste links found on archive page")]
    NoPasteLinks,
}

impl From<reqwest::Error> for ArchiveError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ArchiveError::Timeout
        } else {
            ArchiveError::Connection(e.to_string())
        }
    }
}

/// Failures for a single paste. These never leave the scan loop.
#[derive(Debug, Error)]
pub enum PasteFetchError {
    #[error("timed out")]
    Timeout,
    #[error("request failed: {0}")]
    Request(reqwest::Error),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
}

impl From<reqwest::Error> for PasteFetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            PasteFetchError::Timeout
        } else {
            PasteFetchError::Request(e)
        }
    }
}

#[derive(Debug, Error)]
#[error("snippet window {start}..{end} does not fit a body of {len} bytes")]
pub struct SnippetError {
    pub start: usize,
    pub end: usize,
    pub len: usize,
}

/// Everything an HTTP handler can answer with besides success
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    InvalidQuery(#[from] QueryError),
    #[error(transparent)]
    Archive(#[from] ArchiveError),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            ApiError::Archive(ArchiveError::Timeout) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Archive(ArchiveError::Connection(_)) | ApiError::Archive(ArchiveError::Status(_)) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ApiError::Archive(ArchiveError::NoPasteLinks) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message shown to the caller. Internal details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            ApiError::InvalidQuery(e) => e.to_string(),
            ApiError::Archive(ArchiveError::Timeout) => {
                "Could not connect to Pastebin archive (timeout). Please try again later.".to_string()
            }
            ApiError::Archive(e @ (ArchiveError::Connection(_) | ArchiveError::Status(_))) => {
                format!("Could not connect to Pastebin archive: {}", e)
            }
            ApiError::Archive(ArchiveError::NoPasteLinks) => {
                "Could not parse Pastebin archive page. The page structure may have changed or no pastes found."
                    .to_string()
            }
            ApiError::Internal(_) => {
                "An unexpected server error occurred. Please check server logs.".to_string()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(detail) = &self {
            error!("An unexpected server error occurred: {}", detail);
        }
        let body = Json(ErrorResponse {
            error: self.public_message(),
        });
        (self.status(), body).into_response()
    }
}
