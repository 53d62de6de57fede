//! Error classification for API calls

use super::types::ErrorBody;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status
    #[error("server responded with {status}")]
    Status { status: StatusCode, body: ErrorBody },
    /// The request was sent but no response arrived in time
    #[error("request timed out")]
    Timeout,
    /// The request was sent but no response was received
    #[error("unable to reach server: {0}")]
    Connection(String),
    /// The request could not be built
    #[error("{0}")]
    Request(String),
}

impl ApiError {
    #[cfg(test)]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Timeout)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_builder() {
            ApiError::Request(err.to_string())
        } else {
            ApiError::Connection(err.to_string())
        }
    }
}
