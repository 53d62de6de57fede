//! Trait abstraction for the API client to enable mocking in tests

use super::error::ApiError;
use super::types::{ApiResponse, RegisterRequest, RegisterResponse};
use async_trait::async_trait;

/// Registration endpoint, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationApi: Send + Sync {
    /// `POST /auth/register`. Non-2xx statuses come back as `ApiError::Status`.
    async fn register(
        &self,
        request: &RegisterRequest,
    ) -> Result<ApiResponse<RegisterResponse>, ApiError>;
}
