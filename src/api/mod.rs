//! API client module for HTTP communication with the backend

mod client;
mod error;
mod traits;
mod types;

pub use client::ApiClient;
pub use error::ApiError;
pub use traits::RegistrationApi;
pub use types::{ApiResponse, RegisterRequest, RegisterResponse};

#[cfg(test)]
pub use types::{ErrorBody, FieldIssue};

#[cfg(test)]
pub use traits::MockRegistrationApi;
