//! Request and response bodies of the registration API

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// Body of `POST /auth/register`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Successful-status body: `{ success, message, ... }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

impl RegisterResponse {
    pub fn is_success(&self) -> bool {
        self.success == Some(true)
    }
}

/// One entry of a 400 response's `errors` array
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FieldIssue {
    #[serde(default)]
    pub param: Option<String>,
    /// Newer validator versions report the field under `path`
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
}

impl FieldIssue {
    pub fn field_name(&self) -> Option<&str> {
        self.param.as_deref().or(self.path.as_deref())
    }
}

/// Error-status body: `{ message, errors: [{ param, msg }] }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Option<Vec<FieldIssue>>,
}

/// A 2xx response with its decoded body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse<T> {
    pub status: StatusCode,
    pub body: T,
}

/// Decode a JSON body, falling back to the default when the server sent
/// something else (empty body, HTML error page, ...)
pub(crate) fn decode_lenient<T>(bytes: &[u8]) -> T
where
    T: for<'de> Deserialize<'de> + Default,
{
    if bytes.is_empty() {
        return T::default();
    }
    match serde_json::from_slice(bytes) {
        Ok(body) => body,
        Err(err) => {
            tracing::debug!("Response body is not the expected JSON: {err}");
            T::default()
        }
    }
}
