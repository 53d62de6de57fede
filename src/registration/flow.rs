//! Submission of a validated registration, with the timeout retry loop

use crate::api::{ApiError, ApiResponse, RegisterRequest, RegisterResponse, RegistrationApi};
use crate::state::events::EventSender;
use crate::state::{AppEvent, Field, FieldErrors, StatusMessage, SubmitOutcome};
use reqwest::StatusCode;
use std::time::Duration;

pub const MSG_SUCCESS: &str = "Registration successful! Redirecting to login...";
pub const MSG_GENERIC_FAILURE: &str = "Registration failed. Please try again.";
pub const MSG_EMAIL_TAKEN_FIELD: &str = "Email already registered";
pub const MSG_EMAIL_TAKEN: &str = "Email already registered. Please use a different email.";
pub const MSG_CHECK_INPUT: &str = "Please check your input and try again.";
pub const MSG_TIMED_OUT: &str = "Server is taking too long to respond. The server may be waking up from sleep. Please wait a moment and try again, or refresh the page.";
pub const MSG_UNREACHABLE: &str =
    "Unable to connect to server. Please check your internet connection and try again.";

/// Fixed-delay retry for timed-out submissions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Pause before each retry
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            delay: Duration::from_secs(3),
        }
    }
}

/// Submit `request`, reporting banners and field errors through `events`.
///
/// Only timeouts are retried. Every other failure is terminal and ends with
/// a danger banner.
pub async fn submit_registration(
    api: &dyn RegistrationApi,
    request: &RegisterRequest,
    policy: RetryPolicy,
    events: &EventSender,
) -> SubmitOutcome {
    let mut retries_left = policy.max_retries;
    let mut attempt = 1;

    loop {
        tracing::info!(attempt, "Submitting registration");

        match api.register(request).await {
            Ok(response) => return finish_response(response, events),
            Err(error) if error.is_timeout() && retries_left > 0 => {
                retries_left -= 1;
                let retry = policy.max_retries - retries_left;
                tracing::warn!(
                    retry,
                    max_retries = policy.max_retries,
                    "Registration timed out, retrying in {:?}",
                    policy.delay
                );
                emit(
                    events,
                    AppEvent::Status(StatusMessage::warning(format!(
                        "Server is waking up... Retrying ({retry}/{})...",
                        policy.max_retries
                    ))),
                );
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
            Err(error) => return finish_error(error, events),
        }
    }
}

fn emit(events: &EventSender, event: AppEvent) {
    if events.send(event).is_err() {
        tracing::debug!("UI loop is gone, dropping submission event");
    }
}

fn finish_response(response: ApiResponse<RegisterResponse>, events: &EventSender) -> SubmitOutcome {
    let status = response.status;
    let accepted = matches!(status, StatusCode::OK | StatusCode::CREATED) && response.body.is_success();

    if accepted {
        tracing::info!(%status, "Registration accepted");
        emit(events, AppEvent::Status(StatusMessage::success(MSG_SUCCESS)));
        SubmitOutcome::Registered
    } else {
        tracing::warn!(%status, "Registration response did not report success");
        let text = response
            .body
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| MSG_GENERIC_FAILURE.to_string());
        emit(events, AppEvent::Status(StatusMessage::danger(text)));
        SubmitOutcome::Failed
    }
}

fn finish_error(error: ApiError, events: &EventSender) -> SubmitOutcome {
    let (field_errors, banner) = describe_failure(error);
    if !field_errors.is_empty() {
        emit(events, AppEvent::FieldErrors(field_errors));
    }
    emit(events, AppEvent::Status(StatusMessage::danger(banner)));
    SubmitOutcome::Failed
}

/// Field errors and banner text for a terminal failure
pub fn describe_failure(error: ApiError) -> (FieldErrors, String) {
    let mut field_errors = FieldErrors::new();

    let banner = match error {
        ApiError::Status { status, body } => {
            tracing::warn!(%status, "Registration rejected");
            match status {
                StatusCode::CONFLICT => {
                    field_errors.set(Field::Email, MSG_EMAIL_TAKEN_FIELD);
                    MSG_EMAIL_TAKEN.to_string()
                }
                StatusCode::BAD_REQUEST => {
                    for issue in body.errors.iter().flatten() {
                        let (Some(name), Some(msg)) = (issue.field_name(), issue.msg.as_deref())
                        else {
                            continue;
                        };
                        match Field::from_param(name) {
                            Some(field) => field_errors.set(field, msg),
                            None => tracing::debug!("Ignoring error for unknown field '{name}'"),
                        }
                    }
                    body.message
                        .filter(|m| !m.is_empty())
                        .unwrap_or_else(|| MSG_CHECK_INPUT.to_string())
                }
                _ => body
                    .message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| MSG_GENERIC_FAILURE.to_string()),
            }
        }
        ApiError::Timeout => {
            tracing::error!("Registration timed out, giving up");
            MSG_TIMED_OUT.to_string()
        }
        ApiError::Connection(reason) => {
            tracing::error!("Registration could not reach the server: {reason}");
            MSG_UNREACHABLE.to_string()
        }
        ApiError::Request(reason) => {
            tracing::error!("Registration request could not be built: {reason}");
            if reason.is_empty() {
                MSG_GENERIC_FAILURE.to_string()
            } else {
                reason
            }
        }
    };

    (field_errors, banner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ErrorBody, FieldIssue, MockRegistrationApi};
    use crate::state::{events, StatusKind};
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::time::Instant;

    fn request() -> RegisterRequest {
        RegisterRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "engine42".to_string(),
        }
    }

    fn ok(status: StatusCode, success: Option<bool>, message: Option<&str>) -> ApiResponse<RegisterResponse> {
        ApiResponse {
            status,
            body: RegisterResponse {
                success,
                message: message.map(str::to_string),
            },
        }
    }

    fn status_error(status: StatusCode, body: ErrorBody) -> ApiError {
        ApiError::Status { status, body }
    }

    fn drain(rx: &mut events::EventReceiver) -> Vec<AppEvent> {
        let mut out = Vec::new();
        while let Ok(event) = rx.try_recv() {
            out.push(event);
        }
        out
    }

    fn last_banner(events: &[AppEvent]) -> StatusMessage {
        events
            .iter()
            .rev()
            .find_map(|e| match e {
                AppEvent::Status(s) => Some(s.clone()),
                _ => None,
            })
            .expect("a banner was emitted")
    }

    #[tokio::test]
    async fn test_created_with_success_flag_registers() {
        let mut api = MockRegistrationApi::new();
        api.expect_register()
            .times(1)
            .withf(|r| r.email == "ada@example.com")
            .returning(|_| Ok(ok(StatusCode::CREATED, Some(true), Some("Registration successful"))));

        let (tx, mut rx) = events::channel();
        let outcome = submit_registration(&api, &request(), RetryPolicy::default(), &tx).await;

        assert_eq!(outcome, SubmitOutcome::Registered);
        assert_eq!(
            drain(&mut rx),
            vec![AppEvent::Status(StatusMessage::success(MSG_SUCCESS))]
        );
    }

    #[tokio::test]
    async fn test_ok_without_success_flag_shows_server_message() {
        let mut api = MockRegistrationApi::new();
        api.expect_register()
            .returning(|_| Ok(ok(StatusCode::OK, Some(false), Some("Signups are closed"))));

        let (tx, mut rx) = events::channel();
        let outcome = submit_registration(&api, &request(), RetryPolicy::default(), &tx).await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(
            last_banner(&drain(&mut rx)),
            StatusMessage::danger("Signups are closed")
        );
    }

    #[tokio::test]
    async fn test_accepted_status_other_than_200_201_is_failure() {
        let mut api = MockRegistrationApi::new();
        api.expect_register()
            .returning(|_| Ok(ok(StatusCode::ACCEPTED, Some(true), None)));

        let (tx, mut rx) = events::channel();
        let outcome = submit_registration(&api, &request(), RetryPolicy::default(), &tx).await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(
            last_banner(&drain(&mut rx)),
            StatusMessage::danger(MSG_GENERIC_FAILURE)
        );
    }

    #[tokio::test]
    async fn test_conflict_sets_email_error_and_banner() {
        let mut api = MockRegistrationApi::new();
        api.expect_register()
            .times(1)
            .returning(|_| Err(status_error(StatusCode::CONFLICT, ErrorBody::default())));

        let (tx, mut rx) = events::channel();
        let outcome = submit_registration(&api, &request(), RetryPolicy::default(), &tx).await;

        let mut expected = FieldErrors::new();
        expected.set(Field::Email, MSG_EMAIL_TAKEN_FIELD);
        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(
            drain(&mut rx),
            vec![
                AppEvent::FieldErrors(expected),
                AppEvent::Status(StatusMessage::danger(MSG_EMAIL_TAKEN)),
            ]
        );
    }

    #[test]
    fn test_bad_request_maps_field_errors() {
        let body = ErrorBody {
            message: Some("Validation failed".to_string()),
            errors: Some(vec![
                FieldIssue {
                    param: Some("email".to_string()),
                    msg: Some("Email is invalid".to_string()),
                    ..Default::default()
                },
                FieldIssue {
                    path: Some("password".to_string()),
                    msg: None,
                    ..Default::default()
                },
                FieldIssue {
                    param: Some("nickname".to_string()),
                    msg: Some("ignored".to_string()),
                    ..Default::default()
                },
            ]),
        };

        let (errors, banner) = describe_failure(status_error(StatusCode::BAD_REQUEST, body));

        assert_eq!(banner, "Validation failed");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Email), Some("Email is invalid"));
        assert!(errors.get(Field::Password).is_none());
    }

    #[test]
    fn test_bad_request_without_message() {
        let (errors, banner) =
            describe_failure(status_error(StatusCode::BAD_REQUEST, ErrorBody::default()));
        assert!(errors.is_empty());
        assert_eq!(banner, MSG_CHECK_INPUT);
    }

    #[test]
    fn test_other_status_uses_server_message_or_generic() {
        let (_, with_message) = describe_failure(status_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorBody {
                message: Some("Database unavailable".to_string()),
                errors: None,
            },
        ));
        assert_eq!(with_message, "Database unavailable");

        let (_, generic) =
            describe_failure(status_error(StatusCode::BAD_GATEWAY, ErrorBody::default()));
        assert_eq!(generic, MSG_GENERIC_FAILURE);
    }

    #[test]
    fn test_request_error_uses_its_text() {
        let (_, banner) = describe_failure(ApiError::Request("bad header".to_string()));
        assert_eq!(banner, "bad header");
        let (_, empty) = describe_failure(ApiError::Request(String::new()));
        assert_eq!(empty, MSG_GENERIC_FAILURE);
    }

    #[tokio::test]
    async fn test_connection_failure_is_not_retried() {
        let mut api = MockRegistrationApi::new();
        api.expect_register()
            .times(1)
            .returning(|_| Err(ApiError::Connection("connection refused".to_string())));

        let (tx, mut rx) = events::channel();
        let outcome = submit_registration(&api, &request(), RetryPolicy::default(), &tx).await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(
            drain(&mut rx),
            vec![AppEvent::Status(StatusMessage::danger(MSG_UNREACHABLE))]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_retries_twice_with_pause_then_fails() {
        let mut api = MockRegistrationApi::new();
        api.expect_register()
            .times(3)
            .returning(|_| Err(ApiError::Timeout));

        let (tx, mut rx) = events::channel();
        let started = Instant::now();
        let outcome = submit_registration(&api, &request(), RetryPolicy::default(), &tx).await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(started.elapsed(), Duration::from_secs(6));
        assert_eq!(
            drain(&mut rx),
            vec![
                AppEvent::Status(StatusMessage::warning(
                    "Server is waking up... Retrying (1/2)..."
                )),
                AppEvent::Status(StatusMessage::warning(
                    "Server is waking up... Retrying (2/2)..."
                )),
                AppEvent::Status(StatusMessage::danger(MSG_TIMED_OUT)),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_then_success() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let mut api = MockRegistrationApi::new();
        api.expect_register().times(2).returning(move |_| {
            if seen.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(ApiError::Timeout)
            } else {
                Ok(ok(StatusCode::CREATED, Some(true), None))
            }
        });

        let (tx, mut rx) = events::channel();
        let outcome = submit_registration(&api, &request(), RetryPolicy::default(), &tx).await;

        assert_eq!(outcome, SubmitOutcome::Registered);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        let events = drain(&mut rx);
        assert_eq!(events.len(), 2);
        assert_eq!(last_banner(&events).kind, StatusKind::Success);
    }

    #[test]
    fn test_no_retries_configured() {
        let mut api = MockRegistrationApi::new();
        api.expect_register()
            .times(1)
            .returning(|_| Err(ApiError::Timeout));

        let (tx, mut rx) = events::channel();
        let policy = RetryPolicy {
            max_retries: 0,
            delay: Duration::from_secs(3),
        };
        let outcome = tokio_test::block_on(submit_registration(&api, &request(), policy, &tx));

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(
            drain(&mut rx),
            vec![AppEvent::Status(StatusMessage::danger(MSG_TIMED_OUT))]
        );
    }
}
