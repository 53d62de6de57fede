//! Events sent from background work back to the UI loop

use super::{FieldErrors, StatusMessage, View};
use tokio::sync::mpsc;

/// How a registration submission ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Account created; the login redirect should be scheduled
    Registered,
    /// Terminal failure; the banner already explains why
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Replace the banner
    Status(StatusMessage),
    /// Overlay server-provided field errors
    FieldErrors(FieldErrors),
    /// The in-flight submission is done
    SubmissionFinished(SubmitOutcome),
    /// Navigate immediately, replacing the current view
    Redirect(View),
}

pub type EventSender = mpsc::UnboundedSender<AppEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<AppEvent>;

pub fn channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}
