//! Application state definitions

use super::forms::{Field, FieldErrors, Form, RegistrationForm};
use std::time::{Duration, Instant};

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Register,
    Login,
}

/// Banner severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Warning,
    Danger,
}

/// Banner shown under the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Warning,
            text: text.into(),
        }
    }

    pub fn danger(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Danger,
            text: text.into(),
        }
    }
}

/// A navigation scheduled for later (e.g. after the success banner was shown)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingRedirect {
    pub view: View,
    pub due: Instant,
}

impl PendingRedirect {
    pub fn after(view: View, delay: Duration, now: Instant) -> Self {
        Self {
            view,
            due: now + delay,
        }
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.due
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    pub current_view: View,
    pub view_history: Vec<View>,
    pub form: RegistrationForm,
    pub field_errors: FieldErrors,
    pub status: Option<StatusMessage>,
    /// A submission is in flight; further submits are ignored
    pub loading: bool,
    pub pending_redirect: Option<PendingRedirect>,
}

impl AppState {
    /// Move to next form field
    pub fn next_form_field(&mut self) {
        self.form.next_field();
    }

    /// Move to previous form field
    pub fn prev_form_field(&mut self) {
        self.form.prev_field();
    }

    /// Handle character input in the focused field.
    /// Editing a field clears its error.
    pub fn form_input_char(&mut self, c: char) {
        if let Some(field) = self.form.get_active_field_mut() {
            field.push_char(c);
            let name = field.field;
            self.field_errors.clear_field(name);
        }
    }

    /// Handle backspace in the focused field
    pub fn form_backspace(&mut self) {
        if let Some(field) = self.form.get_active_field_mut() {
            field.pop_char();
            let name = field.field;
            self.field_errors.clear_field(name);
        }
    }

    pub fn field_error(&self, field: Field) -> Option<&str> {
        self.field_errors.get(field)
    }

    /// Clear form state
    pub fn clear_form(&mut self) {
        self.form.clear();
        self.field_errors = FieldErrors::new();
        self.status = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_view_is_register() {
        let state = AppState::default();
        assert_eq!(state.current_view, View::Register);
        assert!(!state.loading);
        assert!(state.status.is_none());
    }

    #[test]
    fn test_input_clears_error_for_that_field_only() {
        let mut state = AppState::default();
        state.field_errors.set(Field::Name, "Name is required");
        state.field_errors.set(Field::Email, "Email is required");

        state.form_input_char('A');

        assert_eq!(state.form.name.as_text(), "A");
        assert!(state.field_error(Field::Name).is_none());
        assert_eq!(state.field_error(Field::Email), Some("Email is required"));
    }

    #[test]
    fn test_backspace_clears_error() {
        let mut state = AppState::default();
        state.form.name.set_text("Ad");
        state.field_errors.set(Field::Name, "server says no");
        state.form_backspace();
        assert_eq!(state.form.name.as_text(), "A");
        assert!(state.field_errors.is_empty());
    }

    #[test]
    fn test_input_on_buttons_row_is_ignored() {
        let mut state = AppState::default();
        state.form.set_active_field(RegistrationForm::BUTTONS_ROW);
        state.form_input_char('x');
        for field in Field::ALL {
            assert_eq!(state.form.field(field).as_text(), "");
        }
    }

    #[test]
    fn test_clear_form_drops_banner_and_errors() {
        let mut state = AppState::default();
        state.form.email.set_text("a@b.co");
        state.field_errors.set(Field::Email, "taken");
        state.status = Some(StatusMessage::danger("nope"));
        state.clear_form();
        assert_eq!(state.form.email.as_text(), "");
        assert!(state.field_errors.is_empty());
        assert!(state.status.is_none());
    }

    #[test]
    fn test_pending_redirect_due() {
        let now = Instant::now();
        let redirect = PendingRedirect::after(View::Login, Duration::from_millis(1200), now);
        assert!(!redirect.is_due(now));
        assert!(!redirect.is_due(now + Duration::from_millis(1199)));
        assert!(redirect.is_due(now + Duration::from_millis(1200)));
    }

    #[test]
    fn test_status_constructors() {
        assert_eq!(StatusMessage::success("ok").kind, StatusKind::Success);
        assert_eq!(StatusMessage::warning("hm").kind, StatusKind::Warning);
        assert_eq!(StatusMessage::danger("no").kind, StatusKind::Danger);
    }
}
