//! Application state and core logic

use crate::api::RegistrationApi;
use crate::registration::{self, RetryPolicy};
use crate::state::events::{EventReceiver, EventSender};
use crate::state::{
    AppEvent, AppState, PendingRedirect, RegisterButton, RegistrationForm, SubmitOutcome, View,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Timing knobs for the submission flow
#[derive(Debug, Clone, Copy)]
pub struct AppOptions {
    pub retry_policy: RetryPolicy,
    /// Pause between the success banner and the login view
    pub redirect_delay: Duration,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            retry_policy: RetryPolicy::default(),
            redirect_delay: Duration::from_millis(1200),
        }
    }
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Backend used for submissions
    api: Arc<dyn RegistrationApi>,
    /// Sender handed to background submissions (and the API client)
    events_tx: EventSender,
    /// Drained once per UI tick
    events_rx: EventReceiver,
    options: AppOptions,
    /// Host shown in the status bar
    pub api_host: String,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App. `events` must be the channel the API client reports to.
    pub fn new(
        api: Arc<dyn RegistrationApi>,
        events: (EventSender, EventReceiver),
        options: AppOptions,
        api_host: impl Into<String>,
    ) -> Self {
        let (events_tx, events_rx) = events;
        Self {
            state: AppState::default(),
            api,
            events_tx,
            events_rx,
            options,
            api_host: api_host.into(),
            quit: false,
        }
    }

    /// Create an App with its own event channel
    #[cfg(test)]
    pub fn with_api(api: Arc<dyn RegistrationApi>, options: AppOptions) -> Self {
        Self::new(api, crate::state::events::channel(), options, "localhost")
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn quit(&mut self) {
        self.quit = true;
    }

    /// Handle a key press in the current view
    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.state.current_view {
            View::Register => self.handle_register_key(key),
            View::Login => self.handle_login_key(key),
        }
    }

    /// Navigate to a new view, keeping the current one in history
    pub fn navigate(&mut self, view: View) {
        self.state.view_history.push(self.state.current_view);
        self.state.current_view = view;
    }

    /// Navigate to a view without leaving the current one in history
    pub fn replace_view(&mut self, view: View) {
        self.state.current_view = view;
    }

    /// Go back to previous view
    pub fn go_back(&mut self) {
        if let Some(view) = self.state.view_history.pop() {
            self.state.current_view = view;
        }
    }

    /// Handle keys in Register view
    fn handle_register_key(&mut self, key: KeyEvent) {
        let on_buttons = self.state.form.is_buttons_row_active();

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.state.next_form_field(),
            KeyCode::BackTab | KeyCode::Up => self.state.prev_form_field(),
            KeyCode::Left | KeyCode::Right if on_buttons => {
                self.state.form.selected_button.toggle();
            }
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.submit();
            }
            KeyCode::Enter if on_buttons => match self.state.form.selected_button {
                RegisterButton::SignUp => self.submit(),
                RegisterButton::GoToLogin => self.navigate(View::Login),
            },
            // Enter on the last input submits
            KeyCode::Enter
                if self.state.form.active_field_index == RegistrationForm::BUTTONS_ROW - 1 =>
            {
                self.submit();
            }
            KeyCode::Enter => self.state.next_form_field(),
            KeyCode::Esc => self.quit(),
            KeyCode::Char(c) if !on_buttons && !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.form_input_char(c);
            }
            KeyCode::Backspace if !on_buttons => self.state.form_backspace(),
            _ => {}
        }
    }

    /// Handle keys in Login view
    fn handle_login_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.state.clear_form();
                self.navigate(View::Register);
            }
            KeyCode::Char('b') | KeyCode::Left => self.go_back(),
            KeyCode::Char('q') | KeyCode::Esc => self.quit(),
            _ => {}
        }
    }

    /// Validate and, when valid, start a submission in the background.
    /// Ignored while a submission is already in flight.
    pub fn submit(&mut self) {
        if self.state.loading {
            tracing::debug!("Submission already in flight, ignoring");
            return;
        }

        self.state.status = None;

        let errors = registration::validate(&self.state.form);
        if !errors.is_empty() {
            tracing::debug!(count = errors.len(), "Registration form has validation errors");
            self.state.field_errors = errors;
            return;
        }
        self.state.field_errors = Default::default();

        self.state.loading = true;
        let request = registration::to_request(&self.state.form);
        let api = Arc::clone(&self.api);
        let events = self.events_tx.clone();
        let policy = self.options.retry_policy;

        tokio::spawn(async move {
            let outcome =
                registration::submit_registration(api.as_ref(), &request, policy, &events).await;
            let _ = events.send(AppEvent::SubmissionFinished(outcome));
        });
    }

    /// Apply all events that arrived since the last tick
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_event(event, Instant::now());
        }
    }

    /// Wait for the next event and apply it
    #[cfg(test)]
    pub async fn next_event(&mut self) -> Option<AppEvent> {
        let event = self.events_rx.recv().await?;
        self.apply_event(event.clone(), Instant::now());
        Some(event)
    }

    pub fn apply_event(&mut self, event: AppEvent, now: Instant) {
        match event {
            AppEvent::Status(status) => self.state.status = Some(status),
            AppEvent::FieldErrors(errors) => self.state.field_errors.merge(errors),
            AppEvent::SubmissionFinished(outcome) => {
                self.state.loading = false;
                if outcome == SubmitOutcome::Registered {
                    self.state.pending_redirect = Some(PendingRedirect::after(
                        View::Login,
                        self.options.redirect_delay,
                        now,
                    ));
                }
            }
            AppEvent::Redirect(view) => {
                tracing::info!(?view, "Redirect requested");
                self.state.pending_redirect = None;
                self.replace_view(view);
            }
        }
    }

    /// Fire a scheduled redirect once it is due
    pub fn tick(&mut self, now: Instant) {
        if let Some(redirect) = self.state.pending_redirect {
            if redirect.is_due(now) {
                self.state.pending_redirect = None;
                self.state.clear_form();
                self.replace_view(redirect.view);
            }
        }
    }

    /// Set the banner directly
    #[cfg(test)]
    pub fn set_status(&mut self, status: crate::state::StatusMessage) {
        self.state.status = Some(status);
    }
}
