//! Signup TUI - terminal registration form
//!
//! A Ratatui-based form that validates a new account locally and submits it
//! to the backend's registration endpoint.

mod api;
mod app;
mod config;
mod registration;
mod session;
mod state;
mod ui;

use anyhow::{Context, Result};
use api::ApiClient;
use app::{App, AppOptions};
use config::AppConfig;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use registration::RetryPolicy;
use session::{FileTokenStore, MemoryTokenStore, TokenStore};
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let log_guard = init_logging();

    let config = AppConfig::load_or_init().context("Failed to load configuration")?;
    let api_url = config.api_url();
    tracing::info!(%api_url, "Starting signup-tui");

    let tokens: Arc<dyn TokenStore> = match config::project_dirs() {
        Some(dirs) => Arc::new(FileTokenStore::in_dir(dirs.data_dir())),
        None => Arc::new(MemoryTokenStore::default()),
    };

    let (events_tx, events_rx) = state::events::channel();
    let client = ApiClient::new(&api_url, config.request_timeout(), tokens)
        .context("Failed to create API client")?
        .with_events(events_tx.clone());
    let api_host = client.host();

    let options = AppOptions {
        retry_policy: RetryPolicy {
            max_retries: config.retry_attempts(),
            delay: config.retry_delay(),
        },
        redirect_delay: config.redirect_delay(),
    };
    let mut app = App::new(Arc::new(client), (events_tx, events_rx), options, api_host);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        tracing::error!("UI loop failed: {err:?}");
        eprintln!("Error: {err:?}");
        // exit skips destructors; flush the log writer first
        drop(log_guard);
        std::process::exit(1);
    }

    drop(log_guard);
    Ok(())
}

/// Log to a daily-rotated file in the data directory; the terminal belongs to
/// the UI. The returned guard flushes the background writer on drop.
fn init_logging() -> Option<WorkerGuard> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "signup_tui=info".into());

    let log_dir = config::project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .filter(|dir| std::fs::create_dir_all(dir).is_ok());

    let registry = tracing_subscriber::registry().with(filter);
    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "signup-tui.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(writer),
                )
                .init();
            Some(guard)
        }
        None => {
            registry
                .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
                .init();
            None
        }
    }
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Apply progress from the submission task and any login redirect
        app.drain_events();
        app.tick(Instant::now());

        // Draw the UI
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Poll faster while a request is in flight so banners show promptly
        let poll_duration = if app.state.loading || app.state.pending_redirect.is_some() {
            Duration::from_millis(50)
        } else {
            Duration::from_millis(100)
        };

        // event::poll blocks; keep it off the runtime threads
        let next = tokio::task::block_in_place(|| -> io::Result<Option<Event>> {
            if event::poll(poll_duration)? {
                event::read().map(Some)
            } else {
                Ok(None)
            }
        })?;

        if let Some(Event::Key(key)) = next {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            // Global quit: Ctrl+C
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                return Ok(());
            }
            app.handle_key(key);
        }

        // Check if app wants to quit
        if app.should_quit() {
            return Ok(());
        }
    }
}
