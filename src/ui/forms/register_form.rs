//! Registration form rendering

use super::field_renderer::{draw_field, FIELD_HEIGHT};
use crate::app::App;
use crate::registration::MIN_PASSWORD_LEN;
use crate::state::{Field, RegisterButton};
use crate::ui::components::{banner_height, render_banner, render_button, BUTTON_HEIGHT};
use crate::ui::layout::centered_column;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
    Frame,
};

/// Width of the form card
const CARD_WIDTH: u16 = 60;

/// Draw the registration card
pub fn draw_register(frame: &mut Frame, area: Rect, app: &App) {
    let state = &app.state;
    let card = centered_column(area, CARD_WIDTH);

    let block = Block::default()
        .title(" Create Account ")
        .title_style(Style::default().add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let banner_rows = state
        .status
        .as_ref()
        .map(|s| banner_height(&s.text, inner.width.saturating_sub(2)))
        .unwrap_or(0);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FIELD_HEIGHT), // Name
            Constraint::Length(FIELD_HEIGHT), // Email
            Constraint::Length(FIELD_HEIGHT), // Password
            Constraint::Length(FIELD_HEIGHT), // Confirm
            Constraint::Length(banner_rows),  // Banner
            Constraint::Length(BUTTON_HEIGHT), // Buttons
            Constraint::Min(0),
        ])
        .horizontal_margin(1)
        .split(inner);

    let password_hint = format!("Password must be at least {MIN_PASSWORD_LEN} characters");
    let focused = state.form.active_input();
    for (index, field) in Field::ALL.into_iter().enumerate() {
        let hint = (field == Field::Password).then_some(password_hint.as_str());
        draw_field(
            frame,
            chunks[index],
            state.form.field(field),
            focused == Some(field),
            state.field_error(field),
            hint,
        );
    }

    if let Some(status) = &state.status {
        render_banner(frame, chunks[4], status);
    }

    draw_buttons(frame, chunks[5], app);
}

fn draw_buttons(frame: &mut Frame, area: Rect, app: &App) {
    let state = &app.state;
    let on_buttons = state.form.is_buttons_row_active();

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let sign_up_label = if state.loading {
        "Creating Account..."
    } else {
        "Sign Up"
    };
    render_button(
        frame,
        chunks[0],
        sign_up_label,
        on_buttons && state.form.selected_button == RegisterButton::SignUp,
        !state.loading,
        Some(Color::Green),
    );
    render_button(
        frame,
        chunks[1],
        "Login here",
        on_buttons && state.form.selected_button == RegisterButton::GoToLogin,
        true,
        None,
    );
}
