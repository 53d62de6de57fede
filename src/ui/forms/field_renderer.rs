//! Field rendering utilities for forms

use crate::state::FormField;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows used by one field: bordered input plus a message line
pub const FIELD_HEIGHT: u16 = 4;

/// Draw an input with its error (red) or hint (gray) underneath
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    is_active: bool,
    error: Option<&str>,
    hint: Option<&str>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1)])
        .split(area);

    let border_style = match (error.is_some(), is_active) {
        (true, _) => Style::default().fg(Color::Red),
        (false, true) => Style::default().fg(Color::Cyan),
        (false, false) => Style::default().fg(Color::DarkGray),
    };
    let text_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let cursor = if is_active { "▌" } else { "" };
    let content = Paragraph::new(Line::from(vec![
        Span::styled(field.display_value(), text_style),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]));

    let block = Block::default()
        .title(format!(" {} ", field.label))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(content.block(block), chunks[0]);

    let message = match (error, hint) {
        (Some(error), _) => Some(Span::styled(error, Style::default().fg(Color::Red))),
        (None, Some(hint)) => Some(Span::styled(hint, Style::default().fg(Color::DarkGray))),
        (None, None) => None,
    };
    if let Some(message) = message {
        frame.render_widget(Paragraph::new(Line::from(vec![Span::raw(" "), message])), chunks[1]);
    }
}
