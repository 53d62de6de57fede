//! Status banner shown under the form

use crate::state::{StatusKind, StatusMessage};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn banner_color(kind: StatusKind) -> Color {
    match kind {
        StatusKind::Success => Color::Green,
        StatusKind::Warning => Color::Yellow,
        StatusKind::Danger => Color::Red,
    }
}

/// Rows a banner needs for `text` at `width` columns, borders included
pub fn banner_height(text: &str, width: u16) -> u16 {
    let inner = width.saturating_sub(4).max(1) as usize;
    let lines = text.chars().count().div_ceil(inner).max(1);
    lines as u16 + 2
}

pub fn render_banner(frame: &mut Frame, area: Rect, status: &StatusMessage) {
    let color = banner_color(status.kind);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let paragraph = Paragraph::new(status.text.as_str())
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(paragraph, area);
}
