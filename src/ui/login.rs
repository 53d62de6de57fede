//! Login landing view

use crate::app::App;
use crate::ui::components::render_banner;
use crate::ui::layout::centered_column;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let card = centered_column(area, 60);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Length(3), Constraint::Min(0)])
        .split(card);

    let key = |k: &'static str| {
        Span::styled(
            k,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    };

    let text = vec![
        Line::from(""),
        Line::from("Sign in with your account to continue."),
        Line::from(""),
        Line::from(vec![
            Span::raw("Don't have an account? Press "),
            key("r"),
            Span::raw(" to register."),
        ]),
        Line::from(vec![Span::raw("Press "), key("q"), Span::raw(" to quit.")]),
    ];

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" Login ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
    frame.render_widget(paragraph, chunks[0]);

    if let Some(status) = &app.state.status {
        render_banner(frame, chunks[1], status);
    }
}
