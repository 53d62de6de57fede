//! Layout components (content area, status bar)

use crate::app::App;
use crate::state::View;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into content and a one-line status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// A column of at most `width` cells, horizontally centered in `area`
pub fn centered_column(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y,
        width,
        height: area.height,
    }
}

/// Key hints for the current view
fn get_view_hints(view: &View, on_buttons: bool) -> &'static str {
    match view {
        View::Register if on_buttons => "←/→: choose | Enter: activate | Tab: fields | Esc: quit",
        View::Register => "Tab/↓: next | Shift+Tab/↑: prev | Ctrl+S: sign up | Esc: quit",
        View::Login => "r: register | b: back | q: quit",
    }
}

pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];

    // Request indicator
    let indicator = if app.state.loading {
        Span::styled(" ● ", Style::default().fg(Color::Yellow))
    } else {
        Span::styled(" ○ ", Style::default().fg(Color::DarkGray))
    };
    spans.push(indicator);

    let hints = get_view_hints(
        &app.state.current_view,
        app.state.form.is_buttons_row_active(),
    );
    spans.push(Span::styled(hints, Style::default().fg(Color::DarkGray)));

    spans.push(Span::raw(" | "));
    spans.push(Span::styled(
        format!("🌐 {}", app.api_host),
        Style::default().fg(Color::Blue),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_layout_reserves_status_line() {
        let (content, status) = create_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(content.height, 23);
        assert_eq!(status.height, 1);
        assert_eq!(status.y, 23);
    }

    #[test]
    fn test_centered_column() {
        let column = centered_column(Rect::new(0, 0, 100, 30), 60);
        assert_eq!(column, Rect::new(20, 0, 60, 30));
    }

    #[test]
    fn test_centered_column_narrow_terminal() {
        let column = centered_column(Rect::new(5, 2, 40, 10), 60);
        assert_eq!(column, Rect::new(5, 2, 40, 10));
    }

    #[test]
    fn test_hints_depend_on_focus() {
        assert!(get_view_hints(&View::Register, false).contains("Ctrl+S"));
        assert!(get_view_hints(&View::Register, true).contains("Enter"));
        assert!(get_view_hints(&View::Login, false).contains("register"));
    }
}
