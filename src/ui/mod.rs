pub mod widgets;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Span,
    widgets::{ListState, Paragraph},
    Frame,
};

use crate::app::Mode;
use crate::state::ViewState;

pub fn draw(frame: &mut Frame, state: &ViewState, mode: Mode, list_state: &mut ListState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1)])
        .split(frame.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(chunks[0]);

    widgets::history::render(frame, columns[0], &state.tweets, list_state);
    widgets::stats::render(frame, columns[1], state.stats.as_ref());
    render_footer(frame, chunks[1], state);

    if mode == Mode::Compose {
        widgets::compose::render(frame, frame.area(), state);
    }
}

fn render_footer(frame: &mut Frame, area: Rect, state: &ViewState) {
    let (text, color) = if state.loading {
        ("Analyzing...".to_string(), Color::Yellow)
    } else if let Some(error) = &state.error {
        (error.clone(), Color::Red)
    } else if let Some(status) = &state.status {
        (status.clone(), Color::DarkGray)
    } else {
        (
            "t compose | j/k navigate | d delete | r refresh | q quit".to_string(),
            Color::DarkGray,
        )
    };

    let paragraph = Paragraph::new(Span::styled(text, Style::default().fg(color)));
    frame.render_widget(paragraph, area);
}

/// Rect centered in `r`, sized as a percentage of it.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
