use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::draft::MAX_TWEET_CHARS;
use crate::state::ViewState;
use crate::ui::centered_rect;

/// Characters left at which the counter turns into a warning.
const COUNTER_WARN_AT: usize = 20;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let modal_area = centered_rect(60, 40, area);
    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title("Compose Tweet");

    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let mut text = vec![
        Line::from(""),
        Line::from(state.draft.text().to_string()),
        Line::from(""),
        counter_line(state.draft.char_count()),
    ];

    if state.loading {
        text.push(Line::from(Span::styled(
            "Analyzing...",
            Style::default().fg(Color::Yellow),
        )));
    } else if let Some(error) = &state.error {
        text.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    } else {
        text.push(Line::from(""));
    }

    text.push(Line::from(Span::styled(
        "Enter to analyze | Esc to cancel",
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(text).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);
}

fn counter_line(count: usize) -> Line<'static> {
    let remaining = MAX_TWEET_CHARS.saturating_sub(count);
    let style = if remaining <= COUNTER_WARN_AT {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Line::from(Span::styled(
        format!("{}/{}", count, MAX_TWEET_CHARS),
        style,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_text() {
        let line = counter_line(12);
        assert_eq!(line.spans[0].content, "12/280");
    }

    #[test]
    fn test_counter_warns_near_cap() {
        let calm = counter_line(100);
        let warn = counter_line(265);
        assert_eq!(calm.spans[0].style.fg, Some(Color::DarkGray));
        assert_eq!(warn.spans[0].style.fg, Some(Color::Yellow));
    }
}
