use chrono::NaiveDateTime;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::api::{AnalyzedTweet, Sentiment};

pub fn render(
    frame: &mut Frame,
    area: Rect,
    tweets: &[AnalyzedTweet],
    list_state: &mut ListState,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray))
        .title(format!("History ({})", tweets.len()));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if tweets.is_empty() {
        let help_text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "No analyzed tweets yet",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Press t to compose one."),
        ];
        let paragraph = Paragraph::new(help_text)
            .alignment(ratatui::layout::Alignment::Center);
        frame.render_widget(paragraph, inner);
        return;
    }

    let wrap_width = inner.width.saturating_sub(2).max(10) as usize;
    let items: Vec<ListItem> = tweets
        .iter()
        .map(|tweet| tweet_item(tweet, wrap_width))
        .collect();

    let list = List::new(items)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, inner, list_state);
}

fn tweet_item(tweet: &AnalyzedTweet, wrap_width: usize) -> ListItem<'static> {
    let color = sentiment_color(tweet.sentiment);

    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!("{} {}", sentiment_marker(tweet.sentiment), tweet.sentiment),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("{:.1}%", tweet.confidence),
            Style::default().fg(color),
        ),
        Span::raw("  "),
        Span::styled(
            format_timestamp(&tweet.timestamp),
            Style::default().fg(Color::DarkGray),
        ),
    ])];

    for wrapped in textwrap::wrap(&tweet.text, wrap_width) {
        lines.push(Line::from(Span::styled(
            wrapped.to_string(),
            Style::default().fg(Color::White),
        )));
    }
    lines.push(Line::from(""));

    ListItem::new(lines)
}

pub fn sentiment_color(sentiment: Sentiment) -> Color {
    match sentiment {
        Sentiment::Positive => Color::Green,
        Sentiment::Negative => Color::Red,
    }
}

fn sentiment_marker(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "▲",
        Sentiment::Negative => "▼",
    }
}

/// Render a server timestamp for display. The backend emits
/// `YYYY-MM-DD HH:MM:SS`; RFC 3339 is tolerated too. Anything else is shown
/// as-is rather than dropped.
pub fn format_timestamp(ts: &str) -> String {
    if let Ok(parsed) = NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S") {
        return parsed.format("%b %d %H:%M").to_string();
    }
    if let Ok(parsed) = chrono::DateTime::parse_from_rfc3339(ts) {
        return parsed.format("%b %d %H:%M").to_string();
    }
    ts.to_string()
}
