use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::api::{Sentiment, SentimentBucket, StatsSnapshot};

use super::history::sentiment_color;

const BAR_WIDTH: usize = 20;

pub fn render(frame: &mut Frame, area: Rect, stats: Option<&StatsSnapshot>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray))
        .title("Stats");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(stats) = stats else {
        let paragraph = Paragraph::new(Span::styled(
            "Waiting for stats...",
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(paragraph, inner);
        return;
    };

    let mut lines = vec![
        Line::from(vec![
            Span::raw("Total analyzed: "),
            Span::styled(
                stats.total_tweets.to_string(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
    ];

    for sentiment in [Sentiment::Positive, Sentiment::Negative] {
        lines.extend(bucket_lines(
            sentiment,
            stats.bucket(sentiment),
            stats.total_tweets,
        ));
        lines.push(Line::from(""));
    }

    let paragraph = Paragraph::new(lines);
    frame.render_widget(paragraph, inner);
}

fn bucket_lines(
    sentiment: Sentiment,
    bucket: &SentimentBucket,
    total: u64,
) -> Vec<Line<'static>> {
    let share = percent(bucket.count, total);
    let color = sentiment_color(sentiment);

    vec![
        Line::from(vec![
            Span::styled(
                format!("{:<9}", sentiment.to_string()),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("{:>4}  ({:.1}%)", bucket.count, share)),
        ]),
        Line::from(vec![
            Span::styled(bar(share / 100.0, BAR_WIDTH), Style::default().fg(color)),
            Span::styled(
                format!("  avg {:.1}%", bucket.avg_confidence),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    ]
}

/// Share of `count` in `total` as a percentage; zero when there is no data.
fn percent(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}

/// Fixed-width text bar, filled proportionally to `ratio` (0.0..=1.0).
fn bar(ratio: f64, width: usize) -> String {
    let filled = (ratio.clamp(0.0, 1.0) * width as f64).round() as usize;
    let mut out = String::with_capacity(width);
    for i in 0..width {
        out.push(if i < filled { '█' } else { '░' });
    }
    out
}
