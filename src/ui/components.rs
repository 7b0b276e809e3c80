/// UI components shared by the dashboard screens
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::models::ReviewOutcome;

/// A summary card: title, headline value and a caption
pub struct MetricCard {
    pub title: &'static str,
    pub value: String,
    pub caption: String,
    pub color: Color,
}

impl MetricCard {
    pub fn new(title: &'static str, value: impl ToString, caption: impl Into<String>, color: Color) -> Self {
        Self {
            title,
            value: value.to_string(),
            caption: caption.into(),
            color,
        }
    }
}

/// Render cards side by side, splitting `area` evenly
pub fn render_cards(f: &mut Frame, area: Rect, cards: &[MetricCard]) {
    if cards.is_empty() {
        return;
    }
    let share = 100 / cards.len() as u16;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Percentage(share); cards.len()])
        .split(area);

    for (card, chunk) in cards.iter().zip(chunks.iter()) {
        let content = vec![
            Line::from(Span::styled(
                card.value.clone(),
                Style::default().fg(card.color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(card.caption.clone(), Style::default().fg(Color::Gray))),
        ];
        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(card.color))
                    .title(card.title),
            )
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, *chunk);
    }
}

/// Render a loading indicator
pub fn render_loading_indicator(f: &mut Frame, area: Rect, message: &str) {
    let loading = Paragraph::new(message)
        .block(Block::default().borders(Borders::ALL).title("Loading"))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow));

    f.render_widget(loading, area);
}

/// Render an error banner
pub fn render_error(f: &mut Frame, area: Rect, error: &str) {
    let paragraph = Paragraph::new(format!("⚠ {}", error))
        .block(Block::default().borders(Borders::ALL).title("Error"))
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}

/// Placeholder shown when a panel has nothing to display
pub fn render_empty_state(f: &mut Frame, area: Rect, title: &str, message: &str) {
    let paragraph = Paragraph::new(message)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));

    f.render_widget(paragraph, area);
}

/// Badge colour for a review outcome
pub fn outcome_style(outcome: ReviewOutcome) -> Style {
    match outcome {
        ReviewOutcome::Accepted => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ReviewOutcome::Rejected => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ReviewOutcome::Pending => Style::default().fg(Color::Yellow),
    }
}

/// `[label]` badge span
pub fn badge(label: &str, style: Style) -> Span<'static> {
    Span::styled(format!("[{}]", label), style)
}
