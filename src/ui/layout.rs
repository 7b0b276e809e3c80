use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::models::{Role, SessionUser};

pub const APP_TITLE: &str = "Team Submission Tracker";

/// Centralized layout management: header, content, status bar
pub struct TuiLayout {
    pub header: Rect,
    pub content: Rect,
    pub status_bar: Rect,
}

impl TuiLayout {
    /// Create a new layout from the given area
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Content
                Constraint::Length(3), // Status bar
            ])
            .split(area);

        Self {
            header: chunks[0],
            content: chunks[1],
            status_bar: chunks[2],
        }
    }

    /// Title, role badge and the signed-in email
    pub fn render_header(&self, f: &mut Frame, user: &SessionUser) {
        let badge_style = match user.role {
            Role::Admin => Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD),
            Role::Reviewer => Style::default().fg(Color::Black).bg(Color::Gray),
        };
        let header = Paragraph::new(Line::from(vec![
            Span::styled(APP_TITLE, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(format!(" {} ", user.role.badge()), badge_style),
            Span::raw("  "),
            Span::styled(format!("Welcome, {}", user.email), Style::default().fg(Color::Gray)),
        ]))
        .block(Block::default().borders(Borders::ALL));

        f.render_widget(header, self.header);
    }

    /// Key hints plus the active view's status line
    pub fn render_status_bar(&self, f: &mut Frame, hints: &[(&str, &str)], status_text: &str) {
        let mut spans = Vec::new();
        for (i, (key, action)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" • ", Style::default().fg(Color::Gray)));
            }
            spans.push(Span::styled(key.to_string(), Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)));
            spans.push(Span::styled(format!(" {}", action), Style::default().fg(Color::Gray)));
        }
        if !status_text.is_empty() {
            spans.push(Span::styled(format!("  │ {}", status_text), Style::default().fg(Color::Cyan)));
        }

        let paragraph = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, self.status_bar);
    }
}

/// Tab strip at the top of a dashboard body
pub fn render_tab_bar(f: &mut Frame, area: Rect, titles: &[&'static str], selected: usize) {
    let tabs = Tabs::new(titles.to_vec())
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::White))
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .select(selected);

    f.render_widget(tabs, area);
}

/// Helper layout for a dashboard body: card rows on top, tabs, then the tab content
pub struct BodyLayout {
    pub cards: Rect,
    pub insights: Rect,
    pub tabs: Rect,
    pub panel: Rect,
}

impl BodyLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Summary cards
                Constraint::Length(4), // Insight cards
                Constraint::Length(3), // Tabs
                Constraint::Min(0),    // Tab content
            ])
            .split(area);

        Self {
            cards: chunks[0],
            insights: chunks[1],
            tabs: chunks[2],
            panel: chunks[3],
        }
    }
}
