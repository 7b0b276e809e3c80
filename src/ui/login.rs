use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::layout::APP_TITLE;

/// What the login form wants the app to do after a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginAction {
    None,
    Submit(String),
    Quit,
}

/// Email-only sign-in form
#[derive(Debug, Default)]
pub struct LoginForm {
    pub email: String,
    pub message: Option<String>,
    pub submitting: bool,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_key(&mut self, key: KeyCode) -> LoginAction {
        // Only quitting works while the request is in flight
        if self.submitting {
            return if key == KeyCode::Esc { LoginAction::Quit } else { LoginAction::None };
        }
        match key {
            KeyCode::Esc => LoginAction::Quit,
            KeyCode::Enter => {
                self.submitting = true;
                self.message = None;
                LoginAction::Submit(self.email.clone())
            }
            KeyCode::Backspace => {
                self.email.pop();
                LoginAction::None
            }
            KeyCode::Char(c) => {
                self.email.push(c);
                LoginAction::None
            }
            _ => LoginAction::None,
        }
    }

    /// Show the outcome of a failed attempt and re-enable the form
    pub fn fail(&mut self, message: impl Into<String>) {
        self.submitting = false;
        self.message = Some(message.into());
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let form_area = centered(area, 60, 11);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(2), // Prompt
                Constraint::Length(3), // Email input
                Constraint::Length(2), // Message
                Constraint::Min(0),
            ])
            .split(form_area);

        f.render_widget(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(Span::styled(APP_TITLE, Style::default().add_modifier(Modifier::BOLD))),
            form_area,
        );

        let prompt = Paragraph::new("Sign in with your work email")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(prompt, chunks[0]);

        let input = Paragraph::new(Line::from(vec![
            Span::raw(self.email.clone()),
            Span::styled(if self.submitting { "" } else { "▏" }, Style::default().fg(Color::Yellow)),
        ]))
        .block(Block::default().borders(Borders::ALL).title("Email"));
        f.render_widget(input, chunks[1]);

        let status = match (&self.message, self.submitting) {
            (_, true) => Paragraph::new("Signing in...").style(Style::default().fg(Color::Yellow)),
            (Some(message), false) => Paragraph::new(message.as_str()).style(Style::default().fg(Color::Red)),
            (None, false) => Paragraph::new("Enter to sign in • Esc to quit").style(Style::default().fg(Color::DarkGray)),
        };
        f.render_widget(status.alignment(Alignment::Center).wrap(Wrap { trim: true }), chunks[2]);
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
