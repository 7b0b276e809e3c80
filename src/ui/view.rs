use crossterm::event::KeyCode;
use ratatui::{prelude::Rect, Frame};

use crate::dashboard::RoleDashboard;
use crate::ui::{admin::AdminScreen, reviewer::ReviewerScreen};

/// View contract for the role-specific dashboard bodies
pub trait View {
    /// Render the view
    fn render(&mut self, f: &mut Frame, area: Rect);

    /// Get the view status text
    fn get_status(&self) -> String;

    /// Key hints for the status bar
    fn key_hints(&self) -> Vec<(&'static str, &'static str)>;

    /// True while the view is reading free text, so global keys must not fire
    fn captures_text(&self) -> bool {
        false
    }

    /// Handle view-specific key events. Returns true if the key was consumed.
    fn handle_key(&mut self, _key: KeyCode) -> bool {
        false
    }
}

/// Build the screen for a role's dashboard state
pub fn view_for(dashboard: RoleDashboard) -> Box<dyn View> {
    match dashboard {
        RoleDashboard::Admin(state) => Box::new(AdminScreen::new(state)),
        RoleDashboard::Reviewer(state) => Box::new(ReviewerScreen::new(state)),
    }
}

/// Tab index after `current`, wrapping
pub fn next_tab(current: usize, count: usize) -> usize {
    if count == 0 {
        0
    } else {
        (current + 1) % count
    }
}

/// Tab index before `current`, wrapping
pub fn previous_tab(current: usize, count: usize) -> usize {
    if count == 0 {
        0
    } else if current == 0 {
        count - 1
    } else {
        current - 1
    }
}

/// Move a list selection down, wrapping to the top
pub fn next_index(selected: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match selected {
        Some(i) if i + 1 < len => i + 1,
        _ => 0,
    })
}

/// Move a list selection up, wrapping to the bottom
pub fn previous_index(selected: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match selected {
        Some(0) | None => len - 1,
        Some(i) => (i - 1).min(len - 1),
    })
}
