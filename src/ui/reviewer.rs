use crossterm::event::KeyCode;
use ratatui::{
    layout::{Direction, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, List, ListItem, ListState},
    Frame,
};

use super::components::{badge, outcome_style, render_cards, render_empty_state, render_error, render_loading_indicator, MetricCard};
use super::layout::{render_tab_bar, BodyLayout};
use super::view::{next_index, next_tab, previous_index, previous_tab, View};
use crate::dashboard::{ReviewerData, ViewState};
use crate::filters::percentage;
use crate::utils::{display_date, display_timestamp};

const TAB_TITLES: [&str; 2] = ["Reviewer Mistakes", "Recent Submissions"];
const MISTAKES_TAB: usize = 0;
const RECENT_TAB: usize = 1;

const SLICE_COLORS: [Color; 5] = [Color::Blue, Color::Green, Color::Yellow, Color::LightRed, Color::Magenta];

/// A reviewer's own dashboard
pub struct ReviewerScreen {
    state: ViewState<ReviewerData>,
    tab: usize,
    recent_list: ListState,
}

impl ReviewerScreen {
    pub fn new(state: ViewState<ReviewerData>) -> Self {
        Self {
            state,
            tab: MISTAKES_TAB,
            recent_list: ListState::default(),
        }
    }

    pub fn selected_tab(&self) -> usize {
        self.tab
    }
}

impl View for ReviewerScreen {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        let data = match &self.state {
            ViewState::Loading => {
                render_loading_indicator(f, area, "Loading your dashboard...");
                return;
            }
            ViewState::Failed(message) => {
                render_error(f, area, message);
                return;
            }
            ViewState::Ready(data) => data,
        };

        let layout = BodyLayout::new(area);
        let summary = data.summary_or_default();

        render_cards(
            f,
            layout.cards,
            &[
                MetricCard::new("Total Submitted", summary.total_submitted, "Tasks submitted for review", Color::Blue),
                MetricCard::new(
                    "Accepted Tasks",
                    summary.accepted_count,
                    format!("vs {} rejected", summary.rejected_count),
                    Color::Green,
                ),
                MetricCard::new("Leader Reviewed", summary.leader_reviewed, "Tasks reviewed by leader", Color::LightRed),
                MetricCard::new(
                    "QC Alignment",
                    summary.fully_aligned,
                    format!("Aligned / {} misaligned", summary.misaligned),
                    Color::Magenta,
                ),
            ],
        );
        render_cards(
            f,
            layout.insights,
            &[
                MetricCard::new(
                    "Tasks Changed by Leader",
                    summary.changed_by_leader,
                    "Tasks modified by leadership",
                    Color::Yellow,
                ),
                MetricCard::new(
                    "Last Submission",
                    display_date(summary.last_submission.as_deref()).unwrap_or_else(|| "No submissions yet".to_string()),
                    "Most recent task submission date",
                    Color::Blue,
                ),
            ],
        );

        render_tab_bar(f, layout.tabs, &TAB_TITLES, self.tab);

        match self.tab {
            MISTAKES_TAB => render_mistakes(f, layout.panel, data),
            _ => render_recent(f, layout.panel, data, &mut self.recent_list),
        }
    }

    fn get_status(&self) -> String {
        match &self.state {
            ViewState::Loading => "Loading...".to_string(),
            ViewState::Failed(message) => message.clone(),
            ViewState::Ready(data) => format!("{} submissions loaded", data.submissions.len()),
        }
    }

    fn key_hints(&self) -> Vec<(&'static str, &'static str)> {
        let mut hints = vec![("Tab", "switch tabs")];
        if self.tab == RECENT_TAB {
            hints.push(("↑/↓", "scroll"));
        }
        hints.extend([("o", "sign out"), ("q", "quit")]);
        hints
    }

    fn handle_key(&mut self, key: KeyCode) -> bool {
        let len = self.state.ready().map_or(0, |data| data.recent().len());
        match key {
            KeyCode::Tab => self.tab = next_tab(self.tab, TAB_TITLES.len()),
            KeyCode::BackTab => self.tab = previous_tab(self.tab, TAB_TITLES.len()),
            KeyCode::Down if self.tab == RECENT_TAB => {
                self.recent_list.select(next_index(self.recent_list.selected(), len));
            }
            KeyCode::Up if self.tab == RECENT_TAB => {
                self.recent_list.select(previous_index(self.recent_list.selected(), len));
            }
            _ => return false,
        }
        true
    }
}

fn render_mistakes(f: &mut Frame, area: Rect, data: &ReviewerData) {
    const TITLE: &str = "Reviewer Mistakes Distribution";
    let slices = data.mistake_slices();
    if slices.is_empty() {
        render_empty_state(f, area, TITLE, "No mistake data available");
        return;
    }

    let total: u64 = slices.iter().map(|s| s.value).sum();
    let bars: Vec<Bar> = slices
        .iter()
        .enumerate()
        .map(|(i, slice)| {
            let color = SLICE_COLORS[i % SLICE_COLORS.len()];
            Bar::default()
                .label(Line::from(slice.name.clone()))
                .value(slice.value)
                .text_value(format!("{} ({}%)", slice.value, percentage(slice.value, total)))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(Color::Black).bg(color))
        })
        .collect();

    let chart = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title(TITLE))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bars));

    f.render_widget(chart, area);
}

fn render_recent(f: &mut Frame, area: Rect, data: &ReviewerData, list_state: &mut ListState) {
    let recent = data.recent();
    let title = format!("Recent Submissions ({} of {})", recent.len(), data.submissions.len());
    if recent.is_empty() {
        render_empty_state(f, area, "Recent Submissions", "No submissions found");
        return;
    }

    let items: Vec<ListItem> = recent
        .iter()
        .map(|submission| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    submission.task_type.clone().unwrap_or_else(|| "Unknown".to_string()),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("  {}", submission.miner_name.clone().unwrap_or_default())),
                Span::styled(
                    format!("  {}  ", display_timestamp(submission.timestamp.as_deref())),
                    Style::default().fg(Color::DarkGray),
                ),
                badge(submission.status_label(), outcome_style(submission.outcome())),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::LightBlue).fg(Color::Black))
        .highlight_symbol("→ ");

    f.render_stateful_widget(list, area, list_state);
}
