use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::components::{badge, outcome_style, render_cards, render_empty_state, render_error, render_loading_indicator, MetricCard};
use super::layout::{render_tab_bar, BodyLayout};
use super::view::{next_index, next_tab, previous_index, previous_tab, View};
use crate::dashboard::{AdminData, ViewState};
use crate::filters::SubmissionFilter;
use crate::models::Submission;
use crate::utils::display_timestamp;

const TAB_TITLES: [&str; 3] = ["Analytics Charts", "All Submissions", "Team Members"];
const CHARTS_TAB: usize = 0;
const SUBMISSIONS_TAB: usize = 1;
const TEAM_TAB: usize = 2;

const NO_DATA: &str = "No data available";

/// Admin dashboard: team-wide cards, charts, the filterable submissions table and the team list
pub struct AdminScreen {
    state: ViewState<AdminData>,
    tab: usize,
    filter: SubmissionFilter,
    editing_search: bool,
    task_types: Vec<String>,
    submissions_list: ListState,
    members_list: ListState,
}

impl AdminScreen {
    pub fn new(state: ViewState<AdminData>) -> Self {
        let task_types = state.ready().map(|data| data.task_types()).unwrap_or_default();
        Self {
            state,
            tab: CHARTS_TAB,
            filter: SubmissionFilter::default(),
            editing_search: false,
            task_types,
            submissions_list: ListState::default(),
            members_list: ListState::default(),
        }
    }

    pub fn filter(&self) -> &SubmissionFilter {
        &self.filter
    }

    pub fn selected_tab(&self) -> usize {
        self.tab
    }

    /// Submissions currently passing the filter bar
    pub fn visible_submissions(&self) -> Vec<&Submission> {
        self.state.ready().map(|data| data.filtered(&self.filter)).unwrap_or_default()
    }

    fn filter_changed(&mut self) {
        self.submissions_list.select(None);
    }

    fn handle_search_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Enter | KeyCode::Esc => self.editing_search = false,
            KeyCode::Backspace => {
                self.filter.term.pop();
                self.filter_changed();
            }
            KeyCode::Char(c) => {
                self.filter.term.push(c);
                self.filter_changed();
            }
            _ => {}
        }
        true
    }

    fn handle_submissions_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('/') => self.editing_search = true,
            KeyCode::Char('s') => {
                self.filter.status = self.filter.status.next();
                self.filter_changed();
            }
            KeyCode::Char('t') => {
                self.filter.task_type = self.filter.task_type.next(&self.task_types);
                self.filter_changed();
            }
            KeyCode::Char('c') => {
                self.filter = SubmissionFilter::default();
                self.filter_changed();
            }
            KeyCode::Down => {
                let len = self.visible_submissions().len();
                let next = next_index(self.submissions_list.selected(), len);
                self.submissions_list.select(next);
            }
            KeyCode::Up => {
                let len = self.visible_submissions().len();
                let previous = previous_index(self.submissions_list.selected(), len);
                self.submissions_list.select(previous);
            }
            _ => return false,
        }
        true
    }

    fn handle_team_key(&mut self, key: KeyCode) -> bool {
        let len = self.state.ready().map_or(0, |data| data.members.len());
        match key {
            KeyCode::Down => self.members_list.select(next_index(self.members_list.selected(), len)),
            KeyCode::Up => self.members_list.select(previous_index(self.members_list.selected(), len)),
            _ => return false,
        }
        true
    }
}

impl View for AdminScreen {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        let data = match &self.state {
            ViewState::Loading => {
                render_loading_indicator(f, area, "Loading admin dashboard...");
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
                MetricCard::new("Total Team Members", summary.unique_members, "Active reviewers", Color::Blue),
                MetricCard::new("Total Submissions", summary.total_submissions, "All time submissions", Color::Magenta),
                MetricCard::new(
                    "Acceptance Rate",
                    format!("{}%", data.acceptance_rate()),
                    format!("{} accepted / {} rejected", summary.accepted_count, summary.rejected_count),
                    Color::Green,
                ),
                MetricCard::new("Tasks Changed", summary.changed_count, "Modified by leaders", Color::LightRed),
            ],
        );
        render_cards(
            f,
            layout.insights,
            &[
                MetricCard::new(
                    "Most Common Mistake",
                    summary.most_common_mistake.as_deref().unwrap_or(NO_DATA),
                    "Primary reason for reviewer errors",
                    Color::Red,
                ),
                MetricCard::new(
                    "Reviewer with Most Rejections",
                    summary.reviewer_with_most_rejected.as_deref().unwrap_or(NO_DATA),
                    "Team member needing additional support",
                    Color::Yellow,
                ),
            ],
        );

        render_tab_bar(f, layout.tabs, &TAB_TITLES, self.tab);

        match self.tab {
            CHARTS_TAB => render_charts(f, layout.panel, data),
            SUBMISSIONS_TAB => render_submissions(
                f,
                layout.panel,
                data,
                &self.filter,
                self.editing_search,
                &mut self.submissions_list,
            ),
            _ => render_members(f, layout.panel, data, &mut self.members_list),
        }
    }

    fn get_status(&self) -> String {
        match &self.state {
            ViewState::Loading => "Loading...".to_string(),
            ViewState::Failed(message) => message.clone(),
            ViewState::Ready(data) if self.tab == SUBMISSIONS_TAB => {
                format!("Showing {} of {} submissions", self.visible_submissions().len(), data.submissions.len())
            }
            ViewState::Ready(data) => format!("{} submissions, {} team members", data.submissions.len(), data.members.len()),
        }
    }

    fn key_hints(&self) -> Vec<(&'static str, &'static str)> {
        if self.editing_search {
            return vec![("Enter/Esc", "finish search"), ("Backspace", "delete")];
        }
        let mut hints = vec![("Tab", "switch tabs")];
        if self.tab == SUBMISSIONS_TAB {
            hints.extend([("/", "search"), ("s", "status"), ("t", "task type"), ("c", "clear"), ("↑/↓", "scroll")]);
        } else if self.tab == TEAM_TAB {
            hints.push(("↑/↓", "scroll"));
        }
        hints.extend([("o", "sign out"), ("q", "quit")]);
        hints
    }

    fn captures_text(&self) -> bool {
        self.editing_search
    }

    fn handle_key(&mut self, key: KeyCode) -> bool {
        if self.editing_search {
            return self.handle_search_key(key);
        }
        match key {
            KeyCode::Tab => {
                self.tab = next_tab(self.tab, TAB_TITLES.len());
                return true;
            }
            KeyCode::BackTab => {
                self.tab = previous_tab(self.tab, TAB_TITLES.len());
                return true;
            }
            _ => {}
        }
        if self.state.ready().is_none() {
            return false;
        }
        match self.tab {
            SUBMISSIONS_TAB => self.handle_submissions_key(key),
            TEAM_TAB => self.handle_team_key(key),
            _ => false,
        }
    }
}

fn render_charts(f: &mut Frame, area: Rect, data: &AdminData) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_rejection_chart(f, chunks[0], data);
    render_trend_chart(f, chunks[1], data);
}

fn render_rejection_chart(f: &mut Frame, area: Rect, data: &AdminData) {
    const TITLE: &str = "Rejection Rate by Task Type";
    if data.rejection_by_task_type.is_empty() {
        render_empty_state(f, area, TITLE, "No chart data available");
        return;
    }

    let mut chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Line::from(vec![
                    Span::raw(format!("{} ", TITLE)),
                    Span::styled("■ Accepted ", Style::default().fg(Color::Green)),
                    Span::styled("■ Rejected", Style::default().fg(Color::Red)),
                ])),
        )
        .bar_width(3)
        .bar_gap(0)
        .group_gap(2);

    for row in &data.rejection_by_task_type {
        let bars = [
            Bar::default()
                .value(row.accepted)
                .style(Style::default().fg(Color::Green)),
            Bar::default()
                .value(row.rejected)
                .style(Style::default().fg(Color::Red)),
        ];
        chart = chart.data(BarGroup::default().label(Line::from(row.task_type.clone())).bars(&bars));
    }

    f.render_widget(chart, area);
}

fn render_trend_chart(f: &mut Frame, area: Rect, data: &AdminData) {
    const TITLE: &str = "Submission Trend Over Time";
    let trend = &data.submission_trend;
    let (first, last) = match (trend.first(), trend.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => {
            render_empty_state(f, area, TITLE, "No trend data available");
            return;
        }
    };

    let points: Vec<(f64, f64)> = trend
        .iter()
        .enumerate()
        .map(|(i, point)| (i as f64, point.count as f64))
        .collect();
    let max_count = trend.iter().map(|p| p.count).max().unwrap_or(0).max(1);
    let max_x = (trend.len().saturating_sub(1)).max(1) as f64;

    let dataset = Dataset::default()
        .name("Submissions")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Blue))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(Block::default().borders(Borders::ALL).title(TITLE))
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, max_x])
                .labels(vec![Span::raw(first.date.to_string()), Span::raw(last.date.to_string())]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, max_count as f64])
                .labels(vec![Span::raw("0"), Span::raw(max_count.to_string())]),
        );

    f.render_widget(chart, area);
}

fn render_submissions(
    f: &mut Frame,
    area: Rect,
    data: &AdminData,
    filter: &SubmissionFilter,
    editing: bool,
    list_state: &mut ListState,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let search_style = if editing {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let search_text = if filter.term.is_empty() && !editing {
        "Search by name, task type...".to_string()
    } else if editing {
        format!("{}▏", filter.term)
    } else {
        filter.term.clone()
    };
    let filter_bar = Paragraph::new(Line::from(vec![
        Span::styled("🔍 ", Style::default().fg(Color::Gray)),
        Span::styled(search_text, search_style),
        Span::styled("  │  Status: ", Style::default().fg(Color::Gray)),
        Span::styled(filter.status.to_string(), Style::default().fg(Color::Cyan)),
        Span::styled("  │  Task Type: ", Style::default().fg(Color::Gray)),
        Span::styled(filter.task_type.to_string(), Style::default().fg(Color::Cyan)),
    ]))
    .block(Block::default().borders(Borders::ALL).title("Filter Submissions"));
    f.render_widget(filter_bar, chunks[0]);

    let filtered = data.filtered(filter);
    let title = format!("All Submissions ({})", filtered.len());
    if filtered.is_empty() {
        list_state.select(None);
        render_empty_state(f, chunks[1], &title, "No submissions found matching your filters");
        return;
    }
    if list_state.selected().map_or(false, |i| i >= filtered.len()) {
        list_state.select(Some(0));
    }

    let items: Vec<ListItem> = filtered.iter().map(|submission| submission_item(submission)).collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::LightBlue).fg(Color::Black).add_modifier(Modifier::BOLD))
        .highlight_symbol("→ ");

    f.render_stateful_widget(list, chunks[1], list_state);
}

fn submission_item(submission: &Submission) -> ListItem<'static> {
    let outcome = submission.outcome();
    ListItem::new(vec![
        Line::from(vec![
            Span::styled(
                submission.name.clone().unwrap_or_else(|| "Unknown".to_string()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" · "),
            Span::styled(submission.task_type.clone().unwrap_or_default(), Style::default().fg(Color::Gray)),
            Span::raw("  "),
            badge(submission.status_label(), outcome_style(outcome)),
        ]),
        Line::from(vec![
            Span::raw(format!("   {}", submission.miner_name.clone().unwrap_or_default())),
            Span::styled(
                format!("  Leader: {}", submission.leader_name.as_deref().unwrap_or("None")),
                Style::default().fg(Color::Gray),
            ),
            Span::styled(
                format!("  {}", display_timestamp(submission.timestamp.as_deref())),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    ])
}

fn render_members(f: &mut Frame, area: Rect, data: &AdminData, list_state: &mut ListState) {
    let title = format!("Team Members ({})", data.members.len());
    if data.members.is_empty() {
        render_empty_state(f, area, &title, "No users found");
        return;
    }

    let items: Vec<ListItem> = data
        .members
        .iter()
        .map(|member| {
            let role_style = if member.is_admin() {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            ListItem::new(Line::from(vec![
                Span::raw(member.email.clone()),
                Span::raw("  "),
                badge(&member.role, role_style),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::LightBlue).fg(Color::Black))
        .highlight_symbol("→ ");

    f.render_stateful_widget(list, area, list_state);
}
