use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use super::components::render_loading_indicator;
use super::layout::TuiLayout;
use super::login::{LoginAction, LoginForm};
use super::view::{view_for, View};
use crate::api::TrackerApi;
use crate::dashboard::{admin, reviewer, RoleDashboard, ViewState};
use crate::models::SessionUser;
use crate::session::{self, SessionState, SignInError};

const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(250);
const BUSY_POLL_INTERVAL: Duration = Duration::from_millis(50);

enum Screen {
    /// Initial session check; nothing else is shown until it settles
    Checking,
    Login(LoginForm),
    Dashboard { user: SessionUser, view: Box<dyn View> },
}

/// Backend work queued by a key press, started after the next draw so the
/// loading state is on screen while it runs
#[derive(Debug, Clone, PartialEq)]
enum PendingAction {
    Verify,
    SignIn(String),
    Mount(SessionUser),
    SignOut,
}

/// What a finished backend task hands back to the UI
#[derive(Debug)]
enum Outcome {
    Session(SessionState),
    SignIn(Result<SessionUser, SignInError>),
    Loaded(RoleDashboard),
    SignedOut,
}

impl PendingAction {
    async fn run(self, api: Arc<dyn TrackerApi>) -> Outcome {
        match self {
            PendingAction::Verify => Outcome::Session(session::verify_session(api.as_ref()).await),
            PendingAction::SignIn(email) => Outcome::SignIn(session::sign_in(api.as_ref(), &email).await),
            PendingAction::Mount(user) => Outcome::Loaded(RoleDashboard::load(api.as_ref(), &user).await),
            PendingAction::SignOut => {
                session::sign_out(api.as_ref()).await;
                Outcome::SignedOut
            }
        }
    }

    /// Outcome to fall back on when the task died before answering
    fn abandoned(&self) -> Outcome {
        match self {
            PendingAction::Verify => Outcome::Session(SessionState::Unauthenticated),
            PendingAction::SignIn(_) => Outcome::SignIn(Err(SignInError::Failed)),
            PendingAction::Mount(user) => Outcome::Loaded(match RoleDashboard::for_user(user) {
                RoleDashboard::Admin(_) => RoleDashboard::Admin(ViewState::Failed(admin::LOAD_ERROR.to_string())),
                RoleDashboard::Reviewer(_) => {
                    RoleDashboard::Reviewer(ViewState::Failed(reviewer::LOAD_ERROR.to_string()))
                }
            }),
            PendingAction::SignOut => Outcome::SignedOut,
        }
    }
}

/// A backend call running off the UI task
struct InFlight {
    action: PendingAction,
    task: JoinHandle<Outcome>,
}

pub struct App {
    api: Arc<dyn TrackerApi>,
    screen: Screen,
    pending: Option<PendingAction>,
    in_flight: Option<InFlight>,
    pub should_quit: bool,
}

impl App {
    pub fn new(api: Arc<dyn TrackerApi>) -> Self {
        Self {
            api,
            screen: Screen::Checking,
            pending: Some(PendingAction::Verify),
            in_flight: None,
            should_quit: false,
        }
    }

    /// Signed-in user, once the dashboard is showing
    pub fn user(&self) -> Option<&SessionUser> {
        match &self.screen {
            Screen::Dashboard { user, .. } => Some(user),
            _ => None,
        }
    }

    pub fn login_form(&self) -> Option<&LoginForm> {
        match &self.screen {
            Screen::Login(form) => Some(form),
            _ => None,
        }
    }

    /// A backend call is running
    pub fn in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// A backend call is queued or running
    pub fn is_busy(&self) -> bool {
        self.pending.is_some() || self.in_flight.is_some()
    }

    pub fn draw(&mut self, f: &mut Frame) {
        let area = f.area();
        match &mut self.screen {
            Screen::Checking => render_loading_indicator(f, area, "Checking session..."),
            Screen::Login(form) => form.render(f, area),
            Screen::Dashboard { user, view } => {
                let layout = TuiLayout::new(area);
                layout.render_header(f, user);
                view.render(f, layout.content);
                layout.render_status_bar(f, &view.key_hints(), &view.get_status());
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyCode) {
        let busy = self.is_busy();
        match &mut self.screen {
            Screen::Checking => {
                if matches!(key, KeyCode::Char('q') | KeyCode::Esc) {
                    self.should_quit = true;
                }
            }
            Screen::Login(form) => match form.handle_key(key) {
                LoginAction::Submit(email) => self.pending = Some(PendingAction::SignIn(email)),
                LoginAction::Quit => self.should_quit = true,
                LoginAction::None => {}
            },
            Screen::Dashboard { view, .. } => {
                // Loading or signing out: only quitting is allowed
                if busy {
                    if key == KeyCode::Char('q') {
                        self.should_quit = true;
                    }
                    return;
                }
                if view.captures_text() {
                    view.handle_key(key);
                    return;
                }
                match key {
                    KeyCode::Char('q') => self.should_quit = true,
                    KeyCode::Char('o') => self.pending = Some(PendingAction::SignOut),
                    _ => {
                        view.handle_key(key);
                    }
                }
            }
        }
    }

    /// Advance backend work without blocking: collect a finished call and
    /// move to the screen it leads to, or start the queued one.
    pub async fn tick(&mut self) {
        match self.in_flight.take() {
            Some(running) if !running.task.is_finished() => self.in_flight = Some(running),
            Some(InFlight { action, task }) => {
                let outcome = match task.await {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        error!("Backend task for {:?} failed: {}", action, e);
                        action.abandoned()
                    }
                };
                self.apply(outcome);
            }
            None => {
                if let Some(action) = self.pending.take() {
                    debug!("Performing {:?}", action);
                    let task = tokio::spawn(action.clone().run(Arc::clone(&self.api)));
                    self.in_flight = Some(InFlight { action, task });
                }
            }
        }
    }

    fn apply(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Session(SessionState::Authenticated(user)) => self.mount(user),
            Outcome::Session(SessionState::Unauthenticated) => self.screen = Screen::Login(LoginForm::new()),
            Outcome::SignIn(Ok(user)) => self.mount(user),
            Outcome::SignIn(Err(e)) => {
                if let Screen::Login(form) = &mut self.screen {
                    form.fail(e.to_string());
                }
            }
            Outcome::Loaded(dashboard) => {
                if let Screen::Dashboard { view, .. } = &mut self.screen {
                    *view = view_for(dashboard);
                }
            }
            Outcome::SignedOut => {
                info!("Signed out");
                self.screen = Screen::Login(LoginForm::new());
            }
        }
    }

    fn mount(&mut self, user: SessionUser) {
        let view = view_for(RoleDashboard::for_user(&user));
        self.pending = Some(PendingAction::Mount(user.clone()));
        self.screen = Screen::Dashboard { user, view };
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if let Some(running) = self.in_flight.take() {
            running.task.abort();
        }
    }
}

async fn run_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| app.draw(f))?;
        if app.should_quit {
            return Ok(());
        }

        app.tick().await;

        let timeout = if app.is_busy() { BUSY_POLL_INTERVAL } else { EVENT_POLL_INTERVAL };
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code);
                }
            }
        }
    }
}

/// Run the interactive dashboard until the user quits
pub async fn run_app(api: Arc<dyn TrackerApi>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(api);
    let result = run_loop(&mut terminal, &mut app).await;

    // Cleanup terminal
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}
