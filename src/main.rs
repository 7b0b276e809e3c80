use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use submission_dashboard::api::{TrackerApi, TrackerClient};
use submission_dashboard::dashboard::RoleDashboard;
use submission_dashboard::filters::{StatusFilter, SubmissionFilter, TaskTypeFilter};
use submission_dashboard::models::Config;
use submission_dashboard::{report, ui};

/// Team submission tracker dashboard
#[derive(Parser)]
#[command(name = "submission-dashboard")]
#[command(version)]
#[command(about = "Terminal dashboard for the team submission tracker")]
#[command(long_about = "
Shows the team submission tracker's analytics in the terminal. Admins get the
team-wide dashboard, reviewers get their own statistics and recent submissions.

Without a subcommand the interactive dashboard starts. The summary and
submissions subcommands print plain-text reports instead.

Examples:
  submission-dashboard
  submission-dashboard --log-file dashboard.log
  submission-dashboard --email me@meti.services summary
  submission-dashboard -e lead@meti.services submissions --status Rejected --task-type Mining
  submission-dashboard -e lead@meti.services submissions --field \"Mistake Reason\"
")]
struct Cli {
    /// Backend base URL (overrides TRACKER_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Sign in with this email before reporting
    #[arg(long, short = 'e')]
    email: Option<String>,

    /// Request timeout in seconds (overrides TRACKER_REQUEST_TIMEOUT_SECS)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Append logs to this file (the dashboard discards them otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Clone)]
enum Command {
    /// Interactive terminal dashboard (default)
    Tui,
    /// Print the role-specific summary cards
    Summary,
    /// Print the visible submissions, filtered like the dashboard table
    Submissions {
        /// Case-insensitive search over name, task type and miner name
        #[arg(long, default_value = "")]
        search: String,
        /// all, Accepted or Rejected
        #[arg(long, default_value = "all")]
        status: String,
        /// all, or an exact task type
        #[arg(long, default_value = "all")]
        task_type: String,
        /// Extra sheet column to print after the standard ones (repeatable)
        #[arg(long = "field", value_name = "HEADER")]
        fields: Vec<String>,
    },
}

/// Where log lines go. The dashboard owns the terminal, so without a log
/// file its output is dropped; report mode writes to stderr.
fn log_writer(interactive: bool, log_file: Option<&Path>) -> Result<BoxMakeWriter> {
    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            Ok(BoxMakeWriter::new(Arc::new(file)))
        }
        None if interactive => Ok(BoxMakeWriter::new(std::io::sink)),
        None => Ok(BoxMakeWriter::new(std::io::stderr)),
    }
}

fn build_subscriber(
    filter: EnvFilter,
    interactive: bool,
    log_file: Option<&Path>,
) -> Result<impl tracing::Subscriber + Send + Sync + 'static> {
    Ok(FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_ansi(log_file.is_none())
        .with_writer(log_writer(interactive, log_file)?)
        .finish())
}

fn init_logging(interactive: bool, log_file: Option<&Path>) -> Result<()> {
    let default_directive = if interactive {
        "submission_dashboard=error"
    } else {
        "submission_dashboard=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    let subscriber = build_subscriber(filter, interactive, log_file)?;

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow!("setting default subscriber failed: {}", e))
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config.base_url = Config::parse_base_url(base_url)?;
    }
    if let Some(secs) = cli.timeout_secs {
        config.request_timeout = Some(Duration::from_secs(secs));
    }
    Ok(config)
}

async fn run_report(api: &dyn TrackerApi, cli: &Cli, command: &Command) -> Result<()> {
    let user = report::authenticate(api, cli.email.as_deref()).await?;
    info!("Reporting as {} ({})", user.email, user.role);

    let dashboard = RoleDashboard::load(api, &user).await;
    let output = match command {
        Command::Submissions { search, status, task_type, fields } => {
            let filter = SubmissionFilter {
                term: search.clone(),
                status: StatusFilter::parse(status)
                    .ok_or_else(|| anyhow!("Unknown status '{}': use all, Accepted or Rejected", status))?,
                task_type: TaskTypeFilter::parse(task_type),
            };
            report::submissions_report(&dashboard, &filter, fields)?
        }
        _ => report::summary_report(&dashboard)?,
    };
    print!("{}", output);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.clone().unwrap_or(Command::Tui);
    init_logging(matches!(command, Command::Tui), cli.log_file.as_deref())?;

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            eprintln!("❌ Configuration Error: {}", e);
            std::process::exit(1);
        }
    };
    info!("Using tracker backend at {}", config.base_url);

    let client = TrackerClient::new(&config)?;
    match &command {
        Command::Tui => ui::run_app(Arc::new(client)).await,
        other => run_report(&client, &cli, other).await,
    }
}
