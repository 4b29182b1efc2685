use std::{path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{ActivityBoard, BoardEvent, HtmlSurface, HttpBoardApi};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod shell;

#[derive(Parser, Debug)]
#[command(about = "Browse and edit an activity sign-up board")]
struct Args {
    /// Board server base URL; overrides the settings file and environment.
    #[arg(long, global = true)]
    server_url: Option<String>,
    #[arg(long, global = true, default_value = config::DEFAULT_SETTINGS_FILE)]
    config: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load the catalog and print the activity list.
    Show {
        /// Print the whole page instead of the activity list.
        #[arg(long)]
        page: bool,
    },
    /// Sign a participant up for an activity.
    Signup {
        #[arg(long)]
        activity: String,
        #[arg(long)]
        email: String,
    },
    /// Remove a participant from an activity.
    Unregister {
        #[arg(long)]
        activity: String,
        #[arg(long)]
        email: String,
    },
    /// Interactive session reading commands from stdin.
    Shell,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = config::load_settings(&args.config)?;
    if let Some(server_url) = args.server_url.as_deref() {
        settings.server_url = config::normalize_server_url(server_url);
    }
    let api = HttpBoardApi::new(&settings.server_url)
        .with_context(|| format!("invalid server url '{}'", settings.server_url))?;
    info!(server_url = %api.base_url(), "using activity board server");
    let board = ActivityBoard::with_message_hide_after(
        Arc::new(api),
        HtmlSurface::new(),
        settings.message_hide_after(),
    );

    match args.command {
        Command::Show { page } => {
            let outcome = board.dispatch(BoardEvent::PageLoaded).await?;
            let surface = board.surface();
            let surface = surface.lock().await;
            if page {
                println!("{}", surface.document());
            } else {
                println!("{}", surface.activities_list_html());
            }
            if !outcome.is_applied() {
                bail!("failed to load activities from {}", settings.server_url);
            }
        }
        Command::Signup { activity, email } => {
            board.surface().lock().await.fill_form(email, activity);
            let outcome = board.dispatch(BoardEvent::SignupSubmitted).await?;
            if let Some(message) = board.surface().lock().await.message() {
                println!("{}", message.text);
            }
            if !outcome.is_applied() {
                bail!("signup failed");
            }
        }
        Command::Unregister { activity, email } => {
            board.dispatch(BoardEvent::PageLoaded).await?;
            let outcome = board
                .dispatch(BoardEvent::RemoveClicked {
                    activity: activity.clone(),
                    participant: email.clone(),
                })
                .await?;
            if !outcome.is_applied() {
                bail!("failed to unregister {email} from {activity}; see log for details");
            }
            println!("Unregistered {email} from {activity}");
        }
        Command::Shell => shell::run(board).await?,
    }

    Ok(())
}
