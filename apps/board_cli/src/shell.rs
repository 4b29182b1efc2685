//! Line-oriented front end: each command becomes a board event.

use std::sync::Arc;

use client_core::{ActivityBoard, BoardEvent, HtmlSurface};
use tokio::io::{AsyncBufReadExt, BufReader};

pub const HELP: &str = "commands:
  reload                      re-fetch and show the activities
  signup <email> <activity>   submit the signup form
  remove <email> <activity>   click the remove control of a participant
  page                        print the whole page
  help                        show this help
  quit                        leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Reload,
    Signup { email: String, activity: String },
    Remove { email: String, activity: String },
    Page,
    Help,
    Quit,
}

/// Parses one input line. Blank lines yield `Ok(None)`; activity names may contain spaces.
pub fn parse_command(line: &str) -> Result<Option<ShellCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let participant = |usage: &str| -> Result<(String, String), String> {
        match rest.split_once(char::is_whitespace) {
            Some((email, activity)) if !activity.trim().is_empty() => {
                Ok((email.to_string(), activity.trim().to_string()))
            }
            _ => Err(format!("usage: {usage}")),
        }
    };

    let command = match verb {
        "reload" => ShellCommand::Reload,
        "page" => ShellCommand::Page,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        "signup" => {
            let (email, activity) = participant("signup <email> <activity>")?;
            ShellCommand::Signup { email, activity }
        }
        "remove" => {
            let (email, activity) = participant("remove <email> <activity>")?;
            ShellCommand::Remove { email, activity }
        }
        other => return Err(format!("unknown command '{other}'; try 'help'")),
    };
    Ok(Some(command))
}

async fn print_activities(board: &ActivityBoard<HtmlSurface>) {
    println!("{}", board.surface().lock().await.activities_list_html());
}

pub async fn run(board: Arc<ActivityBoard<HtmlSurface>>) -> anyhow::Result<()> {
    println!("{HELP}");
    board.dispatch(BoardEvent::PageLoaded).await?;
    print_activities(&board).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(usage) => {
                println!("{usage}");
                continue;
            }
        };

        match command {
            ShellCommand::Quit => break,
            ShellCommand::Help => println!("{HELP}"),
            ShellCommand::Page => println!("{}", board.surface().lock().await.document()),
            ShellCommand::Reload => {
                board.dispatch(BoardEvent::PageLoaded).await?;
                print_activities(&board).await;
            }
            ShellCommand::Signup { email, activity } => {
                board.surface().lock().await.fill_form(email, activity);
                board.dispatch(BoardEvent::SignupSubmitted).await?;
                println!("{}", board.surface().lock().await.message_html());
                print_activities(&board).await;
            }
            ShellCommand::Remove { email, activity } => {
                let outcome = board
                    .dispatch(BoardEvent::RemoveClicked {
                        activity,
                        participant: email,
                    })
                    .await?;
                if !outcome.is_applied() {
                    println!("remove failed; see log for details");
                }
                print_activities(&board).await;
            }
        }
    }
    Ok(())
}
