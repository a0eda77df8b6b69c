use std::io::Read;

use anyhow::{anyhow, bail, Context, Result};

use crate::board::Board;
use crate::config;
use crate::error::BoardError;
use crate::model::filter::{self, Filter};
use crate::model::status::{BoardStats, StatusCategory, STATUS_SUGGESTIONS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentInput {
    Text(String),
    Stdin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Tui,
    List { filter: Filter, json: bool },
    Stats { assignee: Option<String> },
    Show { id: String },
    Status { id: String, status: String },
    Title { id: String, title: String },
    Content { id: String, write: Option<ContentInput> },
    Help,
}

impl Command {
    pub fn is_tui(&self) -> bool {
        matches!(self, Command::Tui)
    }
}

fn flag_value(args: &[String], i: &mut usize, flag: &str) -> Result<String> {
    *i += 1;
    match args.get(*i) {
        Some(v) => Ok(v.clone()),
        None => bail!("Missing value for {flag}"),
    }
}

fn page_id(args: &[String], usage: &str) -> Result<String> {
    match args.first() {
        Some(id) if !id.starts_with('-') => Ok(id.clone()),
        _ => bail!("Usage: {usage}"),
    }
}

/// Parse everything after the program name.
pub fn parse_args(args: &[String]) -> Result<Command> {
    let Some((cmd, rest)) = args.split_first() else {
        return Ok(Command::Tui);
    };

    match cmd.as_str() {
        "list" | "ls" => {
            let mut filter = Filter::default();
            let mut json = false;
            let mut i = 0;
            while i < rest.len() {
                match rest[i].as_str() {
                    "-a" | "--assignee" => filter.assignee = Some(flag_value(rest, &mut i, "--assignee")?),
                    "-s" | "--status" => filter.status = Some(flag_value(rest, &mut i, "--status")?),
                    "--json" => json = true,
                    other => bail!("Unknown option for list: {other}"),
                }
                i += 1;
            }
            Ok(Command::List { filter, json })
        }
        "stats" => {
            let mut assignee = None;
            let mut i = 0;
            while i < rest.len() {
                match rest[i].as_str() {
                    "-a" | "--assignee" => assignee = Some(flag_value(rest, &mut i, "--assignee")?),
                    other => bail!("Unknown option for stats: {other}"),
                }
                i += 1;
            }
            Ok(Command::Stats { assignee })
        }
        "show" => Ok(Command::Show {
            id: page_id(rest, "board show <page-id>")?,
        }),
        "status" => {
            let id = page_id(rest, "board status <page-id> <status>")?;
            let status = rest[1..].join(" ");
            if status.trim().is_empty() {
                bail!("Usage: board status <page-id> <status>\n\nSuggested: {}", STATUS_SUGGESTIONS.join(", "));
            }
            Ok(Command::Status { id, status })
        }
        "title" => {
            let id = page_id(rest, "board title <page-id> <title>")?;
            let title = rest[1..].join(" ");
            if title.trim().is_empty() {
                bail!("Task title cannot be empty");
            }
            Ok(Command::Title { id, title })
        }
        "content" => {
            let id = page_id(rest, "board content <page-id> [--set <text> | --stdin]")?;
            let mut write = None;
            let mut i = 1;
            while i < rest.len() {
                match rest[i].as_str() {
                    "--set" => write = Some(ContentInput::Text(flag_value(rest, &mut i, "--set")?)),
                    "--stdin" => write = Some(ContentInput::Stdin),
                    other => bail!("Unknown option for content: {other}"),
                }
                i += 1;
            }
            Ok(Command::Content { id, write })
        }
        "help" | "-h" | "--help" => Ok(Command::Help),
        other => bail!("Unknown command: {other}\n\nRun `board help` for usage."),
    }
}

/// Configuration gaps get a pointer to where the value is set; transport errors keep
/// their cause chain.
fn fetch_error(e: BoardError) -> anyhow::Error {
    if e.is_config() {
        anyhow!(
            "{e}\n\nSet it in the environment or under [notion] in {}",
            config::config_path().display()
        )
    } else {
        anyhow::Error::new(e).context("Failed to fetch records")
    }
}

pub async fn run(command: Command, board: &Board) -> Result<()> {
    match command {
        Command::Tui | Command::Help => print_help(),
        Command::List { filter, json } => {
            let records = board.records().await.map_err(fetch_error)?;
            let visible = filter.apply(&records);
            if json {
                println!("{}", serde_json::to_string_pretty(&visible)?);
                return Ok(());
            }
            if visible.is_empty() {
                println!("No records found.");
            }
            for r in visible {
                println!(
                    "{}  [{}]  {}  ({})  {}",
                    r.id,
                    r.status,
                    r.title,
                    r.assignee.as_deref().unwrap_or("-"),
                    r.last_edited_display()
                );
            }
        }
        Command::Stats { assignee } => {
            let records = board.records().await.map_err(fetch_error)?;
            let filter = Filter {
                assignee,
                status: None,
            };
            let stats = BoardStats::from_records(filter.apply(&records));
            println!("Overview for {}", filter.heading());
            println!("  Total tasks  {}", stats.total);
            println!("  Completed    {} ({}%)", stats.completed, stats.completed_percentage);
            println!("  In Progress  {} ({}%)", stats.in_progress, stats.in_progress_percentage);
            println!("  Not Started  {} ({}%)", stats.not_started, stats.not_started_percentage);
            if filter.assignee.is_none() {
                println!();
                for (name, count) in filter::assignee_counts(&records) {
                    println!("  {name}: {count}");
                }
            }
        }
        Command::Show { id } => {
            let detail = board.detail(&id).await.context("Failed to fetch record")?;
            let r = &detail.record;
            println!("{}", r.title);
            println!(
                "Status: {} ({})",
                r.status,
                StatusCategory::classify(&r.status).label()
            );
            println!("Assignee: {}", r.assignee.as_deref().unwrap_or("Unassigned"));
            if let Some(path) = r.depth_path() {
                println!("Category: {path}");
            }
            println!("Last edited: {}", r.last_edited_display());
            println!("URL: {}", r.url);
            if !detail.content.is_empty() {
                println!();
                println!("{}", detail.content);
            }
        }
        Command::Status { id, status } => {
            board
                .set_status(&id, &status)
                .await
                .context("Failed to update status")?;
            println!("Status of {id} set to {status}");
        }
        Command::Title { id, title } => {
            board
                .set_title(&id, &title)
                .await
                .context("Failed to update title")?;
            println!("Title of {id} set to {title}");
        }
        Command::Content { id, write: None } => {
            println!("{}", board.content(&id).await);
        }
        Command::Content {
            id,
            write: Some(input),
        } => {
            let text = match input {
                ContentInput::Text(t) => t,
                ContentInput::Stdin => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("Failed to read content from stdin")?;
                    buf
                }
            };
            let outcome = board
                .save_content(&id, &text)
                .await
                .context("Failed to update page content")?;
            println!(
                "Saved {} paragraph(s), removed {} old block(s)",
                outcome.appended, outcome.deleted
            );
            if !outcome.is_clean() {
                eprintln!(
                    "warning: {} old block(s) could not be removed: {}",
                    outcome.failed_deletes.len(),
                    outcome.failed_deletes.join(", ")
                );
            }
        }
    }
    Ok(())
}

pub fn print_help() {
    println!("board: terminal task board for a Notion database\n");
    println!("USAGE:");
    println!("  board                              Launch the TUI dashboard");
    println!("  board list [-a NAME] [-s STATUS] [--json]");
    println!("  board stats [-a NAME]              Completed / in progress / not started");
    println!("  board show <page-id>               Record and its content");
    println!("  board status <page-id> <status>    Set the Status select");
    println!("  board title <page-id> <title>      Rename a task");
    println!("  board content <page-id>            Print page content as text");
    println!("  board content <page-id> --set <text> | --stdin");
    println!();
    println!("CONFIG:");
    println!("  NOTION_API_KEY / NEXT_PUBLIC_NOTION_API_KEY");
    println!("  NOTION_DATABASE_ID / NEXT_PUBLIC_NOTION_DATABASE_ID");
    println!("  or [notion] in ~/.notion-board/config.toml");
}
