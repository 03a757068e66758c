//! Interactive shell — the default mode when no subcommand is given.
//!
//! Reads lines of the form `task-cli <action> [<id>|<status>] ["description"]`
//! until `exit`. Every line dispatches to the same store operations as the
//! one-shot subcommands; a failed command prints the error and the loop
//! continues.
//!
//! Usage:
//!   > task-cli add "buy groceries"
//!   > task-cli mark-done 1
//!   > task-cli list done
//!   > exit

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::Write as IoWrite;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::tasks::{NewTask, Status, TaskStore};

static LINE_RE: Lazy<Regex> = Lazy::new(|| {
    // action, then an optional id-or-status word, then an optional quoted
    // description. Compiled once; the shell evaluates it per line.
    Regex::new(r#"^task-cli\s+([\w-]+)(?:\s+(\d+|[\w-]+))?(?:\s+"([^"]+)")?$"#).unwrap()
});

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Add { description: String },
    Update { id: u64, description: String },
    Delete { id: u64 },
    MarkInProgress { id: u64 },
    MarkDone { id: u64 },
    List { status: Option<Status> },
}

/// Parse one input line. `None` means the line is not a valid command.
pub fn parse_line(line: &str) -> Option<ShellCommand> {
    let caps = LINE_RE.captures(line.trim())?;
    let action = caps.get(1)?.as_str();
    let arg = caps.get(2).map(|m| m.as_str());
    let description = caps.get(3).map(|m| m.as_str().to_string());

    let parse_id = |s: Option<&str>| s.and_then(|v| v.parse::<u64>().ok());

    match action {
        "add" => Some(ShellCommand::Add {
            description: description?,
        }),
        "update" => Some(ShellCommand::Update {
            id: parse_id(arg)?,
            description: description?,
        }),
        "delete" => Some(ShellCommand::Delete { id: parse_id(arg)? }),
        "mark-in-progress" => Some(ShellCommand::MarkInProgress { id: parse_id(arg)? }),
        "mark-done" => Some(ShellCommand::MarkDone { id: parse_id(arg)? }),
        "list" => {
            let status = match arg {
                None => None,
                // An unknown status word is an invalid line, not "no filter".
                Some(word) => Some(word.parse::<Status>().ok()?),
            };
            Some(ShellCommand::List { status })
        }
        _ => None,
    }
}

/// Run the interactive loop until `exit` or EOF.
pub async fn run_shell(store: &TaskStore) -> Result<()> {
    println!("Welcome to the Command Line App. Type 'exit' to quit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            // EOF — treat like exit so piped input terminates cleanly.
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("exit") {
            println!("Goodbye!");
            break;
        }

        let Some(cmd) = parse_line(line) else {
            println!("Invalid command");
            continue;
        };

        if let Err(e) = execute(store, cmd).await {
            println!("Error: {e}");
        }
    }

    Ok(())
}

async fn execute(store: &TaskStore, cmd: ShellCommand) -> Result<()> {
    match cmd {
        ShellCommand::Add { description } => {
            let task = store.insert(NewTask::new(description)).await?;
            println!("Task added successfully (ID: {})", task.id);
        }
        ShellCommand::Update { id, description } => {
            store.update_description(id, &description).await?;
        }
        ShellCommand::Delete { id } => {
            store.delete(id).await?;
        }
        ShellCommand::MarkInProgress { id } => {
            store.update_status(id, Status::InProgress).await?;
        }
        ShellCommand::MarkDone { id } => {
            store.update_status(id, Status::Done).await?;
        }
        ShellCommand::List { status } => {
            for task in store.list(status).await {
                println!("{task}");
            }
        }
    }
    Ok(())
}
