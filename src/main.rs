use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use task_cli::config::AppConfig;
use task_cli::shell;
use task_cli::tasks::{NewTask, Status, Task, TaskStore};
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "task-cli",
    about = "Local task tracker — JSON-file store, one-shot subcommands, and an interactive shell",
    version
)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Tasks file path (default: {data_dir}/tasks.json)
    #[arg(long, env = "TASK_CLI_FILE", global = true)]
    file: Option<std::path::PathBuf>,

    /// Data directory for the tasks file and config.toml
    #[arg(long, env = "TASK_CLI_DATA_DIR", global = true)]
    data_dir: Option<std::path::PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "TASK_CLI_LOG", global = true)]
    log: Option<String>,

    /// Write logs to this file path (rotated daily). Optional.
    #[arg(long, env = "TASK_CLI_LOG_FILE", global = true)]
    log_file: Option<std::path::PathBuf>,

    /// Suppress progress and informational output.
    ///
    /// Errors are still printed to stderr. JSON output (--json flags) is
    /// unaffected. Use this flag when piping output to other tools.
    #[arg(long, short = 'q', global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Add a new task.
    ///
    /// The task starts in todo status with a fresh id. Prints the assigned id.
    ///
    /// Examples:
    ///   task-cli add "buy groceries"
    Add {
        /// Task description
        description: String,
    },
    /// Replace the description of a task.
    ///
    /// Examples:
    ///   task-cli update 1 "buy groceries and cook dinner"
    Update {
        /// Task id
        id: u64,
        /// New description
        description: String,
    },
    /// Delete a task by id.
    ///
    /// Fails with exit 1 if the id does not exist.
    ///
    /// Examples:
    ///   task-cli delete 1
    Delete {
        /// Task id
        id: u64,
    },
    /// Mark a task in-progress.
    ///
    /// Examples:
    ///   task-cli mark-in-progress 1
    MarkInProgress {
        /// Task id
        id: u64,
    },
    /// Mark a task done.
    ///
    /// Examples:
    ///   task-cli mark-done 1
    MarkDone {
        /// Task id
        id: u64,
    },
    /// List tasks, optionally filtered by status.
    ///
    /// Prints a formatted table. Use --json for machine-readable output
    /// suitable for piping to other tools.
    ///
    /// Examples:
    ///   task-cli list
    ///   task-cli list done
    ///   task-cli list in-progress --json
    List {
        /// Status filter: todo, in-progress, or done
        status: Option<Status>,
        /// Output as JSON array (for piping)
        #[arg(long)]
        json: bool,
    },
    /// Run the interactive shell (default when no subcommand given).
    ///
    /// Reads lines like `task-cli add "buy groceries"` until `exit`.
    ///
    /// Examples:
    ///   task-cli shell
    ///   task-cli
    Shell,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // ── Logging setup ────────────────────────────────────────────────────────
    // Init once — must happen before any tracing calls.
    let config = AppConfig::new(args.data_dir, args.file, args.log);
    let _file_guard = setup_logging(&config.log, args.log_file.as_deref());

    debug!(tasks_file = %config.tasks_file.display(), "starting");
    let store = TaskStore::open(&config.tasks_file)
        .await
        .with_context(|| format!("cannot open task store at {}", config.tasks_file.display()))?;

    let quiet = args.quiet;
    match args.command {
        Some(Command::Add { description }) => {
            let task = store.insert(NewTask::new(description)).await?;
            if !quiet {
                println!("Task added successfully (ID: {})", task.id);
            }
        }
        Some(Command::Update { id, description }) => {
            let task = store.update_description(id, &description).await?;
            if !quiet {
                println!("Updated: {} — {}", task.id, task.description);
            }
        }
        Some(Command::Delete { id }) => {
            store.delete(id).await?;
            if !quiet {
                println!("Deleted: {id}");
            }
        }
        Some(Command::MarkInProgress { id }) => {
            let task = store.update_status(id, Status::InProgress).await?;
            if !quiet {
                println!("Status: {} is now {}", task.id, task.status);
            }
        }
        Some(Command::MarkDone { id }) => {
            let task = store.update_status(id, Status::Done).await?;
            if !quiet {
                println!("Status: {} is now {}", task.id, task.status);
            }
        }
        Some(Command::List { status, json }) => {
            let tasks = store.list(status).await;
            print_task_list(&tasks, json)?;
        }
        None | Some(Command::Shell) => {
            shell::run_shell(&store).await?;
        }
    }

    Ok(())
}

fn print_task_list(tasks: &[Task], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(tasks)?);
    } else if tasks.is_empty() {
        println!("No tasks found.");
    } else {
        println!("{:<6} {:<12} {:<20} DESCRIPTION", "ID", "STATUS", "CREATED");
        println!("{}", "-".repeat(72));
        for t in tasks {
            println!(
                "{:<6} {:<12} {:<20} {}",
                t.id,
                t.status.to_string(),
                t.created_at.format("%Y-%m-%d %H:%M"),
                t.description
            );
        }
        println!("\n{} task(s)", tasks.len());
    }
    Ok(())
}

/// Initialize the tracing subscriber.
/// If `log_file` is set, logs go to both stdout and a daily-rolling file.
/// Returns a `WorkerGuard` that must stay alive for the process lifetime.
///
/// If the log directory cannot be created, falls back to stdout-only logging
/// with a warning — never panics.
fn setup_logging(
    log_level: &str,
    log_file: Option<&std::path::Path>,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    if let Some(path) = log_file {
        let dir = path.parent().unwrap_or_else(|| std::path::Path::new("."));
        let filename = path
            .file_name()
            .unwrap_or_else(|| std::ffi::OsStr::new("task-cli.log"));

        // Ensure the directory exists before tracing-appender tries to open it.
        if let Err(e) = std::fs::create_dir_all(dir) {
            // Fall back to stdout-only — don't panic on a bad log path.
            eprintln!(
                "warn: could not create log directory '{}': {e} — falling back to stdout",
                dir.display()
            );
            tracing_subscriber::fmt().with_env_filter(log_level).compact().init();
            return None;
        }

        let appender = tracing_appender::rolling::daily(dir, filename);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);

        tracing_subscriber::registry()
            .with(EnvFilter::new(log_level))
            .with(fmt::layer().compact())
            .with(fmt::layer().with_writer(non_blocking))
            .init();

        Some(guard)
    } else {
        tracing_subscriber::fmt().with_env_filter(log_level).compact().init();
        None
    }
}
