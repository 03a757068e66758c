use serde::Deserialize;
use std::path::{Path, PathBuf};

const TASKS_FILE_NAME: &str = "tasks.json";

/// `{data_dir}/config.toml` — all fields are optional overrides.
/// Priority: CLI / env var  >  TOML  >  built-in default.
#[derive(Deserialize, Default)]
struct TomlConfig {
    /// Path of the tasks file (default: `{data_dir}/tasks.json`).
    tasks_file: Option<PathBuf>,
    /// Log level filter string, e.g. "debug", "info,task_cli=trace" (default: "info").
    log: Option<String>,
}

fn load_toml(data_dir: &Path) -> Option<TomlConfig> {
    let path = data_dir.join("config.toml");
    let contents = std::fs::read_to_string(&path).ok()?;
    match toml::from_str::<TomlConfig>(&contents) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            // Config is loaded before the tracing subscriber is installed,
            // so this diagnostic must go to stderr directly.
            eprintln!(
                "warn: failed to parse {}: {e} — using defaults",
                path.display()
            );
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    /// Where tasks are persisted.
    pub tasks_file: PathBuf,
    pub log: String,
}

impl AppConfig {
    /// Build config from CLI/env args + optional TOML file.
    ///
    /// Priority (highest to lowest):
    ///   1. CLI / env — passed as `Some(value)` from clap
    ///   2. TOML file at `{data_dir}/config.toml`
    ///   3. Built-in defaults
    pub fn new(
        data_dir: Option<PathBuf>,
        tasks_file: Option<PathBuf>,
        log: Option<String>,
    ) -> Self {
        let data_dir = data_dir.unwrap_or_else(default_data_dir);

        // Load TOML as the lowest-priority override layer
        let toml = load_toml(&data_dir).unwrap_or_default();

        let tasks_file = tasks_file
            .or(toml.tasks_file)
            .unwrap_or_else(|| data_dir.join(TASKS_FILE_NAME));
        let log = log.or(toml.log).unwrap_or_else(|| "info".to_string());

        Self {
            data_dir,
            tasks_file,
            log,
        }
    }
}

fn default_data_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        // ~/Library/Application Support/task-cli
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("task-cli");
        }
    }
    #[cfg(target_os = "linux")]
    {
        // $XDG_DATA_HOME/task-cli or ~/.local/share/task-cli
        if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
            return PathBuf::from(xdg).join("task-cli");
        }
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home)
                .join(".local")
                .join("share")
                .join("task-cli");
        }
    }
    #[cfg(target_os = "windows")]
    {
        // %APPDATA%\task-cli
        if let Ok(appdata) = std::env::var("APPDATA") {
            return PathBuf::from(appdata).join("task-cli");
        }
    }
    // Fallback
    PathBuf::from(".task-cli")
}
