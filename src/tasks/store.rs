//! JSON-file task store.
//!
//! Tasks live in a single pretty-printed JSON file. The whole file is read
//! at open and rewritten after every mutation — write to a `.tmp` sibling,
//! then rename, so readers never see a partial file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::model::{NewTask, Status, Task};

/// Current on-disk format version.
const FILE_VERSION: u32 = 1;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("task not found: {0}")]
    NotFound(u64),
    #[error("cannot read tasks file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write tasks file {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("tasks file {path} is not valid JSON")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("cannot serialize tasks")]
    Serialize(#[source] serde_json::Error),
}

/// On-disk envelope: `{ "version": 1, "updated_at": "...", "tasks": [...] }`.
#[derive(Serialize, Deserialize)]
struct TasksFile {
    version: u32,
    updated_at: chrono::DateTime<chrono::Utc>,
    tasks: Vec<Task>,
}

/// Either the versioned envelope or a legacy bare array of tasks.
#[derive(Deserialize)]
#[serde(untagged)]
enum FileShape {
    Envelope(TasksFile),
    Legacy(Vec<Task>),
}

/// File-backed task store. All operations take the lock, mutate the
/// in-memory list, and flush before returning.
pub struct TaskStore {
    path: PathBuf,
    tasks: Mutex<Vec<Task>>,
}

impl TaskStore {
    /// Open the store at `path`, loading existing tasks.
    ///
    /// A missing file is an empty store. A file that exists but cannot be
    /// read or parsed is an error — starting empty over a corrupt file would
    /// overwrite it on the next save.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let tasks = match fs::read_to_string(&path).await {
            Ok(contents) => {
                let shape: FileShape =
                    serde_json::from_str(&contents).map_err(|source| StoreError::Parse {
                        path: path.clone(),
                        source,
                    })?;
                match shape {
                    FileShape::Envelope(f) => {
                        if f.version != FILE_VERSION {
                            warn!(
                                path = %path.display(),
                                version = f.version,
                                "tasks file has unknown version — reading anyway"
                            );
                        }
                        f.tasks
                    }
                    FileShape::Legacy(tasks) => {
                        debug!(path = %path.display(), "tasks file is a legacy bare array");
                        tasks
                    }
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(source) => {
                return Err(StoreError::Read {
                    path: path.clone(),
                    source,
                })
            }
        };

        debug!(path = %path.display(), count = tasks.len(), "task store opened");
        Ok(Self {
            path,
            tasks: Mutex::new(tasks),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Insert a draft, assigning the next id. Returns the stored task.
    pub async fn insert(&self, draft: NewTask) -> Result<Task, StoreError> {
        let mut tasks = self.tasks.lock().await;
        let id = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let task = draft.with_id(id);
        tasks.push(task.clone());
        self.flush(&tasks).await?;
        debug!(id, "task inserted");
        Ok(task)
    }

    /// All tasks, optionally filtered by status. Order is insertion order.
    pub async fn list(&self, status: Option<Status>) -> Vec<Task> {
        let tasks = self.tasks.lock().await;
        tasks
            .iter()
            .filter(|t| status.map(|s| t.status == s).unwrap_or(true))
            .cloned()
            .collect()
    }

    pub async fn get(&self, id: u64) -> Option<Task> {
        let tasks = self.tasks.lock().await;
        tasks.iter().find(|t| t.id == id).cloned()
    }

    pub async fn update_description(
        &self,
        id: u64,
        description: &str,
    ) -> Result<Task, StoreError> {
        self.update(id, |t| t.with_description(description)).await
    }

    pub async fn update_status(&self, id: u64, status: Status) -> Result<Task, StoreError> {
        self.update(id, |t| t.with_status(status)).await
    }

    /// Remove a task. Unknown ids are an error so the CLI can report them.
    pub async fn delete(&self, id: u64) -> Result<(), StoreError> {
        let mut tasks = self.tasks.lock().await;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Err(StoreError::NotFound(id));
        }
        self.flush(&tasks).await?;
        debug!(id, "task deleted");
        Ok(())
    }

    async fn update(
        &self,
        id: u64,
        f: impl FnOnce(Task) -> Task,
    ) -> Result<Task, StoreError> {
        let mut tasks = self.tasks.lock().await;
        let idx = tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))?;
        let updated = f(tasks[idx].clone());
        tasks[idx] = updated.clone();
        self.flush(&tasks).await?;
        debug!(id, "task updated");
        Ok(updated)
    }

    /// Atomic write: tmp file → rename to prevent partial reads.
    async fn flush(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let payload = TasksFile {
            version: FILE_VERSION,
            updated_at: chrono::Utc::now(),
            tasks: tasks.to_vec(),
        };
        let json = serde_json::to_string_pretty(&payload).map_err(StoreError::Serialize)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|source| StoreError::Write {
                        path: self.path.clone(),
                        source,
                    })?;
            }
        }

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json)
            .await
            .map_err(|source| StoreError::Write {
                path: tmp_path.clone(),
                source,
            })?;
        fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })?;
        Ok(())
    }
}
