use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Task lifecycle status.
///
/// Serialized as `"todo"`, `"in_progress"`, `"done"` in the tasks file and
/// in `--json` output. User input additionally accepts the hyphenated form
/// (`in-progress`) and any capitalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Todo,
    InProgress,
    Done,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::InProgress => "in_progress",
            Status::Done => "done",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Hyphens and underscores are interchangeable in user input.
        match s.to_lowercase().replace('-', "_").as_str() {
            "todo" => Ok(Status::Todo),
            "in_progress" => Ok(Status::InProgress),
            "done" => Ok(Status::Done),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status '{0}' (expected todo, in-progress, or done)")]
pub struct ParseStatusError(pub String);

/// A stored task. Ids are assigned by the store on insert and are never
/// supplied by callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub description: String,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    /// Stamped at id assignment and on every mutation. Only `None` when
    /// loaded from a legacy file that never recorded it.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Replace the description and bump `updated_at`.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self.updated_at = Some(Utc::now());
        self
    }

    /// Replace the status and bump `updated_at`.
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self.updated_at = Some(Utc::now());
        self
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Task{{id={}, description='{}', status='{}', created_at={}, updated_at={}}}",
            self.id,
            self.description,
            self.status,
            self.created_at.to_rfc3339(),
            self.updated_at
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| "-".to_string()),
        )
    }
}

/// A task draft — everything but the id, which the store assigns.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub description: String,
    pub status: Status,
    pub created_at: DateTime<Utc>,
}

impl NewTask {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            status: Status::Todo,
            created_at: Utc::now(),
        }
    }

    /// Attach the store-assigned id, producing a stored `Task`.
    /// Id assignment counts as a mutation, so `updated_at` is stamped here.
    pub(crate) fn with_id(self, id: u64) -> Task {
        Task {
            id,
            description: self.description,
            status: self.status,
            created_at: self.created_at,
            updated_at: Some(Utc::now()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_hyphen_and_underscore() {
        assert_eq!("in-progress".parse::<Status>().unwrap(), Status::InProgress);
        assert_eq!("in_progress".parse::<Status>().unwrap(), Status::InProgress);
        assert_eq!("IN-PROGRESS".parse::<Status>().unwrap(), Status::InProgress);
        assert_eq!("Done".parse::<Status>().unwrap(), Status::Done);
        assert!("doing".parse::<Status>().is_err());
    }

    #[test]
    fn status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&Status::InProgress).unwrap(),
            "\"in_progress\""
        );
    }

    #[test]
    fn new_task_starts_todo_and_id_assignment_stamps_updated_at() {
        let t = NewTask::new("write the report").with_id(1);
        assert_eq!(t.id, 1);
        assert_eq!(t.status, Status::Todo);
        assert!(t.updated_at.is_some());
    }

    #[test]
    fn with_status_bumps_updated_at() {
        let t = NewTask::new("x").with_id(1).with_status(Status::Done);
        assert_eq!(t.status, Status::Done);
        assert!(t.updated_at.is_some());
    }
}
