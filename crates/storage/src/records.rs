//! Persisted shapes and the JSON codec for everything kept in the local store.
//!
//! Both boards share one record schema. Fields only one board uses are
//! optional so either board's stored lists decode.

use chrono::NaiveDate;
use planner_core::board::BoardKind;
use planner_core::model::{
    Column, LessonId, SessionClaims, Task, TaskId, TaskList, TaskTitle,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const PLANNER_TASKS_KEY: &str = "granstudy:tasks";
pub const STUDY_PLANNER_KEY: &str = "granstudy:study_planner";
pub const SESSION_KEY: &str = "granstudy:session";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Storage key holding a board's task sequence.
#[must_use]
pub fn board_key(board: BoardKind) -> &'static str {
    match board {
        BoardKind::Planner => PLANNER_TASKS_KEY,
        BoardKind::Study => STUDY_PLANNER_KEY,
    }
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CodecError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("invalid record at index {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },
}

/// Persisted shape of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default)]
    pub done: bool,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub column: Option<Column>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_min: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lesson_id: Option<String>,
}

impl TaskRecord {
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.id().to_string(),
            title: task.title().as_str().to_owned(),
            due_date: task
                .due_date()
                .map(|date| date.format(DATE_FORMAT).to_string()),
            done: task.is_done(),
            column: Some(task.column()),
            duration_min: task.duration_min(),
            lesson_id: task.lesson_id().map(|id| id.as_str().to_owned()),
        }
    }

    /// Convert the record back into a domain `Task`.
    ///
    /// # Errors
    ///
    /// Returns a description of the first field that fails validation.
    pub fn into_task(self) -> Result<Task, String> {
        let id: TaskId = self.id.parse().map_err(|e| format!("{e}"))?;
        let title = TaskTitle::new(self.title).map_err(|e| e.to_string())?;
        let due_date = match self.due_date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(
                NaiveDate::parse_from_str(raw, DATE_FORMAT)
                    .map_err(|e| format!("invalid due date {raw:?}: {e}"))?,
            ),
        };
        let lesson_id = match self.lesson_id {
            Some(raw) if !raw.trim().is_empty() => {
                Some(LessonId::new(raw).map_err(|e| e.to_string())?)
            }
            _ => None,
        };

        Ok(Task::from_persisted(
            id,
            title,
            due_date,
            self.done,
            self.column.unwrap_or_default(),
            self.duration_min,
            lesson_id,
        ))
    }
}

/// Serialize a whole task sequence, preserving order.
///
/// # Errors
///
/// Returns `CodecError::Json` if serialization fails.
pub fn encode_tasks(tasks: &TaskList) -> Result<String, CodecError> {
    let records: Vec<TaskRecord> = tasks.iter().map(TaskRecord::from_task).collect();
    Ok(serde_json::to_string(&records)?)
}

/// Parse a stored task sequence.
///
/// # Errors
///
/// Returns `CodecError` if the JSON is malformed or any record is invalid.
pub fn decode_tasks(raw: &str) -> Result<TaskList, CodecError> {
    let records: Vec<TaskRecord> = serde_json::from_str(raw)?;
    let mut tasks = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        let task = record
            .into_task()
            .map_err(|reason| CodecError::InvalidRecord { index, reason })?;
        tasks.push(task);
    }
    Ok(TaskList::new(tasks))
}

/// # Errors
///
/// Returns `CodecError::Json` if serialization fails.
pub fn encode_claims(claims: &SessionClaims) -> Result<String, CodecError> {
    Ok(serde_json::to_string(claims)?)
}

/// # Errors
///
/// Returns `CodecError::Json` if the stored claims are malformed.
pub fn decode_claims(raw: &str) -> Result<SessionClaims, CodecError> {
    Ok(serde_json::from_str(raw)?)
}
