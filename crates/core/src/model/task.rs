use chrono::NaiveDate;
use thiserror::Error;

use crate::model::column::Column;
use crate::model::ids::{LessonId, TaskId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TaskError {
    #[error("task title cannot be empty")]
    EmptyTitle,

    #[error("a due date is required")]
    MissingDueDate,
}

//
// ─── TITLE ─────────────────────────────────────────────────────────────────────
//

/// Validated task title (trimmed, non-empty).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Create a validated title.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::EmptyTitle` if the title is empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskError::EmptyTitle);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

//
// ─── TASK ──────────────────────────────────────────────────────────────────────
//

/// A single plannable unit of study work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    due_date: Option<NaiveDate>,
    done: bool,
    column: Column,
    duration_min: Option<u32>,
    lesson_id: Option<LessonId>,
}

impl Task {
    /// Rehydrate a task from persisted storage.
    #[must_use]
    pub fn from_persisted(
        id: TaskId,
        title: TaskTitle,
        due_date: Option<NaiveDate>,
        done: bool,
        column: Column,
        duration_min: Option<u32>,
        lesson_id: Option<LessonId>,
    ) -> Self {
        Self {
            id,
            title,
            due_date,
            done,
            column,
            duration_min,
            lesson_id,
        }
    }

    #[must_use]
    pub fn id(&self) -> TaskId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &TaskTitle {
        &self.title
    }

    #[must_use]
    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.done
    }

    #[must_use]
    pub fn column(&self) -> Column {
        self.column
    }

    #[must_use]
    pub fn duration_min(&self) -> Option<u32> {
        self.duration_min
    }

    /// Lesson this task was planned from, if any. Never an ownership link.
    #[must_use]
    pub fn lesson_id(&self) -> Option<&LessonId> {
        self.lesson_id.as_ref()
    }

    #[must_use]
    pub fn with_done(&self, done: bool) -> Self {
        Self {
            done,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_title(&self, title: TaskTitle) -> Self {
        Self {
            title,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_due_date(&self, due_date: Option<NaiveDate>) -> Self {
        Self {
            due_date,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_column(&self, column: Column) -> Self {
        Self {
            column,
            ..self.clone()
        }
    }

    /// Classify the due date against `today`. Undated tasks have no status.
    #[must_use]
    pub fn due_status(&self, today: NaiveDate) -> Option<DueStatus> {
        self.due_date.map(|due| DueStatus::classify(due, today))
    }
}

/// How a due date relates to the current day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStatus {
    Overdue,
    Today,
    Future,
}

impl DueStatus {
    #[must_use]
    pub fn classify(due: NaiveDate, today: NaiveDate) -> Self {
        match due.cmp(&today) {
            std::cmp::Ordering::Less => DueStatus::Overdue,
            std::cmp::Ordering::Equal => DueStatus::Today,
            std::cmp::Ordering::Greater => DueStatus::Future,
        }
    }
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Whether a board insists on a due date for new tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftPolicy {
    RequireDueDate,
    DueDateOptional,
}

/// Unvalidated input for a new task, as collected from a form or a dropped lesson.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskDraft {
    pub title: String,
    pub due_date: Option<NaiveDate>,
    pub column: Column,
    pub duration_min: Option<u32>,
    pub lesson_id: Option<LessonId>,
}

impl TaskDraft {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn due(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    #[must_use]
    pub fn in_column(mut self, column: Column) -> Self {
        self.column = column;
        self
    }

    /// Validate the draft and bind it to an id. New tasks always start open.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::EmptyTitle` for a blank title, or
    /// `TaskError::MissingDueDate` when the policy requires a date.
    pub fn validate(self, id: TaskId, policy: DraftPolicy) -> Result<Task, TaskError> {
        let title = TaskTitle::new(self.title)?;
        if policy == DraftPolicy::RequireDueDate && self.due_date.is_none() {
            return Err(TaskError::MissingDueDate);
        }

        Ok(Task {
            id,
            title,
            due_date: self.due_date,
            done: false,
            column: self.column,
            duration_min: self.duration_min,
            lesson_id: self.lesson_id,
        })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
