use chrono::NaiveDate;
use planner_core::board::format_minutes;
use planner_core::model::{Column, DueStatus, Task, TaskId};

use crate::vm::time_fmt::{format_date_br, format_date_input};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskRowVm {
    pub id: TaskId,
    pub title: String,
    pub done: bool,
    pub column: Column,
    /// `dd/mm/yyyy`, empty when the task has no date.
    pub due_label: String,
    /// `yyyy-mm-dd` for the date input.
    pub due_input: String,
    pub due_class: &'static str,
    pub duration_label: Option<String>,
    pub is_first: bool,
    pub is_last: bool,
}

impl TaskRowVm {
    #[must_use]
    pub fn from_task(task: &Task, today: NaiveDate) -> Self {
        let due_class = match (task.due_status(today), task.is_done()) {
            (None, _) => "",
            (Some(_), true) => "due-done",
            (Some(DueStatus::Overdue), false) => "due-overdue",
            (Some(DueStatus::Today), false) => "due-today",
            (Some(DueStatus::Future), false) => "due-future",
        };

        Self {
            id: task.id(),
            title: task.title().to_owned(),
            done: task.is_done(),
            column: task.column(),
            due_label: task.due_date().map(format_date_br).unwrap_or_default(),
            due_input: task.due_date().map(format_date_input).unwrap_or_default(),
            due_class,
            duration_label: task.duration_min().map(format_minutes),
            is_first: false,
            is_last: false,
        }
    }
}

/// Rows in the given order, with the first/last flags used by reorder buttons.
#[must_use]
pub fn map_task_rows<'a>(
    tasks: impl IntoIterator<Item = &'a Task>,
    today: NaiveDate,
) -> Vec<TaskRowVm> {
    let mut rows: Vec<TaskRowVm> = tasks
        .into_iter()
        .map(|task| TaskRowVm::from_task(task, today))
        .collect();
    let last = rows.len().saturating_sub(1);
    for (index, row) in rows.iter_mut().enumerate() {
        row.is_first = index == 0;
        row.is_last = index == last;
    }
    rows
}
