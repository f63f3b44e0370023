//! Board variants and the pure projections the views render from.

use crate::model::{Column, DraftPolicy, LessonId, SortRule, Task, TaskId, TaskList};

/// The two planner surfaces. Each keeps its own task sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardKind {
    /// Flat task list with mandatory due dates, kept in date order.
    Planner,
    /// Lesson/bucket board with manual ordering.
    Study,
}

impl BoardKind {
    #[must_use]
    pub fn sort_rule(self) -> SortRule {
        match self {
            BoardKind::Planner => SortRule::DueDateAscending,
            BoardKind::Study => SortRule::Manual,
        }
    }

    #[must_use]
    pub fn draft_policy(self) -> DraftPolicy {
        match self {
            BoardKind::Planner => DraftPolicy::RequireDueDate,
            BoardKind::Study => DraftPolicy::DueDateOptional,
        }
    }
}

/// What is being dragged onto a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragPayload {
    Lesson(LessonId),
    Task(TaskId),
}

//
// ─── COLUMN PROJECTION ─────────────────────────────────────────────────────────
//

/// Tasks of one column, in board order, with their summed duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnView {
    pub column: Column,
    pub tasks: Vec<Task>,
    pub minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardProjection {
    pub columns: Vec<ColumnView>,
    pub total_minutes: u32,
}

impl BoardProjection {
    #[must_use]
    pub fn from_tasks(tasks: &TaskList) -> Self {
        let columns: Vec<ColumnView> = Column::ALL
            .iter()
            .map(|&column| {
                let tasks: Vec<Task> = tasks.in_column(column).into_iter().cloned().collect();
                let minutes = sum_minutes(&tasks);
                ColumnView {
                    column,
                    tasks,
                    minutes,
                }
            })
            .collect();
        let total_minutes = columns
            .iter()
            .fold(0_u32, |acc, view| acc.saturating_add(view.minutes));
        Self {
            columns,
            total_minutes,
        }
    }

    #[must_use]
    pub fn column(&self, column: Column) -> Option<&ColumnView> {
        self.columns.iter().find(|view| view.column == column)
    }
}

/// Sum of estimated durations; tasks without one count as zero.
#[must_use]
pub fn sum_minutes<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> u32 {
    tasks
        .into_iter()
        .fold(0_u32, |acc, task| acc.saturating_add(task.duration_min().unwrap_or(0)))
}

/// Render minutes as `40 min`, `2 h` or `1 h 35 min`.
#[must_use]
pub fn format_minutes(minutes: u32) -> String {
    let hours = minutes / 60;
    let rest = minutes % 60;
    match (hours, rest) {
        (0, m) => format!("{m} min"),
        (h, 0) => format!("{h} h"),
        (h, m) => format!("{h} h {m} min"),
    }
}

//
// ─── LIST FILTER ───────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskFilter {
    #[default]
    All,
    Open,
    Done,
}

impl TaskFilter {
    #[must_use]
    pub fn matches(self, task: &Task) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Open => !task.is_done(),
            TaskFilter::Done => task.is_done(),
        }
    }

    #[must_use]
    pub fn apply(self, tasks: &TaskList) -> Vec<Task> {
        tasks.iter().filter(|task| self.matches(task)).cloned().collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskCounts {
    pub total: usize,
    pub open: usize,
    pub done: usize,
}

impl TaskCounts {
    #[must_use]
    pub fn from_tasks(tasks: &TaskList) -> Self {
        let total = tasks.len();
        let done = tasks.iter().filter(|task| task.is_done()).count();
        Self {
            total,
            open: total - done,
            done,
        }
    }
}
