use chrono::NaiveDate;
use planner_core::board::{BoardProjection, format_minutes};
use planner_core::model::{Column, Lesson, LessonId, TaskList};

use crate::vm::task_vm::{TaskRowVm, map_task_rows};

/// One column of the study board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BucketVm {
    pub column: Column,
    pub label: &'static str,
    pub minutes_label: String,
    pub tasks: Vec<TaskRowVm>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardVm {
    pub buckets: Vec<BucketVm>,
    pub total_label: String,
}

#[must_use]
pub fn map_board(tasks: &TaskList, today: NaiveDate) -> BoardVm {
    let projection = BoardProjection::from_tasks(tasks);
    let buckets = projection
        .columns
        .iter()
        .map(|view| BucketVm {
            column: view.column,
            label: view.column.label(),
            minutes_label: format_minutes(view.minutes),
            tasks: map_task_rows(&view.tasks, today),
        })
        .collect();

    BoardVm {
        buckets,
        total_label: format_minutes(projection.total_minutes),
    }
}

/// A draggable lesson in the catalog list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonCardVm {
    pub id: LessonId,
    pub title: String,
    pub duration_label: String,
}

impl From<&Lesson> for LessonCardVm {
    fn from(lesson: &Lesson) -> Self {
        Self {
            id: lesson.id().clone(),
            title: lesson.title().to_owned(),
            duration_label: format_minutes(lesson.duration_min()),
        }
    }
}

#[must_use]
pub fn map_lesson_cards<'a>(lessons: impl IntoIterator<Item = &'a Lesson>) -> Vec<LessonCardVm> {
    lessons.into_iter().map(LessonCardVm::from).collect()
}
