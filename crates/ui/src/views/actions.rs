use std::sync::Arc;

use chrono::NaiveDate;
use dioxus::prelude::*;
use planner_core::board::DragPayload;
use planner_core::model::{Column, LessonCatalog, LessonId, TaskDraft, TaskId, TaskList};
use services::{TaskStore, TaskStoreError};

/// Everything a board view can ask its store to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BoardAction {
    Add(TaskDraft),
    AddLesson(LessonId, Column),
    Drop(DragPayload, Column),
    Toggle(TaskId),
    Remove(TaskId),
    EditTitle(TaskId, String),
    SetDueDate(TaskId, Option<NaiveDate>),
    MoveTo(TaskId, Column),
    MoveUp(TaskId),
    MoveDown(TaskId),
    ClearCompleted,
}

/// Run one action against the store and return the list to show.
///
/// # Errors
///
/// Forwards the store's validation and storage errors.
pub async fn apply_board_action(
    store: &TaskStore,
    lessons: &LessonCatalog,
    action: BoardAction,
) -> Result<TaskList, TaskStoreError> {
    match action {
        BoardAction::Add(draft) => store.add_task(draft).await,
        BoardAction::AddLesson(lesson_id, column) => {
            store
                .drop_on_column(&DragPayload::Lesson(lesson_id), column, lessons)
                .await
        }
        BoardAction::Drop(payload, column) => store.drop_on_column(&payload, column, lessons).await,
        BoardAction::Toggle(id) => store.toggle_done(id).await,
        BoardAction::Remove(id) => store.remove(id).await,
        BoardAction::EditTitle(id, title) => store.edit_title(id, &title).await,
        BoardAction::SetDueDate(id, due) => store.set_due_date(id, due).await,
        BoardAction::MoveTo(id, column) => store.move_to_column(id, column).await,
        BoardAction::MoveUp(id) => store.move_up(id).await,
        BoardAction::MoveDown(id) => store.move_down(id).await,
        BoardAction::ClearCompleted => store.clear_completed().await.map(|(tasks, _)| tasks),
    }
}

/// What the view shows after an action.
///
/// Lists are the store's current snapshot, not the action's own result, so
/// an action finishing late never hides a newer change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    Applied(TaskList),
    /// Input was rejected; the list is unchanged.
    Rejected(&'static str),
    /// Applied in memory, but the write failed.
    Unsaved(TaskList, &'static str),
}

/// Map a store result onto what the view shows.
#[must_use]
pub fn outcome_of(
    result: Result<TaskList, TaskStoreError>,
    store: &TaskStore,
) -> ActionOutcome {
    match result {
        Ok(_) => ActionOutcome::Applied(store.snapshot()),
        Err(err @ TaskStoreError::Task(_)) => ActionOutcome::Rejected(err.user_message()),
        Err(err) => ActionOutcome::Unsaved(store.snapshot(), err.user_message()),
    }
}

/// Hook that runs board actions in the background and writes the result
/// into `tasks`. Rejections and failed writes land in `notice`.
pub fn use_board_dispatch(
    store: Arc<TaskStore>,
    lessons: Arc<LessonCatalog>,
    tasks: Signal<TaskList>,
    notice: Signal<Option<&'static str>>,
) -> Callback<BoardAction> {
    use_callback(move |action: BoardAction| {
        let store = Arc::clone(&store);
        let lessons = Arc::clone(&lessons);
        let mut tasks = tasks;
        let mut notice = notice;
        spawn(async move {
            let result = apply_board_action(&store, &lessons, action).await;
            match outcome_of(result, &store) {
                ActionOutcome::Applied(list) => {
                    tasks.set(list);
                    notice.set(None);
                }
                ActionOutcome::Rejected(message) => notice.set(Some(message)),
                ActionOutcome::Unsaved(list, message) => {
                    tasks.set(list);
                    notice.set(Some(message));
                }
            }
        });
    })
}
