use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;
use planner_core::board::{BoardKind, DragPayload};
use planner_core::model::{
    Column, Lesson, LessonCatalog, TaskDraft, TaskId, TaskList, TaskTitle,
};
use storage::records::{board_key, decode_tasks, encode_tasks};
use storage::repository::LocalStore;
use tokio::sync::Mutex as WriteLock;
use tracing::warn;

use crate::Clock;
use crate::error::TaskStoreError;

/// Owns one board's task sequence and writes it back after every change.
///
/// Operations compute a new list from the current one, commit it in memory,
/// then serialize the whole list under the board's key. Mutations run one at
/// a time, so writes land in commit order. A failed write is reported but
/// the committed list stays; the next successful write replaces the stored
/// value with the full list.
pub struct TaskStore {
    clock: Clock,
    board: BoardKind,
    local: Arc<dyn LocalStore>,
    tasks: Mutex<TaskList>,
    writes: WriteLock<()>,
}

impl TaskStore {
    /// Load the board's stored tasks once.
    ///
    /// A missing key yields an empty board. Unreadable stored content is
    /// discarded and also yields an empty board.
    ///
    /// # Errors
    ///
    /// Returns `TaskStoreError::Storage` if the backend cannot be read.
    pub async fn load(
        clock: Clock,
        board: BoardKind,
        local: Arc<dyn LocalStore>,
    ) -> Result<Self, TaskStoreError> {
        let tasks = load_tasks(local.as_ref(), board).await?;
        Ok(Self {
            clock,
            board,
            local,
            tasks: Mutex::new(tasks),
            writes: WriteLock::new(()),
        })
    }

    #[must_use]
    pub fn board(&self) -> BoardKind {
        self.board
    }

    /// Current day according to the store's clock.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    #[must_use]
    pub fn snapshot(&self) -> TaskList {
        self.lock().clone()
    }

    /// Validate and append a new task.
    ///
    /// # Errors
    ///
    /// Returns `TaskStoreError::Task` if the title is blank or the board
    /// requires a due date that is missing; state is left untouched.
    /// Returns `TaskStoreError::Storage` if the write fails.
    pub async fn add_task(&self, draft: TaskDraft) -> Result<TaskList, TaskStoreError> {
        let now_millis = self.clock.now_millis();
        let policy = self.board.draft_policy();
        self.commit(|tasks| {
            let task = draft.validate(tasks.next_id(now_millis), policy)?;
            Ok(tasks.with_added(task))
        })
        .await
    }

    /// Plan a lesson into a column, copying its title and duration.
    ///
    /// # Errors
    ///
    /// See [`TaskStore::add_task`].
    pub async fn add_from_lesson(
        &self,
        lesson: &Lesson,
        column: Column,
    ) -> Result<TaskList, TaskStoreError> {
        let draft = TaskDraft {
            title: lesson.title().to_owned(),
            due_date: None,
            column,
            duration_min: Some(lesson.duration_min()),
            lesson_id: Some(lesson.id().clone()),
        };
        self.add_task(draft).await
    }

    /// Handle something dropped onto a column.
    ///
    /// Lessons become new tasks; tasks only change column. Lessons missing
    /// from the catalog are ignored.
    ///
    /// # Errors
    ///
    /// Returns `TaskStoreError` if the new task is invalid or the write fails.
    pub async fn drop_on_column(
        &self,
        payload: &DragPayload,
        column: Column,
        catalog: &LessonCatalog,
    ) -> Result<TaskList, TaskStoreError> {
        match payload {
            DragPayload::Lesson(lesson_id) => match catalog.get(lesson_id) {
                Some(lesson) => self.add_from_lesson(lesson, column).await,
                None => Ok(self.snapshot()),
            },
            DragPayload::Task(task_id) => self.move_to_column(*task_id, column).await,
        }
    }

    /// # Errors
    ///
    /// Returns `TaskStoreError::Storage` if the write fails.
    pub async fn toggle_done(&self, id: TaskId) -> Result<TaskList, TaskStoreError> {
        self.commit(|tasks| Ok(tasks.with_done_toggled(id))).await
    }

    /// # Errors
    ///
    /// Returns `TaskStoreError::Storage` if the write fails.
    pub async fn remove(&self, id: TaskId) -> Result<TaskList, TaskStoreError> {
        self.commit(|tasks| Ok(tasks.without(id))).await
    }

    /// # Errors
    ///
    /// Returns `TaskStoreError::Task` for a blank title (nothing changes), or
    /// `TaskStoreError::Storage` if the write fails.
    pub async fn edit_title(&self, id: TaskId, title: &str) -> Result<TaskList, TaskStoreError> {
        let title = TaskTitle::new(title)?;
        self.commit(|tasks| Ok(tasks.with_title(id, &title))).await
    }

    /// # Errors
    ///
    /// Returns `TaskStoreError::Storage` if the write fails.
    pub async fn set_due_date(
        &self,
        id: TaskId,
        due_date: Option<NaiveDate>,
    ) -> Result<TaskList, TaskStoreError> {
        self.commit(|tasks| Ok(tasks.with_due_date(id, due_date))).await
    }

    /// # Errors
    ///
    /// Returns `TaskStoreError::Storage` if the write fails.
    pub async fn move_to_column(
        &self,
        id: TaskId,
        column: Column,
    ) -> Result<TaskList, TaskStoreError> {
        self.commit(|tasks| Ok(tasks.with_column(id, column))).await
    }

    /// # Errors
    ///
    /// Returns `TaskStoreError::Storage` if the write fails.
    pub async fn move_up(&self, id: TaskId) -> Result<TaskList, TaskStoreError> {
        self.commit(|tasks| Ok(tasks.moved_up(id))).await
    }

    /// # Errors
    ///
    /// Returns `TaskStoreError::Storage` if the write fails.
    pub async fn move_down(&self, id: TaskId) -> Result<TaskList, TaskStoreError> {
        self.commit(|tasks| Ok(tasks.moved_down(id))).await
    }

    /// Remove every completed task. Returns the new list and the removed count.
    ///
    /// # Errors
    ///
    /// Returns `TaskStoreError::Storage` if the write fails.
    pub async fn clear_completed(&self) -> Result<(TaskList, usize), TaskStoreError> {
        let mut removed = 0;
        let tasks = self
            .commit(|tasks| {
                let (next, count) = tasks.without_completed();
                removed = count;
                Ok(next)
            })
            .await?;
        Ok((tasks, removed))
    }

    async fn commit(
        &self,
        op: impl FnOnce(&TaskList) -> Result<TaskList, TaskStoreError>,
    ) -> Result<TaskList, TaskStoreError> {
        let _writing = self.writes.lock().await;
        let next = {
            let mut guard = self.lock();
            let next = op(&*guard)?.sorted(self.board.sort_rule());
            *guard = next.clone();
            next
        };
        self.persist(&next).await?;
        Ok(next)
    }

    async fn persist(&self, tasks: &TaskList) -> Result<(), TaskStoreError> {
        let key = board_key(self.board);
        let raw = encode_tasks(tasks)?;
        if let Err(err) = self.local.set_item(key, &raw).await {
            warn!(key, error = %err, "failed to persist tasks");
            return Err(err.into());
        }
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, TaskList> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

async fn load_tasks(local: &dyn LocalStore, board: BoardKind) -> Result<TaskList, TaskStoreError> {
    let key = board_key(board);
    let Some(raw) = local.get_item(key).await? else {
        return Ok(TaskList::default());
    };

    match decode_tasks(&raw) {
        Ok(tasks) => Ok(tasks.sorted(board.sort_rule())),
        Err(err) => {
            warn!(key, error = %err, "discarding unreadable stored tasks");
            Ok(TaskList::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    use planner_core::model::{LessonId, TaskError};
    use planner_core::time::fixed_clock;
    use storage::repository::{InMemoryRepository, StorageError};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn store(board: BoardKind) -> (TaskStore, InMemoryRepository) {
        let repo = InMemoryRepository::new();
        let store = TaskStore::load(fixed_clock(), board, Arc::new(repo.clone()))
            .await
            .unwrap();
        (store, repo)
    }

    async fn stored(repo: &InMemoryRepository, board: BoardKind) -> TaskList {
        let raw = repo.get_item(board_key(board)).await.unwrap().unwrap();
        decode_tasks(&raw).unwrap()
    }

    fn titles(tasks: &TaskList) -> Vec<String> {
        tasks.iter().map(|t| t.title().to_string()).collect()
    }

    #[tokio::test]
    async fn planner_add_sorts_by_due_date_and_persists() {
        let (store, repo) = store(BoardKind::Planner).await;

        let tasks = store
            .add_task(TaskDraft::new("Review Lesson 1").due(date(2025, 1, 10)))
            .await
            .unwrap();
        assert_eq!(tasks.len(), 1);
        assert!(!tasks.as_slice()[0].is_done());

        let tasks = store
            .add_task(TaskDraft::new("Earlier").due(date(2025, 1, 5)))
            .await
            .unwrap();
        assert_eq!(titles(&tasks), vec!["Earlier", "Review Lesson 1"]);
        assert_eq!(stored(&repo, BoardKind::Planner).await, tasks);
    }

    #[tokio::test]
    async fn ids_stay_unique_under_a_frozen_clock() {
        let (store, _repo) = store(BoardKind::Study).await;
        store.add_task(TaskDraft::new("a")).await.unwrap();
        let tasks = store.add_task(TaskDraft::new("b")).await.unwrap();
        let ids: Vec<TaskId> = tasks.iter().map(|t| t.id()).collect();
        assert_ne!(ids[0], ids[1]);
    }

    #[tokio::test]
    async fn invalid_drafts_leave_state_untouched() {
        let (store, repo) = store(BoardKind::Planner).await;

        let err = store.add_task(TaskDraft::new("  ")).await.unwrap_err();
        assert!(matches!(err, TaskStoreError::Task(TaskError::EmptyTitle)));

        let err = store.add_task(TaskDraft::new("No date")).await.unwrap_err();
        assert!(matches!(err, TaskStoreError::Task(TaskError::MissingDueDate)));

        assert!(store.snapshot().is_empty());
        assert_eq!(repo.get_item(board_key(BoardKind::Planner)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn dropping_lesson_creates_bound_task() {
        let (store, _repo) = store(BoardKind::Study).await;
        let catalog = LessonCatalog::built_in();
        let l3 = LessonId::new("L3").unwrap();

        let tasks = store
            .drop_on_column(&DragPayload::Lesson(l3.clone()), Column::Review, &catalog)
            .await
            .unwrap();
        let task = &tasks.as_slice()[0];
        assert_eq!(task.title().as_str(), "Logical equivalences");
        assert_eq!(task.duration_min(), Some(50));
        assert_eq!(task.lesson_id(), Some(&l3));
        assert_eq!(task.column(), Column::Review);
        assert!(task.due_date().is_none());
    }

    #[tokio::test]
    async fn dropping_unknown_lesson_is_ignored() {
        let (store, repo) = store(BoardKind::Study).await;
        let payload = DragPayload::Lesson(LessonId::new("L99").unwrap());
        let tasks = store
            .drop_on_column(&payload, Column::Study, &LessonCatalog::built_in())
            .await
            .unwrap();
        assert!(tasks.is_empty());
        assert_eq!(repo.get_item(board_key(BoardKind::Study)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn dropping_task_changes_only_its_column() {
        let (store, _repo) = store(BoardKind::Study).await;
        store.add_task(TaskDraft::new("first")).await.unwrap();
        let tasks = store
            .add_task(TaskDraft::new("second").due(date(2025, 2, 1)))
            .await
            .unwrap();
        let second = tasks.as_slice()[1].clone();

        let tasks = store
            .drop_on_column(
                &DragPayload::Task(second.id()),
                Column::Exercise,
                &LessonCatalog::built_in(),
            )
            .await
            .unwrap();
        let moved = &tasks.as_slice()[1];
        assert_eq!(moved.column(), Column::Exercise);
        assert_eq!(moved.with_column(Column::Study), second);
    }

    #[tokio::test]
    async fn reorder_is_noop_at_the_edges() {
        let (store, _repo) = store(BoardKind::Study).await;
        store.add_task(TaskDraft::new("a")).await.unwrap();
        store.add_task(TaskDraft::new("b")).await.unwrap();
        let tasks = store.add_task(TaskDraft::new("c")).await.unwrap();
        let first = tasks.as_slice()[0].id();
        let last = tasks.as_slice()[2].id();

        assert_eq!(store.move_up(first).await.unwrap(), tasks);
        assert_eq!(store.move_down(last).await.unwrap(), tasks);

        let tasks = store.move_up(last).await.unwrap();
        assert_eq!(titles(&tasks), vec!["a", "c", "b"]);
        let tasks = store.move_down(first).await.unwrap();
        assert_eq!(titles(&tasks), vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn toggle_edit_due_and_clear() {
        let (store, repo) = store(BoardKind::Study).await;
        store.add_task(TaskDraft::new("keep")).await.unwrap();
        let tasks = store.add_task(TaskDraft::new("finish")).await.unwrap();
        let finish = tasks.as_slice()[1].id();

        let before = store.snapshot();
        store.toggle_done(finish).await.unwrap();
        assert_eq!(store.toggle_done(finish).await.unwrap(), before);

        let err = store.edit_title(finish, "   ").await.unwrap_err();
        assert!(matches!(err, TaskStoreError::Task(TaskError::EmptyTitle)));
        let tasks = store.edit_title(finish, " Finish chapter ").await.unwrap();
        assert_eq!(tasks.get(finish).unwrap().title().as_str(), "Finish chapter");

        let tasks = store
            .set_due_date(finish, Some(date(2025, 3, 3)))
            .await
            .unwrap();
        assert_eq!(tasks.get(finish).unwrap().due_date(), Some(date(2025, 3, 3)));

        store.toggle_done(finish).await.unwrap();
        let (tasks, removed) = store.clear_completed().await.unwrap();
        assert_eq!(removed, 1);
        assert_eq!(titles(&tasks), vec!["keep"]);
        assert_eq!(stored(&repo, BoardKind::Study).await, tasks);
    }

    #[tokio::test]
    async fn reload_yields_equal_sequence() {
        let repo = InMemoryRepository::new();
        let local: Arc<dyn LocalStore> = Arc::new(repo.clone());
        let store = TaskStore::load(fixed_clock(), BoardKind::Study, Arc::clone(&local))
            .await
            .unwrap();
        store.add_task(TaskDraft::new("a")).await.unwrap();
        let tasks = store
            .add_task(TaskDraft::new("b").in_column(Column::Review))
            .await
            .unwrap();

        let reloaded = TaskStore::load(fixed_clock(), BoardKind::Study, local)
            .await
            .unwrap();
        assert_eq!(reloaded.snapshot(), tasks);
    }

    #[tokio::test]
    async fn malformed_stored_content_loads_empty() {
        let repo = InMemoryRepository::new();
        repo.set_item(board_key(BoardKind::Planner), "{oops")
            .await
            .unwrap();
        let store = TaskStore::load(fixed_clock(), BoardKind::Planner, Arc::new(repo))
            .await
            .unwrap();
        assert!(store.snapshot().is_empty());
    }

    struct ReadOnlyStore;

    #[async_trait::async_trait]
    impl LocalStore for ReadOnlyStore {
        async fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        async fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Connection("read-only".to_string()))
        }

        async fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Connection("read-only".to_string()))
        }
    }

    #[tokio::test]
    async fn failed_write_keeps_committed_state() {
        let store = TaskStore::load(fixed_clock(), BoardKind::Study, Arc::new(ReadOnlyStore))
            .await
            .unwrap();
        let err = store.add_task(TaskDraft::new("a")).await.unwrap_err();
        assert!(matches!(err, TaskStoreError::Storage(_)));
        assert_eq!(store.snapshot().len(), 1);
    }

    /// Holds back its first write so a later change can overtake it.
    struct SlowFirstWrite {
        inner: InMemoryRepository,
        delayed: AtomicBool,
    }

    #[async_trait::async_trait]
    impl LocalStore for SlowFirstWrite {
        async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get_item(key).await
        }

        async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if !self.delayed.swap(true, Ordering::SeqCst) {
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
            self.inner.set_item(key, value).await
        }

        async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
            self.inner.remove_item(key).await
        }
    }

    #[tokio::test]
    async fn overlapping_changes_persist_the_latest_list() {
        let repo = InMemoryRepository::new();
        let local = Arc::new(SlowFirstWrite {
            inner: repo.clone(),
            delayed: AtomicBool::new(false),
        });
        let store = TaskStore::load(fixed_clock(), BoardKind::Study, local)
            .await
            .unwrap();

        let (a, b) = tokio::join!(
            store.add_task(TaskDraft::new("a")),
            store.add_task(TaskDraft::new("b"))
        );
        assert_eq!(a.unwrap().len(), 1);
        assert_eq!(b.unwrap().len(), 2);

        let persisted = stored(&repo, BoardKind::Study).await;
        assert_eq!(titles(&persisted), vec!["a", "b"]);
        assert_eq!(persisted, store.snapshot());
    }
}
