use std::sync::Arc;

use chrono::Days;
use planner_core::board::BoardKind;
use planner_core::model::{Column, LessonCatalog, TaskDraft};
use storage::repository::Storage;
use tracing::info;

use crate::Clock;
use crate::auth_service::AuthService;
use crate::error::AppServicesError;
use crate::task_store::TaskStore;

/// Assembles the app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    auth: Arc<AuthService>,
    planner: Arc<TaskStore>,
    study: Arc<TaskStore>,
    lessons: Arc<LessonCatalog>,
}

/// How many demo tasks `seed_demo_tasks` wrote per board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub planner: usize,
    pub study: usize,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or the initial
    /// board loads fail.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::from_storage(&storage, clock).await
    }

    /// Build services over an in-memory store.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if an initial board load fails.
    pub async fn in_memory(clock: Clock) -> Result<Self, AppServicesError> {
        Self::from_storage(&Storage::in_memory(), clock).await
    }

    /// # Errors
    ///
    /// Returns `AppServicesError` if an initial board load fails.
    pub async fn from_storage(storage: &Storage, clock: Clock) -> Result<Self, AppServicesError> {
        let planner =
            TaskStore::load(clock, BoardKind::Planner, Arc::clone(&storage.local)).await?;
        let study = TaskStore::load(clock, BoardKind::Study, Arc::clone(&storage.local)).await?;

        Ok(Self {
            auth: Arc::new(AuthService::new(clock, Arc::clone(&storage.local))),
            planner: Arc::new(planner),
            study: Arc::new(study),
            lessons: Arc::new(LessonCatalog::built_in()),
        })
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn planner_store(&self) -> Arc<TaskStore> {
        Arc::clone(&self.planner)
    }

    #[must_use]
    pub fn study_store(&self) -> Arc<TaskStore> {
        Arc::clone(&self.study)
    }

    #[must_use]
    pub fn lessons(&self) -> Arc<LessonCatalog> {
        Arc::clone(&self.lessons)
    }

    /// Write a few demo tasks to each board that is still empty.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Store` if a task cannot be added or saved.
    pub async fn seed_demo_tasks(&self) -> Result<SeedReport, AppServicesError> {
        let mut report = SeedReport::default();

        if self.planner.snapshot().is_empty() {
            let today = self.planner.today();
            let drafts = [
                ("Review Lesson 1", 1),
                ("Practice truth tables", 3),
                ("Summarize logical equivalences", 7),
            ];
            for (title, offset) in drafts {
                let due = today.checked_add_days(Days::new(offset));
                let mut draft = TaskDraft::new(title);
                draft.due_date = due;
                self.planner.add_task(draft).await?;
                report.planner += 1;
            }
        }

        if self.study.snapshot().is_empty() {
            let placements = [
                (Column::Study, 0),
                (Column::Review, 1),
                (Column::Exercise, 2),
            ];
            for (column, index) in placements {
                let Some(lesson) = self.lessons.lessons().get(index) else {
                    continue;
                };
                self.study.add_from_lesson(lesson, column).await?;
                report.study += 1;
            }
        }

        info!(
            planner = report.planner,
            study = report.study,
            "seeded demo tasks"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use planner_core::time::fixed_clock;

    #[tokio::test]
    async fn seed_fills_empty_boards_once() {
        let services = AppServices::in_memory(fixed_clock()).await.unwrap();

        let first = services.seed_demo_tasks().await.unwrap();
        assert_eq!(first, SeedReport { planner: 3, study: 3 });

        let second = services.seed_demo_tasks().await.unwrap();
        assert_eq!(second, SeedReport::default());
        assert_eq!(services.planner_store().snapshot().len(), 3);
        assert_eq!(services.study_store().snapshot().len(), 3);
    }

    #[tokio::test]
    async fn boards_start_empty_and_signed_out() {
        let services = AppServices::in_memory(fixed_clock()).await.unwrap();
        assert!(services.planner_store().snapshot().is_empty());
        assert!(services.study_store().snapshot().is_empty());
        assert_eq!(services.auth().current_session().await.unwrap(), None);
        assert_eq!(services.lessons().lessons().len(), 5);
    }
}
