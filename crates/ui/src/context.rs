use std::sync::Arc;

use planner_core::model::LessonCatalog;
use services::{AppServices, AuthService, TaskStore};

pub trait UiApp: Send + Sync {
    fn auth(&self) -> Arc<AuthService>;
    fn planner_store(&self) -> Arc<TaskStore>;
    fn study_store(&self) -> Arc<TaskStore>;
    fn lessons(&self) -> Arc<LessonCatalog>;
}

impl UiApp for AppServices {
    fn auth(&self) -> Arc<AuthService> {
        AppServices::auth(self)
    }

    fn planner_store(&self) -> Arc<TaskStore> {
        AppServices::planner_store(self)
    }

    fn study_store(&self) -> Arc<TaskStore> {
        AppServices::study_store(self)
    }

    fn lessons(&self) -> Arc<LessonCatalog> {
        AppServices::lessons(self)
    }
}

#[derive(Clone)]
pub struct AppContext {
    auth: Arc<AuthService>,
    planner_store: Arc<TaskStore>,
    study_store: Arc<TaskStore>,
    lessons: Arc<LessonCatalog>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            auth: app.auth(),
            planner_store: app.planner_store(),
            study_store: app.study_store(),
            lessons: app.lessons(),
        }
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn planner_store(&self) -> Arc<TaskStore> {
        Arc::clone(&self.planner_store)
    }

    #[must_use]
    pub fn study_store(&self) -> Arc<TaskStore> {
        Arc::clone(&self.study_store)
    }

    #[must_use]
    pub fn lessons(&self) -> Arc<LessonCatalog> {
        Arc::clone(&self.lessons)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
