use thiserror::Error;

use crate::model::ids::{LessonId, ParseIdError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LessonError {
    #[error(transparent)]
    InvalidId(#[from] ParseIdError),

    #[error("lesson title cannot be empty")]
    EmptyTitle,
}

/// A lesson template that can be dragged onto a board column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    id: LessonId,
    title: String,
    duration_min: u32,
}

impl Lesson {
    /// # Errors
    ///
    /// Returns `LessonError` if the id or title is blank.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        duration_min: u32,
    ) -> Result<Self, LessonError> {
        let id = LessonId::new(id)?;
        let title = title.into().trim().to_owned();
        if title.is_empty() {
            return Err(LessonError::EmptyTitle);
        }
        Ok(Self {
            id,
            title,
            duration_min,
        })
    }

    #[must_use]
    pub fn id(&self) -> &LessonId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn duration_min(&self) -> u32 {
        self.duration_min
    }
}

const BUILT_IN: [(&str, &str, u32); 5] = [
    ("L1", "Propositions and connectives", 40),
    ("L2", "Truth tables", 55),
    ("L3", "Logical equivalences", 50),
    ("L4", "Arguments and validity", 45),
    ("L5", "Logic diagrams", 35),
];

/// Lessons available for planning.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LessonCatalog {
    lessons: Vec<Lesson>,
}

impl LessonCatalog {
    #[must_use]
    pub fn new(lessons: Vec<Lesson>) -> Self {
        Self { lessons }
    }

    /// The fixed logic course shipped with the app.
    #[must_use]
    pub fn built_in() -> Self {
        let lessons = BUILT_IN
            .iter()
            .filter_map(|(id, title, minutes)| Lesson::new(*id, *title, *minutes).ok())
            .collect();
        Self { lessons }
    }

    #[must_use]
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    #[must_use]
    pub fn get(&self, id: &LessonId) -> Option<&Lesson> {
        self.lessons.iter().find(|lesson| lesson.id() == id)
    }

    /// Case-insensitive title search. A blank query matches everything.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Lesson> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.lessons.iter().collect();
        }
        self.lessons
            .iter()
            .filter(|lesson| lesson.title().to_lowercase().contains(&query))
            .collect()
    }
}
