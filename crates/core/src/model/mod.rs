mod column;
mod ids;
mod lesson;
mod session;
mod task;
mod task_list;

pub use ids::{LessonId, ParseIdError, TaskId, UserId};

pub use column::{Column, ColumnParseError};
pub use lesson::{Lesson, LessonCatalog, LessonError};
pub use session::{SESSION_MAX_AGE_DAYS, SessionClaims};
pub use task::{DraftPolicy, DueStatus, Task, TaskDraft, TaskError, TaskTitle};
pub use task_list::{SortRule, TaskList};
