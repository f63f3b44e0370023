mod bucket_vm;
mod task_vm;
mod time_fmt;

pub use bucket_vm::{BoardVm, BucketVm, LessonCardVm, map_board, map_lesson_cards};
pub use task_vm::{TaskRowVm, map_task_rows};
pub use time_fmt::{format_date_br, format_date_input, parse_date_input};
