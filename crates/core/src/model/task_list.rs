use chrono::NaiveDate;

use crate::model::column::Column;
use crate::model::ids::TaskId;
use crate::model::task::{Task, TaskTitle};

/// Ordering a board keeps its tasks in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortRule {
    /// Stable sort by due date, earliest first; undated tasks last.
    DueDateAscending,
    /// Insertion order, changed only by explicit reordering.
    Manual,
}

impl SortRule {
    fn apply(self, tasks: &mut [Task]) {
        if self == SortRule::DueDateAscending {
            tasks.sort_by_key(|task| due_key(task.due_date()));
        }
    }
}

fn due_key(due: Option<NaiveDate>) -> (bool, Option<NaiveDate>) {
    (due.is_none(), due)
}

/// Ordered sequence of tasks.
///
/// Every operation returns a new list and leaves the receiver untouched. The
/// order is both the display order and the persisted order. Operations that
/// name an unknown id return an unchanged copy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    #[must_use]
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    #[must_use]
    pub fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id() == id)
    }

    /// Id for a task created at `now_millis`.
    ///
    /// Falls back to one past the largest live id when the clock has not moved
    /// past it, so quick successive creations stay distinct.
    #[must_use]
    pub fn next_id(&self, now_millis: u64) -> TaskId {
        let max_live = self.tasks.iter().map(|task| task.id().value()).max();
        match max_live {
            Some(max) if max >= now_millis => TaskId::new(max.saturating_add(1)),
            _ => TaskId::new(now_millis),
        }
    }

    #[must_use]
    pub fn sorted(&self, rule: SortRule) -> Self {
        let mut tasks = self.tasks.clone();
        rule.apply(&mut tasks);
        Self { tasks }
    }

    #[must_use]
    pub fn with_added(&self, task: Task) -> Self {
        let mut tasks = self.tasks.clone();
        tasks.push(task);
        Self { tasks }
    }

    #[must_use]
    pub fn with_done_toggled(&self, id: TaskId) -> Self {
        self.map_one(id, |task| task.with_done(!task.is_done()))
    }

    #[must_use]
    pub fn with_title(&self, id: TaskId, title: &TaskTitle) -> Self {
        self.map_one(id, |task| task.with_title(title.clone()))
    }

    #[must_use]
    pub fn with_due_date(&self, id: TaskId, due_date: Option<NaiveDate>) -> Self {
        self.map_one(id, |task| task.with_due_date(due_date))
    }

    /// Reassign a task's column without touching its position.
    #[must_use]
    pub fn with_column(&self, id: TaskId, column: Column) -> Self {
        self.map_one(id, |task| task.with_column(column))
    }

    #[must_use]
    pub fn without(&self, id: TaskId) -> Self {
        let tasks = self
            .tasks
            .iter()
            .filter(|task| task.id() != id)
            .cloned()
            .collect();
        Self { tasks }
    }

    /// Drop every completed task, returning the new list and how many were removed.
    #[must_use]
    pub fn without_completed(&self) -> (Self, usize) {
        let tasks: Vec<Task> = self
            .tasks
            .iter()
            .filter(|task| !task.is_done())
            .cloned()
            .collect();
        let removed = self.tasks.len() - tasks.len();
        (Self { tasks }, removed)
    }

    /// Swap a task with its predecessor. No-op for the first task.
    #[must_use]
    pub fn moved_up(&self, id: TaskId) -> Self {
        match self.position(id) {
            Some(idx) if idx > 0 => self.swapped(idx, idx - 1),
            _ => self.clone(),
        }
    }

    /// Swap a task with its successor. No-op for the last task.
    #[must_use]
    pub fn moved_down(&self, id: TaskId) -> Self {
        match self.position(id) {
            Some(idx) if idx + 1 < self.tasks.len() => self.swapped(idx, idx + 1),
            _ => self.clone(),
        }
    }

    #[must_use]
    pub fn in_column(&self, column: Column) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| task.column() == column)
            .collect()
    }

    fn swapped(&self, a: usize, b: usize) -> Self {
        let mut tasks = self.tasks.clone();
        tasks.swap(a, b);
        Self { tasks }
    }

    fn map_one(&self, id: TaskId, f: impl Fn(&Task) -> Task) -> Self {
        let tasks = self
            .tasks
            .iter()
            .map(|task| if task.id() == id { f(task) } else { task.clone() })
            .collect();
        Self { tasks }
    }
}

impl From<Vec<Task>> for TaskList {
    fn from(tasks: Vec<Task>) -> Self {
        Self::new(tasks)
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::{DraftPolicy, TaskDraft};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task(id: u64, title: &str) -> Task {
        TaskDraft::new(title)
            .validate(TaskId::new(id), DraftPolicy::DueDateOptional)
            .unwrap()
    }

    fn dated(id: u64, title: &str, due: NaiveDate) -> Task {
        TaskDraft::new(title)
            .due(due)
            .validate(TaskId::new(id), DraftPolicy::RequireDueDate)
            .unwrap()
    }

    fn ids(list: &TaskList) -> Vec<u64> {
        list.iter().map(|t| t.id().value()).collect()
    }

    fn abc() -> TaskList {
        TaskList::new(vec![task(1, "a"), task(2, "b"), task(3, "c")])
    }

    #[test]
    fn added_task_sorted_by_due_date() {
        let list = TaskList::default()
            .with_added(dated(1, "Review Lesson 1", date(2025, 1, 10)))
            .sorted(SortRule::DueDateAscending);
        assert_eq!(list.len(), 1);
        assert!(!list.as_slice()[0].is_done());

        let list = list
            .with_added(dated(2, "Earlier", date(2025, 1, 5)))
            .sorted(SortRule::DueDateAscending);
        assert_eq!(ids(&list), vec![2, 1]);
    }

    #[test]
    fn undated_tasks_sort_last_and_keep_relative_order() {
        let list = TaskList::new(vec![
            task(1, "x"),
            dated(2, "d", date(2025, 3, 1)),
            task(3, "y"),
            dated(4, "e", date(2025, 3, 1)),
        ])
        .sorted(SortRule::DueDateAscending);
        assert_eq!(ids(&list), vec![2, 4, 1, 3]);
    }

    #[test]
    fn manual_rule_keeps_order() {
        let list = abc().sorted(SortRule::Manual);
        assert_eq!(ids(&list), vec![1, 2, 3]);
    }

    #[test]
    fn move_up_at_top_is_noop() {
        let list = abc();
        assert_eq!(list.moved_up(TaskId::new(1)), list);
        assert_eq!(ids(&list.moved_up(TaskId::new(3))), vec![1, 3, 2]);
    }

    #[test]
    fn move_down_at_bottom_is_noop() {
        let list = abc();
        assert_eq!(list.moved_down(TaskId::new(3)), list);
        assert_eq!(ids(&list.moved_down(TaskId::new(1))), vec![2, 1, 3]);
    }

    #[test]
    fn toggle_twice_restores_task() {
        let list = abc();
        let once = list.with_done_toggled(TaskId::new(2));
        assert!(once.get(TaskId::new(2)).unwrap().is_done());
        let twice = once.with_done_toggled(TaskId::new(2));
        assert_eq!(twice, list);
    }

    #[test]
    fn remove_drops_exactly_one_and_keeps_order() {
        let list = abc().without(TaskId::new(2));
        assert_eq!(ids(&list), vec![1, 3]);
        assert_eq!(abc().without(TaskId::new(99)), abc());
    }

    #[test]
    fn column_change_keeps_position_and_fields() {
        let list = abc().with_column(TaskId::new(2), Column::Exercise);
        assert_eq!(ids(&list), vec![1, 2, 3]);
        let moved = list.get(TaskId::new(2)).unwrap();
        assert_eq!(moved.column(), Column::Exercise);
        assert_eq!(moved.title().as_str(), "b");
    }

    #[test]
    fn clear_completed_counts_removed() {
        let list = abc()
            .with_done_toggled(TaskId::new(1))
            .with_done_toggled(TaskId::new(3));
        let (cleared, removed) = list.without_completed();
        assert_eq!(removed, 2);
        assert_eq!(ids(&cleared), vec![2]);
    }

    #[test]
    fn next_id_bumps_past_collisions() {
        let list = abc();
        assert_eq!(list.next_id(1_000), TaskId::new(1_000));
        assert_eq!(list.next_id(3), TaskId::new(4));
        assert_eq!(TaskList::default().next_id(0), TaskId::new(0));
    }

    #[test]
    fn receiver_is_untouched() {
        let list = abc();
        let _ = list.without(TaskId::new(1));
        let _ = list.with_done_toggled(TaskId::new(2));
        assert_eq!(list, abc());
    }
}
