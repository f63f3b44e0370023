use dioxus::prelude::*;
use planner_core::board::{BoardKind, TaskCounts, TaskFilter};
use planner_core::model::{TaskDraft, TaskId};

use crate::context::AppContext;
use crate::views::actions::{BoardAction, use_board_dispatch};
use crate::views::notice::NoticeBanner;
use crate::vm::{TaskRowVm, format_date_input, map_task_rows, parse_date_input};

const FILTERS: [(TaskFilter, &str); 3] = [
    (TaskFilter::All, "All"),
    (TaskFilter::Open, "Open"),
    (TaskFilter::Done, "Done"),
];

#[component]
pub fn PlannerView() -> Element {
    let ctx = use_context::<AppContext>();
    let store = ctx.planner_store();
    let today = store.today();

    let tasks = use_signal({
        let store = store.clone();
        move || store.snapshot()
    });
    let notice = use_signal(|| None::<&'static str>);
    let mut filter = use_signal(TaskFilter::default);
    let mut title = use_signal(String::new);
    let mut due = use_signal(String::new);
    let mut confirm_clear = use_signal(|| false);

    let run = use_board_dispatch(store, ctx.lessons(), tasks, notice);

    let counts = TaskCounts::from_tasks(&tasks.read());
    let visible = filter().apply(&tasks.read());
    let rows = map_task_rows(&visible, today);
    let min_date = format_date_input(today);

    rsx! {
        div { class: "page page--planner",
            header {
                h2 { "Study planner" }
                p { "Manage your study tasks with deadlines and filters." }
            }

            section { class: "planner-summary",
                span { "Total: " strong { "{counts.total}" } }
                span { "Open: " strong { "{counts.open}" } }
                span { "Done: " strong { "{counts.done}" } }

                div { class: "planner-filters",
                    for (value, label) in FILTERS {
                        button {
                            class: if filter() == value { "tab tab--active" } else { "tab" },
                            r#type: "button",
                            aria_pressed: "{filter() == value}",
                            onclick: move |_| filter.set(value),
                            "{label}"
                        }
                    }
                    button {
                        class: "btn",
                        r#type: "button",
                        disabled: counts.done == 0,
                        title: if counts.done == 0 { "No completed tasks" } else { "Remove all completed tasks" },
                        onclick: move |_| confirm_clear.set(true),
                        "Clear completed"
                    }
                }
            }

            if confirm_clear() && counts.done > 0 {
                div { class: "confirm", role: "alertdialog",
                    p { "Remove {counts.done} completed task(s)?" }
                    button {
                        class: "btn btn-danger",
                        r#type: "button",
                        onclick: move |_| {
                            confirm_clear.set(false);
                            run.call(BoardAction::ClearCompleted);
                        },
                        "Remove"
                    }
                    button {
                        class: "btn",
                        r#type: "button",
                        onclick: move |_| confirm_clear.set(false),
                        "Cancel"
                    }
                }
            }

            NoticeBanner { notice }

            form {
                class: "task-form",
                onsubmit: move |evt| {
                    evt.prevent_default();
                    let mut draft = TaskDraft::new(title());
                    draft.due_date = parse_date_input(&due());
                    let accepted = draft
                        .clone()
                        .validate(TaskId::new(0), BoardKind::Planner.draft_policy())
                        .is_ok();
                    if accepted {
                        title.set(String::new());
                        due.set(String::new());
                    }
                    run.call(BoardAction::Add(draft));
                },
                label { r#for: "task-title", "Task title" }
                input {
                    id: "task-title",
                    placeholder: "E.g. Review Lesson 1",
                    value: "{title}",
                    oninput: move |evt| title.set(evt.value()),
                }
                label { r#for: "task-due", "Date" }
                input {
                    id: "task-due",
                    r#type: "date",
                    min: "{min_date}",
                    value: "{due}",
                    oninput: move |evt| due.set(evt.value()),
                }
                button { class: "btn btn-primary", r#type: "submit", "Add task" }
            }

            if rows.is_empty() {
                p { class: "empty", "Nothing here for this filter." }
            } else {
                ul { class: "task-list",
                    for row in rows {
                        PlannerRow { key: "{row.id}", row, run }
                    }
                }
            }
        }
    }
}

#[component]
fn PlannerRow(row: TaskRowVm, run: Callback<BoardAction>) -> Element {
    let mut editing = use_signal(|| None::<String>);
    let id = row.id;

    let mut confirm_edit = move || {
        let Some(text) = editing() else {
            return;
        };
        if !text.trim().is_empty() {
            editing.set(None);
        }
        run.call(BoardAction::EditTitle(id, text));
    };

    rsx! {
        li { class: if row.done { "task-row task-row--done" } else { "task-row" },
            input {
                r#type: "checkbox",
                checked: row.done,
                aria_label: "Complete {row.title}",
                onchange: move |_| run.call(BoardAction::Toggle(id)),
            }
            if let Some(text) = editing() {
                input {
                    class: "task-title-input",
                    value: "{text}",
                    oninput: move |evt| editing.set(Some(evt.value())),
                    onkeydown: move |evt| match evt.key() {
                        Key::Enter => {
                            evt.prevent_default();
                            confirm_edit();
                        }
                        Key::Escape => editing.set(None),
                        _ => {}
                    },
                }
                button { class: "btn", r#type: "button", onclick: move |_| confirm_edit(), "Save" }
                button { class: "btn", r#type: "button", onclick: move |_| editing.set(None), "Cancel" }
            } else {
                span {
                    class: "task-title",
                    ondoubleclick: {
                        let title = row.title.clone();
                        move |_| editing.set(Some(title.clone()))
                    },
                    "{row.title}"
                }
                if !row.due_label.is_empty() {
                    span { class: "task-due {row.due_class}", "{row.due_label}" }
                }
                button {
                    class: "btn",
                    r#type: "button",
                    onclick: {
                        let title = row.title.clone();
                        move |_| editing.set(Some(title.clone()))
                    },
                    "Edit"
                }
                button {
                    class: "btn btn-danger",
                    r#type: "button",
                    aria_label: "Delete {row.title}",
                    onclick: move |_| run.call(BoardAction::Remove(id)),
                    "Delete"
                }
            }
        }
    }
}
