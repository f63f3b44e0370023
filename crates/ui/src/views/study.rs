use dioxus::prelude::*;
use planner_core::board::DragPayload;
use planner_core::model::Column;

use crate::context::AppContext;
use crate::views::actions::{BoardAction, use_board_dispatch};
use crate::views::notice::NoticeBanner;
use crate::vm::{BucketVm, LessonCardVm, TaskRowVm, map_board, map_lesson_cards, parse_date_input};

#[component]
pub fn StudyView() -> Element {
    let ctx = use_context::<AppContext>();
    let store = ctx.study_store();
    let lessons = ctx.lessons();
    let today = store.today();

    let tasks = use_signal({
        let store = store.clone();
        move || store.snapshot()
    });
    let notice = use_signal(|| None::<&'static str>);
    let mut query = use_signal(String::new);
    let dragging = use_signal(|| None::<DragPayload>);

    let lesson_cards = map_lesson_cards(lessons.search(&query()));
    let run = use_board_dispatch(store, lessons, tasks, notice);
    let board = map_board(&tasks.read(), today);

    rsx! {
        div { class: "page page--study",
            header {
                h2 { "Study board" }
                p { "Drag a lesson from the left onto a column: To-Do, Review or Exercises." }
            }

            NoticeBanner { notice }

            div { class: "study-grid",
                aside { class: "lessons",
                    div { class: "lessons-header",
                        h3 { "Lessons" }
                        span { class: "count", "({lesson_cards.len()})" }
                    }
                    input {
                        class: "lessons-search",
                        placeholder: "Search lessons...",
                        value: "{query}",
                        oninput: move |evt| query.set(evt.value()),
                    }
                    ul {
                        if lesson_cards.is_empty() {
                            li { class: "empty", "No lessons found." }
                        }
                        for card in lesson_cards {
                            LessonCard { key: "{card.id}", card, dragging, run }
                        }
                    }
                }

                section { class: "board",
                    div { class: "board-totals",
                        span { "Total: " strong { "{board.total_label}" } }
                        for bucket in board.buckets.iter() {
                            span { "{bucket.label}: " strong { "{bucket.minutes_label}" } }
                        }
                    }
                    div { class: "buckets",
                        for bucket in board.buckets.clone() {
                            Bucket { key: "{bucket.column}", bucket, dragging, run }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn LessonCard(
    card: LessonCardVm,
    dragging: Signal<Option<DragPayload>>,
    run: Callback<BoardAction>,
) -> Element {
    let mut dragging = dragging;
    let drag_id = card.id.clone();
    let add_id = card.id.clone();

    rsx! {
        li {
            class: "lesson-card",
            draggable: "true",
            title: "Drag onto a column",
            ondragstart: move |_| dragging.set(Some(DragPayload::Lesson(drag_id.clone()))),
            ondragend: move |_| dragging.set(None),
            div { class: "lesson-title", "{card.title}" }
            div { class: "lesson-duration", "~ {card.duration_label}" }
            button {
                class: "btn btn-small",
                r#type: "button",
                aria_label: "Add {card.title} to To-Do",
                onclick: move |_| run.call(BoardAction::AddLesson(add_id.clone(), Column::Study)),
                "Add"
            }
        }
    }
}

#[component]
fn Bucket(
    bucket: BucketVm,
    dragging: Signal<Option<DragPayload>>,
    run: Callback<BoardAction>,
) -> Element {
    let mut dragging = dragging;
    let column = bucket.column;

    rsx! {
        div {
            class: "bucket bucket--{column}",
            ondragover: move |evt| evt.prevent_default(),
            ondrop: move |evt| {
                evt.prevent_default();
                let payload = dragging.write().take();
                if let Some(payload) = payload {
                    run.call(BoardAction::Drop(payload, column));
                }
            },
            div { class: "bucket-header",
                h3 { "{bucket.label}" }
                span { class: "count", "({bucket.tasks.len()})" }
                span { class: "bucket-minutes", "~ {bucket.minutes_label}" }
            }
            if bucket.tasks.is_empty() {
                p { class: "empty", "Drag lessons here..." }
            } else {
                ul {
                    for row in bucket.tasks {
                        BucketCard { key: "{row.id}", row, dragging, run }
                    }
                }
            }
        }
    }
}

#[component]
fn BucketCard(
    row: TaskRowVm,
    dragging: Signal<Option<DragPayload>>,
    run: Callback<BoardAction>,
) -> Element {
    let mut dragging = dragging;
    let id = row.id;

    rsx! {
        li {
            class: if row.done { "bucket-card bucket-card--done" } else { "bucket-card" },
            draggable: "true",
            ondragstart: move |_| dragging.set(Some(DragPayload::Task(id))),
            ondragend: move |_| dragging.set(None),
            div { class: "bucket-card-main",
                input {
                    r#type: "checkbox",
                    checked: row.done,
                    aria_label: "Complete {row.title}",
                    onchange: move |_| run.call(BoardAction::Toggle(id)),
                }
                span { class: "bucket-card-title", "{row.title}" }
                if let Some(duration) = row.duration_label.as_ref() {
                    span { class: "bucket-card-duration", "{duration}" }
                }
                button {
                    class: "btn btn-small",
                    r#type: "button",
                    aria_label: "Delete {row.title}",
                    onclick: move |_| run.call(BoardAction::Remove(id)),
                    "Delete"
                }
            }
            div { class: "bucket-card-controls",
                input {
                    r#type: "date",
                    class: "task-due {row.due_class}",
                    value: "{row.due_input}",
                    onchange: move |evt| run.call(BoardAction::SetDueDate(id, parse_date_input(&evt.value()))),
                }
                span { class: "move-label", "Move:" }
                select {
                    value: "{row.column}",
                    onchange: move |evt| {
                        if let Ok(column) = evt.value().parse::<Column>() {
                            run.call(BoardAction::MoveTo(id, column));
                        }
                    },
                    for column in Column::ALL {
                        option { value: "{column}", selected: column == row.column, "{column.label()}" }
                    }
                }
                button {
                    class: "btn btn-small",
                    r#type: "button",
                    title: "Move up",
                    disabled: row.is_first,
                    onclick: move |_| run.call(BoardAction::MoveUp(id)),
                    "↑"
                }
                button {
                    class: "btn btn-small",
                    r#type: "button",
                    title: "Move down",
                    disabled: row.is_last,
                    onclick: move |_| run.call(BoardAction::MoveDown(id)),
                    "↓"
                }
            }
        }
    }
}
