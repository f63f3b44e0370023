use dioxus::prelude::*;

/// Dismissable message for rejected input or failed saves.
#[component]
pub fn NoticeBanner(notice: Signal<Option<&'static str>>) -> Element {
    let mut notice = notice;
    let Some(message) = notice() else {
        return rsx! {};
    };
    rsx! {
        div { class: "alert", role: "alert",
            span { "{message}" }
            button {
                class: "btn",
                r#type: "button",
                onclick: move |_| notice.set(None),
                "OK"
            }
        }
    }
}
