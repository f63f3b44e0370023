use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use services::AuthStatus;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, session_changed, view_state_from_resource};

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let auth = ctx.auth();
    let navigator = use_navigator();
    let sign_out_error = use_signal(|| None::<&'static str>);

    let status = {
        let auth = auth.clone();
        use_resource(move || {
            let auth = auth.clone();
            async move { auth.status().await.map_err(|_| ViewError::Unknown) }
        })
    };

    let sign_out = use_callback(move |()| {
        let auth = auth.clone();
        let mut status = status;
        let mut sign_out_error = sign_out_error;
        spawn(async move {
            match auth.sign_out().await {
                Ok(()) => {
                    session_changed();
                    sign_out_error.set(None);
                    status.restart();
                    navigator.push(Route::Login {});
                }
                Err(err) => sign_out_error.set(Some(err.user_message())),
            }
        });
    });

    rsx! {
        div { class: "page page--home",
            h2 { "GranStudy" }
            p { class: "tagline", "Plan your study week, one lesson at a time." }

            match view_state_from_resource(&status) {
                ViewState::Ready(AuthStatus::Authenticated(claims)) => rsx! {
                    p { "Welcome back, {claims.name()}." }
                    div { class: "home-actions",
                        Link { class: "btn btn-primary", to: Route::Planner {}, "Go to planner" }
                        Link { class: "btn", to: Route::Study {}, "Open study board" }
                        button {
                            class: "btn",
                            r#type: "button",
                            onclick: move |_| sign_out.call(()),
                            "Sign out"
                        }
                    }
                },
                ViewState::Ready(AuthStatus::Unauthenticated) => rsx! {
                    div { class: "home-actions",
                        Link { class: "btn btn-primary", to: Route::Login {}, "Sign in" }
                        Link { class: "btn", to: Route::Register {}, "Create account" }
                    }
                },
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
            }

            if let Some(message) = sign_out_error() {
                p { class: "form-error", role: "alert", "{message}" }
            }

            section { class: "features",
                div { class: "feature",
                    h3 { "Planning" }
                    p { "Build practical, flexible schedules." }
                }
                div { class: "feature",
                    h3 { "Tracking" }
                    p { "Follow tasks, reviews and progress." }
                }
                div { class: "feature",
                    h3 { "Lessons" }
                    p { "Drag lessons onto your board and see the minutes add up." }
                }
            }
        }
    }
}
