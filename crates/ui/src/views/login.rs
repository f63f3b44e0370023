use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use planner_core::auth::{Credentials, DEMO_EMAIL, DEMO_PASSWORD};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::session_changed;

#[component]
pub fn LoginView() -> Element {
    let ctx = use_context::<AppContext>();
    let auth = ctx.auth();
    let navigator = use_navigator();

    let mut email = use_signal(|| DEMO_EMAIL.to_string());
    let mut password = use_signal(|| DEMO_PASSWORD.to_string());
    let error = use_signal(|| None::<&'static str>);
    let busy = use_signal(|| false);

    // `None` signs in with the demo account.
    let submit = use_callback(move |credentials: Option<Credentials>| {
        let auth = auth.clone();
        let mut error = error;
        let mut busy = busy;
        busy.set(true);
        error.set(None);
        spawn(async move {
            let result = match credentials {
                Some(credentials) => auth.sign_in(&credentials).await,
                None => auth.sign_in_demo().await,
            };
            busy.set(false);
            match result {
                Ok(_) => {
                    session_changed();
                    navigator.push(Route::Planner {});
                }
                Err(err) => error.set(Some(err.user_message())),
            }
        });
    });

    rsx! {
        div { class: "page page--auth",
            h2 { "Sign in" }
            form {
                class: "auth-form",
                onsubmit: move |evt| {
                    evt.prevent_default();
                    submit.call(Some(Credentials::new(email(), password())));
                },
                label { r#for: "login-email", "Email" }
                input {
                    id: "login-email",
                    r#type: "email",
                    required: true,
                    value: "{email}",
                    oninput: move |evt| email.set(evt.value()),
                }
                label { r#for: "login-password", "Password" }
                input {
                    id: "login-password",
                    r#type: "password",
                    required: true,
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                }
                if let Some(message) = error() {
                    p { class: "form-error", role: "alert", "{message}" }
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: busy(),
                    if busy() { "Signing in..." } else { "Sign in" }
                }
            }
            button {
                class: "btn",
                r#type: "button",
                disabled: busy(),
                onclick: move |_| submit.call(None),
                "Use demo account"
            }
            p { class: "hint", "Demo account: {DEMO_EMAIL} / {DEMO_PASSWORD}" }
            p {
                "No account yet? "
                Link { to: Route::Register {}, "Create one" }
            }
        }
    }
}
