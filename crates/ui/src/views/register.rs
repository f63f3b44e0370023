use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use services::RegistrationDraft;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::session_changed;

#[component]
pub fn RegisterView() -> Element {
    let ctx = use_context::<AppContext>();
    let auth = ctx.auth();
    let navigator = use_navigator();

    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let error = use_signal(|| None::<&'static str>);
    let submitting = use_signal(|| false);

    let submit = use_callback(move |draft: RegistrationDraft| {
        let auth = auth.clone();
        let mut error = error;
        let mut submitting = submitting;
        submitting.set(true);
        error.set(None);
        spawn(async move {
            match auth.register(draft).await {
                Ok(_) => {
                    session_changed();
                    navigator.push(Route::Planner {});
                }
                Err(err) => {
                    submitting.set(false);
                    error.set(Some(err.user_message()));
                }
            }
        });
    });

    rsx! {
        div { class: "page page--auth",
            h2 { "Create account" }
            form {
                class: "auth-form",
                onsubmit: move |evt| {
                    evt.prevent_default();
                    submit.call(RegistrationDraft {
                        name: name(),
                        email: email(),
                        password: password(),
                    });
                },
                label { r#for: "register-name", "Name" }
                input {
                    id: "register-name",
                    required: true,
                    placeholder: "Your full name",
                    value: "{name}",
                    oninput: move |evt| name.set(evt.value()),
                }
                label { r#for: "register-email", "Email" }
                input {
                    id: "register-email",
                    r#type: "email",
                    required: true,
                    placeholder: "you@example.com",
                    value: "{email}",
                    oninput: move |evt| email.set(evt.value()),
                }
                label { r#for: "register-password", "Password" }
                input {
                    id: "register-password",
                    r#type: "password",
                    required: true,
                    placeholder: "Choose a password",
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                }
                if let Some(message) = error() {
                    p { class: "form-error", role: "alert", "{message}" }
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: submitting(),
                    if submitting() { "Creating access..." } else { "Sign up" }
                }
            }
            p {
                "Already have an account? "
                Link { to: Route::Login {}, "Sign in" }
            }
            p {
                Link { to: Route::Home {}, "Back to home" }
            }
        }
    }
}
