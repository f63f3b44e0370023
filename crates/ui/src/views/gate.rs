use dioxus::prelude::*;
use dioxus_router::Link;
use services::AuthStatus;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};

/// Bumped whenever the session is started or ended.
static SESSION_VERSION: GlobalSignal<u64> = Signal::global(|| 0);

/// Make mounted gates check the session again.
pub fn session_changed() {
    *SESSION_VERSION.write() += 1;
}

/// Renders `children` only while a valid session exists.
#[component]
pub fn RequireSession(children: Element) -> Element {
    let ctx = use_context::<AppContext>();
    let auth = ctx.auth();

    let status = use_resource(move || {
        let auth = auth.clone();
        let _version = SESSION_VERSION();
        async move { auth.status().await.map_err(|_| ViewError::Unknown) }
    });

    match view_state_from_resource(&status) {
        ViewState::Ready(AuthStatus::Authenticated(claims)) => rsx! {
            div { class: "gated",
                p { class: "signed-in-as", "Signed in as {claims.name()}" }
                {children}
            }
        },
        ViewState::Ready(AuthStatus::Unauthenticated) => rsx! {
            div { class: "page gate",
                h2 { "Sign in required" }
                p { "Please sign in to see your study plan." }
                Link { class: "btn", to: Route::Login {}, "Sign in" }
            }
        },
        ViewState::Idle | ViewState::Loading => rsx! {
            p { "Loading..." }
        },
        ViewState::Error(err) => rsx! {
            p { "{err.message()}" }
        },
    }
}
