use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{HomeView, LoginView, PlannerView, RegisterView, RequireSession, StudyView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/login", LoginView)] Login {},
        #[route("/register", RegisterView)] Register {},
        #[layout(AuthGate)]
            #[route("/planner", PlannerView)] Planner {},
            #[route("/study", StudyView)] Study {},
        #[end_layout]
    #[end_layout]
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

/// Pages below this layout need a signed-in session.
#[component]
fn AuthGate() -> Element {
    rsx! {
        RequireSession {
            Outlet::<Route> {}
        }
    }
}

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            h1 { "GranStudy" }
            ul {
                li { Link { to: Route::Home {}, "Home" } }
                li { Link { to: Route::Planner {}, "Planner" } }
                li { Link { to: Route::Study {}, "Study board" } }
            }
        }
    }
}
