use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{ExamView, HomeView, StatsView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/exam/:source_index", ExamView)] Exam { source_index: usize },
        #[route("/stats", StatsView)] Stats {},
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

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            h1 { "Exam Trainer" }
            ul {
                li { Link { to: Route::Home {}, "Home" } }
                li { Link { to: Route::Stats {}, "Statistics" } }
            }
        }
    }
}
